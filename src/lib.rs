pub mod client;
pub mod configuration;
pub mod credentials;
pub mod domain;
pub mod scenario;
pub mod telemetry;
