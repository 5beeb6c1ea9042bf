use serde::Deserialize;

/// The `{msg, id}` wrapper the service returns from create and edit calls.
///
/// Both fields are optional: the same shape comes back from `/api/Story/All`,
/// where list items carry no `msg`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}
