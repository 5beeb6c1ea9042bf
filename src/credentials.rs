use secrecy::{ExposeSecret, Secret};

#[derive(thiserror::Error, Debug)]
pub enum AuthenticationError {
    #[error("the service rejected the login: status {status}, body: {body}")]
    LoginRejected { status: u16, body: String },
    #[error("accessToken missing from the authentication response")]
    TokenMissing,
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Where the bearer token for a run comes from.
///
/// Selected by configuration, never hardcoded: a pre-issued token skips the
/// login endpoint entirely, otherwise one login call is made per run. A
/// failed login aborts the run before any case executes, since nothing
/// meaningful can be tested unauthenticated.
#[derive(Clone)]
pub enum CredentialSource {
    Static(Secret<String>),
    LoginFlow {
        email: String,
        password: Secret<String>,
    },
}

#[derive(serde::Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl CredentialSource {
    #[tracing::instrument(name = "Resolving bearer token", skip(self, http_client))]
    pub async fn resolve(
        &self,
        base_url: &str,
        http_client: &reqwest::Client,
    ) -> Result<Secret<String>, AuthenticationError> {
        match self {
            CredentialSource::Static(token) => Ok(token.clone()),
            CredentialSource::LoginFlow { email, password } => {
                login(base_url, email, password, http_client).await
            }
        }
    }
}

#[tracing::instrument(name = "Logging into the service", skip(password, http_client))]
async fn login(
    base_url: &str,
    email: &str,
    password: &Secret<String>,
    http_client: &reqwest::Client,
) -> Result<Secret<String>, AuthenticationError> {
    let url = format!("{}/api/User/Authentication", base_url);
    let response = http_client
        .post(&url)
        .json(&LoginRequest {
            email,
            password: password.expose_secret(),
        })
        .send()
        .await?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Login rejected with status {}", status);
        return Err(AuthenticationError::LoginRejected {
            status: status.as_u16(),
            body,
        });
    }

    let body: serde_json::Value = response.json().await?;
    match body.get("accessToken").and_then(|token| token.as_str()) {
        Some(token) if !token.trim().is_empty() => Ok(Secret::new(token.to_owned())),
        _ => Err(AuthenticationError::TokenMissing),
    }
}
