use crate::configuration::Settings;
use crate::credentials::AuthenticationError;
use crate::domain::StoryDraft;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

/// HTTP client for the story spoiler service.
///
/// Holds the bearer token for the run and attaches it to every request. One
/// instance (and its connection pool) is shared by all cases of a run.
#[derive(Clone, Debug)]
pub struct StoryClient {
    base_url: String,
    http_client: Client,
    token: Secret<String>,
}

impl StoryClient {
    pub fn new(base_url: String, token: Secret<String>, timeout: std::time::Duration) -> Self {
        let http_client = Client::builder().timeout(timeout).build().unwrap();
        Self {
            base_url,
            http_client,
            token,
        }
    }

    /// Resolve the configured credential source and build the client, the
    /// one-time setup of a run. The login call (if any) goes through a
    /// bootstrap client, since no bearer token exists yet.
    pub async fn build(settings: &Settings) -> Result<Self, AuthenticationError> {
        let bootstrap_client = Client::builder()
            .timeout(settings.service.timeout())
            .build()
            .unwrap();
        let token = settings
            .credentials
            .source()
            .resolve(&settings.service.base_url, &bootstrap_client)
            .await?;
        Ok(Self::new(
            settings.service.base_url.clone(),
            token,
            settings.service.timeout(),
        ))
    }

    #[tracing::instrument(name = "Creating a story spoiler", skip(self, draft))]
    pub async fn create_story(&self, draft: &StoryDraft) -> Result<reqwest::Response, reqwest::Error> {
        let url = format!("{}/api/Story/Create", self.base_url);
        self.http_client
            .post(&url)
            .bearer_auth(self.token.expose_secret())
            .json(draft)
            .send()
            .await
    }

    #[tracing::instrument(name = "Editing a story spoiler", skip(self, draft))]
    pub async fn edit_story(
        &self,
        story_id: &str,
        draft: &StoryDraft,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let url = format!("{}/api/Story/Edit/{}", self.base_url, story_id);
        self.http_client
            .put(&url)
            .bearer_auth(self.token.expose_secret())
            .json(draft)
            .send()
            .await
    }

    #[tracing::instrument(name = "Listing all story spoilers", skip(self))]
    pub async fn all_stories(&self) -> Result<reqwest::Response, reqwest::Error> {
        let url = format!("{}/api/Story/All", self.base_url);
        self.http_client
            .get(&url)
            .bearer_auth(self.token.expose_secret())
            .send()
            .await
    }

    #[tracing::instrument(name = "Deleting a story spoiler", skip(self))]
    pub async fn delete_story(&self, story_id: &str) -> Result<reqwest::Response, reqwest::Error> {
        let url = format!("{}/api/Story/Delete/{}", self.base_url, story_id);
        self.http_client
            .delete(&url)
            .bearer_auth(self.token.expose_secret())
            .send()
            .await
    }
}
