mod cases;
mod report;

pub use cases::{Case, NON_EXISTING_STORY_ID, ORDERED_CASES};
pub use report::{CaseOutcome, CaseReport, RunReport};

use crate::client::StoryClient;
use crate::configuration::Settings;
use crate::credentials::AuthenticationError;
use crate::domain::StoryId;
use chrono::Utc;

#[derive(thiserror::Error, Debug)]
pub enum CaseError {
    /// The service responded, but not with what the contract demands.
    #[error("{check} (status {status}, body: {body})")]
    Assertion {
        check: String,
        status: u16,
        body: String,
    },
    /// A case that needs the shared story id ran before any create recorded one.
    #[error("no story id recorded by a prior create")]
    MissingStoryId,
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl CaseError {
    pub fn assertion(check: impl Into<String>, status: reqwest::StatusCode, body: &str) -> Self {
        Self::Assertion {
            check: check.into(),
            status: status.as_u16(),
            body: body.to_owned(),
        }
    }
}

/// The state threaded through the ordered cases: the shared client and the
/// id of the most recently created story.
///
/// Each case receives the context explicitly instead of reaching for a
/// global id cell, so the create/edit/delete dependency is visible in the
/// signatures and a case can be exercised in isolation by seeding a
/// synthetic context.
pub struct ScenarioContext {
    client: StoryClient,
    created_story_id: Option<StoryId>,
}

impl ScenarioContext {
    pub fn new(client: StoryClient) -> Self {
        Self {
            client,
            created_story_id: None,
        }
    }

    pub fn client(&self) -> &StoryClient {
        &self.client
    }

    pub fn record_story_id(&mut self, id: StoryId) {
        self.created_story_id = Some(id);
    }

    pub fn created_story_id(&self) -> Option<&StoryId> {
        self.created_story_id.as_ref()
    }

    pub(crate) fn clear_story_id(&mut self) {
        self.created_story_id = None;
    }
}

/// Execute the full ordered scenario against the configured service.
///
/// Setup (token resolution and client construction) happens once, before any
/// case; a setup failure aborts the run. The cases themselves run strictly
/// sequentially in their fixed order, and a failing case never stops its
/// successors: its failure is recorded in the report and the run moves on.
/// The context, and with it the client's connection pool, is released when
/// this function returns.
#[tracing::instrument(name = "Running the story spoiler scenario", skip(settings))]
pub async fn run_scenario(settings: &Settings) -> Result<RunReport, AuthenticationError> {
    let client = StoryClient::build(settings).await?;
    let mut context = ScenarioContext::new(client);

    let started_at = Utc::now();
    let mut cases = Vec::with_capacity(ORDERED_CASES.len());
    for case in ORDERED_CASES {
        let outcome = match case.execute(&mut context).await {
            Ok(()) => {
                tracing::info!(case = case.name(), "case passed");
                CaseOutcome::Passed
            }
            Err(error) => {
                tracing::error!(case = case.name(), %error, "case failed");
                CaseOutcome::Failed(error)
            }
        };
        cases.push(CaseReport { case, outcome });
    }
    let finished_at = Utc::now();

    Ok(RunReport {
        started_at,
        finished_at,
        cases,
    })
}
