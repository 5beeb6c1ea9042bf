use super::{CaseError, ScenarioContext};
use crate::domain::{ApiResponse, StoryDraft, StoryId};
use reqwest::StatusCode;

/// An id the service never handed out, targeted by the negative cases.
pub const NON_EXISTING_STORY_ID: &str = "123";

/// The seven cases in the order they must run. Ordering is a correctness
/// requirement: a story has to exist before it can be edited or deleted, and
/// the id recorded by `CreateValid` is consumed by `EditExisting` and
/// `DeleteExisting`.
pub const ORDERED_CASES: [Case; 7] = [
    Case::CreateValid,
    Case::EditExisting,
    Case::ListAll,
    Case::DeleteExisting,
    Case::CreateMissingFields,
    Case::EditNonExisting,
    Case::DeleteNonExisting,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    CreateValid,
    EditExisting,
    ListAll,
    DeleteExisting,
    CreateMissingFields,
    EditNonExisting,
    DeleteNonExisting,
}

impl Case {
    pub fn name(&self) -> &'static str {
        match self {
            Case::CreateValid => "create_story_with_required_fields",
            Case::EditExisting => "edit_existing_story",
            Case::ListAll => "list_all_stories",
            Case::DeleteExisting => "delete_existing_story",
            Case::CreateMissingFields => "create_story_without_required_fields",
            Case::EditNonExisting => "edit_non_existing_story",
            Case::DeleteNonExisting => "delete_non_existing_story",
        }
    }

    #[tracing::instrument(name = "Executing case", skip(self, context), fields(case = self.name()))]
    pub async fn execute(&self, context: &mut ScenarioContext) -> Result<(), CaseError> {
        match self {
            Case::CreateValid => create_valid(context).await,
            Case::EditExisting => edit_existing(context).await,
            Case::ListAll => list_all(context).await,
            Case::DeleteExisting => delete_existing(context).await,
            Case::CreateMissingFields => create_missing_fields(context).await,
            Case::EditNonExisting => edit_non_existing(context).await,
            Case::DeleteNonExisting => delete_non_existing(context).await,
        }
    }
}

async fn create_valid(context: &mut ScenarioContext) -> Result<(), CaseError> {
    let draft = StoryDraft::new("Test Story", "This is a test story description.", Some(""));

    let response = context.client().create_story(&draft).await?;
    let (status, body) = split(response).await?;

    expect_status(StatusCode::CREATED, status, &body)?;
    let envelope = decode_envelope(status, &body)?;
    expect_msg("Successfully created!", &envelope, status, &body)?;
    let id = StoryId::parse(envelope.id.unwrap_or_default()).map_err(|error| {
        CaseError::assertion(
            format!("story id was not returned in the response: {}", error),
            status,
            &body,
        )
    })?;
    context.record_story_id(id);
    Ok(())
}

async fn edit_existing(context: &mut ScenarioContext) -> Result<(), CaseError> {
    let story_id = context
        .created_story_id()
        .ok_or(CaseError::MissingStoryId)?
        .clone();
    let draft = StoryDraft::new(
        "Edited Story",
        "This is an updated test story description.",
        Some(""),
    );

    let response = context.client().edit_story(story_id.as_ref(), &draft).await?;
    let (status, body) = split(response).await?;

    expect_status(StatusCode::OK, status, &body)?;
    let envelope = decode_envelope(status, &body)?;
    expect_msg("Successfully edited", &envelope, status, &body)
}

async fn list_all(context: &mut ScenarioContext) -> Result<(), CaseError> {
    let response = context.client().all_stories().await?;
    let (status, body) = split(response).await?;

    expect_status(StatusCode::OK, status, &body)?;
    let stories: Vec<ApiResponse> = serde_json::from_str(&body).map_err(|error| {
        CaseError::assertion(
            format!("response body is not a list of stories: {}", error),
            status,
            &body,
        )
    })?;
    if stories.is_empty() {
        return Err(CaseError::assertion(
            "expected at least one story in the list",
            status,
            &body,
        ));
    }
    Ok(())
}

async fn delete_existing(context: &mut ScenarioContext) -> Result<(), CaseError> {
    let story_id = context
        .created_story_id()
        .ok_or(CaseError::MissingStoryId)?
        .clone();

    let response = context.client().delete_story(story_id.as_ref()).await?;
    let (status, body) = split(response).await?;

    expect_status(StatusCode::OK, status, &body)?;
    expect_body_contains("Deleted successfully!", status, &body)?;
    // The story is gone; later cases must not reuse its id.
    context.clear_story_id();
    Ok(())
}

async fn create_missing_fields(context: &mut ScenarioContext) -> Result<(), CaseError> {
    let draft = StoryDraft::new("", "", None);

    let response = context.client().create_story(&draft).await?;
    let (status, body) = split(response).await?;

    expect_status(StatusCode::BAD_REQUEST, status, &body)
}

async fn edit_non_existing(context: &mut ScenarioContext) -> Result<(), CaseError> {
    let draft = StoryDraft::new(
        "Edited Non-Existing Story",
        "This is an updated test story description for a non-existing story.",
        Some(""),
    );

    let response = context
        .client()
        .edit_story(NON_EXISTING_STORY_ID, &draft)
        .await?;
    let (status, body) = split(response).await?;

    expect_status(StatusCode::NOT_FOUND, status, &body)?;
    expect_body_contains("No spoilers..", status, &body)
}

async fn delete_non_existing(context: &mut ScenarioContext) -> Result<(), CaseError> {
    let response = context.client().delete_story(NON_EXISTING_STORY_ID).await?;
    let (status, body) = split(response).await?;

    expect_status(StatusCode::BAD_REQUEST, status, &body)?;
    expect_body_contains("Unable to delete this story spoiler", status, &body)
}

/// Reading the body consumes the response, so grab status and body together
/// before any assertion runs; failures attach both as diagnostics.
async fn split(response: reqwest::Response) -> Result<(StatusCode, String), CaseError> {
    let status = response.status();
    let body = response.text().await?;
    Ok((status, body))
}

fn expect_status(expected: StatusCode, actual: StatusCode, body: &str) -> Result<(), CaseError> {
    if actual == expected {
        Ok(())
    } else {
        Err(CaseError::assertion(
            format!("expected status {}, got {}", expected, actual),
            actual,
            body,
        ))
    }
}

fn decode_envelope(status: StatusCode, body: &str) -> Result<ApiResponse, CaseError> {
    serde_json::from_str(body).map_err(|error| {
        CaseError::assertion(
            format!("response body is not a valid envelope: {}", error),
            status,
            body,
        )
    })
}

fn expect_msg(
    expected: &str,
    envelope: &ApiResponse,
    status: StatusCode,
    body: &str,
) -> Result<(), CaseError> {
    if envelope.msg.as_deref() == Some(expected) {
        Ok(())
    } else {
        Err(CaseError::assertion(
            format!(
                "expected msg `{}`, got {:?}",
                expected,
                envelope.msg.as_deref()
            ),
            status,
            body,
        ))
    }
}

fn expect_body_contains(needle: &str, status: StatusCode, body: &str) -> Result<(), CaseError> {
    if body.contains(needle) {
        Ok(())
    } else {
        Err(CaseError::assertion(
            format!("expected the body to contain `{}`", needle),
            status,
            body,
        ))
    }
}
