use serde::Serialize;

/// The request payload for creating or editing a story spoiler.
///
/// The service accepts an empty `url`, but a `None` url is left out of the
/// serialized body entirely. The two shapes are not equivalent on the wire
/// and both are exercised by the suite.
#[derive(Debug, Clone, Serialize)]
pub struct StoryDraft {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl StoryDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: Option<&str>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.map(Into::into),
        }
    }
}
