/// The identifier handed out by the service when a story spoiler is created.
///
/// Parsing rejects blank input, so a populated `StoryId` is always usable in
/// an `/Edit/{id}` or `/Delete/{id}` path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryId(String);

impl StoryId {
    pub fn parse(s: String) -> Result<StoryId, String> {
        if s.trim().is_empty() {
            Err(format!("`{}` is not a valid story id.", s))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for StoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
