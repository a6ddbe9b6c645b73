//! Identity types for Orion Publish.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ValidationError;

/// Path of a note inside the vault, e.g. `notes/a.md`.
///
/// Always relative and `/`-separated. Backslashes are normalized to `/`
/// and a leading `./` is dropped, so the same note always maps to the
/// same key in the published-state map. Whitespace is part of the name
/// and kept as given.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentPath(String);

impl DocumentPath {
    /// Validate and normalize a vault-relative path.
    pub fn new(path: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = path.into();
        let mut normalized = raw.replace('\\', "/");
        while let Some(rest) = normalized.strip_prefix("./") {
            normalized = rest.to_string();
        }

        let invalid = |reason| ValidationError::InvalidPath {
            path: raw.clone(),
            reason,
        };

        if normalized.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "document path",
            });
        }
        if normalized.starts_with('/') {
            return Err(invalid("path must be relative to the vault"));
        }
        for segment in normalized.split('/') {
            match segment {
                "" => return Err(invalid("empty path segments are not allowed")),
                "." => return Err(invalid("current-directory segments are not allowed")),
                ".." => return Err(invalid("parent segments are not allowed")),
                _ => {}
            }
        }
        if normalized
            .split('/')
            .next()
            .is_some_and(|first| first.ends_with(':'))
        {
            return Err(invalid("path must be relative to the vault"));
        }

        Ok(Self(normalized))
    }

    /// The normalized path string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment, e.g. `a.md`.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// File name without its extension, e.g. `a` for `notes/a.md`.
    ///
    /// This is the title a note is published under.
    pub fn title(&self) -> &str {
        let name = self.file_name();
        match name.rfind('.') {
            Some(0) | None => name,
            Some(dot) => &name[..dot],
        }
    }
}

impl TryFrom<String> for DocumentPath {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DocumentPath> for String {
    fn from(path: DocumentPath) -> Self {
        path.0
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentPath({})", self.0)
    }
}

/// Identifier the publishing service assigned to a post.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostId(String);

impl PostId {
    /// Create a PostId, rejecting blank values.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        non_blank(id.into(), "post id").map(Self)
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PostId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PostId> for String {
    fn from(id: PostId) -> Self {
        id.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PostId({})", self.0)
    }
}

/// Identifier the publishing service assigned to a feed.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeedId(String);

impl FeedId {
    /// Create a FeedId, rejecting blank values.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        non_blank(id.into(), "feed id").map(Self)
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FeedId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FeedId> for String {
    fn from(id: FeedId) -> Self {
        id.0
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeedId({})", self.0)
    }
}

/// Credential issued with a post or feed, required to update or delete it.
///
/// Never rotated. `Debug` output is redacted so tokens do not leak into logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccessToken(String);

impl AccessToken {
    /// Create an AccessToken, rejecting blank values.
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        non_blank(token.into(), "access token").map(Self)
    }

    /// The raw token, for placing in a request body.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccessToken {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccessToken> for String {
    fn from(token: AccessToken) -> Self {
        token.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken([{} chars REDACTED])", self.0.len())
    }
}

fn non_blank(value: String, field: &'static str) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Empty { field })
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_path_normalizes_separators() {
        let path = DocumentPath::new(".\\notes\\a.md").unwrap();
        assert_eq!(path.as_str(), "notes/a.md");

        let path = DocumentPath::new("./././daily/2024-01-01.md").unwrap();
        assert_eq!(path.as_str(), "daily/2024-01-01.md");
    }

    #[test]
    fn document_path_rejects_escapes() {
        assert!(matches!(
            DocumentPath::new("../secret.md"),
            Err(ValidationError::InvalidPath { .. })
        ));
        assert!(matches!(
            DocumentPath::new("notes/../../x.md"),
            Err(ValidationError::InvalidPath { .. })
        ));
        assert!(matches!(
            DocumentPath::new("/etc/passwd"),
            Err(ValidationError::InvalidPath { .. })
        ));
        assert!(matches!(
            DocumentPath::new("C:/notes/a.md"),
            Err(ValidationError::InvalidPath { .. })
        ));
        assert!(matches!(
            DocumentPath::new("notes//a.md"),
            Err(ValidationError::InvalidPath { .. })
        ));
        assert!(matches!(
            DocumentPath::new("  "),
            Err(ValidationError::Empty { .. })
        ));
    }

    #[test]
    fn document_path_keeps_surrounding_whitespace() {
        let path = DocumentPath::new(" lead.md").unwrap();
        assert_eq!(path.as_str(), " lead.md");
        assert_ne!(path, DocumentPath::new("lead.md").unwrap());
        assert_eq!(DocumentPath::new("notes/draft .md").unwrap().title(), "draft ");
    }

    #[test]
    fn document_path_title_drops_extension() {
        assert_eq!(DocumentPath::new("notes/a.md").unwrap().title(), "a");
        assert_eq!(
            DocumentPath::new("Weekly Review.2024.md").unwrap().title(),
            "Weekly Review.2024"
        );
        assert_eq!(DocumentPath::new("README").unwrap().title(), "README");
        assert_eq!(DocumentPath::new("dir/.hidden").unwrap().title(), ".hidden");
        assert_eq!(DocumentPath::new("notes/a.md").unwrap().file_name(), "a.md");
    }

    #[test]
    fn document_path_deserialize_validates() {
        let ok: DocumentPath = serde_json::from_str("\"notes/a.md\"").unwrap();
        assert_eq!(ok.as_str(), "notes/a.md");

        let err = serde_json::from_str::<DocumentPath>("\"../a.md\"");
        assert!(err.is_err());
    }

    #[test]
    fn ids_reject_blank() {
        assert!(PostId::new("").is_err());
        assert!(FeedId::new("   ").is_err());
        assert!(AccessToken::new("\t").is_err());
        assert_eq!(PostId::new("p1").unwrap().as_str(), "p1");
    }

    #[test]
    fn access_token_debug_is_redacted() {
        let token = AccessToken::new("super-secret").unwrap();
        let debug = format!("{:?}", token);
        assert!(debug.contains("REDACTED"), "got: {}", debug);
        assert!(!debug.contains("super-secret"));
        assert_eq!(token.expose(), "super-secret");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = PostId::new("p1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p1\"");
        let token = AccessToken::new("t1").unwrap();
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"t1\"");
    }
}
