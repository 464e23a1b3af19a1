//! Post model for Postboard.
//!
//! A post is either top-level or a reply to another post. Replies are not
//! stored on the parent; they are derived by looking up posts whose
//! `reply_to_id` points at it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer};

use crate::{PostboardError, Result};

/// Maximum length of a poster name, in characters.
pub const MAX_POSTER_NAME_LENGTH: usize = 100;

/// Post identifier.
///
/// Rendered as a decimal string in URLs and JSON. Identifiers are handed out
/// by the store in increasing order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostId(u64);

impl PostId {
    /// Wrap a raw identifier value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostId {
    type Err = PostboardError;

    /// Only ASCII digits without leading zeros are accepted, so every post
    /// has exactly one spelling. A malformed id cannot name an existing post and is reported
    /// as not found.
    fn from_str(s: &str) -> Result<Self> {
        let not_found = || PostboardError::NotFound(format!("post {s}"));
        let digits_only = !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !digits_only || (s.len() > 1 && s.starts_with('0')) {
            return Err(not_found());
        }
        s.parse::<u64>().map(PostId).map_err(|_| not_found())
    }
}

/// Post entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Unique post ID.
    pub id: PostId,
    /// Display name of the author.
    pub poster_name: String,
    /// Post body.
    pub content: String,
    /// Post this one replies to (None for top-level posts).
    pub reply_to_id: Option<PostId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp. Never earlier than `created_at`.
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Check if this post is a top-level post.
    pub fn is_top_level(&self) -> bool {
        self.reply_to_id.is_none()
    }

    /// Check if this post was edited after creation.
    pub fn is_edited(&self) -> bool {
        self.updated_at > self.created_at
    }
}

/// Data for creating a new post or reply.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Display name of the author.
    pub poster_name: String,
    /// Post body.
    pub content: String,
    /// Parent post, for replies.
    pub reply_to_id: Option<PostId>,
}

impl NewPost {
    /// Create a new top-level post.
    pub fn new(poster_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            poster_name: poster_name.into(),
            content: content.into(),
            reply_to_id: None,
        }
    }

    /// Turn this post into a reply to `parent`.
    pub fn reply_to(mut self, parent: PostId) -> Self {
        self.reply_to_id = Some(parent);
        self
    }
}

/// Data for editing an existing post.
///
/// The parent reference cannot be changed, which keeps reply chains acyclic.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    /// New poster name.
    pub poster_name: Option<String>,
    /// New content.
    pub content: Option<String>,
}

impl PostUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new poster name.
    pub fn poster_name(mut self, poster_name: impl Into<String>) -> Self {
        self.poster_name = Some(poster_name.into());
        self
    }

    /// Set new content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.poster_name.is_none() && self.content.is_none()
    }
}

/// A top-level post together with its direct replies, as shown in the list.
#[derive(Debug, Clone)]
pub struct PostWithReplies {
    /// The top-level post.
    pub post: Post,
    /// Direct replies in creation order.
    pub replies: Vec<Post>,
}

/// A single post with its surroundings, as shown on the detail page.
#[derive(Debug, Clone)]
pub struct PostDetail {
    /// The post itself.
    pub post: Post,
    /// The post it replies to, if any.
    pub parent: Option<Post>,
    /// Direct replies in creation order.
    pub replies: Vec<Post>,
}

/// What happens to replies when their parent is deleted.
///
/// Parsed case-insensitively, both from strings and from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Delete the whole reply subtree along with the post.
    #[default]
    Cascade,
    /// Keep direct replies and turn them into top-level posts.
    Orphan,
}

impl DeletePolicy {
    /// Configuration string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeletePolicy::Cascade => "cascade",
            DeletePolicy::Orphan => "orphan",
        }
    }
}

impl fmt::Display for DeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cascade" => Ok(DeletePolicy::Cascade),
            "orphan" => Ok(DeletePolicy::Orphan),
            _ => Err(format!("unknown delete policy: {s}")),
        }
    }
}

impl<'de> Deserialize<'de> for DeletePolicy {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}

/// Result of a delete operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Posts removed from the store, the requested post first.
    pub removed: Vec<PostId>,
    /// Replies that were detached and became top-level posts.
    pub detached: Vec<PostId>,
}

/// Trim and check a poster name.
pub fn validate_poster_name(poster_name: &str) -> Result<String> {
    let trimmed = poster_name.trim();
    if trimmed.is_empty() {
        return Err(PostboardError::Validation(
            "poster name must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_POSTER_NAME_LENGTH {
        return Err(PostboardError::Validation(format!(
            "poster name must be at most {MAX_POSTER_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim and check post content.
pub fn validate_content(content: &str) -> Result<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(PostboardError::Validation(
            "content must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post(reply_to_id: Option<PostId>) -> Post {
        let now = Utc::now();
        Post {
            id: PostId::new(1),
            poster_name: "John Doe".to_string(),
            content: "Hello".to_string(),
            reply_to_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_post_id_parse() {
        assert_eq!("42".parse::<PostId>().unwrap(), PostId::new(42));
        assert_eq!(PostId::new(7).to_string(), "7");
    }

    #[test]
    fn test_post_id_parse_invalid_is_not_found() {
        let err = "abc".parse::<PostId>().unwrap_err();
        assert!(matches!(err, PostboardError::NotFound(_)));
        assert!("-1".parse::<PostId>().is_err());
        assert!("".parse::<PostId>().is_err());
        assert!("99999999999999999999".parse::<PostId>().is_err());
    }

    #[test]
    fn test_post_id_parse_rejects_aliases() {
        assert!(matches!(
            "+1".parse::<PostId>(),
            Err(PostboardError::NotFound(_))
        ));
        assert!(" 1".parse::<PostId>().is_err());
        assert!("1 ".parse::<PostId>().is_err());
        assert!("１".parse::<PostId>().is_err());
        assert!("01".parse::<PostId>().is_err());
        assert_eq!("0".parse::<PostId>().unwrap(), PostId::new(0));
    }

    #[test]
    fn test_post_is_top_level() {
        let post = sample_post(Some(PostId::new(3)));
        assert!(!post.is_top_level());

        let post = sample_post(None);
        assert!(post.is_top_level());
        assert!(!post.is_edited());
    }

    #[test]
    fn test_new_post_reply_to() {
        let post = NewPost::new("Jane", "Welcome!").reply_to(PostId::new(1));
        assert_eq!(post.poster_name, "Jane");
        assert_eq!(post.content, "Welcome!");
        assert_eq!(post.reply_to_id, Some(PostId::new(1)));
    }

    #[test]
    fn test_post_update_builder() {
        assert!(PostUpdate::new().is_empty());

        let update = PostUpdate::new().content("Edited");
        assert_eq!(update.content.as_deref(), Some("Edited"));
        assert!(update.poster_name.is_none());
        assert!(!update.is_empty());
    }

    #[test]
    fn test_delete_policy_from_str() {
        assert_eq!("cascade".parse::<DeletePolicy>(), Ok(DeletePolicy::Cascade));
        assert_eq!("ORPHAN".parse::<DeletePolicy>(), Ok(DeletePolicy::Orphan));
        assert!("purge".parse::<DeletePolicy>().is_err());
        assert_eq!(DeletePolicy::default(), DeletePolicy::Cascade);
        assert_eq!(DeletePolicy::Orphan.to_string(), "orphan");
    }

    #[test]
    fn test_validate_poster_name() {
        assert_eq!(validate_poster_name("  Alice  ").unwrap(), "Alice");
        assert!(validate_poster_name("").is_err());
        assert!(validate_poster_name(" \t ").is_err());

        let max = "a".repeat(MAX_POSTER_NAME_LENGTH);
        assert!(validate_poster_name(&max).is_ok());
        let too_long = "a".repeat(MAX_POSTER_NAME_LENGTH + 1);
        assert!(validate_poster_name(&too_long).is_err());
    }

    #[test]
    fn test_validate_poster_name_counts_characters() {
        let name = "あ".repeat(MAX_POSTER_NAME_LENGTH);
        assert!(validate_poster_name(&name).is_ok());
    }

    #[test]
    fn test_validate_content() {
        assert_eq!(validate_content("\n Hi there \n").unwrap(), "Hi there");
        assert!(matches!(
            validate_content("   "),
            Err(PostboardError::Validation(_))
        ));
    }
}
