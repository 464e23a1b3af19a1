//! Response DTOs for the JSON API.

use serde::Serialize;

use crate::datetime::to_rfc3339;
use crate::post::{DeleteOutcome, Post, PostDetail, PostId, PostWithReplies};

// ============================================================================
// Generic Response Wrappers
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// Post DTOs
// ============================================================================

/// Post response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    /// Post ID.
    pub id: String,
    /// Display name of the author.
    pub poster_name: String,
    /// Post body.
    pub content: String,
    /// Parent post ID (absent for top-level posts).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
    /// Creation timestamp (RFC3339).
    pub created_at: String,
    /// Last update timestamp (RFC3339).
    pub updated_at: String,
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            poster_name: post.poster_name.clone(),
            content: post.content.clone(),
            reply_to_id: post.reply_to_id.map(|id| id.to_string()),
            created_at: to_rfc3339(&post.created_at),
            updated_at: to_rfc3339(&post.updated_at),
        }
    }
}

/// Top-level post with its direct replies (list entries).
#[derive(Debug, Serialize)]
pub struct PostWithRepliesResponse {
    /// The post.
    #[serde(flatten)]
    pub post: PostResponse,
    /// Direct replies in creation order.
    pub replies: Vec<PostResponse>,
}

impl From<&PostWithReplies> for PostWithRepliesResponse {
    fn from(entry: &PostWithReplies) -> Self {
        Self {
            post: PostResponse::from(&entry.post),
            replies: entry.replies.iter().map(PostResponse::from).collect(),
        }
    }
}

/// Single post with its parent and replies.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    /// The post.
    #[serde(flatten)]
    pub post: PostResponse,
    /// The post this one replies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<PostResponse>,
    /// Direct replies in creation order.
    pub replies: Vec<PostResponse>,
}

impl From<&PostDetail> for PostDetailResponse {
    fn from(detail: &PostDetail) -> Self {
        Self {
            post: PostResponse::from(&detail.post),
            reply_to: detail.parent.as_ref().map(PostResponse::from),
            replies: detail.replies.iter().map(PostResponse::from).collect(),
        }
    }
}

/// Delete result.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// IDs removed from the board.
    pub removed: Vec<String>,
    /// IDs of replies that became top-level posts.
    pub detached: Vec<String>,
}

impl From<&DeleteOutcome> for DeleteResponse {
    fn from(outcome: &DeleteOutcome) -> Self {
        let ids = |ids: &[PostId]| -> Vec<String> { ids.iter().map(|id| id.to_string()).collect() };
        Self {
            removed: ids(&outcome.removed),
            detached: ids(&outcome.detached),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn post(id: u64, reply_to: Option<u64>) -> Post {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        Post {
            id: PostId::new(id),
            poster_name: "John Doe".to_string(),
            content: "Hello".to_string(),
            reply_to_id: reply_to.map(PostId::new),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_post_response_shape() {
        let value = serde_json::to_value(PostResponse::from(&post(2, Some(1)))).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "2",
                "posterName": "John Doe",
                "content": "Hello",
                "replyToId": "1",
                "createdAt": "2024-01-15T10:30:00Z",
                "updatedAt": "2024-01-15T10:30:00Z"
            })
        );
    }

    #[test]
    fn test_top_level_post_omits_reply_to_id() {
        let value = serde_json::to_value(PostResponse::from(&post(1, None))).unwrap();
        assert!(value.get("replyToId").is_none());
    }

    #[test]
    fn test_post_with_replies_flattened() {
        let entry = PostWithReplies {
            post: post(1, None),
            replies: vec![post(2, Some(1))],
        };
        let value = serde_json::to_value(PostWithRepliesResponse::from(&entry)).unwrap();
        assert_eq!(value["id"], "1");
        assert_eq!(value["replies"][0]["replyToId"], "1");
    }

    #[test]
    fn test_delete_response() {
        let outcome = DeleteOutcome {
            removed: vec![PostId::new(1), PostId::new(2)],
            detached: vec![],
        };
        let value = serde_json::to_value(DeleteResponse::from(&outcome)).unwrap();
        assert_eq!(value, json!({"removed": ["1", "2"], "detached": []}));
    }
}
