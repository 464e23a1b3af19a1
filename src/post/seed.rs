//! Sample conversation loaded into a fresh board.

use super::store::PostStore;
use super::types::{NewPost, PostId};
use crate::datetime::parse_rfc3339;
use crate::{PostboardError, Result};

/// A row of the sample conversation.
struct SamplePost {
    poster_name: &'static str,
    content: &'static str,
    /// 1-based row of the parent post.
    reply_to: Option<u64>,
    created_at: &'static str,
}

const SAMPLE_POSTS: &[SamplePost] = &[
    SamplePost {
        poster_name: "John Doe",
        content: "This is my first post! Welcome to our platform.",
        reply_to: None,
        created_at: "2024-01-15T10:30:00Z",
    },
    SamplePost {
        poster_name: "Jane Smith",
        content: "Welcome! Great to have you here.",
        reply_to: Some(1),
        created_at: "2024-01-15T11:00:00Z",
    },
    SamplePost {
        poster_name: "Alice Johnson",
        content: "Just finished reading an amazing book about React development. \
                  Highly recommend it to anyone learning frontend!",
        reply_to: None,
        created_at: "2024-01-16T14:20:00Z",
    },
    SamplePost {
        poster_name: "Bob Wilson",
        content: "Having trouble with TypeScript generics. Any good resources to share?",
        reply_to: None,
        created_at: "2024-01-17T09:15:00Z",
    },
    SamplePost {
        poster_name: "Carol Brown",
        content: "Check out the official TypeScript handbook. It has great examples!",
        reply_to: Some(4),
        created_at: "2024-01-17T10:30:00Z",
    },
];

/// Load the sample conversation into an empty store.
///
/// Returns the number of posts inserted.
pub fn seed_sample_posts(store: &mut PostStore) -> Result<usize> {
    if !store.is_empty() {
        return Err(PostboardError::Validation(
            "sample posts can only be loaded into an empty store".to_string(),
        ));
    }

    let mut rows = Vec::with_capacity(SAMPLE_POSTS.len());
    for sample in SAMPLE_POSTS {
        let created_at = parse_rfc3339(sample.created_at).ok_or_else(|| {
            PostboardError::Validation(format!("bad sample timestamp: {}", sample.created_at))
        })?;
        rows.push((sample, created_at));
    }

    // Row numbers map to whatever ids the store hands out.
    let mut ids: Vec<PostId> = Vec::with_capacity(rows.len());
    for (sample, created_at) in rows {
        let mut new_post = NewPost::new(sample.poster_name, sample.content);
        if let Some(row) = sample.reply_to {
            let parent = row
                .checked_sub(1)
                .and_then(|index| ids.get(index as usize))
                .copied()
                .ok_or_else(|| PostboardError::NotFound(format!("sample row {row}")))?;
            new_post = new_post.reply_to(parent);
        }
        ids.push(store.insert_at(&new_post, created_at)?.id);
    }

    tracing::debug!(count = SAMPLE_POSTS.len(), "Loaded sample posts");
    Ok(SAMPLE_POSTS.len())
}
