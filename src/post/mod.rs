//! Post module for Postboard.
//!
//! This module provides the post/reply data model:
//! - Post, new-post and update types
//! - The in-memory store with create, read, list, update and delete
//! - Derived reply threads and the delete policy for replies
//! - The sample conversation loaded at start-up

mod seed;
mod store;
mod types;

pub use seed::seed_sample_posts;
pub use store::PostStore;
pub use types::{
    validate_content, validate_poster_name, DeleteOutcome, DeletePolicy, NewPost, Post,
    PostDetail, PostId, PostUpdate, PostWithReplies, MAX_POSTER_NAME_LENGTH,
};
