//! Postboard - a small post and reply board.
//!
//! Posts live in an in-memory store and can be answered with replies.
//! The board is served as HTML pages and as a JSON API.

pub mod config;
pub mod datetime;
pub mod error;
pub mod logging;
pub mod post;
pub mod web;

pub use config::Config;
pub use error::{PostboardError, Result};
pub use post::{
    seed_sample_posts, DeleteOutcome, DeletePolicy, NewPost, Post, PostDetail, PostId, PostStore,
    PostUpdate, PostWithReplies,
};
pub use web::WebServer;
