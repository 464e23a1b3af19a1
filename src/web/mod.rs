//! Web interface for the post board.
//!
//! Serves server-rendered HTML pages for browsers and a small JSON API
//! over the same post store.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod render;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::{AppState, SharedStore};
pub use router::create_router;
pub use server::WebServer;
