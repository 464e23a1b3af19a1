//! HTTP handlers for the board pages and the JSON API.

pub mod pages;
pub mod posts;
mod state;

pub use pages::*;
pub use posts::*;
pub use state::{AppState, SharedStore};
