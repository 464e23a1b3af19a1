//! Shared application state for handlers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::post::PostStore;
use crate::web::render::Site;

/// Post store shared between handlers.
pub type SharedStore = Arc<RwLock<PostStore>>;

/// Application state.
pub struct AppState {
    /// Post store (wrapped in RwLock for concurrent readers).
    pub store: SharedStore,
    /// Site-wide rendering values.
    pub site: Site,
    /// Artificial delay before reads.
    pub read_latency: Duration,
    /// Artificial delay before writes.
    pub write_latency: Duration,
}

impl AppState {
    /// Create a new application state with default site settings and no latency.
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            site: Site::default(),
            read_latency: Duration::ZERO,
            write_latency: Duration::ZERO,
        }
    }

    /// Apply site and latency settings from the configuration.
    pub fn with_config(mut self, config: &Config) -> Self {
        self.site = Site::from_config(&config.board, &config.server);
        self.read_latency = Duration::from_millis(config.board.read_latency_ms);
        self.write_latency = Duration::from_millis(config.board.write_latency_ms);
        self
    }

    /// Sleep for the configured read latency.
    pub async fn simulate_read_latency(&self) {
        if !self.read_latency.is_zero() {
            tokio::time::sleep(self.read_latency).await;
        }
    }

    /// Sleep for the configured write latency.
    pub async fn simulate_write_latency(&self) {
        if !self.write_latency.is_zero() {
            tokio::time::sleep(self.write_latency).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_config() {
        let mut config = Config::default();
        config.board.name = "Test Board".to_string();
        config.board.read_latency_ms = 5;
        config.server.timezone = "Asia/Tokyo".to_string();

        let state = AppState::new(Arc::new(RwLock::new(PostStore::default()))).with_config(&config);
        assert_eq!(state.site.name, "Test Board");
        assert_eq!(state.site.timezone, "Asia/Tokyo");
        assert_eq!(state.read_latency, Duration::from_millis(5));
        assert!(state.write_latency.is_zero());
    }

    #[tokio::test]
    async fn test_simulated_latency_sleeps() {
        let mut state = AppState::new(Arc::new(RwLock::new(PostStore::default())));
        state.write_latency = Duration::from_millis(20);

        let start = tokio::time::Instant::now();
        state.simulate_write_latency().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
