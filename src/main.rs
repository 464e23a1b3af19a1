use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info};

use postboard::{seed_sample_posts, Config, PostStore, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration (defaults when config.toml does not exist)
    let config = match Config::load_or_default("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            std::process::exit(1);
        }
    };

    // Initialize logging
    if let Err(e) = postboard::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        postboard::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    info!("{} - {}", config.board.name, config.board.description);

    let mut store = PostStore::new(config.board.delete_policy);
    if config.board.seed_sample_posts {
        match seed_sample_posts(&mut store) {
            Ok(count) => info!("Seeded {} sample posts", count),
            Err(e) => error!("Failed to seed sample posts: {}", e),
        }
    }
    info!("Delete policy: {}", store.delete_policy());

    let server = match WebServer::new(&config, Arc::new(RwLock::new(store))) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to create web server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        error!("Web server stopped: {}", e);
        std::process::exit(1);
    }
}
