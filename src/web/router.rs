//! Router configuration for the board pages and the JSON API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_post, delete_post, edit_page, get_post, list_page, list_posts, list_replies,
    new_post_page, not_found_page, post_page, reply_page, submit_delete, submit_edit,
    submit_new_post, submit_reply, update_post, AppState,
};
use super::middleware::{create_cors_layer, security_headers};

/// Create the main router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    // HTML pages
    let page_routes = Router::new()
        .route("/", get(list_page))
        .route("/posts", post(submit_new_post))
        .route("/posts/new", get(new_post_page))
        .route("/posts/:id", get(post_page))
        .route("/posts/:id/reply", get(reply_page).post(submit_reply))
        .route("/posts/:id/edit", get(edit_page).post(submit_edit))
        .route("/posts/:id/delete", post(submit_delete));

    // JSON API
    let api_routes = Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/:id",
            get(get_post).patch(update_post).delete(delete_post),
        )
        .route("/posts/:id/replies", get(list_replies))
        .layer(create_cors_layer(cors_origins));

    Router::new()
        .merge(page_routes)
        .nest("/api", api_routes)
        .fallback(not_found_page)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(security_headers)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::{NewPost, PostStore};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tokio::sync::RwLock;
    use tower::util::ServiceExt;

    fn test_router() -> Router {
        let mut store = PostStore::default();
        store.create(&NewPost::new("Alice", "Hello")).unwrap();
        let state = AppState::new(Arc::new(RwLock::new(store)));
        create_router(Arc::new(state), &[])
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_router() {
        let response = create_health_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "OK");
    }

    #[tokio::test]
    async fn test_new_post_route_wins_over_id() {
        let response = test_router()
            .oneshot(Request::builder().uri("/posts/new").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains(r#"action="/posts""#));
    }

    #[tokio::test]
    async fn test_unknown_path_renders_not_found() {
        let response = test_router()
            .oneshot(Request::builder().uri("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get("X-Frame-Options").is_some());
    }

    #[tokio::test]
    async fn test_api_route_is_json() {
        let response = test_router()
            .oneshot(Request::builder().uri("/api/posts").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
        assert_eq!(content_type, "application/json");
    }
}
