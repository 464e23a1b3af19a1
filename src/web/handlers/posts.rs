//! Post handlers for the JSON API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::post::{PostId, PostUpdate};
use crate::web::dto::{
    ApiResponse, CreatePostRequest, DeleteResponse, PostDetailResponse, PostResponse,
    PostWithRepliesResponse, UpdatePostRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// GET /api/posts - List top-level posts with their replies.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<PostWithRepliesResponse>>>, ApiError> {
    state.simulate_read_latency().await;

    let entries = state.store.read().await.list();
    let responses: Vec<PostWithRepliesResponse> =
        entries.iter().map(PostWithRepliesResponse::from).collect();

    Ok(Json(ApiResponse::new(responses)))
}

/// POST /api/posts - Create a post or reply.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PostResponse>>), ApiError> {
    let new_post = req.into_new_post()?;
    state.simulate_write_latency().await;

    let post = state.store.write().await.create(&new_post).map_err(|e| {
        tracing::warn!(error = %e, "Failed to create post");
        ApiError::from(e)
    })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(PostResponse::from(&post))),
    ))
}

/// GET /api/posts/:id - Get a post with its parent and replies.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PostDetailResponse>>, ApiError> {
    let id: PostId = id.parse()?;
    state.simulate_read_latency().await;

    let detail = state.store.read().await.thread(id)?;

    Ok(Json(ApiResponse::new(PostDetailResponse::from(&detail))))
}

/// GET /api/posts/:id/replies - List direct replies to a post.
pub async fn list_replies(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<PostResponse>>>, ApiError> {
    let id: PostId = id.parse()?;
    state.simulate_read_latency().await;

    let replies = state.store.read().await.replies(id)?;

    Ok(Json(ApiResponse::new(
        replies.iter().map(PostResponse::from).collect(),
    )))
}

/// PATCH /api/posts/:id - Edit a post.
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<ApiResponse<PostResponse>>, ApiError> {
    let id: PostId = id.parse()?;
    let update = PostUpdate::from(req);
    state.simulate_write_latency().await;

    let post = state.store.write().await.update(id, &update)?;

    Ok(Json(ApiResponse::new(PostResponse::from(&post))))
}

/// DELETE /api/posts/:id - Delete a post.
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeleteResponse>>, ApiError> {
    let id: PostId = id.parse()?;
    state.simulate_write_latency().await;

    let outcome = state.store.write().await.delete(id)?;

    Ok(Json(ApiResponse::new(DeleteResponse::from(&outcome))))
}
