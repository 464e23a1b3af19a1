//! HTML page handlers.
//!
//! Forms post back to the server and are answered with a redirect
//! (post/redirect/get). A post that does not exist sends the browser back
//! to the list.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::sync::Arc;
use validator::Validate;

use crate::post::{Post, PostId};
use crate::web::dto::{validation_messages, NoticeQuery, PostForm};
use crate::web::handlers::AppState;
use crate::web::render::{self, FormKind, FormState, Notice, Site};
use crate::{PostboardError, Result};

/// Look up a post by its path segment.
async fn find_post(state: &AppState, id: &str) -> Result<Post> {
    let id: PostId = id.parse()?;
    state.store.read().await.get(id).cloned()
}

/// Turn a store error into a page response.
fn page_error(site: &Site, err: PostboardError) -> Response {
    match err {
        PostboardError::NotFound(what) => {
            tracing::debug!("{} not found, redirecting to list", what);
            Redirect::to("/").into_response()
        }
        other => {
            tracing::error!("Page request failed: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render::layout(
                    site,
                    "Error",
                    r#"<div class="alert alert-danger"><h4>Error</h4><p>Something went wrong.</p></div>"#,
                )),
            )
                .into_response()
        }
    }
}

/// Re-render a form with the submitted values and messages.
fn form_error(site: &Site, kind: FormKind<'_>, form: &PostForm, errors: Vec<String>) -> Response {
    let state = FormState {
        poster_name: form.poster_name.clone(),
        content: form.content.clone(),
        errors,
    };
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(render::post_form(site, kind, &state)),
    )
        .into_response()
}

/// Redirect target showing a confirmation.
fn notice_redirect(path: &str, notice: Notice) -> Response {
    Redirect::to(&format!("{}?notice={}", path, notice.as_str())).into_response()
}

/// GET / - Post list.
pub async fn list_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NoticeQuery>,
) -> Html<String> {
    state.simulate_read_latency().await;
    let entries = state.store.read().await.list();
    Html(render::post_list(&state.site, &entries, query.notice()))
}

/// GET /posts/new - New post form.
pub async fn new_post_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render::post_form(
        &state.site,
        FormKind::New,
        &FormState::default(),
    ))
}

/// POST /posts - Create a top-level post.
pub async fn submit_new_post(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PostForm>,
) -> Response {
    if let Err(errors) = form.validate() {
        return form_error(&state.site, FormKind::New, &form, validation_messages(&errors));
    }

    state.simulate_write_latency().await;
    let result = state.store.write().await.create(&form.to_new_post(None));

    match result {
        Ok(_) => notice_redirect("/", Notice::Created),
        Err(PostboardError::Validation(msg)) => {
            form_error(&state.site, FormKind::New, &form, vec![msg])
        }
        Err(e) => page_error(&state.site, e),
    }
}

/// GET /posts/:id - Post detail.
pub async fn post_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<NoticeQuery>,
) -> Response {
    state.simulate_read_latency().await;

    let detail = match id.parse::<PostId>() {
        Ok(id) => state.store.read().await.thread(id),
        Err(e) => Err(e),
    };

    match detail {
        Ok(detail) => {
            Html(render::post_detail(&state.site, &detail, query.notice())).into_response()
        }
        Err(e) => page_error(&state.site, e),
    }
}

/// GET /posts/:id/reply - Reply form.
pub async fn reply_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match find_post(&state, &id).await {
        Ok(parent) => Html(render::post_form(
            &state.site,
            FormKind::Reply(&parent),
            &FormState::default(),
        ))
        .into_response(),
        Err(e) => page_error(&state.site, e),
    }
}

/// POST /posts/:id/reply - Create a reply.
pub async fn submit_reply(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<PostForm>,
) -> Response {
    let parent = match find_post(&state, &id).await {
        Ok(parent) => parent,
        Err(e) => return page_error(&state.site, e),
    };

    if let Err(errors) = form.validate() {
        return form_error(
            &state.site,
            FormKind::Reply(&parent),
            &form,
            validation_messages(&errors),
        );
    }

    state.simulate_write_latency().await;
    let result = state
        .store
        .write()
        .await
        .create(&form.to_new_post(Some(parent.id)));

    match result {
        Ok(_) => notice_redirect(&format!("/posts/{}", parent.id), Notice::Replied),
        Err(PostboardError::Validation(msg)) => {
            form_error(&state.site, FormKind::Reply(&parent), &form, vec![msg])
        }
        Err(e) => page_error(&state.site, e),
    }
}

/// GET /posts/:id/edit - Edit form.
pub async fn edit_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match find_post(&state, &id).await {
        Ok(post) => {
            let form = FormState {
                poster_name: post.poster_name.clone(),
                content: post.content.clone(),
                errors: Vec::new(),
            };
            Html(render::post_form(&state.site, FormKind::Edit(&post), &form)).into_response()
        }
        Err(e) => page_error(&state.site, e),
    }
}

/// POST /posts/:id/edit - Save an edit.
pub async fn submit_edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<PostForm>,
) -> Response {
    let post = match find_post(&state, &id).await {
        Ok(post) => post,
        Err(e) => return page_error(&state.site, e),
    };

    if let Err(errors) = form.validate() {
        return form_error(
            &state.site,
            FormKind::Edit(&post),
            &form,
            validation_messages(&errors),
        );
    }

    state.simulate_write_latency().await;
    let result = state.store.write().await.update(post.id, &form.to_update());

    match result {
        Ok(updated) => notice_redirect(&format!("/posts/{}", updated.id), Notice::Updated),
        Err(PostboardError::Validation(msg)) => {
            form_error(&state.site, FormKind::Edit(&post), &form, vec![msg])
        }
        Err(e) => page_error(&state.site, e),
    }
}

/// POST /posts/:id/delete - Delete a post.
pub async fn submit_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    state.simulate_write_latency().await;

    let result = match id.parse::<PostId>() {
        Ok(id) => state.store.write().await.delete(id),
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => notice_redirect("/", Notice::Deleted),
        Err(e) => page_error(&state.site, e),
    }
}

/// Fallback for unknown paths.
pub async fn not_found_page(State(state): State<Arc<AppState>>) -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(render::not_found(&state.site)))
}
