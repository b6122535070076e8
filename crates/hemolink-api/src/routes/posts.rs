//! Routes for the Content bounded context.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hemolink_content::application::command_handlers::{
    handle_archive_post, handle_draft_post, handle_publish_post,
};
use hemolink_content::application::query_handlers::{PostView, get_post_by_id, get_post_by_slug};
use hemolink_content::domain::commands::{ArchivePost, DraftPost, PublishPost};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
struct DraftPostBody {
    author_id: i64,
    title: String,
    slug: String,
    body: String,
}

#[derive(Serialize)]
struct PostCommandResponse {
    post_id: i64,
    status: &'static str,
    events_published: usize,
}

/// POST /api/v1/posts
async fn draft_post(
    State(state): State<AppState>,
    Json(body): Json<DraftPostBody>,
) -> Result<(StatusCode, Json<PostCommandResponse>), ApiError> {
    let command = DraftPost {
        correlation_id: Uuid::new_v4(),
        author_id: body.author_id,
        title: body.title,
        slug: body.slug,
        body: body.body,
    };
    let result = handle_draft_post(
        &command,
        state.posts.as_ref(),
        state.publisher.as_ref(),
        state.clock.as_ref(),
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(PostCommandResponse {
            post_id: result.post_id,
            status: result.status.as_str(),
            events_published: result.events_published,
        }),
    ))
}

/// POST /api/v1/posts/{id}/publish
async fn publish_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<PostCommandResponse>, ApiError> {
    let command = PublishPost {
        correlation_id: Uuid::new_v4(),
        post_id,
    };
    let result = handle_publish_post(
        &command,
        state.posts.as_ref(),
        state.publisher.as_ref(),
        state.clock.as_ref(),
    )
    .await?;
    Ok(Json(PostCommandResponse {
        post_id: result.post_id,
        status: result.status.as_str(),
        events_published: result.events_published,
    }))
}

/// POST /api/v1/posts/{id}/archive
async fn archive_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<PostCommandResponse>, ApiError> {
    let command = ArchivePost {
        correlation_id: Uuid::new_v4(),
        post_id,
    };
    let result = handle_archive_post(
        &command,
        state.posts.as_ref(),
        state.publisher.as_ref(),
        state.clock.as_ref(),
    )
    .await?;
    Ok(Json(PostCommandResponse {
        post_id: result.post_id,
        status: result.status.as_str(),
        events_published: result.events_published,
    }))
}

/// GET /api/v1/posts/{id}
async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<PostView>, ApiError> {
    let view = get_post_by_id(post_id, state.posts.as_ref()).await?;
    Ok(Json(view))
}

/// GET /api/v1/posts/by-slug/{slug}
async fn get_post_by_slug_route(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PostView>, ApiError> {
    let view = get_post_by_slug(&slug, state.posts.as_ref()).await?;
    Ok(Json(view))
}

/// Returns the router for the content context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(draft_post))
        .route("/{id}", get(get_post))
        .route("/{id}/publish", post(publish_post))
        .route("/{id}/archive", post(archive_post))
        .route("/by-slug/{slug}", get(get_post_by_slug_route))
}
