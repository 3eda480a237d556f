use crate::{
    models::comment::{CreateCommentRequest, UpdateCommentRequest},
    services::auth::CurrentUser,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::Result;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/:id",
            post(create_comment)
                .get(get_comment)
                .put(update_comment)
                .delete(delete_comment),
        )
        .route("/:id/children", get(list_children))
        .route("/:id/vote", post(vote_comment))
        .route("/:id/report", post(report_comment))
}

#[derive(Debug, Deserialize)]
struct ListChildrenQuery {
    /// "true" marks the node as a comment; anything else means post.
    comment: Option<String>,
}

/// POST /:id — comment on the post `:id`, or reply to the comment `:id`
/// when the body carries `reply: true`.
async fn create_comment(
    State(state): State<Arc<AppState>>,
    CurrentUser(username): CurrentUser,
    Path(target_id): Path<String>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<Json<Value>> {
    let comment = state
        .comment_service
        .create_comment(&username, &target_id, request)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": { "id": comment.id }
    })))
}

async fn get_comment(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<String>,
) -> Result<Json<Value>> {
    let comment = state.comment_service.get_comment(&comment_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": comment
    })))
}

async fn list_children(
    State(state): State<Arc<AppState>>,
    Path(node_id): Path<String>,
    Query(query): Query<ListChildrenQuery>,
) -> Result<Json<Value>> {
    let node_is_comment = query.comment.as_deref() == Some("true");
    let comments = state
        .comment_service
        .get_children(&node_id, node_is_comment)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": comments
    })))
}

async fn update_comment(
    State(state): State<Arc<AppState>>,
    CurrentUser(username): CurrentUser,
    Path(comment_id): Path<String>,
    Json(request): Json<UpdateCommentRequest>,
) -> Result<Json<Value>> {
    state
        .comment_service
        .update_comment(&comment_id, &username, request)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Update successful"
    })))
}

async fn delete_comment(
    State(state): State<Arc<AppState>>,
    CurrentUser(username): CurrentUser,
    Path(comment_id): Path<String>,
) -> Result<Json<Value>> {
    state
        .comment_service
        .delete_comment(&comment_id, &username)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Delete successful"
    })))
}

async fn vote_comment(
    State(state): State<Arc<AppState>>,
    CurrentUser(username): CurrentUser,
    Path(comment_id): Path<String>,
) -> Result<Json<Value>> {
    state
        .comment_service
        .vote_comment(&comment_id, &username)
        .await?;

    Ok(Json(json!({ "success": true })))
}

async fn report_comment(
    State(state): State<Arc<AppState>>,
    CurrentUser(username): CurrentUser,
    Path(comment_id): Path<String>,
) -> Result<Json<Value>> {
    state
        .comment_service
        .report_comment(&comment_id, &username)
        .await?;

    Ok(Json(json!({ "success": true })))
}
