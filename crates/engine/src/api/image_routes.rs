//! Image endpoints under `/api/images`.
//!
//! Callers identify themselves with an `X-User-Id` header carrying either a
//! canonical user id or an email; `/save` also accepts the identity in the
//! body. All DTOs are camelCase on the wire.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use atelier_domain::{Comment, ExploreSort, GeneratedImage, ImageId, ImageRecord, UserId, UserRef};

use crate::api::http::ApiError;
use crate::app::App;

const USER_ID_HEADER: &str = "x-user-id";

pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/api/images/generate", post(generate_image))
        .route("/api/images/upload", post(upload_image))
        .route("/api/images/save", post(save_image))
        .route("/api/images/user", get(list_user_images))
        .route("/api/images/explore", get(list_explore_images))
        .route("/api/images/like", post(like_image))
        .route("/api/images/unlike", post(unlike_image))
        .route("/api/images/liked", get(list_liked_images))
        .route("/api/images/{image_id}", get(get_image).delete(delete_image))
        .route(
            "/api/images/{image_id}/comments",
            get(list_comments).post(create_comment),
        )
}

/// Pull the caller's identity reference out of the `X-User-Id` header.
fn identity_from_headers(headers: &HeaderMap) -> Result<UserRef, ApiError> {
    let raw = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing X-User-Id header".to_string()))?;

    Ok(UserRef::parse(raw))
}

// ============================================================================
// Generation
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    prompt: String,
    #[serde(default)]
    refine_prompt: bool,
    #[serde(default)]
    skip_publish: bool,
}

async fn generate_image(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GeneratedImage>, ApiError> {
    // Generation requires an authenticated caller but records nothing for
    // them; saving is a separate call.
    identity_from_headers(&headers)?;

    let generated = app
        .use_cases
        .generation
        .generate
        .execute(&request.prompt, request.refine_prompt, request.skip_publish)
        .await?;

    Ok(Json(generated))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadRequest {
    image_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    published_url: String,
}

async fn upload_image(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
    Json(request): Json<UploadRequest>,
) -> Result<Json<UploadResponse>, ApiError> {
    identity_from_headers(&headers)?;

    let published_url = app
        .use_cases
        .generation
        .publish
        .execute(&request.image_url)
        .await?;

    Ok(Json(UploadResponse { published_url }))
}

// ============================================================================
// Gallery
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveRequest {
    image_url: String,
    prompt: String,
    refined_prompt: Option<String>,
    user_id: Option<String>,
}

async fn save_image(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
    Json(request): Json<SaveRequest>,
) -> Result<Json<ImageRecord>, ApiError> {
    // The header is the canonical identity source; the body field is kept
    // as a fallback for callers that cannot set headers.
    let user_ref = match identity_from_headers(&headers) {
        Ok(user_ref) => user_ref,
        Err(_) => request
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(UserRef::parse)
            .ok_or_else(|| ApiError::BadRequest("Missing user identity".to_string()))?,
    };

    let record = app
        .use_cases
        .gallery
        .save
        .execute(
            user_ref,
            &request.image_url,
            &request.prompt,
            request.refined_prompt,
        )
        .await?;

    Ok(Json(record))
}

async fn list_user_images(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
) -> Result<Json<Vec<ImageRecord>>, ApiError> {
    let user_ref = identity_from_headers(&headers)?;

    let records = app.use_cases.gallery.list_for_user.execute(user_ref).await?;
    Ok(Json(records))
}

#[derive(Debug, Deserialize)]
struct ExploreParams {
    #[serde(default = "default_explore_limit")]
    limit: i64,
    #[serde(default)]
    offset: i64,
    sort: Option<String>,
}

fn default_explore_limit() -> i64 {
    20
}

async fn list_explore_images(
    State(app): State<Arc<App>>,
    Query(params): Query<ExploreParams>,
) -> Result<Json<Vec<ImageRecord>>, ApiError> {
    let sort = ExploreSort::from_query(params.sort.as_deref());

    let records = app
        .use_cases
        .gallery
        .list_explore
        .execute(params.limit, params.offset, sort)
        .await?;

    Ok(Json(records))
}

async fn get_image(
    State(app): State<Arc<App>>,
    Path(image_id): Path<Uuid>,
) -> Result<Json<ImageRecord>, ApiError> {
    let record = app
        .use_cases
        .gallery
        .get
        .execute(ImageId::from_uuid(image_id))
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(record))
}

async fn delete_image(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
    Path(image_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user_ref = identity_from_headers(&headers)?;

    app.use_cases
        .gallery
        .delete
        .execute(ImageId::from_uuid(image_id), user_ref)
        .await?;

    Ok(Json(MessageResponse {
        message: "Image deleted successfully".to_string(),
    }))
}

// ============================================================================
// Likes
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LikeRequest {
    image_id: ImageId,
    user_id: String,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

async fn like_image(
    State(app): State<Arc<App>>,
    Json(request): Json<LikeRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    app.use_cases
        .engagement
        .like
        .execute(request.image_id, UserRef::parse(&request.user_id))
        .await?;

    Ok(Json(MessageResponse {
        message: "Image liked successfully".to_string(),
    }))
}

async fn unlike_image(
    State(app): State<Arc<App>>,
    Json(request): Json<LikeRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    app.use_cases
        .engagement
        .unlike
        .execute(request.image_id, UserRef::parse(&request.user_id))
        .await?;

    Ok(Json(MessageResponse {
        message: "Image unliked successfully".to_string(),
    }))
}

async fn list_liked_images(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
) -> Result<Json<Vec<ImageId>>, ApiError> {
    let user_ref = identity_from_headers(&headers)?;

    let ids = app.use_cases.engagement.list_liked.execute(user_ref).await?;
    Ok(Json(ids))
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Serialize)]
struct CommentsResponse {
    comments: Vec<Comment>,
}

async fn list_comments(
    State(app): State<Arc<App>>,
    Path(image_id): Path<Uuid>,
) -> Result<Json<CommentsResponse>, ApiError> {
    let comments = app
        .use_cases
        .comments
        .list
        .execute(ImageId::from_uuid(image_id))
        .await?;

    Ok(Json(CommentsResponse { comments }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCommentRequest {
    text: String,
    user_id: String,
    user_name: String,
}

async fn create_comment(
    State(app): State<Arc<App>>,
    Path(image_id): Path<Uuid>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<Json<Comment>, ApiError> {
    // Comments take the caller's id and display name as sent; there is no
    // identity resolution on this path.
    let comment = app
        .use_cases
        .comments
        .create
        .execute(
            ImageId::from_uuid(image_id),
            UserId::new(request.user_id),
            &request.user_name,
            &request.text,
        )
        .await?;

    Ok(Json(comment))
}
