//! HTTP routes.

use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::app::App;
use crate::infrastructure::ports::RepoError;
use crate::use_cases::engagement::{LikeError, ListLikedError, UnlikeError};
use crate::use_cases::gallery::{DeleteError, ListUserImagesError, SaveError};
use crate::use_cases::generation::{GenerateError, PublishError};
use crate::use_cases::identity::ResolveError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .merge(super::image_routes::routes())
}

async fn health() -> &'static str {
    "OK"
}

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => {
                (axum::http::StatusCode::NOT_FOUND, "Not found").into_response()
            }
            ApiError::BadRequest(msg) => {
                (axum::http::StatusCode::BAD_REQUEST, msg).into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg).into_response()
            }
        }
    }
}

// Error taxonomy: lookup misses are 404, conflicts are 400, provider and
// store failures are 500 with the upstream message.

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        if e.is_not_found() {
            ApiError::NotFound
        } else {
            ApiError::Internal(e.to_string())
        }
    }
}

impl From<ResolveError> for ApiError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::UnknownEmail(_) => ApiError::NotFound,
            ResolveError::Repo(e) => e.into(),
        }
    }
}

impl From<GenerateError> for ApiError {
    fn from(e: GenerateError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<PublishError> for ApiError {
    fn from(e: PublishError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<SaveError> for ApiError {
    fn from(e: SaveError) -> Self {
        match e {
            SaveError::Resolve(e) => e.into(),
            SaveError::Repo(e) => e.into(),
        }
    }
}

impl From<ListUserImagesError> for ApiError {
    fn from(e: ListUserImagesError) -> Self {
        match e {
            ListUserImagesError::Resolve(e) => e.into(),
            ListUserImagesError::Repo(e) => e.into(),
        }
    }
}

impl From<DeleteError> for ApiError {
    fn from(e: DeleteError) -> Self {
        match e {
            DeleteError::Resolve(inner) => inner.into(),
            DeleteError::Repo(inner) => inner.into(),
            conflict => ApiError::BadRequest(conflict.to_string()),
        }
    }
}

impl From<LikeError> for ApiError {
    fn from(e: LikeError) -> Self {
        match e {
            LikeError::Resolve(inner) => inner.into(),
            LikeError::Repo(inner) => inner.into(),
            conflict => ApiError::BadRequest(conflict.to_string()),
        }
    }
}

impl From<UnlikeError> for ApiError {
    fn from(e: UnlikeError) -> Self {
        match e {
            UnlikeError::Resolve(inner) => inner.into(),
            UnlikeError::Repo(inner) => inner.into(),
            conflict => ApiError::BadRequest(conflict.to_string()),
        }
    }
}

impl From<ListLikedError> for ApiError {
    fn from(e: ListLikedError) -> Self {
        match e {
            ListLikedError::Resolve(e) => e.into(),
            ListLikedError::Repo(e) => e.into(),
        }
    }
}
