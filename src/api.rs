//! HTTP API endpoints.
//!
//! Besides the WebSocket, the front-end uses these for the session snapshot,
//! participant photos and the final results board.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::photo::{PhotoError, PhotoRef};
use crate::state::AppState;
use crate::types::SessionSnapshot;
use crate::ws;

/// Photo payload as produced by a browser canvas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoBody {
    pub photo: String,
}

/// Routes for the WebSocket and the JSON API. Body size on photo uploads is
/// capped at the configured photo limit.
pub fn routes(config: &AppConfig) -> Router<Arc<AppState>> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .route("/api/session", get(get_session))
        .route("/api/results", get(get_results))
        .route(
            "/api/photos/{name}",
            get(get_photo)
                .put(put_photo)
                .post(post_photo_data_url)
                .layer(DefaultBodyLimit::max(config.max_photo_bytes.saturating_mul(2))),
        )
}

/// Current session snapshot.
///
/// GET /api/session
pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    Json(state.snapshot().await)
}

/// Result cards for every category.
///
/// GET /api/results
///
/// 409 until the session has reached the results phase.
pub async fn get_results(State(state): State<Arc<AppState>>) -> Response {
    match state.results_board().await {
        Ok(cards) => Json(cards).into_response(),
        Err(e) => (StatusCode::CONFLICT, e.to_string()).into_response(),
    }
}

/// A participant's photo.
///
/// GET /api/photos/{name}
pub async fn get_photo(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> Response {
    match state.photos.get(&name).await {
        Some(photo) => Json(PhotoBody {
            photo: photo.as_str().to_string(),
        })
        .into_response(),
        None => (StatusCode::NOT_FOUND, "No photo for this participant").into_response(),
    }
}

/// Upload a participant's photo as raw image bytes.
///
/// PUT /api/photos/{name}
///
/// Content-Type must be image/jpeg or image/png.
pub async fn put_photo(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mime = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let photo = PhotoRef::from_bytes(mime, &body, state.config.max_photo_bytes);
    store_photo(&state, &name, photo).await
}

/// Upload a participant's photo as a `data:` URL.
///
/// POST /api/photos/{name}
pub async fn post_photo_data_url(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(body): Json<PhotoBody>,
) -> Response {
    let photo = PhotoRef::parse_data_url(&body.photo, state.config.max_photo_bytes);
    store_photo(&state, &name, photo).await
}

async fn store_photo(
    state: &AppState,
    name: &str,
    photo: Result<PhotoRef, PhotoError>,
) -> Response {
    // Held until the photo is stored so a reset cannot slip in between
    let session = state.session.read().await;
    if !session.participants().iter().any(|p| p == name) {
        return (StatusCode::NOT_FOUND, format!("Unknown participant: {}", name)).into_response();
    }

    match photo {
        Ok(photo) => {
            state.photos.put(name, photo).await;
            tracing::info!("Stored photo for {}", name);
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            tracing::warn!("Rejected photo for {}: {}", name, e);
            (photo_error_status(&e), e.to_string()).into_response()
        }
    }
}

fn photo_error_status(err: &PhotoError) -> StatusCode {
    match err {
        PhotoError::UnsupportedType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        PhotoError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        PhotoError::Empty | PhotoError::InvalidDataUrl(_) => StatusCode::BAD_REQUEST,
    }
}
