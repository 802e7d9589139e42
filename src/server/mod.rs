//! HTTP API over actix-web (feature `server`).
//!
//! | Method | Path                      | Handler |
//! |--------|---------------------------|---------|
//! | GET    | `/`                       | [`handlers::index`] |
//! | POST   | `/generate_presentation`  | [`handlers::generate_presentation`] |
//! | GET    | `/presentation/{id}`      | [`handlers::get_presentation`] |
//! | POST   | `/generate_frontend_code` | [`handlers::generate_frontend_code`] |
//!
//! Mount with [`configure`] so the binary and the integration tests build
//! exactly the same routes. Wrap the app in [`cors`] so a browser front-end
//! on another origin can call it.

pub mod handlers;

use crate::config::GenerationConfig;
use crate::error::DeckError;
use crate::store::PresentationStore;
use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use std::fmt;
use std::sync::Arc;

/// Shared state for every worker.
pub struct AppState {
    pub store: Arc<dyn PresentationStore>,
    pub config: GenerationConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn PresentationStore>, config: GenerationConfig) -> Self {
        Self { store, config }
    }
}

/// Register all routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route(
            "/generate_presentation",
            web::post().to(handlers::generate_presentation),
        )
        .route("/presentation/{id}", web::get().to(handlers::get_presentation))
        .route(
            "/generate_frontend_code",
            web::post().to(handlers::generate_frontend_code),
        );
}

/// CORS policy for the API.
///
/// With no origins listed (or a `*` among them) every origin is allowed;
/// otherwise only the listed ones are, with any method and header.
pub fn cors(allowed_origins: &[String]) -> Cors {
    let origins: Vec<&str> = allowed_origins
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .collect();
    if origins.is_empty() || origins.contains(&"*") {
        return Cors::permissive();
    }
    origins
        .into_iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

// ── Errors ───────────────────────────────────────────────────────────────────

/// An error response: status code plus a `{"detail": …}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.detail)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        if self.status.is_server_error() {
            tracing::error!("{self}");
        }
        HttpResponse::build(self.status).json(serde_json::json!({ "detail": self.detail }))
    }
}

impl From<DeckError> for ApiError {
    fn from(e: DeckError) -> Self {
        match e {
            DeckError::InvalidInput { field: "topic" } => {
                ApiError::new(StatusCode::BAD_REQUEST, "Необходимо указать тему")
            }
            DeckError::InvalidInput {
                field: "slide_content",
            } => ApiError::new(
                StatusCode::BAD_REQUEST,
                "Необходимо указать содержимое слайда",
            ),
            DeckError::InvalidInput { .. } | DeckError::InvalidSlideCount { .. } => {
                ApiError::new(StatusCode::BAD_REQUEST, e.to_string())
            }
            DeckError::PresentationNotFound { .. } => {
                ApiError::new(StatusCode::NOT_FOUND, "Презентация не найдена")
            }
            other => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Ошибка при генерации презентации: {other}"),
            ),
        }
    }
}
