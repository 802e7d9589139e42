use super::{ApiError, AppState};
use crate::archetype::{LayoutChoice, ThemeChoice};
use crate::error::DeckError;
use crate::generate::{generate, generate_slide_code, MAX_SLIDES};
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Deck size when the request does not name one.
pub const DEFAULT_SLIDES_COUNT: i64 = 14;

#[derive(Debug, Deserialize)]
pub struct GeneratePresentationRequest {
    pub topic: Option<String>,
    pub slides_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct FrontendCodeRequest {
    pub slide_content: Option<String>,
    pub layout: Option<String>,
    pub theme: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SlideView {
    pub slide_id: i64,
    pub content: String,
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PresentationView {
    pub presentation_id: i64,
    pub topic: String,
    pub slides: Vec<SlideView>,
}

/// GET / - welcome message
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Добро пожаловать в API генератора презентаций"
    }))
}

/// POST /generate_presentation - generate and store a deck
pub async fn generate_presentation(
    state: web::Data<AppState>,
    body: web::Json<GeneratePresentationRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let topic = body.topic.unwrap_or_default();
    if topic.trim().is_empty() {
        return Err(DeckError::InvalidInput { field: "topic" }.into());
    }
    let count = body.slides_count.unwrap_or(DEFAULT_SLIDES_COUNT);
    let count = match usize::try_from(count) {
        Ok(n) if (1..=MAX_SLIDES).contains(&n) => n,
        _ => return Err(DeckError::InvalidSlideCount { count }.into()),
    };

    let presentation = generate(&topic, count, &state.config).await?;
    let id = state.store.save(&presentation).await?;
    info!("Presentation {} stored ({} slides)", id, presentation.slides.len());

    Ok(HttpResponse::Created().json(serde_json::json!({
        "status": "success",
        "presentation_id": id,
        "message": "Презентация успешно сгенерирована"
    })))
}

/// GET /presentation/{id} - a stored deck, slides in order
pub async fn get_presentation(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let stored = state
        .store
        .load(id)
        .await?
        .ok_or(DeckError::PresentationNotFound { id })?;

    let view = PresentationView {
        presentation_id: stored.id,
        topic: stored.topic,
        slides: stored
            .slides
            .into_iter()
            .map(|s| SlideView {
                slide_id: s.slide_number,
                content: s.content,
                code: s.code,
            })
            .collect(),
    };
    Ok(HttpResponse::Ok().json(view))
}

/// POST /generate_frontend_code - component for one slide
pub async fn generate_frontend_code(
    state: web::Data<AppState>,
    body: web::Json<FrontendCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let content = body.slide_content.unwrap_or_default();
    let layout = LayoutChoice::parse(body.layout.as_deref().unwrap_or("auto"));
    let theme = ThemeChoice::parse(body.theme.as_deref().unwrap_or("auto"));

    let slide_code = generate_slide_code(&content, layout, theme, &state.config).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "code": slide_code.code,
        "source": slide_code.source,
        "layout": slide_code.style.layout,
        "theme": slide_code.style.theme,
    })))
}
