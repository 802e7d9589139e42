//! HTTP routes against an in-memory store and an offline generator.

#![cfg(feature = "server")]

use actix_web::http::{header, Method};
use actix_web::{test, web, App};
use edgequake_deck::server::handlers::PresentationView;
use edgequake_deck::server::{self, AppState};
use edgequake_deck::{GenerationConfig, MemoryStore, PresentationStore, MAX_SLIDES};
use serde_json::{json, Value};
use std::sync::Arc;

fn state(store: Arc<MemoryStore>) -> web::Data<AppState> {
    let config = GenerationConfig::builder()
        .offline(true)
        .seed(5)
        .build()
        .unwrap();
    web::Data::new(AppState::new(store as Arc<dyn PresentationStore>, config))
}

macro_rules! app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .app_data(state($store))
                .configure(server::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn index_greets() {
    let app = app!(Arc::new(MemoryStore::new()));
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("API"));
}

#[actix_web::test]
async fn create_then_fetch_presentation() {
    let store = Arc::new(MemoryStore::new());
    let app = app!(store.clone());

    let req = test::TestRequest::post()
        .uri("/generate_presentation")
        .set_json(json!({ "topic": "Black holes", "slides_count": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Презентация успешно сгенерирована");
    let id = body["presentation_id"].as_i64().unwrap();
    assert_eq!(store.len().await, 1);

    let req = test::TestRequest::get()
        .uri(&format!("/presentation/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let view: PresentationView = test::read_body_json(resp).await;
    assert_eq!(view.presentation_id, id);
    assert_eq!(view.topic, "Black holes");
    let ids: Vec<i64> = view.slides.iter().map(|s| s.slide_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    for slide in &view.slides {
        assert!(!slide.content.is_empty());
        assert!(slide.code.contains("export default"));
    }
}

#[actix_web::test]
async fn slides_count_defaults_to_fourteen() {
    let store = Arc::new(MemoryStore::new());
    let app = app!(store.clone());

    let req = test::TestRequest::post()
        .uri("/generate_presentation")
        .set_json(json!({ "topic": "Defaults" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = test::read_body_json(resp).await;
    let id = body["presentation_id"].as_i64().unwrap();

    let stored = store.load(id).await.unwrap().unwrap();
    assert_eq!(stored.slide_count, 14);
    assert_eq!(stored.slides.len(), 14);
}

#[actix_web::test]
async fn missing_topic_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let app = app!(store.clone());

    for body in [json!({}), json!({ "topic": "   " })] {
        let req = test::TestRequest::post()
            .uri("/generate_presentation")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Необходимо указать тему");
    }
    assert!(store.is_empty().await);
}

#[actix_web::test]
async fn non_positive_slide_count_is_rejected() {
    let app = app!(Arc::new(MemoryStore::new()));
    let req = test::TestRequest::post()
        .uri("/generate_presentation")
        .set_json(json!({ "topic": "Zero", "slides_count": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn oversized_slide_count_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let app = app!(store.clone());

    for count in [MAX_SLIDES as i64 + 1, 1i64 << 40, i64::MAX] {
        let req = test::TestRequest::post()
            .uri("/generate_presentation")
            .set_json(json!({ "topic": "Huge", "slides_count": count }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400, "count {count}");
    }
    assert!(store.is_empty().await);
}

#[actix_web::test]
async fn largest_allowed_deck_is_accepted() {
    let store = Arc::new(MemoryStore::new());
    let app = app!(store.clone());
    let req = test::TestRequest::post()
        .uri("/generate_presentation")
        .set_json(json!({ "topic": "Big", "slides_count": MAX_SLIDES }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    assert_eq!(store.len().await, 1);
}

#[actix_web::test]
async fn cors_preflight_is_answered() {
    let app = test::init_service(
        App::new()
            .wrap(server::cors(&[]))
            .app_data(state(Arc::new(MemoryStore::new())))
            .configure(server::configure),
    )
    .await;

    let req = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/generate_presentation")
        .insert_header((header::ORIGIN, "http://localhost:3000"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success(), "status {}", resp.status());
    let allow = resp
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .and_then(|v| v.to_str().ok());
    assert_eq!(allow, Some("http://localhost:3000"));
}

#[actix_web::test]
async fn cors_listed_origins_only() {
    let allowed = vec!["http://deck.example".to_string()];
    let app = test::init_service(
        App::new()
            .wrap(server::cors(&allowed))
            .app_data(state(Arc::new(MemoryStore::new())))
            .configure(server::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((header::ORIGIN, "http://deck.example"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("http://deck.example")
    );

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((header::ORIGIN, "http://elsewhere.example"))
        .to_request();
    match test::try_call_service(&app, req).await {
        Ok(resp) => assert!(
            !resp.status().is_success()
                || resp
                    .headers()
                    .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                    .is_none(),
            "foreign origin was allowed"
        ),
        Err(_) => {}
    }
}

#[actix_web::test]
async fn unknown_presentation_is_404() {
    let app = app!(Arc::new(MemoryStore::new()));
    let req = test::TestRequest::get().uri("/presentation/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Презентация не найдена");
}

#[actix_web::test]
async fn frontend_code_for_content() {
    let app = app!(Arc::new(MemoryStore::new()));
    let req = test::TestRequest::post()
        .uri("/generate_frontend_code")
        .set_json(json!({
            "slide_content": "# Итоги\n\n* Первый вывод\n* Второй вывод",
            "layout": "grid",
            "theme": "dark"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["source"], "template");
    assert_eq!(body["layout"], "grid");
    assert_eq!(body["theme"], "dark");
    assert!(body["code"].as_str().unwrap().contains("import React"));
}

#[actix_web::test]
async fn frontend_code_requires_content() {
    let app = app!(Arc::new(MemoryStore::new()));
    let req = test::TestRequest::post()
        .uri("/generate_frontend_code")
        .set_json(json!({ "layout": "grid" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Необходимо указать содержимое слайда");
}
