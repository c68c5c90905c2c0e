//! Axum route handlers for the carousel endpoint.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{debug, info};

use crate::carousel::assets::load_headshot;
use crate::carousel::models::{CarouselRequest, CarouselResponse, SlideContent};
use crate::carousel::render::render_all;
use crate::carousel::slides::{build_slide, SlideKind};
use crate::carousel::themes::{resolve_theme, theme_descriptors, ThemeDescriptor};
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/carousel
pub async fn handle_list_themes() -> Json<Vec<ThemeDescriptor>> {
    Json(theme_descriptors())
}

/// POST /api/carousel
///
/// Returns exactly five 1080×1080 PNG data URLs, or an error; never a partial set.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<CarouselRequest>, JsonRejection>,
) -> Result<Json<CarouselResponse>, AppError> {
    let Json(request) = payload?;
    let theme = resolve_theme(request.theme.as_deref());
    let content = SlideContent::from_request(&request);

    let (fonts, headshot) = tokio::join!(
        state.fonts.load(&state.http),
        load_headshot(&state.http, request.headshot.as_deref()),
    );
    let fonts = fonts?;
    debug!("Rendering with {} font faces", fonts.len());
    let fontdb = Arc::new(fonts.into_database()?);

    let slides: Vec<(SlideKind, String)> = SlideKind::ALL
        .iter()
        .map(|&kind| (kind, build_slide(kind, &content, theme, headshot.as_deref())))
        .collect();
    let slides = render_all(slides, fontdb).await?;

    info!(
        theme = theme.id,
        headshot = headshot.is_some(),
        "Generated carousel with {} slides",
        slides.len()
    );

    Ok(Json(CarouselResponse {
        success: true,
        theme: theme.name,
        slides,
    }))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::carousel::fonts::tests::fixture_font_dir;
    use crate::config::Config;
    use crate::routes::build_router;
    use crate::state::AppState;

    async fn send(state: AppState, method: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri("/api/carousel");
        let body = match body {
            Some(v) => {
                builder = builder.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let response = build_router(state)
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn state_with_font_dir(dir: PathBuf) -> AppState {
        AppState::new(Config::for_tests(Some(dir)))
    }

    fn png_dimensions(data_url: &str) -> (u32, u32) {
        let b64 = data_url.strip_prefix("data:image/png;base64,").unwrap();
        let img = image::load_from_memory(&STANDARD.decode(b64).unwrap()).unwrap();
        (img.width(), img.height())
    }

    #[tokio::test]
    async fn test_empty_post_renders_five_slides() {
        let (status, body) = send(
            state_with_font_dir(fixture_font_dir()),
            "POST",
            Some(json!({})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["theme"], "LinkedIn Blue");
        let slides = body["slides"].as_array().unwrap();
        assert_eq!(slides.len(), 5);
        for slide in slides {
            assert_eq!(png_dimensions(slide.as_str().unwrap()), (1080, 1080));
        }
    }

    #[tokio::test]
    async fn test_unknown_theme_falls_back_to_default() {
        let (status, body) = send(
            state_with_font_dir(fixture_font_dir()),
            "POST",
            Some(json!({"theme": "does-not-exist", "name": "Jane"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["theme"], "LinkedIn Blue");
    }

    #[tokio::test]
    async fn test_identical_requests_identical_images() {
        let request = json!({"name": "Jane Doe", "theme": "emerald", "skills": ["Ops", "Finance"]});
        let (_, first) = send(
            state_with_font_dir(fixture_font_dir()),
            "POST",
            Some(request.clone()),
        )
        .await;
        let (_, second) = send(
            state_with_font_dir(fixture_font_dir()),
            "POST",
            Some(request),
        )
        .await;
        assert_eq!(first["slides"], second["slides"]);
        assert_eq!(first["theme"], "Emerald");
    }

    #[tokio::test]
    async fn test_font_failure_is_500() {
        let (status, body) = send(
            state_with_font_dir(PathBuf::from("/definitely/not/here")),
            "POST",
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("fonts"));
    }

    #[tokio::test]
    async fn test_empty_font_dir_is_500() {
        let fonts = tempfile::tempdir().unwrap();
        let (status, body) = send(
            state_with_font_dir(fonts.path().to_path_buf()),
            "POST",
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("fonts"));
        assert!(body.get("success").is_none());
    }

    #[tokio::test]
    async fn test_name_is_drawn_on_cover() {
        let (_, alice) = send(
            state_with_font_dir(fixture_font_dir()),
            "POST",
            Some(json!({"name": "Alice Anderson"})),
        )
        .await;
        let (_, bob) = send(
            state_with_font_dir(fixture_font_dir()),
            "POST",
            Some(json!({"name": "Bob Zzzzzzzzzzz"})),
        )
        .await;
        assert_ne!(alice["slides"][0], bob["slides"][0]);
        // The name only appears on the cover.
        assert_eq!(alice["slides"][1], bob["slides"][1]);
    }

    #[tokio::test]
    async fn test_get_lists_themes() {
        let (status, body) = send(state_with_font_dir(fixture_font_dir()), "GET", None).await;
        assert_eq!(status, StatusCode::OK);
        let themes = body.as_array().unwrap();
        assert_eq!(themes.len(), 5);
        assert_eq!(themes[0]["id"], "linkedin");
        assert!(themes.iter().all(|t| t.get("backgroundAlt").is_some()));
    }
}
