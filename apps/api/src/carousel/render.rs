//! SVG → PNG rasterization.
//!
//! Rendering is CPU-bound, so each slide runs inside `spawn_blocking`. The
//! five renders fan out together and are joined before returning; one
//! failure fails the whole carousel.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use resvg::{tiny_skia, usvg};
use tracing::debug;

use crate::carousel::slides::{SlideKind, SLIDE_SIZE};
use crate::carousel::CarouselError;

/// Rasterizes one slide into PNG bytes.
pub fn render_png(
    kind: SlideKind,
    svg: &str,
    fontdb: Arc<usvg::fontdb::Database>,
) -> Result<Vec<u8>, CarouselError> {
    let render_err = |detail: String| CarouselError::Render {
        slide: kind.label(),
        detail,
    };

    let mut options = usvg::Options::default();
    options.fontdb = fontdb;
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| render_err(e.to_string()))?;

    let mut pixmap = tiny_skia::Pixmap::new(SLIDE_SIZE, SLIDE_SIZE)
        .ok_or_else(|| render_err("could not allocate pixmap".to_string()))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|e| render_err(e.to_string()))
}

pub fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Renders every slide concurrently and returns data URLs in input order.
pub async fn render_all(
    slides: Vec<(SlideKind, String)>,
    fontdb: Arc<usvg::fontdb::Database>,
) -> Result<Vec<String>, CarouselError> {
    let tasks = slides.into_iter().map(|(kind, svg)| {
        let fontdb = Arc::clone(&fontdb);
        async move {
            let png = tokio::task::spawn_blocking(move || render_png(kind, &svg, fontdb))
                .await
                .map_err(|e| CarouselError::Task(e.to_string()))??;
            debug!("Rendered {} slide ({} bytes)", kind.label(), png.len());
            Ok::<_, CarouselError>(png_data_url(&png))
        }
    });

    futures::future::try_join_all(tasks).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::fonts::tests::fixture_font_dir;
    use crate::carousel::models::{CarouselRequest, SlideContent};
    use crate::carousel::slides::build_slide;
    use crate::carousel::themes::default_theme;

    fn empty_fontdb() -> Arc<usvg::fontdb::Database> {
        Arc::new(usvg::fontdb::Database::new())
    }

    fn fixture_fontdb() -> Arc<usvg::fontdb::Database> {
        let mut db = usvg::fontdb::Database::new();
        db.load_fonts_dir(fixture_font_dir());
        db.set_sans_serif_family("DejaVu Sans");
        Arc::new(db)
    }

    fn decode(data_url: &str) -> image::DynamicImage {
        let b64 = data_url.strip_prefix("data:image/png;base64,").unwrap();
        let bytes = STANDARD.decode(b64).unwrap();
        image::load_from_memory_with_format(&bytes, image::ImageFormat::Png).unwrap()
    }

    fn default_slides() -> Vec<(SlideKind, String)> {
        let content = SlideContent::from_request(&CarouselRequest::default());
        SlideKind::ALL
            .iter()
            .map(|&kind| (kind, build_slide(kind, &content, default_theme(), None)))
            .collect()
    }

    #[test]
    fn test_render_png_dimensions() {
        let (kind, svg) = default_slides().remove(0);
        let png = render_png(kind, &svg, empty_fontdb()).unwrap();
        let img = image::load_from_memory(&png).unwrap();
        assert_eq!((img.width(), img.height()), (1080, 1080));
    }

    #[test]
    fn test_invalid_svg_is_render_error() {
        let err = render_png(SlideKind::Cover, "<svg", empty_fontdb()).unwrap_err();
        match err {
            CarouselError::Render { slide, .. } => assert_eq!(slide, "cover"),
            other => panic!("expected Render, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_render_all_returns_five_pngs_in_order() {
        let urls = render_all(default_slides(), fixture_fontdb()).await.unwrap();
        assert_eq!(urls.len(), 5);
        for url in &urls {
            let img = decode(url);
            assert_eq!((img.width(), img.height()), (1080, 1080));
        }
        // Cover is the blue gradient; value-prop is the white surface.
        let cover = decode(&urls[0]).to_rgba8();
        let value = decode(&urls[1]).to_rgba8();
        assert_ne!(cover.get_pixel(5, 5), value.get_pixel(5, 5));
        assert_eq!(value.get_pixel(5, 5).0, [255, 255, 255, 255]);
    }

    #[tokio::test]
    async fn test_render_all_is_deterministic() {
        let first = render_all(default_slides(), fixture_fontdb()).await.unwrap();
        let second = render_all(default_slides(), fixture_fontdb()).await.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_text_changes_pixels() {
        let (kind, svg) = default_slides().remove(1);
        let with_text = render_png(kind, &svg, fixture_fontdb()).unwrap();
        let without_text = render_png(kind, &svg, empty_fontdb()).unwrap();
        assert_ne!(with_text, without_text);
    }

    #[tokio::test]
    async fn test_one_bad_slide_fails_all() {
        let mut slides = default_slides();
        slides[3].1 = "not svg".to_string();
        let err = render_all(slides, empty_fontdb()).await.unwrap_err();
        assert!(err.to_string().contains("expertise"));
    }
}
