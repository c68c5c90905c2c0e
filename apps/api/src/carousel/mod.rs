// Carousel generation: five fixed slide templates rendered to PNG.
// Fonts and the headshot load concurrently, then the slides render concurrently.

pub mod assets;
pub mod fonts;
pub mod handlers;
pub mod models;
pub mod render;
pub mod slides;
pub mod text;
pub mod themes;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CarouselError {
    #[error("Failed to load fonts: {0}")]
    FontLoad(String),

    #[error("Failed to render {slide} slide: {detail}")]
    Render { slide: &'static str, detail: String },

    #[error("Slide rendering task failed: {0}")]
    Task(String),
}
