//! Inter font loading for the rasterizer.
//!
//! Bold and regular are fetched concurrently; both must arrive before any
//! slide is rendered.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use reqwest::Client;
use resvg::usvg::fontdb;
use tracing::{debug, info};

use crate::carousel::CarouselError;

const BOLD_FILE: &str = "latin-700-normal.ttf";
const REGULAR_FILE: &str = "latin-400-normal.ttf";

/// Where slide fonts come from.
#[derive(Debug, Clone)]
pub enum FontSource {
    /// Directory URL containing the fontsource `latin-{weight}-normal.ttf` files.
    Remote { base_url: String },
    /// Every `.ttf`/`.otf` file in a local directory.
    Directory(PathBuf),
}

/// Raw font files, in load order.
#[derive(Debug, Clone, Default)]
pub struct FontSet {
    faces: Vec<Bytes>,
}

impl FontSet {
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Builds the font database handed to every slide render.
    ///
    /// The family of the first parsed face also serves as the `sans-serif`
    /// fallback, so a local directory without Inter still draws text. A set
    /// with no parsable face is an error: slides would render blank.
    pub fn into_database(self) -> Result<fontdb::Database, CarouselError> {
        let mut db = fontdb::Database::new();
        for face in self.faces {
            db.load_font_data(face.to_vec());
        }

        let primary = db
            .faces()
            .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
            .ok_or_else(|| CarouselError::FontLoad("no usable font faces".to_string()))?;
        debug!("Font database holds {} faces (sans-serif: {primary})", db.len());
        db.set_sans_serif_family(primary);

        Ok(db)
    }
}

impl FontSource {
    pub async fn load(&self, http: &Client) -> Result<FontSet, CarouselError> {
        match self {
            FontSource::Remote { base_url } => {
                let base = base_url.trim_end_matches('/');
                let (bold, regular) = tokio::try_join!(
                    fetch_font(http, format!("{base}/{BOLD_FILE}")),
                    fetch_font(http, format!("{base}/{REGULAR_FILE}")),
                )?;
                Ok(FontSet {
                    faces: vec![bold, regular],
                })
            }
            FontSource::Directory(dir) => load_dir(dir).await,
        }
    }
}

async fn fetch_font(http: &Client, url: String) -> Result<Bytes, CarouselError> {
    let response = http
        .get(&url)
        .send()
        .await
        .map_err(|e| CarouselError::FontLoad(format!("{url}: {e}")))?;
    if !response.status().is_success() {
        return Err(CarouselError::FontLoad(format!(
            "{url}: status {}",
            response.status()
        )));
    }
    let data = response
        .bytes()
        .await
        .map_err(|e| CarouselError::FontLoad(format!("{url}: {e}")))?;
    info!("Loaded font {url} ({} bytes)", data.len());
    Ok(data)
}

async fn load_dir(dir: &Path) -> Result<FontSet, CarouselError> {
    let io_err = |e: std::io::Error| CarouselError::FontLoad(format!("{}: {e}", dir.display()));

    let mut entries = tokio::fs::read_dir(dir).await.map_err(io_err)?;
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
        let path = entry.path();
        let is_font = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"))
            .unwrap_or(false);
        if is_font {
            paths.push(path);
        }
    }
    // Stable order keeps rendering reproducible.
    paths.sort();

    let reads = paths.iter().map(|path| async move {
        tokio::fs::read(path)
            .await
            .map(Bytes::from)
            .map_err(|e| CarouselError::FontLoad(format!("{}: {e}", path.display())))
    });
    let faces = futures::future::try_join_all(reads).await?;
    if faces.is_empty() {
        return Err(CarouselError::FontLoad(format!(
            "no .ttf or .otf files in {}",
            dir.display()
        )));
    }
    debug!("Loaded {} font files from {}", faces.len(), dir.display());

    Ok(FontSet { faces })
}
