//! Headshot loading. The rasterizer cannot fetch remote images, so the
//! headshot is downloaded up front and embedded as a data URL.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use reqwest::Client;
use tracing::{debug, warn};

/// Larger headshots are refused; reading stops once the body passes this size.
pub const MAX_HEADSHOT_BYTES: usize = 5 * 1024 * 1024;

/// Resolves a headshot reference into an embeddable data URL.
///
/// Best-effort: any failure is logged and the cover falls back to the
/// placeholder avatar.
pub async fn load_headshot(http: &Client, reference: Option<&str>) -> Option<String> {
    let reference = reference.map(str::trim).filter(|r| !r.is_empty())?;

    if reference.starts_with("data:image/") {
        return Some(reference.to_string());
    }

    match fetch_image(http, reference).await {
        Ok(data_url) => Some(data_url),
        Err(reason) => {
            warn!("Headshot unavailable, using placeholder: {reason}");
            None
        }
    }
}

async fn fetch_image(http: &Client, url: &str) -> Result<String, String> {
    let mut response = http
        .get(url)
        .send()
        .await
        .map_err(|e| format!("{url}: {e}"))?;
    if !response.status().is_success() {
        return Err(format!("{url}: status {}", response.status()));
    }
    if let Some(declared) = response.content_length() {
        if declared > MAX_HEADSHOT_BYTES as u64 {
            return Err(format!("{url}: {declared} bytes exceeds limit"));
        }
    }

    // The declared length may be absent or wrong; stop reading at the cap.
    let mut bytes = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(|e| format!("{url}: {e}"))? {
        if bytes.len() + chunk.len() > MAX_HEADSHOT_BYTES {
            return Err(format!("{url}: body exceeds {MAX_HEADSHOT_BYTES} bytes"));
        }
        bytes.extend_from_slice(&chunk);
    }
    let data_url = to_data_url(&bytes).ok_or_else(|| format!("{url}: unsupported image format"))?;
    debug!("Embedded headshot from {url} ({} bytes)", bytes.len());
    Ok(data_url)
}

/// Sniffs the format from the bytes and wraps them in a data URL.
pub fn to_data_url(bytes: &[u8]) -> Option<String> {
    let mime = match image::guess_format(bytes).ok()? {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Gif => "image/gif",
        ImageFormat::WebP => "image/webp",
        _ => return None,
    };
    Some(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}
