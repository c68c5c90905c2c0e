//! Content extractor: turns pasted text, a profile URL, or a base64 PDF into
//! one plain-text document for the prompt.
//!
//! The URL path is best-effort by nature: LinkedIn serves a login wall to
//! anonymous clients almost always, and every failure there is reported as
//! `ExtractError::Blocked` so the caller can ask the user to paste instead.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{header, Client};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::optimize::models::{ExtractedContent, ProfileInput, ProfileSource, Provenance};

/// Upper bound on how much fetched markup is forwarded to the model.
pub const MAX_FETCHED_CHARS: usize = 50_000;
/// PDFs yielding fewer characters than this are treated as unreadable.
pub const MIN_PDF_TEXT_CHARS: usize = 50;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// Phrases that only appear when LinkedIn gates the page behind sign-in.
const LOGIN_WALL_MARKERS: &[&str] = &["authwall", "login", "Sign in"];

static RE_TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<title>([^|<]+)").unwrap());
static RE_ABOUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)About</h2>.*?<p[^>]*>([^<]+)</p>").unwrap());

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Please provide your LinkedIn profile content, a profile URL, or a PDF export.")]
    ContentRequired,

    #[error(
        "Could not fetch LinkedIn profile. LinkedIn blocks automated access. \
         Please paste your profile content manually using the toggle below the URL field."
    )]
    Blocked,

    #[error("Could not decode the uploaded PDF. Please upload the file again.")]
    PdfDecode,

    #[error(
        "Could not extract enough text from the PDF. It may be image-based (scanned) or \
         corrupted. Please paste your profile content instead."
    )]
    PdfTooShort,

    #[error("Failed to read the PDF: {0}. Please try another file or paste your profile content.")]
    PdfParse(String),
}

/// Hints pulled from public profile markup. Only `raw` is forwarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedProfile {
    pub raw: String,
    pub name_hint: String,
    pub about_hint: Option<String>,
}

/// Resolves the request's authoritative source into plain text.
pub async fn extract_content(
    input: &ProfileInput,
    http: &Client,
) -> Result<ExtractedContent, ExtractError> {
    match &input.source {
        Some(ProfileSource::Text(text)) => Ok(ExtractedContent {
            text: text.clone(),
            provenance: Provenance::Direct,
        }),
        Some(ProfileSource::Url(url)) => {
            let scraped = fetch_profile(http, url).await?;
            info!(
                name = %scraped.name_hint,
                has_about = scraped.about_hint.is_some(),
                "Fetched public profile markup"
            );
            Ok(ExtractedContent {
                text: scraped.raw,
                provenance: Provenance::Fetched,
            })
        }
        Some(ProfileSource::Pdf(encoded)) => Ok(ExtractedContent {
            text: extract_pdf_text(encoded).await?,
            provenance: Provenance::PdfParsed,
        }),
        None => Err(ExtractError::ContentRequired),
    }
}

/// Single GET with browser headers. Any transport error, non-2xx status, or
/// login wall is `Blocked`.
async fn fetch_profile(http: &Client, url: &str) -> Result<ScrapedProfile, ExtractError> {
    let response = http
        .get(url)
        .header(header::USER_AGENT, BROWSER_USER_AGENT)
        .header(header::ACCEPT, BROWSER_ACCEPT)
        .header(header::ACCEPT_LANGUAGE, BROWSER_ACCEPT_LANGUAGE)
        .send()
        .await
        .map_err(|e| {
            warn!("Profile fetch error: {e}");
            ExtractError::Blocked
        })?;

    if !response.status().is_success() {
        warn!("Profile fetch returned {}", response.status());
        return Err(ExtractError::Blocked);
    }

    let html = response.text().await.map_err(|e| {
        warn!("Profile body read error: {e}");
        ExtractError::Blocked
    })?;

    scrape_profile_markup(&html).ok_or(ExtractError::Blocked)
}

/// Checks fetched markup for a login wall and a recognisable profile title.
pub fn scrape_profile_markup(html: &str) -> Option<ScrapedProfile> {
    if let Some(marker) = LOGIN_WALL_MARKERS.iter().find(|m| html.contains(*m)) {
        debug!("Login wall detected (marker {marker:?})");
        return None;
    }

    let name_hint = RE_TITLE.captures(html)?.get(1)?.as_str().trim().to_string();
    let about_hint = RE_ABOUT
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string());

    Some(ScrapedProfile {
        raw: truncate_chars(html, MAX_FETCHED_CHARS).to_string(),
        name_hint,
        about_hint,
    })
}

fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Decodes the upload and extracts its text on a blocking thread.
pub async fn extract_pdf_text(encoded: &str) -> Result<String, ExtractError> {
    let bytes = decode_pdf(encoded)?;
    debug!("Decoded PDF upload: {} bytes", bytes.len());

    // pdf-extract is CPU-bound and may panic on malformed input; a panic
    // surfaces here as a JoinError.
    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| {
            warn!("PDF extraction panicked: {e}");
            ExtractError::PdfParse("the PDF parser crashed on this file".to_string())
        })?
        .map_err(|e| {
            warn!("PDF extraction failed: {e}");
            ExtractError::PdfParse(e.to_string())
        })?;

    check_pdf_text(extracted)
}

fn decode_pdf(encoded: &str) -> Result<Vec<u8>, ExtractError> {
    let trimmed = encoded.trim();
    let payload = match trimmed.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => trimmed,
    };
    // Transport may have inserted line breaks.
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.decode(compact).map_err(|e| {
        warn!("PDF base64 decode failed: {e}");
        ExtractError::PdfDecode
    })
}

fn check_pdf_text(text: String) -> Result<String, ExtractError> {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_PDF_TEXT_CHARS {
        warn!(
            "PDF yielded only {} characters of text",
            trimmed.chars().count()
        );
        return Err(ExtractError::PdfTooShort);
    }
    Ok(trimmed.to_string())
}
