use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for `POST /api/optimize`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    pub profile_content: Option<String>,
    pub linkedin_url: Option<String>,
    pub pdf_base64: Option<String>,
    pub target_role: Option<String>,
}

/// The one content source that is authoritative for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSource {
    Text(String),
    Url(String),
    /// Base64 (optionally data-URL prefixed) PDF bytes.
    Pdf(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileInput {
    pub source: Option<ProfileSource>,
    pub target_role: Option<String>,
}

impl From<OptimizeRequest> for ProfileInput {
    /// Pasted text wins over a URL, which wins over a PDF. Blank strings count as absent.
    fn from(req: OptimizeRequest) -> Self {
        let source = non_blank(req.profile_content)
            .map(ProfileSource::Text)
            .or_else(|| non_blank(req.linkedin_url).map(ProfileSource::Url))
            .or_else(|| non_blank(req.pdf_base64).map(ProfileSource::Pdf));

        ProfileInput {
            source,
            target_role: non_blank(req.target_role).map(|r| r.trim().to_string()),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Which input produced an `ExtractedContent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Direct,
    Fetched,
    PdfParsed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    pub text: String,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Pass,
    Warn,
    Fail,
}

/// A validated optimization result.
///
/// Serializes exactly as the model returned it; only the top-level fields
/// `score`, `optimized` and `audit` are guaranteed to be present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OptimizationResult(Value);

impl OptimizationResult {
    pub(crate) fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn score(&self) -> Option<f64> {
        self.0.get("score").and_then(Value::as_f64)
    }

    /// Statuses of the audit entries that carry a recognised status.
    pub fn audit_statuses(&self) -> Vec<AuditStatus> {
        self.0
            .get("audit")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|e| e.get("status").cloned())
                    .filter_map(|s| serde_json::from_value(s).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}
