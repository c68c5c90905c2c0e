use serde::{Deserialize, Serialize};

pub const MAX_STRENGTHS: usize = 5;
pub const MAX_METRICS: usize = 4;
pub const MAX_SKILLS: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub label: String,
}

/// Request body for `POST /api/carousel`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarouselRequest {
    pub name: Option<String>,
    pub headline: Option<String>,
    pub strengths: Option<Vec<String>>,
    pub metrics: Option<Vec<Metric>>,
    pub skills: Option<Vec<String>>,
    pub cta: Option<String>,
    pub linkedin: Option<String>,
    /// Image URL (or `data:image/...` URL) for the cover.
    pub headshot: Option<String>,
    pub theme: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CarouselResponse {
    pub success: bool,
    pub theme: &'static str,
    pub slides: Vec<String>,
}

/// Slide content with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideContent {
    pub name: String,
    pub headline: String,
    pub strengths: Vec<String>,
    pub metrics: Vec<Metric>,
    pub skills: Vec<String>,
    pub cta: String,
    pub linkedin: String,
}

impl SlideContent {
    /// Applies defaults: blank strings and empty lists are replaced, lists are
    /// capped to what the templates lay out.
    pub fn from_request(req: &CarouselRequest) -> Self {
        SlideContent {
            name: text_or(&req.name, "Your Name"),
            headline: text_or(&req.headline, "Professional Headline"),
            strengths: list_or(&req.strengths, &DEFAULT_STRENGTHS, MAX_STRENGTHS),
            metrics: metrics_or_default(&req.metrics),
            skills: list_or(&req.skills, &DEFAULT_SKILLS, MAX_SKILLS),
            cta: text_or(
                &req.cta,
                "I'm always open to discussing new opportunities and interesting projects.",
            ),
            linkedin: text_or(&req.linkedin, "linkedin.com/in/yourprofile"),
        }
    }
}

const DEFAULT_STRENGTHS: [&str; 3] = [
    "Strategic Leadership",
    "Data-Driven Decisions",
    "Team Building",
];

const DEFAULT_SKILLS: [&str; 6] = [
    "Strategy",
    "Operations",
    "Leadership",
    "Analytics",
    "Product",
    "Growth",
];

const DEFAULT_METRICS: [(&str, &str); 4] = [
    ("10+", "Years Experience"),
    ("50+", "Projects Delivered"),
    ("$2M+", "Revenue Impact"),
    ("100+", "Team Members Led"),
];

fn text_or(value: &Option<String>, default: &str) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn list_or(values: &Option<Vec<String>>, defaults: &[&str], cap: usize) -> Vec<String> {
    let cleaned: Vec<String> = values
        .iter()
        .flatten()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .take(cap)
        .map(String::from)
        .collect();

    if cleaned.is_empty() {
        defaults.iter().map(|d| d.to_string()).collect()
    } else {
        cleaned
    }
}

fn metrics_or_default(values: &Option<Vec<Metric>>) -> Vec<Metric> {
    let cleaned: Vec<Metric> = values
        .iter()
        .flatten()
        .filter(|m| !m.value.trim().is_empty() || !m.label.trim().is_empty())
        .take(MAX_METRICS)
        .map(|m| Metric {
            value: m.value.trim().to_string(),
            label: m.label.trim().to_string(),
        })
        .collect();

    if cleaned.is_empty() {
        DEFAULT_METRICS
            .iter()
            .map(|(value, label)| Metric {
                value: value.to_string(),
                label: label.to_string(),
            })
            .collect()
    } else {
        cleaned
    }
}
