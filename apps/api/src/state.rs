use std::sync::Arc;

use reqwest::Client;

use crate::carousel::fonts::FontSource;
use crate::config::Config;
use crate::llm_client::{LlmClient, ProfileModel};

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Outbound client for profile fetches, fonts and headshots.
    pub http: Client,
    /// `None` when `ANTHROPIC_API_KEY` is missing; the optimize endpoint then
    /// answers with a configuration error.
    pub llm: Option<Arc<dyn ProfileModel>>,
    pub fonts: FontSource,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let http = Client::new();
        let llm = config
            .anthropic_api_key
            .clone()
            .map(|key| Arc::new(LlmClient::new(http.clone(), key)) as Arc<dyn ProfileModel>);
        let fonts = match &config.font_dir {
            Some(dir) => FontSource::Directory(dir.clone()),
            None => FontSource::Remote {
                base_url: config.font_base_url.clone(),
            },
        };

        AppState {
            config,
            http,
            llm,
            fonts,
        }
    }
}
