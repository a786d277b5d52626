use std::sync::Arc;

use crate::config::Config;
use crate::portfolio::theme::Theme;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable record store. Default: `AirtableClient`.
    pub store: Arc<dyn RecordStore>,
    /// Accent colour resolved once from `THEME_PRIMARY_COLOR`.
    pub theme: Theme,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, config: &Config) -> Self {
        let theme = Theme::from_hex(&config.theme_primary_color);
        Self { store, theme }
    }
}

#[cfg(test)]
pub fn test_state(store: Arc<dyn RecordStore>) -> AppState {
    let config = Config {
        airtable_api_key: "test-key".to_string(),
        airtable_base_id: "appTest".to_string(),
        airtable_api_url: crate::config::DEFAULT_AIRTABLE_API_URL.to_string(),
        theme_primary_color: "#f80".to_string(),
        port: 0,
        rust_log: "debug".to_string(),
    };
    AppState::new(store, &config)
}
