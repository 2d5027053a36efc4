use std::sync::Arc;

use leptos::config::LeptosOptions;

use crate::catalog::Catalog;
use crate::error::AppError;
use crate::server::gemini::{GeminiClient, GeminiConfig};

#[derive(Clone)]
pub struct AppState {
    pub leptos_options: LeptosOptions,
    pub catalog: Arc<Catalog<GeminiClient>>,
}

impl AppState {
    pub fn new(leptos_options: LeptosOptions) -> Result<Self, AppError> {
        let config = GeminiConfig::from_env();
        let client = GeminiClient::new(config)?;
        if !client.is_configured() {
            tracing::warn!("GEMINI_API_KEY not set, shelves and search will come back empty");
        }

        Ok(Self {
            leptos_options,
            catalog: Arc::new(Catalog::new(client)),
        })
    }
}

impl axum::extract::FromRef<AppState> for LeptosOptions {
    fn from_ref(state: &AppState) -> Self {
        state.leptos_options.clone()
    }
}

pub fn provide_server_context(state: AppState) {
    leptos::prelude::provide_context(state);
}
