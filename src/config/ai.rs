//! AI provider configuration
//!
//! Name generation runs in the frontend's server routes; the backend only
//! records whether a key is present so deployments can be checked.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    pub llm_api_key: Option<SecretString>,

    #[serde(default = "default_model")]
    pub model: String,
}

impl AiConfig {
    pub fn is_configured(&self) -> bool {
        self.llm_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            llm_api_key: None,
            model: default_model(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}
