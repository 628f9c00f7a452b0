//! Feature flags configuration

use serde::Deserialize;

use crate::application::handlers::DEFAULT_PDF_CREDIT_COST;

use super::error::ValidationError;

/// Feature flags and tunables
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Credits charged per certificate export
    #[serde(default = "default_pdf_credit_cost")]
    pub pdf_credit_cost: u32,

    /// Show internal error messages to clients (never in production)
    #[serde(default)]
    pub verbose_errors: bool,
}

impl FeatureFlags {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.pdf_credit_cost == 0 {
            return Err(ValidationError::InvalidCreditCost);
        }
        Ok(())
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            pdf_credit_cost: default_pdf_credit_cost(),
            verbose_errors: false,
        }
    }
}

fn default_pdf_credit_cost() -> u32 {
    DEFAULT_PDF_CREDIT_COST
}
