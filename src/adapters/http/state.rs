//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use crate::application::entitlement::{EntitlementGate, DEFAULT_SIDE_EFFECT_TIMEOUT};
use crate::application::handlers::{
    CreateCheckoutHandler, GeneratePdfHandler, GetCreditHistoryHandler, GetCreditsHandler,
    IngestAnalyticsHandler, ListGenerationLogsHandler, DEFAULT_PDF_CREDIT_COST,
};
use crate::application::SharedCache;
use crate::domain::billing::ProductCatalog;
use crate::ports::{
    AnalyticsSink, CheckoutProvider, CreditLedger, DocumentRenderer, GenerationLogReader,
    SessionValidator,
};

use super::error::ErrorResponder;

/// Request-independent settings the handlers need.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Where the payment provider redirects after checkout.
    pub checkout_success_url: String,
    pub pdf_credit_cost: u32,
    pub side_effect_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            checkout_success_url: "http://localhost:3000/payment/success".to_string(),
            pdf_credit_cost: DEFAULT_PDF_CREDIT_COST,
            side_effect_timeout: DEFAULT_SIDE_EFFECT_TIMEOUT,
        }
    }
}

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn CreditLedger>,
    pub renderer: Arc<dyn DocumentRenderer>,
    pub checkout_provider: Arc<dyn CheckoutProvider>,
    pub catalog: Arc<ProductCatalog>,
    pub generation_logs: Arc<dyn GenerationLogReader>,
    pub analytics_sink: Arc<dyn AnalyticsSink>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub cache: SharedCache,
    pub errors: ErrorResponder,
    pub settings: HttpSettings,
}

impl AppState {
    /// Create handlers on demand from the shared state.
    pub fn generate_pdf_handler(&self) -> GeneratePdfHandler {
        let gate = EntitlementGate::new(self.ledger.clone())
            .with_side_effect_timeout(self.settings.side_effect_timeout);
        GeneratePdfHandler::new(gate, self.renderer.clone(), self.cache.clone())
            .with_credit_cost(self.settings.pdf_credit_cost)
    }

    pub fn create_checkout_handler(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(
            self.catalog.clone(),
            self.checkout_provider.clone(),
            self.settings.checkout_success_url.clone(),
        )
    }

    pub fn get_credits_handler(&self) -> GetCreditsHandler {
        GetCreditsHandler::new(self.ledger.clone(), self.cache.clone())
    }

    pub fn get_credit_history_handler(&self) -> GetCreditHistoryHandler {
        GetCreditHistoryHandler::new(self.ledger.clone())
    }

    pub fn list_generation_logs_handler(&self) -> ListGenerationLogsHandler {
        ListGenerationLogsHandler::new(self.generation_logs.clone(), self.cache.clone())
    }

    pub fn ingest_analytics_handler(&self) -> IngestAnalyticsHandler {
        IngestAnalyticsHandler::new(self.analytics_sink.clone())
    }
}
