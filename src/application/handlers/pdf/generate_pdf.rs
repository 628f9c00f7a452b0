//! GeneratePdfHandler - Command handler for paid certificate exports.
//!
//! One export costs `credit_cost` credits. The certificate is rendered
//! first and charged only once the PDF exists.

use std::sync::Arc;

use serde_json::json;

use crate::application::cache_keys::{invalidate_user, SharedCache};
use crate::application::entitlement::{ChargeSpec, EntitlementGate, SideEffectError};
use crate::domain::failure::AppError;
use crate::domain::foundation::UserId;
use crate::domain::naming::{certificate_html, NameData, UserData};
use crate::ports::{DocumentRenderer, RenderOptions};

/// Credits one export costs unless configured otherwise.
pub const DEFAULT_PDF_CREDIT_COST: u32 = 1;

/// Command to export a name certificate.
#[derive(Debug, Clone)]
pub struct GeneratePdfCommand {
    pub user_id: UserId,
    pub name_data: NameData,
    pub user_data: UserData,
}

/// A rendered certificate.
#[derive(Debug, Clone)]
pub struct GeneratePdfResult {
    pub pdf: Vec<u8>,
    pub file_name: String,
    /// Balance after the charge. None when the charge could not be recorded.
    pub remaining_credits: Option<u32>,
}

/// Handler for certificate exports.
pub struct GeneratePdfHandler {
    gate: EntitlementGate,
    renderer: Arc<dyn DocumentRenderer>,
    cache: SharedCache,
    credit_cost: u32,
}

impl GeneratePdfHandler {
    pub fn new(
        gate: EntitlementGate,
        renderer: Arc<dyn DocumentRenderer>,
        cache: SharedCache,
    ) -> Self {
        Self {
            gate,
            renderer,
            cache,
            credit_cost: DEFAULT_PDF_CREDIT_COST,
        }
    }

    pub fn with_credit_cost(mut self, credit_cost: u32) -> Self {
        self.credit_cost = credit_cost;
        self
    }

    pub async fn handle(&self, cmd: GeneratePdfCommand) -> Result<GeneratePdfResult, AppError> {
        cmd.name_data.validate()?;

        let html = certificate_html(&cmd.name_data, &cmd.user_data);
        let file_name = cmd.name_data.export_file_name();
        let spec = ChargeSpec::new(self.credit_cost, "Chinese name certificate PDF").with_metadata(
            json!({
                "chineseName": cmd.name_data.chinese_name,
                "fileName": file_name,
            }),
        );

        let renderer = Arc::clone(&self.renderer);
        let outcome = self
            .gate
            .run(&cmd.user_id, spec, || async move {
                if !renderer.is_available().await {
                    return Err(SideEffectError::Unavailable(
                        "PDF renderer is not available".to_string(),
                    ));
                }
                renderer
                    .render(&html, &RenderOptions::certificate())
                    .await
                    .map_err(SideEffectError::from)
            })
            .await?;

        let removed = invalidate_user(self.cache.as_ref(), &cmd.user_id);
        tracing::info!(
            user_id = %cmd.user_id.as_str(),
            file_name = %file_name,
            bytes = outcome.artifact.len(),
            charged = outcome.accounting.is_charged(),
            cache_entries_dropped = removed,
            "Certificate exported"
        );

        Ok(GeneratePdfResult {
            pdf: outcome.artifact,
            file_name,
            remaining_credits: outcome.accounting.remaining_credits(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::cache::{TtlCache, TtlCacheConfig};
    use crate::adapters::document::MockRenderer;
    use crate::adapters::memory::InMemoryCreditLedger;
    use crate::application::cache_keys::{credits_key, CachedValue};
    use crate::domain::credits::CreditBalance;
    use crate::domain::failure::ErrorKind;
    use crate::domain::foundation::CustomerId;
    use crate::ports::{CreditLedger, KeyValueCache, RenderError};

    struct Fixture {
        handler: GeneratePdfHandler,
        ledger: Arc<InMemoryCreditLedger>,
        renderer: Arc<MockRenderer>,
        cache: Arc<TtlCache<CachedValue>>,
    }

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn fixture(credits: u32, renderer: MockRenderer) -> Fixture {
        let ledger = Arc::new(InMemoryCreditLedger::new().with_customer(user(), credits));
        let renderer = Arc::new(renderer);
        let cache = Arc::new(TtlCache::new(TtlCacheConfig::default()));
        let handler = GeneratePdfHandler::new(
            EntitlementGate::new(ledger.clone()),
            renderer.clone(),
            cache.clone(),
        );
        Fixture {
            handler,
            ledger,
            renderer,
            cache,
        }
    }

    fn command() -> GeneratePdfCommand {
        GeneratePdfCommand {
            user_id: user(),
            name_data: NameData {
                chinese_name: "李明".to_string(),
                pinyin: "Li Ming".to_string(),
                meaning: Some("Bright".to_string()),
                characters: vec![],
                cultural_context: None,
            },
            user_data: UserData {
                english_name: Some("Liam".to_string()),
                ..UserData::default()
            },
        }
    }

    #[tokio::test]
    async fn one_credit_renders_and_charges() {
        let f = fixture(1, MockRenderer::new());

        let result = f.handler.handle(command()).await.unwrap();

        assert!(result.pdf.starts_with(b"%PDF"));
        assert_eq!(result.file_name, "li-ming-certificate.pdf");
        assert_eq!(result.remaining_credits, Some(0));
        assert_eq!(f.renderer.call_count(), 1);
        assert!(f.renderer.last_html().unwrap().contains("李明"));
        let history = f.ledger.transactions_for(&user()).await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].amount, 1);
    }

    #[tokio::test]
    async fn zero_credits_is_denied_without_render() {
        let f = fixture(0, MockRenderer::new());

        let err = f.handler.handle(command()).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::Payment);
        assert_eq!(err.http_status(), 403);
        assert_eq!(err.extensions["creditsRequired"], 1);
        assert_eq!(err.extensions["currentCredits"], 0);
        assert_eq!(f.renderer.call_count(), 0);
        assert!(f.ledger.transactions_for(&user()).await.is_empty());
    }

    #[tokio::test]
    async fn blank_name_is_validation_error() {
        let f = fixture(5, MockRenderer::new());
        let mut cmd = command();
        cmd.name_data.chinese_name = "  ".to_string();

        let err = f.handler.handle(cmd).await.unwrap_err();

        assert_eq!(err.http_status(), 400);
        assert_eq!(f.renderer.call_count(), 0);
    }

    #[tokio::test]
    async fn unavailable_renderer_is_503_and_free() {
        let f = fixture(5, MockRenderer::unavailable());

        let err = f.handler.handle(command()).await.unwrap_err();

        assert_eq!(err.http_status(), 503);
        assert_eq!(f.renderer.call_count(), 0);
        assert_eq!(f.ledger.balance(&user()).await.unwrap().unwrap().credits, 5);
    }

    #[tokio::test]
    async fn render_failure_is_retryable_and_free() {
        let f = fixture(5, MockRenderer::failing(RenderError::failed("crashed")));

        let err = f.handler.handle(command()).await.unwrap_err();

        assert_eq!(err.http_status(), 500);
        assert!(err.retryable);
        assert!(f.ledger.transactions_for(&user()).await.is_empty());
    }

    #[tokio::test]
    async fn success_invalidates_cached_balance() {
        let f = fixture(2, MockRenderer::new());
        f.cache.set(
            &credits_key(&user()),
            CachedValue::Balance(CreditBalance::new(CustomerId::new(), user(), 2)),
            None,
        );

        f.handler.handle(command()).await.unwrap();

        assert!(!f.cache.has(&credits_key(&user())));
    }

    #[tokio::test]
    async fn configured_cost_is_charged() {
        let f = fixture(5, MockRenderer::new());
        let handler = f.handler.with_credit_cost(3);

        let result = handler.handle(command()).await.unwrap();

        assert_eq!(result.remaining_credits, Some(2));
    }
}
