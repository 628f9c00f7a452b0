//! CreateCheckoutHandler - Command handler for starting a hosted checkout.

use std::sync::Arc;

use crate::domain::billing::{resolve_product, CheckoutSelection, ProductCatalog, ResolvedProduct};
use crate::domain::failure::AppError;
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::{CheckoutProvider, CheckoutRequest};

/// Command to create a checkout session for the signed-in user.
#[derive(Debug, Clone)]
pub struct CreateCheckoutCommand {
    pub user: AuthenticatedUser,
    pub selection: CheckoutSelection,
}

#[derive(Debug, Clone)]
pub struct CreateCheckoutResult {
    pub checkout_url: String,
    pub session_id: String,
    pub product: ResolvedProduct,
}

/// Resolves the selection against the catalog and asks the provider for a
/// checkout page.
pub struct CreateCheckoutHandler {
    catalog: Arc<ProductCatalog>,
    provider: Arc<dyn CheckoutProvider>,
    success_url: String,
}

impl CreateCheckoutHandler {
    pub fn new(
        catalog: Arc<ProductCatalog>,
        provider: Arc<dyn CheckoutProvider>,
        success_url: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            provider,
            success_url: success_url.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutCommand,
    ) -> Result<CreateCheckoutResult, AppError> {
        let product = resolve_product(&self.catalog, &cmd.selection)?;

        tracing::info!(
            user_id = %cmd.user.id.as_str(),
            tier_id = %product.tier_id,
            product_id = %product.product_id,
            matched_by = ?product.matched_by,
            "Resolved checkout product"
        );

        let request = CheckoutRequest {
            product_id: product.product_id.clone(),
            email: cmd.user.email.clone(),
            user_id: cmd.user.id.clone(),
            checkout_type: product.checkout_type,
            credits_amount: product.credits_amount,
            discount_code: cmd
                .selection
                .discount_code
                .filter(|code| !code.trim().is_empty()),
            success_url: self.success_url.clone(),
        };

        let session = self
            .provider
            .create_checkout_session(request)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, product_id = %product.product_id, "Checkout creation failed");
                AppError::from(e)
            })?;

        Ok(CreateCheckoutResult {
            checkout_url: session.checkout_url,
            session_id: session.id,
            product,
        })
    }
}
