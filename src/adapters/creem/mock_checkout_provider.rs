//! Mock checkout provider for testing.
//!
//! Records every request and returns a deterministic session, or an
//! injected error.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::ports::{CheckoutError, CheckoutProvider, CheckoutRequest, CheckoutSession};

/// Mock checkout provider.
///
/// # Example
///
/// ```ignore
/// let mock = MockCheckoutProvider::new();
/// mock.set_error(CheckoutError::network("connection refused"));
/// let result = mock.create_checkout_session(request).await;
/// assert_eq!(mock.requests().len(), 1);
/// ```
#[derive(Default, Clone)]
pub struct MockCheckoutProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    requests: Vec<CheckoutRequest>,

    /// Error to return on every call until cleared.
    error: Option<CheckoutError>,
}

impl MockCheckoutProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_error(&self, error: CheckoutError) {
        self.state().error = Some(error);
    }

    pub fn clear_error(&self) {
        self.state().error = None;
    }

    /// Every request received, oldest first.
    pub fn requests(&self) -> Vec<CheckoutRequest> {
        self.state().requests.clone()
    }

    pub fn last_request(&self) -> Option<CheckoutRequest> {
        self.state().requests.last().cloned()
    }

    /// Checkout URL the mock returns for a product.
    pub fn checkout_url_for(product_id: &str) -> String {
        format!("https://checkout.test/{}", product_id)
    }
}

#[async_trait]
impl CheckoutProvider for MockCheckoutProvider {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, CheckoutError> {
        let mut state = self.state();
        let product_id = request.product_id.clone();
        state.requests.push(request);

        if let Some(error) = state.error.clone() {
            return Err(error);
        }

        Ok(CheckoutSession {
            id: format!("ch_mock_{}", state.requests.len()),
            checkout_url: Self::checkout_url_for(&product_id),
        })
    }
}
