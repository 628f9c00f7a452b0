//! Creem payment adapters.
//!
//! - `CreemCheckoutProvider` - Hosted checkout sessions over the Creem REST API
//! - `MockCheckoutProvider` - Request-recording provider for tests

mod creem_adapter;
mod mock_checkout_provider;

pub use creem_adapter::{CreemCheckoutProvider, CreemConfig, CREEM_API_BASE_URL};
pub use mock_checkout_provider::MockCheckoutProvider;
