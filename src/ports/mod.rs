//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `CreditLedger` - Balances and append-only credit history
//! - `GenerationLogReader` - Read-only generation history
//! - `KeyValueCache` - Process-local TTL memoization
//!
//! ## External Service Ports
//!
//! - `SessionValidator` - Bearer token to user
//! - `DocumentRenderer` - HTML to PDF
//! - `CheckoutProvider` - Hosted checkout sessions
//! - `AnalyticsSink` - Client analytics destination

mod analytics_sink;
mod cache;
mod checkout_provider;
mod credit_ledger;
mod document_renderer;
mod generation_log_reader;
mod session_validator;

pub use analytics_sink::AnalyticsSink;
pub use cache::KeyValueCache;
pub use checkout_provider::{
    CheckoutError, CheckoutErrorCode, CheckoutProvider, CheckoutRequest, CheckoutSession,
};
pub use credit_ledger::CreditLedger;
pub use document_renderer::{DocumentRenderer, Margins, PageFormat, RenderError, RenderOptions};
pub use generation_log_reader::GenerationLogReader;
pub use session_validator::SessionValidator;
