//! Application handlers.
//!
//! ## Commands
//! - `GeneratePdfHandler` - Paid certificate export through the entitlement gate
//! - `CreateCheckoutHandler` - Catalog resolution and hosted checkout
//! - `IngestAnalyticsHandler` - Client analytics batches
//!
//! ## Queries
//! - `GetCreditsHandler` / `GetCreditHistoryHandler` - Balance and transactions
//! - `ListGenerationLogsHandler` - Past name generations

pub mod analytics;
pub mod checkout;
pub mod credits;
pub mod naming;
pub mod pdf;

pub use analytics::{IngestAnalyticsCommand, IngestAnalyticsHandler, IngestAnalyticsResult};
pub use checkout::{CreateCheckoutCommand, CreateCheckoutHandler, CreateCheckoutResult};
pub use credits::{
    GetCreditHistoryHandler, GetCreditHistoryQuery, GetCreditsHandler, GetCreditsQuery,
    GetCreditsResult,
};
pub use naming::{ListGenerationLogsHandler, ListGenerationLogsQuery};
pub use pdf::{GeneratePdfCommand, GeneratePdfHandler, GeneratePdfResult, DEFAULT_PDF_CREDIT_COST};
