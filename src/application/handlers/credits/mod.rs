//! Credit balance and history queries.

mod get_credit_history;
mod get_credits;

pub use get_credit_history::{GetCreditHistoryHandler, GetCreditHistoryQuery};
pub use get_credits::{GetCreditsHandler, GetCreditsQuery, GetCreditsResult};
