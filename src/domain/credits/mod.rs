//! Credits domain module.
//!
//! Balances, append-only credit history and the charge protocol used by
//! paid operations.
//!
//! # Module Structure
//!
//! - `balance` - Current spendable credits per customer
//! - `transaction` - Append-only history rows
//! - `ledger` - Charges, receipts and replay
//! - `errors` - LedgerError

mod balance;
mod errors;
mod ledger;
mod transaction;

pub use balance::CreditBalance;
pub use errors::LedgerError;
pub use ledger::{replay, Charge, ChargeReceipt};
pub use transaction::{CreditTransaction, TransactionType};
