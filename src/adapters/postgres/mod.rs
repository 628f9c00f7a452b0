//! PostgreSQL adapters - Database implementations for persistence ports.
//!
//! - `PostgresCreditLedger` - Balances and credit history with atomic charges
//! - `PostgresGenerationLogReader` - Read-only generation history queries

mod credit_ledger;
mod generation_log_reader;

pub use credit_ledger::PostgresCreditLedger;
pub use generation_log_reader::PostgresGenerationLogReader;
