//! In-memory adapters for tests and local development.
//!
//! Not suitable for production: state is lost on restart and not shared
//! between processes.

mod credit_ledger;
mod generation_log_reader;

pub use credit_ledger::InMemoryCreditLedger;
pub use generation_log_reader::InMemoryGenerationLogReader;
