//! Name generation history queries.

mod list_generation_logs;

pub use list_generation_logs::{ListGenerationLogsHandler, ListGenerationLogsQuery};
