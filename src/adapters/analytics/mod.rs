//! Analytics sink adapters.

mod in_memory;
mod tracing_sink;

pub use in_memory::InMemoryAnalyticsSink;
pub use tracing_sink::TracingAnalyticsSink;
