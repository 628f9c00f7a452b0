//! Document adapters - Implementations of the `DocumentRenderer` port.
//!
//! - `ChromiumRenderer` - Headless browser `--print-to-pdf`
//! - `MockRenderer` - Canned output for tests

mod chromium_renderer;
mod mock_renderer;

pub use chromium_renderer::{ChromiumRenderer, DEFAULT_RENDER_TIMEOUT_SECS};
pub use mock_renderer::{MockRenderer, MOCK_PDF_BYTES};
