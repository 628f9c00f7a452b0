//! Mock document renderer for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::ports::{DocumentRenderer, RenderError, RenderOptions};

/// Minimal bytes that look like a PDF to content sniffers.
pub const MOCK_PDF_BYTES: &[u8] = b"%PDF-1.4\n% mingzi mock\n%%EOF\n";

#[derive(Debug, Clone)]
enum Mode {
    Available,
    Unavailable,
    Failing(RenderError),
}

/// Renderer returning canned bytes.
///
/// Counts render attempts and remembers the last HTML so tests can assert
/// that a denied request never reached the renderer.
#[derive(Debug)]
pub struct MockRenderer {
    mode: Mode,
    output: Vec<u8>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_html: Mutex<Option<String>>,
}

impl Default for MockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRenderer {
    pub fn new() -> Self {
        Self {
            mode: Mode::Available,
            output: MOCK_PDF_BYTES.to_vec(),
            delay: None,
            calls: AtomicUsize::new(0),
            last_html: Mutex::new(None),
        }
    }

    /// A renderer that reports itself as not installed.
    pub fn unavailable() -> Self {
        Self {
            mode: Mode::Unavailable,
            ..Self::new()
        }
    }

    /// A renderer that is available but fails every render.
    pub fn failing(error: RenderError) -> Self {
        Self {
            mode: Mode::Failing(error),
            ..Self::new()
        }
    }

    pub fn with_output(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.output = bytes.into();
        self
    }

    /// Each render sleeps this long on the tokio clock first.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of render attempts.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_html(&self) -> Option<String> {
        self.last_html
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl DocumentRenderer for MockRenderer {
    async fn render(&self, html: &str, _options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .last_html
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(html.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.mode {
            Mode::Available => Ok(self.output.clone()),
            Mode::Unavailable => Err(RenderError::unavailable("mock renderer is unavailable")),
            Mode::Failing(error) => Err(error.clone()),
        }
    }

    async fn is_available(&self) -> bool {
        !matches!(self.mode, Mode::Unavailable)
    }
}
