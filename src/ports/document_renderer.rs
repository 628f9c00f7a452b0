//! Document Renderer Port - HTML to PDF conversion.
//!
//! Rendering runs in an external process (a headless browser), so the port
//! distinguishes "renderer not installed or not reachable" from "rendering
//! this document failed".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port for rendering a complete HTML document to PDF bytes.
///
/// # Contract
///
/// Implementations must:
/// - Return `RenderError::Unavailable` when the renderer cannot run at all
/// - Return `RenderError::Failed` when the renderer ran and failed
/// - Return `RenderError::Timeout` when rendering exceeded its time limit
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// Render `html` to a PDF document.
    async fn render(&self, html: &str, options: &RenderOptions) -> Result<Vec<u8>, RenderError>;

    /// Check whether the renderer can run.
    async fn is_available(&self) -> bool;
}

/// Paper size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    #[default]
    A4,
    Letter,
}

impl PageFormat {
    /// Paper size in inches (width, height).
    pub fn size_inches(&self) -> (f32, f32) {
        match self {
            PageFormat::A4 => (8.27, 11.69),
            PageFormat::Letter => (8.5, 11.0),
        }
    }
}

/// Page margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn uniform(mm: f32) -> Self {
        Self {
            top: mm,
            right: mm,
            bottom: mm,
            left: mm,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(20.0)
    }
}

/// Layout options for a render.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderOptions {
    pub format: PageFormat,
    pub margins: Margins,
    #[serde(default)]
    pub print_background: bool,
}

impl RenderOptions {
    /// A4 with 20 mm margins and backgrounds on, used for name certificates.
    pub fn certificate() -> Self {
        Self {
            format: PageFormat::A4,
            margins: Margins::default(),
            print_background: true,
        }
    }
}

/// Errors that can occur while rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The renderer binary is missing or cannot be started.
    #[error("Renderer unavailable: {0}")]
    Unavailable(String),

    /// The renderer ran but produced no usable document.
    #[error("Rendering failed: {0}")]
    Failed(String),

    /// Rendering exceeded its time limit.
    #[error("Rendering timed out after {0} seconds")]
    Timeout(u64),
}

impl RenderError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certificate_options_use_a4() {
        let options = RenderOptions::certificate();
        assert_eq!(options.format, PageFormat::A4);
        assert!(options.print_background);
        assert_eq!(options.margins, Margins::uniform(20.0));
    }

    #[test]
    fn render_error_displays_reason() {
        assert_eq!(
            RenderError::unavailable("chromium not found").to_string(),
            "Renderer unavailable: chromium not found"
        );
        assert_eq!(RenderError::Timeout(30).to_string(), "Rendering timed out after 30 seconds");
    }

    #[test]
    fn a4_is_taller_than_letter() {
        assert!(PageFormat::A4.size_inches().1 > PageFormat::Letter.size_inches().1);
    }
}
