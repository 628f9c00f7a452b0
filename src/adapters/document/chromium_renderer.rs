//! Headless Chromium PDF renderer.
//!
//! Writes the HTML to a scratch directory and runs the browser with
//! `--print-to-pdf`. Paper size and margins are injected as an `@page`
//! rule because the command line has no flags for them.
//!
//! The browser binary is probed once, on first use. A missing browser
//! makes every render fail with `RenderError::Unavailable`.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::OnceCell;

use crate::ports::{DocumentRenderer, RenderError, RenderOptions};

/// Default wall-clock limit for one render.
pub const DEFAULT_RENDER_TIMEOUT_SECS: u64 = 30;

/// Renders HTML to PDF with a headless Chromium or Chrome binary.
#[derive(Debug)]
pub struct ChromiumRenderer {
    /// Path to the browser executable. If None, `chromium` is searched on PATH.
    chromium_path: Option<String>,

    timeout_secs: u64,

    /// Result of the one-time `--version` probe.
    available: OnceCell<bool>,
}

impl Default for ChromiumRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChromiumRenderer {
    pub fn new() -> Self {
        Self {
            chromium_path: None,
            timeout_secs: DEFAULT_RENDER_TIMEOUT_SECS,
            available: OnceCell::new(),
        }
    }

    /// Set a custom path to the browser executable.
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    fn command(&self) -> &str {
        self.chromium_path.as_deref().unwrap_or("chromium")
    }

    async fn probe(&self) -> bool {
        let output = Command::new(self.command())
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await;

        let ok = output.map(|o| o.status.success()).unwrap_or(false);
        if ok {
            tracing::info!(command = %self.command(), "Chromium renderer available");
        } else {
            tracing::warn!(command = %self.command(), "Chromium renderer not found");
        }
        ok
    }

    async fn print_to_pdf(&self, input: &Path, output: &Path) -> Result<(), RenderError> {
        let child = Command::new(self.command())
            .args([
                "--headless",
                "--disable-gpu",
                "--no-sandbox",
                "--no-pdf-header-footer",
            ])
            .arg(format!("--print-to-pdf={}", output.display()))
            .arg(format!("file://{}", input.display()))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| RenderError::unavailable(format!("Failed to start Chromium: {}", e)))?;

        let result = tokio::time::timeout(
            Duration::from_secs(self.timeout_secs),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| RenderError::Timeout(self.timeout_secs))?
        .map_err(|e| RenderError::failed(format!("Chromium execution failed: {}", e)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(RenderError::failed(format!(
                "Chromium returned error: {}",
                stderr.trim()
            )));
        }
        Ok(())
    }
}

/// `@page` rule matching the requested paper and margins.
fn page_style(options: &RenderOptions) -> String {
    let (width, height) = options.format.size_inches();
    let m = options.margins;
    let background = if options.print_background {
        "html { -webkit-print-color-adjust: exact; print-color-adjust: exact; }"
    } else {
        ""
    };
    format!(
        "<style>@page {{ size: {}in {}in; margin: {}mm {}mm {}mm {}mm; }} {}</style>",
        width, height, m.top, m.right, m.bottom, m.left, background
    )
}

/// Puts the page style at the start of `<head>`, or in front of the
/// document when there is no head.
fn with_page_style(html: &str, options: &RenderOptions) -> String {
    let style = page_style(options);
    match html.find("<head>") {
        Some(idx) => {
            let at = idx + "<head>".len();
            format!("{}{}{}", &html[..at], style, &html[at..])
        }
        None => format!("{}{}", style, html),
    }
}

#[async_trait]
impl DocumentRenderer for ChromiumRenderer {
    async fn render(&self, html: &str, options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
        if !self.is_available().await {
            return Err(RenderError::unavailable(format!(
                "'{}' is not installed or not executable",
                self.command()
            )));
        }

        let dir = tempfile::tempdir()
            .map_err(|e| RenderError::failed(format!("Failed to create scratch dir: {}", e)))?;
        let input = dir.path().join("document.html");
        let output = dir.path().join("document.pdf");

        tokio::fs::write(&input, with_page_style(html, options))
            .await
            .map_err(|e| RenderError::failed(format!("Failed to write HTML: {}", e)))?;

        self.print_to_pdf(&input, &output).await?;

        let bytes = tokio::fs::read(&output)
            .await
            .map_err(|e| RenderError::failed(format!("Chromium produced no PDF: {}", e)))?;
        if bytes.is_empty() {
            return Err(RenderError::failed("Chromium produced an empty PDF"));
        }

        tracing::debug!(bytes = bytes.len(), "Rendered PDF");
        Ok(bytes)
    }

    async fn is_available(&self) -> bool {
        *self.available.get_or_init(|| self.probe()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Margins, PageFormat};

    #[test]
    fn builder_sets_path_and_timeout() {
        let renderer = ChromiumRenderer::new()
            .with_chromium_path("/usr/bin/google-chrome")
            .with_timeout(60);
        assert_eq!(renderer.command(), "/usr/bin/google-chrome");
        assert_eq!(renderer.timeout_secs, 60);
    }

    #[test]
    fn defaults_search_path() {
        let renderer = ChromiumRenderer::default();
        assert_eq!(renderer.command(), "chromium");
        assert_eq!(renderer.timeout_secs, DEFAULT_RENDER_TIMEOUT_SECS);
    }

    #[test]
    fn page_style_is_injected_into_head() {
        let html = "<html><head><title>x</title></head><body></body></html>";
        let styled = with_page_style(html, &RenderOptions::certificate());
        assert!(styled.starts_with("<html><head><style>@page"));
        assert!(styled.contains("size: 8.27in 11.69in"));
        assert!(styled.contains("margin: 20mm 20mm 20mm 20mm"));
        assert!(styled.contains("<title>x</title>"));
    }

    #[test]
    fn page_style_prepended_without_head() {
        let options = RenderOptions {
            format: PageFormat::Letter,
            margins: Margins::uniform(10.0),
            print_background: false,
        };
        let styled = with_page_style("<p>hi</p>", &options);
        assert!(styled.starts_with("<style>@page { size: 8.5in 11in; margin: 10mm"));
        assert!(styled.ends_with("<p>hi</p>"));
        assert!(!styled.contains("print-color-adjust"));
    }

    #[tokio::test]
    async fn missing_binary_is_unavailable() {
        let renderer = ChromiumRenderer::new().with_chromium_path("/nonexistent/chromium-binary");

        assert!(!renderer.is_available().await);
        let result = renderer
            .render("<html></html>", &RenderOptions::certificate())
            .await;
        assert!(matches!(result, Err(RenderError::Unavailable(_))));
    }
}
