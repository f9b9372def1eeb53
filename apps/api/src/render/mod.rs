//! PDF rendering: hands finished HTML to headless Chromium.
//!
//! The HTML is written to a scratch directory, printed with `--print-to-pdf`,
//! and the resulting file is read back. Page size comes from the document's
//! `@page` rule; A4 is injected when the HTML has none.

pub mod handlers;

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

const A4_PAGE_RULE: &str = "<style>@page { size: A4; }</style>";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to launch renderer '{binary}': {source}")]
    Launch {
        binary: String,
        source: std::io::Error,
    },

    #[error("Renderer exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Renderer timed out after {0:?}")]
    Timeout(Duration),

    #[error("Renderer produced an empty document")]
    Empty,
}

#[async_trait]
pub trait RenderGateway: Send + Sync {
    async fn render(&self, html: &str) -> Result<Bytes, RenderError>;
}

#[derive(Debug, Clone)]
pub struct ChromiumRenderer {
    binary: PathBuf,
    timeout: Duration,
}

impl ChromiumRenderer {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }
}

#[async_trait]
impl RenderGateway for ChromiumRenderer {
    async fn render(&self, html: &str) -> Result<Bytes, RenderError> {
        let scratch = tempfile::tempdir()?;
        let input = scratch.path().join("cv.html");
        let output = scratch.path().join("cv.pdf");
        tokio::fs::write(&input, ensure_page_size(html)).await?;

        let mut command = Command::new(&self.binary);
        command
            .arg("--headless")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--no-pdf-header-footer")
            .arg(format!("--print-to-pdf={}", output.display()))
            .arg(format!("file://{}", input.display()))
            .kill_on_drop(true);

        debug!("Launching renderer {}", self.binary.display());
        let result = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| RenderError::Timeout(self.timeout))?
            .map_err(|source| RenderError::Launch {
                binary: self.binary.display().to_string(),
                source,
            })?;

        if !result.status.success() {
            return Err(RenderError::Failed {
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        let pdf = tokio::fs::read(&output).await?;
        if pdf.is_empty() {
            return Err(RenderError::Empty);
        }

        info!("Rendered PDF ({} bytes)", pdf.len());
        Ok(Bytes::from(pdf))
    }
}

/// Adds an A4 `@page` rule when no `<style>` block in the HTML declares one.
pub fn ensure_page_size(html: &str) -> String {
    if declares_page_rule(html) {
        return html.to_string();
    }
    match html.find("</head>") {
        Some(idx) => format!("{}{}{}", &html[..idx], A4_PAGE_RULE, &html[idx..]),
        None => format!("{A4_PAGE_RULE}{html}"),
    }
}

/// True when some `<style>` block contains an `@page` rule. Body text is ignored.
fn declares_page_rule(html: &str) -> bool {
    let mut rest = html;
    while let Some(open) = rest.find("<style") {
        let body = &rest[open..];
        let Some(start) = body.find('>') else {
            return false;
        };
        let body = &body[start + 1..];
        let end = body.find("</style>").unwrap_or(body.len());
        if body[..end].contains("@page") {
            return true;
        }
        rest = &body[end..];
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_page_rule_is_kept() {
        let html = "<html><head><style>@page { size: Letter; }</style></head></html>";
        assert_eq!(ensure_page_size(html), html);
    }

    #[test]
    fn test_page_rule_is_injected_into_head() {
        let html = "<html><head><title>x</title></head><body></body></html>";
        let out = ensure_page_size(html);
        assert!(out.contains("<title>x</title><style>@page { size: A4; }</style></head>"));
    }

    #[test]
    fn test_page_text_outside_stylesheets_is_ignored() {
        let html = "<html><head><style>body { margin: 0; }</style></head>\
                    <body><p>Expert in @page layout</p></body></html>";
        let out = ensure_page_size(html);
        assert!(out.contains("<style>@page { size: A4; }</style></head>"));
        assert!(out.contains("Expert in @page layout"));
    }

    #[test]
    fn test_page_rule_in_second_stylesheet_is_kept() {
        let html = "<head><style>p {}</style><style media=\"print\">@page { size: A5; }</style></head>";
        assert_eq!(ensure_page_size(html), html);
    }

    #[test]
    fn test_page_rule_is_prepended_without_head() {
        assert_eq!(
            ensure_page_size("<p>hi</p>"),
            "<style>@page { size: A4; }</style><p>hi</p>"
        );
    }

    #[tokio::test]
    async fn test_missing_binary_is_a_launch_error() {
        let renderer = ChromiumRenderer::new(
            "/nonexistent/jobpath-test-chromium",
            Duration::from_secs(5),
        );
        let err = renderer.render("<p>hi</p>").await.unwrap_err();
        assert!(matches!(err, RenderError::Launch { .. }));
    }
}
