use crate::error::CatalogError;
use crate::extraction::{PageContent, PdfExtractor};
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Defaults to reading-order output, which keeps each catalog row on one
/// line with single spaces between words. `-layout` mode pads columns with
/// runs of spaces instead.
pub struct PdftotextExtractor {
    program: String,
    layout: bool,
}

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor {
            program: "pdftotext".to_string(),
            layout: false,
        }
    }

    /// Run a different executable, e.g. an absolute path to pdftotext.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Use `pdftotext -layout` to preserve column alignment.
    pub fn with_layout(mut self, layout: bool) -> Self {
        self.layout = layout;
        self
    }

    /// Whether the executable can be started; `pdftotext -v` prints its
    /// version to stderr.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }

    /// Fail with `PdftotextNotFound` before any input is read.
    pub fn ensure_available(&self) -> Result<(), CatalogError> {
        if self.is_available() {
            Ok(())
        } else {
            Err(CatalogError::PdftotextNotFound)
        }
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, CatalogError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| CatalogError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| CatalogError::Extraction(e.to_string()))?;

        let mut cmd = Command::new(&self.program);
        cmd.args(["-enc", "UTF-8"]);
        if self.layout {
            cmd.arg("-layout");
        }
        let output = cmd
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CatalogError::PdftotextNotFound
                } else {
                    CatalogError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(CatalogError::PdftotextFailed { code, stderr });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(split_pages(&text))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// pdftotext ends every page with a form feed, so the last chunk is empty.
fn split_pages(text: &str) -> Vec<PageContent> {
    let mut chunks: Vec<&str> = text.split('\x0c').collect();
    if chunks.len() > 1 && chunks.last().is_some_and(|c| c.trim().is_empty()) {
        chunks.pop();
    }

    chunks
        .into_iter()
        .enumerate()
        .map(|(i, page_text)| PageContent {
            page_number: i + 1,
            text: page_text.to_string(),
        })
        .collect()
}
