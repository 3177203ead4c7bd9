//! Text Extractor — turns an uploaded PDF into a plain-text transcript.
//!
//! Page text is concatenated in page order with no separator. Parsing is
//! CPU-bound and runs inside `tokio::task::spawn_blocking`.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Error extracting text from PDF: {0}")]
    Parse(String),

    #[error("Error extracting text from PDF: extraction task failed: {0}")]
    Task(String),
}

/// One uploaded file, held in memory for the lifetime of a single request.
#[derive(Debug, Clone)]
pub struct Document {
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

impl Document {
    pub fn new(file_name: Option<String>, bytes: Bytes) -> Self {
        Self { file_name, bytes }
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}

/// Extracts the full text of `document` off the async runtime.
///
/// A panic inside the PDF parser surfaces as `ExtractionError::Task` instead
/// of taking down the worker thread.
pub async fn extract_text(document: &Document) -> Result<String, ExtractionError> {
    let bytes = document.bytes.clone();
    tokio::task::spawn_blocking(move || extract_text_blocking(&bytes))
        .await
        .map_err(|e| ExtractionError::Task(e.to_string()))?
}

/// Synchronous extraction: per-page text joined in document order.
pub fn extract_text_blocking(bytes: &[u8]) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractionError::Parse(e.to_string()))?;
    debug!("Extracted {} page(s) from PDF", pages.len());
    Ok(join_pages(pages))
}

/// Concatenates page texts with no separator. Textless pages add nothing.
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    pages.into_iter().fold(String::new(), |mut text, page| {
        text.push_str(page.as_ref());
        text
    })
}
