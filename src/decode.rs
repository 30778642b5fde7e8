//! Document-to-text decoding.
//!
//! [`PdfDecoder`] wraps `pdf-extract`. Its output is lower-cased, so every
//! extraction rule downstream sees case-folded text.

use crate::fetch::RawDocument;
use crate::utils::truncate_for_log;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;
use tracing::{debug, instrument};

/// Lower-cased plain text rendered from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn new(text: &str) -> Self {
        Self(text.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to parse PDF: {0}")]
    Malformed(String),

    #[error("PDF decoder panicked: {0}")]
    Panicked(String),
}

/// Turn raw document bytes into searchable text.
pub trait Decode {
    fn decode(&self, doc: &RawDocument) -> Result<ExtractedText, DecodeError>;
}

/// Text-only PDF decoder; layout, tables and images are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfDecoder;

impl Decode for PdfDecoder {
    #[instrument(level = "info", skip_all, fields(url = %doc.url, bytes = doc.bytes.len()))]
    fn decode(&self, doc: &RawDocument) -> Result<ExtractedText, DecodeError> {
        // pdf-extract panics on some malformed font tables.
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(&doc.bytes)
        }));

        let text = match result {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => return Err(DecodeError::Malformed(e.to_string())),
            Err(payload) => {
                let msg = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                return Err(DecodeError::Panicked(msg));
            }
        };

        debug!(
            chars = text.len(),
            preview = %truncate_for_log(text.trim(), 120),
            "Decoded PDF text"
        );
        Ok(ExtractedText::new(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracted_text_is_lowercased() {
        let text = ExtractedText::new("Established In 1990, Located In CHENNAI.");
        assert_eq!(text.as_str(), "established in 1990, located in chennai.");
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let doc = RawDocument {
            url: "https://example.com/not-a.pdf".to_string(),
            bytes: b"<html><body>not a pdf</body></html>".to_vec(),
        };
        assert!(PdfDecoder.decode(&doc).is_err());
    }

    #[test]
    fn test_empty_body_fails_to_decode() {
        let doc = RawDocument {
            url: "https://example.com/empty.pdf".to_string(),
            bytes: Vec::new(),
        };
        assert!(PdfDecoder.decode(&doc).is_err());
    }
}
