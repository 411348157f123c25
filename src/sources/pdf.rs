use std::sync::Arc;

use crate::error::{Error, Result};

/// Turns document bytes into plain text, pages concatenated.
pub trait PdfDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<String>;
}

/// Decoder backed by the `pdf-extract` crate.
///
/// Input that does not carry a PDF header but is valid UTF-8 is taken to be
/// text that was already extracted upstream.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractDecoder;

impl PdfDecoder for PdfExtractDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<String> {
        if bytes.is_empty() {
            return Err(Error::Parse("document: input is empty".to_string()));
        }

        if bytes.starts_with(b"%PDF") {
            return pdf_extract::extract_text_from_mem(bytes)
                .map_err(|e| Error::Parse(format!("PDF document: {:?}", e)));
        }

        String::from_utf8(bytes.to_vec()).map_err(|_| {
            Error::Parse("document: input is neither a PDF nor UTF-8 text".to_string())
        })
    }
}

/// Runs the decoder on the blocking pool. A decoder that panics on a
/// malformed document is reported as a parse failure.
pub async fn decode_document(
    decoder: Arc<dyn PdfDecoder>,
    bytes: Vec<u8>,
    label: &str,
) -> Result<String> {
    let decoded = tokio::task::spawn_blocking(move || decoder.decode(&bytes))
        .await
        .map_err(|e| Error::Parse(format!("{}: decoder aborted ({})", label, e)))?;

    match decoded {
        Ok(text) if text.trim().is_empty() => {
            Err(Error::Parse(format!("{}: no text could be extracted", label)))
        }
        Ok(text) => Ok(text),
        Err(Error::Parse(message)) => Err(Error::Parse(format!("{} ({})", label, message))),
        Err(e) => Err(e),
    }
}
