//! PDF text extraction

use crate::PageError;

/// Checks a Content-Type header value for PDF
pub fn is_pdf_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("application/pdf")
}

/// Extracts the text of every page of a PDF document, in page order
///
/// The parser is CPU-bound and can panic on malformed input, so it runs on a
/// blocking thread; a panic there surfaces as a [`PageError::Pdf`].
pub async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String, PageError> {
    let joined =
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await;

    match joined {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(PageError::Pdf(e.to_string())),
        Err(e) if e.is_panic() => Err(PageError::Pdf(
            "parser panicked on malformed document".to_string(),
        )),
        Err(e) => Err(PageError::Pdf(e.to_string())),
    }
}
