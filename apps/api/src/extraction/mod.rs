//! Document text extraction: turns uploaded file bytes into resume text.
//!
//! Contract: bytes in, text out. Unsupported or unreadable input fails with
//! `ExtractionError`; it is never passed to the scorer as raw bytes.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use bytes::Bytes;
use thiserror::Error;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported document type: {0}")]
    Unsupported(String),

    #[error("Document could not be read: {0}")]
    Corrupt(String),

    #[error("Document contains no extractable text")]
    Empty,
}

/// Extracts plain text from one document format.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        // pdf-extract panics on some malformed inputs instead of returning Err
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(bytes)
        }));
        match result {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ExtractionError::Corrupt(e.to_string())),
            Err(_) => Err(ExtractionError::Corrupt("malformed PDF".to_string())),
        }
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        String::from_utf8(bytes.to_vec())
            .map_err(|_| ExtractionError::Corrupt("text is not valid UTF-8".to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Resolves the document kind from, in order: the declared media type, the
    /// file extension, then the leading magic bytes.
    pub fn detect(
        file_name: Option<&str>,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<Self, ExtractionError> {
        if let Some(kind) = content_type.and_then(Self::from_media_type) {
            return Ok(kind);
        }
        if let Some(kind) = file_name.and_then(Self::from_file_name) {
            return Ok(kind);
        }
        if bytes.starts_with(PDF_MAGIC) {
            return Ok(DocumentKind::Pdf);
        }

        let described = content_type
            .filter(|t| !is_generic_media_type(t))
            .or(file_name)
            .unwrap_or("unknown");
        Err(ExtractionError::Unsupported(described.to_string()))
    }

    fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type.split(';').next().unwrap_or("").trim();
        match essence.to_ascii_lowercase().as_str() {
            "application/pdf" => Some(DocumentKind::Pdf),
            "text/plain" | "text/markdown" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }

    fn from_file_name(file_name: &str) -> Option<Self> {
        let ext = Path::new(file_name).extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "txt" | "md" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }
}

fn is_generic_media_type(media_type: &str) -> bool {
    media_type.is_empty() || media_type.starts_with("application/octet-stream")
}

/// An uploaded file, from either the JSON upload flow or a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Dispatches an upload to the extractor for its kind.
pub struct DocumentExtractor {
    pdf: Box<dyn TextExtractor>,
    plain: Box<dyn TextExtractor>,
}

impl Default for DocumentExtractor {
    fn default() -> Self {
        Self::new(Box::new(PdfTextExtractor), Box::new(PlainTextExtractor))
    }
}

impl DocumentExtractor {
    pub fn new(pdf: Box<dyn TextExtractor>, plain: Box<dyn TextExtractor>) -> Self {
        Self { pdf, plain }
    }

    pub fn extract(&self, document: &UploadedDocument) -> Result<String, ExtractionError> {
        if document.bytes.is_empty() {
            return Err(ExtractionError::Empty);
        }

        let kind = DocumentKind::detect(
            document.file_name.as_deref(),
            document.content_type.as_deref(),
            &document.bytes,
        )?;

        let text = match kind {
            DocumentKind::Pdf => self.pdf.extract(&document.bytes)?,
            DocumentKind::PlainText => self.plain.extract(&document.bytes)?,
        };

        if text.trim().is_empty() {
            return Err(ExtractionError::Empty);
        }
        Ok(text)
    }
}

/// Builds a one-page PDF that shows `lines` in Helvetica, one per line.
#[cfg(test)]
pub(crate) fn sample_pdf(lines: &[&str]) -> Vec<u8> {
    let mut content = String::from("BT\n/F1 12 Tf\n72 720 Td\n");
    for line in lines {
        let escaped = line
            .replace('\\', "\\\\")
            .replace('(', "\\(")
            .replace(')', "\\)");
        content.push_str(&format!("({escaped}) Tj\n0 -16 Td\n"));
    }
    content.push_str("ET");

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, object) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{object}\nendobj\n", i + 1).as_bytes());
    }

    let xref_offset = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        objects.len() + 1
    ));
    pdf.extend_from_slice(xref.as_bytes());
    pdf
}
