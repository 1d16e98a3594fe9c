//! Text extraction from uploaded resumes.
//!
//! PDF goes through `pdf-extract` (via a scoped temp file), DOCX through
//! `docx-rs` in memory, everything else is decoded as lossy UTF-8.
//! `extract` is the async entry point and never fails.

use std::io::Write;
use std::path::Path;

use bytes::Bytes;
use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Plain,
}

impl DocumentKind {
    /// Classifies an upload by its file extension. Unknown or missing
    /// extensions fall through to plain text.
    pub fn from_file_name(file_name: Option<&str>) -> Self {
        let extension = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => DocumentKind::Pdf,
            Some("docx") | Some("doc") => DocumentKind::Docx,
            _ => DocumentKind::Plain,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Temp file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

/// Extracts text on the blocking pool. Errors and parser panics are logged
/// and degrade to an empty string.
pub async fn extract(bytes: Bytes, kind: DocumentKind) -> String {
    let size = bytes.len();
    match tokio::task::spawn_blocking(move || extract_text(&bytes, kind)).await {
        Ok(Ok(text)) => {
            debug!("Extracted {} chars from {size} byte {kind:?} upload", text.len());
            text
        }
        Ok(Err(e)) => {
            warn!("Text extraction failed for {kind:?} upload: {e}");
            String::new()
        }
        Err(e) => {
            warn!("Text extraction aborted for {kind:?} upload: {e}");
            String::new()
        }
    }
}

/// Blocking extraction. Empty input is always `Ok("")`.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractError> {
    if bytes.is_empty() {
        return Ok(String::new());
    }

    match kind {
        DocumentKind::Pdf => pdf_text_in(&std::env::temp_dir(), bytes),
        DocumentKind::Docx => docx_text(bytes),
        DocumentKind::Plain => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

/// Extracts PDF text page by page, pages joined with `\n`. The upload is
/// staged as a temp file in `dir`, removed when `tmp` drops on every exit path.
fn pdf_text_in(dir: &Path, bytes: &[u8]) -> Result<String, ExtractError> {
    let mut tmp = tempfile::Builder::new()
        .prefix("resume-upload-")
        .suffix(".pdf")
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;

    let pages = pdf_extract::extract_text_by_pages(tmp.path())
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;

    Ok(pages.join("\n"))
}

/// Joins the text of every top-level paragraph with newlines.
pub fn docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(paragraph_text(&para.children)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

/// Runs in order, descending into hyperlinks (emails, profile links).
fn paragraph_text(children: &[ParagraphChild]) -> String {
    children
        .iter()
        .map(|pc| match pc {
            ParagraphChild::Run(run) => run_text(&run.children),
            ParagraphChild::Hyperlink(link) => paragraph_text(&link.children),
            _ => String::new(),
        })
        .collect()
}

fn run_text(children: &[RunChild]) -> String {
    children
        .iter()
        .filter_map(|rc| match rc {
            RunChild::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::fixtures::pdf_with_pages;
    use super::*;
    use docx_rs::{Docx, Hyperlink, HyperlinkType, Paragraph, Run};

    fn sample_docx(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        let mut buf = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_kind_from_file_name() {
        assert_eq!(DocumentKind::from_file_name(Some("cv.PDF")), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_file_name(Some("cv.docx")), DocumentKind::Docx);
        assert_eq!(DocumentKind::from_file_name(Some("old.doc")), DocumentKind::Docx);
        assert_eq!(DocumentKind::from_file_name(Some("notes.md")), DocumentKind::Plain);
        assert_eq!(DocumentKind::from_file_name(Some("README")), DocumentKind::Plain);
        assert_eq!(DocumentKind::from_file_name(None), DocumentKind::Plain);
    }

    #[test]
    fn test_empty_bytes_yield_empty_text_for_every_kind() {
        for kind in [DocumentKind::Pdf, DocumentKind::Docx, DocumentKind::Plain] {
            assert_eq!(extract_text(b"", kind).unwrap(), "");
        }
    }

    #[test]
    fn test_plain_text_replaces_invalid_utf8() {
        let text = extract_text(b"Jane \xFF\xFE Doe", DocumentKind::Plain).unwrap();
        assert!(text.starts_with("Jane "));
        assert!(text.ends_with(" Doe"));
    }

    #[test]
    fn test_docx_paragraphs_joined_in_order() {
        let bytes = sample_docx(&["Jane Doe", "", "Rust engineer"]);
        let text = extract_text(&bytes, DocumentKind::Docx).unwrap();
        assert_eq!(text, "Jane Doe\n\nRust engineer");
    }

    #[test]
    fn test_corrupt_docx_is_an_error_for_blocking_api() {
        assert!(matches!(
            extract_text(b"definitely not a zip", DocumentKind::Docx),
            Err(ExtractError::Docx(_))
        ));
    }

    #[tokio::test]
    async fn test_extract_never_fails_on_garbage() {
        let garbage = Bytes::from_static(b"%PDF-garbage-without-xref");
        assert_eq!(extract(garbage.clone(), DocumentKind::Pdf).await, "");
        assert_eq!(extract(garbage, DocumentKind::Docx).await, "");
    }

    #[tokio::test]
    async fn test_extract_empty_upload() {
        for kind in [DocumentKind::Pdf, DocumentKind::Docx, DocumentKind::Plain] {
            assert_eq!(extract(Bytes::new(), kind).await, "");
        }
    }

    fn non_empty_lines(text: &str) -> Vec<&str> {
        text.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
    }

    fn staged_files(dir: &Path) -> Vec<std::path::PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }

    #[test]
    fn test_pdf_pages_are_separated_by_newlines() {
        let bytes = pdf_with_pages(&["Page one python", "Page two react"]);
        let text = extract_text(&bytes, DocumentKind::Pdf).unwrap();

        assert_eq!(
            non_empty_lines(&text),
            vec!["Page one python", "Page two react"]
        );
    }

    #[test]
    fn test_pdf_temp_file_removed_after_success() {
        let dir = tempfile::tempdir().unwrap();
        let text = pdf_text_in(dir.path(), &pdf_with_pages(&["Jane Doe"])).unwrap();

        assert!(text.contains("Jane Doe"));
        assert!(staged_files(dir.path()).is_empty());
    }

    #[test]
    fn test_pdf_temp_file_removed_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let result = pdf_text_in(dir.path(), b"%PDF-garbage-without-xref");

        assert!(matches!(result, Err(ExtractError::Pdf(_))));
        assert!(staged_files(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_extract_reads_valid_pdf() {
        let bytes = Bytes::from(pdf_with_pages(&["Senior Rust Engineer"]));
        let text = extract(bytes, DocumentKind::Pdf).await;
        assert_eq!(non_empty_lines(&text), vec!["Senior Rust Engineer"]);
    }

    #[test]
    fn test_docx_hyperlink_text_is_kept() {
        let docx = Docx::new().add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text("Profile: "))
                .add_hyperlink(
                    Hyperlink::new("https://linkedin.com/in/jane", HyperlinkType::External)
                        .add_run(Run::new().add_text("linkedin.com/in/jane")),
                ),
        );
        let mut buf = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();

        let text = extract_text(&buf.into_inner(), DocumentKind::Docx).unwrap();
        assert_eq!(text, "Profile: linkedin.com/in/jane");
    }
}
