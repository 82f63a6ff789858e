//! Text extraction for uploaded résumés.
//!
//! Binary parsing is delegated to `pdf-extract` and `docx-rs`. A document
//! those libraries cannot read is a soft failure: the error description comes
//! back as the document text and flows through the rest of the pipeline.

use std::fmt;

use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use tracing::{debug, warn};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    Pdf,
    Docx,
    Txt,
}

impl DocumentType {
    /// Resolves the allow-listed type from the text after the last `.`.
    /// Returns `None` for names without an extension or with any other one.
    pub fn from_filename(filename: &str) -> Option<DocumentType> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_lowercase().as_str() {
            "pdf" => Some(DocumentType::Pdf),
            "docx" => Some(DocumentType::Docx),
            "txt" => Some(DocumentType::Txt),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentType::Pdf => "pdf",
            DocumentType::Docx => "docx",
            DocumentType::Txt => "txt",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DocumentType::Pdf => "PDF",
            DocumentType::Docx => "DOCX",
            DocumentType::Txt => "TXT",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Outcome of reading a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Text(String),
    /// The parser rejected the document. Rendered as text by `into_text`.
    SoftFailure {
        doc_type: DocumentType,
        message: String,
    },
}

impl Extraction {
    pub fn into_text(self) -> String {
        match self {
            Extraction::Text(text) => text,
            Extraction::SoftFailure { doc_type, message } => {
                format!("Error reading {}: {message}", doc_type.label())
            }
        }
    }
}

/// Extracts plain text from `bytes` according to `doc_type`.
///
/// Only plain-text decoding can fail hard; PDF and DOCX failures come back
/// as [`Extraction::SoftFailure`].
pub async fn extract(bytes: Vec<u8>, doc_type: DocumentType) -> Result<Extraction, AppError> {
    let extraction = match doc_type {
        DocumentType::Txt => Extraction::Text(decode_utf8(bytes)?),
        DocumentType::Pdf => extract_pdf(bytes).await,
        DocumentType::Docx => extract_docx(&bytes),
    };

    match &extraction {
        Extraction::Text(text) => debug!("Extracted {} chars from {doc_type}", text.len()),
        Extraction::SoftFailure { message, .. } => {
            warn!("Could not parse {doc_type} upload: {message}")
        }
    }

    Ok(extraction)
}

/// Decodes UTF-8 and folds `\r\n` and lone `\r` line endings into `\n`.
fn decode_utf8(bytes: Vec<u8>) -> Result<String, AppError> {
    let text = String::from_utf8(bytes).map_err(|e| {
        AppError::Extraction(format!("'utf-8' codec can't decode upload: {}", e.utf8_error()))
    })?;
    Ok(normalize_newlines(text))
}

fn normalize_newlines(text: String) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text
    }
}

/// PDF parsing is CPU-bound and `pdf-extract` panics on some malformed
/// inputs, so it runs on the blocking pool where a panic surfaces as a
/// `JoinError` instead of taking the worker down.
async fn extract_pdf(bytes: Vec<u8>) -> Extraction {
    let result =
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem_by_pages(&bytes))
            .await;

    match result {
        Ok(Ok(pages)) => Extraction::Text(join_pages(&pages)),
        Ok(Err(e)) => Extraction::SoftFailure {
            doc_type: DocumentType::Pdf,
            message: e.to_string(),
        },
        Err(e) => Extraction::SoftFailure {
            doc_type: DocumentType::Pdf,
            message: format!("parser aborted: {e}"),
        },
    }
}

/// Every page is followed by a newline so words never run across a page break.
fn join_pages(pages: &[String]) -> String {
    let mut text = String::with_capacity(pages.iter().map(|p| p.len() + 1).sum());
    for page in pages {
        text.push_str(page);
        text.push('\n');
    }
    text
}

fn extract_docx(bytes: &[u8]) -> Extraction {
    match docx_rs::read_docx(bytes) {
        Ok(docx) => {
            let paragraphs: Vec<String> = docx
                .document
                .children
                .iter()
                .filter_map(|child| match child {
                    DocumentChild::Paragraph(p) => Some(paragraph_text(&p.children)),
                    _ => None,
                })
                .collect();
            Extraction::Text(paragraphs.join("\n"))
        }
        Err(e) => Extraction::SoftFailure {
            doc_type: DocumentType::Docx,
            message: e.to_string(),
        },
    }
}

fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut text = String::new();
    push_paragraph_text(children, &mut text);
    text
}

/// Run text in document order, including runs nested in hyperlinks.
fn push_paragraph_text(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => text.push_str(&t.text),
                        RunChild::Tab(_) => text.push('\t'),
                        RunChild::Break(_) => text.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_paragraph_text(&link.children, text),
            _ => {}
        }
    }
}
