//! Knowledge-base loading for vitae.
//!
//! The assistant answers from a small fixed set of documents configured at
//! deploy time: PDFs (extracted page by page), plain-text files (read
//! whole), and images (existence-checked only, kept as paths for future
//! multimodal use). Loading happens once at startup and fails soft: a
//! missing or unreadable document is logged and skipped, never fatal.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// The configured document paths to load, in a fixed order.
#[derive(Debug, Clone, Default)]
pub struct DocumentSet {
    /// PDF documents, extracted page by page
    pub pdfs: Vec<PathBuf>,

    /// Plain-text documents, read whole
    pub texts: Vec<PathBuf>,

    /// Image paths, validated for existence only
    pub images: Vec<PathBuf>,
}

impl DocumentSet {
    pub fn new(pdfs: Vec<PathBuf>, texts: Vec<PathBuf>, images: Vec<PathBuf>) -> Self {
        Self {
            pdfs,
            texts,
            images,
        }
    }
}

/// The assembled knowledge base: one text blob plus verified image paths.
///
/// Built once at process startup and read-only afterwards, so it can be
/// shared across concurrent sessions without locking.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    /// Concatenated extracted text from all loaded documents
    pub text: String,

    /// Image paths that existed at load time, in configured order
    pub image_paths: Vec<PathBuf>,
}

impl KnowledgeBase {
    /// Load all configured documents.
    ///
    /// Concatenation order is the configured order: every PDF (page by
    /// page), then every text file. Each piece of extracted text is
    /// prefixed with a newline separator. Documents that fail to load are
    /// skipped with a warning; the result is deterministic for a fixed
    /// filesystem snapshot.
    pub fn load(documents: &DocumentSet) -> Self {
        let mut text = String::new();

        for path in &documents.pdfs {
            match append_pdf(path, &mut text) {
                Ok(pages) => {
                    info!(path = %path.display(), pages, "Loaded PDF");
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping PDF");
                }
            }
        }

        for path in &documents.texts {
            match append_text(path, &mut text) {
                Ok(chars) => {
                    info!(path = %path.display(), chars, "Loaded text file");
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping text file");
                }
            }
        }

        let image_paths: Vec<PathBuf> = documents
            .images
            .iter()
            .filter(|p| {
                let exists = p.exists();
                if !exists {
                    warn!(path = %p.display(), "Image not found");
                }
                exists
            })
            .cloned()
            .collect();

        info!(
            total_chars = text.len(),
            images = image_paths.len(),
            "Knowledge base loaded"
        );

        Self { text, image_paths }
    }

    /// True when no document contributed any text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Why a single document could not be loaded. Never fatal: the loader logs
/// these and moves on to the next document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("failed to parse PDF {path}: {reason}")]
    Pdf { path: PathBuf, reason: String },
}

/// Extract text from every page of a PDF, appending each non-empty page to
/// `out` behind a newline separator. Returns the number of pages that
/// contributed text.
fn append_pdf(path: &Path, out: &mut String) -> Result<usize, DocumentError> {
    if !path.exists() {
        return Err(DocumentError::NotFound(path.to_path_buf()));
    }

    let doc = lopdf::Document::load(path).map_err(|e| DocumentError::Pdf {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut pages_with_text = 0usize;
    for (page_no, _) in doc.get_pages() {
        match doc.extract_text(&[page_no]) {
            Ok(raw) => {
                let page_text = raw.trim_end();
                if page_text.is_empty() {
                    debug!(path = %path.display(), page = page_no, "No text found on page");
                } else {
                    out.push('\n');
                    out.push_str(page_text);
                    pages_with_text += 1;
                    debug!(
                        path = %path.display(),
                        page = page_no,
                        chars = page_text.len(),
                        "Extracted page text"
                    );
                }
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    page = page_no,
                    error = %e,
                    "Failed to extract page text"
                );
            }
        }
    }

    Ok(pages_with_text)
}

/// Read a whole text file and append it to `out` behind a newline
/// separator. Returns the number of characters appended.
fn append_text(path: &Path, out: &mut String) -> Result<usize, DocumentError> {
    if !path.exists() {
        return Err(DocumentError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| DocumentError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    out.push('\n');
    out.push_str(&content);
    Ok(content.len())
}
