// Document loading: reads PDFs and plain text, then strips bibliography,
// e-mail addresses, URLs and hyphens left behind by extraction.
use std::fs::File;
use std::io::Read;
use std::panic::catch_unwind;
use std::path::Path;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SummaryError};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://(?:[a-zA-Z0-9]|[$-_@.&+]|[!*\(\),]|%[0-9a-fA-F]{2})+").unwrap()
});

static REFERENCES_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)references").unwrap());

static BIBLIOGRAPHY_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)bibliography").unwrap());

const PDF_SIGNATURE: &[u8; 4] = b"%PDF";

pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["pdf", "txt", "md"];

pub trait DocumentLoader {
    fn load(&self, path: &Path) -> Result<String>;
}

/// Loads `.pdf`, `.txt` and `.md` files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl DocumentLoader for FileLoader {
    fn load(&self, path: &Path) -> Result<String> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let raw = match ext.as_str() {
            "pdf" => read_pdf(path)?,
            "txt" | "md" => read_text_file(path)?,
            _ => return Err(invalid(path, format!("unsupported file format: '{}'", ext))),
        };
        debug!("loaded {} chars from {}", raw.chars().count(), path.display());
        Ok(remove_noise(&raw))
    }
}

fn invalid(path: &Path, reason: impl Into<String>) -> SummaryError {
    SummaryError::InvalidDocument { path: path.to_path_buf(), reason: reason.into() }
}

fn read_text_file(path: &Path) -> Result<String> {
    let mut s = String::new();
    File::open(path)?
        .read_to_string(&mut s)
        .map_err(|e| invalid(path, e.to_string()))?;
    Ok(s)
}

fn read_pdf(path: &Path) -> Result<String> {
    let mut header = [0u8; 4];
    let mut f = File::open(path)?;
    if f.read_exact(&mut header).is_err() || &header != PDF_SIGNATURE {
        return Err(invalid(path, "not a PDF file (missing %PDF header)"));
    }
    // pdf-extract panics on some malformed files instead of returning an error.
    match catch_unwind(|| pdf_extract::extract_text(path)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(invalid(path, format!("PDF extraction failed: {}", e))),
        Err(_) => Err(invalid(path, "PDF extraction failed: malformed document")),
    }
}

/// Cuts the text at the bibliography and strips contact details and links.
pub fn remove_noise(text: &str) -> String {
    let cut = REFERENCES_PATTERN
        .find_iter(text)
        .last()
        .or_else(|| BIBLIOGRAPHY_PATTERN.find_iter(text).last())
        .map(|m| m.start());
    let body = cut.map_or(text, |idx| &text[..idx]);
    let without_emails = EMAIL_PATTERN.replace_all(body, "");
    URL_PATTERN.replace_all(&without_emails, "").replace('-', "")
}
