// Error types shared by every stage of the summarization pipeline.
use std::path::PathBuf;

use thiserror::Error;

/// Boxed cause carried by worker and model failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid document '{}': {reason}", .path.display())]
    InvalidDocument { path: PathBuf, reason: String },

    #[error("worker {worker} failed: {source}")]
    Processing {
        worker: usize,
        #[source]
        source: BoxError,
    },

    #[error("model failed on chunk {chunk}: {source}")]
    Model {
        chunk: usize,
        #[source]
        source: BoxError,
    },

    #[error("failed to start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to load dictionary '{}': {source}", .path.display())]
    Dictionary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SummaryError>;

/// Non-fatal failure of the dictionary oracle for a single token.
/// The corrector keeps the token as-is when it sees one of these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DictionaryError {
    #[error("token of {0} characters is too long to segment")]
    TooLong(usize),

    #[error("token contains no letters")]
    NoLetters,
}

/// Turns a caught panic payload into an error we can propagate.
pub(crate) fn panic_message(payload: Box<dyn std::any::Any + Send>) -> BoxError {
    let msg = if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    };
    msg.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_from_str() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload).to_string(), "boom");
    }

    #[test]
    fn test_panic_message_unknown_payload() {
        let payload: Box<dyn std::any::Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(payload).to_string(), "worker panicked");
    }

    #[test]
    fn test_display_invalid_document() {
        let err = SummaryError::InvalidDocument {
            path: PathBuf::from("paper.pdf"),
            reason: "missing %PDF header".to_string(),
        };
        assert_eq!(err.to_string(), "invalid document 'paper.pdf': missing %PDF header");
    }
}
