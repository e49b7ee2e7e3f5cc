// Extractive-then-abstractive document summarization.
pub mod config;
pub mod error;
pub mod loader;
pub mod nlp;
pub mod summarizer;

pub use config::SummarizerConfig;
pub use error::{DictionaryError, Result, SummaryError};
pub use loader::{DocumentLoader, FileLoader};
pub use summarizer::{Method, PipelineStats, Summarizer, Summary};
