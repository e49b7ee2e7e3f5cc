// Pipeline configuration. Loadable from JSON; every field has a default.
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SummaryError};

pub const DEFAULT_CHUNK_SIZE: usize = 4096;
pub const DEFAULT_CONDENSE_CHUNK_SIZE: usize = 1024;
pub const DEFAULT_NUM_SENTENCES: usize = 20;
pub const DEFAULT_MIN_LENGTH: usize = 30;
pub const DEFAULT_MAX_LENGTH: usize = 80;
pub const DEFAULT_WORKER_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Characters per chunk for the initial split.
    pub chunk_size: usize,
    /// Characters per chunk handed to the abstractive model.
    pub condense_chunk_size: usize,
    pub num_sentences: usize,
    pub min_length: usize,
    pub max_length: usize,
    /// Threads per tokenize/filter stage.
    pub worker_count: usize,
    /// Elements each tokenize/filter worker receives. Input beyond
    /// `worker_count * slice_width` elements is not processed.
    pub slice_width: usize,
    /// Word list for the corrector; one word per line, most frequent first.
    pub dictionary_path: Option<PathBuf>,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            condense_chunk_size: DEFAULT_CONDENSE_CHUNK_SIZE,
            num_sentences: DEFAULT_NUM_SENTENCES,
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            worker_count: DEFAULT_WORKER_COUNT,
            slice_width: DEFAULT_CHUNK_SIZE,
            dictionary_path: None,
        }
    }
}

impl SummarizerConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let f = File::open(path)?;
        let config: SummarizerConfig = serde_json::from_reader(f).map_err(|e| {
            SummaryError::InvalidConfig(format!("{}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("chunk_size", self.chunk_size),
            ("condense_chunk_size", self.condense_chunk_size),
            ("num_sentences", self.num_sentences),
            ("worker_count", self.worker_count),
            ("slice_width", self.slice_width),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(SummaryError::InvalidConfig(format!("{} must be > 0", name)));
            }
        }
        check_lengths(self.min_length, self.max_length)
    }
}

pub(crate) fn check_lengths(min_length: usize, max_length: usize) -> Result<()> {
    if min_length > max_length {
        return Err(SummaryError::InvalidConfig(format!(
            "min_length {} exceeds max_length {}",
            min_length, max_length
        )));
    }
    Ok(())
}
