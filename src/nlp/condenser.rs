// Condensing pass: re-chunk the selected text and run the abstractive model on
// every chunk in parallel.
use std::panic::{catch_unwind, AssertUnwindSafe};

use log::debug;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use super::abstractive::Abstractor;
use super::chunker::split_text;
use crate::config::check_lengths;
use crate::error::{panic_message, Result, SummaryError};

/// Runs the model on one chunk. Errors and panics both surface as
/// `SummaryError::Model` tagged with the chunk index.
pub(crate) fn call_model(
    abstractor: &dyn Abstractor,
    chunk: usize,
    text: &str,
    min_len: usize,
    max_len: usize,
) -> Result<String> {
    catch_unwind(AssertUnwindSafe(|| abstractor.summarize(text, min_len, max_len)))
        .map_err(panic_message)
        .and_then(|r| r)
        .map_err(|source| SummaryError::Model { chunk, source })
}

/// Returns the per-chunk summaries concatenated in chunk order. The first
/// failing chunk aborts the whole call.
pub fn condense(
    text: &str,
    chunk_size: usize,
    min_len: usize,
    max_len: usize,
    abstractor: &dyn Abstractor,
) -> Result<String> {
    check_lengths(min_len, max_len)?;
    let chunks = split_text(text, chunk_size)?;
    if chunks.is_empty() {
        return Ok(String::new());
    }
    debug!("condensing {} chunks of up to {} chars", chunks.len(), chunk_size);

    let pool = ThreadPoolBuilder::new().num_threads(chunks.len()).build()?;
    let parts: Vec<String> = pool.install(|| {
        chunks
            .par_iter()
            .enumerate()
            .map(|(chunk, text)| call_model(abstractor, chunk, text, min_len, max_len))
            .collect::<Result<Vec<_>>>()
    })?;

    Ok(parts.concat())
}
