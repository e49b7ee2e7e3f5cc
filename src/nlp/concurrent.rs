// Bounded fan-out batching over a dedicated rayon pool.
//
// Worker `i` gets the contiguous slice `[i * slice_width, (i + 1) * slice_width)`
// of the input. Anything past `workers * slice_width` elements is dropped: this
// engine skims the head of a sequence, it is not a full parallel map.
use std::panic::{catch_unwind, AssertUnwindSafe};

use log::warn;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::error::{panic_message, BoxError, Result, SummaryError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanOut {
    pub workers: usize,
    pub slice_width: usize,
}

impl FanOut {
    pub fn new(workers: usize, slice_width: usize) -> Self {
        Self { workers, slice_width }
    }

    /// Number of leading input elements that will actually be processed.
    pub fn capacity(&self) -> usize {
        self.workers.saturating_mul(self.slice_width)
    }

    fn slice<'s, I>(&self, inputs: &'s [I], worker: usize) -> &'s [I] {
        let start = worker.saturating_mul(self.slice_width).min(inputs.len());
        let end = start.saturating_add(self.slice_width).min(inputs.len());
        &inputs[start..end]
    }
}

/// Runs `operation` on each worker's slice and concatenates the results in
/// worker order, regardless of which worker finishes first.
pub fn process_concurrently<I, T, F>(inputs: &[I], fan_out: FanOut, operation: F) -> Result<Vec<T>>
where
    I: Sync,
    T: Send,
    F: Fn(&[I]) -> std::result::Result<Vec<T>, BoxError> + Sync,
{
    if fan_out.workers == 0 || fan_out.slice_width == 0 {
        return Err(SummaryError::InvalidConfig(
            "worker count and slice width must be > 0".to_string(),
        ));
    }
    if inputs.len() > fan_out.capacity() {
        warn!(
            "processing only the first {} of {} elements ({} workers x {})",
            fan_out.capacity(),
            inputs.len(),
            fan_out.workers,
            fan_out.slice_width
        );
    }

    // The pool lives for this call only and is joined when it goes out of scope.
    let pool = ThreadPoolBuilder::new().num_threads(fan_out.workers).build()?;

    let per_worker: Vec<Vec<T>> = pool.install(|| {
        (0..fan_out.workers)
            .into_par_iter()
            .map(|worker| {
                let slice = fan_out.slice(inputs, worker);
                catch_unwind(AssertUnwindSafe(|| operation(slice)))
                    .map_err(panic_message)
                    .and_then(|r| r)
                    .map_err(|source| SummaryError::Processing { worker, source })
            })
            .collect::<Result<Vec<_>>>()
    })?;

    Ok(per_worker.into_iter().flatten().collect())
}
