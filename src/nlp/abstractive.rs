// Abstractive summarization backends. The pipeline treats them as opaque
// `chunk -> summary` functions that may be slow.
use std::process::Command;

use log::{debug, info};

use crate::error::BoxError;

pub trait Abstractor: Send + Sync {
    /// Summarizes `chunk` into roughly `min_len..=max_len` words.
    fn summarize(&self, chunk: &str, min_len: usize, max_len: usize) -> Result<String, BoxError>;
}

/// Runs a local model through `ollama run <model> <prompt>`.
#[derive(Debug, Clone)]
pub struct OllamaAbstractor {
    model: String,
}

impl OllamaAbstractor {
    /// Model resolution: explicit override, then `OLLAMA_MODEL`, then the
    /// smallest installed model (fastest), then `mistral`.
    pub fn new(model_override: Option<String>) -> Self {
        let model = model_override
            .or_else(|| std::env::var("OLLAMA_MODEL").ok())
            .or_else(probe_smallest_model)
            .unwrap_or_else(|| String::from("mistral"));
        info!("Using Ollama model {}", model);
        Self { model }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Abstractor for OllamaAbstractor {
    fn summarize(&self, chunk: &str, min_len: usize, max_len: usize) -> Result<String, BoxError> {
        let prompt = build_prompt(chunk, min_len, max_len);
        let output = Command::new("ollama").arg("run").arg(&self.model).arg(&prompt).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("ollama run failed ({}): {}", self.model, stderr.trim()).into());
        }
        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!("ollama returned {} bytes for a {} byte chunk", text.len(), chunk.len());
        Ok(text)
    }
}

/// Offline backend: returns the chunk cut to `max_len` words.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Abstractor for Passthrough {
    fn summarize(&self, chunk: &str, _min_len: usize, max_len: usize) -> Result<String, BoxError> {
        Ok(chunk.split_whitespace().take(max_len).collect::<Vec<_>>().join(" "))
    }
}

fn build_prompt(chunk: &str, min_len: usize, max_len: usize) -> String {
    format!(
        "You are a concise summarizer. Summarize the following text in {} to {} words. \
         Paraphrase; do not quote whole sentences. Output only the summary.\n\nText:\n{}",
        min_len, max_len, chunk
    )
}

fn probe_smallest_model() -> Option<String> {
    let out = Command::new("ollama").arg("list").output().ok()?;
    if !out.status.success() {
        return None;
    }
    smallest_model(&String::from_utf8_lossy(&out.stdout))
}

/// Picks the smallest model from `ollama list` output.
/// Lines look like: NAME  ID  SIZE UNIT  MODIFIED.
fn smallest_model(listing: &str) -> Option<String> {
    let mut best: Option<(String, f64)> = None;
    for line in listing.lines() {
        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.len() < 3 {
            continue;
        }
        let size = cols.windows(2).skip(1).find_map(|pair| {
            let value = pair[0].parse::<f64>().ok()?;
            let scale = match pair[1].to_uppercase().as_str() {
                "GB" => 1024.0 * 1024.0 * 1024.0,
                "MB" => 1024.0 * 1024.0,
                "KB" => 1024.0,
                _ => 1.0,
            };
            Some(value * scale)
        });
        if let Some(size) = size {
            match &best {
                Some((_, best_size)) if *best_size <= size => {}
                _ => best = Some((cols[0].to_string(), size)),
            }
        }
    }
    best.map(|(name, _)| name)
}
