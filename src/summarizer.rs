// Pipeline composition: extractive ranking (term frequency or latent semantic
// analysis), abstractive condensing and lexical correction.
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::SummarizerConfig;
use crate::error::Result;
use crate::loader::DocumentLoader;
use crate::nlp::abstractive::Abstractor;
use crate::nlp::chunker::split_text;
use crate::nlp::concurrent::{process_concurrently, FanOut};
use crate::nlp::condenser::{call_model, condense};
use crate::nlp::correction::correct_summary;
use crate::nlp::dictionary::Dictionary;
use crate::nlp::frequency::{score_sentences, FrequencyTable};
use crate::nlp::lsa::{rank_sentences, select_best};
use crate::nlp::selector::{join_selected, select_top};
use crate::nlp::tokenize::{filter_sentences, filter_words, sanitize, tokenize_sentences, tokenize_words};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Rank sentences by term frequency, then condense the best ones.
    #[default]
    Frequency,
    /// Feed the raw text to the model chunk by chunk.
    Direct,
    /// Pick sentences by latent semantic analysis and keep them verbatim,
    /// in document order. No model is involved.
    Lsa,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStats {
    pub chunks: usize,
    pub sentences: usize,
    pub words: usize,
    pub filtered_sentences: usize,
    pub filtered_words: usize,
    pub selected_sentences: usize,
    pub condense_chunks: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub text: String,
    pub method: Method,
    pub stats: PipelineStats,
}

/// Output of the concurrent tokenize and filter stages.
struct Tokens<'t> {
    chunks: usize,
    sentences: Vec<&'t str>,
    words: Vec<&'t str>,
    filtered_sentences: Vec<&'t str>,
    filtered_words: Vec<&'t str>,
}

impl Tokens<'_> {
    fn stats(&self, selected_sentences: usize, condense_chunks: usize) -> PipelineStats {
        let stats = PipelineStats {
            chunks: self.chunks,
            sentences: self.sentences.len(),
            words: self.words.len(),
            filtered_sentences: self.filtered_sentences.len(),
            filtered_words: self.filtered_words.len(),
            selected_sentences,
            condense_chunks,
        };
        info!(
            "Sentences: {}, words: {}, filtered sentences: {}, filtered words: {}, selected: {}",
            stats.sentences,
            stats.words,
            stats.filtered_sentences,
            stats.filtered_words,
            stats.selected_sentences
        );
        stats
    }
}

pub struct Summarizer<'a> {
    config: SummarizerConfig,
    abstractor: &'a dyn Abstractor,
    dictionary: &'a dyn Dictionary,
}

impl<'a> Summarizer<'a> {
    pub fn new(
        config: SummarizerConfig,
        abstractor: &'a dyn Abstractor,
        dictionary: &'a dyn Dictionary,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, abstractor, dictionary })
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    pub fn summarize_file(
        &self,
        loader: &dyn DocumentLoader,
        path: &Path,
        method: Method,
    ) -> Result<Summary> {
        let text = loader.load(path)?;
        match method {
            Method::Frequency => self.summarize(&text),
            Method::Direct => self.summarize_direct(&text),
            Method::Lsa => self.summarize_lsa(&text),
        }
    }

    fn tokenize<'t>(&self, text: &'t str) -> Result<Tokens<'t>> {
        let cfg = &self.config;
        let chunks = split_text(text, cfg.chunk_size)?;
        let fan_out = FanOut::new(cfg.worker_count, cfg.slice_width);

        let sentences = process_concurrently(&chunks, fan_out, |c| Ok(tokenize_sentences(c)))?;
        let words = process_concurrently(&sentences, fan_out, |s| Ok(tokenize_words(s)))?;
        let filtered_sentences =
            process_concurrently(&sentences, fan_out, |s| Ok(filter_sentences(s)))?;
        let filtered_words = process_concurrently(&words, fan_out, |w| Ok(filter_words(w)))?;

        Ok(Tokens { chunks: chunks.len(), sentences, words, filtered_sentences, filtered_words })
    }

    pub fn summarize(&self, text: &str) -> Result<Summary> {
        let cfg = &self.config;
        let text = sanitize(text);
        let tokens = self.tokenize(&text)?;

        let table = FrequencyTable::from_words(&tokens.filtered_words);
        let scores = score_sentences(&tokens.filtered_sentences, &table);
        let selected = select_top(&scores, cfg.num_sentences);
        let selected_text = join_selected(&selected);
        let condense_chunks = split_text(&selected_text, cfg.condense_chunk_size)?.len();
        let stats = tokens.stats(selected.len(), condense_chunks);

        let condensed = condense(
            &selected_text,
            cfg.condense_chunk_size,
            cfg.min_length,
            cfg.max_length,
            self.abstractor,
        )?;

        Ok(Summary {
            text: correct_summary(&condensed, self.dictionary),
            method: Method::Frequency,
            stats,
        })
    }

    /// Summarizes every `chunk_size` slice of the text in order, one model
    /// call at a time.
    pub fn summarize_direct(&self, text: &str) -> Result<Summary> {
        let cfg = &self.config;
        let chunks = split_text(text, cfg.chunk_size)?;
        let mut summary = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            info!("Processing chunk {}/{}...", i + 1, chunks.len());
            let part = call_model(self.abstractor, i, chunk, cfg.min_length, cfg.max_length)?;
            summary.push_str(&part);
        }

        Ok(Summary {
            text: correct_summary(&summary, self.dictionary),
            method: Method::Direct,
            stats: PipelineStats { chunks: chunks.len(), ..Default::default() },
        })
    }

    /// Extracts the `num_sentences` sentences carrying the most latent
    /// semantic weight and keeps them in document order.
    pub fn summarize_lsa(&self, text: &str) -> Result<Summary> {
        let text = sanitize(text);
        let tokens = self.tokenize(&text)?;

        let ratings = rank_sentences(&tokens.filtered_sentences);
        let selected = select_best(&tokens.filtered_sentences, &ratings, self.config.num_sentences);
        let stats = tokens.stats(selected.len(), 0);

        Ok(Summary {
            text: correct_summary(&join_selected(&selected), self.dictionary),
            method: Method::Lsa,
            stats,
        })
    }
}
