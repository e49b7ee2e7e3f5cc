// Term-frequency scoring of sentences.
use std::collections::HashMap;

use indexmap::IndexMap;

use super::tokenize::split_words;

/// Relative frequency of each filtered word within one document.
/// Keys are case-sensitive, exactly as tokenized.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: HashMap<String, usize>,
    total: usize,
}

impl FrequencyTable {
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for word in words {
            *counts.entry(word.as_ref().to_string()).or_insert(0) += 1;
        }
        Self { counts, total: words.len() }
    }

    pub fn count(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    pub fn freq(&self, word: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(word) as f64 / self.total as f64
    }

    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(w, &c)| (w.as_str(), c))
    }
}

/// Sentence text -> score, in order of first insertion.
pub type SentenceScores = IndexMap<String, f64>;

/// Scores each sentence by the summed frequency of its lowercased words.
///
/// Membership is checked against the filtered words as they were tokenized,
/// so a capitalised word in the table never matches its lowercased form in a
/// sentence. Repeated sentence text keeps its first position and the last
/// computed score.
pub fn score_sentences<S: AsRef<str>>(sentences: &[S], table: &FrequencyTable) -> SentenceScores {
    let mut scores = SentenceScores::with_capacity(sentences.len());
    for sentence in sentences {
        let sentence = sentence.as_ref();
        let lowered = sentence.to_lowercase();
        let score: f64 = split_words(&lowered)
            .filter(|w| table.contains(w))
            .map(|w| table.freq(w))
            .sum();
        scores.insert(sentence.to_string(), score);
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_example() {
        let table = FrequencyTable::from_words(&["the", "the", "fox"]);
        assert!((table.freq("the") - 2.0 / 3.0).abs() < 1e-12);
        assert!((table.freq("fox") - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(table.freq("dog"), 0.0);
    }

    #[test]
    fn test_frequency_normalization() {
        let words = ["alpha", "beta", "alpha", "gamma", "beta", "alpha", "delta"];
        let table = FrequencyTable::from_words(&words);
        for (word, count) in table.iter() {
            assert!((table.freq(word) * words.len() as f64 - count as f64).abs() < 1e-9);
        }
        let recovered: f64 = table.iter().map(|(w, _)| table.freq(w) * table.total() as f64).sum();
        assert!((recovered - words.len() as f64).abs() < 1e-9);
        let sum: f64 = table.iter().map(|(w, _)| table.freq(w)).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_table() {
        let table = FrequencyTable::from_words::<&str>(&[]);
        assert!(table.is_empty());
        assert_eq!(table.freq("anything"), 0.0);
    }

    #[test]
    fn test_score_sentences_sums_frequencies() {
        let table = FrequencyTable::from_words(&["fox", "fox", "jumps", "dog"]);
        let scores = score_sentences(&["The fox jumps.", "A dog sleeps."], &table);
        assert!((scores["The fox jumps."] - 0.75).abs() < 1e-12);
        assert!((scores["A dog sleeps."] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_case_sensitive_membership() {
        // "Fox" is in the table but sentences are lowercased before lookup.
        let table = FrequencyTable::from_words(&["Fox", "runs"]);
        let scores = score_sentences(&["Fox runs."], &table);
        assert!((scores["Fox runs."] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_duplicate_sentences_collapse() {
        let table = FrequencyTable::from_words(&["fox", "dog"]);
        let scores = score_sentences(&["fox here.", "dog there.", "fox here."], &table);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores.get_index(0).map(|(k, _)| k.as_str()), Some("fox here."));
    }
}
