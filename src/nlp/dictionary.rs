// Dictionary oracle used by the lexical corrector: word lookup plus splitting of
// fused tokens into the most probable word sequence.
//
// Segmentation follows Zipf's law: a word at frequency rank `r` in a list of `n`
// words costs `ln((r + 1) * ln(n))`, and the cheapest cover of the token wins.
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use log::info;
use once_cell::sync::OnceCell;

use crate::error::{DictionaryError, Result, SummaryError};

/// Longest token the segmenter will attempt.
pub const MAX_SEGMENT_CHARS: usize = 128;

const UNKNOWN_COST: f64 = 9e99;

// Regular English affixes accepted on top of a listed word, so "jumping",
// "happily" and "unfold" count as words when "jump", "happy" and "fold" do.
const SUFFIXES: [&str; 13] = [
    "s", "es", "ed", "ing", "er", "ers", "est", "ly", "ness", "less", "able", "ment", "ful",
];
const PREFIXES: [&str; 17] = [
    "re", "un", "non", "pre", "sub", "semi", "mid", "inter", "multi", "mis", "dis", "anti",
    "auto", "over", "under", "out", "co",
];
const MIN_STEM_CHARS: usize = 3;
const MIN_PREFIXED_CHARS: usize = 4;

static EMBEDDED_WORDS: &str = include_str!("data/words.txt");

static GLOBAL: OnceCell<WordListDictionary> = OnceCell::new();

pub trait Dictionary: Send + Sync {
    fn is_word(&self, token: &str) -> bool;

    /// Splits `token` into its most probable word sequence. A token that
    /// cannot be split comes back as a single segment.
    fn segment(&self, token: &str) -> std::result::Result<Vec<String>, DictionaryError>;
}

#[derive(Debug, Clone)]
pub struct WordListDictionary {
    costs: HashMap<String, f64>,
    max_word_chars: usize,
}

impl WordListDictionary {
    /// Builds a dictionary from words ordered most frequent first. Words are
    /// matched case-insensitively; repeated entries keep their first rank.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ranked: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            if seen.insert(word.clone()) {
                ranked.push(word);
            }
        }

        let log_n = (ranked.len().max(2) as f64).ln();
        let max_word_chars = ranked.iter().map(|w| w.chars().count()).max().unwrap_or(0);
        let costs = ranked
            .into_iter()
            .enumerate()
            .map(|(rank, word)| (word, ((rank + 1) as f64 * log_n).ln()))
            .collect();
        Self { costs, max_word_chars }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| SummaryError::Dictionary {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_words(content.lines()))
    }

    /// The built-in English word list, ranked by frequency in English prose.
    pub fn embedded() -> Self {
        Self::from_words(EMBEDDED_WORDS.lines())
    }

    /// Process-wide dictionary, initialised on first use. The first caller's
    /// `path` decides the word list; later arguments are ignored.
    pub fn global(path: Option<&Path>) -> Result<&'static WordListDictionary> {
        GLOBAL.get_or_try_init(|| {
            let dict = match path {
                Some(p) => Self::from_path(p)?,
                None => Self::embedded(),
            };
            info!("Loaded dictionary with {} words", dict.len());
            Ok(dict)
        })
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    fn word_cost(&self, word: &str) -> f64 {
        self.costs.get(word).copied().unwrap_or(UNKNOWN_COST)
    }

    fn contains(&self, word: &str) -> bool {
        self.costs.contains_key(word)
    }

    /// `word` is listed, or is a regular inflection of a listed word.
    fn knows_inflected(&self, word: &str) -> bool {
        if self.contains(word) {
            return true;
        }
        let y_stem = ["ies", "ied", "ily"]
            .iter()
            .find_map(|suffix| word.strip_suffix(suffix))
            .filter(|base| base.chars().count() >= 2);
        if let Some(base) = y_stem {
            if self.contains(&format!("{}y", base)) {
                return true;
            }
        }
        SUFFIXES.iter().any(|suffix| match word.strip_suffix(suffix) {
            Some(base) if base.chars().count() >= MIN_STEM_CHARS => {
                self.contains(base)
                    || (takes_silent_e(suffix) && self.contains(&format!("{}e", base)))
                    || undoubled(base).map_or(false, |b| self.contains(b))
            }
            _ => false,
        })
    }
}

fn takes_silent_e(suffix: &str) -> bool {
    suffix.starts_with(|c: char| c == 'e' || c == 'i') || suffix == "able"
}

/// "stopp" -> "stop", for suffixes that double the final consonant.
fn undoubled(base: &str) -> Option<&str> {
    let mut rev = base.chars().rev();
    let last = rev.next()?;
    let prev = rev.next()?;
    if base.chars().count() >= 4 && last == prev && !"aeiouls".contains(last) {
        Some(&base[..base.len() - last.len_utf8()])
    } else {
        None
    }
}

impl Dictionary for WordListDictionary {
    fn is_word(&self, token: &str) -> bool {
        let word = token.to_lowercase();
        self.knows_inflected(&word)
            || PREFIXES.iter().any(|prefix| match word.strip_prefix(prefix) {
                Some(rest) => rest.chars().count() >= MIN_PREFIXED_CHARS && self.knows_inflected(rest),
                None => false,
            })
    }

    fn segment(&self, token: &str) -> std::result::Result<Vec<String>, DictionaryError> {
        let chars: Vec<char> = token.chars().collect();
        if chars.len() > MAX_SEGMENT_CHARS {
            return Err(DictionaryError::TooLong(chars.len()));
        }
        if !chars.iter().any(|c| c.is_alphabetic()) {
            return Err(DictionaryError::NoLetters);
        }

        let lowered: Vec<String> = chars.iter().map(|c| c.to_lowercase().collect()).collect();
        let n = chars.len();
        // best[i] = (cost of cheapest cover of the first i chars, length of its last word)
        let mut best: Vec<(f64, usize)> = Vec::with_capacity(n + 1);
        best.push((0.0, 0));
        for i in 1..=n {
            let mut choice = (f64::INFINITY, 1);
            for k in 1..=i.min(self.max_word_chars.max(1)) {
                let candidate: String = lowered[i - k..i].concat();
                let cost = best[i - k].0 + self.word_cost(&candidate);
                if cost < choice.0 {
                    choice = (cost, k);
                }
            }
            best.push(choice);
        }

        let mut segments = Vec::new();
        let mut end = n;
        while end > 0 {
            let k = best[end].1;
            segments.push(chars[end - k..end].iter().collect::<String>());
            end -= k;
        }
        segments.reverse();
        Ok(segments)
    }
}
