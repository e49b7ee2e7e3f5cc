// Sentence/word tokenization and noise filters. Every operation here is pure and
// returns borrowed substrings of its input so results stay verbatim.
use once_cell::sync::Lazy;
use regex::Regex;

use super::stopwords::is_stop_word;

static SENTENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^.!?]+(?:[.!?]+|$)").unwrap()
});

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\w+(?:['’]\w+)*|[^\w\s]+").unwrap()
});

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"http\S+").unwrap());

static CITATION_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\d+\]").unwrap());

// Sentences mentioning figures or tables are usually captions.
const CAPTION_MARKERS: [&str; 4] = ["Figure", "Fig", "Tab", "Table"];

/// Strips leftover links and numeric citation markers like `[12]`.
pub fn sanitize(text: &str) -> String {
    let without_urls = URL_PATTERN.replace_all(text, "");
    CITATION_PATTERN.replace_all(&without_urls, "").into_owned()
}

pub fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    SENTENCE_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    WORD_PATTERN.find_iter(text).map(|m| m.as_str())
}

pub fn tokenize_sentences<'a>(chunks: &[&'a str]) -> Vec<&'a str> {
    chunks.iter().copied().flat_map(|chunk| split_sentences(chunk)).collect()
}

pub fn tokenize_words<'a>(sentences: &[&'a str]) -> Vec<&'a str> {
    sentences.iter().copied().flat_map(|s| split_words(s)).collect()
}

pub fn filter_sentences<'a>(sentences: &[&'a str]) -> Vec<&'a str> {
    sentences
        .iter()
        .copied()
        .filter(|s| s.chars().count() > 1)
        .filter(|s| !CAPTION_MARKERS.iter().any(|marker| s.contains(marker)))
        .collect()
}

pub fn filter_words<'a>(words: &[&'a str]) -> Vec<&'a str> {
    words
        .iter()
        .copied()
        .filter(|w| w.chars().count() > 1 && !is_stop_word(w))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_removes_links_and_citations() {
        let text = "See https://example.com/page for details [12]. Results [3] hold.";
        assert_eq!(sanitize(text), "See  for details . Results  hold.");
    }

    #[test]
    fn test_sanitize_keeps_non_numeric_brackets() {
        assert_eq!(sanitize("an [a] marker"), "an [a] marker");
    }

    #[test]
    fn test_tokenize_sentences_basic() {
        let chunks = ["The fox jumps. A dog sleeps! Does it", " wake? No"];
        let sentences = tokenize_sentences(&chunks);
        assert_eq!(
            sentences,
            vec!["The fox jumps.", "A dog sleeps!", "Does it", "wake?", "No"]
        );
    }

    #[test]
    fn test_sentences_are_verbatim_substrings() {
        let chunk = "  First sentence here.   Second one?Third!  ";
        let sentences = tokenize_sentences(&[chunk]);
        assert_eq!(sentences.len(), 3);
        assert!(sentences.iter().all(|s| chunk.contains(s)));
    }

    #[test]
    fn test_tokenize_words_with_punctuation() {
        let words = tokenize_words(&["Don't stop, fox."]);
        assert_eq!(words, vec!["Don't", "stop", ",", "fox", "."]);
    }

    #[test]
    fn test_filter_sentences_drops_captions_and_fragments() {
        let sentences = ["Figure 3 shows results.", "See Tab. 2", "x", "Real content."];
        assert_eq!(filter_sentences(&sentences), vec!["Real content."]);
    }

    #[test]
    fn test_filter_words_drops_stop_words_and_singles() {
        let words = ["the", "The", "fox", ",", "a", "jumps"];
        assert_eq!(filter_words(&words), vec!["The", "fox", "jumps"]);
    }
}
