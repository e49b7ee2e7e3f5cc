// Repairs words fused by text extraction ("quickbrown" -> "quick brown").
use log::debug;

use super::dictionary::Dictionary;

/// Tokens this short are never split.
pub const MIN_SPLIT_CHARS: usize = 6;

/// Rewrites every fused token in `text` and normalises whitespace.
///
/// Dictionary failures are not fatal: the token is kept unchanged.
pub fn correct_summary(text: &str, dictionary: &dyn Dictionary) -> String {
    text.split_whitespace()
        .map(|token| correct_token(token, dictionary))
        .collect::<Vec<_>>()
        .join(" ")
}

fn correct_token(token: &str, dictionary: &dyn Dictionary) -> String {
    // Surrounding punctuation is kept aside so "quickbrown." still matches.
    let core_start = token.find(|c: char| c.is_alphanumeric()).unwrap_or(token.len());
    let core_end = token
        .rfind(|c: char| c.is_alphanumeric())
        .map(|i| i + token[i..].chars().next().map_or(1, char::len_utf8))
        .unwrap_or(core_start);
    if core_start >= core_end {
        return token.to_string();
    }
    let (prefix, core, suffix) = (&token[..core_start], &token[core_start..core_end], &token[core_end..]);

    match split_fused(core, dictionary) {
        Some(parts) => format!("{}{}{}", prefix, parts.join(" "), suffix),
        None => token.to_string(),
    }
}

fn split_fused(word: &str, dictionary: &dyn Dictionary) -> Option<Vec<String>> {
    if word.chars().count() < MIN_SPLIT_CHARS || dictionary.is_word(word) {
        return None;
    }
    let parts = match dictionary.segment(word) {
        Ok(parts) => parts,
        Err(e) => {
            debug!("correction skipped for '{}': {}", word, e);
            return None;
        }
    };
    if parts.len() > 1 && parts.iter().all(|p| dictionary.is_word(p)) {
        Some(parts)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DictionaryError;
    use crate::nlp::dictionary::WordListDictionary;

    fn dict() -> WordListDictionary {
        WordListDictionary::from_words([
            "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "summary", "neural",
            "network",
        ])
    }

    /// Knows no words and fails every segmentation.
    struct BrokenDictionary;

    impl Dictionary for BrokenDictionary {
        fn is_word(&self, _token: &str) -> bool {
            false
        }

        fn segment(&self, token: &str) -> Result<Vec<String>, DictionaryError> {
            Err(DictionaryError::TooLong(token.len()))
        }
    }

    /// Claims every token splits into its single characters.
    struct ShortWordDictionary;

    impl Dictionary for ShortWordDictionary {
        fn is_word(&self, token: &str) -> bool {
            token.chars().count() == 1
        }

        fn segment(&self, token: &str) -> Result<Vec<String>, DictionaryError> {
            Ok(token.chars().map(String::from).collect())
        }
    }

    #[test]
    fn test_splits_fused_token() {
        assert_eq!(correct_summary("quickbrown", &dict()), "quick brown");
    }

    #[test]
    fn test_keeps_punctuation_around_split() {
        assert_eq!(
            correct_summary("The (quickbrown) fox, thelazydog.", &dict()),
            "The (quick brown) fox, the lazy dog."
        );
    }

    #[test]
    fn test_short_tokens_never_split() {
        // "dogfo" is 5 characters and unknown, and would split into single letters.
        assert_eq!(correct_summary("dog dogfo", &ShortWordDictionary), "dog dogfo");
        assert_eq!(correct_summary("abcdef", &ShortWordDictionary), "a b c d e f");
    }

    #[test]
    fn test_known_words_untouched() {
        assert_eq!(correct_summary("summary network", &dict()), "summary network");
    }

    #[test]
    fn test_partial_segmentation_rejected() {
        // "brownxyz" cannot be covered by real words only.
        assert_eq!(correct_summary("brownxyz", &dict()), "brownxyz");
    }

    #[test]
    fn test_dictionary_failure_keeps_token() {
        assert_eq!(correct_summary("quickbrown fox", &BrokenDictionary), "quickbrown fox");
    }

    #[test]
    fn test_whitespace_normalised() {
        assert_eq!(correct_summary("  neural\n\nnetwork \t ok  ", &dict()), "neural network ok");
    }

    #[test]
    fn test_idempotent() {
        let d = dict();
        let once = correct_summary("Aquickbrown thelazydog jumps, neuralnetwork!  ", &d);
        assert_eq!(correct_summary(&once, &d), once);
    }

    #[test]
    fn test_only_separators_inserted() {
        let d = dict();
        let input = "thelazydog jumps overthe fox.";
        let output = correct_summary(input, &d);
        let strip = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
        assert_eq!(strip(&output), strip(input));
    }

    #[test]
    fn test_embedded_list_leaves_common_prose_alone() {
        let d = WordListDictionary::embedded();
        let prose = "another anywhere therein forehand outreach somewhat inform standby. \
            Another study found that students who worked somewhere quiet remembered their homework better. \
            Researchers therefore recommend keeping notebooks nearby and informing teachers whenever something changes. \
            Meanwhile the committee reviewed standby procedures, outreach programmes and everyday safety guidelines. \
            Nevertheless, the government introduced legislation requiring hospitals to publish waiting times. \
            The weather forecast predicted thunderstorms throughout the afternoon, although the football match continued anyway.";
        assert_eq!(correct_summary(prose, &d), prose);
    }

    #[test]
    fn test_embedded_list_splits_fused_words() {
        let d = WordListDictionary::embedded();
        assert_eq!(
            correct_summary("quickbrown thelazydog memorysafety neuralnetwork.", &d),
            "quick brown the lazy dog memory safety neural network."
        );
    }

    #[test]
    fn test_punctuation_only_token() {
        assert_eq!(correct_summary("-- ...", &dict()), "-- ...");
    }
}
