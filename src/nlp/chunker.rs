// Fixed-size character chunking. Chunks partition the input with no gaps or
// overlaps; the last one may be shorter.
use crate::error::{Result, SummaryError};

pub fn split_text(text: &str, chunk_size: usize) -> Result<Vec<&str>> {
    if chunk_size == 0 {
        return Err(SummaryError::InvalidConfig("chunk_size must be > 0".to_string()));
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in text.char_indices() {
        if count == chunk_size {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_example() {
        let chunks = split_text("abcdefgh", 3).unwrap();
        assert_eq!(chunks, vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_split_exact_multiple() {
        let chunks = split_text("abcdef", 3).unwrap();
        assert_eq!(chunks, vec!["abc", "def"]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_text("", 4).unwrap().is_empty());
    }

    #[test]
    fn test_split_zero_size() {
        assert!(matches!(split_text("abc", 0), Err(SummaryError::InvalidConfig(_))));
    }

    #[test]
    fn test_split_multibyte_boundaries() {
        let text = "héllo wörld ✓✓✓";
        let chunks = split_text(text, 4).unwrap();
        assert_eq!(chunks.concat(), text);
        assert!(chunks.iter().all(|c| c.chars().count() <= 4));
        assert_eq!(chunks.len(), (text.chars().count() + 3) / 4);
    }

    #[test]
    fn test_chunk_coverage() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(37);
        for size in [1, 2, 7, 64, 1024, 4096, 10_000] {
            let chunks = split_text(&text, size).unwrap();
            assert_eq!(chunks.concat(), text);
            assert!(chunks.iter().all(|c| c.chars().count() <= size));
            assert_eq!(chunks.len(), (text.chars().count() + size - 1) / size);
        }
    }
}
