// Latent semantic analysis ranking: sentences are weighted by their length in
// the concept space spanned by the term-by-sentence matrix.
use std::collections::HashMap;

use log::debug;
use nalgebra::{DMatrix, SVD};

use super::stopwords::is_stop_word;
use super::tokenize::split_words;

/// Floor applied to every cell of a sentence column that has any terms.
pub const TERM_SMOOTHING: f64 = 0.4;

/// Fewest concepts kept after the decomposition.
pub const MIN_DIMENSIONS: usize = 3;

/// Share of concepts kept after the decomposition.
pub const REDUCTION_RATIO: f64 = 1.0;

/// Lowercased content words of a sentence: no stop words, no punctuation.
fn terms(sentence: &str) -> Vec<String> {
    split_words(sentence)
        .filter(|w| w.chars().any(char::is_alphanumeric))
        .map(str::to_lowercase)
        .filter(|w| !is_stop_word(w))
        .collect()
}

/// Builds the smoothed term-frequency matrix, one row per distinct term and
/// one column per sentence.
///
/// Each column is scaled by its most frequent term, then lifted so that a
/// cell holds `TERM_SMOOTHING + (1 - TERM_SMOOTHING) * count / max`.
/// Columns without terms stay zero.
pub fn term_sentence_matrix<S: AsRef<str>>(sentences: &[S]) -> DMatrix<f64> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let per_sentence: Vec<Vec<usize>> = sentences
        .iter()
        .map(|s| {
            terms(s.as_ref())
                .into_iter()
                .map(|term| {
                    let next = index.len();
                    *index.entry(term).or_insert(next)
                })
                .collect()
        })
        .collect();

    let mut matrix = DMatrix::<f64>::zeros(index.len(), sentences.len());
    for (col, rows) in per_sentence.iter().enumerate() {
        for &row in rows {
            matrix[(row, col)] += 1.0;
        }
    }
    for mut column in matrix.column_iter_mut() {
        let max = column.iter().copied().fold(0.0, f64::max);
        if max > 0.0 {
            column.apply(|cell| *cell = TERM_SMOOTHING + (1.0 - TERM_SMOOTHING) * *cell / max);
        }
    }
    matrix
}

/// Rates every sentence, in input order. Sentences without content words
/// rate zero.
pub fn rank_sentences<S: AsRef<str>>(sentences: &[S]) -> Vec<f64> {
    let matrix = term_sentence_matrix(sentences);
    if matrix.nrows() == 0 || matrix.ncols() == 0 {
        return vec![0.0; sentences.len()];
    }
    debug!("LSA over {} terms and {} sentences", matrix.nrows(), matrix.ncols());

    let svd = SVD::new(matrix, false, true);
    let v_t = match svd.v_t {
        Some(v_t) => v_t,
        None => return vec![0.0; sentences.len()],
    };

    let mut concepts: Vec<(usize, f64)> = svd.singular_values.iter().copied().enumerate().collect();
    concepts.sort_by(|a, b| b.1.total_cmp(&a.1));
    let dimensions = MIN_DIMENSIONS.max((concepts.len() as f64 * REDUCTION_RATIO) as usize);
    concepts.truncate(dimensions);

    (0..v_t.ncols())
        .map(|col| {
            concepts
                .iter()
                .map(|&(row, sigma)| sigma * sigma * v_t[(row, col)].powi(2))
                .sum::<f64>()
                .sqrt()
        })
        .collect()
}

/// Picks the `n` best rated sentences and returns them in document order.
/// Equal ratings favour the earlier sentence.
pub fn select_best<'a>(sentences: &[&'a str], ratings: &[f64], n: usize) -> Vec<&'a str> {
    let mut order: Vec<usize> = (0..sentences.len().min(ratings.len())).collect();
    order.sort_by(|&a, &b| ratings[b].total_cmp(&ratings[a]));
    order.truncate(n);
    order.sort_unstable();
    order.into_iter().map(|i| sentences[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENTENCES: [&str; 4] = [
        "Rust guarantees memory safety through ownership and borrowing.",
        "Cats sleep.",
        "The borrow checker enforces ownership rules at compile time.",
        "It was so.",
    ];

    #[test]
    fn test_terms_skip_stop_words_and_punctuation() {
        assert_eq!(terms("The Cats, and the dogs!"), vec!["cats", "dogs"]);
    }

    #[test]
    fn test_matrix_shape_and_smoothing() {
        let m = term_sentence_matrix(&["fox fox dog", "dog"]);
        assert_eq!((m.nrows(), m.ncols()), (2, 2));
        // fox is the most frequent term of the first sentence.
        assert!((m[(0, 0)] - 1.0).abs() < 1e-12);
        assert!((m[(1, 0)] - 0.7).abs() < 1e-12);
        // The second sentence has no fox, so its cell holds only the floor.
        assert!((m[(0, 1)] - TERM_SMOOTHING).abs() < 1e-12);
        assert!((m[(1, 1)] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_stop_word_sentence_has_empty_column() {
        let m = term_sentence_matrix(&["fox", "it was so"]);
        assert_eq!(m.column(1).sum(), 0.0);
    }

    #[test]
    fn test_ranks_match_column_norms_with_all_concepts() {
        // Keeping every concept reconstructs the matrix, so each rating is
        // the length of its sentence column.
        let m = term_sentence_matrix(&SENTENCES);
        let ranks = rank_sentences(&SENTENCES);
        assert_eq!(ranks.len(), SENTENCES.len());
        for (col, rank) in ranks.iter().enumerate() {
            assert!((rank - m.column(col).norm()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_content_rich_sentences_rank_higher() {
        let ranks = rank_sentences(&SENTENCES);
        assert!(ranks[0] > ranks[1]);
        assert!(ranks[2] > ranks[1]);
        assert!(ranks[3].abs() < 1e-9);
    }

    #[test]
    fn test_rank_empty_input() {
        assert!(rank_sentences::<&str>(&[]).is_empty());
        assert_eq!(rank_sentences(&["it is.", "so."]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_select_best_keeps_document_order() {
        let ratings = [0.1, 0.9, 0.5, 0.7];
        assert_eq!(select_best(&["a", "b", "c", "d"], &ratings, 2), vec!["b", "d"]);
        assert_eq!(select_best(&["a", "b", "c", "d"], &ratings, 3), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_select_best_ties_favour_earlier() {
        assert_eq!(select_best(&["a", "b", "c"], &[0.5, 0.5, 0.5], 2), vec!["a", "b"]);
    }

    #[test]
    fn test_select_best_bounded() {
        assert_eq!(select_best(&["a"], &[1.0], 5), vec!["a"]);
        assert!(select_best(&["a"], &[1.0], 0).is_empty());
    }
}
