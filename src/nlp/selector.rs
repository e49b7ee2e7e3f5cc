// Top-N sentence selection.
use super::frequency::SentenceScores;

/// Returns up to `n` sentences, highest score first. Equal scores keep the
/// order in which the sentence text was first scored.
pub fn select_top(scores: &SentenceScores, n: usize) -> Vec<&str> {
    let mut ranked: Vec<(&str, f64)> = scores.iter().map(|(s, &score)| (s.as_str(), score)).collect();
    // sort_by is stable, so ties stay in insertion order.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.into_iter().take(n).map(|(s, _)| s).collect()
}

/// Joins selected sentences in the order given (most relevant first).
pub fn join_selected(selected: &[&str]) -> String {
    selected.join(" ")
}
