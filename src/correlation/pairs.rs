//! Unordered 2-combinations over an ordered map sequence

/// Produce all unordered pairs of the input items, in input order
///
/// For N items this yields exactly N * (N - 1) / 2 pairs, each once, with
/// no self-pairs. Pair (i, j) always has i before j in the input, which
/// keeps downstream keys and table rows deterministic.
pub fn unordered_pairs<T: Clone>(items: &[T]) -> Vec<(T, T)> {
    let count = items.len().saturating_sub(1) * items.len() / 2;
    let mut pairs = Vec::with_capacity(count);

    for (i, first) in items.iter().enumerate() {
        for second in items.iter().skip(i + 1) {
            pairs.push((first.clone(), second.clone()));
        }
    }

    pairs
}

/// Canonical key of an unordered pair
///
/// Names are joined with a single space in input order, so the same pair
/// always maps to the same table row and annotation key.
pub fn pair_name(first: &str, second: &str) -> String {
    format!("{first} {second}")
}
