/// Levenshtein distance with unit costs, counted over Unicode scalar values.
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// `1 - distance / max(len)`; two empty strings are identical.
pub fn edit_similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Jaro similarity with the Winkler prefix bonus (scale 0.1, prefix ≤ 4).
///
/// The bonus applies at every Jaro score, not only above 0.7.
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let jaro = strsim::jaro(a, b);
    if jaro == 0.0 {
        return 0.0;
    }

    let prefix = a
        .chars()
        .zip(b.chars())
        .take(4)
        .take_while(|(x, y)| x == y)
        .count();

    jaro + 0.1 * prefix as f64 * (1.0 - jaro)
}
