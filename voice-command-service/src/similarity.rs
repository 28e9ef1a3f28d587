//! Normalized Levenshtein similarity.

/// Case-insensitive Levenshtein distance counted in characters, unit cost
/// for insertion, deletion, and substitution.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a = a.to_lowercase();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    // Two rolling rows of the classic DP table
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current: Vec<usize> = Vec::with_capacity(b.len() + 1);

    for (i, ca) in a.chars().enumerate() {
        current.clear();
        current.push(i + 1);
        for ((cb, diagonal), above) in b.iter().zip(&previous).zip(previous.iter().skip(1)) {
            let left = current.last().copied().unwrap_or(i + 1);
            let substitution = diagonal + usize::from(ca != *cb);
            current.push(substitution.min(above + 1).min(left + 1));
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous.last().copied().unwrap_or(0)
}

/// `(longest - distance) / longest`, in `[0, 1]`. Two empty strings are
/// identical (1.0).
#[allow(clippy::cast_precision_loss)]
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    longest.saturating_sub(edit_distance(&a, &b)) as f64 / longest as f64
}
