/// Normalized edit-distance similarity between two strings.
///
/// Both inputs are lower-cased and trimmed. The result is symmetric and
/// bounded to [0, 1]; identical strings (including two empty strings) score
/// 1.0, and otherwise the score is `(L - distance) / L` for the Levenshtein
/// distance over the longer normalized length `L`.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let s1 = a.trim().to_lowercase();
    let s2 = b.trim().to_lowercase();

    if s1 == s2 {
        return 1.0;
    }

    let (longer, shorter) = if s1.chars().count() >= s2.chars().count() {
        (s1, s2)
    } else {
        (s2, s1)
    };

    let longer_len = longer.chars().count();
    if longer_len == 0 {
        return 1.0;
    }

    let distance = levenshtein(&longer, &shorter);
    (longer_len - distance) as f64 / longer_len as f64
}

/// Levenshtein edit distance over characters, two-row dynamic programming
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.iter().enumerate() {
        let mut current = Vec::with_capacity(b.len() + 1);
        current.push(i + 1);

        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            let deletion = prev[j + 1] + 1;
            let insertion = current[j] + 1;
            current.push(substitution.min(deletion).min(insertion));
        }

        prev = current;
    }

    prev[b.len()]
}
