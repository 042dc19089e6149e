//! Description similarity used to break ties between amount/date candidates.

/// Lowercases and reduces a description to alphanumeric words separated by single spaces.
pub fn normalize(description: &str) -> String {
    description
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Levenshtein similarity of the normalized descriptions, in `[0.0, 1.0]`.
///
/// `1 - distance / max_len`, counted in chars. Two descriptions that normalize
/// to the empty string score `1.0`.
pub fn description_similarity(s1: &str, s2: &str) -> f64 {
    let a: Vec<char> = normalize(s1).chars().collect();
    let b: Vec<char> = normalize(s2).chars().collect();

    if a == b {
        return 1.0;
    }

    let max_len = a.len().max(b.len());
    1.0 - (levenshtein_distance(&a, &b) as f64 / max_len as f64)
}

/// Edit distance with two rolling rows.
pub fn levenshtein_distance(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let (a, b) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut prev: Vec<usize> = (0..=a.len()).collect();
    let mut curr = vec![0usize; a.len() + 1];

    for (j, cb) in b.iter().enumerate() {
        curr[0] = j + 1;
        for (i, ca) in a.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[i + 1] = (prev[i + 1] + 1).min(curr[i] + 1).min(prev[i] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[a.len()]
}
