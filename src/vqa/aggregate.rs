use std::collections::{BTreeSet, HashMap};

/// Answers tied for the highest number of occurrences.
///
/// Answers are compared as given; no case or punctuation normalization.
/// An empty input yields an empty set.
pub fn top1_answers<S: AsRef<str>>(answers: &[S]) -> BTreeSet<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for answer in answers {
        *counts.entry(answer.as_ref()).or_insert(0) += 1;
    }
    let max_count = match counts.values().max() {
        Some(&max_count) => max_count,
        None => return BTreeSet::new(),
    };
    counts
        .into_iter()
        .filter(|&(_, count)| count == max_count)
        .map(|(answer, _)| answer.to_owned())
        .collect()
}
