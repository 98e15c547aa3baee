//! Dice-coefficient string similarity over character bigrams.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Compare two strings and return a similarity ratio in `[0, 1]`.
///
/// Whitespace is ignored entirely. Identical strings score 1, strings with
/// fewer than two characters (after stripping) score 0 unless identical, and
/// otherwise the score is `2 * shared_bigrams / (bigrams(a) + bigrams(b))`,
/// where shared bigrams are counted as a multiset. Comparison is
/// case-sensitive.
pub fn compare_two_strings(first: &str, second: &str) -> f64 {
    let first: Vec<char> = first.chars().filter(|c| !c.is_whitespace()).collect();
    let second: Vec<char> = second.chars().filter(|c| !c.is_whitespace()).collect();

    if first == second {
        return 1.0;
    }
    if first.len() < 2 || second.len() < 2 {
        return 0.0;
    }

    let mut first_bigrams: HashMap<(char, char), usize> = HashMap::new();
    for pair in first.windows(2) {
        *first_bigrams.entry((pair[0], pair[1])).or_insert(0) += 1;
    }

    let mut intersection = 0usize;
    for pair in second.windows(2) {
        if let Some(count) = first_bigrams.get_mut(&(pair[0], pair[1])) {
            if *count > 0 {
                *count -= 1;
                intersection += 1;
            }
        }
    }

    (2.0 * intersection as f64) / (first.len() + second.len() - 2) as f64
}

/// Result of matching one string against several candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestMatch {
    /// Similarity of every candidate, in input order.
    pub ratings: Vec<Rating>,
    /// Index of the best candidate in `ratings`.
    pub best_index: usize,
    /// The best candidate and its similarity.
    pub best: Rating,
}

/// A candidate string and its similarity to the main string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub target: String,
    pub rating: f64,
}

/// Rate `main` against every target and pick the most similar one.
///
/// Returns `None` when `targets` is empty. The first target wins ties.
pub fn find_best_match<S: AsRef<str>>(main: &str, targets: &[S]) -> Option<BestMatch> {
    let ratings: Vec<Rating> = targets
        .iter()
        .map(|t| Rating {
            target: t.as_ref().to_string(),
            rating: compare_two_strings(main, t.as_ref()),
        })
        .collect();

    let mut best_index = 0;
    for (i, r) in ratings.iter().enumerate().skip(1) {
        if r.rating > ratings[best_index].rating {
            best_index = i;
        }
    }

    let best = ratings.get(best_index)?.clone();
    Some(BestMatch {
        ratings,
        best_index,
        best,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(compare_two_strings("hello", "hello"), 1.0);
        assert_eq!(compare_two_strings("", ""), 1.0);
        assert_eq!(compare_two_strings("a", "a"), 1.0);
    }

    #[test]
    fn empty_or_single_char_scores_zero() {
        assert_eq!(compare_two_strings("", "hello"), 0.0);
        assert_eq!(compare_two_strings("hello", ""), 0.0);
        assert_eq!(compare_two_strings("a", "ab"), 0.0);
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_eq!(compare_two_strings("xyz123", "hello"), 0.0);
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(compare_two_strings("hel lo", "hello"), 1.0);
        assert_eq!(compare_two_strings(" borrow\tchecker\n", "borrowchecker"), 1.0);
    }

    #[test]
    fn partial_overlap() {
        // "french" -> fr re en nc ch, "quebec" shares none
        assert_eq!(compare_two_strings("french", "quebec"), 0.0);
        // "night" vs "nacht": only "ht" is shared, 2 * 1 / 8
        assert!(approx(compare_two_strings("night", "nacht"), 0.25));
        // "healed" vs "sealed": ea al le ed shared, 2 * 4 / 10
        assert!(approx(compare_two_strings("healed", "sealed"), 0.8));
    }

    #[test]
    fn repeated_bigrams_count_as_multiset() {
        // "aaaa" has aa x3, "aa" has aa x1: 2 * 1 / 4
        assert!(approx(compare_two_strings("aaaa", "aa"), 0.5));
    }

    #[test]
    fn case_sensitive_and_symmetric() {
        assert!(compare_two_strings("Hello", "hello") < 1.0);
        let a = compare_two_strings("ownership rules", "the ownership rule");
        let b = compare_two_strings("the ownership rule", "ownership rules");
        assert!(approx(a, b));
    }

    #[test]
    fn best_match_picks_highest_rating() {
        let targets = ["mutable borrow", "immutable borrow", "move semantics"];
        let m = find_best_match("imutable borow", &targets).unwrap();
        assert_eq!(m.best_index, 1);
        assert_eq!(m.best.target, "immutable borrow");
        assert_eq!(m.ratings.len(), 3);
    }

    #[test]
    fn best_match_empty_targets() {
        let targets: [&str; 0] = [];
        assert!(find_best_match("anything", &targets).is_none());
    }
}
