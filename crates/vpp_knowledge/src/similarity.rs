//! Token-overlap similarity ranking for fuzzy suggestions
//!
//! The score is plain Jaccard similarity over token sets. The 0.5 threshold
//! and the mandatory first-token agreement are heuristics tuned to the CLI
//! vocabulary, not an edit-distance model; they bound an otherwise unbounded
//! fuzzy search.

use crate::catalog::CommandSignature;
use std::collections::HashSet;

/// Jaccard score above which two commands count as the same intent.
pub const SIMILARITY_THRESHOLD: f64 = 0.5;

/// Jaccard similarity of two token sets.
pub fn jaccard(a: &[String], b: &[String]) -> f64 {
    let set_a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = b.iter().map(String::as_str).collect();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    set_a.intersection(&set_b).count() as f64 / union as f64
}

/// Whether two token sequences are close enough to call the same command:
/// equal, one a contiguous substring of the other, or Jaccard above the
/// threshold.
pub fn similar_enough(input: &[String], candidate: &[String]) -> bool {
    if input == candidate {
        return true;
    }
    let joined_input = input.join(" ");
    let joined_candidate = candidate.join(" ");
    if joined_input.contains(&joined_candidate) || joined_candidate.contains(&joined_input) {
        return true;
    }
    jaccard(input, candidate) > SIMILARITY_THRESHOLD
}

fn lower_tokens(sig: &CommandSignature) -> Vec<String> {
    sig.path
        .iter()
        .map(|t| t.render().to_lowercase())
        .collect()
}

/// Rank candidates by token-set similarity to the input, best first.
///
/// Candidates whose first token differs from the input's are dropped before
/// scoring. Ties break on lexical path order.
pub fn rank<'a>(
    input_tokens: &[String],
    candidates: Vec<&'a CommandSignature>,
) -> Vec<(&'a CommandSignature, f64)> {
    let Some(first) = input_tokens.first() else {
        return Vec::new();
    };
    let mut ranked: Vec<(&CommandSignature, f64)> = candidates
        .into_iter()
        .filter(|sig| {
            sig.path
                .first()
                .is_some_and(|t| t.render().eq_ignore_ascii_case(first))
        })
        .map(|sig| {
            let score = jaccard(input_tokens, &lower_tokens(sig));
            (sig, score)
        })
        .collect();
    ranked.sort_by(|(sig_a, score_a), (sig_b, score_b)| {
        score_b
            .partial_cmp(score_a)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| sig_a.path_string().cmp(&sig_b.path_string()))
    });
    ranked
}
