//! Structural matching for placeholder-bearing input
//!
//! An input like `trace add <interface-name>` cannot exact-match anything,
//! but its shape can: the literal prefix before the first placeholder must
//! match a catalog path, and the total word counts must agree within a small
//! tolerance so a single placeholder can absorb a single variable-width
//! argument without accepting arbitrary trailing garbage.

use crate::catalog::{Catalog, CommandSignature, PathToken};
use tracing::debug;

/// Word-count slack between input and signature. Approximates "one
/// placeholder, one argument"; treated as a tunable boundary, not a law.
pub const WORD_COUNT_TOLERANCE: usize = 1;

/// Marker every embedded `<...>` value collapses to during extraction.
pub const PLACEHOLDER_MARKER: &str = "<placeholder>";

/// Whether a raw command carries placeholder markup.
pub fn contains_placeholder(command: &str) -> bool {
    command.contains('<')
}

/// Leading positions where the signature's literal tokens agree with the
/// input's literal tokens. Stops at the first placeholder on either side.
fn literal_agreement(sig: &CommandSignature, tokens: &[String]) -> usize {
    sig.path
        .iter()
        .zip(tokens.iter())
        .take_while(|(path_token, word)| match path_token {
            PathToken::Literal(lit) => {
                !word.starts_with('<') && lit.eq_ignore_ascii_case(word)
            }
            PathToken::Placeholder(_) => false,
        })
        .count()
}

/// Resolve a placeholder-bearing input (post-normalization) against the
/// catalog by shape. Returns at most one candidate: longest literal-prefix
/// agreement wins, ties go to the shortest total path, then lexical order.
pub fn resolve<'a>(catalog: &'a Catalog, tokens: &[String]) -> Option<&'a CommandSignature> {
    let literal_prefix: Vec<&str> = tokens
        .iter()
        .take_while(|t| !t.starts_with('<'))
        .map(String::as_str)
        .collect();
    if literal_prefix.is_empty() {
        return None;
    }

    let mut best: Option<(&CommandSignature, usize)> = None;
    for sig in catalog.prefix_lookup(&literal_prefix) {
        let agreement = literal_agreement(sig, tokens);
        if agreement < literal_prefix.len() {
            continue;
        }
        let better = match best {
            None => true,
            Some((current, current_agreement)) => {
                agreement > current_agreement
                    || (agreement == current_agreement
                        && sig.word_count() < current.word_count())
            }
        };
        if better {
            best = Some((sig, agreement));
        }
    }

    let (candidate, agreement) = best?;
    if candidate.word_count().abs_diff(tokens.len()) > WORD_COUNT_TOLERANCE {
        debug!(
            input = %tokens.join(" "),
            candidate = %candidate.path_string(),
            "structural candidate rejected on word count"
        );
        return None;
    }
    debug!(
        input = %tokens.join(" "),
        candidate = %candidate.path_string(),
        agreement,
        "structural match"
    );
    Some(candidate)
}
