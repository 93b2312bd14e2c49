//! Command validation pipeline
//!
//! Four match tiers, cheapest first: exact lookup, normalized lookup,
//! structural matching for placeholder-bearing input, then fuzzy token-set
//! similarity. A command that fails every tier is rejected with substring
//! suggestions so the caller can repair it. Validation never fails as an
//! operation: any input and any catalog, including an empty one, produce a
//! verdict.

use crate::catalog::{Catalog, CommandSignature};
use crate::normalize;
use crate::similarity;
use crate::structural;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which tier accepted the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Normalized,
    Structural,
    Fuzzy,
}

/// Outcome of validating one command against the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationVerdict {
    pub valid: bool,
    /// The catalog signature the command resolved to, when valid.
    pub matched: Option<CommandSignature>,
    pub match_kind: Option<MatchKind>,
    /// Candidate paths for an invalid command, best first, at most five.
    pub suggestions: Vec<String>,
    pub reason: Option<String>,
}

impl ValidationVerdict {
    fn accepted(sig: &CommandSignature, kind: MatchKind) -> ValidationVerdict {
        ValidationVerdict {
            valid: true,
            matched: Some(sig.clone()),
            match_kind: Some(kind),
            suggestions: Vec::new(),
            reason: None,
        }
    }

    fn rejected(suggestions: Vec<String>, reason: &str) -> ValidationVerdict {
        ValidationVerdict {
            valid: false,
            matched: None,
            match_kind: None,
            suggestions,
            reason: Some(reason.to_string()),
        }
    }
}

const EMPTY_COMMAND_REASON: &str = "empty command";
const PLACEHOLDER_REASON: &str = "placeholder structure not found";
const UNKNOWN_COMMAND_REASON: &str = "no catalog entry matches";

const MAX_SUGGESTIONS: usize = 5;

/// Validate one raw command string against the catalog.
pub fn validate(catalog: &Catalog, command: &str) -> ValidationVerdict {
    let trimmed = command.trim();
    if trimmed.is_empty() {
        return ValidationVerdict::rejected(Vec::new(), EMPTY_COMMAND_REASON);
    }

    if let Some(sig) = catalog.exact_lookup(trimmed) {
        debug!(command = trimmed, "exact match");
        return ValidationVerdict::accepted(sig, MatchKind::Exact);
    }

    let tokens: Vec<String> = trimmed.split_whitespace().map(String::from).collect();

    if structural::contains_placeholder(trimmed) {
        let normalized = normalize::normalize(&tokens);
        if let Some(sig) = structural::resolve(catalog, &normalized) {
            return ValidationVerdict::accepted(sig, MatchKind::Structural);
        }
        let literal_prefix: Vec<&str> = normalized
            .iter()
            .take_while(|t| !t.starts_with('<'))
            .map(String::as_str)
            .collect();
        let suggestions = catalog
            .prefix_lookup(&literal_prefix)
            .iter()
            .take(3)
            .map(|sig| sig.path_string())
            .collect();
        return ValidationVerdict::rejected(suggestions, PLACEHOLDER_REASON);
    }

    let normalized = normalize::normalize(&tokens);
    if normalized != tokens {
        if let Some(sig) = catalog.exact_lookup(&normalized.join(" ")) {
            debug!(command = trimmed, normalized = %normalized.join(" "), "normalized match");
            return ValidationVerdict::accepted(sig, MatchKind::Normalized);
        }
    }

    if let Some(first) = normalized.first() {
        let candidates = catalog.prefix_lookup(&[first]);
        let ranked = similarity::rank(&normalized, candidates);
        if let Some((best, score)) = ranked.first() {
            let best_tokens: Vec<String> = best
                .path
                .iter()
                .map(|t| t.render().to_lowercase())
                .collect();
            if similarity::similar_enough(&normalized, &best_tokens)
                && best.word_count().abs_diff(normalized.len()) <= structural::WORD_COUNT_TOLERANCE
            {
                debug!(
                    command = trimmed,
                    candidate = %best.path_string(),
                    score,
                    "fuzzy match"
                );
                return ValidationVerdict::accepted(best, MatchKind::Fuzzy);
            }
        }
    }

    let suggestions = substring_suggestions(catalog, &normalized);
    debug!(command = trimmed, suggestions = suggestions.len(), "no match");
    ValidationVerdict::rejected(suggestions, UNKNOWN_COMMAND_REASON)
}

/// Suggestions for a command no tier accepted: catalog paths containing any
/// input token longer than two characters, de-duplicated in encounter order.
fn substring_suggestions(catalog: &Catalog, tokens: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for token in tokens.iter().filter(|t| t.len() > 2) {
        for sig in catalog.token_search(token).into_iter().take(MAX_SUGGESTIONS) {
            let path = sig.path_string();
            if !out.contains(&path) {
                out.push(path);
            }
        }
    }
    out.truncate(MAX_SUGGESTIONS);
    out
}
