//! Single-best typo correction for near-miss commands
//!
//! Correction is pure orchestration: normalize and revalidate, then mine the
//! validator's suggestions for one that agrees with the input word by word,
//! then fall back to a first-two-words catalog search. Only verb-led input
//! is considered; natural language is someone else's problem. `None` means
//! no correction confident enough to offer.

use crate::catalog::Catalog;
use crate::intent::ADMIN_VERBS;
use crate::normalize;
use crate::validate;
use tracing::debug;

/// Whether two words agree for correction purposes: equal, or one contains
/// the other (a truncated or overtyped fragment).
fn words_agree(input: &str, suggested: &str) -> bool {
    input == suggested || suggested.contains(input) || input.contains(suggested)
}

/// Best-effort correction of a mistyped command. Returns the corrected
/// command string, which may be a catalog path or the normalized input.
pub fn correct(catalog: &Catalog, input: &str) -> Option<String> {
    let lower = input.trim().to_lowercase();
    if !ADMIN_VERBS.iter().any(|verb| lower.starts_with(verb)) {
        return None;
    }
    let words: Vec<String> = lower.split_whitespace().map(String::from).collect();

    let normalized = normalize::normalize(&words).join(" ");
    if validate::validate(catalog, &normalized).valid {
        debug!(input = %lower, corrected = %normalized, "normalization resolved typo");
        return Some(normalized);
    }

    let verdict = validate::validate(catalog, &lower);
    if verdict.valid {
        return Some(lower);
    }

    // At least half the input words must line up positionally with the
    // suggestion for it to count as the same command mistyped
    for suggestion in &verdict.suggestions {
        let sugg_lower = suggestion.to_lowercase();
        let sugg_words: Vec<&str> = sugg_lower.split_whitespace().collect();
        if sugg_words.first().copied() != words.first().map(String::as_str) {
            continue;
        }
        let agreeing = words
            .iter()
            .enumerate()
            .filter(|(pos, word)| {
                sugg_words
                    .get(*pos)
                    .is_some_and(|s| words_agree(word, s))
            })
            .count();
        if agreeing * 2 >= words.len() {
            debug!(input = %lower, corrected = %suggestion, "suggestion resolved typo");
            return Some(suggestion.clone());
        }
    }
    if let Some(first) = verdict.suggestions.first() {
        if words
            .first()
            .is_some_and(|w| first.to_lowercase().starts_with(w.as_str()))
        {
            return Some(first.clone());
        }
    }

    // Last resort: search on the first two words and accept a path whose
    // every word but the last agrees, same length as the input
    if words.len() >= 2 {
        let pattern = format!("{} {}", words[0], words[1]);
        for sig in catalog.search(&pattern, 3) {
            let path = sig.path_string();
            let path_lower = path.to_lowercase();
            let path_words: Vec<&str> = path_lower.split_whitespace().collect();
            let settled = words.len() - 1;
            if path_words.len() == words.len()
                && path_words[..settled]
                    .iter()
                    .zip(&words[..settled])
                    .all(|(p, w)| *p == w.as_str())
            {
                return Some(path);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CommandSignature;

    fn catalog(paths: &[&str]) -> Catalog {
        Catalog::new(
            paths
                .iter()
                .map(|p| CommandSignature::parse(p, "", "test").unwrap())
                .collect(),
        )
        .unwrap()
    }

    fn sample() -> Catalog {
        catalog(&[
            "show interface",
            "show interface address",
            "show ip fib",
            "show version",
            "ip route add <prefix> via <next-hop>",
        ])
    }

    #[test]
    fn test_typo_resolves_to_same_first_token_path() {
        assert_eq!(
            correct(&sample(), "show interfce").as_deref(),
            Some("show interface")
        );
    }

    #[test]
    fn test_normalization_resolves() {
        assert_eq!(
            correct(&sample(), "show interfaces").as_deref(),
            Some("show interface")
        );
        assert_eq!(correct(&sample(), "show ver").as_deref(), Some("show version"));
    }

    #[test]
    fn test_valid_input_passes_through() {
        assert_eq!(
            correct(&sample(), "show interface").as_deref(),
            Some("show interface")
        );
    }

    #[test]
    fn test_non_verb_input_is_ignored() {
        assert_eq!(correct(&sample(), "hello world"), None);
        assert_eq!(correct(&sample(), "why is the link down"), None);
    }

    #[test]
    fn test_truncated_words_agree() {
        let cat = catalog(&["pcap trace on"]);
        assert_eq!(correct(&cat, "pcap tr on").as_deref(), Some("pcap trace on"));
    }

    #[test]
    fn test_hopeless_input_gives_none() {
        assert_eq!(correct(&sample(), "ip fb tbl"), None);
    }
}
