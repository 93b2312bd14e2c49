//! Prefix-based next-token completion
//!
//! Completion distinguishes "finish the word I am typing" from "tell me what
//! comes next": when the final partial token is a strict prefix of the
//! catalog token at the same position, candidates are completions of that
//! word; when it matches the position outright, candidates are the tokens at
//! the following position. Abbreviations are expanded but plurals are left
//! alone, since a trailing fragment may still be mid-word.

use crate::catalog::{Catalog, PathToken};
use crate::normalize;
use std::collections::BTreeSet;

/// Candidate next tokens for a partial command, deduplicated and lexically
/// sorted. An empty partial lists the catalog's first words; an empty result
/// means no known continuation.
pub fn complete(catalog: &Catalog, partial: &str) -> Vec<String> {
    let tokens: Vec<String> = partial.split_whitespace().map(String::from).collect();
    if tokens.is_empty() {
        return catalog.first_words();
    }
    let tokens = normalize::expand_abbreviations(&tokens);
    let (fragment, settled) = match tokens.split_last() {
        Some((last, rest)) => (last.as_str(), rest),
        None => return catalog.first_words(),
    };
    let fragment_pos = settled.len();

    let mut out = BTreeSet::new();
    for sig in catalog.iter() {
        if sig.path.len() <= fragment_pos {
            continue;
        }
        let settled_agrees = settled
            .iter()
            .enumerate()
            .all(|(pos, word)| sig.path[pos].matches_word(word));
        if !settled_agrees {
            continue;
        }
        let at_fragment = &sig.path[fragment_pos];
        if at_fragment.matches_word(fragment) {
            // The fragment is a whole word here; offer what follows it
            if let Some(next) = sig.path.get(fragment_pos + 1) {
                out.insert(next.render());
            }
        } else if let PathToken::Literal(word) = at_fragment {
            if word.to_lowercase().starts_with(fragment) {
                out.insert(word.clone());
            }
        }
    }
    out.into_iter().collect()
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
        catalog(&["show interface", "show interface address", "show ip fib"])
    }

    #[test]
    fn test_next_token_after_whole_word() {
        assert_eq!(complete(&sample(), "show"), vec!["interface", "ip"]);
        assert_eq!(complete(&sample(), "show interface"), vec!["address"]);
    }

    #[test]
    fn test_current_word_fragment() {
        assert_eq!(complete(&sample(), "show interface a"), vec!["address"]);
        assert_eq!(complete(&sample(), "show i"), vec!["interface", "ip"]);
    }

    #[test]
    fn test_abbreviations_expand_but_plurals_do_not() {
        // "int" expands to "interface", a whole word, so the next token comes
        assert_eq!(complete(&sample(), "show int"), vec!["address"]);
        // "interfaces" is not folded and matches nothing
        assert!(complete(&sample(), "show interfaces").is_empty());
    }

    #[test]
    fn test_empty_partial_lists_first_words() {
        assert_eq!(complete(&sample(), ""), vec!["show"]);
        assert_eq!(complete(&sample(), "   "), vec!["show"]);
    }

    #[test]
    fn test_placeholder_absorbs_argument() {
        let cat = catalog(&["set interface state <interface> <up|down>"]);
        assert_eq!(
            complete(&cat, "set interface state eth0"),
            vec!["<up|down>"]
        );
    }

    #[test]
    fn test_no_continuation() {
        assert!(complete(&sample(), "show version").is_empty());
        assert!(complete(&Catalog::default(), "show").is_empty());
    }
}
