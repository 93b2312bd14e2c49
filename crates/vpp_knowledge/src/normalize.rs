//! Token normalization - abbreviation expansion and plural folding
//!
//! Two ordered rules, both driven by fixed tables: per-token abbreviation
//! expansion (first table entry wins, unmatched tokens pass through), then
//! plural-to-singular folding at token position 1 only, the primary-object
//! slot. `normalize` is idempotent: no expansion output is itself a table key
//! and folding a singular is a no-op.

/// Abbreviations and frequent misspellings, expanded wherever they appear.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("int", "interface"),
    ("intf", "interface"),
    ("interaces", "interface"),
    ("addr", "address"),
    ("adr", "address"),
    ("adress", "address"),
    ("ver", "version"),
    ("verson", "version"),
];

/// Plural object nouns folded to their singular catalog form.
const PLURAL_FOLDS: &[(&str, &str)] = &[
    ("interfaces", "interface"),
    ("routes", "route"),
    ("tunnels", "tunnel"),
    ("policies", "policy"),
    ("associations", "association"),
    ("addresses", "address"),
];

/// Minimum fragment length for the prefix-based plural fallback, so a
/// one-letter token never folds to a full noun.
const PLURAL_PREFIX_MIN: usize = 2;

/// Expand one lowercase token through the abbreviation table.
pub fn expand_token(token: &str) -> &str {
    for (abbrev, full) in ABBREVIATIONS {
        if *abbrev == token {
            return full;
        }
    }
    token
}

/// Lowercase every token and expand abbreviations. Used by completion, where
/// the operator may still be mid-word and plural folding would be wrong.
pub fn expand_abbreviations(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .map(|t| expand_token(&t.to_lowercase()).to_string())
        .collect()
}

/// Fold a position-1 token to singular: exact table match first, then the
/// first plural the token is a prefix of.
fn fold_plural(token: &str) -> Option<&'static str> {
    for (plural, singular) in PLURAL_FOLDS {
        if *plural == token {
            return Some(singular);
        }
    }
    if token.len() >= PLURAL_PREFIX_MIN {
        for (plural, singular) in PLURAL_FOLDS {
            if plural.starts_with(token) {
                return Some(singular);
            }
        }
    }
    None
}

/// Full normalization: lowercase, abbreviation expansion, plural fold at the
/// primary-object slot.
pub fn normalize(tokens: &[String]) -> Vec<String> {
    let mut out = expand_abbreviations(tokens);
    if out.len() >= 2 {
        if let Some(singular) = fold_plural(&out[1]) {
            out[1] = singular.to_string();
        }
    }
    out
}

/// Convenience wrapper over a whole command string.
pub fn normalize_command(command: &str) -> String {
    let tokens: Vec<String> = command.split_whitespace().map(String::from).collect();
    normalize(&tokens).join(" ")
}
