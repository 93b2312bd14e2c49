//! Command catalog - extracted VPP CLI signatures and their lookups
//!
//! The catalog is built once from signatures extracted out-of-process from
//! the dataplane sources and is immutable afterwards. Rebuilds are published
//! wholesale through [`CatalogHandle`]: readers capture an `Arc` snapshot and
//! never observe a partial rebuild.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::info;

/// One element of a command path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathToken {
    /// A fixed word that must match the input literally (case-insensitive).
    Literal(String),
    /// A caller-supplied value slot, e.g. `<interface>`.
    Placeholder(String),
}

impl PathToken {
    /// Parse one whitespace-delimited path element. `<name>` markup becomes a
    /// placeholder; everything else is a literal.
    pub fn parse(word: &str) -> PathToken {
        if word.len() > 2 && word.starts_with('<') && word.ends_with('>') {
            PathToken::Placeholder(word[1..word.len() - 1].to_string())
        } else {
            PathToken::Literal(word.to_string())
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, PathToken::Placeholder(_))
    }

    /// The token as it appears in a rendered path.
    pub fn render(&self) -> String {
        match self {
            PathToken::Literal(word) => word.clone(),
            PathToken::Placeholder(name) => format!("<{name}>"),
        }
    }

    /// Case-insensitive match against one input word. A placeholder matches
    /// any word.
    pub fn matches_word(&self, word: &str) -> bool {
        match self {
            PathToken::Literal(lit) => lit.eq_ignore_ascii_case(word),
            PathToken::Placeholder(_) => true,
        }
    }
}

/// Command category, derived from the path at extraction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Interfaces,
    Routing,
    Ipsec,
    System,
    Configuration,
    Show,
    Lcp,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Interfaces => "interfaces",
            Category::Routing => "routing",
            Category::Ipsec => "ipsec",
            Category::System => "system",
            Category::Configuration => "configuration",
            Category::Show => "show",
            Category::Lcp => "lcp",
            Category::Other => "other",
        }
    }

    /// Derive a category from a rendered command path.
    pub fn classify(path: &str) -> Category {
        let lower = path.to_lowercase();
        if lower.starts_with("show") {
            if lower.contains("interface") {
                Category::Interfaces
            } else if lower.contains("ip") && lower.contains("fib") {
                Category::Routing
            } else if lower.contains("ipsec") {
                Category::Ipsec
            } else if lower.contains("version") || lower.contains("build") {
                Category::System
            } else {
                Category::Show
            }
        } else if lower.starts_with("set") {
            if lower.contains("interface") {
                Category::Interfaces
            } else {
                Category::Configuration
            }
        } else if lower.starts_with("create") || lower.starts_with("delete") {
            Category::Configuration
        } else if lower.starts_with("ip route") {
            Category::Routing
        } else if lower.starts_with("lcp") {
            Category::Lcp
        } else {
            Category::Other
        }
    }
}

/// One catalog entry: a literal/placeholder token sequence plus metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSignature {
    pub path: Vec<PathToken>,
    pub help: String,
    pub category: Category,
    /// Where the signature was extracted from in the dataplane sources.
    pub source: String,
}

impl CommandSignature {
    /// Parse a signature from its rendered path, tagging `<name>` elements as
    /// placeholders. The path must contain at least one token.
    pub fn parse(path: &str, help: &str, source: &str) -> Result<CommandSignature, CatalogError> {
        let tokens: Vec<PathToken> = path.split_whitespace().map(PathToken::parse).collect();
        if tokens.is_empty() {
            return Err(CatalogError::EmptyPath);
        }
        Ok(CommandSignature {
            category: Category::classify(path),
            path: tokens,
            help: help.to_string(),
            source: source.to_string(),
        })
    }

    /// The canonical rendered path, e.g. `trace add <input-graph-node>`.
    pub fn path_string(&self) -> String {
        self.path
            .iter()
            .map(PathToken::render)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn word_count(&self) -> usize {
        self.path.len()
    }

    /// Number of leading literal tokens before the first placeholder.
    pub fn literal_prefix_len(&self) -> usize {
        self.path.iter().take_while(|t| !t.is_placeholder()).count()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("signature path is empty")]
    EmptyPath,
    #[error("duplicate signature path: {0}")]
    DuplicatePath(String),
}

/// Immutable, indexed collection of command signatures.
///
/// Entries are held sorted by rendered path; exact lookups go through a
/// token-sequence key so `show  interface` and `show interface` are the same
/// path while `show interface` never equals `show interface address`.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    entries: Vec<CommandSignature>,
    index: BTreeMap<String, usize>,
}

impl Catalog {
    pub fn new(signatures: Vec<CommandSignature>) -> Result<Catalog, CatalogError> {
        let mut entries = signatures;
        for sig in &entries {
            if sig.path.is_empty() {
                return Err(CatalogError::EmptyPath);
            }
        }
        entries.sort_by_key(|sig| sig.path_string().to_lowercase());
        let mut index = BTreeMap::new();
        for (pos, sig) in entries.iter().enumerate() {
            let key = sig.path_string().to_lowercase();
            if index.insert(key, pos).is_some() {
                return Err(CatalogError::DuplicatePath(sig.path_string()));
            }
        }
        Ok(Catalog { entries, index })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Signatures in rendered-path order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandSignature> {
        self.entries.iter()
    }

    /// Exact lookup by token-sequence equality, case-insensitive.
    pub fn exact_lookup(&self, command: &str) -> Option<&CommandSignature> {
        let key = command
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        self.index.get(&key).map(|&pos| &self.entries[pos])
    }

    /// Signatures whose path starts positionally with `prefix`. Placeholder
    /// tokens absorb any prefix word. Results keep rendered-path order.
    pub fn prefix_lookup(&self, prefix: &[&str]) -> Vec<&CommandSignature> {
        if prefix.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|sig| {
                sig.path.len() >= prefix.len()
                    && prefix
                        .iter()
                        .enumerate()
                        .all(|(pos, word)| sig.path[pos].matches_word(word))
            })
            .collect()
    }

    /// Signatures whose rendered path contains `word` as a substring.
    pub fn token_search(&self, word: &str) -> Vec<&CommandSignature> {
        let needle = word.to_lowercase();
        self.entries
            .iter()
            .filter(|sig| sig.path_string().to_lowercase().contains(&needle))
            .collect()
    }

    /// Substring search over path and help text, capped at `limit` results.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&CommandSignature> {
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|sig| {
                sig.path_string().to_lowercase().contains(&needle)
                    || sig.help.to_lowercase().contains(&needle)
            })
            .take(limit)
            .collect()
    }

    /// Help text for an exactly-matching command.
    pub fn help_for(&self, command: &str) -> Option<&str> {
        self.exact_lookup(command).map(|sig| sig.help.as_str())
    }

    pub fn by_category(&self, category: Category) -> Vec<&CommandSignature> {
        self.entries
            .iter()
            .filter(|sig| sig.category == category)
            .collect()
    }

    /// Distinct first tokens, rendered, in lexical order.
    pub fn first_words(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|sig| sig.path.first())
            .map(PathToken::render)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Shared handle through which a rebuilt catalog is published atomically.
///
/// Readers call [`CatalogHandle::snapshot`] once per operation and work
/// against that snapshot; a concurrent [`CatalogHandle::swap`] is never
/// visible mid-read.
#[derive(Debug, Clone, Default)]
pub struct CatalogHandle {
    inner: Arc<RwLock<Arc<Catalog>>>,
}

impl CatalogHandle {
    pub fn new(catalog: Catalog) -> CatalogHandle {
        CatalogHandle {
            inner: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// Capture the current catalog snapshot.
    pub fn snapshot(&self) -> Arc<Catalog> {
        match self.inner.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Replace the whole catalog in one step.
    pub fn swap(&self, catalog: Catalog) {
        let next = Arc::new(catalog);
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        info!(commands = next.len(), "command catalog replaced");
        *guard = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(path: &str) -> CommandSignature {
        CommandSignature::parse(path, "", "test").unwrap()
    }

    #[test]
    fn test_path_token_parse() {
        assert_eq!(
            PathToken::parse("show"),
            PathToken::Literal("show".to_string())
        );
        assert_eq!(
            PathToken::parse("<interface>"),
            PathToken::Placeholder("interface".to_string())
        );
        // Bare angle brackets are not a placeholder
        assert_eq!(PathToken::parse("<>"), PathToken::Literal("<>".to_string()));
    }

    #[test]
    fn test_placeholder_round_trip() {
        let sig = sig("trace add <input-graph-node>");
        assert_eq!(sig.path_string(), "trace add <input-graph-node>");
        assert_eq!(sig.literal_prefix_len(), 2);
    }

    #[test]
    fn test_category_classification() {
        assert_eq!(Category::classify("show interface"), Category::Interfaces);
        assert_eq!(Category::classify("show ip fib"), Category::Routing);
        assert_eq!(Category::classify("show ipsec sa"), Category::Ipsec);
        assert_eq!(Category::classify("show version"), Category::System);
        assert_eq!(Category::classify("show trace"), Category::Show);
        assert_eq!(
            Category::classify("set interface state"),
            Category::Interfaces
        );
        assert_eq!(Category::classify("create ipsec tunnel"), Category::Configuration);
        assert_eq!(Category::classify("ip route add"), Category::Routing);
        assert_eq!(Category::classify("lcp lcp-sync"), Category::Lcp);
        assert_eq!(Category::classify("trace add"), Category::Other);
    }

    #[test]
    fn test_exact_lookup_is_token_sequence_equality() {
        let catalog =
            Catalog::new(vec![sig("show interface"), sig("show interface address")]).unwrap();
        assert!(catalog.exact_lookup("show interface").is_some());
        assert!(catalog.exact_lookup("SHOW  Interface").is_some());
        assert!(catalog.exact_lookup("show").is_none());
        // A strict prefix is never an exact match
        let hit = catalog.exact_lookup("show interface").unwrap();
        assert_eq!(hit.path_string(), "show interface");
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let err = Catalog::new(vec![sig("show version"), sig("show  version")]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicatePath("show version".to_string()));
    }

    #[test]
    fn test_empty_path_rejected() {
        assert_eq!(
            CommandSignature::parse("   ", "", "test").unwrap_err(),
            CatalogError::EmptyPath
        );
    }

    #[test]
    fn test_prefix_lookup() {
        let catalog = Catalog::new(vec![
            sig("show interface"),
            sig("show interface address"),
            sig("show ip fib"),
            sig("set interface state"),
        ])
        .unwrap();
        let hits = catalog.prefix_lookup(&["show"]);
        assert_eq!(hits.len(), 3);
        let hits = catalog.prefix_lookup(&["show", "interface"]);
        assert_eq!(hits.len(), 2);
        assert!(catalog.prefix_lookup(&[]).is_empty());
    }

    #[test]
    fn test_prefix_lookup_through_placeholder() {
        let catalog = Catalog::new(vec![sig("set interface state <interface> <up|down>")]).unwrap();
        // The placeholder absorbs the concrete argument
        assert_eq!(
            catalog
                .prefix_lookup(&["set", "interface", "state", "eth0"])
                .len(),
            1
        );
    }

    #[test]
    fn test_token_search() {
        let catalog = Catalog::new(vec![
            sig("show interface"),
            sig("show interface address"),
            sig("show ip fib"),
        ])
        .unwrap();
        assert_eq!(catalog.token_search("interface").len(), 2);
        assert_eq!(catalog.token_search("fib").len(), 1);
        assert!(catalog.token_search("unicorn").is_empty());
    }

    #[test]
    fn test_help_for() {
        let catalog = Catalog::new(vec![CommandSignature::parse(
            "show interface",
            "display interface state and counters",
            "vnet/interface/cli.c",
        )
        .unwrap()])
        .unwrap();
        assert_eq!(
            catalog.help_for("show interface"),
            Some("display interface state and counters")
        );
        assert_eq!(catalog.help_for("show ip fib"), None);
    }

    #[test]
    fn test_first_words_sorted() {
        let catalog = Catalog::new(vec![
            sig("show interface"),
            sig("ip route add"),
            sig("set interface state"),
        ])
        .unwrap();
        assert_eq!(catalog.first_words(), vec!["ip", "set", "show"]);
    }

    #[test]
    fn test_handle_swap_is_wholesale() {
        let handle = CatalogHandle::new(Catalog::new(vec![sig("show version")]).unwrap());
        let before = handle.snapshot();
        handle.swap(
            Catalog::new(vec![sig("show interface"), sig("show ip fib")]).unwrap(),
        );
        // The captured snapshot still sees the old catalog in full
        assert_eq!(before.len(), 1);
        assert_eq!(handle.snapshot().len(), 2);
    }

    #[test]
    fn test_empty_catalog_queries() {
        let catalog = Catalog::default();
        assert!(catalog.exact_lookup("show version").is_none());
        assert!(catalog.prefix_lookup(&["show"]).is_empty());
        assert!(catalog.first_words().is_empty());
    }
}
