//! Engine facade - one object, the full interface
//!
//! `KnowledgeEngine` composes the catalog with the matching, completion,
//! intent and scanning components behind a single constructor. Every call
//! captures one catalog snapshot up front, so a concurrent rebuild never
//! bleeds into an in-flight operation and each result is a pure function of
//! (snapshot, input).

use crate::catalog::{Catalog, CatalogHandle, Category};
use crate::complete;
use crate::correct;
use crate::intent::{self, Intent};
use crate::scan::{self, ScanReport};
use crate::validate::{self, ValidationVerdict};

#[derive(Debug, Clone, Default)]
pub struct KnowledgeEngine {
    catalog: CatalogHandle,
}

impl KnowledgeEngine {
    pub fn new(catalog: CatalogHandle) -> KnowledgeEngine {
        KnowledgeEngine { catalog }
    }

    /// Convenience constructor over a one-shot catalog.
    pub fn from_catalog(catalog: Catalog) -> KnowledgeEngine {
        KnowledgeEngine::new(CatalogHandle::new(catalog))
    }

    /// The shared handle, for publishing catalog rebuilds.
    pub fn catalog_handle(&self) -> &CatalogHandle {
        &self.catalog
    }

    /// Validate one command against the current catalog.
    pub fn validate(&self, command: &str) -> ValidationVerdict {
        validate::validate(&self.catalog.snapshot(), command)
    }

    /// Candidate next tokens for a partial command.
    pub fn complete(&self, partial: &str) -> Vec<String> {
        complete::complete(&self.catalog.snapshot(), partial)
    }

    /// Command-versus-natural-language routing decision.
    pub fn classify(&self, text: &str) -> Intent {
        intent::classify(text)
    }

    /// Whether input asks for general knowledge rather than debugging help.
    pub fn is_general_question(&self, text: &str) -> bool {
        intent::is_general_question(text)
    }

    /// Audit free text for fabricated commands.
    pub fn scan(&self, text: &str) -> ScanReport {
        scan::scan(&self.catalog.snapshot(), text)
    }

    /// Single best correction for a mistyped command, if any.
    pub fn correct(&self, input: &str) -> Option<String> {
        correct::correct(&self.catalog.snapshot(), input)
    }

    /// Help text for an exactly-matching command.
    pub fn help_for(&self, command: &str) -> Option<String> {
        self.catalog
            .snapshot()
            .help_for(command)
            .map(String::from)
    }

    /// Rendered paths in one category, in lexical order.
    pub fn commands_in(&self, category: Category) -> Vec<String> {
        self.catalog
            .snapshot()
            .by_category(category)
            .iter()
            .map(|sig| sig.path_string())
            .collect()
    }
}
