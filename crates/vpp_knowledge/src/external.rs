//! Trait seams toward the engine's external collaborators
//!
//! The engine itself never executes commands or calls a model; these traits
//! let callers wire those collaborators up and hand the engine a catalog.
//! Implementations live outside this crate.

use crate::catalog::{Catalog, CatalogHandle};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Source of the current command catalog.
pub trait CatalogProvider {
    fn current_catalog(&self) -> Arc<Catalog>;
}

impl CatalogProvider for CatalogHandle {
    fn current_catalog(&self) -> Arc<Catalog> {
        self.snapshot()
    }
}

/// Raw output of one dataplane command execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs a validated command against the live dataplane. Callers invoke this
/// around the engine; the engine never does.
pub trait DataplaneExecutor {
    fn run(&self, command: &str) -> Result<ExecOutput>;
}

/// Opaque free-text source whose answers get scanned for hallucinated
/// commands.
pub trait LanguageModel {
    fn complete(&self, prompt: &str) -> Result<String>;
}

/// Phrasings the dataplane uses to report failure in stdout. Errors often
/// arrive there with a zero exit status, so callers cannot rely on stderr.
const ERROR_PHRASES: &[&str] = &[
    "unknown input",
    "unknown command",
    "invalid",
    "failed",
    "error:",
    "not found",
    "does not exist",
    "no such",
];

/// Whether raw executor output reads as a dataplane error. Inspects phrasing
/// only; no output parsing.
pub fn looks_like_dataplane_error(output: &str) -> bool {
    if output.is_empty() {
        return false;
    }
    let lower = output.to_lowercase();
    ERROR_PHRASES.iter().any(|p| lower.contains(p))
}
