//! VPP Command Knowledge Engine
//!
//! Matching, completion, intent routing and hallucination auditing for
//! vppctl commands. The engine decides whether free text denotes a real
//! dataplane command, resolves it against an immutable signature catalog
//! (exactly, normalized, structurally, fuzzily), and audits language-model
//! prose for commands that do not exist.

pub mod catalog;
pub mod complete;
pub mod correct;
pub mod engine;
pub mod external;
pub mod intent;
pub mod normalize;
pub mod scan;
pub mod similarity;
pub mod structural;
pub mod validate;

pub use catalog::{
    Catalog, CatalogError, CatalogHandle, Category, CommandSignature, PathToken,
};
pub use engine::KnowledgeEngine;
pub use external::{
    looks_like_dataplane_error, CatalogProvider, DataplaneExecutor, ExecOutput, LanguageModel,
};
pub use intent::Intent;
pub use scan::{KnownHallucinationHit, ScanReport};
pub use validate::{MatchKind, ValidationVerdict};
