//! Hallucination scanning over model-generated prose
//!
//! A language model recommending dataplane commands will occasionally invent
//! syntax. The scanner pulls command-looking candidates out of free text,
//! checks each against a static table of known-bad shapes first and the
//! catalog second, and reports an aggregate confidence the caller can gate
//! on. Extraction is heuristic by design; the confidence figure, not any one
//! candidate, is the signal.

use crate::catalog::Catalog;
use crate::structural::PLACEHOLDER_MARKER;
use crate::validate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// A command shape models repeatedly invent, with the real form. Checked
/// before the catalog so the correction wins even when a catalog entry would
/// partially match.
struct KnownHallucination {
    pattern: Regex,
    corrected: &'static str,
    reason: &'static str,
}

static KNOWN_HALLUCINATIONS: Lazy<Vec<KnownHallucination>> = Lazy::new(|| {
    vec![
        KnownHallucination {
            pattern: Regex::new(r"(?i)trace add <interface[^>]*>").unwrap(),
            corrected: "trace add <input-graph-node>",
            reason: "trace add takes an input graph node, not an interface name",
        },
        KnownHallucination {
            pattern: Regex::new(r"(?i)trace add.*interface").unwrap(),
            corrected: "trace add <input-graph-node>",
            reason: "trace add takes an input graph node, not an interface name",
        },
        KnownHallucination {
            pattern: Regex::new(r"(?i)trace add\s+(eth|gigabit|ge|tun|tap|vpp|local|bond|vlan|vxlan)\d+")
                .unwrap(),
            corrected: "trace add <input-graph-node>",
            reason: "trace add takes an input graph node, not an interface name",
        },
        KnownHallucination {
            pattern: Regex::new(r"(?i)show trace max <number").unwrap(),
            corrected: "show trace [max COUNT]",
            reason: "show trace max takes the count directly",
        },
        KnownHallucination {
            pattern: Regex::new(r"(?i)show trace detail").unwrap(),
            corrected: "show trace [max COUNT]",
            reason: "show trace has no detail option",
        },
    ]
});

/// One known-hallucination table hit, keyed by the offending candidate in
/// [`ScanReport::known_hallucinations`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownHallucinationHit {
    pub corrected: String,
    pub reason: String,
}

/// Aggregated scan outcome for one piece of free text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub valid_commands: BTreeSet<String>,
    pub invalid_commands: BTreeSet<String>,
    pub suggestions: BTreeMap<String, Vec<String>>,
    pub known_hallucinations: BTreeMap<String, KnownHallucinationHit>,
    /// Share of extracted candidates the catalog accepted; 1.0 when nothing
    /// was extracted.
    pub confidence: f64,
}

impl Default for ScanReport {
    fn default() -> ScanReport {
        ScanReport {
            valid_commands: BTreeSet::new(),
            invalid_commands: BTreeSet::new(),
            suggestions: BTreeMap::new(),
            known_hallucinations: BTreeMap::new(),
            confidence: 1.0,
        }
    }
}

static BACKTICK: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

static BULLET_COMMAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[\d.*\-]+\s*(show|set|create|delete|ip|lcp|trace|pcap|clear|save)\b")
        .unwrap()
});

static BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d.*\-]+\s*").unwrap());

static EMBEDDED_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

const STANDALONE_VERBS: &[&str] = &["show ", "set ", "create ", "delete ", "ip ", "lcp "];

/// Substrings marking a line as prose about a command rather than a command.
const REFERENCE_WORDS: &[&str] = &["the", "this", "these", "command", "use"];

/// Description separators: everything from the first one on is prose.
const SEPARATORS: &[&str] = &[" - ", " to ", " for ", " This "];

fn strip_wrapper_prefix(command: &str) -> &str {
    command
        .strip_prefix("vppctl ")
        .map(str::trim)
        .unwrap_or(command)
}

fn trim_description(command: &str) -> &str {
    let mut out = command;
    for sep in SEPARATORS {
        if let Some((head, _)) = out.split_once(sep) {
            out = head;
        }
    }
    out.trim()
}

/// Command-looking candidates in `text`, deduplicated in encounter order.
fn extract_candidates(text: &str) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();
    let mut push = |cmd: String| {
        if !cmd.is_empty() && !candidates.contains(&cmd) {
            candidates.push(cmd);
        }
    };

    for caps in BACKTICK.captures_iter(text) {
        let cmd = strip_wrapper_prefix(caps[1].trim());
        push(cmd.to_string());
    }

    for line in text.lines().map(str::trim) {
        if BULLET_COMMAND.is_match(line) {
            let rest = BULLET_PREFIX.replace(line, "");
            let cmd = trim_description(strip_wrapper_prefix(rest.trim()));
            let collapsed = EMBEDDED_PLACEHOLDER.replace_all(cmd, PLACEHOLDER_MARKER);
            push(collapsed.trim().to_string());
        }
    }

    for line in text.lines().map(str::trim) {
        let lower = line.to_lowercase();
        if STANDALONE_VERBS.iter().any(|v| lower.starts_with(v))
            && !REFERENCE_WORDS.iter().any(|w| lower.contains(w))
        {
            let mut words = line.split_whitespace();
            if let (Some(first), Some(second)) = (words.next(), words.next()) {
                push(format!("{first} {second}"));
            }
        }
    }

    candidates
}

/// Scan free text for dataplane commands and audit every candidate.
pub fn scan(catalog: &Catalog, text: &str) -> ScanReport {
    let candidates = extract_candidates(text);
    let mut report = ScanReport::default();

    for candidate in &candidates {
        if let Some(known) = KNOWN_HALLUCINATIONS
            .iter()
            .find(|k| k.pattern.is_match(candidate))
        {
            debug!(candidate = %candidate, corrected = known.corrected, "known hallucination");
            report.invalid_commands.insert(candidate.clone());
            report
                .suggestions
                .insert(candidate.clone(), vec![known.corrected.to_string()]);
            report.known_hallucinations.insert(
                candidate.clone(),
                KnownHallucinationHit {
                    corrected: known.corrected.to_string(),
                    reason: known.reason.to_string(),
                },
            );
            continue;
        }
        let verdict = validate::validate(catalog, candidate);
        if verdict.valid {
            report.valid_commands.insert(candidate.clone());
        } else {
            report.invalid_commands.insert(candidate.clone());
            if !verdict.suggestions.is_empty() {
                report
                    .suggestions
                    .insert(candidate.clone(), verdict.suggestions);
            }
        }
    }

    let total = report.valid_commands.len() + report.invalid_commands.len();
    if total > 0 {
        report.confidence = report.valid_commands.len() as f64 / total as f64;
    }
    debug!(
        candidates = candidates.len(),
        valid = report.valid_commands.len(),
        invalid = report.invalid_commands.len(),
        confidence = report.confidence,
        "scan complete"
    );
    report
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
            "show ip fib",
            "set interface state <interface> <up|down>",
            "trace add <input-graph-node>",
        ])
    }

    #[test]
    fn test_no_candidates_means_full_confidence() {
        let report = scan(&sample(), "Everything looks healthy, nothing to run.");
        assert_eq!(report.confidence, 1.0);
        assert!(report.valid_commands.is_empty());
        assert!(report.invalid_commands.is_empty());
    }

    #[test]
    fn test_backtick_extraction() {
        let report = scan(&sample(), "Run `show interface`, then `vppctl show ip fib`.");
        assert!(report.valid_commands.contains("show interface"));
        assert!(report.valid_commands.contains("show ip fib"));
        assert_eq!(report.confidence, 1.0);
    }

    #[test]
    fn test_known_hallucination_bypasses_catalog() {
        // The catalog is empty, so only the static table can flag this
        let report = scan(&Catalog::default(), "Try `trace add eth0` first.");
        assert!(report.invalid_commands.contains("trace add eth0"));
        let hit = &report.known_hallucinations["trace add eth0"];
        assert_eq!(hit.corrected, "trace add <input-graph-node>");
        assert_eq!(
            report.suggestions["trace add eth0"],
            vec!["trace add <input-graph-node>"]
        );
    }

    #[test]
    fn test_bullet_extraction_trims_description() {
        let text = "Steps:\n1. show interface - check link state\n- show ip fib to inspect routes";
        let report = scan(&sample(), text);
        assert!(report.valid_commands.contains("show interface"));
        assert!(report.valid_commands.contains("show ip fib"));
    }

    #[test]
    fn test_bullet_extraction_collapses_placeholders() {
        let text = "1. set interface state <interface_name> up";
        let report = scan(&sample(), text);
        assert!(report
            .valid_commands
            .contains("set interface state <placeholder> up"));
    }

    #[test]
    fn test_standalone_lines_skip_prose() {
        let text = "show interface\nuse the show ip fib command instead";
        let report = scan(&sample(), text);
        assert!(report.valid_commands.contains("show interface"));
        assert!(!report.valid_commands.contains("show ip"));
    }

    #[test]
    fn test_mixed_confidence() {
        let report = scan(&sample(), "`show interface` and `show flux capacitor`");
        assert!(report.valid_commands.contains("show interface"));
        assert!(report.invalid_commands.contains("show flux capacitor"));
        assert_eq!(report.confidence, 0.5);
    }

    #[test]
    fn test_duplicates_collapse() {
        let report = scan(&sample(), "`show interface` then `show interface` again");
        assert_eq!(report.valid_commands.len(), 1);
        assert_eq!(report.confidence, 1.0);
    }
}
