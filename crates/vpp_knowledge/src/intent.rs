//! Intent classification - structured command versus natural language
//!
//! The decision is table-driven: anchored command templates first, then an
//! explicit conversational-marker list, then verb-led heuristics. Single-word
//! markers are matched as whole tokens, never substrings, so "show" does not
//! light up on "how". An explicit marker always beats a leading verb.

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The binary routing decision for raw operator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Command,
    NaturalLanguage,
}

/// First words that open an administrative command.
pub const ADMIN_VERBS: &[&str] = &[
    "show", "set", "create", "delete", "ip", "lcp", "trace", "clear", "pcap",
];

/// Canonical command shapes: verb plus constrained object vocabulary,
/// anchored at the start. A match here is a command regardless of anything
/// that follows.
static COMMAND_TEMPLATES: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"^show\s+(version|interfaces?|int(\s+addr|\s+address)?|interface\s+address|ip\s+fib|ipsec\s+(sa|spd|tunnel)|lcp|errors|run)(\s|$)",
        r"^show\s+ip\s+fib\s+",
        r"^set\s+interface\s+(state|ip\s+address)\s+",
        r"^ip\s+route\s+add\s+",
        r"^create\s+ipsec\s+tunnel",
        r"^lcp\s+lcp-sync\s+(on|off)$",
        r"^delete\s+",
    ])
    .unwrap()
});

/// Conversational words, matched as whole tokens only.
const MARKER_WORDS: &[&str] = &["what", "how", "why", "explain", "tell", "please"];

/// Conversational phrases, matched as substrings of the lowered input.
const MARKER_PHRASES: &[&str] = &[
    "show me", "can you", "help me", "i need", "i want", "give me", "let me", "could you",
    "would you", "do you", "are there", "is there",
];

/// Articles and filler that a structured command never carries.
const FUNCTION_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "me", "you", "please", "can", "could", "would",
];

static DOTTED_QUAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+\.\d+\.\d+\.\d+").unwrap()
});

static DEVICE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(eth|gigabit|ge|tun|tap|vpp|local|bond|vlan|vxlan)\d+")
        .unwrap()
});

fn has_marker(lower: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|t| MARKER_WORDS.contains(t))
        || MARKER_PHRASES.iter().any(|p| lower.contains(p))
}

/// Classify raw input as a structured command or a natural-language request.
pub fn classify(text: &str) -> Intent {
    let lower = text.trim().to_lowercase();
    if lower.is_empty() {
        return Intent::NaturalLanguage;
    }
    if COMMAND_TEMPLATES.is_match(&lower) {
        debug!(input = %lower, "matched command template");
        return Intent::Command;
    }
    let tokens: Vec<&str> = lower.split_whitespace().collect();
    if has_marker(&lower, &tokens) {
        return Intent::NaturalLanguage;
    }
    let verb_led = tokens
        .first()
        .is_some_and(|first| ADMIN_VERBS.contains(first));
    if !verb_led {
        return Intent::NaturalLanguage;
    }
    if tokens.iter().any(|t| FUNCTION_WORDS.contains(t)) {
        return Intent::NaturalLanguage;
    }
    if DOTTED_QUAD.is_match(&lower) || DEVICE_NAME.is_match(&lower) {
        return Intent::Command;
    }
    // Short verb-led input reads as a command; so does longer input, once
    // function words have been excluded above
    Intent::Command
}

/// Phrasings that ask about previously shown output. These stay in scope for
/// the assistant, so they are exempt from the general-question rejection.
static OUTPUT_INTERPRETATION: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"explain.*output",
        r"explain.*result",
        r"explain.*above",
        r"explain.*previous",
        r"what.*output.*mean",
        r"what.*result.*mean",
        r"what.*this.*mean",
        r"interpret.*output",
        r"interpret.*result",
        r"help.*understand.*output",
        r"help.*understand.*result",
        r"what.*mean",
        r"explain.*detail",
        r"explain.*each",
    ])
    .unwrap()
});

/// Phrasings that ask for encyclopedia-style dataplane knowledge rather than
/// help with a live problem.
static GENERAL_TOPIC: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"^what is vpp",
        r"^what.*vpp$",
        r"^tell me.*vpp",
        r"^explain.*vpp$",
        r"^show me.*vpp.*feature",
        r"^what.*vpp.*capabilit",
        r"^what.*vpp.*do$",
        r"^how.*vpp.*work$",
        r"^describe.*vpp",
        r"^vpp.*feature$",
        r"^vpp.*capabilit$",
        r"^vpp.*architecture$",
        r"^vpp.*overview$",
    ])
    .unwrap()
});

const QUESTION_WORDS: &[&str] = &["what", "tell", "explain", "show"];

/// Substrings that tie a short question to a live debugging context.
const DEBUG_CONTEXT: &[&str] = &[
    "output", "result", "above", "previous", "this", "that", "mean", "interpret", "detail",
    "each", "debug", "troubleshoot", "error",
];

/// Whether input asks for general dataplane knowledge instead of debugging
/// help. Output-interpretation phrasings are exempted before the topic
/// templates run; the short-question fallback never fires on anything that
/// classifies as a command.
pub fn is_general_question(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    if lower.is_empty() {
        return false;
    }
    if OUTPUT_INTERPRETATION.is_match(&lower) {
        return false;
    }
    if GENERAL_TOPIC.is_match(&lower) {
        return true;
    }
    let tokens: Vec<&str> = lower.split_whitespace().collect();
    if tokens.len() <= 4
        && tokens.iter().any(|t| QUESTION_WORDS.contains(t))
        && !DEBUG_CONTEXT.iter().any(|k| lower.contains(k))
        && classify(&lower) != Intent::Command
    {
        return true;
    }
    false
}
