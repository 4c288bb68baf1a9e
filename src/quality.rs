//! Quality gate for generated replies
//!
//! A generated candidate is only shown if it passes every check. Any
//! rejection sends the turn back to its deterministic fallback.

use std::fmt;

/// Stock phrases that make a reply sound canned
const GENERIC_PHRASES: &[&str] = &[
    "i understand",
    "that's interesting",
    "tell me more",
    "how does that make you feel",
    "i see",
    "that sounds",
    "i'm here to help",
    "i'm sorry to hear that",
    "that's great",
    "thank you for sharing",
    "i don't know",
    "can you elaborate",
];

/// Phrases that become repetitive when they appear in consecutive replies
const REPEATABLE_PHRASES: &[&str] = &[
    "would you like to try a grounding technique",
    "are you experiencing any symptoms",
    "how are you feeling",
    "i'm here for you",
    "let's try",
    "would you like to",
];

/// Words that show the reply is in Pippy's voice
const PERSONA_MARKERS: &[&str] = &[
    "pip", "<i>", "gentle", "wing", "flipper", "nuzzle", "waddle", "hug", "penguin",
];

/// Endings that mean the model stopped mid-thought
const TRUNCATED_ENDINGS: &[&str] = &["...", "…", " and", " but", " or", ","];

const MIN_LENGTH: usize = 15;
const SHORT_GENERIC_LENGTH: usize = 50;
/// Shortest sentence fragment compared against recent replies
const MIN_FRAGMENT_LENGTH: usize = 12;

/// A named check in the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityCheck {
    NonGeneric,
    NonRepetitive,
    PersonaConsistent,
}

impl QualityCheck {
    pub fn name(self) -> &'static str {
        match self {
            QualityCheck::NonGeneric => "non_generic",
            QualityCheck::NonRepetitive => "non_repetitive",
            QualityCheck::PersonaConsistent => "persona_consistent",
        }
    }
}

/// Why a candidate was turned away
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub check: QualityCheck,
    pub reason: &'static str,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.check.name(), self.reason)
    }
}

/// Ordered list of checks a candidate must pass
#[derive(Debug, Clone)]
pub struct QualityGate {
    checks: Vec<QualityCheck>,
}

impl Default for QualityGate {
    fn default() -> Self {
        Self::new(vec![
            QualityCheck::NonGeneric,
            QualityCheck::NonRepetitive,
            QualityCheck::PersonaConsistent,
        ])
    }
}

impl QualityGate {
    pub fn new(checks: Vec<QualityCheck>) -> Self {
        Self { checks }
    }

    /// Run every check; the first failure is returned
    pub fn evaluate(&self, candidate: &str, recent_replies: &[&str]) -> Result<(), Rejection> {
        let lower = candidate.trim().to_lowercase();
        let recent: Vec<String> = recent_replies.iter().map(|r| r.to_lowercase()).collect();

        for check in &self.checks {
            let outcome = match check {
                QualityCheck::NonGeneric => non_generic(&lower),
                QualityCheck::NonRepetitive => non_repetitive(&lower, &recent),
                QualityCheck::PersonaConsistent => persona_consistent(&lower),
            };
            if let Err(reason) = outcome {
                return Err(Rejection {
                    check: *check,
                    reason,
                });
            }
        }
        Ok(())
    }
}

fn non_generic(candidate: &str) -> Result<(), &'static str> {
    let hits = GENERIC_PHRASES
        .iter()
        .filter(|phrase| candidate.contains(*phrase))
        .count();
    if hits >= 2 {
        return Err("several stock phrases");
    }
    if hits == 1 && candidate.chars().count() < SHORT_GENERIC_LENGTH {
        return Err("short stock reply");
    }
    Ok(())
}

fn non_repetitive(candidate: &str, recent: &[String]) -> Result<(), &'static str> {
    if recent.iter().any(|r| r.trim() == candidate) {
        return Err("repeats a recent reply");
    }

    let shares_phrase = REPEATABLE_PHRASES
        .iter()
        .any(|phrase| candidate.contains(phrase) && recent.iter().any(|r| r.contains(phrase)));
    if shares_phrase {
        return Err("reuses a recent prompt phrase");
    }

    let reused_fragment = candidate
        .split(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|fragment| fragment.chars().count() >= MIN_FRAGMENT_LENGTH)
        .any(|fragment| recent.iter().any(|r| r.contains(fragment)));
    if reused_fragment {
        return Err("reuses a recent sentence");
    }
    Ok(())
}

fn persona_consistent(candidate: &str) -> Result<(), &'static str> {
    if candidate.chars().count() < MIN_LENGTH {
        return Err("too short");
    }
    if !PERSONA_MARKERS.iter().any(|marker| candidate.contains(marker)) {
        return Err("not in Pippy's voice");
    }
    if TRUNCATED_ENDINGS.iter().any(|ending| candidate.ends_with(ending)) {
        return Err("ends mid-thought");
    }
    Ok(())
}
