//! Candidate-list grammar.
//!
//! ```text
//! candidate_list := candidate (',' candidate)*
//! candidate      := url WS descriptor
//! descriptor     := digits ('w' | 'x')
//! ```
//!
//! The strict pattern anchors on the whole string and requires a descriptor
//! on every candidate. Relaxed mode also accepts bare URL candidates.

use std::sync::OnceLock;
use regex::Regex;
use serde::{Deserialize, Serialize};

static STRICT_REGEX: OnceLock<Regex> = OnceLock::new();
static RELAXED_REGEX: OnceLock<Regex> = OnceLock::new();
static CANDIDATE_REGEX: OnceLock<Regex> = OnceLock::new();

fn compile(pattern: &'static str, slot: &'static OnceLock<Regex>) -> &'static Regex {
    slot.get_or_init(|| Regex::new(pattern).expect("Failed to compile candidate-list regex"))
}

fn strict_regex() -> &'static Regex {
    compile(r"^(?:\s*\S+\s\d+[wx],?)+$", &STRICT_REGEX)
}

fn relaxed_regex() -> &'static Regex {
    compile(
        r"^\s*[^\s,]+(?:\s+\d+[wx])?\s*(?:,\s*[^\s,]+(?:\s+\d+[wx])?\s*)*$",
        &RELAXED_REGEX,
    )
}

fn candidate_regex() -> &'static Regex {
    compile(r"\s*(\S+)\s(\d+)([wx]),?", &CANDIDATE_REGEX)
}

/// How strictly the candidate list is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GrammarMode {
    /// Every candidate needs a width or density descriptor.
    #[default]
    Strict,
    /// A candidate may be a bare URL.
    Relaxed,
}

impl GrammarMode {
    /// Check a candidate list. Absent lists never pass.
    pub fn accepts(&self, srcset: Option<&str>) -> bool {
        let Some(srcset) = srcset else {
            return false;
        };
        match self {
            GrammarMode::Strict => strict_regex().is_match(srcset),
            GrammarMode::Relaxed => {
                strict_regex().is_match(srcset) || relaxed_regex().is_match(srcset)
            }
        }
    }
}

/// Candidate descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descriptor {
    Width(u32),
    Density(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub url: String,
    /// `None` only for bare candidates accepted in relaxed mode.
    pub descriptor: Option<Descriptor>,
}

/// A candidate list split into its entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateList {
    pub candidates: Vec<Candidate>,
}

impl CandidateList {
    /// Split a list that `mode` accepts. Returns `None` otherwise.
    pub fn parse(srcset: &str, mode: GrammarMode) -> Option<Self> {
        if strict_regex().is_match(srcset) {
            let candidates = candidate_regex()
                .captures_iter(srcset)
                .map(|caps| Candidate {
                    url: caps[1].to_string(),
                    descriptor: parse_descriptor(&caps[2], &caps[3]),
                })
                .collect();
            return Some(Self { candidates });
        }

        if !mode.accepts(Some(srcset)) {
            return None;
        }

        let candidates = srcset
            .split(',')
            .filter_map(|entry| {
                let mut parts = entry.split_whitespace();
                let url = parts.next()?;
                let descriptor = parts.next().and_then(|d| {
                    d.strip_suffix('w')
                        .map(|digits| (digits, "w"))
                        .or_else(|| d.strip_suffix('x').map(|digits| (digits, "x")))
                        .and_then(|(digits, unit)| parse_descriptor(digits, unit))
                });
                Some(Candidate {
                    url: url.to_string(),
                    descriptor,
                })
            })
            .collect();
        Some(Self { candidates })
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Digit runs too long for `u32` saturate rather than dropping the descriptor.
fn parse_descriptor(digits: &str, unit: &str) -> Option<Descriptor> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = digits.parse::<u32>().unwrap_or(u32::MAX);
    match unit {
        "w" => Some(Descriptor::Width(value)),
        "x" => Some(Descriptor::Density(value)),
        _ => None,
    }
}
