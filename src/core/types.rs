// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// A word in the rhyme lexicon together with its base frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub word: String,
    /// Usage frequency. Carried for callers, not used in scoring.
    pub frequency: u64,
}

impl LexiconEntry {
    pub fn new(word: impl Into<String>, frequency: u64) -> Self {
        Self {
            word: word.into(),
            frequency,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RhymeType {
    Perfect,
    Assonance,
    Alliteration,
    Multisyllabic,
}

impl RhymeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RhymeType::Perfect => "perfect",
            RhymeType::Assonance => "assonance",
            RhymeType::Alliteration => "alliteration",
            RhymeType::Multisyllabic => "multisyllabic",
        }
    }
}

impl fmt::Display for RhymeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stress {
    #[serde(rename = "STRESSED")]
    Stressed,
    #[serde(rename = "unstressed")]
    Unstressed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterInfo {
    /// Always at least 1.
    pub syllables: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_pattern: Option<Vec<Stress>>,
}

/// A ranked rhyme suggestion for the last word of a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RhymeCandidate {
    pub text: String,
    pub rhyme_type: RhymeType,
    /// In `[0, 1]`, higher is better.
    pub score: f64,
    pub meter_info: MeterInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowSuggestion {
    TooLong,
    RoomForAdlibs,
    Good,
}

impl FlowSuggestion {
    pub fn text(&self) -> &'static str {
        match self {
            FlowSuggestion::TooLong => "lines too long, trim words",
            FlowSuggestion::RoomForAdlibs => "room to add pauses/ad-libs",
            FlowSuggestion::Good => "flow is good",
        }
    }
}

/// Per-line syllable counts and the advice derived from them.
///
/// `suggestion` is `None` only when no lines were analyzed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowAnalysis {
    pub syllables: Vec<usize>,
    pub suggestion: Option<FlowSuggestion>,
}

impl FlowAnalysis {
    /// The suggestion as display text; empty when there was nothing to analyze.
    pub fn suggestion_text(&self) -> &'static str {
        self.suggestion.map(|s| s.text()).unwrap_or("")
    }
}
