// File: src/core/flow.rs
use crate::core::phonetics::syllable_count;
use crate::core::types::{FlowAnalysis, FlowSuggestion};

/// Syllables per line that fit two bars at the reference tempo.
const SYLLABLES_AT_REFERENCE_BPM: f64 = 16.0;
const REFERENCE_BPM: f64 = 90.0;

pub const DEFAULT_BPM: u32 = 90;

pub fn line_syllables(line: &str) -> usize {
    line.split_whitespace().map(syllable_count).sum()
}

/// Compares the average syllables per line against the tempo-derived target.
pub fn analyze_flow<S: AsRef<str>>(lines: &[S], bpm: u32) -> FlowAnalysis {
    let syllables: Vec<usize> = lines.iter().map(|l| line_syllables(l.as_ref())).collect();
    if syllables.is_empty() {
        return FlowAnalysis {
            syllables,
            suggestion: None,
        };
    }

    let target = (bpm as f64 / REFERENCE_BPM) * SYLLABLES_AT_REFERENCE_BPM;
    let avg = syllables.iter().sum::<usize>() as f64 / syllables.len() as f64;

    let suggestion = if avg > target * 1.2 {
        FlowSuggestion::TooLong
    } else if avg < target * 0.8 {
        FlowSuggestion::RoomForAdlibs
    } else {
        FlowSuggestion::Good
    };

    FlowAnalysis {
        syllables,
        suggestion: Some(suggestion),
    }
}

const HARDER_WORDS: &[(&str, &str)] = &[
    ("mooi", "raw"),
    ("goed", "zieke"),
    ("leuk", "vet"),
    ("beter", "blazend"),
    ("groot", "massief"),
];

const POETIC_WORDS: &[(&str, &str)] = &[
    ("zieke", "mysterieuze"),
    ("vet", "elegante"),
    ("raw", "sublieme"),
    ("snelle", "zwierende"),
];

fn swap_words(words: &[&str], map: &[(&str, &str)]) -> String {
    words
        .iter()
        .map(|w| {
            let lower = w.to_lowercase();
            map.iter()
                .find(|(from, _)| *from == lower)
                .map(|(_, to)| *to)
                .unwrap_or(*w)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Alternative phrasings of a line: a harder one, a more poetic one and a
/// tag-on for lines that end on a short word.
pub fn generate_flow_variations(line: &str) -> Vec<String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let mut variations = Vec::new();

    let harder = swap_words(&words, HARDER_WORDS);
    if harder != line {
        variations.push(harder);
    }

    let poetic = swap_words(&words, POETIC_WORDS);
    if poetic != line {
        variations.push(poetic);
    }

    if let Some(last) = words.last() {
        if syllable_count(last) <= 2 {
            variations.push(format!("{}, blijf niet stilstaan", line));
        }
    }

    variations
}
