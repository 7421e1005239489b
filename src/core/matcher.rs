// File: src/core/matcher.rs
//! Tiered rhyme classification. Each matcher inspects one query/candidate
//! pair; the first tier that returns a classification decides the outcome.

use crate::core::distance::phoneme_distance;
use crate::core::phonetics::{is_alliteration, is_assonance};
use crate::core::types::RhymeType;

/// Keys further apart than this are not considered near rhymes.
pub const MAX_NEAR_DISTANCE: usize = 2;
const DISTANCE_PENALTY: f64 = 0.2;
const ASSONANCE_SCORE: f64 = 0.6;
const ALLITERATION_SCORE: f64 = 0.4;

pub struct MatchInput<'a> {
    pub query_word: &'a str,
    pub query_key: &'a str,
    pub candidate_word: &'a str,
    pub candidate_key: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub rhyme_type: RhymeType,
    pub score: f64,
}

pub type Matcher = fn(&MatchInput<'_>) -> Option<Classification>;

/// Highest priority first.
pub const MATCHERS: [Matcher; 4] = [exact_key, near_key, assonance, alliteration];

pub fn classify(input: &MatchInput<'_>) -> Option<Classification> {
    MATCHERS.iter().find_map(|matcher| matcher(input))
}

pub fn exact_key(input: &MatchInput<'_>) -> Option<Classification> {
    (input.query_key == input.candidate_key).then_some(Classification {
        rhyme_type: RhymeType::Perfect,
        score: 1.0,
    })
}

pub fn near_key(input: &MatchInput<'_>) -> Option<Classification> {
    let distance = phoneme_distance(input.query_key, input.candidate_key);
    if distance > MAX_NEAR_DISTANCE {
        return None;
    }
    let rhyme_type = if distance == 0 {
        RhymeType::Perfect
    } else {
        RhymeType::Multisyllabic
    };
    Some(Classification {
        rhyme_type,
        score: 1.0 - DISTANCE_PENALTY * distance as f64,
    })
}

pub fn assonance(input: &MatchInput<'_>) -> Option<Classification> {
    is_assonance(input.query_word, input.candidate_word).then_some(Classification {
        rhyme_type: RhymeType::Assonance,
        score: ASSONANCE_SCORE,
    })
}

pub fn alliteration(input: &MatchInput<'_>) -> Option<Classification> {
    is_alliteration(input.query_word, input.candidate_word).then_some(Classification {
        rhyme_type: RhymeType::Alliteration,
        score: ALLITERATION_SCORE,
    })
}
