// src/lib.rs

pub mod c_api;
pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub mod slang;

pub use crate::core::distance::phoneme_distance;
pub use crate::core::engine::RhymeEngine;
pub use crate::core::flow::{analyze_flow, generate_flow_variations};
pub use crate::core::phonetics::{
    extract_rhyme_key, is_alliteration, is_assonance, phonemize, stress_pattern, syllable_count,
};
pub use crate::core::types::{
    FlowAnalysis, FlowSuggestion, LexiconEntry, MeterInfo, RhymeCandidate, RhymeType, Stress,
};
pub use crate::slang::{SlangDetection, SlangStore, SlangTerm};
