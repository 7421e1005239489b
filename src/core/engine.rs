use crate::config::EngineConfig;
use crate::core::cache::RhymeCache;
use crate::core::flow::analyze_flow;
use crate::core::lexicon::Lexicon;
use crate::core::matcher::{classify, MatchInput};
use crate::core::phonetics::{extract_rhyme_key, phonemize, syllable_count};
use crate::core::types::{FlowAnalysis, MeterInfo, RhymeCandidate};
use crate::error::StoreError;
use crate::persistence::FileStore;
use crate::slang::{SlangDetection, SlangStore, SlangTerm};
use parking_lot::Mutex;
use std::cmp::Ordering;

const TRAILING_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

// The engine owns all mutable state. Rhyme queries take `&self`; the cache
// sits behind its own lock so one engine can serve several threads.
pub struct RhymeEngine {
    lexicon: Lexicon,
    cache: Mutex<RhymeCache>,
    pub slang: SlangStore,
    max_results: usize,
    bpm: u32,
}

impl RhymeEngine {
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    /// Built-in lexicon and in-memory slang, tuned by `config`.
    pub fn with_config(config: &EngineConfig) -> Self {
        let mut engine =
            Self::with_parts(Lexicon::builtin(), SlangStore::new(), config.cache_capacity);
        engine.max_results = config.max_results;
        engine.bpm = config.bpm;
        engine
    }

    /// Like [`RhymeEngine::with_config`], with slang persisted to the configured file.
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut engine = Self::with_config(config);
        match config.resolved_slang_path() {
            Some(path) => {
                let store = FileStore::new(path);
                tracing::debug!("Slang store at {:?}", store.path());
                engine.slang = SlangStore::open(Box::new(store), config.slang_format);
            }
            None => tracing::warn!("No data directory found, slang changes will not be saved"),
        }
        engine
    }

    pub fn with_parts(lexicon: Lexicon, slang: SlangStore, cache_capacity: usize) -> Self {
        let defaults = EngineConfig::default();
        Self {
            lexicon,
            cache: Mutex::new(RhymeCache::new(cache_capacity)),
            slang,
            max_results: defaults.max_results,
            bpm: defaults.bpm,
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    pub fn set_bpm(&mut self, bpm: u32) {
        self.bpm = bpm;
    }

    /// Ranked rhyme candidates for the last word of `line`.
    ///
    /// Context lines are accepted for callers but do not affect ranking.
    pub fn generate_rhymes<S: AsRef<str>>(
        &self,
        line: &str,
        _context_lines: &[S],
        max_results: usize,
    ) -> Vec<RhymeCandidate> {
        let Some(last) = line.split_whitespace().last() else {
            return vec![];
        };
        let word = last.to_lowercase();
        // A punctuation-only token leaves an empty word; it still gets ranked.
        let word = word.trim_end_matches(TRAILING_PUNCTUATION);

        let cache_key = RhymeCache::key(word, max_results);
        let cached = self.cache.lock().get(&cache_key);
        if let Some(hit) = cached {
            tracing::debug!("Rhyme cache hit for '{}'", cache_key);
            return hit;
        }

        let key = extract_rhyme_key(&phonemize(word), word);
        tracing::debug!("Rhyme key for '{}' is '{}'", word, key);

        let mut candidates: Vec<RhymeCandidate> = self
            .lexicon
            .iter()
            .filter(|indexed| indexed.entry.word != word)
            .filter_map(|indexed| {
                let input = MatchInput {
                    query_word: word,
                    query_key: &key,
                    candidate_word: &indexed.entry.word,
                    candidate_key: &indexed.rhyme_key,
                };
                classify(&input).map(|class| RhymeCandidate {
                    text: indexed.entry.word.clone(),
                    rhyme_type: class.rhyme_type,
                    score: class.score,
                    meter_info: MeterInfo {
                        syllables: syllable_count(&indexed.entry.word),
                        stress_pattern: None,
                    },
                })
            })
            .collect();

        // Stable: equal scores keep lexicon order.
        candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        candidates.truncate(max_results);

        self.cache.lock().insert(cache_key, candidates.clone());
        candidates
    }

    /// [`RhymeEngine::generate_rhymes`] with the configured result count.
    pub fn suggest(&self, line: &str) -> Vec<RhymeCandidate> {
        self.generate_rhymes::<&str>(line, &[], self.max_results)
    }

    pub fn analyze_flow<S: AsRef<str>>(&self, lines: &[S]) -> FlowAnalysis {
        analyze_flow(lines, self.bpm)
    }

    pub fn detect_slang(&self, word: &str) -> SlangDetection {
        self.slang.detect(word)
    }

    pub fn add_slang_term(&mut self, term: SlangTerm) -> Result<(), StoreError> {
        self.slang.add(term)
    }

    pub fn remove_slang_term(&mut self, term: &str) -> Result<(), StoreError> {
        self.slang.remove(term)
    }

    pub fn all_slang(&self) -> Vec<SlangTerm> {
        self.slang.all()
    }

    pub fn cache_len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }
}

impl Default for RhymeEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{LexiconEntry, RhymeType};

    fn small_engine(cache_capacity: usize) -> RhymeEngine {
        let lexicon = Lexicon::new(
            ["strijd", "kwijt", "tijd", "track", "most"]
                .into_iter()
                .map(|w| LexiconEntry::new(w, 1)),
        );
        RhymeEngine::with_parts(lexicon, SlangStore::new(), cache_capacity)
    }

    #[test]
    fn test_empty_line_has_no_candidates() {
        let engine = RhymeEngine::new();
        assert!(engine.generate_rhymes::<&str>("", &[], 6).is_empty());
        assert!(engine.generate_rhymes::<&str>("   \t ", &[], 6).is_empty());
        assert_eq!(engine.cache_len(), 0);
    }

    #[test]
    fn test_punctuation_only_word_ranks_on_empty_key() {
        let engine = RhymeEngine::new();
        let result = engine.generate_rhymes::<&str>("wat nu ?!", &[], 6);
        assert_eq!(result.len(), 6);
        assert!(result.windows(2).all(|w| w[0].score >= w[1].score));
        // short keys sit within near-rhyme distance of the empty key
        assert!(result.iter().all(|c| c.rhyme_type == RhymeType::Multisyllabic));
        assert_eq!(engine.cache_len(), 1);

        let again = engine.generate_rhymes::<&str>("?", &[], 6);
        assert_eq!(again, result);
        assert_eq!(engine.cache_len(), 1);
    }

    #[test]
    fn test_last_word_is_lowercased_and_stripped() {
        let engine = small_engine(0);
        let plain = engine.generate_rhymes::<&str>("de tijd", &[], 6);
        let noisy = engine.generate_rhymes::<&str>("de TIJD?!", &[], 6);
        assert_eq!(plain, noisy);
        assert!(noisy.iter().all(|c| c.text != "tijd"));
    }

    #[test]
    fn test_classification_and_order() {
        let engine = small_engine(0);
        let result = engine.generate_rhymes::<&str>("tijd", &[], 6);
        let summary: Vec<(&str, RhymeType)> =
            result.iter().map(|c| (c.text.as_str(), c.rhyme_type)).collect();
        assert_eq!(
            summary,
            vec![
                ("strijd", RhymeType::Perfect),
                ("kwijt", RhymeType::Multisyllabic),
                ("track", RhymeType::Alliteration),
            ]
        );
        assert_eq!(result[0].meter_info.syllables, 1);
        assert!(result[0].meter_info.stress_pattern.is_none());
    }

    #[test]
    fn test_truncates_to_max_results() {
        let engine = small_engine(0);
        assert_eq!(engine.generate_rhymes::<&str>("tijd", &[], 1).len(), 1);
        assert!(engine.generate_rhymes::<&str>("tijd", &[], 0).is_empty());
    }

    #[test]
    fn test_cache_key_includes_max_results() {
        let engine = small_engine(0);
        engine.generate_rhymes::<&str>("tijd", &[], 1);
        engine.generate_rhymes::<&str>("tijd", &[], 2);
        engine.generate_rhymes::<&str>("de tijd.", &[], 2);
        assert_eq!(engine.cache_len(), 2);

        engine.clear_cache();
        assert_eq!(engine.cache_len(), 0);
    }

    #[test]
    fn test_cache_capacity_is_respected() {
        let engine = small_engine(2);
        for word in ["tijd", "most", "track", "kwijt"] {
            engine.generate_rhymes::<&str>(word, &[], 6);
        }
        assert_eq!(engine.cache_len(), 2);
    }

    #[test]
    fn test_config_drives_defaults() {
        let config = EngineConfig {
            max_results: 2,
            bpm: 45,
            ..EngineConfig::default()
        };
        let engine = RhymeEngine::with_config(&config);
        assert_eq!(engine.suggest("de tijd").len(), 2);
        assert_eq!(engine.bpm(), 45);
    }
}
