// File: src/slang.rs
use crate::error::StoreError;
use crate::persistence::{SnapshotFormat, StateStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Confidence given to words that look unfamiliar but are not in the store.
const UNKNOWN_WORD_CONFIDENCE: f64 = 0.3;

/// Short function words that would otherwise trip the length heuristic.
const CLOSED_CLASS_WORDS: &[&str] = &[
    "ik", "jij", "hij", "zij", "wij", "het", "de", "aan", "bij", "van", "met", "voor", "na",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlangTerm {
    pub term: String,
    pub meaning: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub added_by: Option<String>,
    pub confidence: f64,
}

impl SlangTerm {
    pub fn new(term: impl Into<String>, meaning: impl Into<String>, confidence: f64) -> Self {
        Self {
            term: term.into(),
            meaning: meaning.into(),
            region: None,
            examples: Vec::new(),
            added_by: None,
            confidence,
        }
    }

    pub fn key(&self) -> String {
        normalize(&self.term)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlangDetection {
    pub is_slang: bool,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<SlangTerm>,
}

fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

// The whole word must be letters: "hey!" or "b2b" count as unfamiliar.
fn is_known_word(word: &str) -> bool {
    CLOSED_CLASS_WORDS.contains(&word)
        || (word.chars().count() >= 3 && word.chars().all(char::is_alphabetic))
}

/// Street-language terms keyed by lowercase spelling.
///
/// Every mutation is written through to the attached [`StateStore`], if any.
/// A failed write is returned to the caller but never rolls back the
/// in-memory change.
pub struct SlangStore {
    terms: BTreeMap<String, SlangTerm>,
    store: Option<Box<dyn StateStore>>,
    format: SnapshotFormat,
}

impl SlangStore {
    /// Seeded with the built-in terms, not persisted.
    pub fn new() -> Self {
        let mut slang = Self {
            terms: BTreeMap::new(),
            store: None,
            format: SnapshotFormat::Json,
        };
        for term in default_slang() {
            slang.terms.insert(term.key(), term);
        }
        slang
    }

    /// Seeds the defaults, then replaces them with the stored snapshot when one
    /// exists. An unreadable snapshot leaves the defaults in place.
    pub fn open(store: Box<dyn StateStore>, format: SnapshotFormat) -> Self {
        let mut slang = Self::new();
        slang.format = format;

        match store.load().and_then(|blob| match blob {
            Some(bytes) => format.decode::<Vec<SlangTerm>>(&bytes).map(Some),
            None => Ok(None),
        }) {
            Ok(Some(saved)) => {
                tracing::debug!("Loaded {} slang terms from store", saved.len());
                slang.terms = saved.into_iter().map(|t| (t.key(), t)).collect();
            }
            Ok(None) => tracing::debug!("No saved slang, using built-in terms"),
            Err(e) => tracing::warn!("Failed to load slang, using built-in terms: {}", e),
        }

        slang.store = Some(store);
        slang
    }

    pub fn detect(&self, word: &str) -> SlangDetection {
        let normalized = normalize(word);
        if let Some(term) = self.terms.get(&normalized) {
            return SlangDetection {
                is_slang: true,
                confidence: term.confidence,
                term: Some(term.clone()),
            };
        }

        if is_known_word(&normalized) {
            SlangDetection {
                is_slang: false,
                confidence: 0.0,
                term: None,
            }
        } else {
            SlangDetection {
                is_slang: true,
                confidence: UNKNOWN_WORD_CONFIDENCE,
                term: None,
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<&SlangTerm> {
        self.terms.get(&normalize(word))
    }

    /// Inserts or overwrites the term under its lowercase spelling.
    pub fn add(&mut self, term: SlangTerm) -> Result<(), StoreError> {
        tracing::debug!("Adding slang term '{}'", term.term);
        self.terms.insert(term.key(), term);
        self.persist()
    }

    pub fn remove(&mut self, term: &str) -> Result<(), StoreError> {
        if self.terms.remove(&normalize(term)).is_some() {
            tracing::debug!("Removed slang term '{}'", term);
        }
        self.persist()
    }

    pub fn all(&self) -> Vec<SlangTerm> {
        self.terms.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        let snapshot: Vec<&SlangTerm> = self.terms.values().collect();
        let result = self.format.encode(&snapshot).and_then(|blob| store.save(&blob));
        if let Err(e) = &result {
            tracing::warn!("Failed to save slang: {}", e);
        }
        result
    }
}

impl Default for SlangStore {
    fn default() -> Self {
        Self::new()
    }
}

fn seed(term: &str, meaning: &str, region: &str, examples: &[&str], confidence: f64) -> SlangTerm {
    SlangTerm {
        term: term.to_string(),
        meaning: meaning.to_string(),
        region: Some(region.to_string()),
        examples: examples.iter().map(|e| e.to_string()).collect(),
        added_by: None,
        confidence,
    }
}

#[rustfmt::skip]
pub fn default_slang() -> Vec<SlangTerm> {
    vec![
        seed(
            "sike",
            "grapje / niet waar / oops",
            "NL",
            &["Ha, sike! dat was niet de bedoeling"],
            0.9,
        ),
        seed("zieke", "heel cool, awesome", "NL", &["Dat is een zieke beat"], 0.95),
        seed("famo", "dude / vriend", "NL", &["Yo famo, wat doe je?"], 0.85),
        seed("main", "vriend / broer", "NL", &["Kom op main, we gaan"], 0.8),
        seed("biekes", "meisjes, chicks", "NL", &["Die biekes zijn cool"], 0.75),
        seed("hossel", "hustle, druk bezig zijn, werken", "NL", &["Ik ben nog op me hossel"], 0.9),
        seed(
            "gesetteld",
            "geregeld, goed zitten, stabiel",
            "NL",
            &["Dan zijn we gesetteld kunnen we brieven blijven tellen"],
            0.85,
        ),
        seed("prayen", "bidden, hopen", "NL", &["We blijven prayen"], 0.9),
        seed("securen", "veiligstellen, pakken", "NL", &["Hier securen we de bag"], 0.88),
        seed("brieven", "geld, bankbiljetten", "NL", &["Brieven blijven tellen"], 0.92),
        seed(
            "bag",
            "geld, winst, deal",
            "NL/EN",
            &["Money in me bag", "We gonna get the bag"],
            0.95,
        ),
        seed(
            "chase",
            "achtervolgen, najagen",
            "EN",
            &["Ik ben al dagen aan het chase voor die money"],
            0.9,
        ),
        seed("ghost", "verdwijnen, onzichtbaar zijn", "EN", &["Je weet toch dat ik ghost"], 0.88),
        seed(
            "ghost rider",
            "iemand die stiekem/onzichtbaar beweegt",
            "NL/EN",
            &["Ghost rider in de wijk"],
            0.85,
        ),
        seed("nepheid", "fake gedrag, onecht zijn", "NL", &["We waarderen geen nepheid"], 0.9),
        seed("on the road", "onderweg, bezig", "EN", &["Met me jongens on the road"], 0.92),
        seed("capture the flag", "doel bereiken, winnen", "EN", &["Need to capture the flag"], 0.8),
        seed("winning streak", "reeks overwinningen", "EN", &["Ben op een winning streak"], 0.85),
        seed(
            "honey pak",
            "aantrekkelijke vrouw die blijft hangen",
            "NL",
            &["Als honing blijft ze aan me bil plakken geen honey pak"],
            0.75,
        ),
        seed("zeiknat", "kletsnat, zeer nat", "NL", &["Kwam thuis ik was zeiknat"], 0.95),
        seed("zeikland", "kut land, slecht land", "NL", &["Dit is een zeikland"], 0.9),
        seed(
            "figueres",
            "6 cijfers, 100k+",
            "NL",
            &["6 figueres denk niet alleen aan wijven"],
            0.85,
        ),
        seed("wijven", "vrouwen (negatief/straat)", "NL", &["Denk niet alleen aan wijven"], 0.88),
        seed("bro", "broer, vriend", "NL/EN", &["Bro je bent de weg kwijt"], 0.95),
        seed("lessons", "lessen, ervaringen", "EN", &["We leerde je weer lessons"], 0.9),
        seed("pressure", "druk, stress", "EN", &["Je had pressure"], 0.92),
        seed(
            "alcantara",
            "luxe stof voor auto interieurs",
            "NL",
            &["Wil die stuur fully alcantara"],
            0.7,
        ),
        seed("panorama", "panoramadak auto", "NL", &["Dakje panorama"], 0.8),
    ]
}
