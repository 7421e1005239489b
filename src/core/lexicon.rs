// File: src/core/lexicon.rs
use crate::core::phonetics::{extract_rhyme_key, phonemize};
use crate::core::types::LexiconEntry;

/// Built-in rhyme vocabulary: common Dutch end-rhymes, street language and
/// loan words. Order matters, it breaks ties between equal scores.
/// Some words appear twice; that is tolerated.
#[rustfmt::skip]
const DUTCH_WORDS: &[(&str, u64)] = &[
    ("me", 1000), ("we", 950), ("je", 900), ("ze", 850), ("de", 800), ("het", 750),
    ("lied", 700), ("tijd", 680), ("strijd", 650), ("wijd", 620), ("blij", 600), ("vrij", 580),
    ("zij", 560), ("deur", 550), ("keur", 540), ("zeur", 530), ("leuk", 520), ("straat", 500),
    ("graat", 480), ("laat", 450), ("zieke", 400), ("biekes", 380), ("sike", 360), ("bro", 350),
    ("famo", 340), ("main", 330), ("respect", 320), ("waardeloos", 300), ("perfect", 310),
    ("momentje", 290), ("resolutie", 280), ("executie", 270), ("mijn leven", 250),
    ("mijn droom", 240), ("mijn hart", 230), ("de nacht", 220), ("de wereld", 210),
    ("kijken", 900), ("lijken", 880), ("begrijpen", 860), ("krijgen", 840), ("blijven", 820),
    ("wijven", 800), ("rijden", 780), ("drive", 760), ("kiezen", 850), ("verliezen", 830),
    ("vriezen", 810), ("giezen", 790), ("hoek", 870), ("boek", 850), ("zoek", 830),
    ("beroep", 810), ("troep", 790), ("stoep", 770), ("groep", 750), ("boos", 840),
    ("doos", 820), ("roos", 800), ("groot", 780), ("boot", 760), ("noot", 740), ("ghost", 820),
    ("most", 800), ("post", 780), ("cost", 760), ("host", 740), ("hoopt", 810), ("loopt", 790),
    ("koop", 770), ("loop", 750), ("hoop", 730), ("bag", 900), ("back", 880), ("flag", 860),
    ("track", 840), ("pack", 820), ("stack", 800), ("attack", 780), ("weg", 880), ("peg", 860),
    ("leg", 840), ("zeg", 820), ("cash", 900), ("dash", 880), ("flash", 860), ("smash", 840),
    ("trash", 820), ("vertellen", 850), ("tellen", 830), ("ellen", 810), ("snellen", 790),
    ("stellen", 770), ("bellen", 750), ("vertrouwen", 840), ("bouwen", 820), ("verbouwen", 800),
    ("schouwen", 780), ("houwen", 760), ("alcantara", 790), ("panorama", 770), ("drama", 750),
    ("mama", 730), ("karma", 710), ("wedstrijd", 820), ("strijd", 800), ("tijd", 780),
    ("mijd", 760), ("snijd", 740), ("kwijt", 720), ("nepheid", 810), ("waarheid", 790),
    ("heid", 770), ("wijd", 750), ("zeiknat", 800), ("nat", 780), ("glad", 760), ("mad", 740),
    ("bad", 720), ("plat", 700), ("land", 820), ("zeikland", 800), ("hand", 780),
    ("brand", 760), ("stand", 740), ("kant", 720), ("zijkant", 700), ("bil", 790),
    ("stil", 770), ("mil", 750), ("will", 730), ("chill", 710), ("skill", 690), ("chase", 880),
    ("race", 860), ("base", 840), ("case", 820), ("face", 800), ("place", 780), ("space", 760),
    ("car", 870), ("bar", 850), ("star", 830), ("far", 810), ("scar", 790), ("hossel", 850),
    ("gesetteld", 830), ("prayen", 810), ("securen", 790), ("brieven", 770), ("honey pak", 750),
    ("ghost rider", 730), ("on the road", 710), ("winning streak", 690),
    ("capture the flag", 670), ("money", 880), ("cijfers", 860), ("figueres", 840),
    ("zorgen", 820), ("hoofd", 800), ("moeder", 780), ("dingen", 760), ("lessons", 740),
    ("pressure", 720), ("jongens", 700), ("vrouwen", 680), ("body", 660), ("regen", 640),
    ("schoenen", 620), ("spullen", 600), ("plannen", 580), ("dagen", 560), ("billen", 540),
    ("blaren", 520), ("getallen", 500),
];

/// A lexicon entry with its rhyme key computed up front.
#[derive(Debug, Clone)]
pub struct IndexedEntry {
    pub entry: LexiconEntry,
    pub rhyme_key: String,
}

/// Immutable list of rhyme candidates, scanned in insertion order.
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<IndexedEntry>,
}

impl Lexicon {
    pub fn new(entries: impl IntoIterator<Item = LexiconEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| {
                let rhyme_key = extract_rhyme_key(&phonemize(&entry.word), &entry.word);
                IndexedEntry { entry, rhyme_key }
            })
            .collect();
        Self { entries }
    }

    pub fn builtin() -> Self {
        Self::new(
            DUTCH_WORDS
                .iter()
                .map(|&(word, frequency)| LexiconEntry::new(word, frequency)),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexedEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_keeps_order_and_duplicates() {
        let lexicon = Lexicon::builtin();
        assert_eq!(lexicon.len(), DUTCH_WORDS.len());
        assert_eq!(lexicon.iter().next().map(|e| e.entry.word.as_str()), Some("me"));
        let strijd = lexicon.iter().filter(|e| e.entry.word == "strijd").count();
        assert_eq!(strijd, 2);
    }

    #[test]
    fn test_keys_are_precomputed() {
        let lexicon = Lexicon::new([LexiconEntry::new("tijd", 1), LexiconEntry::new("straat", 2)]);
        let keys: Vec<&str> = lexicon.iter().map(|e| e.rhyme_key.as_str()).collect();
        assert_eq!(keys, vec!["ɪd", "at"]);
    }
}
