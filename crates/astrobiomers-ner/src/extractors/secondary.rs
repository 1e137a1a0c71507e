//! Optional chemical/disease-specialized extractor (§4.4, #2).
//!
//! Absence is not fatal — the ensemble in `lib.rs` treats this as
//! `Option<Box<dyn NerExtractor>>` and simply runs without it when disabled.

use aho_corasick::{AhoCorasick, MatchKind};

use astrobiomers_model::{EntityKind, Span};

use super::{NerExtractor, RawMention};

const LEXICON: &[(&str, EntityKind)] = &[
    ("dexamethasone", EntityKind::Chemical),
    ("simvastatin", EntityKind::Chemical),
    ("bisphosphonate", EntityKind::Chemical),
    ("atherosclerosis", EntityKind::Disease),
    ("sarcopenia", EntityKind::Disease),
    ("renal calculi", EntityKind::Disease),
    ("intervertebral disc degeneration", EntityKind::Disease),
];

/// Specialized chemical/disease extractor. In the source system this would
/// be a second, narrower biomedical model (e.g. a BC5CDR-tuned head);
/// installed separately from the primary model, hence "optional".
pub struct ChemicalDiseaseSpecialist {
    automaton: AhoCorasick,
    kinds: Vec<EntityKind>,
}

impl ChemicalDiseaseSpecialist {
    pub fn new() -> Self {
        let patterns: Vec<&str> = LEXICON.iter().map(|(p, _)| *p).collect();
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(patterns)
            .expect("lexicon automaton build should never fail on static patterns");
        Self {
            automaton,
            kinds: LEXICON.iter().map(|(_, k)| *k).collect(),
        }
    }
}

impl Default for ChemicalDiseaseSpecialist {
    fn default() -> Self {
        Self::new()
    }
}

impl NerExtractor for ChemicalDiseaseSpecialist {
    fn name(&self) -> &'static str {
        "secondary"
    }

    fn extract(&self, text: &str) -> Vec<RawMention> {
        self.automaton
            .find_iter(text)
            .map(|m| RawMention {
                text: text[m.start()..m.end()].to_string(),
                kind: self.kinds[m.pattern().as_usize()],
                span: Span::new(m.start(), m.end()),
                confidence: 0.90,
                extractor: super::ExtractorTag::Secondary,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_specialized_chemical() {
        let extractor = ChemicalDiseaseSpecialist::new();
        let mentions = extractor.extract("Treatment with bisphosphonate reduced bone resorption.");
        assert!(mentions.iter().any(|m| m.kind == EntityKind::Chemical));
    }
}
