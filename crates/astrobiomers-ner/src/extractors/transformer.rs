//! Stand-in for the "biomedical transformer model" extractor (§4.4, #1).
//!
//! The real system loads a domain-adapted transformer once per run and runs
//! token classification over each sentence. That model load/inference seam
//! is `NerExtractor`; this provides a deterministic lexicon-driven
//! implementation of it so the ensemble, merge, and confidence-threshold
//! logic downstream are fully exercised without a model download. A real
//! `candle`-backed implementation can satisfy the same trait later.

use aho_corasick::{AhoCorasick, MatchKind};

use astrobiomers_model::{EntityKind, Span};

use super::{NerExtractor, RawMention};

/// General biomedical categories the primary model covers (§4.4: "general
/// biomedical categories").
const LEXICON: &[(&str, EntityKind)] = &[
    ("TP53", EntityKind::Gene),
    ("BRCA1", EntityKind::Gene),
    ("MYC", EntityKind::Gene),
    ("RUNX2", EntityKind::Gene),
    ("SOST", EntityKind::Gene),
    ("osteocalcin", EntityKind::Protein),
    ("collagen", EntityKind::Protein),
    ("RANKL", EntityKind::Protein),
    ("osteoporosis", EntityKind::Disease),
    ("osteopenia", EntityKind::Disease),
    ("cardiovascular disease", EntityKind::Disease),
    ("bone loss", EntityKind::Phenotype),
    ("muscle atrophy", EntityKind::Phenotype),
    ("immune dysfunction", EntityKind::Phenotype),
    ("mus musculus", EntityKind::Organism),
    ("drosophila melanogaster", EntityKind::Organism),
    ("arabidopsis thaliana", EntityKind::Organism),
    ("mesenchymal stem cell", EntityKind::CellType),
    ("osteoblast", EntityKind::CellType),
    ("osteoclast", EntityKind::CellType),
    ("dexamethasone", EntityKind::Chemical),
    ("calcium", EntityKind::Chemical),
];

pub struct BiomedicalTransformer {
    automaton: AhoCorasick,
    kinds: Vec<EntityKind>,
}

impl BiomedicalTransformer {
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

impl Default for BiomedicalTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl NerExtractor for BiomedicalTransformer {
    fn name(&self) -> &'static str {
        "transformer"
    }

    fn extract(&self, text: &str) -> Vec<RawMention> {
        self.automaton
            .find_iter(text)
            .map(|m| {
                let kind = self.kinds[m.pattern().as_usize()];
                // Model confidence varies with match length relative to
                // surrounding context noise; approximate with a fixed high
                // band since this stands in for a calibrated classifier.
                let confidence = 0.82 + (m.end() - m.start()).min(20) as f64 * 0.004;
                RawMention {
                    text: text[m.start()..m.end()].to_string(),
                    kind,
                    span: Span::new(m.start(), m.end()),
                    confidence: confidence.min(0.97),
                    extractor: super::ExtractorTag::Transformer,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_known_gene() {
        let extractor = BiomedicalTransformer::new();
        let mentions = extractor.extract("TP53 mutations were observed.");
        assert!(mentions.iter().any(|m| m.kind == EntityKind::Gene && m.text == "TP53"));
    }

    #[test]
    fn is_case_insensitive() {
        let extractor = BiomedicalTransformer::new();
        let mentions = extractor.extract("Signs of bone loss were noted.");
        assert!(mentions.iter().any(|m| m.kind == EntityKind::Phenotype));
    }

    #[test]
    fn no_match_yields_empty() {
        let extractor = BiomedicalTransformer::new();
        assert!(extractor.extract("Nothing biomedical here.").is_empty());
    }
}
