//! The three independent extractors that make up the NER ensemble (§4.4).

pub mod pattern;
pub mod secondary;
pub mod transformer;

use astrobiomers_model::{EntityKind, Span};

pub use pattern::PatternMatcher;
pub use secondary::ChemicalDiseaseSpecialist;
pub use transformer::BiomedicalTransformer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorTag {
    Transformer,
    Secondary,
    Pattern,
}

impl ExtractorTag {
    pub fn as_extractor(self) -> astrobiomers_model::Extractor {
        match self {
            Self::Transformer => astrobiomers_model::Extractor::Transformer,
            Self::Secondary => astrobiomers_model::Extractor::Secondary,
            Self::Pattern => astrobiomers_model::Extractor::Pattern,
        }
    }
}

/// A mention as emitted by a single extractor, before merging and canonical
/// name assignment.
#[derive(Debug, Clone)]
pub struct RawMention {
    pub text: String,
    pub kind: EntityKind,
    pub span: Span,
    pub confidence: f64,
    pub extractor: ExtractorTag,
}

/// Common contract every extractor implements (§9 "Ensemble NER merging is
/// best expressed with tagged variants over a common mention record").
pub trait NerExtractor: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, text: &str) -> Vec<RawMention>;
}
