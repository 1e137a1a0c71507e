//! Transient mention records passed between stages 3 (NER), 4 (relation
//! extraction), 6 (resolution), and 7 (alignment). Not persisted as a node
//! (§3: "Mention (transient, not persisted as node but carried between
//! stages)").

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;

/// Character offsets into the paper's original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Whether this span overlaps another (used by the NER merge step,
    /// §4.4 "Merging rules").
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which extractor emitted a mention, recorded for provenance/debugging and
/// for kind-priority tiebreaking during merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extractor {
    Transformer,
    Secondary,
    Pattern,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mention {
    pub paper_id: String,
    pub text: String,
    pub canonical_name: String,
    pub kind: EntityKind,
    pub span: Span,
    pub confidence: f64,
    pub extractor: Extractor,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub external_ids: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub ontology_terms: HashMap<String, String>,
}

impl Mention {
    /// Lowercase, whitespace-collapsed canonical form of raw surface text
    /// (§4.4: "canonical_name (lowercased, whitespace-normalized...)").
    pub fn normalize_canonical_name(text: &str) -> String {
        text.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_overlap() {
        assert!(Span::new(0, 10).overlaps(&Span::new(5, 15)));
        assert!(!Span::new(0, 10).overlaps(&Span::new(10, 20)));
    }

    #[test]
    fn canonical_name_collapses_whitespace_and_lowercases() {
        assert_eq!(
            Mention::normalize_canonical_name("  Bone   Loss\n"),
            "bone loss"
        );
    }
}
