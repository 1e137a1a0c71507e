//! Shared candidate representation produced by each extraction technique
//! before type-constraint filtering and cross-sentence aggregation (§4.5).

use astrobiomers_model::{Mention, RelationType};

#[derive(Debug, Clone)]
pub struct Candidate {
    pub subject: Mention,
    pub object: Mention,
    pub relation_type: RelationType,
    pub confidence: f64,
    pub evidence_sentence: String,
}

/// Mentions whose span falls inside `[start, end)`, sorted by position.
pub fn mentions_in_span(mentions: &[Mention], start: usize, end: usize) -> Vec<&Mention> {
    let mut in_span: Vec<&Mention> = mentions
        .iter()
        .filter(|m| m.span.start >= start && m.span.end <= end)
        .collect();
    in_span.sort_by_key(|m| m.span.start);
    in_span
}

/// The mention immediately preceding `offset`, if any.
pub fn nearest_before<'a>(mentions: &[&'a Mention], offset: usize) -> Option<&'a Mention> {
    mentions
        .iter()
        .filter(|m| m.span.end <= offset)
        .max_by_key(|m| m.span.end)
        .copied()
}

/// The mention immediately following `offset`, if any.
pub fn nearest_after<'a>(mentions: &[&'a Mention], offset: usize) -> Option<&'a Mention> {
    mentions
        .iter()
        .filter(|m| m.span.start >= offset)
        .min_by_key(|m| m.span.start)
        .copied()
}
