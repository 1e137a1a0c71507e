//! Co-occurrence fallback (§4.5 #3): every mention pair in a sentence not
//! already linked by SVO or pattern techniques gets a low-confidence
//! ASSOCIATED_WITH candidate, at the fallback's confidence ceiling.

use astrobiomers_model::{Mention, RelationType, Sentence};

use crate::candidate::{mentions_in_span, Candidate};

/// The ceiling named in §4.5 #3 doubles as the exact confidence emitted,
/// since the stage's confidence floor (§4.5) is the same value — any lower
/// and a fallback candidate could never survive filtering.
const COOCCURRENCE_CONFIDENCE: f64 = 0.70;

pub fn cooccurrence_candidates(
    sentence: &Sentence,
    mentions: &[Mention],
    already_connected: &[Candidate],
) -> Vec<Candidate> {
    let in_span = mentions_in_span(mentions, sentence.start, sentence.end);
    let mut candidates = Vec::new();

    for i in 0..in_span.len() {
        for j in (i + 1)..in_span.len() {
            let (a, b) = (in_span[i], in_span[j]);
            if pair_connected(already_connected, a, b) {
                continue;
            }
            candidates.push(Candidate {
                subject: a.clone(),
                object: b.clone(),
                relation_type: RelationType::AssociatedWith,
                confidence: COOCCURRENCE_CONFIDENCE,
                evidence_sentence: sentence.text.clone(),
            });
        }
    }

    candidates
}

fn pair_connected(existing: &[Candidate], a: &Mention, b: &Mention) -> bool {
    existing.iter().any(|c| {
        (c.subject.span == a.span && c.object.span == b.span)
            || (c.subject.span == b.span && c.object.span == a.span)
    })
}
