//! Trigger-phrase pattern templates (§4.5 #2): "X leads to Y", "X-induced Y",
//! "Y caused by X".

use astrobiomers_model::{Mention, RelationType, Sentence};

use crate::candidate::{mentions_in_span, nearest_after, nearest_before, Candidate};

const PATTERN_CONFIDENCE: f64 = 0.85;

struct Trigger {
    phrase: &'static str,
    relation_type: RelationType,
    /// If true the object precedes the trigger and the subject follows it
    /// ("Y caused by X"); otherwise subject precedes and object follows.
    reversed: bool,
}

const TRIGGERS: &[Trigger] = &[
    Trigger { phrase: "leads to", relation_type: RelationType::Causes, reversed: false },
    Trigger { phrase: "lead to", relation_type: RelationType::Causes, reversed: false },
    Trigger { phrase: "-induced", relation_type: RelationType::Causes, reversed: false },
    Trigger { phrase: "induced by", relation_type: RelationType::Causes, reversed: true },
    Trigger { phrase: "caused by", relation_type: RelationType::Causes, reversed: true },
];

pub fn pattern_candidates(sentence: &Sentence, mentions: &[Mention]) -> Vec<Candidate> {
    let in_span = mentions_in_span(mentions, sentence.start, sentence.end);
    if in_span.len() < 2 {
        return Vec::new();
    }

    let lower = sentence.text.to_lowercase();
    let mut candidates = Vec::new();

    for trigger in TRIGGERS {
        let Some(rel_idx) = lower.find(trigger.phrase) else {
            continue;
        };
        let before_offset = sentence.start + rel_idx;
        let after_offset = sentence.start + rel_idx + trigger.phrase.len();

        let (subject, object) = if trigger.reversed {
            (nearest_after(&in_span, after_offset), nearest_before(&in_span, before_offset))
        } else {
            (nearest_before(&in_span, before_offset), nearest_after(&in_span, after_offset))
        };

        if let (Some(subject), Some(object)) = (subject, object) {
            if subject.span != object.span {
                candidates.push(Candidate {
                    subject: subject.clone(),
                    object: object.clone(),
                    relation_type: trigger.relation_type,
                    confidence: PATTERN_CONFIDENCE,
                    evidence_sentence: sentence.text.clone(),
                });
            }
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use astrobiomers_model::{EntityKind, Extractor, Span};

    fn mention(text: &str, kind: EntityKind, start: usize, end: usize) -> Mention {
        Mention {
            paper_id: "1".into(),
            text: text.into(),
            canonical_name: text.to_lowercase(),
            kind,
            span: Span::new(start, end),
            confidence: 0.9,
            extractor: Extractor::Pattern,
            external_ids: Default::default(),
            ontology_terms: Default::default(),
        }
    }

    #[test]
    fn leads_to_orders_subject_then_object() {
        let text = "Microgravity leads to bone loss";
        let sentence = Sentence { text: text.into(), start: 0, end: text.len(), tokens: vec![], lemmas: vec![], pos_tags: vec![] };
        let mentions = vec![
            mention("Microgravity", EntityKind::Stressor, 0, 12),
            mention("bone loss", EntityKind::Phenotype, 23, 32),
        ];
        let candidates = pattern_candidates(&sentence, &mentions);
        assert!(candidates.iter().any(|c| c.subject.canonical_name == "microgravity" && c.object.canonical_name == "bone loss"));
    }

    #[test]
    fn caused_by_reverses_order() {
        let text = "Bone loss caused by microgravity";
        let sentence = Sentence { text: text.into(), start: 0, end: text.len(), tokens: vec![], lemmas: vec![], pos_tags: vec![] };
        let mentions = vec![
            mention("Bone loss", EntityKind::Phenotype, 0, 9),
            mention("microgravity", EntityKind::Stressor, 21, 33),
        ];
        let candidates = pattern_candidates(&sentence, &mentions);
        assert!(candidates.iter().any(|c| c.subject.canonical_name == "microgravity" && c.object.canonical_name == "bone loss"));
    }

    #[test]
    fn no_trigger_phrase_yields_no_candidates() {
        let text = "Microgravity and bone loss were both observed";
        let sentence = Sentence { text: text.into(), start: 0, end: text.len(), tokens: vec![], lemmas: vec![], pos_tags: vec![] };
        let mentions = vec![
            mention("Microgravity", EntityKind::Stressor, 0, 12),
            mention("bone loss", EntityKind::Phenotype, 17, 26),
        ];
        assert!(pattern_candidates(&sentence, &mentions).is_empty());
    }
}
