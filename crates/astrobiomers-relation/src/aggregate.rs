//! Within-paper aggregation (§4.5 "Aggregation", "Type constraints",
//! "Confidence floor").

use std::collections::HashMap;

use astrobiomers_model::{is_allowed, Relation};

use crate::candidate::Candidate;

pub fn aggregate(paper_id: &str, candidates: Vec<Candidate>, confidence_floor: f64) -> Vec<Relation> {
    let mut grouped: HashMap<(String, String, String), Relation> = HashMap::new();

    for c in candidates {
        if !is_allowed(c.relation_type, c.subject.kind, c.object.kind) {
            continue;
        }

        let key = (
            c.subject.canonical_name.clone(),
            c.relation_type.as_str().to_string(),
            c.object.canonical_name.clone(),
        );

        grouped
            .entry(key)
            .and_modify(|existing| {
                if c.confidence > existing.confidence {
                    existing.confidence = c.confidence;
                }
                if !existing.evidence_sentences.contains(&c.evidence_sentence) {
                    existing.evidence_sentences.push(c.evidence_sentence.clone());
                }
            })
            .or_insert_with(|| Relation {
                paper_id: paper_id.to_string(),
                relation_type: c.relation_type,
                subject_canonical_name: c.subject.canonical_name.clone(),
                subject_kind: c.subject.kind,
                object_canonical_name: c.object.canonical_name.clone(),
                object_kind: c.object.kind,
                confidence: c.confidence,
                evidence_sentences: vec![c.evidence_sentence.clone()],
            });
    }

    let mut relations: Vec<Relation> = grouped
        .into_values()
        .filter(|r| r.confidence >= confidence_floor)
        .collect();

    relations.sort_by(|a, b| {
        a.relation_type
            .as_str()
            .cmp(b.relation_type.as_str())
            .then_with(|| a.subject_canonical_name.cmp(&b.subject_canonical_name))
            .then_with(|| a.object_canonical_name.cmp(&b.object_canonical_name))
    });

    relations
}
