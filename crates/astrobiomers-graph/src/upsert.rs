//! Cypher statements for the idempotent MERGE-based writes stage 8 performs
//! (§4.9 "Write semantics"). Building the query text and params here keeps
//! `lib.rs` focused on batching/transaction control.

use std::collections::HashMap;

use astrobiomers_core::LoaderError;
use astrobiomers_model::{Entity, EntityKind, Paper, Relation, Topic};
use neo4rs::{query, Query};

use crate::aggregate::MentionEdge;

/// `MERGE` keyed on `pmid` when present, else `synthetic_key` (§4.9: "never
/// write a NULL into a uniqueness-constrained property").
pub fn upsert_paper(paper: &Paper) -> Result<Query, LoaderError> {
    let id = paper.id();
    if id.trim().is_empty() {
        return Err(LoaderError::NullUniqueKey { label: "Paper".into(), property: "pmid/synthetic_key".into() });
    }

    let (key_prop, key_value) = match &paper.pmid {
        Some(pmid) => ("pmid", pmid.clone()),
        None => ("synthetic_key", id.clone()),
    };

    let q = format!(
        "MERGE (p:Paper {{{key_prop}: $key_value}})
         SET p.doi = $doi, p.title = $title, p.abstract = $abstract_text,
             p.authors = $authors, p.publication_year = $publication_year,
             p.journal = $journal, p.source_tag = $source_tag"
    );

    Ok(query(&q)
        .param("key_value", key_value)
        .param("doi", paper.doi.clone().unwrap_or_default())
        .param("title", paper.title.clone())
        .param("abstract_text", paper.abstract_text.clone().unwrap_or_default())
        .param("authors", paper.authors.clone())
        .param("publication_year", paper.publication_year.unwrap_or_default() as i64)
        .param("journal", paper.journal.clone().unwrap_or_default())
        .param("source_tag", paper.source_tag.clone()))
}

/// `MERGE` keyed on `(label, canonical_name)`; `mention_count` and id/term
/// maps are unioned across runs rather than overwritten (§4.9).
pub fn upsert_entity(entity: &Entity) -> Result<Query, LoaderError> {
    if entity.canonical_name.trim().is_empty() {
        return Err(LoaderError::NullUniqueKey { label: entity.kind.node_label().into(), property: "canonical_name".into() });
    }

    let label = entity.kind.node_label();
    let q = format!(
        "MERGE (n:{label} {{canonical_name: $canonical_name}})
         ON CREATE SET n.mention_count = $mention_count, n.surface_forms = $surface_forms
         ON MATCH SET n.mention_count = CASE WHEN $mention_count > n.mention_count THEN $mention_count ELSE n.mention_count END,
                       n.surface_forms = coalesce(n.surface_forms, []) + [x IN $surface_forms WHERE NOT x IN coalesce(n.surface_forms, [])]
         SET n += $external_ids
         SET n += $ontology_terms"
    );

    Ok(query(&q)
        .param("canonical_name", entity.canonical_name.clone())
        .param("mention_count", entity.mention_count as i64)
        .param("surface_forms", entity.surface_forms.clone())
        .param("external_ids", to_bolt_map(&entity.external_ids))
        .param("ontology_terms", to_bolt_map(&entity.ontology_terms)))
}

/// `MERGE` keyed on `id`; size/keywords are overwritten, not unioned, since
/// a topic table is recomputed wholesale each run (§4.6).
pub fn upsert_topic(topic: &Topic) -> Query {
    query(
        "MERGE (t:Topic {id: $id})
         SET t.label = $label, t.size = $size, t.keywords = $keywords",
    )
    .param("id", topic.id)
    .param("label", topic.label.clone())
    .param("size", topic.size as i64)
    .param("keywords", topic.keywords.clone())
}

/// MENTIONS edge, dispatched by the mention's kind to the correct node
/// label rather than one generic match (§4.9 "kind-aware union match").
pub fn upsert_mention_edge(edge: &MentionEdge) -> Query {
    let label = edge.entity_kind.node_label();
    let q = format!(
        "MATCH (p:Paper) WHERE p.pmid = $paper_id OR p.synthetic_key = $paper_id
         MATCH (n:{label} {{canonical_name: $canonical_name}})
         MERGE (p)-[r:MENTIONS]->(n)
         SET r.confidence = CASE WHEN $confidence > coalesce(r.confidence, 0.0) THEN $confidence ELSE coalesce(r.confidence, 0.0) END,
             r.text = $text"
    );
    query(&q)
        .param("paper_id", edge.paper_id.clone())
        .param("canonical_name", edge.entity_canonical_name.clone())
        .param("confidence", edge.confidence)
        .param("text", edge.text.clone())
}

/// Typed biological relation edge; confidence is MAX'd and evidence
/// sentences are unioned across runs (§4.5 "Aggregation", §4.9).
pub fn upsert_relation_edge(relation: &Relation) -> Query {
    let subject_label = relation.subject_kind.node_label();
    let object_label = relation.object_kind.node_label();
    let rel_type = relation.relation_type.as_str();

    let q = format!(
        "MATCH (s:{subject_label} {{canonical_name: $subject}})
         MATCH (o:{object_label} {{canonical_name: $object}})
         MERGE (s)-[r:{rel_type}]->(o)
         SET r.confidence = CASE WHEN $confidence > coalesce(r.confidence, 0.0) THEN $confidence ELSE coalesce(r.confidence, 0.0) END,
             r.evidence_sentences = coalesce(r.evidence_sentences, []) + [x IN $evidence_sentences WHERE NOT x IN coalesce(r.evidence_sentences, [])],
             r.paper_ids = CASE WHEN $paper_id IN coalesce(r.paper_ids, []) THEN coalesce(r.paper_ids, []) ELSE coalesce(r.paper_ids, []) + [$paper_id] END"
    );

    query(&q)
        .param("subject", relation.subject_canonical_name.clone())
        .param("object", relation.object_canonical_name.clone())
        .param("confidence", relation.confidence)
        .param("evidence_sentences", relation.evidence_sentences.clone())
        .param("paper_id", relation.paper_id.clone())
}

/// HAS_TOPIC edge; a paper gets at most one, enforced by `MERGE` matching
/// only on the source paper (§4.6 "at most one topic per paper").
pub fn upsert_has_topic_edge(paper_id: &str, topic_id: i64) -> Query {
    query(
        "MATCH (p:Paper) WHERE p.pmid = $paper_id OR p.synthetic_key = $paper_id
         MATCH (t:Topic {id: $topic_id})
         MERGE (p)-[:HAS_TOPIC]->(t)",
    )
    .param("paper_id", paper_id.to_string())
    .param("topic_id", topic_id)
}

fn to_bolt_map(map: &HashMap<String, String>) -> HashMap<String, String> {
    map.clone()
}

pub fn entity_kind_label(kind: EntityKind) -> &'static str {
    kind.node_label()
}

#[cfg(test)]
mod tests {
    use super::*;
    use astrobiomers_model::RelationType;

    fn sample_paper() -> Paper {
        Paper {
            pmid: Some("123".into()),
            pmc_id: None,
            doi: None,
            title: "t".into(),
            abstract_text: None,
            authors: vec![],
            publication_year: None,
            journal: None,
            source_tag: "curated".into(),
        }
    }

    #[test]
    fn paper_without_pmid_or_title_id_is_rejected() {
        let mut p = sample_paper();
        p.pmid = None;
        p.title = String::new();
        assert!(upsert_paper(&p).is_err());
    }

    #[test]
    fn paper_with_pmid_succeeds() {
        assert!(upsert_paper(&sample_paper()).is_ok());
    }

    #[test]
    fn entity_with_empty_canonical_name_is_rejected() {
        let e = Entity::new(EntityKind::Gene, "");
        assert!(upsert_entity(&e).is_err());
    }

    #[test]
    fn relation_edge_uses_directed_kind_labels() {
        let relation = Relation {
            paper_id: "1".into(),
            relation_type: RelationType::Upregulates,
            subject_canonical_name: "microgravity".into(),
            subject_kind: EntityKind::Stressor,
            object_canonical_name: "tp53".into(),
            object_kind: EntityKind::Gene,
            confidence: 0.9,
            evidence_sentences: vec!["x".into()],
        };
        // upsert_relation_edge builds successfully for any well-formed relation.
        let _ = upsert_relation_edge(&relation);
    }
}
