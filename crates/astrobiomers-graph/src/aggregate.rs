//! Builds persisted `Entity` nodes and `MENTIONS` edges from the transient
//! `Mention` records carried through stages 3, 6, 7 (§3 "Mention (transient,
//! not persisted as node but carried between stages)").

use std::collections::HashMap;

use astrobiomers_model::{Entity, EntityKind, Mention};

#[derive(Debug, Clone)]
pub struct MentionEdge {
    pub paper_id: String,
    pub entity_kind: EntityKind,
    pub entity_canonical_name: String,
    pub text: String,
    pub confidence: f64,
}

/// Aggregate mentions into one `Entity` per (kind, canonical_name), unioning
/// surface forms and external/ontology ids, counting total mentions, plus
/// the MENTIONS edges every mention induces (§3 "Relationships").
pub fn aggregate_entities(mentions: &[Mention]) -> (Vec<Entity>, Vec<MentionEdge>) {
    let mut entities: HashMap<(EntityKind, String), Entity> = HashMap::new();

    for m in mentions {
        let entity = entities
            .entry((m.kind, m.canonical_name.clone()))
            .or_insert_with(|| Entity::new(m.kind, m.canonical_name.clone()));
        entity.mention_count += 1;
        if !entity.surface_forms.contains(&m.text) {
            entity.surface_forms.push(m.text.clone());
        }
        for (k, v) in &m.external_ids {
            entity.external_ids.entry(k.clone()).or_insert_with(|| v.clone());
        }
        for (k, v) in &m.ontology_terms {
            entity.ontology_terms.entry(k.clone()).or_insert_with(|| v.clone());
        }
    }

    let edges = mentions
        .iter()
        .map(|m| MentionEdge {
            paper_id: m.paper_id.clone(),
            entity_kind: m.kind,
            entity_canonical_name: m.canonical_name.clone(),
            text: m.text.clone(),
            confidence: m.confidence,
        })
        .collect();

    let mut entities: Vec<Entity> = entities.into_values().collect();
    entities.sort_by(|a, b| a.kind.as_str().cmp(b.kind.as_str()).then_with(|| a.canonical_name.cmp(&b.canonical_name)));

    (entities, edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use astrobiomers_model::{Extractor, Span};

    fn mention(paper_id: &str, name: &str, kind: EntityKind) -> Mention {
        Mention {
            paper_id: paper_id.into(),
            text: name.into(),
            canonical_name: name.to_lowercase(),
            kind,
            span: Span::new(0, name.len()),
            confidence: 0.9,
            extractor: Extractor::Pattern,
            external_ids: Default::default(),
            ontology_terms: Default::default(),
        }
    }

    #[test]
    fn same_canonical_name_across_papers_collapses_into_one_entity() {
        let mentions = vec![
            mention("1", "Microgravity", EntityKind::Stressor),
            mention("2", "microgravity", EntityKind::Stressor),
        ];
        let (entities, edges) = aggregate_entities(&mentions);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].mention_count, 2);
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn distinct_kinds_with_same_name_stay_separate() {
        let mentions = vec![
            mention("1", "collagen", EntityKind::Protein),
            mention("1", "collagen", EntityKind::Chemical),
        ];
        let (entities, _) = aggregate_entities(&mentions);
        assert_eq!(entities.len(), 2);
    }

    #[test]
    fn surface_forms_are_deduplicated() {
        let mentions = vec![
            mention("1", "TP53", EntityKind::Gene),
            mention("2", "TP53", EntityKind::Gene),
        ];
        let (entities, _) = aggregate_entities(&mentions);
        assert_eq!(entities[0].surface_forms, vec!["TP53".to_string()]);
    }
}
