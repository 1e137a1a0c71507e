//! Astrobiomers relation extraction - stage 4 of the pipeline (§4.5).

pub mod aggregate;
pub mod candidate;
pub mod cooccurrence;
pub mod pattern;
pub mod svo;
pub mod verb_map;

use std::collections::HashMap;

use astrobiomers_model::{Mention, PreprocessedPaper, Relation};
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct RelationConfig {
    pub confidence_floor: f64,
}

impl Default for RelationConfig {
    fn default() -> Self {
        Self { confidence_floor: 0.70 }
    }
}

/// Run SVO, pattern, and co-occurrence extraction over every paper, in
/// parallel, re-ordered deterministically before returning (§5).
pub fn extract_relations(
    papers: &[PreprocessedPaper],
    mentions: &[Mention],
    config: &RelationConfig,
) -> Vec<Relation> {
    let mut by_paper: HashMap<&str, Vec<Mention>> = HashMap::new();
    for m in mentions {
        by_paper.entry(m.paper_id.as_str()).or_default().push(m.clone());
    }

    let mut relations: Vec<Relation> = papers
        .par_iter()
        .filter(|p| !p.preprocess_failed)
        .flat_map_iter(|paper| {
            let paper_mentions = by_paper.get(paper.paper_id.as_str()).cloned().unwrap_or_default();
            extract_for_paper(paper, &paper_mentions, config)
        })
        .collect();

    relations.sort_by(|a, b| {
        a.paper_id
            .cmp(&b.paper_id)
            .then_with(|| a.relation_type.as_str().cmp(b.relation_type.as_str()))
            .then_with(|| a.subject_canonical_name.cmp(&b.subject_canonical_name))
            .then_with(|| a.object_canonical_name.cmp(&b.object_canonical_name))
    });

    log::info!("relation: {} relations across {} papers", relations.len(), papers.len());
    relations
}

fn extract_for_paper(
    paper: &PreprocessedPaper,
    mentions: &[Mention],
    config: &RelationConfig,
) -> Vec<Relation> {
    if mentions.len() < 2 {
        return Vec::new();
    }

    let mut candidates = Vec::new();
    for sentence in &paper.sentences {
        let mut sentence_candidates = svo::svo_candidates(sentence, mentions);
        sentence_candidates.extend(pattern::pattern_candidates(sentence, mentions));
        sentence_candidates.extend(cooccurrence::cooccurrence_candidates(sentence, mentions, &sentence_candidates));
        candidates.extend(sentence_candidates);
    }

    aggregate::aggregate(&paper.paper_id, candidates, config.confidence_floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use astrobiomers_model::{EntityKind, Extractor, Sentence, Span};

    fn mention(paper_id: &str, text: &str, kind: EntityKind, start: usize, end: usize) -> Mention {
        Mention {
            paper_id: paper_id.into(),
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
    fn svo_relation_survives_end_to_end() {
        let text = "Microgravity induces bone loss";
        let paper = PreprocessedPaper {
            paper_id: "1".into(),
            original_text: text.into(),
            sentences: vec![Sentence {
                text: text.into(),
                start: 0,
                end: text.len(),
                tokens: vec![],
                lemmas: vec!["microgravity".into(), "induc".into(), "bone".into(), "loss".into()],
                pos_tags: vec!["NOUN".into(), "VERB".into(), "NOUN".into(), "NOUN".into()],
            }],
            preprocess_failed: false,
        };
        let mentions = vec![
            mention("1", "Microgravity", EntityKind::Stressor, 0, 12),
            mention("1", "bone loss", EntityKind::Phenotype, 22, 31),
        ];
        let relations = extract_relations(&[paper], &mentions, &RelationConfig::default());
        assert!(!relations.is_empty());
        assert!(relations.iter().all(|r| r.confidence >= 0.70));
    }

    #[test]
    fn single_mention_paper_yields_no_relations() {
        let text = "Microgravity was studied";
        let paper = PreprocessedPaper {
            paper_id: "1".into(),
            original_text: text.into(),
            sentences: vec![Sentence { text: text.into(), start: 0, end: text.len(), tokens: vec![], lemmas: vec![], pos_tags: vec![] }],
            preprocess_failed: false,
        };
        let mentions = vec![mention("1", "Microgravity", EntityKind::Stressor, 0, 12)];
        assert!(extract_relations(&[paper], &mentions, &RelationConfig::default()).is_empty());
    }

    #[test]
    fn preprocess_failed_papers_are_skipped() {
        let mut paper = PreprocessedPaper {
            paper_id: "1".into(),
            original_text: String::new(),
            sentences: vec![],
            preprocess_failed: true,
        };
        paper.preprocess_failed = true;
        let mentions = vec![
            mention("1", "Microgravity", EntityKind::Stressor, 0, 12),
            mention("1", "bone loss", EntityKind::Phenotype, 22, 31),
        ];
        assert!(extract_relations(&[paper], &mentions, &RelationConfig::default()).is_empty());
    }
}
