//! Astrobiomers NER - stage 3 of the pipeline (§4.4).

pub mod extractors;
pub mod merge;

use astrobiomers_model::{Extractor, Mention, PreprocessedPaper};
use extractors::{BiomedicalTransformer, ChemicalDiseaseSpecialist, NerExtractor, PatternMatcher};
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct NerConfig {
    pub confidence_threshold: f64,
    pub use_secondary: bool,
}

impl Default for NerConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.75,
            use_secondary: true,
        }
    }
}

/// The three-extractor ensemble (§4.4). `secondary` is `None` when the
/// optional model isn't installed — its absence degrades gracefully.
pub struct Ensemble {
    transformer: BiomedicalTransformer,
    secondary: Option<ChemicalDiseaseSpecialist>,
    pattern: PatternMatcher,
    config: NerConfig,
}

impl Ensemble {
    pub fn new(config: NerConfig) -> Self {
        let secondary = config.use_secondary.then(ChemicalDiseaseSpecialist::new);
        Self {
            transformer: BiomedicalTransformer::new(),
            secondary,
            pattern: PatternMatcher::new(),
            config,
        }
    }

    fn run_extractors(&self, text: &str) -> Vec<extractors::RawMention> {
        let mut all = self.transformer.extract(text);
        if let Some(secondary) = &self.secondary {
            all.extend(secondary.extract(text));
        }
        all.extend(self.pattern.extract(text));
        all
    }
}

/// Run the ensemble over every preprocessed paper, in parallel, re-ordered
/// by paper id before returning (§5).
pub fn extract_mentions(papers: &[PreprocessedPaper], ensemble: &Ensemble) -> Vec<Mention> {
    let mut mentions: Vec<Mention> = papers
        .par_iter()
        .flat_map_iter(|paper| extract_for_paper(paper, ensemble))
        .collect();
    mentions.sort_by(|a, b| {
        a.paper_id
            .cmp(&b.paper_id)
            .then_with(|| a.span.start.cmp(&b.span.start))
    });

    log::info!("ner: {} mentions retained across {} papers (threshold {})", mentions.len(), papers.len(), ensemble.config.confidence_threshold);
    mentions
}

fn extract_for_paper(paper: &PreprocessedPaper, ensemble: &Ensemble) -> Vec<Mention> {
    if paper.preprocess_failed {
        return Vec::new();
    }

    let raw: Vec<extractors::RawMention> = paper
        .sentences
        .iter()
        .flat_map(|s| ensemble.run_extractors(&paper.original_text[s.start..s.end]).into_iter().map(move |mut m| {
            m.span = astrobiomers_model::Span::new(m.span.start + s.start, m.span.end + s.start);
            m
        }))
        .collect();

    merge::merge_overlaps(raw)
        .into_iter()
        .filter(|m| m.confidence >= ensemble.config.confidence_threshold)
        .map(|m| Mention {
            paper_id: paper.paper_id.clone(),
            canonical_name: Mention::normalize_canonical_name(&m.text),
            text: m.text,
            kind: m.kind,
            span: m.span,
            confidence: m.confidence,
            extractor: match m.extractor {
                extractors::ExtractorTag::Transformer => Extractor::Transformer,
                extractors::ExtractorTag::Secondary => Extractor::Secondary,
                extractors::ExtractorTag::Pattern => Extractor::Pattern,
            },
            external_ids: Default::default(),
            ontology_terms: Default::default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use astrobiomers_model::Sentence;

    fn paper_with_sentence(text: &str) -> PreprocessedPaper {
        PreprocessedPaper {
            paper_id: "1".to_string(),
            original_text: text.to_string(),
            sentences: vec![Sentence {
                text: text.to_string(),
                start: 0,
                end: text.len(),
                tokens: vec![],
                lemmas: vec![],
                pos_tags: vec![],
            }],
            preprocess_failed: false,
        }
    }

    #[test]
    fn extracts_mentions_above_threshold() {
        let papers = vec![paper_with_sentence("Exposure to microgravity caused bone loss in mice.")];
        let ensemble = Ensemble::new(NerConfig::default());
        let mentions = extract_mentions(&papers, &ensemble);
        assert!(!mentions.is_empty());
        assert!(mentions.iter().all(|m| m.confidence >= 0.75));
    }

    #[test]
    fn preprocess_failed_papers_contribute_nothing() {
        let mut paper = paper_with_sentence("microgravity");
        paper.preprocess_failed = true;
        let ensemble = Ensemble::new(NerConfig::default());
        assert!(extract_mentions(&[paper], &ensemble).is_empty());
    }

    #[test]
    fn disabling_secondary_extractor_still_produces_mentions() {
        let papers = vec![paper_with_sentence("Exposure to microgravity caused bone loss.")];
        let config = NerConfig { use_secondary: false, ..NerConfig::default() };
        let ensemble = Ensemble::new(config);
        let mentions = extract_mentions(&papers, &ensemble);
        assert!(!mentions.is_empty());
    }

    #[test]
    fn mention_spans_point_into_original_paper_text() {
        let papers = vec![paper_with_sentence("Prolonged microgravity exposure was studied.")];
        let ensemble = Ensemble::new(NerConfig::default());
        let mentions = extract_mentions(&papers, &ensemble);
        for m in &mentions {
            assert_eq!(&papers[0].original_text[m.span.start..m.span.end], m.text);
        }
    }
}
