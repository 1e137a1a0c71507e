//! Astrobiomers topic modeling - stage 5 of the pipeline (§4.6).

pub mod cluster;
pub mod embed;
pub mod keywords;
pub mod reduce;

use std::collections::HashMap;

use astrobiomers_model::{PreprocessedPaper, Topic, TopicsArtifact, UNASSIGNED_TOPIC_ID};
use embed::{HashingEmbedder, SentenceEmbedder};

#[derive(Debug, Clone)]
pub struct TopicConfig {
    pub min_corpus: usize,
    pub reduced_dim: usize,
    pub eps: f32,
    pub min_points: usize,
    pub keywords_per_topic: usize,
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            min_corpus: 100,
            reduced_dim: 32,
            eps: 0.6,
            min_points: 3,
            keywords_per_topic: 10,
        }
    }
}

pub fn run_topics(papers: &[PreprocessedPaper], config: &TopicConfig) -> TopicsArtifact {
    run_topics_with_embedder(papers, config, &HashingEmbedder::default())
}

pub fn run_topics_with_embedder(
    papers: &[PreprocessedPaper],
    config: &TopicConfig,
    embedder: &dyn SentenceEmbedder,
) -> TopicsArtifact {
    if papers.len() < config.min_corpus {
        log::info!(
            "topics: corpus of {} papers below minimum {}, skipping clustering",
            papers.len(),
            config.min_corpus
        );
        let assignments = papers.iter().map(|p| (p.paper_id.clone(), UNASSIGNED_TOPIC_ID)).collect();
        return TopicsArtifact { topics: Vec::new(), assignments };
    }

    let texts: Vec<String> = papers.iter().map(|p| p.original_text.clone()).collect();
    let embeddings = embedder.embed(&texts);
    let reduced = reduce::project(&embeddings, config.reduced_dim);
    let labels = cluster::dbscan(&reduced, &cluster::DbscanConfig { eps: config.eps, min_points: config.min_points });

    let mut members: HashMap<i64, Vec<usize>> = HashMap::new();
    for (idx, &label) in labels.iter().enumerate() {
        members.entry(label).or_default().push(idx);
    }

    let mut topics = Vec::new();
    for (&label, indices) in &members {
        if label == UNASSIGNED_TOPIC_ID {
            continue;
        }
        let member_lemmas: Vec<Vec<String>> = indices
            .iter()
            .flat_map(|&i| papers[i].sentences.iter().map(|s| s.lemmas.clone()))
            .collect();
        let keywords = keywords::top_keywords(&member_lemmas, config.keywords_per_topic);
        let label_text = keywords.first().cloned().unwrap_or_else(|| format!("topic-{label}"));
        topics.push(Topic {
            id: label,
            label: label_text,
            size: indices.len(),
            keywords,
        });
    }
    topics.sort_by_key(|t| t.id);

    let assignments = papers
        .iter()
        .zip(labels.iter())
        .map(|(p, &label)| (p.paper_id.clone(), label))
        .collect();

    log::info!("topics: {} clusters over {} papers", topics.len(), papers.len());
    TopicsArtifact { topics, assignments }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astrobiomers_model::Sentence;

    fn paper(id: &str, text: &str) -> PreprocessedPaper {
        PreprocessedPaper {
            paper_id: id.into(),
            original_text: text.into(),
            sentences: vec![Sentence {
                text: text.into(),
                start: 0,
                end: text.len(),
                tokens: vec![],
                lemmas: text.split_whitespace().map(str::to_string).collect(),
                pos_tags: vec![],
            }],
            preprocess_failed: false,
        }
    }

    #[test]
    fn below_minimum_corpus_assigns_unassigned_and_no_topics() {
        let papers: Vec<_> = (0..5).map(|i| paper(&i.to_string(), "bone loss microgravity")).collect();
        let result = run_topics(&papers, &TopicConfig::default());
        assert!(result.topics.is_empty());
        assert!(result.assignments.values().all(|&id| id == UNASSIGNED_TOPIC_ID));
    }

    #[test]
    fn at_or_above_minimum_corpus_runs_clustering() {
        let mut papers: Vec<_> = (0..60).map(|i| paper(&format!("bone-{i}"), "bone loss osteoporosis microgravity density")).collect();
        papers.extend((0..60).map(|i| paper(&format!("immune-{i}"), "immune dysfunction spaceflight radiation lymphocyte")));
        let config = TopicConfig { min_corpus: 100, eps: 0.3, min_points: 5, ..TopicConfig::default() };
        let result = run_topics(&papers, &config);
        assert_eq!(result.assignments.len(), papers.len());
    }

    #[test]
    fn every_paper_gets_an_assignment() {
        let papers: Vec<_> = (0..3).map(|i| paper(&i.to_string(), "bone loss")).collect();
        let result = run_topics(&papers, &TopicConfig::default());
        for p in &papers {
            assert!(result.assignments.contains_key(&p.paper_id));
        }
    }
}
