//! Astrobiomers Preprocess - stage 2 of the pipeline (§4.3).
//!
//! Per-paper work is independent and parallelized across worker threads
//! bounded by CPU count, then deterministically re-ordered by paper id
//! before persisting (§5 "Scheduling model").

pub mod clean;
pub mod sentence;
pub mod token;

use astrobiomers_model::{Paper, PreprocessedPaper, Sentence};
use rayon::prelude::*;

/// Preprocess every paper, in parallel, then sort by paper id so artifacts
/// are reproducible regardless of worker count (§5).
pub fn preprocess_papers(papers: &[Paper]) -> Vec<PreprocessedPaper> {
    let mut results: Vec<PreprocessedPaper> = papers.par_iter().map(preprocess_one).collect();
    results.sort_by(|a, b| a.paper_id.cmp(&b.paper_id));

    let failed = results.iter().filter(|p| p.preprocess_failed).count();
    log::info!("preprocess: {} papers in, {} failed", results.len(), failed);
    if failed > 0 {
        log::warn!("preprocess: {failed} papers produced zero sentences and were marked preprocess_failed");
    }

    results
}

fn preprocess_one(paper: &Paper) -> PreprocessedPaper {
    let title = paper.title.trim().trim_end_matches('.');
    let original_text = match &paper.abstract_text {
        Some(a) if !a.trim().is_empty() => format!("{title}. {a}"),
        _ => paper.title.clone(),
    };

    let raw_sentences = sentence::segment_sentences(&original_text);
    let preprocess_failed = raw_sentences.is_empty();

    let sentences = raw_sentences
        .into_iter()
        .map(|raw| {
            let cleaned = clean::clean_text(&raw.text);
            let tokens = token::tokenize(&cleaned);
            let lemmas: Vec<String> = tokens
                .iter()
                .map(|t| token::lemmatize(t))
                .filter(|l| !token::is_stopword(l))
                .collect();
            let pos_tags: Vec<String> = tokens.iter().map(|t| token::tag_pos(t).as_str().to_string()).collect();

            Sentence {
                text: raw.text,
                start: raw.start,
                end: raw.end,
                tokens,
                lemmas,
                pos_tags,
            }
        })
        .collect();

    PreprocessedPaper {
        paper_id: paper.id(),
        original_text,
        sentences,
        preprocess_failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(pmid: &str, title: &str, abstract_text: &str) -> Paper {
        Paper {
            pmid: Some(pmid.to_string()),
            pmc_id: None,
            doi: None,
            title: title.to_string(),
            abstract_text: Some(abstract_text.to_string()),
            authors: vec![],
            publication_year: None,
            journal: None,
            source_tag: "curated".to_string(),
        }
    }

    #[test]
    fn preprocesses_into_sentences_with_tokens() {
        let papers = vec![sample(
            "1",
            "Microgravity and bone loss",
            "Microgravity induces significant bone loss in astronauts. Muscle atrophy is also observed.",
        )];
        let result = preprocess_papers(&papers);
        assert_eq!(result.len(), 1);
        assert!(!result[0].preprocess_failed);
        assert_eq!(result[0].sentences.len(), 3); // title becomes its own sentence-like prefix + 2 body sentences
    }

    #[test]
    fn empty_abstract_and_title_marks_preprocess_failed() {
        let mut paper = sample("2", "", "");
        paper.title = "   ".to_string();
        paper.abstract_text = Some("   ".to_string());
        let result = preprocess_papers(&[paper]);
        assert!(result[0].preprocess_failed);
    }

    #[test]
    fn output_order_is_sorted_by_paper_id_regardless_of_input_order() {
        let papers = vec![
            sample("2", "Second paper", "Some abstract text here."),
            sample("1", "First paper", "Some other abstract text."),
        ];
        let result = preprocess_papers(&papers);
        assert_eq!(result[0].paper_id, "1");
        assert_eq!(result[1].paper_id, "2");
    }

    #[test]
    fn sentence_offsets_point_into_original_text() {
        let papers = vec![sample("1", "Title here", "Bone loss occurs. Muscle atrophy follows.")];
        let result = preprocess_papers(&papers);
        let paper = &result[0];
        for s in &paper.sentences {
            assert_eq!(&paper.original_text[s.start..s.end], s.text);
        }
    }

    #[test]
    fn stopwords_are_removed_from_lemmas_but_tokens_kept_intact() {
        let papers = vec![sample("1", "T", "The gene is upregulated in the tissue.")];
        let result = preprocess_papers(&papers);
        let sentence = &result[0].sentences[1]; // title sentence is index 0
        assert!(sentence.tokens.contains(&"the".to_string()) || sentence.tokens.iter().any(|t| t.eq_ignore_ascii_case("the")));
        assert!(!sentence.lemmas.iter().any(|l| l == "the"));
    }
}
