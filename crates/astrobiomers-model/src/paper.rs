//! Paper node and the preprocessing output shape (§3, §4.2, §4.3).

use serde::{Deserialize, Serialize};

/// Raw paper record as produced by acquisition (§4.2).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
    pub pmid: Option<String>,
    pub pmc_id: Option<String>,
    pub doi: Option<String>,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    pub publication_year: Option<i32>,
    pub journal: Option<String>,
    pub source_tag: String,
}

impl Paper {
    /// Stable paper identifier: `pmid` if present, else the synthetic key.
    pub fn id(&self) -> String {
        self.pmid
            .clone()
            .unwrap_or_else(|| synthetic_key(&self.source_tag, &self.title))
    }

    /// Dedup/sort key used by acquisition (§4.2: "dedup by pmid then by doi
    /// then by title hash").
    pub fn dedup_key(&self) -> String {
        self.pmid
            .clone()
            .or_else(|| self.doi.clone())
            .unwrap_or_else(|| title_hash(&self.title))
    }

    /// Records missing both abstract and title are dropped (§4.2).
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() || self.abstract_text.as_deref().is_some_and(|a| !a.trim().is_empty())
    }
}

/// Synthetic key for a paper without a `pmid` (§4.9, GLOSSARY).
pub fn synthetic_key(source_tag: &str, title: &str) -> String {
    format!("{source_tag}||{}", title_hash(title))
}

fn title_hash(title: &str) -> String {
    let normalized = title.trim().to_lowercase();
    blake3::hash(normalized.as_bytes()).to_hex().to_string()
}

/// A sentence with offsets into the paper's original (unprocessed) text, so
/// downstream extractors can cite source spans (§4.3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub tokens: Vec<String>,
    pub lemmas: Vec<String>,
    pub pos_tags: Vec<String>,
}

/// Output of stage 2 (§4.3): tokenized/normalized text per paper, with the
/// original text retained alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessedPaper {
    pub paper_id: String,
    pub original_text: String,
    pub sentences: Vec<Sentence>,
    pub preprocess_failed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_paper(pmid: Option<&str>) -> Paper {
        Paper {
            pmid: pmid.map(String::from),
            pmc_id: None,
            doi: None,
            title: "Microgravity induces bone loss".to_string(),
            abstract_text: Some("Spaceflight causes significant bone density loss.".to_string()),
            authors: vec![],
            publication_year: Some(2020),
            journal: None,
            source_tag: "curated".to_string(),
        }
    }

    #[test]
    fn id_uses_pmid_when_present() {
        assert_eq!(sample_paper(Some("123")).id(), "123");
    }

    #[test]
    fn id_falls_back_to_synthetic_key() {
        let paper = sample_paper(None);
        assert_eq!(paper.id(), synthetic_key("curated", &paper.title));
    }

    #[test]
    fn synthetic_key_is_stable_for_same_title() {
        assert_eq!(
            synthetic_key("curated", "Same Title"),
            synthetic_key("curated", "same title")
        );
    }

    #[test]
    fn dedup_key_prefers_pmid_then_doi_then_title_hash() {
        let mut paper = sample_paper(None);
        assert_eq!(paper.dedup_key(), title_hash(&paper.title));
        paper.doi = Some("10.1/xyz".to_string());
        assert_eq!(paper.dedup_key(), "10.1/xyz");
        paper.pmid = Some("999".to_string());
        assert_eq!(paper.dedup_key(), "999");
    }

    #[test]
    fn incomplete_paper_has_neither_title_nor_abstract() {
        let mut paper = sample_paper(None);
        paper.title = "  ".to_string();
        paper.abstract_text = None;
        assert!(!paper.is_complete());
    }
}
