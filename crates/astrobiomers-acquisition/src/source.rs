//! Source selection and per-run acquisition configuration (§4.2, §6).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    Curated,
    PubmedSearch,
    ExternalDatasets,
}

#[derive(Debug, Clone)]
pub struct AcquisitionConfig {
    pub sources: Vec<Source>,
    pub max_papers: usize,
    pub curated_manifest_url: String,
    pub pubmed_query: String,
    pub pubmed_api_key: Option<String>,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            sources: vec![Source::Curated],
            max_papers: 100,
            curated_manifest_url: String::new(),
            pubmed_query: "spaceflight AND microgravity".to_string(),
            pubmed_api_key: None,
        }
    }
}
