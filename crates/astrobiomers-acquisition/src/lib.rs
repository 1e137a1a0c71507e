//! Astrobiomers Acquisition - stage 1 of the pipeline (§4.2).
//!
//! Produces a deduplicated, deterministically ordered list of paper records
//! from one or more configured sources.

pub mod curated;
pub mod dedup;
pub mod pubmed;
pub mod source;

pub use curated::fetch_curated;
pub use dedup::dedup_and_sort;
pub use pubmed::search_pubmed;
pub use source::{AcquisitionConfig, Source};

use astrobiomers_core::AcquisitionError;
use astrobiomers_model::Paper;

/// Run acquisition against every source enabled in `config`, merge, dedup,
/// and sort (§4.2 "Guarantees").
pub async fn acquire(
    client: &reqwest::Client,
    config: &AcquisitionConfig,
) -> Result<Vec<Paper>, AcquisitionError> {
    let mut papers = Vec::new();

    if config.sources.contains(&Source::Curated) {
        match fetch_curated(client, &config.curated_manifest_url).await {
            Ok(mut fetched) => papers.append(&mut fetched),
            Err(e) => log::warn!("curated source unavailable, skipping: {e}"),
        }
    }

    if config.sources.contains(&Source::PubmedSearch) {
        match search_pubmed(client, &config.pubmed_query, config.max_papers, config.pubmed_api_key.as_deref()).await {
            Ok(mut fetched) => papers.append(&mut fetched),
            Err(e) => log::warn!("pubmed search unavailable, skipping: {e}"),
        }
    }

    let papers: Vec<Paper> = papers.into_iter().filter(|p| p.is_complete()).collect();
    let mut papers = dedup_and_sort(papers);
    // max_papers = 0 completes successfully with empty artifacts (§8 boundary).
    papers.truncate(config.max_papers);

    Ok(papers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_list_is_not_an_error() {
        // Covered at the integration level in tests/acquire.rs; this module
        // just checks the config shape compiles with an empty source set.
        let config = AcquisitionConfig {
            sources: vec![],
            max_papers: 0,
            curated_manifest_url: String::new(),
            pubmed_query: String::new(),
            pubmed_api_key: None,
        };
        assert!(config.sources.is_empty());
    }
}
