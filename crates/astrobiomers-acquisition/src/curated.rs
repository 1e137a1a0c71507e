//! Curated-list source: fetch a manifest (CSV/JSON) from a fixed URL (§4.2).

use astrobiomers_core::{retry_with_backoff, AcquisitionError, RetryPolicy};
use astrobiomers_model::Paper;
use serde::Deserialize;

const SOURCE_TAG: &str = "curated";

/// One row of the curated manifest. `pmc_id` is the minimum external
/// identifier the manifest must provide per row (§4.2).
#[derive(Debug, Deserialize)]
struct ManifestRow {
    title: String,
    pmc_id: String,
    pmid: Option<String>,
    doi: Option<String>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    #[serde(default)]
    authors: Vec<String>,
    publication_year: Option<i32>,
    journal: Option<String>,
}

impl From<ManifestRow> for Paper {
    fn from(row: ManifestRow) -> Self {
        Paper {
            pmid: row.pmid,
            pmc_id: Some(row.pmc_id),
            doi: row.doi,
            title: row.title,
            abstract_text: row.abstract_text,
            authors: row.authors,
            publication_year: row.publication_year,
            journal: row.journal,
            source_tag: SOURCE_TAG.to_string(),
        }
    }
}

/// Fetch and parse the curated manifest, retrying transient failures with
/// exponential backoff up to `RetryPolicy::default()`'s cap.
pub async fn fetch_curated(client: &reqwest::Client, manifest_url: &str) -> Result<Vec<Paper>, AcquisitionError> {
    if manifest_url.is_empty() {
        return Ok(Vec::new());
    }

    let policy = RetryPolicy::default();
    let body = retry_with_backoff("curated manifest fetch", policy, || async {
        let resp = client
            .get(manifest_url)
            .timeout(policy.timeout)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.status().is_success() {
            return Err(format!("HTTP {}", resp.status()));
        }
        resp.text().await.map_err(|e| e.to_string())
    })
    .await
    .map_err(|message| AcquisitionError::Unavailable {
        source_tag: SOURCE_TAG.to_string(),
        attempts: policy.max_retries + 1,
        message,
    })?;

    parse_manifest(&body, manifest_url)
}

fn parse_manifest(body: &str, manifest_url: &str) -> Result<Vec<Paper>, AcquisitionError> {
    let rows: Vec<ManifestRow> = if manifest_url.ends_with(".json") {
        serde_json::from_str(body).map_err(|e| AcquisitionError::Unavailable {
            source_tag: SOURCE_TAG.to_string(),
            attempts: 1,
            message: format!("invalid JSON manifest: {e}"),
        })?
    } else {
        let mut reader = csv::Reader::from_reader(body.as_bytes());
        reader
            .deserialize()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AcquisitionError::Unavailable {
                source_tag: SOURCE_TAG.to_string(),
                attempts: 1,
                message: format!("invalid CSV manifest: {e}"),
            })?
    };

    Ok(rows.into_iter().map(Paper::from).collect())
}
