//! Keyword search against PubMed's E-utilities (§4.2 "Keyword search against
//! a biomedical literature service").

use astrobiomers_core::{retry_with_backoff, AcquisitionError, RateLimiter, RetryPolicy};
use astrobiomers_model::Paper;
use serde::Deserialize;

const SOURCE_TAG: &str = "pubmed_search";
const ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";
const ESUMMARY_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esummary.fcgi";
const PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct ESearchResponse {
    esearchresult: ESearchResult,
}

#[derive(Debug, Deserialize)]
struct ESearchResult {
    idlist: Vec<String>,
    count: String,
}

#[derive(Debug, Deserialize)]
struct ESummaryResponse {
    result: serde_json::Map<String, serde_json::Value>,
}

/// Paginated keyword search. Honors the minimum inter-request interval
/// dictated by whether `api_key` is configured (§4.2, §5).
pub async fn search_pubmed(
    client: &reqwest::Client,
    query: &str,
    max_results: usize,
    api_key: Option<&str>,
) -> Result<Vec<Paper>, AcquisitionError> {
    if query.is_empty() || max_results == 0 {
        return Ok(Vec::new());
    }

    let limiter = RateLimiter::for_pubmed(api_key.is_some());
    let policy = RetryPolicy::default();
    let mut pmids = Vec::new();
    let mut retstart = 0usize;

    loop {
        limiter.wait().await;
        let page_size = PAGE_SIZE.min(max_results - pmids.len());
        let ids = fetch_esearch_page(client, query, retstart, page_size, api_key, &policy).await?;
        if ids.is_empty() {
            break;
        }
        pmids.extend(ids);
        retstart += page_size;
        if pmids.len() >= max_results {
            break;
        }
    }
    pmids.truncate(max_results);

    if pmids.is_empty() {
        return Ok(Vec::new());
    }

    limiter.wait().await;
    fetch_summaries(client, &pmids, api_key, &policy).await
}

async fn fetch_esearch_page(
    client: &reqwest::Client,
    query: &str,
    retstart: usize,
    retmax: usize,
    api_key: Option<&str>,
    policy: &RetryPolicy,
) -> Result<Vec<String>, AcquisitionError> {
    let mut url = format!(
        "{ESEARCH_URL}?db=pubmed&retmode=json&term={}&retstart={retstart}&retmax={retmax}",
        urlencode(query)
    );
    if let Some(key) = api_key {
        url.push_str(&format!("&api_key={key}"));
    }

    let body = retry_with_backoff("pubmed esearch", *policy, || async {
        let resp = client
            .get(&url)
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

    let parsed: ESearchResponse = serde_json::from_str(&body).map_err(|e| AcquisitionError::Unavailable {
        source_tag: SOURCE_TAG.to_string(),
        attempts: 1,
        message: format!("invalid esearch response: {e}"),
    })?;
    let _total: usize = parsed.esearchresult.count.parse().unwrap_or(0);
    Ok(parsed.esearchresult.idlist)
}

async fn fetch_summaries(
    client: &reqwest::Client,
    pmids: &[String],
    api_key: Option<&str>,
    policy: &RetryPolicy,
) -> Result<Vec<Paper>, AcquisitionError> {
    let mut url = format!(
        "{ESUMMARY_URL}?db=pubmed&retmode=json&id={}",
        pmids.join(",")
    );
    if let Some(key) = api_key {
        url.push_str(&format!("&api_key={key}"));
    }

    let body = retry_with_backoff("pubmed esummary", *policy, || async {
        let resp = client
            .get(&url)
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

    let parsed: ESummaryResponse = serde_json::from_str(&body).map_err(|e| AcquisitionError::Unavailable {
        source_tag: SOURCE_TAG.to_string(),
        attempts: 1,
        message: format!("invalid esummary response: {e}"),
    })?;

    Ok(pmids
        .iter()
        .filter_map(|pmid| parsed.result.get(pmid))
        .filter_map(|doc| summary_to_paper(doc))
        .collect())
}

fn summary_to_paper(doc: &serde_json::Value) -> Option<Paper> {
    let title = doc.get("title")?.as_str()?.to_string();
    let pmid = doc.get("uid").and_then(|v| v.as_str()).map(String::from);
    let journal = doc
        .get("fulljournalname")
        .and_then(|v| v.as_str())
        .map(String::from);
    let publication_year = doc
        .get("pubdate")
        .and_then(|v| v.as_str())
        .and_then(|s| s.split_whitespace().next())
        .and_then(|y| y.parse().ok());

    Some(Paper {
        pmid,
        pmc_id: None,
        doi: None,
        title,
        abstract_text: None,
        authors: Vec::new(),
        publication_year,
        journal,
        source_tag: SOURCE_TAG.to_string(),
    })
}

fn urlencode(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '~' {
                c.to_string()
            } else {
                format!("%{:02X}", c as u32)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urlencode_escapes_spaces_and_parens() {
        assert_eq!(urlencode("a AND (b)"), "a%20AND%20%28b%29");
    }

    #[tokio::test]
    async fn empty_query_short_circuits() {
        let client = reqwest::Client::new();
        let result = search_pubmed(&client, "", 10, None).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn zero_max_results_short_circuits() {
        let client = reqwest::Client::new();
        let result = search_pubmed(&client, "bone loss", 0, None).await.unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn summary_to_paper_requires_title() {
        let doc = serde_json::json!({"uid": "123"});
        assert!(summary_to_paper(&doc).is_none());
    }

    #[test]
    fn summary_to_paper_extracts_year_from_pubdate() {
        let doc = serde_json::json!({
            "uid": "123",
            "title": "Effects of microgravity",
            "pubdate": "2021 Jun 15",
        });
        let paper = summary_to_paper(&doc).unwrap();
        assert_eq!(paper.publication_year, Some(2021));
    }
}
