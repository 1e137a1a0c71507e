//! Entity resolution services (§4.7): gene → Entrez/HGNC, protein → UniProt,
//! organism → NCBI taxon, chemical → PubChem CID.

use std::time::Duration;

use astrobiomers_core::RateLimiter;
use serde::Deserialize;

use crate::client::{rate_limited_lookup, LookupService};

const NCBI_ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";
const UNIPROT_SEARCH_URL: &str = "https://rest.uniprot.org/uniprotkb/search";
const PUBCHEM_CID_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/name";

fn default_policy() -> astrobiomers_core::RetryPolicy {
    astrobiomers_core::RetryPolicy::default()
}

#[derive(Debug, Deserialize)]
struct ESearchEnvelope {
    esearchresult: ESearchIdList,
}

#[derive(Debug, Deserialize)]
struct ESearchIdList {
    idlist: Vec<String>,
}

/// Gene symbol → Entrez id via NCBI E-utilities.
pub struct GeneResolver {
    client: reqwest::Client,
    limiter: RateLimiter,
}

impl GeneResolver {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client, limiter: RateLimiter::new(Duration::from_millis(334)) }
    }
}

#[async_trait::async_trait]
impl LookupService for GeneResolver {
    fn namespace(&self) -> &'static str {
        "entrez"
    }

    async fn lookup(&self, canonical_name: &str) -> Result<Option<String>, String> {
        let url = format!(
            "{NCBI_ESEARCH_URL}?db=gene&retmode=json&term={}%5Bsym%5D",
            urlencoding::encode(canonical_name)
        );
        rate_limited_lookup("gene resolution", &self.limiter, default_policy(), || {
            let client = self.client.clone();
            let url = url.clone();
            async move { fetch_first_esearch_id(&client, &url).await }
        })
        .await
    }
}

/// Protein name → UniProt accession.
pub struct ProteinResolver {
    client: reqwest::Client,
    limiter: RateLimiter,
}

impl ProteinResolver {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client, limiter: RateLimiter::new(Duration::from_millis(250)) }
    }
}

#[async_trait::async_trait]
impl LookupService for ProteinResolver {
    fn namespace(&self) -> &'static str {
        "uniprot"
    }

    async fn lookup(&self, canonical_name: &str) -> Result<Option<String>, String> {
        let url = format!(
            "{UNIPROT_SEARCH_URL}?query={}&fields=accession&format=json&size=1",
            urlencoding::encode(canonical_name)
        );
        rate_limited_lookup("protein resolution", &self.limiter, default_policy(), || {
            let client = self.client.clone();
            let url = url.clone();
            async move {
                let body = get_text(&client, &url).await?;
                let parsed: serde_json::Value = serde_json::from_str(&body).map_err(|e| e.to_string())?;
                Ok(parsed
                    .get("results")
                    .and_then(|r| r.as_array())
                    .and_then(|a| a.first())
                    .and_then(|r| r.get("primaryAccession"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string))
            }
        })
        .await
    }
}

/// Organism name → NCBI taxonomy id.
pub struct OrganismResolver {
    client: reqwest::Client,
    limiter: RateLimiter,
}

impl OrganismResolver {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client, limiter: RateLimiter::new(Duration::from_millis(334)) }
    }
}

#[async_trait::async_trait]
impl LookupService for OrganismResolver {
    fn namespace(&self) -> &'static str {
        "ncbi_taxon"
    }

    async fn lookup(&self, canonical_name: &str) -> Result<Option<String>, String> {
        let url = format!(
            "{NCBI_ESEARCH_URL}?db=taxonomy&retmode=json&term={}",
            urlencoding::encode(canonical_name)
        );
        rate_limited_lookup("organism resolution", &self.limiter, default_policy(), || {
            let client = self.client.clone();
            let url = url.clone();
            async move { fetch_first_esearch_id(&client, &url).await }
        })
        .await
    }
}

/// Chemical name → PubChem compound id.
pub struct ChemicalResolver {
    client: reqwest::Client,
    limiter: RateLimiter,
}

impl ChemicalResolver {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client, limiter: RateLimiter::new(Duration::from_millis(200)) }
    }
}

#[async_trait::async_trait]
impl LookupService for ChemicalResolver {
    fn namespace(&self) -> &'static str {
        "pubchem"
    }

    async fn lookup(&self, canonical_name: &str) -> Result<Option<String>, String> {
        let url = format!("{PUBCHEM_CID_URL}/{}/cids/JSON", urlencoding::encode(canonical_name));
        rate_limited_lookup("chemical resolution", &self.limiter, default_policy(), || {
            let client = self.client.clone();
            let url = url.clone();
            async move {
                let body = match get_text(&client, &url).await {
                    Ok(b) => b,
                    Err(e) if e.contains("404") => return Ok(None),
                    Err(e) => return Err(e),
                };
                let parsed: serde_json::Value = serde_json::from_str(&body).map_err(|e| e.to_string())?;
                Ok(parsed
                    .get("IdentifierList")
                    .and_then(|l| l.get("CID"))
                    .and_then(|c| c.as_array())
                    .and_then(|a| a.first())
                    .and_then(|v| v.as_u64())
                    .map(|cid| cid.to_string()))
            }
        })
        .await
    }
}

async fn fetch_first_esearch_id(client: &reqwest::Client, url: &str) -> Result<Option<String>, String> {
    let body = get_text(client, url).await?;
    let parsed: ESearchEnvelope = serde_json::from_str(&body).map_err(|e| e.to_string())?;
    Ok(parsed.esearchresult.idlist.into_iter().next())
}

async fn get_text(client: &reqwest::Client, url: &str) -> Result<String, String> {
    let resp = client
        .get(url)
        .timeout(Duration::from_secs(30))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if resp.status() == reqwest::StatusCode::NOT_FOUND {
        return Err("404".to_string());
    }
    if !resp.status().is_success() {
        return Err(format!("HTTP {}", resp.status()));
    }
    resp.text().await.map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urlencoding_escapes_spaces() {
        assert_eq!(urlencoding::encode("bone loss"), "bone%20loss");
    }

    #[test]
    fn namespaces_match_spec_db_names() {
        let client = reqwest::Client::new();
        assert_eq!(GeneResolver::new(client.clone()).namespace(), "entrez");
        assert_eq!(ProteinResolver::new(client.clone()).namespace(), "uniprot");
        assert_eq!(OrganismResolver::new(client.clone()).namespace(), "ncbi_taxon");
        assert_eq!(ChemicalResolver::new(client).namespace(), "pubchem");
    }
}
