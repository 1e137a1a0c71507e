//! Ontology alignment (§4.8): map a mention's canonical name onto a term in
//! its kind's target ontology via the EBI Ontology Lookup Service, which
//! covers all seven target ontologies behind one search API.

use std::time::Duration;

use astrobiomers_core::RateLimiter;
use astrobiomers_model::EntityKind;
use serde::Deserialize;

use crate::client::{rate_limited_lookup, LookupService};

const OLS_SEARCH_URL: &str = "https://www.ebi.ac.uk/ols/api/search";

/// Target ontology per entity kind (§4.8 "Target ontologies by kind").
pub fn ontology_for_kind(kind: EntityKind) -> Option<&'static str> {
    match kind {
        EntityKind::Gene => Some("go"),
        EntityKind::Disease => Some("mondo"),
        EntityKind::Phenotype => Some("hpo"),
        EntityKind::Stressor => Some("envo"),
        EntityKind::CellType => Some("cl"),
        EntityKind::Chemical => Some("chebi"),
        // UBERON covers anatomical terms; no entity kind maps to it
        // one-to-one in this data model, so it's reachable only via
        // `OntologyAligner::new("uberon")` directly, not this table.
        EntityKind::Protein | EntityKind::Organism | EntityKind::Intervention => None,
    }
}

#[derive(Debug, Deserialize)]
struct OlsResponse {
    response: OlsResult,
}

#[derive(Debug, Deserialize)]
struct OlsResult {
    docs: Vec<OlsDoc>,
}

#[derive(Debug, Deserialize)]
struct OlsDoc {
    obo_id: Option<String>,
}

pub struct OntologyAligner {
    ontology: &'static str,
    client: reqwest::Client,
    limiter: RateLimiter,
}

impl OntologyAligner {
    pub fn new(ontology: &'static str, client: reqwest::Client) -> Self {
        Self { ontology, client, limiter: RateLimiter::new(Duration::from_millis(200)) }
    }
}

#[async_trait::async_trait]
impl LookupService for OntologyAligner {
    fn namespace(&self) -> &'static str {
        self.ontology
    }

    async fn lookup(&self, canonical_name: &str) -> Result<Option<String>, String> {
        let url = format!(
            "{OLS_SEARCH_URL}?q={}&ontology={}&rows=1",
            urlencoding::encode(canonical_name),
            self.ontology
        );
        rate_limited_lookup("ontology alignment", &self.limiter, astrobiomers_core::RetryPolicy::default(), || {
            let client = self.client.clone();
            let url = url.clone();
            async move {
                let resp = client
                    .get(&url)
                    .timeout(Duration::from_secs(30))
                    .send()
                    .await
                    .map_err(|e| e.to_string())?;
                if !resp.status().is_success() {
                    return Err(format!("HTTP {}", resp.status()));
                }
                let body = resp.text().await.map_err(|e| e.to_string())?;
                let parsed: OlsResponse = serde_json::from_str(&body).map_err(|e| e.to_string())?;
                Ok(parsed.response.docs.into_iter().find_map(|d| d.obo_id))
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_kinds_to_their_target_ontology() {
        assert_eq!(ontology_for_kind(EntityKind::Gene), Some("go"));
        assert_eq!(ontology_for_kind(EntityKind::Disease), Some("mondo"));
        assert_eq!(ontology_for_kind(EntityKind::Phenotype), Some("hpo"));
        assert_eq!(ontology_for_kind(EntityKind::Stressor), Some("envo"));
        assert_eq!(ontology_for_kind(EntityKind::CellType), Some("cl"));
        assert_eq!(ontology_for_kind(EntityKind::Chemical), Some("chebi"));
    }

    #[test]
    fn kinds_without_a_target_ontology_return_none() {
        assert_eq!(ontology_for_kind(EntityKind::Organism), None);
    }
}
