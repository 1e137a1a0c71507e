//! Astrobiomers enrichment - stages 6 (entity resolution) and 7 (ontology
//! alignment) of the pipeline (§4.7, §4.8).

pub mod alignment;
pub mod cache;
pub mod client;
pub mod resolution;

use std::collections::HashMap;
use std::path::PathBuf;

use astrobiomers_model::{EntityKind, Mention};
use client::{DemoModeService, LookupService};

#[derive(Debug, Clone)]
pub struct EnrichConfig {
    /// Disables network calls; every lookup resolves to `None` (§4.7).
    pub demo_mode: bool,
    pub cache_dir: PathBuf,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self { demo_mode: true, cache_dir: PathBuf::from(".astrobiomers/cache") }
    }
}

fn resolver_for_kind(kind: EntityKind, client: &reqwest::Client) -> Option<Box<dyn LookupService>> {
    match kind {
        EntityKind::Gene => Some(Box::new(resolution::GeneResolver::new(client.clone()))),
        EntityKind::Protein => Some(Box::new(resolution::ProteinResolver::new(client.clone()))),
        EntityKind::Organism => Some(Box::new(resolution::OrganismResolver::new(client.clone()))),
        EntityKind::Chemical => Some(Box::new(resolution::ChemicalResolver::new(client.clone()))),
        _ => None,
    }
}

fn aligner_for_kind(kind: EntityKind, client: &reqwest::Client) -> Option<Box<dyn LookupService>> {
    alignment::ontology_for_kind(kind).map(|ontology| {
        Box::new(alignment::OntologyAligner::new(ontology, client.clone())) as Box<dyn LookupService>
    })
}

/// Stage 6: attach external database identifiers per unique (kind,
/// canonical_name), not per mention (§4.7 "Policy").
pub async fn run_resolution(mentions: &mut [Mention], client: &reqwest::Client, config: &EnrichConfig) {
    enrich(mentions, client, config, "resolution.json", resolver_for_kind, |m| &mut m.external_ids).await;
}

/// Stage 7: attach ontology term ids per unique (kind, canonical_name)
/// (§4.8 "Policy").
pub async fn run_alignment(mentions: &mut [Mention], client: &reqwest::Client, config: &EnrichConfig) {
    enrich(mentions, client, config, "alignment.json", aligner_for_kind, |m| &mut m.ontology_terms).await;
}

async fn enrich(
    mentions: &mut [Mention],
    client: &reqwest::Client,
    config: &EnrichConfig,
    cache_file: &str,
    service_for_kind: impl Fn(EntityKind, &reqwest::Client) -> Option<Box<dyn LookupService>>,
    field: impl Fn(&mut Mention) -> &mut HashMap<String, String>,
) {
    let mut disk_cache = cache::DiskCache::load(config.cache_dir.join(cache_file));

    let mut unique: HashMap<(EntityKind, String), Option<String>> = HashMap::new();
    for m in mentions.iter() {
        unique.entry((m.kind, m.canonical_name.clone())).or_insert(None);
    }

    let mut resolved: HashMap<(EntityKind, String), (String, String)> = HashMap::new();

    for (kind, canonical_name) in unique.keys() {
        let Some(service) = service_for_kind(*kind, client) else {
            continue;
        };
        let namespace = service.namespace();

        if let Some(cached) = disk_cache.get(namespace, canonical_name) {
            if let Some(id) = cached {
                resolved.insert((*kind, canonical_name.clone()), (namespace.to_string(), id));
            }
            continue;
        }

        let result = if config.demo_mode {
            DemoModeService { namespace }.lookup(canonical_name).await
        } else {
            service.lookup(canonical_name).await
        };

        match result {
            Ok(Some(id)) => {
                disk_cache.insert(namespace, canonical_name, Some(id.clone()));
                resolved.insert((*kind, canonical_name.clone()), (namespace.to_string(), id));
            }
            Ok(None) => {
                disk_cache.insert(namespace, canonical_name, None);
            }
            Err(e) => {
                log::warn!("{namespace} lookup failed for {canonical_name}: {e}");
            }
        }
    }

    if let Err(e) = disk_cache.save() {
        log::warn!("failed to persist {}: {e}", disk_cache.path().display());
    }

    for m in mentions.iter_mut() {
        if let Some((namespace, id)) = resolved.get(&(m.kind, m.canonical_name.clone())) {
            field(m).insert(namespace.clone(), id.clone());
        }
    }
}
