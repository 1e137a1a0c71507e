//! Schema initialization (§4.9 "Schema initialization (once)"). Every
//! statement uses `IF NOT EXISTS`, so re-running is safe.

use astrobiomers_core::LoaderError;
use astrobiomers_model::EntityKind;
use neo4rs::{Graph, Query};

/// Constraints and indexes that must exist before any batch write.
pub fn schema_statements() -> Vec<String> {
    let mut statements = vec![
        "CREATE CONSTRAINT paper_pmid IF NOT EXISTS FOR (p:Paper) REQUIRE p.pmid IS UNIQUE".to_string(),
        "CREATE CONSTRAINT paper_synthetic_key IF NOT EXISTS FOR (p:Paper) REQUIRE p.synthetic_key IS UNIQUE".to_string(),
        "CREATE INDEX paper_doi IF NOT EXISTS FOR (p:Paper) ON (p.doi)".to_string(),
        "CREATE CONSTRAINT topic_id IF NOT EXISTS FOR (t:Topic) REQUIRE t.id IS UNIQUE".to_string(),
    ];

    for kind in EntityKind::all() {
        let label = kind.node_label();
        statements.push(format!(
            "CREATE CONSTRAINT {}_canonical_name IF NOT EXISTS FOR (n:{label}) REQUIRE n.canonical_name IS UNIQUE",
            label.to_lowercase()
        ));
    }

    for (label, property) in alternate_key_indexes() {
        statements.push(format!(
            "CREATE INDEX {}_{} IF NOT EXISTS FOR (n:{label}) ON (n.{property})",
            label.to_lowercase(),
            property
        ));
    }

    statements
}

/// Lookup indexes on alternate keys (§4.9). Labels must match
/// `EntityKind::node_label()` exactly — Neo4j labels are case-sensitive.
fn alternate_key_indexes() -> Vec<(&'static str, &'static str)> {
    use EntityKind::*;
    vec![
        (Gene.node_label(), "entrez_id"),
        (Gene.node_label(), "hgnc_id"),
        (Protein.node_label(), "uniprot_id"),
        (Organism.node_label(), "ncbi_taxon_id"),
        (Chemical.node_label(), "pubchem_id"),
        (Phenotype.node_label(), "hpo_id"),
        (Disease.node_label(), "mondo_id"),
        (Stressor.node_label(), "envo_id"),
        (CellType.node_label(), "cl_id"),
    ]
}

pub async fn init_schema(graph: &Graph) -> Result<(), LoaderError> {
    for statement in schema_statements() {
        graph
            .run(Query::new(statement.clone()))
            .await
            .map_err(|e| LoaderError::BatchFailed { batch_id: 0, message: format!("schema statement '{statement}' failed: {e}") })?;
    }
    Ok(())
}
