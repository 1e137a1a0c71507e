//! Entity kind normalization and the persisted Entity node shape (§3, §4.4).

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Canonical entity kinds. The loader dispatches to a distinct graph label
/// per variant — inconsistent kind tagging upstream silently breaks that
/// dispatch (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Gene,
    Protein,
    Disease,
    Phenotype,
    Stressor,
    Organism,
    CellType,
    Chemical,
    Intervention,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gene => "GENE",
            Self::Protein => "PROTEIN",
            Self::Disease => "DISEASE",
            Self::Phenotype => "PHENOTYPE",
            Self::Stressor => "STRESSOR",
            Self::Organism => "ORGANISM",
            Self::CellType => "CELL_TYPE",
            Self::Chemical => "CHEMICAL",
            Self::Intervention => "INTERVENTION",
        }
    }

    /// Graph node label for this kind (§4.9 schema init).
    pub fn node_label(self) -> &'static str {
        self.as_str()
    }

    pub fn all() -> [EntityKind; 9] {
        [
            Self::Gene,
            Self::Protein,
            Self::Disease,
            Self::Phenotype,
            Self::Stressor,
            Self::Organism,
            Self::CellType,
            Self::Chemical,
            Self::Intervention,
        ]
    }
}

fn label_map() -> &'static HashMap<&'static str, EntityKind> {
    static MAP: OnceLock<HashMap<&'static str, EntityKind>> = OnceLock::new();
    MAP.get_or_init(|| {
        let mut m = HashMap::new();
        // Canonical uppercase forms (already normalized).
        for kind in EntityKind::all() {
            m.insert(kind.as_str(), kind);
        }
        // Common raw labels the NER ensemble's underlying models emit,
        // mapped onto the canonical set (§4.4 "Type normalization").
        m.insert("Gene", EntityKind::Gene);
        m.insert("GGP", EntityKind::Gene);
        m.insert("Gene_or_gene_product", EntityKind::Gene);
        m.insert("DNA", EntityKind::Gene);
        m.insert("RNA", EntityKind::Gene);
        m.insert("Protein", EntityKind::Protein);
        m.insert("Simple_chemical", EntityKind::Chemical);
        m.insert("Chemical", EntityKind::Chemical);
        m.insert("Drug", EntityKind::Chemical);
        m.insert("Disease", EntityKind::Disease);
        m.insert("SpecificDisease", EntityKind::Disease);
        m.insert("DiseaseClass", EntityKind::Disease);
        m.insert("Phenotype", EntityKind::Phenotype);
        m.insert("Stressor", EntityKind::Stressor);
        m.insert("Species", EntityKind::Organism);
        m.insert("TAXON", EntityKind::Organism);
        m.insert("Organism", EntityKind::Organism);
        m.insert("CellLine", EntityKind::CellType);
        m.insert("cell_type", EntityKind::CellType);
        m.insert("CELL", EntityKind::CellType);
        m.insert("Intervention", EntityKind::Intervention);
        m
    })
}

/// Normalize a raw model/pattern label to the canonical uppercase kind set.
/// Strips BIO tagging prefixes (`B-`, `I-`) before lookup. Unknown labels
/// fall back to `None` so the caller can drop the mention rather than
/// silently miscategorize it.
pub fn normalize_entity_kind(label: &str) -> Option<EntityKind> {
    let stripped = label.trim_start_matches("B-").trim_start_matches("I-");
    label_map()
        .get(stripped)
        .or_else(|| label_map().get(label))
        .copied()
}

/// A resolved Entity node as persisted to the graph (§3, §4.9).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub canonical_name: String,
    pub surface_forms: Vec<String>,
    pub mention_count: u64,
    pub external_ids: HashMap<String, String>,
    pub ontology_terms: HashMap<String, String>,
}

impl Entity {
    pub fn new(kind: EntityKind, canonical_name: impl Into<String>) -> Self {
        Self {
            kind,
            canonical_name: canonical_name.into(),
            surface_forms: Vec::new(),
            mention_count: 0,
            external_ids: HashMap::new(),
            ontology_terms: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_canonical_forms() {
        assert_eq!(normalize_entity_kind("GENE"), Some(EntityKind::Gene));
        assert_eq!(normalize_entity_kind("CHEMICAL"), Some(EntityKind::Chemical));
    }

    #[test]
    fn normalizes_raw_model_labels() {
        assert_eq!(normalize_entity_kind("GGP"), Some(EntityKind::Gene));
        assert_eq!(normalize_entity_kind("B-DISEASE"), Some(EntityKind::Disease));
        assert_eq!(normalize_entity_kind("SpecificDisease"), Some(EntityKind::Disease));
    }

    #[test]
    fn unknown_label_returns_none() {
        assert_eq!(normalize_entity_kind("MISC"), None);
    }

    #[test]
    fn as_str_round_trips_through_label_map() {
        for kind in EntityKind::all() {
            assert_eq!(normalize_entity_kind(kind.as_str()), Some(kind));
        }
    }
}
