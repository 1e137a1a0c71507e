//! Typed relations between entities and their (subject_kind, object_kind)
//! allow-table (§3, §4.5).

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationType {
    Upregulates,
    Downregulates,
    Causes,
    Treats,
    Prevents,
    InteractsWith,
    PartOf,
    AssociatedWith,
}

impl RelationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upregulates => "UPREGULATES",
            Self::Downregulates => "DOWNREGULATES",
            Self::Causes => "CAUSES",
            Self::Treats => "TREATS",
            Self::Prevents => "PREVENTS",
            Self::InteractsWith => "INTERACTS_WITH",
            Self::PartOf => "PART_OF",
            Self::AssociatedWith => "ASSOCIATED_WITH",
        }
    }

    pub fn all() -> [RelationType; 8] {
        [
            Self::Upregulates,
            Self::Downregulates,
            Self::Causes,
            Self::Treats,
            Self::Prevents,
            Self::InteractsWith,
            Self::PartOf,
            Self::AssociatedWith,
        ]
    }
}

/// Allowed (subject_kind, object_kind) pairs per relation type (§4.5 "Type
/// constraints"). A candidate whose pair isn't listed here is discarded.
///
/// `AssociatedWith` is intentionally permissive — it's the catch-all used by
/// the co-occurrence fallback (§4.5) — every kind pair is allowed.
pub fn allowed_kinds(relation: RelationType) -> &'static [(EntityKind, EntityKind)] {
    use EntityKind::*;
    match relation {
        RelationType::Upregulates | RelationType::Downregulates => {
            &[(Gene, Gene), (Protein, Protein), (Gene, Protein), (Stressor, Gene), (Stressor, Protein)]
        }
        RelationType::Causes => &[
            (Stressor, Phenotype),
            (Stressor, Disease),
            (Gene, Disease),
            (Chemical, Disease),
            (Intervention, Phenotype),
        ],
        RelationType::Treats | RelationType::Prevents => &[
            (Chemical, Disease),
            (Intervention, Disease),
            (Chemical, Phenotype),
            (Intervention, Phenotype),
        ],
        RelationType::InteractsWith => &[
            (Gene, Gene),
            (Protein, Protein),
            (Gene, Protein),
            (Chemical, Protein),
        ],
        RelationType::PartOf => &[(CellType, Organism), (Gene, Organism), (Protein, CellType)],
        RelationType::AssociatedWith => ASSOCIATED_WITH_ALL,
    }
}

const ASSOCIATED_WITH_ALL: &[(EntityKind, EntityKind)] = {
    use EntityKind::*;
    &[
        (Gene, Gene), (Gene, Protein), (Gene, Disease), (Gene, Phenotype),
        (Gene, Stressor), (Gene, Organism), (Gene, CellType), (Gene, Chemical), (Gene, Intervention),
        (Protein, Protein), (Protein, Disease), (Protein, Phenotype),
        (Protein, Stressor), (Protein, Organism), (Protein, CellType), (Protein, Chemical), (Protein, Intervention),
        (Disease, Disease), (Disease, Phenotype), (Disease, Stressor), (Disease, Organism),
        (Disease, CellType), (Disease, Chemical), (Disease, Intervention),
        (Phenotype, Phenotype), (Phenotype, Stressor), (Phenotype, Organism),
        (Phenotype, CellType), (Phenotype, Chemical), (Phenotype, Intervention),
        (Stressor, Stressor), (Stressor, Organism), (Stressor, CellType), (Stressor, Chemical), (Stressor, Intervention),
        (Organism, Organism), (Organism, CellType), (Organism, Chemical), (Organism, Intervention),
        (CellType, CellType), (CellType, Chemical), (CellType, Intervention),
        (Chemical, Chemical), (Chemical, Intervention),
        (Intervention, Intervention),
    ]
};

/// Whether `(subject, object)` is permitted for `relation` (checked either
/// direction isn't implied — order matters, per §4.5 "Directed").
pub fn is_allowed(relation: RelationType, subject: EntityKind, object: EntityKind) -> bool {
    allowed_kinds(relation)
        .iter()
        .any(|&(s, o)| s == subject && o == object)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    pub paper_id: String,
    pub relation_type: RelationType,
    pub subject_canonical_name: String,
    pub subject_kind: EntityKind,
    pub object_canonical_name: String,
    pub object_kind: EntityKind,
    pub confidence: f64,
    pub evidence_sentences: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;

    #[test]
    fn upregulates_allows_stressor_gene() {
        assert!(is_allowed(RelationType::Upregulates, EntityKind::Stressor, EntityKind::Gene));
    }

    #[test]
    fn upregulates_disallows_disease_gene() {
        assert!(!is_allowed(RelationType::Upregulates, EntityKind::Disease, EntityKind::Gene));
    }

    #[test]
    fn causes_allows_stressor_phenotype() {
        assert!(is_allowed(RelationType::Causes, EntityKind::Stressor, EntityKind::Phenotype));
    }

    #[test]
    fn associated_with_is_symmetric_over_all_kind_pairs_we_list() {
        for &(a, b) in allowed_kinds(RelationType::AssociatedWith) {
            assert!(is_allowed(RelationType::AssociatedWith, a, b));
        }
    }

    #[test]
    fn relation_type_round_trips_as_str() {
        for rt in RelationType::all() {
            assert!(!rt.as_str().is_empty());
        }
    }
}
