//! Curated verb-lemma to relation-type mapping (§4.5 #1).

use astrobiomers_model::RelationType;

const MAP: &[(&str, RelationType)] = &[
    ("upregulate", RelationType::Upregulates),
    ("induc", RelationType::Upregulates),
    ("increas", RelationType::Upregulates),
    ("activat", RelationType::Upregulates),
    ("downregulate", RelationType::Downregulates),
    ("inhibit", RelationType::Downregulates),
    ("suppress", RelationType::Downregulates),
    ("decreas", RelationType::Downregulates),
    ("reduc", RelationType::Downregulates),
    ("caus", RelationType::Causes),
    ("trigger", RelationType::Causes),
    ("lead", RelationType::Causes),
    ("treat", RelationType::Treats),
    ("ameliorat", RelationType::Treats),
    ("allevia", RelationType::Treats),
    ("prevent", RelationType::Prevents),
    ("protect", RelationType::Prevents),
    ("bind", RelationType::InteractsWith),
    ("interact", RelationType::InteractsWith),
    ("associat", RelationType::AssociatedWith),
    ("correlat", RelationType::AssociatedWith),
];

/// Look up a verb lemma (already stemmed by the preprocess tokenizer) against
/// the curated table. Matching is by prefix since the stemmer leaves
/// irregular tails (e.g. "induc" from both "induce" and "induced").
pub fn relation_for_lemma(lemma: &str) -> Option<RelationType> {
    MAP.iter()
        .find(|(verb, _)| lemma.starts_with(verb))
        .map(|(_, relation)| *relation)
}
