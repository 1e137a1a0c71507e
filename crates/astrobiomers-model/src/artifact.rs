//! JSON artifact envelopes persisted between stages (§6 "Persisted
//! artifacts") and the pipeline's structured report (§4.1 "Result").

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::mention::Mention;
use crate::paper::{Paper, PreprocessedPaper};
use crate::relation::Relation;
use crate::topic::Topic;

/// `raw_papers.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPapersArtifact {
    pub papers: Vec<Paper>,
}

/// `preprocessed_papers.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreprocessedPapersArtifact {
    pub papers: Vec<PreprocessedPaper>,
}

/// `extracted_entities.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedEntitiesArtifact {
    pub mentions: Vec<Mention>,
}

/// `extracted_relationships.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedRelationshipsArtifact {
    pub relations: Vec<Relation>,
}

/// `resolved_entities.json` — mentions annotated with external ids (§4.7).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolvedEntitiesArtifact {
    pub mentions: Vec<Mention>,
}

/// `aligned_entities.json` — mentions annotated with ontology terms (§4.8).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlignedEntitiesArtifact {
    pub mentions: Vec<Mention>,
}

/// `topics.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicsArtifact {
    pub topics: Vec<Topic>,
    /// paper_id -> topic_id, `-1` when unassigned (§4.6).
    pub assignments: HashMap<String, i64>,
}

/// One row of the per-stage timing/count report (§4.1 "Result").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: String,
    pub duration_ms: u64,
    pub input_count: usize,
    pub output_count: usize,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStatus {
    Complete,
    Failed,
}

/// Aggregate counts across the whole run, reported alongside per-stage rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Totals {
    pub papers: usize,
    pub entities_by_kind: HashMap<String, usize>,
    pub relations_by_type: HashMap<String, usize>,
    pub topics: usize,
}

/// `pipeline_results.json` — the machine-readable report every run produces
/// (§6, §7 "User-visible behavior").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResults {
    pub status: PipelineStatus,
    pub stages: Vec<StageReport>,
    pub totals: Totals,
}
