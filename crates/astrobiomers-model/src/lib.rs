//! Astrobiomers Model - shared data types for the ingestion pipeline
//!
//! Every stage crate exchanges data through the record types defined here:
//! papers, entity kinds, mentions, relations, topics, and the JSON artifact
//! envelopes persisted between stages (§3, §6).

pub mod artifact;
pub mod entity;
pub mod mention;
pub mod paper;
pub mod relation;
pub mod topic;

pub use artifact::{
    AlignedEntitiesArtifact, ExtractedEntitiesArtifact, ExtractedRelationshipsArtifact,
    PipelineResults, PipelineStatus, PreprocessedPapersArtifact, RawPapersArtifact,
    ResolvedEntitiesArtifact, StageReport, Totals, TopicsArtifact,
};
pub use entity::{normalize_entity_kind, Entity, EntityKind};
pub use mention::{Extractor, Mention, Span};
pub use paper::{synthetic_key, Paper, PreprocessedPaper, Sentence};
pub use relation::{allowed_kinds, is_allowed, Relation, RelationType};
pub use topic::{Topic, UNASSIGNED_TOPIC_ID};
