//! Error taxonomy (spec §7).
//!
//! Each stage crate defines its own richer error enum for internal use;
//! these are the shapes the orchestrator and CLI reason about uniformly.

use thiserror::Error;

/// Source acquisition failed after exhausting retries. Aborts that source only.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("source {source_tag} unavailable after {attempts} attempts: {message}")]
    Unavailable {
        source_tag: String,
        attempts: u32,
        message: String,
    },
    #[error("rate limit configuration invalid: {0}")]
    InvalidRateLimit(String),
}

/// Malformed text; the paper is dropped from downstream stages.
#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("paper {paper_id} produced zero sentences")]
    NoSentences { paper_id: String },
    #[error("paper {paper_id} has no text to preprocess")]
    Empty { paper_id: String },
}

/// External service failure or ambiguous result during entity resolution.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("service {service} unavailable for ({kind}, {canonical_name}): {message}")]
    ServiceUnavailable {
        service: String,
        kind: String,
        canonical_name: String,
        message: String,
    },
    #[error("ambiguous result for ({kind}, {canonical_name})")]
    Ambiguous { kind: String, canonical_name: String },
}

/// External ontology service failure during alignment.
#[derive(Debug, Error)]
pub enum AlignmentError {
    #[error("ontology {ontology} unavailable for {canonical_name}: {message}")]
    ServiceUnavailable {
        ontology: String,
        canonical_name: String,
        message: String,
    },
}

/// Constraint violation, null key, or batch transaction failure in the loader.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("batch {batch_id} failed: {message}")]
    BatchFailed { batch_id: usize, message: String },
    #[error("refusing to write NULL as uniqueness-constrained property {property} on {label}")]
    NullUniqueKey { label: String, property: String },
    #[error("database {database} unreachable: {message}")]
    Unreachable { database: String, message: String },
}

/// Missing or invalid configuration; the pipeline refuses to start.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration key: {0}")]
    MissingKey(String),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("failed to read config file {path}: {message}")]
    Unreadable { path: String, message: String },
}

/// Unrecoverable error that halts the pipeline (e.g. database unreachable
/// when `--load-graph` was requested).
#[derive(Debug, Error)]
pub enum FatalError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database unreachable: {0}")]
    DatabaseUnreachable(String),
    #[error("stage {stage} produced zero outputs from {input_count} inputs")]
    EmptyStageOutput { stage: String, input_count: usize },
    #[error("another run holds {0}; refusing to start")]
    LockHeld(String),
    #[error("shutdown requested, aborting between stages")]
    ShutdownRequested,
}

/// Umbrella error a [`crate::artifacts`]-driven stage can return up to the
/// orchestrator, used where a stage needs one return type across its
/// internal error causes.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),
    #[error(transparent)]
    Preprocess(#[from] PreprocessError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Alignment(#[from] AlignmentError),
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    Fatal(#[from] FatalError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
