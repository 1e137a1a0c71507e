//! Astrobiomers Core - common infrastructure for the ingestion pipeline
//!
//! Provides the pieces every stage crate needs: the shared error taxonomy,
//! atomic artifact I/O, stage freshness checks, retry/backoff, a cooperative
//! shutdown flag, numeric normalization before JSON serialization, and
//! logging/progress helpers.

pub mod artifacts;
pub mod error;
pub mod lockfile;
pub mod logging;
pub mod normalize;
pub mod progress;
pub mod ratelimit;
pub mod retry;
pub mod shutdown;

pub use artifacts::{atomic_write_json, is_stale, read_json, ArtifactError};
pub use error::{AcquisitionError, AlignmentError, ConfigError, FatalError, LoaderError, PreprocessError, ResolutionError, StageError};
pub use lockfile::{Lockfile, LockfileError};
pub use logging::{init_logging, IndicatifLogger};
pub use normalize::normalize_json;
pub use progress::{fmt_num, ProgressContext, SharedProgress};
pub use ratelimit::RateLimiter;
pub use retry::{backoff_duration, retry_with_backoff, RetryPolicy};
pub use shutdown::{is_shutdown_requested, request_shutdown, shutdown_flag};
