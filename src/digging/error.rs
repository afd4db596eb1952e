//! Engine errors.
//!
//! Malformed feature data is never an error (missing fields take defaults) and
//! an empty candidate list is a successful no-op expansion.

use thiserror::Error;

/// Errors returned by the digging engine.
#[derive(Debug, Error)]
pub enum DiggingError {
	/// `expand` was called with an id that is not in the graph.
	#[error("node not found: {0}")]
	NodeNotFound(String),

	/// A layout config field is out of range.
	#[error("invalid layout config: {0}")]
	InvalidConfig(String),

	/// Malformed JSON input.
	#[error("invalid JSON: {0}")]
	Json(#[from] serde_json::Error),
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, DiggingError>;
