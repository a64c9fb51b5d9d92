use serde::{Deserialize, Serialize};
use thiserror::Error;

use stocktrack_core::DomainError;

use crate::reports::ReportKind;

/// Text produced by a report flow (markdown, vendor-worded).
///
/// This is an insight for display, never written back into item state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub kind: ReportKind,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The model answered, but not in the shape the caller asked for.
    #[error("invalid model output: {0}")]
    InvalidOutput(String),

    #[error("inference failed: {0}")]
    InferenceFailed(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
