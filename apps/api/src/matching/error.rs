use serde::Serialize;
use thiserror::Error;

use crate::models::opportunity::OpportunityId;

/// Fatal engine failure: there is no meaningful partial result for a malformed student.
#[derive(Debug, Error, PartialEq)]
pub enum MatchError {
    #[error("Invalid input: {field} {message}")]
    InvalidInput { field: String, message: String },
}

impl MatchError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        MatchError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Non-fatal diagnostic for one opportunity left out of the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRecord {
    /// `None` when the record did not carry a readable id.
    pub opportunity_id: Option<OpportunityId>,
    pub reason: String,
}
