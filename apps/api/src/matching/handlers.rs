//! Axum route handlers for the Matching API.

use std::collections::HashSet;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::directory::handlers::require_student;
use crate::errors::AppError;
use crate::matching::error::SkippedRecord;
use crate::matching::MatchRecord;
use crate::models::opportunity::OpportunityId;
use crate::models::student::StudentId;
use crate::models::{Opportunity, Student};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub student: Student,
    /// Decoded one by one so a single ill-typed record cannot reject the whole body.
    #[serde(default)]
    pub opportunities: Vec<Value>,
    #[serde(default, alias = "appliedIds")]
    pub applied_ids: HashSet<OpportunityId>,
}

/// POST /api/v1/matches
///
/// Stateless: scores the supplied student against the supplied opportunities.
pub async fn handle_compute_matches(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<Vec<MatchRecord>>, AppError> {
    let (opportunities, undecodable) = decode_opportunities(req.opportunities);
    let outcome = state
        .engine
        .compute_matches(&req.student, &opportunities, &req.applied_ids)?;

    if !undecodable.is_empty() || !outcome.skipped.is_empty() {
        warn!(
            student_id = req.student.id,
            undecodable = undecodable.len(),
            invalid = outcome.skipped.len(),
            "some opportunities were left out of the match result"
        );
    }
    Ok(Json(outcome.matches))
}

fn decode_opportunities(raw: Vec<Value>) -> (Vec<Opportunity>, Vec<SkippedRecord>) {
    let mut decoded = Vec::with_capacity(raw.len());
    let mut skipped = Vec::new();

    for (index, value) in raw.into_iter().enumerate() {
        let opportunity_id = value.get("id").and_then(Value::as_i64);
        match serde_json::from_value::<Opportunity>(value) {
            Ok(opportunity) => decoded.push(opportunity),
            Err(e) => {
                warn!(
                    index,
                    opportunity_id,
                    error = %e,
                    "skipping opportunity that does not decode"
                );
                skipped.push(SkippedRecord {
                    opportunity_id,
                    reason: format!("opportunities[{index}]: {e}"),
                });
            }
        }
    }
    (decoded, skipped)
}

/// GET /api/v1/matches/:student_id
///
/// Recomputes matches for a stored student against the full catalog. Clients call
/// this again after applying; there is no cached result to invalidate.
pub async fn handle_student_matches(
    State(state): State<AppState>,
    Path(student_id): Path<StudentId>,
) -> Result<Json<Vec<MatchRecord>>, AppError> {
    let student = require_student(&state, student_id).await?;
    let opportunities = state.catalog.list(None).await?;
    let applied = state.applications.applied_ids(student.id).await?;

    let outcome = state
        .engine
        .compute_matches(&student, &opportunities, &applied)?;
    Ok(Json(outcome.matches))
}
