//! Axum route handlers for the catalog, student and application endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::SkillUpsert;
use crate::errors::AppError;
use crate::models::opportunity::OpportunityId;
use crate::models::student::StudentId;
use crate::models::{Application, NewOpportunity, NewStudent, Opportunity, Student};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub is_internal: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub student_id: StudentId,
    pub opportunity_id: OpportunityId,
}

#[derive(Debug, Deserialize)]
pub struct AddSkillRequest {
    pub skill_name: String,
}

#[derive(Debug, Serialize)]
pub struct AddSkillResponse {
    pub message: &'static str,
    pub student: Student,
}

/// Loads a student or fails with 404. Shared with the matching handlers.
pub async fn require_student(state: &AppState, id: StudentId) -> Result<Student, AppError> {
    state
        .students
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {id} not found")))
}

/// GET /api/v1/opportunities
pub async fn handle_list_opportunities(
    State(state): State<AppState>,
    Query(params): Query<CatalogQuery>,
) -> Result<Json<Vec<Opportunity>>, AppError> {
    Ok(Json(state.catalog.list(params.is_internal).await?))
}

/// POST /api/v1/opportunities
pub async fn handle_create_opportunity(
    State(state): State<AppState>,
    Json(mut req): Json<NewOpportunity>,
) -> Result<Json<Opportunity>, AppError> {
    let poster = req.validate().map_err(AppError::Validation)?;
    Ok(Json(state.catalog.create(poster, req).await?))
}

/// POST /api/v1/students
pub async fn handle_create_student(
    State(state): State<AppState>,
    Json(req): Json<NewStudent>,
) -> Result<Json<Student>, AppError> {
    req.validate().map_err(AppError::Validation)?;
    Ok(Json(state.students.create(req).await?))
}

/// POST /api/v1/students/:id/skills
///
/// Adding a skill the student already has (in any casing) is not an error.
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
    Json(req): Json<AddSkillRequest>,
) -> Result<Json<AddSkillResponse>, AppError> {
    if req.skill_name.trim().is_empty() {
        return Err(AppError::Validation("skill_name must not be blank".to_string()));
    }

    let (student, upsert) = state
        .students
        .add_skill(id, &req.skill_name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {id} not found")))?;

    let message = match upsert {
        SkillUpsert::Added => "Skill added",
        SkillUpsert::AlreadyPresent => "Skill already present",
    };
    info!(
        student_id = id,
        skill = %req.skill_name.trim(),
        outcome = message,
        "student skill upserted"
    );
    Ok(Json(AddSkillResponse { message, student }))
}

/// GET /api/v1/students/:id
pub async fn handle_get_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> Result<Json<Student>, AppError> {
    Ok(Json(require_student(&state, id).await?))
}

/// POST /api/v1/applications
///
/// Does not re-check eligibility; clients gate the action on the match record.
pub async fn handle_apply(
    State(state): State<AppState>,
    Json(req): Json<ApplyRequest>,
) -> Result<Json<Application>, AppError> {
    let student = state.students.get(req.student_id).await?;
    let opportunity = state.catalog.find(req.opportunity_id).await?;
    let (Some(student), Some(opportunity)) = (student, opportunity) else {
        return Err(AppError::NotFound(
            "Student or Opportunity not found".to_string(),
        ));
    };

    let application = state.applications.apply(student.id, opportunity.id).await?;
    info!(
        student_id = student.id,
        opportunity_id = opportunity.id,
        application_id = application.id,
        "application recorded"
    );
    Ok(Json(application))
}

/// GET /api/v1/applications/student/:id
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> Result<Json<Vec<Application>>, AppError> {
    let student = require_student(&state, id).await?;
    Ok(Json(state.applications.list_for(student.id).await?))
}
