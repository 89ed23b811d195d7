use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::opportunity::OpportunityId;
use super::student::StudentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub student_id: StudentId,
    pub opportunity_id: OpportunityId,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}
