use serde::{Deserialize, Serialize};

use crate::matching::engine::CGPA_RANGE;
use crate::matching::skills::SkillSet;
use crate::models::organization::OrganizationId;

pub type OpportunityId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityType {
    Internship,
    Project,
}

/// An internship or project posted by a company (external) or by faculty (internal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: OpportunityId,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub kind: OpportunityType,
    #[serde(default)]
    pub is_internal: bool,
    #[serde(default)]
    pub creator_name: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    /// 0.0 means no CGPA floor.
    #[serde(default)]
    pub min_cgpa: f64,
    #[serde(default)]
    pub company_id: Option<OrganizationId>,
    #[serde(default)]
    pub faculty_id: Option<OrganizationId>,
}

/// Who posts an opportunity. Exactly one of the two ids is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poster {
    Company(OrganizationId),
    Faculty(OrganizationId),
}

/// Body of `POST /api/v1/opportunities`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewOpportunity {
    pub title: String,
    pub creator_name: String,
    #[serde(rename = "type")]
    pub kind: OpportunityType,
    #[serde(default)]
    pub min_cgpa: f64,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub company_id: Option<OrganizationId>,
    pub faculty_id: Option<OrganizationId>,
    #[serde(default)]
    pub is_internal: bool,
}

impl NewOpportunity {
    /// Checks everything that does not need the directory and returns the poster.
    /// Duplicate skills are collapsed in place.
    pub fn validate(&mut self) -> Result<Poster, String> {
        let poster = match (self.company_id, self.faculty_id) {
            (Some(_), Some(_)) => return Err("Cannot specify both company_id and faculty_id".into()),
            (None, None) => return Err("Must specify either company_id or faculty_id".into()),
            (Some(id), None) => Poster::Company(id),
            (None, Some(id)) => Poster::Faculty(id),
        };
        if matches!(poster, Poster::Company(_)) && self.is_internal {
            return Err("Companies cannot create internal opportunities".into());
        }
        if !CGPA_RANGE.contains(&self.min_cgpa) {
            return Err("min_cgpa must be between 0 and 10".into());
        }
        let skills = SkillSet::parse(&self.required_skills)
            .map_err(|index| format!("required_skills[{index}] must not be blank"))?;
        self.required_skills = skills.iter().map(str::to_string).collect();
        Ok(poster)
    }

    pub fn into_opportunity(self, id: OpportunityId) -> Opportunity {
        Opportunity {
            id,
            title: self.title,
            kind: self.kind,
            is_internal: self.is_internal,
            creator_name: self.creator_name,
            required_skills: self.required_skills,
            min_cgpa: self.min_cgpa,
            company_id: self.company_id,
            faculty_id: self.faculty_id,
        }
    }
}
