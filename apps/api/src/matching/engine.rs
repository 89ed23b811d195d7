//! The matching engine: one student against a catalog of opportunities.
//!
//! Pure over its inputs. Every call validates the student, scores each
//! well-formed opportunity independently, then orders the result by
//! `fit_score` descending with ties broken by ascending opportunity id.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::matching::config::MatchingConfig;
use crate::matching::eligibility;
use crate::matching::error::{MatchError, SkippedRecord};
use crate::matching::scoring::{FitScorer, ScoringInput, WeightedFitScorer};
use crate::matching::skills::{missing_skills, SkillSet};
use crate::models::opportunity::{Opportunity, OpportunityId};
use crate::models::student::Student;

pub const CGPA_RANGE: std::ops::RangeInclusive<f64> = 0.0..=10.0;
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=6;

/// One opportunity as seen by one student. Recomputed on every call, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub opportunity_id: OpportunityId,
    pub fit_score: u8,
    pub eligible: bool,
    pub missing_skills: Vec<String>,
    pub reason: Option<String>,
    pub already_applied: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutcome {
    pub matches: Vec<MatchRecord>,
    pub skipped: Vec<SkippedRecord>,
}

#[derive(Clone)]
pub struct MatchingEngine {
    config: MatchingConfig,
    scorer: Arc<dyn FitScorer>,
}

impl MatchingEngine {
    pub fn new(config: MatchingConfig) -> Self {
        let scorer = Arc::new(WeightedFitScorer::new(&config));
        Self::with_scorer(config, scorer)
    }

    pub fn with_scorer(config: MatchingConfig, scorer: Arc<dyn FitScorer>) -> Self {
        Self { config, scorer }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    pub fn compute_matches(
        &self,
        student: &Student,
        opportunities: &[Opportunity],
        applied_ids: &HashSet<OpportunityId>,
    ) -> Result<MatchOutcome, MatchError> {
        let student_skills = validate_student(student)?;

        let mut outcome = MatchOutcome {
            matches: Vec::with_capacity(opportunities.len()),
            skipped: Vec::new(),
        };

        for opportunity in opportunities {
            let required = match validate_opportunity(opportunity) {
                Ok(required) => required,
                Err(reason) => {
                    warn!(
                        opportunity_id = opportunity.id,
                        %reason,
                        "skipping malformed opportunity"
                    );
                    outcome.skipped.push(SkippedRecord {
                        opportunity_id: Some(opportunity.id),
                        reason,
                    });
                    continue;
                }
            };

            outcome.matches.push(self.match_one(
                student,
                &student_skills,
                opportunity,
                &required,
                applied_ids.contains(&opportunity.id),
            ));
        }

        outcome.matches.sort_by(|a, b| {
            b.fit_score
                .cmp(&a.fit_score)
                .then_with(|| a.opportunity_id.cmp(&b.opportunity_id))
        });

        debug!(
            student_id = student.id,
            scored = outcome.matches.len(),
            skipped = outcome.skipped.len(),
            "computed matches"
        );
        Ok(outcome)
    }

    fn match_one(
        &self,
        student: &Student,
        student_skills: &SkillSet,
        opportunity: &Opportunity,
        required: &SkillSet,
        already_applied: bool,
    ) -> MatchRecord {
        let missing = missing_skills(required, student_skills);
        let breakdown = self.scorer.score(&ScoringInput {
            student_skills,
            student_cgpa: student.cgpa,
            required_skills: required,
            min_cgpa: opportunity.min_cgpa,
        });
        let verdict = eligibility::evaluate(
            student.cgpa,
            opportunity.min_cgpa,
            &missing,
            self.config.eligibility,
        );

        MatchRecord {
            opportunity_id: opportunity.id,
            fit_score: breakdown.fit_score.min(100),
            eligible: verdict.eligible,
            missing_skills: missing,
            reason: verdict.reason.map(|r| r.to_string()),
            already_applied,
        }
    }
}

fn validate_student(student: &Student) -> Result<SkillSet, MatchError> {
    if !CGPA_RANGE.contains(&student.cgpa) {
        return Err(MatchError::invalid(
            "cgpa",
            format!("must be between 0 and 10, got {}", student.cgpa),
        ));
    }
    if !YEAR_RANGE.contains(&student.year) {
        return Err(MatchError::invalid(
            "year",
            format!("must be between 1 and 6, got {}", student.year),
        ));
    }
    SkillSet::parse(&student.skills).map_err(|index| {
        MatchError::invalid(format!("skills[{index}]"), "must not be blank")
    })
}

fn validate_opportunity(opportunity: &Opportunity) -> Result<SkillSet, String> {
    if !CGPA_RANGE.contains(&opportunity.min_cgpa) {
        return Err(format!(
            "min_cgpa must be between 0 and 10, got {}",
            opportunity.min_cgpa
        ));
    }
    SkillSet::parse(&opportunity.required_skills)
        .map_err(|index| format!("required_skills[{index}] must not be blank"))
}
