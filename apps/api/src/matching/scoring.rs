//! Fit scoring — pluggable, trait-based scorer producing the 0–100 fit score.
//!
//! Default: `WeightedFitScorer`, a fixed blend of skill coverage and academic margin.
//! The engine holds an `Arc<dyn FitScorer>`, so the blend can be replaced without
//! touching eligibility, ordering or the handlers.

use serde::Serialize;

use crate::matching::config::{MatchingConfig, ScoreWeights};
use crate::matching::skills::{matched_count, SkillSet};

/// Sub-scores behind a single fit score, each on a 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitBreakdown {
    pub skill_coverage: f64,
    pub academic_margin: f64,
    pub fit_score: u8,
}

/// Inputs a scorer sees for one student/opportunity pair, already validated.
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub student_skills: &'a SkillSet,
    pub student_cgpa: f64,
    pub required_skills: &'a SkillSet,
    pub min_cgpa: f64,
}

pub trait FitScorer: Send + Sync {
    fn score(&self, input: &ScoringInput<'_>) -> FitBreakdown;
}

#[derive(Debug, Clone)]
pub struct WeightedFitScorer {
    weights: ScoreWeights,
    margin_threshold: f64,
}

impl WeightedFitScorer {
    pub fn new(config: &MatchingConfig) -> Self {
        Self {
            weights: config.weights,
            margin_threshold: config.margin_threshold,
        }
    }
}

impl Default for WeightedFitScorer {
    fn default() -> Self {
        Self::new(&MatchingConfig::default())
    }
}

impl FitScorer for WeightedFitScorer {
    fn score(&self, input: &ScoringInput<'_>) -> FitBreakdown {
        let skill_coverage = skill_coverage(input.required_skills, input.student_skills);
        let academic_margin =
            academic_margin(input.student_cgpa, input.min_cgpa, self.margin_threshold);
        FitBreakdown {
            skill_coverage,
            academic_margin,
            fit_score: blend(skill_coverage, academic_margin, &self.weights),
        }
    }
}

/// Percentage of required skills the student holds; 100 when nothing is required.
pub fn skill_coverage(required: &SkillSet, possessed: &SkillSet) -> f64 {
    if required.is_empty() {
        return 100.0;
    }
    (matched_count(required, possessed) as f64 / required.len() as f64) * 100.0
}

/// Saturating CGPA margin: 0 below the floor, 100 at `threshold` points above it.
pub fn academic_margin(cgpa: f64, min_cgpa: f64, threshold: f64) -> f64 {
    let margin = cgpa - min_cgpa;
    if margin < 0.0 {
        return 0.0;
    }
    if margin >= threshold {
        return 100.0;
    }
    (margin / threshold * 100.0).clamp(0.0, 100.0)
}

pub fn blend(skill_coverage: f64, academic_margin: f64, weights: &ScoreWeights) -> u8 {
    let raw = weights.skill * skill_coverage + weights.academic * academic_margin;
    raw.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(raw: &[&str]) -> SkillSet {
        SkillSet::parse(raw).unwrap()
    }

    fn score(student: &[&str], cgpa: f64, required: &[&str], min_cgpa: f64) -> FitBreakdown {
        let student_skills = skills(student);
        let required_skills = skills(required);
        WeightedFitScorer::default().score(&ScoringInput {
            student_skills: &student_skills,
            student_cgpa: cgpa,
            required_skills: &required_skills,
            min_cgpa,
        })
    }

    #[test]
    fn test_empty_requirements_give_full_coverage() {
        let breakdown = score(&[], 6.0, &[], 0.0);
        assert_eq!(breakdown.skill_coverage, 100.0);
        assert_eq!(breakdown.fit_score, 100);
    }

    #[test]
    fn test_margin_interpolates_below_threshold() {
        assert_eq!(academic_margin(8.0, 7.0, 2.0), 50.0);
        assert_eq!(academic_margin(9.0, 7.0, 2.0), 100.0);
        assert_eq!(academic_margin(9.9, 7.0, 2.0), 100.0);
        assert_eq!(academic_margin(6.9, 7.0, 2.0), 0.0);
        assert_eq!(academic_margin(7.0, 7.0, 2.0), 0.0);
    }

    #[test]
    fn test_two_of_three_skills_with_one_point_margin() {
        // 0.7 * 66.67 + 0.3 * 50 = 61.67
        let breakdown = score(&["python", "sql"], 8.0, &["python", "sql", "docker"], 7.0);
        assert!((breakdown.skill_coverage - 66.666).abs() < 0.01);
        assert_eq!(breakdown.academic_margin, 50.0);
        assert_eq!(breakdown.fit_score, 62);
    }

    #[test]
    fn test_no_overlap_below_floor_scores_zero() {
        let breakdown = score(&["go"], 5.0, &["java"], 8.0);
        assert_eq!(breakdown.fit_score, 0);
    }

    #[test]
    fn test_custom_weights_change_blend_only() {
        let weights = ScoreWeights {
            skill: 0.5,
            academic: 0.5,
        };
        assert_eq!(blend(100.0, 0.0, &weights), 50);
        assert_eq!(blend(100.0, 100.0, &weights), 100);
    }

    #[test]
    fn test_more_skill_overlap_never_lowers_score() {
        let required = ["rust", "sql", "docker", "aws"];
        let owned = ["rust", "sql", "docker", "aws"];
        let mut previous = 0;
        for n in 0..=owned.len() {
            let breakdown = score(&owned[..n], 8.6, &required, 7.0);
            assert!(
                breakdown.fit_score >= previous,
                "score dropped from {previous} to {} at {n} skills",
                breakdown.fit_score
            );
            previous = breakdown.fit_score;
        }
        assert_eq!(previous, 94);
    }
}
