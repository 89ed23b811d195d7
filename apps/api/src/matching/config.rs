use serde::{Deserialize, Serialize};

/// Default blend: skill coverage dominates, academic margin breaks near-ties.
pub const DEFAULT_WEIGHTS: ScoreWeights = ScoreWeights {
    skill: 0.7,
    academic: 0.3,
};

/// CGPA margin (in grade points) above the floor at which the academic sub-score saturates.
pub const DEFAULT_MARGIN_THRESHOLD: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skill: f64,
    pub academic: f64,
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.skill + self.academic
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

/// Whether missing required skills can make an opportunity ineligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum EligibilityPolicy {
    /// CGPA floor is the only hard gate; skills only move the score.
    #[default]
    ScoreOnly,
    /// CGPA floor plus at most `tolerance` missing required skills.
    SkillGated { tolerance: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub weights: ScoreWeights,
    pub margin_threshold: f64,
    pub eligibility: EligibilityPolicy,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            margin_threshold: DEFAULT_MARGIN_THRESHOLD,
            eligibility: EligibilityPolicy::ScoreOnly,
        }
    }
}

impl MatchingConfig {
    pub fn skill_gated(tolerance: usize) -> Self {
        Self {
            eligibility: EligibilityPolicy::SkillGated { tolerance },
            ..Self::default()
        }
    }

    /// Rejects weight/threshold combinations that would push scores out of 0..=100.
    pub fn validate(&self) -> Result<(), String> {
        let ScoreWeights { skill, academic } = self.weights;
        if !(skill.is_finite() && academic.is_finite()) || skill < 0.0 || academic < 0.0 {
            return Err(format!(
                "score weights must be finite and non-negative (skill={skill}, academic={academic})"
            ));
        }
        if (self.weights.sum() - 1.0).abs() > 1e-6 {
            return Err(format!(
                "score weights must sum to 1.0, got {}",
                self.weights.sum()
            ));
        }
        if !self.margin_threshold.is_finite() || self.margin_threshold <= 0.0 {
            return Err(format!(
                "margin threshold must be a positive number, got {}",
                self.margin_threshold
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!((DEFAULT_WEIGHTS.sum() - 1.0).abs() < 1e-6);
        assert!(MatchingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_policy_is_score_only() {
        assert_eq!(
            MatchingConfig::default().eligibility,
            EligibilityPolicy::ScoreOnly
        );
    }

    #[test]
    fn test_unbalanced_weights_rejected() {
        let config = MatchingConfig {
            weights: ScoreWeights {
                skill: 0.8,
                academic: 0.3,
            },
            ..MatchingConfig::default()
        };
        assert!(config.validate().unwrap_err().contains("sum to 1.0"));
    }

    #[test]
    fn test_non_positive_threshold_rejected() {
        let config = MatchingConfig {
            margin_threshold: 0.0,
            ..MatchingConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
