use std::fmt;

use crate::matching::config::EligibilityPolicy;

/// Why a student may not apply. Only the highest-priority cause is ever reported.
#[derive(Debug, Clone, PartialEq)]
pub enum IneligibilityReason {
    CgpaShortfall { required: f64, actual: f64 },
    MissingSkills(Vec<String>),
    NotEligible,
}

impl fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IneligibilityReason::CgpaShortfall { required, actual } => write!(
                f,
                "CGPA requirement not met (required: {required}, student: {actual})"
            ),
            IneligibilityReason::MissingSkills(skills) => {
                write!(f, "Missing required skills: {}", skills.join(", "))
            }
            IneligibilityReason::NotEligible => write!(f, "Not eligible"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub eligible: bool,
    pub reason: Option<IneligibilityReason>,
}

/// Hard gate: CGPA floor, plus the skill condition when the policy is skill-gated.
pub fn evaluate(
    cgpa: f64,
    min_cgpa: f64,
    missing: &[String],
    policy: EligibilityPolicy,
) -> Verdict {
    let cgpa_met = cgpa >= min_cgpa;
    let skills_met = match policy {
        EligibilityPolicy::ScoreOnly => true,
        EligibilityPolicy::SkillGated { tolerance } => missing.len() <= tolerance,
    };

    if cgpa_met && skills_met {
        return Verdict {
            eligible: true,
            reason: None,
        };
    }

    // One reason only: CGPA shortfall, then missing skills, then the fallback.
    let reason = if !cgpa_met {
        IneligibilityReason::CgpaShortfall {
            required: min_cgpa,
            actual: cgpa,
        }
    } else if !missing.is_empty() {
        IneligibilityReason::MissingSkills(missing.to_vec())
    } else {
        IneligibilityReason::NotEligible
    };

    Verdict {
        eligible: false,
        reason: Some(reason),
    }
}
