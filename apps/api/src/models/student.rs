use serde::{Deserialize, Serialize};

use crate::matching::engine::{CGPA_RANGE, YEAR_RANGE};
use crate::matching::skills::normalize_skill;

pub type StudentId = i64;

/// Student profile as supplied by the student directory or a match request.
///
/// `year` and `cgpa` are kept wide on purpose so that out-of-range values
/// reach the matching engine's validation instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    #[serde(default)]
    pub name: String,
    pub branch: String,
    pub year: i32,
    pub cgpa: f64,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl Student {
    /// Adds `skill` unless the student already has it under any casing.
    /// Returns whether the list changed.
    pub fn upsert_skill(&mut self, skill: &str) -> bool {
        let key = normalize_skill(skill);
        if self.skills.iter().any(|s| normalize_skill(s) == key) {
            return false;
        }
        self.skills.push(skill.trim().to_string());
        true
    }
}

/// Body of `POST /api/v1/students`. Profiles start without skills.
#[derive(Debug, Clone, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub branch: String,
    pub year: i32,
    pub cgpa: f64,
}

impl NewStudent {
    pub fn validate(&self) -> Result<(), String> {
        if !YEAR_RANGE.contains(&self.year) {
            return Err(format!("year must be between 1 and 6, got {}", self.year));
        }
        if !CGPA_RANGE.contains(&self.cgpa) {
            return Err(format!("cgpa must be between 0 and 10, got {}", self.cgpa));
        }
        Ok(())
    }

    pub fn into_student(self, id: StudentId) -> Student {
        Student {
            id,
            name: self.name,
            branch: self.branch,
            year: self.year,
            cgpa: self.cgpa,
            skills: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(year: i32, cgpa: f64) -> NewStudent {
        NewStudent {
            name: "Asha".to_string(),
            branch: "CSE".to_string(),
            year,
            cgpa,
        }
    }

    #[test]
    fn test_new_student_range_ends() {
        assert!(profile(1, 0.0).validate().is_ok());
        assert!(profile(6, 10.0).validate().is_ok());
        assert!(profile(0, 8.0).validate().unwrap_err().starts_with("year"));
        assert!(profile(7, 8.0).validate().unwrap_err().starts_with("year"));
        assert!(profile(3, 10.5).validate().unwrap_err().starts_with("cgpa"));
        assert!(profile(3, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_upsert_skill_ignores_case() {
        let mut student = profile(2, 7.0).into_student(5);
        assert!(student.upsert_skill(" Docker "));
        assert!(!student.upsert_skill("docker"));
        assert_eq!(student.skills, vec!["Docker"]);
    }
}
