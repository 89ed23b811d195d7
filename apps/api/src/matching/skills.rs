//! Case-insensitive skill handling shared by validation, scoring and gap reporting.

use std::collections::HashSet;

/// Canonical form used for comparisons: trimmed and lowercased.
pub fn normalize_skill(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// A deduplicated skill list.
///
/// Keeps the first declared spelling of each skill, in declaration order,
/// next to a normalized lookup set.
#[derive(Debug, Clone, Default)]
pub struct SkillSet {
    declared: Vec<String>,
    normalized: HashSet<String>,
}

impl SkillSet {
    /// Builds a set from raw entries. Returns the offending index if an entry is blank.
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> Result<Self, usize> {
        let mut set = SkillSet::default();
        for (index, skill) in raw.iter().enumerate() {
            let skill = skill.as_ref();
            let key = normalize_skill(skill);
            if key.is_empty() {
                return Err(index);
            }
            if set.normalized.insert(key) {
                set.declared.push(skill.trim().to_string());
            }
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.declared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.normalized.contains(&normalize_skill(skill))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.declared.iter().map(String::as_str)
    }
}

/// Number of `required` skills the student already has.
pub fn matched_count(required: &SkillSet, possessed: &SkillSet) -> usize {
    required.iter().filter(|s| possessed.contains(s)).count()
}

/// Required skills absent from `possessed`, in the requirement's declaration order.
pub fn missing_skills(required: &SkillSet, possessed: &SkillSet) -> Vec<String> {
    required
        .iter()
        .filter(|s| !possessed.contains(s))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dedupes_case_insensitively_keeping_first_spelling() {
        let set = SkillSet::parse(&["Python", " SQL ", "python", "sql", "Docker"]).unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["Python", "SQL", "Docker"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_parse_rejects_blank_entry() {
        assert_eq!(SkillSet::parse(&["rust", "  "]).unwrap_err(), 1);
    }

    #[test]
    fn test_missing_preserves_requirement_order() {
        let required = SkillSet::parse(&["Kubernetes", "Python", "Docker", "SQL"]).unwrap();
        let possessed = SkillSet::parse(&["sql", "python"]).unwrap();
        assert_eq!(
            missing_skills(&required, &possessed),
            vec!["Kubernetes".to_string(), "Docker".to_string()]
        );
        assert_eq!(matched_count(&required, &possessed), 2);
    }

    #[test]
    fn test_empty_requirements_have_nothing_missing() {
        let required = SkillSet::parse::<&str>(&[]).unwrap();
        let possessed = SkillSet::parse(&["go"]).unwrap();
        assert!(missing_skills(&required, &possessed).is_empty());
        assert!(required.is_empty());
    }
}
