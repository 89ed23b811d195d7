use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::{ApplicationStore, OpportunityCatalog, SkillUpsert, StudentDirectory};
use crate::errors::AppError;
use crate::models::opportunity::OpportunityId;
use crate::models::organization::OrganizationId;
use crate::models::student::StudentId;
use crate::models::{
    Application, ApplicationStatus, NewOpportunity, NewStudent, Opportunity, Organization, Poster,
    Student,
};

/// Contents of a `CATALOG_PATH` seed file.
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub opportunities: Vec<Opportunity>,
    #[serde(default)]
    pub applications: Vec<SeedApplication>,
    #[serde(default)]
    pub companies: Vec<Organization>,
    #[serde(default)]
    pub faculty: Vec<Organization>,
}

#[derive(Debug, Deserialize)]
pub struct SeedApplication {
    pub student_id: StudentId,
    pub opportunity_id: OpportunityId,
    #[serde(default = "default_status")]
    pub status: ApplicationStatus,
}

fn default_status() -> ApplicationStatus {
    ApplicationStatus::Applied
}

#[derive(Debug, Default)]
struct Inner {
    students: BTreeMap<StudentId, Student>,
    opportunities: BTreeMap<OpportunityId, Opportunity>,
    applications: Vec<Application>,
    next_application_id: i64,
    companies: BTreeMap<OrganizationId, String>,
    faculty: BTreeMap<OrganizationId, String>,
}

fn next_id<V>(map: &BTreeMap<i64, V>) -> i64 {
    map.keys().next_back().map_or(1, |last| last + 1)
}

impl Inner {
    fn has_applied(&self, student_id: StudentId, opportunity_id: OpportunityId) -> bool {
        self.applications
            .iter()
            .any(|a| a.student_id == student_id && a.opportunity_id == opportunity_id)
    }

    fn push_application(
        &mut self,
        student_id: StudentId,
        opportunity_id: OpportunityId,
        status: ApplicationStatus,
    ) -> Application {
        self.next_application_id += 1;
        let application = Application {
            id: self.next_application_id,
            student_id,
            opportunity_id,
            status,
            applied_at: Utc::now(),
        };
        self.applications.push(application.clone());
        application
    }
}

/// Process-lifetime directory backing all three collaborator traits.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    inner: RwLock<Inner>,
}

impl MemoryDirectory {
    pub fn new(seed: SeedData) -> Self {
        let mut inner = Inner::default();

        for student in seed.students {
            if let Some(previous) = inner.students.insert(student.id, student) {
                warn!(student_id = previous.id, "duplicate student id in seed, keeping the last one");
            }
        }
        for opportunity in seed.opportunities {
            if let Some(previous) = inner.opportunities.insert(opportunity.id, opportunity) {
                warn!(
                    opportunity_id = previous.id,
                    "duplicate opportunity id in seed, keeping the last one"
                );
            }
        }
        inner.companies = seed.companies.into_iter().map(|o| (o.id, o.name)).collect();
        inner.faculty = seed.faculty.into_iter().map(|o| (o.id, o.name)).collect();
        for application in seed.applications {
            if inner.has_applied(application.student_id, application.opportunity_id) {
                warn!(
                    student_id = application.student_id,
                    opportunity_id = application.opportunity_id,
                    "duplicate application in seed, ignoring"
                );
                continue;
            }
            inner.push_application(
                application.student_id,
                application.opportunity_id,
                application.status,
            );
        }

        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Reads a JSON seed file.
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("cannot read catalog seed '{}'", path.display()))?;
        let seed: SeedData = serde_json::from_str(&raw)
            .with_context(|| format!("catalog seed '{}' is not valid JSON", path.display()))?;

        info!(
            students = seed.students.len(),
            opportunities = seed.opportunities.len(),
            applications = seed.applications.len(),
            "Loaded catalog seed from {}",
            path.display()
        );
        Ok(Self::new(seed))
    }
}

#[async_trait]
impl OpportunityCatalog for MemoryDirectory {
    async fn list(&self, is_internal: Option<bool>) -> Result<Vec<Opportunity>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .opportunities
            .values()
            .filter(|o| is_internal.map_or(true, |internal| o.is_internal == internal))
            .cloned()
            .collect())
    }

    async fn find(&self, id: OpportunityId) -> Result<Option<Opportunity>, AppError> {
        Ok(self.inner.read().await.opportunities.get(&id).cloned())
    }

    async fn create(&self, poster: Poster, new: NewOpportunity) -> Result<Opportunity, AppError> {
        let mut inner = self.inner.write().await;
        let posted_by = match poster {
            Poster::Company(id) => inner.companies.get(&id),
            Poster::Faculty(id) => inner.faculty.get(&id),
        };
        let Some(posted_by) = posted_by.cloned() else {
            let what = match poster {
                Poster::Company(_) => "Company",
                Poster::Faculty(_) => "Faculty",
            };
            return Err(AppError::NotFound(format!("{what} not found")));
        };

        let opportunity = new.into_opportunity(next_id(&inner.opportunities));
        inner
            .opportunities
            .insert(opportunity.id, opportunity.clone());
        info!(
            opportunity_id = opportunity.id,
            posted_by = %posted_by,
            internal = opportunity.is_internal,
            "opportunity created"
        );
        Ok(opportunity)
    }
}

#[async_trait]
impl StudentDirectory for MemoryDirectory {
    async fn get(&self, id: StudentId) -> Result<Option<Student>, AppError> {
        Ok(self.inner.read().await.students.get(&id).cloned())
    }

    async fn create(&self, new: NewStudent) -> Result<Student, AppError> {
        let mut inner = self.inner.write().await;
        let student = new.into_student(next_id(&inner.students));
        inner.students.insert(student.id, student.clone());
        info!(student_id = student.id, "student profile created");
        Ok(student)
    }

    async fn add_skill(
        &self,
        id: StudentId,
        skill: &str,
    ) -> Result<Option<(Student, SkillUpsert)>, AppError> {
        let mut inner = self.inner.write().await;
        let Some(student) = inner.students.get_mut(&id) else {
            return Ok(None);
        };
        let upsert = if student.upsert_skill(skill) {
            SkillUpsert::Added
        } else {
            SkillUpsert::AlreadyPresent
        };
        Ok(Some((student.clone(), upsert)))
    }
}

#[async_trait]
impl ApplicationStore for MemoryDirectory {
    async fn applied_ids(&self, student_id: StudentId) -> Result<HashSet<OpportunityId>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .applications
            .iter()
            .filter(|a| a.student_id == student_id)
            .map(|a| a.opportunity_id)
            .collect())
    }

    async fn list_for(&self, student_id: StudentId) -> Result<Vec<Application>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .applications
            .iter()
            .filter(|a| a.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn apply(
        &self,
        student_id: StudentId,
        opportunity_id: OpportunityId,
    ) -> Result<Application, AppError> {
        let mut inner = self.inner.write().await;
        if inner.has_applied(student_id, opportunity_id) {
            return Err(AppError::Conflict("Already applied".to_string()));
        }
        Ok(inner.push_application(student_id, opportunity_id, ApplicationStatus::Applied))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SEED: &str = r#"{
        "students": [
            {"id": 1, "name": "Asha", "branch": "CSE", "year": 3, "cgpa": 8.2, "skills": ["Python", "SQL"]}
        ],
        "opportunities": [
            {"id": 20, "title": "Data pipeline", "type": "internship", "is_internal": false,
             "creator_name": "Acme", "required_skills": ["python", "airflow"], "min_cgpa": 7.0},
            {"id": 10, "title": "Lab assistant", "type": "project", "is_internal": true,
             "creator_name": "Dr. Rao", "required_skills": [], "min_cgpa": 0.0}
        ],
        "applications": [
            {"student_id": 1, "opportunity_id": 10}
        ],
        "companies": [{"id": 1, "name": "Acme"}],
        "faculty": [{"id": 7, "name": "Dr. Rao"}]
    }"#;

    fn seeded() -> MemoryDirectory {
        MemoryDirectory::new(serde_json::from_str(SEED).unwrap())
    }

    #[tokio::test]
    async fn test_list_is_ordered_and_filterable() {
        let directory = seeded();

        let all = directory.list(None).await.unwrap();
        assert_eq!(all.iter().map(|o| o.id).collect::<Vec<_>>(), vec![10, 20]);

        let internal = directory.list(Some(true)).await.unwrap();
        assert_eq!(internal.len(), 1);
        assert_eq!(internal[0].id, 10);

        let external = directory.list(Some(false)).await.unwrap();
        assert_eq!(external[0].id, 20);
    }

    #[tokio::test]
    async fn test_apply_twice_conflicts() {
        let directory = seeded();

        let application = directory.apply(1, 20).await.unwrap();
        assert_eq!(application.status, ApplicationStatus::Applied);
        assert_eq!(application.opportunity_id, 20);

        let err = directory.apply(1, 20).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let applied = directory.applied_ids(1).await.unwrap();
        assert_eq!(applied, [10, 20].into_iter().collect::<HashSet<_>>());
        assert_eq!(directory.list_for(1).await.unwrap().len(), 2);
    }

    fn posting(company_id: Option<i64>, faculty_id: Option<i64>) -> NewOpportunity {
        NewOpportunity {
            title: "Compiler intern".to_string(),
            creator_name: "Acme".to_string(),
            kind: crate::models::opportunity::OpportunityType::Internship,
            min_cgpa: 7.5,
            required_skills: vec!["Rust".to_string()],
            company_id,
            faculty_id,
            is_internal: false,
        }
    }

    #[tokio::test]
    async fn test_create_opportunity_takes_next_id() {
        let directory = seeded();

        let created = OpportunityCatalog::create(&directory, Poster::Company(1), posting(Some(1), None))
            .await
            .unwrap();
        assert_eq!(created.id, 21);
        assert_eq!(directory.find(21).await.unwrap(), Some(created));

        let by_faculty = OpportunityCatalog::create(&directory, Poster::Faculty(7), posting(None, Some(7)))
            .await
            .unwrap();
        assert_eq!(by_faculty.id, 22);
        assert_eq!(by_faculty.faculty_id, Some(7));
    }

    #[tokio::test]
    async fn test_create_opportunity_unknown_poster_is_not_found() {
        let directory = seeded();

        let err = OpportunityCatalog::create(&directory, Poster::Company(99), posting(Some(99), None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Company not found"));

        let err = OpportunityCatalog::create(&directory, Poster::Faculty(1), posting(None, Some(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Faculty not found"));
        assert_eq!(directory.list(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_student_and_add_skill() {
        let directory = MemoryDirectory::default();

        let student = StudentDirectory::create(
            &directory,
            NewStudent {
                name: "Kiran".to_string(),
                branch: "IT".to_string(),
                year: 1,
                cgpa: 7.2,
            },
        )
        .await
        .unwrap();
        assert_eq!(student.id, 1);
        assert!(student.skills.is_empty());

        let (student, upsert) = directory.add_skill(1, "Go").await.unwrap().unwrap();
        assert_eq!(upsert, SkillUpsert::Added);
        assert_eq!(student.skills, vec!["Go"]);

        let (student, upsert) = directory.add_skill(1, "GO").await.unwrap().unwrap();
        assert_eq!(upsert, SkillUpsert::AlreadyPresent);
        assert_eq!(student.skills, vec!["Go"]);

        assert!(directory.add_skill(2, "Go").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_seed_duplicates_are_collapsed() {
        let seed = SeedData {
            applications: vec![
                SeedApplication {
                    student_id: 1,
                    opportunity_id: 5,
                    status: ApplicationStatus::Shortlisted,
                },
                SeedApplication {
                    student_id: 1,
                    opportunity_id: 5,
                    status: ApplicationStatus::Rejected,
                },
            ],
            ..SeedData::default()
        };
        let directory = MemoryDirectory::new(seed);

        let applications = directory.list_for(1).await.unwrap();
        assert_eq!(applications.len(), 1);
        assert_eq!(applications[0].status, ApplicationStatus::Shortlisted);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SEED.as_bytes()).unwrap();

        let directory = MemoryDirectory::load(file.path()).await.unwrap();
        let student = directory.get(1).await.unwrap().unwrap();
        assert_eq!(student.branch, "CSE");
        assert!(directory.get(2).await.unwrap().is_none());
        assert!(directory.find(20).await.unwrap().is_some());
    }

    #[test]
    fn test_bundled_seed_parses() {
        let seed: SeedData = serde_json::from_str(include_str!("../../seed/catalog.json")).unwrap();
        assert!(!seed.students.is_empty());
        assert!(!seed.opportunities.is_empty());
        assert!(seed.opportunities.iter().all(|o| o.company_id.is_some() != o.faculty_id.is_some()));
    }

    #[tokio::test]
    async fn test_load_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = MemoryDirectory::load(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }
}
