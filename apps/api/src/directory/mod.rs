//! Collaborators the matching endpoints consume: the opportunity catalog, the student
//! directory and the application store.
//!
//! Each sits behind an async trait; `AppState` carries them as `Arc<dyn ...>`.
//! `MemoryDirectory` implements all three.

pub mod handlers;
pub mod memory;

use std::collections::HashSet;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::opportunity::OpportunityId;
use crate::models::student::StudentId;
use crate::models::{Application, NewOpportunity, NewStudent, Opportunity, Poster, Student};

pub use memory::{MemoryDirectory, SeedData};

#[async_trait]
pub trait OpportunityCatalog: Send + Sync {
    /// All opportunities ordered by id, optionally only internal or only external ones.
    async fn list(&self, is_internal: Option<bool>) -> Result<Vec<Opportunity>, AppError>;

    async fn find(&self, id: OpportunityId) -> Result<Option<Opportunity>, AppError>;

    /// Stores an already validated opportunity under a fresh id.
    /// Fails with `NotFound` if the poster is unknown.
    async fn create(&self, poster: Poster, new: NewOpportunity) -> Result<Opportunity, AppError>;
}

/// Result of adding a skill to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillUpsert {
    Added,
    AlreadyPresent,
}

#[async_trait]
pub trait StudentDirectory: Send + Sync {
    async fn get(&self, id: StudentId) -> Result<Option<Student>, AppError>;

    async fn create(&self, new: NewStudent) -> Result<Student, AppError>;

    /// Case-insensitive upsert. `Ok(None)` if the student does not exist.
    async fn add_skill(
        &self,
        id: StudentId,
        skill: &str,
    ) -> Result<Option<(Student, SkillUpsert)>, AppError>;
}

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn applied_ids(&self, student_id: StudentId) -> Result<HashSet<OpportunityId>, AppError>;

    async fn list_for(&self, student_id: StudentId) -> Result<Vec<Application>, AppError>;

    /// Records a new application. Fails with `Conflict` if the pair already exists.
    async fn apply(
        &self,
        student_id: StudentId,
        opportunity_id: OpportunityId,
    ) -> Result<Application, AppError>;
}
