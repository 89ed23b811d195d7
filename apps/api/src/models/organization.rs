use serde::{Deserialize, Serialize};

pub type OrganizationId = i64;

/// A company or faculty member allowed to post opportunities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    #[serde(default)]
    pub name: String,
}
