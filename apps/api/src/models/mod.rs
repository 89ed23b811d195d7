pub mod application;
pub mod opportunity;
pub mod organization;
pub mod student;

pub use application::{Application, ApplicationStatus};
pub use opportunity::{NewOpportunity, Opportunity, Poster};
pub use organization::Organization;
pub use student::{NewStudent, Student};
