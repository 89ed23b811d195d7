// Matching Engine: decides, per opportunity, how well a student fits, whether they
// may apply, and why not. Everything except `handlers` is pure and synchronous.

pub mod config;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod scoring;
pub mod skills;

pub use config::{EligibilityPolicy, MatchingConfig, ScoreWeights};
pub use engine::{MatchRecord, MatchingEngine};
pub use error::MatchError;
