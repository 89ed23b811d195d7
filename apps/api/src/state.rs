use std::sync::Arc;

use crate::config::Config;
use crate::directory::{ApplicationStore, OpportunityCatalog, StudentDirectory};
use crate::matching::MatchingEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub engine: MatchingEngine,
    pub catalog: Arc<dyn OpportunityCatalog>,
    pub students: Arc<dyn StudentDirectory>,
    pub applications: Arc<dyn ApplicationStore>,
}
