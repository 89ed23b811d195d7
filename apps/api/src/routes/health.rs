use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version, the active eligibility policy
/// and the seed the directory was loaded from.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "matchboard-api",
        "eligibility_policy": state.engine.config().eligibility,
        "catalog": state.config.catalog_path.as_ref().map(|p| p.display().to_string()),
    }))
}
