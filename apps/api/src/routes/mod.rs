pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::directory::handlers as directory;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/matches", post(matching::handle_compute_matches))
        .route(
            "/api/v1/matches/:student_id",
            get(matching::handle_student_matches),
        )
        // Directory API
        .route(
            "/api/v1/opportunities",
            get(directory::handle_list_opportunities).post(directory::handle_create_opportunity),
        )
        .route("/api/v1/students", post(directory::handle_create_student))
        .route("/api/v1/students/:id", get(directory::handle_get_student))
        .route(
            "/api/v1/students/:id/skills",
            post(directory::handle_add_skill),
        )
        .route("/api/v1/applications", post(directory::handle_apply))
        .route(
            "/api/v1/applications/student/:id",
            get(directory::handle_list_applications),
        )
        .with_state(state)
}
