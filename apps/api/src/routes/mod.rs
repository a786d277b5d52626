pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::portfolio::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/portfolio", get(handlers::handle_get_portfolio))
        .route("/api/v1/profile", get(handlers::handle_get_profile))
        .route("/api/v1/skills", get(handlers::handle_get_skills))
        .route("/api/v1/projects", get(handlers::handle_get_projects))
        .route("/api/v1/experience", get(handlers::handle_get_experience))
        .route("/api/v1/theme", get(handlers::handle_get_theme))
        .route("/api/v1/contact", post(handlers::handle_submit_contact))
        .with_state(state)
}
