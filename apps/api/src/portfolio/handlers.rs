use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::errors::AppError;
use crate::portfolio::contact::{ContactReceipt, ContactSubmission};
use crate::portfolio::profile::ProfileView;
use crate::portfolio::service::{
    self, ExperienceSection, PortfolioPage, ProjectsSection, SkillQuery, SkillsSection,
};
use crate::portfolio::theme::Theme;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SkillParams {
    pub categories: Option<String>,
    pub sort: Option<String>,
}

impl SkillParams {
    fn query(&self) -> Result<SkillQuery, AppError> {
        Ok(SkillQuery::parse(
            self.categories.as_deref(),
            self.sort.as_deref(),
        )?)
    }
}

fn current_year() -> i64 {
    i64::from(Utc::now().year())
}

/// GET /api/v1/portfolio
pub async fn handle_get_portfolio(
    State(state): State<AppState>,
    Query(params): Query<SkillParams>,
) -> Result<Json<PortfolioPage>, AppError> {
    let query = params.query()?;
    let page =
        service::load_portfolio(state.store.as_ref(), &query, current_year(), &state.theme).await?;
    Ok(Json(page))
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
) -> Result<Json<ProfileView>, AppError> {
    Ok(Json(service::load_profile(state.store.as_ref()).await?))
}

/// GET /api/v1/skills
pub async fn handle_get_skills(
    State(state): State<AppState>,
    Query(params): Query<SkillParams>,
) -> Result<Json<SkillsSection>, AppError> {
    let query = params.query()?;
    let section = service::load_skills(state.store.as_ref(), &query, current_year()).await?;
    Ok(Json(section))
}

/// GET /api/v1/projects
pub async fn handle_get_projects(
    State(state): State<AppState>,
) -> Result<Json<ProjectsSection>, AppError> {
    Ok(Json(service::load_projects(state.store.as_ref()).await?))
}

/// GET /api/v1/experience
pub async fn handle_get_experience(
    State(state): State<AppState>,
) -> Result<Json<ExperienceSection>, AppError> {
    Ok(Json(service::load_experience(state.store.as_ref()).await?))
}

/// GET /api/v1/theme
pub async fn handle_get_theme(State(state): State<AppState>) -> Json<Theme> {
    Json(state.theme.clone())
}

/// POST /api/v1/contact
pub async fn handle_submit_contact(
    State(state): State<AppState>,
    Json(submission): Json<ContactSubmission>,
) -> Result<(StatusCode, Json<ContactReceipt>), AppError> {
    let receipt = service::submit_contact(state.store.as_ref(), submission).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}
