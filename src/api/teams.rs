//! Team CRUD endpoints, one route set per competition

use std::sync::Arc;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::Json,
    routing::{get, put},
    Router,
};
use tracing::info;
use validator::ValidateArgs;

use crate::{
    error::AppError,
    repository::{RepositoryError, ScoreFields, TeamFields, TeamRecord},
    state::{AppState, Competition},
};
use super::responses::SuccessResponse;

/// Routes for `/api/{type}-teams` and `/api/{type}-teams/:id`
pub fn team_routes(competition: Competition) -> Router<Arc<AppState>> {
    let collection = format!("/api/{}-teams", competition.slug());
    let item = format!("{}/:id", collection);

    Router::new()
        .route(
            &collection,
            get(move |state: State<Arc<AppState>>| list_teams(state, competition)).post(
                move |state: State<Arc<AppState>>,
                      payload: Result<Json<TeamFields>, JsonRejection>| {
                    create_team(state, competition, payload)
                },
            ),
        )
        .route(
            &item,
            put(
                move |state: State<Arc<AppState>>,
                      id: Result<Path<i64>, PathRejection>,
                      payload: Result<Json<ScoreFields>, JsonRejection>| {
                    update_team(state, competition, id, payload)
                },
            )
            .delete(
                move |state: State<Arc<AppState>>, id: Result<Path<i64>, PathRejection>| {
                    delete_team(state, competition, id)
                },
            ),
        )
}

/// Handle GET - List teams, newest first
pub async fn list_teams(
    State(state): State<Arc<AppState>>,
    competition: Competition,
) -> Result<Json<Vec<TeamRecord>>, AppError> {
    Ok(Json(state.teams.list(competition).await?))
}

/// Handle POST - Register a team with zeroed scores
pub async fn create_team(
    State(state): State<Arc<AppState>>,
    competition: Competition,
    payload: Result<Json<TeamFields>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Json(fields) = payload?;
    fields
        .validate_with_args(competition)
        .map_err(RepositoryError::from)?;
    let record = state.teams.create(competition, &fields).await?;
    info!("Team added to {}: {} (id {})", competition, record.team_name(), record.id());
    Ok(Json(SuccessResponse::ok()))
}

/// Handle PUT - Update score fields
pub async fn update_team(
    State(state): State<Arc<AppState>>,
    competition: Competition,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ScoreFields>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Path(id) = id?;
    let Json(fields) = payload?;
    fields
        .validate_with_args(competition)
        .map_err(RepositoryError::from)?;
    state.teams.update(competition, id, &fields).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Handle DELETE - Remove a team
pub async fn delete_team(
    State(state): State<Arc<AppState>>,
    competition: Competition,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Path(id) = id?;
    state.teams.delete(competition, id).await?;
    Ok(Json(SuccessResponse::ok()))
}
