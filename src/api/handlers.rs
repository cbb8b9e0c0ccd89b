//! HTTP endpoint handlers for the timer, the board and server status

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use tracing::{info, warn};

use crate::{error::AppError, state::{AppState, TimerView}};
use super::responses::{
    BoardResponse, CompetitionResponse, HealthResponse, SelectCompetitionRequest, SetTimeRequest,
    StatusResponse,
};

/// Handle GET /api/timer - Current timer view
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> Json<TimerView> {
    Json(state.timer_view())
}

/// Handle POST /api/timer/set - Configure the round length
pub async fn set_timer_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SetTimeRequest>, JsonRejection>,
) -> Result<Json<TimerView>, AppError> {
    let Json(request) = payload?;
    let view = state.set_timer(request.minutes, request.seconds)?;
    info!("Set endpoint called - timer at {}", view.display);
    Ok(Json(view))
}

/// Handle POST /api/timer/start - Start or resume the countdown
pub async fn start_timer_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerView>, AppError> {
    match state.start_timer() {
        Ok(view) => Ok(Json(view)),
        Err(e) => {
            warn!("Start rejected: {}", e);
            Err(e)
        }
    }
}

/// Handle POST /api/timer/pause - Pause a running countdown
pub async fn pause_timer_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerView>, AppError> {
    Ok(Json(state.pause_timer()?))
}

/// Handle POST /api/timer/stop - Stop and restore the configured time
pub async fn stop_timer_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerView>, AppError> {
    Ok(Json(state.stop_timer()?))
}

/// Handle GET /api/competition - Active competition tab
pub async fn competition_handler(State(state): State<Arc<AppState>>) -> Json<CompetitionResponse> {
    Json(state.selector.current().into())
}

/// Handle PUT /api/competition - Switch the competition tab
pub async fn select_competition_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SelectCompetitionRequest>, JsonRejection>,
) -> Result<Json<CompetitionResponse>, AppError> {
    let Json(request) = payload?;
    Ok(Json(state.selector.select(request.competition).into()))
}

/// Handle GET /api/board - Teams of the active tab plus the timer
pub async fn board_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BoardResponse>, AppError> {
    let competition = state.selector.current();
    // The repository call never holds the timer lock
    let teams = state.teams.list(competition).await?;

    Ok(Json(BoardResponse {
        competition,
        title: competition.title().to_string(),
        teams,
        timer: state.timer_view(),
    }))
}

/// Handle GET /status - Return current server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let storage_ok = match state.teams.health_check().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Storage health check failed: {}", e);
            false
        }
    };

    Json(StatusResponse {
        timer: state.timer_view(),
        competition: state.selector.current(),
        storage_ok,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
