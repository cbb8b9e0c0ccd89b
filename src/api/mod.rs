//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod events;
pub mod handlers;
pub mod responses;
pub mod teams;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::{AppState, Competition};
use events::timer_events_handler;
use handlers::*;
use teams::team_routes;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let teams = Competition::ALL
        .into_iter()
        .fold(Router::new(), |router, competition| {
            router.merge(team_routes(competition))
        });

    Router::new()
        .route("/api/timer", get(timer_handler))
        .route("/api/timer/set", post(set_timer_handler))
        .route("/api/timer/start", post(start_timer_handler))
        .route("/api/timer/pause", post(pause_timer_handler))
        .route("/api/timer/stop", post(stop_timer_handler))
        .route("/api/timer/events", get(timer_events_handler))
        .route(
            "/api/competition",
            get(competition_handler).put(select_competition_handler),
        )
        .route("/api/board", get(board_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .merge(teams)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
