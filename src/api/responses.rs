//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    repository::TeamRecord,
    state::{Competition, TimerView},
};

/// Acknowledgement for team writes: `{"success": true}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Body of `POST /api/timer/set`; a missing field counts as zero
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SetTimeRequest {
    pub minutes: i64,
    pub seconds: i64,
}

/// Body of `PUT /api/competition`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectCompetitionRequest {
    pub competition: Competition,
}

/// Active competition tab
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionResponse {
    pub competition: Competition,
    pub title: String,
}

impl From<Competition> for CompetitionResponse {
    fn from(competition: Competition) -> Self {
        Self {
            competition,
            title: competition.title().to_string(),
        }
    }
}

/// Everything the scoreboard page renders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardResponse {
    pub competition: Competition,
    pub title: String,
    pub teams: Vec<TeamRecord>,
    pub timer: TimerView,
}

/// Status response with timer information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerView,
    pub competition: Competition,
    pub storage_ok: bool,
    pub uptime: String,
    pub port: u16,
    pub host: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
