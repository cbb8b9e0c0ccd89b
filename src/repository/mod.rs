//! Team storage
//!
//! The timer never reads from here; only the board and the CRUD endpoints do.

pub mod fields;
pub mod sqlite;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidationErrors;

use crate::state::Competition;

pub use fields::{NewTeam, NumericField, ScoreFields, ScoreUpdate, TeamFields};
pub use sqlite::SqliteTeamRepository;

/// Result alias for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors raised by team repositories
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("{competition} team {id} not found")]
    NotFound { competition: Competition, id: i64 },
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// FIRST LEGO League team with its two round scores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FllTeam {
    pub id: i64,
    pub team_name: String,
    pub pit_number: i64,
    pub round1_score: i64,
    pub round2_score: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobofestTeam {
    pub id: i64,
    pub team_name: String,
    pub team_number: i64,
    pub score: i64,
    pub created_at: NaiveDateTime,
}

/// A stored team of either competition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamRecord {
    Fll(FllTeam),
    Robofest(RobofestTeam),
}

impl TeamRecord {
    pub fn id(&self) -> i64 {
        match self {
            TeamRecord::Fll(team) => team.id,
            TeamRecord::Robofest(team) => team.id,
        }
    }

    pub fn team_name(&self) -> &str {
        match self {
            TeamRecord::Fll(team) => &team.team_name,
            TeamRecord::Robofest(team) => &team.team_name,
        }
    }
}

/// CRUD over team records, one table per competition
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// All teams of `competition`, newest first
    async fn list(&self, competition: Competition) -> RepositoryResult<Vec<TeamRecord>>;

    async fn create(
        &self,
        competition: Competition,
        fields: &TeamFields,
    ) -> RepositoryResult<TeamRecord>;

    /// Change score fields; omitted ones are left as stored
    async fn update(
        &self,
        competition: Competition,
        id: i64,
        fields: &ScoreFields,
    ) -> RepositoryResult<()>;

    async fn delete(&self, competition: Competition, id: i64) -> RepositoryResult<()>;

    async fn health_check(&self) -> RepositoryResult<()>;
}
