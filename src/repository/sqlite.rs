//! SQLite-backed team repository

use std::{fs, path::Path, str::FromStr};

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use tracing::{debug, info};

use super::{
    FllTeam, NewTeam, RepositoryError, RepositoryResult, RobofestTeam, ScoreFields, ScoreUpdate,
    TeamFields, TeamRecord, TeamRepository,
};
use crate::state::Competition;

// Column names match databases written by the earlier scoreboard server
const FLL_COLUMNS: &str = "id, teamName, pitNumber, round1Score, round2Score, createdAt";
const ROBOFEST_COLUMNS: &str = "id, teamName, teamNumber, score, createdAt";

#[derive(Debug, Clone)]
pub struct SqliteTeamRepository {
    pool: Pool<Sqlite>,
}

impl SqliteTeamRepository {
    /// Open (creating if needed) the database at `database_url` and ensure the schema
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let in_memory = is_in_memory(database_url);
        if !in_memory {
            ensure_sqlite_parent_dir_exists(database_url)?;
        }

        let connect_options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid database url {}", database_url))?
            .create_if_missing(true);

        // Every in-memory connection is its own database, so keep exactly one alive
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open database {}", database_url))?;

        let repository = Self { pool };
        repository
            .ensure_schema()
            .await
            .context("failed to create team tables")?;
        info!("Team database ready at {}", database_url);
        Ok(repository)
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS fll_teams (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                teamName    TEXT NOT NULL,
                pitNumber   INTEGER NOT NULL,
                round1Score INTEGER DEFAULT 0,
                round2Score INTEGER DEFAULT 0,
                createdAt   DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS robofest_teams (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                teamName   TEXT NOT NULL,
                teamNumber INTEGER NOT NULL,
                score      INTEGER DEFAULT 0,
                createdAt  DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert(&self, team: NewTeam) -> RepositoryResult<TeamRecord> {
        let row = match &team {
            NewTeam::Fll {
                team_name,
                pit_number,
            } => {
                sqlx::query(&format!(
                    "INSERT INTO fll_teams (teamName, pitNumber) VALUES (?, ?) RETURNING {}",
                    FLL_COLUMNS
                ))
                .bind(team_name)
                .bind(pit_number)
                .fetch_one(&self.pool)
                .await?
            }
            NewTeam::Robofest {
                team_name,
                team_number,
            } => {
                sqlx::query(&format!(
                    "INSERT INTO robofest_teams (teamName, teamNumber) VALUES (?, ?) RETURNING {}",
                    ROBOFEST_COLUMNS
                ))
                .bind(team_name)
                .bind(team_number)
                .fetch_one(&self.pool)
                .await?
            }
        };

        let competition = match team {
            NewTeam::Fll { .. } => Competition::Fll,
            NewTeam::Robofest { .. } => Competition::Robofest,
        };
        Ok(map_row(competition, &row)?)
    }
}

#[async_trait]
impl TeamRepository for SqliteTeamRepository {
    async fn list(&self, competition: Competition) -> RepositoryResult<Vec<TeamRecord>> {
        let columns = match competition {
            Competition::Fll => FLL_COLUMNS,
            Competition::Robofest => ROBOFEST_COLUMNS,
        };
        let rows = sqlx::query(&format!(
            "SELECT {} FROM {} ORDER BY id DESC",
            columns,
            competition.table()
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| map_row(competition, row).map_err(RepositoryError::from))
            .collect()
    }

    async fn create(
        &self,
        competition: Competition,
        fields: &TeamFields,
    ) -> RepositoryResult<TeamRecord> {
        let team = fields.validate_for(competition)?;
        let record = self.insert(team).await?;
        info!(%competition, id = record.id(), "Created team {}", record.team_name());
        Ok(record)
    }

    async fn update(
        &self,
        competition: Competition,
        id: i64,
        fields: &ScoreFields,
    ) -> RepositoryResult<()> {
        let result = match fields.validate_for(competition)? {
            ScoreUpdate::Fll {
                round1_score,
                round2_score,
            } => {
                sqlx::query(
                    "UPDATE fll_teams
                     SET round1Score = COALESCE(?, round1Score),
                         round2Score = COALESCE(?, round2Score)
                     WHERE id = ?",
                )
                .bind(round1_score)
                .bind(round2_score)
                .bind(id)
                .execute(&self.pool)
                .await?
            }
            ScoreUpdate::Robofest { score } => {
                sqlx::query("UPDATE robofest_teams SET score = COALESCE(?, score) WHERE id = ?")
                    .bind(score)
                    .bind(id)
                    .execute(&self.pool)
                    .await?
            }
        };

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound { competition, id });
        }
        debug!(%competition, id, "Updated team scores");
        Ok(())
    }

    async fn delete(&self, competition: Competition, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", competition.table()))
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound { competition, id });
        }
        info!(%competition, id, "Deleted team");
        Ok(())
    }

    async fn health_check(&self) -> RepositoryResult<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

fn map_row(competition: Competition, row: &SqliteRow) -> Result<TeamRecord, sqlx::Error> {
    Ok(match competition {
        Competition::Fll => TeamRecord::Fll(FllTeam {
            id: row.try_get("id")?,
            team_name: row.try_get("teamName")?,
            pit_number: row.try_get("pitNumber")?,
            round1_score: score_column(row, "round1Score")?,
            round2_score: score_column(row, "round2Score")?,
            created_at: row.try_get("createdAt")?,
        }),
        Competition::Robofest => TeamRecord::Robofest(RobofestTeam {
            id: row.try_get("id")?,
            team_name: row.try_get("teamName")?,
            team_number: row.try_get("teamNumber")?,
            score: score_column(row, "score")?,
            created_at: row.try_get("createdAt")?,
        }),
    })
}

/// Score columns are nullable; older rows may hold NULL for an unscored round
fn score_column(row: &SqliteRow, column: &str) -> Result<i64, sqlx::Error> {
    Ok(row.try_get::<Option<i64>, _>(column)?.unwrap_or(0))
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> anyhow::Result<()> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    let path = path.split('?').next().unwrap_or(path);

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::NumericField;

    async fn repository() -> SqliteTeamRepository {
        SqliteTeamRepository::connect("sqlite::memory:")
            .await
            .expect("db")
    }

    fn fll(name: &str, pit: i64) -> TeamFields {
        TeamFields {
            team_name: Some(name.into()),
            pit_number: Some(NumericField::Integer(pit)),
            team_number: None,
        }
    }

    fn robofest(name: &str, number: i64) -> TeamFields {
        TeamFields {
            team_name: Some(name.into()),
            pit_number: None,
            team_number: Some(NumericField::Integer(number)),
        }
    }

    #[tokio::test]
    async fn creates_and_lists_newest_first() {
        let repo = repository().await;
        repo.create(Competition::Fll, &fll("First", 1)).await.expect("first");
        repo.create(Competition::Fll, &fll("Second", 2)).await.expect("second");

        let teams = repo.list(Competition::Fll).await.expect("list");
        let names: Vec<_> = teams.iter().map(TeamRecord::team_name).collect();
        assert_eq!(names, vec!["Second", "First"]);
        assert!(repo.list(Competition::Robofest).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn new_teams_start_with_zero_scores() {
        let repo = repository().await;
        let created = repo
            .create(Competition::Robofest, &robofest("Gearheads", 4412))
            .await
            .expect("create");
        match created {
            TeamRecord::Robofest(team) => {
                assert_eq!(team.team_number, 4412);
                assert_eq!(team.score, 0);
            }
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[tokio::test]
    async fn rejects_invalid_team_without_writing() {
        let repo = repository().await;
        let err = repo
            .create(Competition::Fll, &fll("  ", 3))
            .await
            .expect_err("blank name");
        assert!(matches!(err, RepositoryError::Validation(_)));
        assert!(repo.list(Competition::Fll).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn updates_only_given_scores() {
        let repo = repository().await;
        let team = repo.create(Competition::Fll, &fll("Bricks", 7)).await.expect("create");

        let scores = ScoreFields {
            round1_score: Some(NumericField::Integer(210)),
            ..Default::default()
        };
        repo.update(Competition::Fll, team.id(), &scores).await.expect("update");
        let scores = ScoreFields {
            round2_score: Some(NumericField::Text("175".into())),
            ..Default::default()
        };
        repo.update(Competition::Fll, team.id(), &scores).await.expect("update");

        match &repo.list(Competition::Fll).await.expect("list")[0] {
            TeamRecord::Fll(team) => {
                assert_eq!(team.round1_score, 210);
                assert_eq!(team.round2_score, 175);
            }
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_ids() {
        let repo = repository().await;
        let err = repo
            .update(Competition::Robofest, 99, &ScoreFields::default())
            .await
            .expect_err("missing");
        assert!(matches!(err, RepositoryError::NotFound { id: 99, .. }));

        let err = repo.delete(Competition::Fll, 5).await.expect_err("missing");
        assert!(matches!(err, RepositoryError::NotFound { id: 5, .. }));
    }

    #[tokio::test]
    async fn deletes_team() {
        let repo = repository().await;
        let team = repo
            .create(Competition::Robofest, &robofest("Sprockets", 12))
            .await
            .expect("create");
        repo.delete(Competition::Robofest, team.id()).await.expect("delete");
        assert!(repo.list(Competition::Robofest).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn health_check_succeeds_for_live_pool() {
        let repo = repository().await;
        repo.health_check().await.expect("health check");
    }

    #[tokio::test]
    async fn creates_database_file_when_missing() {
        let suffix = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let temp_root = std::env::temp_dir().join(format!("competition_timer_test_{suffix}"));
        let db_path = temp_root.join("nested").join("scoring.db");
        let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

        let repo = SqliteTeamRepository::connect(&database_url).await.expect("db");
        repo.pool().close().await;

        assert!(db_path.exists(), "database file should exist: {}", db_path.display());
        std::fs::remove_dir_all(temp_root).expect("cleanup");
    }

    #[tokio::test]
    async fn opens_existing_scoreboard_database() {
        let suffix = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let temp_root = std::env::temp_dir().join(format!("competition_timer_legacy_{suffix}"));
        std::fs::create_dir_all(&temp_root).expect("temp dir");
        let db_path = temp_root.join("scoring.db");
        let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

        let seed = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(
                SqliteConnectOptions::from_str(&database_url)
                    .expect("url")
                    .create_if_missing(true),
            )
            .await
            .expect("seed db");
        sqlx::query(
            "CREATE TABLE fll_teams (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                teamName TEXT NOT NULL,
                pitNumber INTEGER NOT NULL,
                round1Score INTEGER DEFAULT 0,
                round2Score INTEGER DEFAULT 0,
                createdAt DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
        )
        .execute(&seed)
        .await
        .expect("legacy table");
        sqlx::query("INSERT INTO fll_teams (teamName, pitNumber) VALUES ('Bricks', 4)")
            .execute(&seed)
            .await
            .expect("legacy row");
        sqlx::query(
            "INSERT INTO fll_teams (teamName, pitNumber, round1Score, round2Score)
             VALUES ('Axles', 9, 120, NULL)",
        )
        .execute(&seed)
        .await
        .expect("legacy row with null score");
        seed.close().await;

        let repo = SqliteTeamRepository::connect(&database_url).await.expect("db");
        let teams = repo.list(Competition::Fll).await.expect("list");
        assert_eq!(teams.len(), 2);
        match (&teams[0], &teams[1]) {
            (TeamRecord::Fll(axles), TeamRecord::Fll(bricks)) => {
                assert_eq!(axles.team_name, "Axles");
                assert_eq!(axles.round1_score, 120);
                assert_eq!(axles.round2_score, 0);
                assert_eq!(bricks.team_name, "Bricks");
                assert_eq!(bricks.pit_number, 4);
                assert_eq!(bricks.round1_score, 0);
            }
            other => panic!("unexpected records {:?}", other),
        }

        let scores = ScoreFields {
            round2_score: Some(NumericField::Integer(88)),
            ..Default::default()
        };
        repo.update(Competition::Fll, teams[1].id(), &scores).await.expect("update");
        repo.pool().close().await;
        std::fs::remove_dir_all(temp_root).expect("cleanup");
    }
}
