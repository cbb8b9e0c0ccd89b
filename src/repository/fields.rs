//! Incoming team fields and their validation

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{ValidateArgs, ValidationError, ValidationErrors};

use crate::state::Competition;

/// Integer accepted either as a JSON number or as a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Integer(i64),
    Text(String),
    Other(serde_json::Value),
}

impl NumericField {
    pub fn parse(&self) -> Option<i64> {
        match self {
            NumericField::Integer(value) => Some(*value),
            NumericField::Text(text) => text.trim().parse().ok(),
            NumericField::Other(_) => None,
        }
    }
}

impl From<i64> for NumericField {
    fn from(value: i64) -> Self {
        NumericField::Integer(value)
    }
}

/// Body of a create request: the record minus id and score defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamFields {
    pub team_name: Option<String>,
    pub pit_number: Option<NumericField>,
    pub team_number: Option<NumericField>,
}

/// Validated team ready to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewTeam {
    Fll { team_name: String, pit_number: i64 },
    Robofest { team_name: String, team_number: i64 },
}

impl NewTeam {
    pub fn team_name(&self) -> &str {
        match self {
            NewTeam::Fll { team_name, .. } | NewTeam::Robofest { team_name, .. } => team_name,
        }
    }
}

impl TeamFields {
    /// Check the fields against `competition`'s schema
    pub fn validate_for(&self, competition: Competition) -> Result<NewTeam, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let team_name = self
            .team_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());
        if team_name.is_none() {
            errors.add("teamName", invalid("required", "Team name must not be empty"));
        }

        let (own, foreign, own_name, foreign_name) = match competition {
            Competition::Fll => (&self.pit_number, &self.team_number, "pitNumber", "teamNumber"),
            Competition::Robofest => (&self.team_number, &self.pit_number, "teamNumber", "pitNumber"),
        };

        let number = required_number(own, own_name, &mut errors);
        if foreign.is_some() {
            errors.add(foreign_name, not_applicable(foreign_name, competition));
        }

        match (team_name, number) {
            (Some(name), Some(number)) if errors.is_empty() => {
                let team_name = name.to_string();
                Ok(match competition {
                    Competition::Fll => NewTeam::Fll {
                        team_name,
                        pit_number: number,
                    },
                    Competition::Robofest => NewTeam::Robofest {
                        team_name,
                        team_number: number,
                    },
                })
            }
            _ => Err(errors),
        }
    }
}

impl<'v_a> ValidateArgs<'v_a> for TeamFields {
    type Args = Competition;

    fn validate_with_args(&self, competition: Competition) -> Result<(), ValidationErrors> {
        self.validate_for(competition).map(|_| ())
    }
}

/// Body of an update request; omitted scores keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreFields {
    pub round1_score: Option<NumericField>,
    pub round2_score: Option<NumericField>,
    pub score: Option<NumericField>,
}

/// Validated score changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreUpdate {
    Fll {
        round1_score: Option<i64>,
        round2_score: Option<i64>,
    },
    Robofest { score: Option<i64> },
}

impl ScoreFields {
    pub fn validate_for(&self, competition: Competition) -> Result<ScoreUpdate, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let update = match competition {
            Competition::Fll => {
                if self.score.is_some() {
                    errors.add("score", not_applicable("score", competition));
                }
                ScoreUpdate::Fll {
                    round1_score: optional_number(&self.round1_score, "round1Score", &mut errors),
                    round2_score: optional_number(&self.round2_score, "round2Score", &mut errors),
                }
            }
            Competition::Robofest => {
                for (field, name) in [
                    (&self.round1_score, "round1Score"),
                    (&self.round2_score, "round2Score"),
                ] {
                    if field.is_some() {
                        errors.add(name, not_applicable(name, competition));
                    }
                }
                ScoreUpdate::Robofest {
                    score: optional_number(&self.score, "score", &mut errors),
                }
            }
        };

        if errors.is_empty() {
            Ok(update)
        } else {
            Err(errors)
        }
    }
}

impl<'v_a> ValidateArgs<'v_a> for ScoreFields {
    type Args = Competition;

    fn validate_with_args(&self, competition: Competition) -> Result<(), ValidationErrors> {
        self.validate_for(competition).map(|_| ())
    }
}

fn required_number(
    field: &Option<NumericField>,
    name: &'static str,
    errors: &mut ValidationErrors,
) -> Option<i64> {
    match field {
        None => {
            errors.add(name, invalid("required", format!("{} is required", name)));
            None
        }
        Some(value) => parse_number(value, name, errors),
    }
}

fn optional_number(
    field: &Option<NumericField>,
    name: &'static str,
    errors: &mut ValidationErrors,
) -> Option<i64> {
    field
        .as_ref()
        .and_then(|value| parse_number(value, name, errors))
}

fn parse_number(value: &NumericField, name: &'static str, errors: &mut ValidationErrors) -> Option<i64> {
    let parsed = value.parse();
    if parsed.is_none() {
        errors.add(name, invalid("integer", format!("{} must be an integer", name)));
    }
    parsed
}

fn not_applicable(name: &str, competition: Competition) -> ValidationError {
    invalid(
        "unknown_field",
        format!("{} does not apply to {} teams", name, competition),
    )
}

fn invalid(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}
