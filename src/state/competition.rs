//! Competition types and the active-tab selector

use std::{fmt, sync::RwLock};

use serde::{Deserialize, Serialize};
use tracing::info;

/// The two independent contest formats sharing the round timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Competition {
    /// FIRST LEGO League: pit number and two scored rounds
    Fll,
    /// Robofest: team number and a single score
    Robofest,
}

impl Competition {
    pub const ALL: [Competition; 2] = [Competition::Fll, Competition::Robofest];

    /// URL and wire name
    pub fn slug(&self) -> &'static str {
        match self {
            Competition::Fll => "fll",
            Competition::Robofest => "robofest",
        }
    }

    /// Heading shown above the team list
    pub fn title(&self) -> &'static str {
        match self {
            Competition::Fll => "FIRST LEGO League Teams",
            Competition::Robofest => "Robofest Teams",
        }
    }

    pub(crate) fn table(&self) -> &'static str {
        match self {
            Competition::Fll => "fll_teams",
            Competition::Robofest => "robofest_teams",
        }
    }
}

impl fmt::Display for Competition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Which team list the board currently shows.
///
/// Kept apart from the timer: switching tabs never touches countdown state.
#[derive(Debug)]
pub struct CompetitionSelector {
    active: RwLock<Competition>,
}

impl CompetitionSelector {
    pub fn new(initial: Competition) -> Self {
        Self {
            active: RwLock::new(initial),
        }
    }

    pub fn current(&self) -> Competition {
        // A poisoned lock still holds a valid Copy value
        match self.active.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn select(&self, competition: Competition) -> Competition {
        let mut guard = match self.active.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if *guard != competition {
            info!(from = %*guard, to = %competition, "Switching competition tab");
        }
        *guard = competition;
        competition
    }
}

impl Default for CompetitionSelector {
    fn default() -> Self {
        Self::new(Competition::Fll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_slug() {
        assert_eq!(serde_json::to_value(Competition::Robofest).unwrap(), "robofest");
        let parsed: Competition = serde_json::from_value("fll".into()).unwrap();
        assert_eq!(parsed, Competition::Fll);
        assert_eq!(Competition::Fll.to_string(), Competition::Fll.slug());
    }

    #[test]
    fn selector_defaults_to_fll_and_switches() {
        let selector = CompetitionSelector::default();
        assert_eq!(selector.current(), Competition::Fll);
        selector.select(Competition::Robofest);
        assert_eq!(selector.current(), Competition::Robofest);
        assert_eq!(selector.current().title(), "Robofest Teams");
    }
}
