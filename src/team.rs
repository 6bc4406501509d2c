use serde::{Deserialize, Serialize};

/// Stable index of a team within its [`League`](crate::league::League).
///
/// Per-trial tracking tables are plain vectors indexed by `TeamId`, so a
/// trial never touches team names on its hot path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamId(pub usize);

impl TeamId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Static team attributes, read-only input to every trial.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    /// Elo-style strength rating at the start of each trial.
    pub rating: f64,
    /// Home city, resolved to coordinates through the atlas.
    pub city: String,
    pub division: String,
    pub conference: String,
}

impl Team {
    pub fn new(
        name: impl Into<String>,
        rating: f64,
        city: impl Into<String>,
        division: impl Into<String>,
        conference: impl Into<String>,
    ) -> Self {
        Team {
            name: name.into(),
            rating,
            city: city.into(),
            division: division.into(),
            conference: conference.into(),
        }
    }
}
