use thiserror::Error;

/// Errors surfaced by league loading, validation, and simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// A city referenced by a team or venue has no known coordinates.
    /// Fatal: there is no valid distance computation without them.
    #[error("unknown city: {0}")]
    UnknownCity(String),

    /// A schedule entry references a team that is not in the league.
    #[error("unknown team: {0}")]
    UnknownTeam(String),

    #[error("league has {count} teams, expected {expected}")]
    LeagueSize { count: usize, expected: usize },

    #[error("division {name:?} has {count} teams, expected {expected}")]
    DivisionSize {
        name: String,
        count: usize,
        expected: usize,
    },

    #[error("conference {name:?} has {divisions} divisions and {teams} teams, expected {expected_divisions} and {expected_teams}")]
    ConferenceShape {
        name: String,
        divisions: usize,
        teams: usize,
        expected_divisions: usize,
        expected_teams: usize,
    },

    #[error("division {division:?} spans conferences {first:?} and {second:?}")]
    SplitDivision {
        division: String,
        first: String,
        second: String,
    },

    #[error("duplicate team name: {0}")]
    DuplicateTeam(String),

    /// More games were simulated than random draws were allocated for the
    /// trial. The draw budget is sized exactly to the schedule plus the
    /// playoff bracket, so this indicates a mismatch upstream.
    #[error("random draw budget of {budget} exhausted")]
    DrawsExhausted { budget: usize },

    #[error("trial count must be at least 1")]
    NoTrials,

    /// A bracket finished its rounds with more than one survivor. Cannot
    /// happen for a full 7-seed field; guards a malformed bracket input.
    #[error("bracket not resolved: {remaining} teams remain")]
    BracketNotResolved { remaining: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("data file parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("csv export error: {0}")]
    Export(#[from] csv::Error),
}
