//! Season Sim - Monte Carlo season projection engine.
//!
//! Repeatedly simulates a full 32-team season (regular-season games,
//! tie-break resolution, playoff seeding, and a single-elimination bracket)
//! under an Elo-style win-probability model, and aggregates the trials into
//! per-team projections: win-total distribution and playoff, division,
//! conference, and championship frequencies.

pub mod aggregate;
pub mod bracket;
pub mod constants;
pub mod error;
pub mod export;
pub mod geo;
pub mod league;
pub mod odds;
pub mod schedule;
pub mod season;
pub mod seeding;
pub mod simulate;
pub mod state;
pub mod store;
pub mod team;
pub mod tiebreak;

pub use aggregate::{summarize, ProjectionRecord};
pub use bracket::{sim_championship, sim_conference, Bracket};
pub use error::SimError;
pub use geo::{great_circle_miles, CityAtlas, Coordinates};
pub use league::{Conference, Division, League};
pub use odds::{elo_win_prob, playoff_odds, regular_season_odds};
pub use schedule::{Schedule, ScheduledGame};
pub use season::{simulate_season, DrawSequence, TeamTrialResult, TrialOutcome};
pub use seeding::assign_seeds;
pub use simulate::{SimConfig, Simulation};
pub use state::{PlayoffRound, SeasonState, TeamRecord};
pub use store::{
    CityProvider, JsonLeagueStore, JsonResultSink, ResultSink, ScheduleStore, TeamStore,
};
pub use team::{Team, TeamId};
pub use tiebreak::{division_champion, group_ties, resolve_order};
