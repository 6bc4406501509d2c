/// Elo K-factor applied to every game, regular season and playoffs.
pub const K_FACTOR: f64 = 20.0;

/// Elo bonus for a team coming off a bye week.
pub const BYE_BONUS: f64 = 25.0;

/// Elo bonus for the home team at a non-neutral site.
pub const HOME_FIELD_BONUS: f64 = 48.0;

/// Elo penalty per 1000 miles traveled to the venue.
pub const TRAVEL_PENALTY_PER_1000_MILES: f64 = 4.0;

/// Rating-difference multiplier for playoff games.
pub const PLAYOFF_INTENSITY: f64 = 1.2;

/// Neutral host city of the championship game.
pub const CHAMPIONSHIP_HOST_CITY: &str = "New Orleans";

/// Teams in the league.
pub const LEAGUE_SIZE: usize = 32;

/// Teams per division.
pub const DIVISION_SIZE: usize = 4;

/// Divisions per conference.
pub const DIVISIONS_PER_CONFERENCE: usize = 4;

/// Conferences in the league.
pub const CONFERENCE_COUNT: usize = 2;

/// Regular-season weeks.
pub const SEASON_WEEKS: u32 = 18;

/// Playoff seeds per conference.
pub const PLAYOFF_SEEDS: u8 = 7;

/// Wildcard berths per conference (seeds 5-7).
pub const WILDCARD_SLOTS: usize = 3;

/// First seed number assigned to a wildcard team.
pub const WILDCARD_SEED_BASE: u8 = 5;

/// Playoff games per trial: 6 per conference bracket plus the championship.
pub const PLAYOFF_GAME_COUNT: usize = 13;
