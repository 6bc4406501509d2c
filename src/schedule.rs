use crate::constants::SEASON_WEEKS;
use crate::team::TeamId;

/// One scheduled regular-season game, read-only input to every trial.
#[derive(Clone, Debug)]
pub struct ScheduledGame {
    pub week: u32,
    pub home: TeamId,
    pub away: TeamId,
    /// Venue city name, resolved through the atlas for travel distances.
    pub venue: String,
    pub neutral_site: bool,
    pub home_off_bye: bool,
    pub away_off_bye: bool,
}

/// The full regular-season slate, indexed by week.
///
/// Games within a week keep their input order; trials consume one random
/// draw per game in exactly this order, so the ordering is part of the
/// reproducibility contract.
#[derive(Clone, Debug)]
pub struct Schedule {
    weeks: Vec<Vec<ScheduledGame>>,
    game_count: usize,
}

impl Schedule {
    pub fn new(games: Vec<ScheduledGame>) -> Self {
        let max_week = games
            .iter()
            .map(|g| g.week)
            .max()
            .unwrap_or(0)
            .max(SEASON_WEEKS);
        let mut weeks: Vec<Vec<ScheduledGame>> = vec![Vec::new(); max_week as usize + 1];
        let game_count = games.len();
        for game in games {
            weeks[game.week as usize].push(game);
        }
        Schedule { weeks, game_count }
    }

    /// Games scheduled in the given week (empty for idle weeks).
    pub fn week(&self, week: u32) -> &[ScheduledGame] {
        self.weeks
            .get(week as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn game_count(&self) -> usize {
        self.game_count
    }
}
