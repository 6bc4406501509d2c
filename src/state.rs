use crate::league::League;
use crate::team::TeamId;

/// How far a team got in the postseason, in bracket order.
///
/// A team's label names the furthest round it reached: playoff qualifiers
/// start at `Wildcard` (the top seed at `Divisional`, having earned the bye)
/// and each game won advances the label one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PlayoffRound {
    Wildcard,
    Divisional,
    Conference,
    Championship,
    Champion,
}

/// Per-team mutable record for one season trial.
#[derive(Clone, Debug)]
pub struct TeamRecord {
    /// Current rating; starts from the team snapshot and moves with results.
    pub rating: f64,
    pub total_wins: u32,
    pub division_wins: u32,
    pub conference_wins: u32,
    /// Opponents beaten, in game order. May repeat for rematches.
    pub beaten: Vec<TeamId>,
    /// Opponents lost to, in game order.
    pub lost_to: Vec<TeamId>,
    /// Playoff seed 1-7, `None` until seeding.
    pub seed: Option<u8>,
    pub round: Option<PlayoffRound>,
}

/// Per-trial season tracking table, indexed by [`TeamId`].
///
/// Owned exclusively by one season trial; created fresh from team snapshots
/// and discarded once the trial outcome has been recorded.
#[derive(Clone, Debug)]
pub struct SeasonState {
    records: Vec<TeamRecord>,
}

impl SeasonState {
    pub fn new(league: &League) -> Self {
        let records = league
            .teams()
            .map(|(_, team)| TeamRecord {
                rating: team.rating,
                total_wins: 0,
                division_wins: 0,
                conference_wins: 0,
                beaten: Vec::new(),
                lost_to: Vec::new(),
                seed: None,
                round: None,
            })
            .collect();
        SeasonState { records }
    }

    pub fn record(&self, id: TeamId) -> &TeamRecord {
        &self.records[id.index()]
    }

    pub fn record_mut(&mut self, id: TeamId) -> &mut TeamRecord {
        &mut self.records[id.index()]
    }

    pub fn rating(&self, id: TeamId) -> f64 {
        self.records[id.index()].rating
    }

    /// Record a regular-season win: total wins always; a division game also
    /// counts as a conference win; any intra-conference game counts as a
    /// conference win.
    pub fn add_win(&mut self, league: &League, winner: TeamId, loser: TeamId) {
        let rec = self.record_mut(winner);
        rec.total_wins += 1;
        if league.same_division(winner, loser) {
            rec.division_wins += 1;
            rec.conference_wins += 1;
        } else if league.same_conference(winner, loser) {
            rec.conference_wins += 1;
        }
        rec.beaten.push(loser);
        self.record_mut(loser).lost_to.push(winner);
    }

    /// Elo update rule: delta = (1 - winner's pre-game odds) * k, added to
    /// the winner and subtracted from the loser. Bigger upsets move ratings
    /// further.
    pub fn apply_result(&mut self, winner: TeamId, loser: TeamId, winner_odds: f64, k_factor: f64) {
        let delta = (1.0 - winner_odds) * k_factor;
        self.record_mut(winner).rating += delta;
        self.record_mut(loser).rating -= delta;
    }

    /// Head-to-head games won minus lost against one specific opponent.
    pub fn net_versus(&self, team: TeamId, opponent: TeamId) -> i64 {
        let rec = self.record(team);
        let won = rec.beaten.iter().filter(|&&t| t == opponent).count() as i64;
        let lost = rec.lost_to.iter().filter(|&&t| t == opponent).count() as i64;
        won - lost
    }
}
