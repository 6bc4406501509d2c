use rand::Rng;

use crate::bracket::{sim_championship, sim_conference, Bracket};
use crate::constants::{K_FACTOR, PLAYOFF_SEEDS, SEASON_WEEKS, WILDCARD_SLOTS};
use crate::error::SimError;
use crate::geo::CityAtlas;
use crate::league::League;
use crate::odds::regular_season_odds;
use crate::schedule::Schedule;
use crate::seeding::assign_seeds;
use crate::state::{PlayoffRound, SeasonState};
use crate::team::TeamId;
use crate::tiebreak::division_champion;

/// A trial's pre-allocated block of uniform draws, consumed strictly in
/// game-simulation order: regular-season weeks in order, then the playoff
/// rounds, then the championship game.
///
/// The block is sized exactly to the known game count per trial; running
/// past the end is a budget mismatch and fails rather than re-seeding.
#[derive(Clone, Debug)]
pub struct DrawSequence {
    draws: Vec<f64>,
    cursor: usize,
}

impl DrawSequence {
    /// Pre-generate `len` uniform draws from the trial's RNG.
    pub fn pregenerate<R: Rng>(len: usize, rng: &mut R) -> Self {
        DrawSequence {
            draws: (0..len).map(|_| rng.gen::<f64>()).collect(),
            cursor: 0,
        }
    }

    /// Build a sequence from explicit values (tests and replay).
    pub fn from_draws(draws: Vec<f64>) -> Self {
        DrawSequence { draws, cursor: 0 }
    }

    pub fn next_draw(&mut self) -> Result<f64, SimError> {
        let draw = self.draws.get(self.cursor).copied().ok_or(
            SimError::DrawsExhausted {
                budget: self.draws.len(),
            },
        )?;
        self.cursor += 1;
        Ok(draw)
    }

    pub fn remaining(&self) -> usize {
        self.draws.len() - self.cursor
    }
}

/// Per-team result of one season trial.
#[derive(Clone, Copy, Debug, Default)]
pub struct TeamTrialResult {
    pub wins: u32,
    pub made_playoffs: bool,
    pub won_division: bool,
    pub top_seed: bool,
    pub won_conference: bool,
    pub won_championship: bool,
}

/// One full simulated season: regular-season win totals plus postseason
/// outcome flags, indexed by [`TeamId`].
#[derive(Clone, Debug)]
pub struct TrialOutcome {
    pub teams: Vec<TeamTrialResult>,
}

/// Play every scheduled regular-season game, one draw per game, updating
/// win counters, beaten/lost-to histories, and ratings as results land.
pub fn play_regular_season(
    league: &League,
    schedule: &Schedule,
    atlas: &CityAtlas,
    state: &mut SeasonState,
    draws: &mut DrawSequence,
) -> Result<(), SimError> {
    for week in 1..=SEASON_WEEKS {
        for game in schedule.week(week) {
            let home_odds = regular_season_odds(game, league, state, atlas)?;
            let draw = draws.next_draw()?;
            let (winner, loser, winner_odds) = if draw < home_odds {
                (game.home, game.away, home_odds)
            } else {
                (game.away, game.home, 1.0 - home_odds)
            };
            state.add_win(league, winner, loser);
            state.apply_result(winner, loser, winner_odds, K_FACTOR);
        }
    }
    Ok(())
}

/// Simulate one complete season trial.
///
/// Resets per-team season state from the team snapshots, plays the regular
/// season, resolves division champions and wildcards, seeds and plays both
/// conference brackets and the championship game, and records the trial
/// outcome per team. `rng` covers tie-break randomness only; game outcomes
/// come from the pre-allocated draw block.
pub fn simulate_season<R: Rng>(
    league: &League,
    schedule: &Schedule,
    atlas: &CityAtlas,
    draws: &mut DrawSequence,
    rng: &mut R,
) -> Result<TrialOutcome, SimError> {
    let mut state = SeasonState::new(league);
    play_regular_season(league, schedule, atlas, &mut state, draws)?;

    // Division champions, grouped per conference in league order.
    let mut champions: Vec<Vec<TeamId>> = vec![Vec::new(); league.conferences().len()];
    for division in league.divisions() {
        let mut order = division.teams.clone();
        order.sort_by_key(|&t| std::cmp::Reverse(state.record(t).total_wins));
        let champ = division_champion(&order, &state, rng);
        champions[division.conference].push(champ);
    }

    let mut conference_champs = Vec::with_capacity(league.conferences().len());
    for (conf_idx, conference) in league.conferences().iter().enumerate() {
        let winners = &champions[conf_idx];

        let mut wildcards: Vec<TeamId> = conference
            .teams
            .iter()
            .copied()
            .filter(|t| !winners.contains(t))
            .collect();
        wildcards.sort_by_key(|&t| std::cmp::Reverse(state.record(t).total_wins));
        let mut winners_sorted = winners.clone();
        winners_sorted.sort_by_key(|&t| std::cmp::Reverse(state.record(t).total_wins));

        let mut wildcards = assign_seeds(&wildcards, true, &mut state, rng);
        wildcards.truncate(WILDCARD_SLOTS);
        let seeded_winners = assign_seeds(&winners_sorted, false, &mut state, rng);

        let mut bracket = Bracket::new(
            seeded_winners
                .iter()
                .enumerate()
                .map(|(i, &t)| (i as u8 + 1, t))
                .chain(wildcards.iter().enumerate().map(|(i, &t)| (i as u8 + 5, t))),
        );
        for seed in 1..=PLAYOFF_SEEDS {
            if let Some(team) = bracket.team(seed) {
                state.record_mut(team).round = Some(if seed == 1 {
                    PlayoffRound::Divisional
                } else {
                    PlayoffRound::Wildcard
                });
            }
        }

        let champ = sim_conference(&mut bracket, league, &mut state, atlas, draws)?;
        conference_champs.push(champ);
    }

    let (home_champ, away_champ) = (conference_champs[0], conference_champs[1]);
    let overall = sim_championship(home_champ, away_champ, league, &mut state, atlas, draws)?;

    let teams = league
        .teams()
        .map(|(id, _)| {
            let rec = state.record(id);
            TeamTrialResult {
                wins: rec.total_wins,
                made_playoffs: rec.seed.is_some_and(|s| s <= PLAYOFF_SEEDS),
                won_division: rec.seed.is_some_and(|s| s <= 4),
                top_seed: rec.seed == Some(1),
                won_conference: conference_champs.contains(&id),
                won_championship: id == overall,
            }
        })
        .collect();

    Ok(TrialOutcome { teams })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinates;
    use crate::league::fixtures;
    use crate::schedule::ScheduledGame;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    pub(crate) fn flat_atlas() -> CityAtlas {
        let mut atlas = CityAtlas::default();
        let origin = Coordinates {
            latitude: 40.0,
            longitude: -90.0,
        };
        for i in 0..32 {
            atlas.insert(format!("City {i:02}"), origin);
        }
        atlas.insert(
            crate::constants::CHAMPIONSHIP_HOST_CITY.to_string(),
            origin,
        );
        atlas
    }

    /// Round-robin style slate: every team plays once per week for 17 weeks.
    pub(crate) fn full_schedule() -> Schedule {
        let mut games = Vec::new();
        for week in 1..=17u32 {
            for i in 0..16usize {
                let home = i;
                let away = 16 + ((i + week as usize) % 16);
                games.push(ScheduledGame {
                    week,
                    home: TeamId(home),
                    away: TeamId(away),
                    venue: format!("City {home:02}"),
                    neutral_site: false,
                    home_off_bye: false,
                    away_off_bye: false,
                });
            }
        }
        Schedule::new(games)
    }

    #[test]
    fn test_draw_sequence_exhaustion_is_fatal() {
        let mut draws = DrawSequence::from_draws(vec![0.5, 0.25]);
        assert_eq!(draws.remaining(), 2);
        assert_eq!(draws.next_draw().unwrap(), 0.5);
        assert_eq!(draws.next_draw().unwrap(), 0.25);
        assert!(matches!(
            draws.next_draw(),
            Err(SimError::DrawsExhausted { budget: 2 })
        ));
    }

    #[test]
    fn test_single_game_favorite_wins_on_median_draw() {
        // 100-point home advantage at a neutral site: P(home) ~ 0.76. A draw
        // of 0.5 must land a home win worth (1 - 0.76) * 20 ~ 4.8 Elo.
        let league = fixtures::league_with_ratings(&[(0, 1600.0), (16, 1400.0)]);
        let schedule = Schedule::new(vec![ScheduledGame {
            week: 1,
            home: TeamId(0),
            away: TeamId(16),
            venue: "City 00".to_string(),
            neutral_site: true,
            home_off_bye: false,
            away_off_bye: false,
        }]);
        let mut state = SeasonState::new(&league);
        let mut draws = DrawSequence::from_draws(vec![0.5]);

        play_regular_season(&league, &schedule, &flat_atlas(), &mut state, &mut draws).unwrap();

        assert_eq!(state.record(TeamId(0)).total_wins, 1);
        assert_eq!(state.record(TeamId(16)).total_wins, 0);
        let delta = state.rating(TeamId(0)) - 1600.0;
        assert!((delta - 4.8).abs() < 0.05, "home delta was {delta}");
        assert!((state.rating(TeamId(16)) - (1400.0 - delta)).abs() < 1e-9);
    }

    #[test]
    fn test_full_trial_produces_consistent_outcome() {
        let league = fixtures::league();
        let schedule = full_schedule();
        let atlas = flat_atlas();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let budget = schedule.game_count() + crate::constants::PLAYOFF_GAME_COUNT;
        let mut draws = DrawSequence::pregenerate(budget, &mut rng);

        let outcome = simulate_season(&league, &schedule, &atlas, &mut draws, &mut rng).unwrap();

        assert_eq!(draws.remaining(), 0, "draw budget must be consumed exactly");
        let playoff_teams = outcome.teams.iter().filter(|t| t.made_playoffs).count();
        let division_champs = outcome.teams.iter().filter(|t| t.won_division).count();
        let top_seeds = outcome.teams.iter().filter(|t| t.top_seed).count();
        let conf_champs = outcome.teams.iter().filter(|t| t.won_conference).count();
        let champions = outcome.teams.iter().filter(|t| t.won_championship).count();
        assert_eq!(playoff_teams, 14);
        assert_eq!(division_champs, 8);
        assert_eq!(top_seeds, 2);
        assert_eq!(conf_champs, 2);
        assert_eq!(champions, 1);

        let total_wins: u32 = outcome.teams.iter().map(|t| t.wins).sum();
        assert_eq!(total_wins as usize, schedule.game_count());
    }

    #[test]
    fn test_trial_is_reproducible_for_a_seed() {
        let league = fixtures::league();
        let schedule = full_schedule();
        let atlas = flat_atlas();
        let budget = schedule.game_count() + crate::constants::PLAYOFF_GAME_COUNT;

        let run = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut draws = DrawSequence::pregenerate(budget, &mut rng);
            simulate_season(&league, &schedule, &atlas, &mut draws, &mut rng).unwrap()
        };

        let a = run(99);
        let b = run(99);
        for (x, y) in a.teams.iter().zip(&b.teams) {
            assert_eq!(x.wins, y.wins);
            assert_eq!(x.won_championship, y.won_championship);
            assert_eq!(x.made_playoffs, y.made_playoffs);
        }
    }
}
