use std::collections::BTreeMap;

use crate::constants::K_FACTOR;
use crate::error::SimError;
use crate::geo::CityAtlas;
use crate::league::League;
use crate::odds::playoff_odds;
use crate::season::DrawSequence;
use crate::state::{PlayoffRound, SeasonState};
use crate::team::TeamId;

/// Round labels reached by winning playoff round 0, 1, and 2.
const ROUND_REACHED: [PlayoffRound; 3] = [
    PlayoffRound::Divisional,
    PlayoffRound::Conference,
    PlayoffRound::Championship,
];

/// One conference's playoff field: seed number to team, losers removed as
/// the bracket plays out.
#[derive(Clone, Debug)]
pub struct Bracket {
    slots: BTreeMap<u8, TeamId>,
}

impl Bracket {
    pub fn new(seeded: impl IntoIterator<Item = (u8, TeamId)>) -> Self {
        Bracket {
            slots: seeded.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn team(&self, seed: u8) -> Option<TeamId> {
        self.slots.get(&seed).copied()
    }

    /// Seeds still alive, in ascending order.
    pub fn remaining_seeds(&self) -> Vec<u8> {
        self.slots.keys().copied().collect()
    }

    /// The surviving team once the bracket has played down to one.
    pub fn champion(&self) -> Option<TeamId> {
        if self.slots.len() == 1 {
            self.slots.values().next().copied()
        } else {
            None
        }
    }

    fn remove(&mut self, seed: u8) {
        self.slots.remove(&seed);
    }
}

/// Play one playoff round within a conference bracket.
///
/// Round 0 pairs the fixed wildcard matchups (2v7, 3v6, 4v5) while seed 1
/// sits out; later rounds re-seed the survivors, pairing lowest remaining
/// seed against highest. Seed 1 playing in round 1 is coming off its bye.
/// Each game consumes one draw, applies the Elo update with the actual
/// winner's pre-game odds, tags the winner with the round it reached, and
/// removes the loser.
pub fn sim_round(
    bracket: &mut Bracket,
    round: usize,
    league: &League,
    state: &mut SeasonState,
    atlas: &CityAtlas,
    draws: &mut DrawSequence,
) -> Result<(), SimError> {
    let matchups: Vec<(u8, u8)> = if round == 0 {
        vec![(2, 7), (3, 6), (4, 5)]
    } else {
        let seeds = bracket.remaining_seeds();
        (0..seeds.len() / 2)
            .map(|i| (seeds[i], seeds[seeds.len() - 1 - i]))
            .collect()
    };

    for (higher, lower) in matchups {
        let (home, away) = match (bracket.team(higher), bracket.team(lower)) {
            (Some(h), Some(a)) => (h, a),
            // Fixed round-0 matchups assume a full 7-team field.
            _ => continue,
        };
        let off_bye = higher == 1 && round == 1;
        let home_odds = playoff_odds(home, away, league, state, atlas, off_bye, false)?;
        let draw = draws.next_draw()?;

        let (winner, loser, loser_seed, winner_odds) = if draw < home_odds {
            (home, away, lower, home_odds)
        } else {
            (away, home, higher, 1.0 - home_odds)
        };
        state.apply_result(winner, loser, winner_odds, K_FACTOR);
        state.record_mut(winner).round = Some(ROUND_REACHED[round.min(2)]);
        bracket.remove(loser_seed);
    }
    Ok(())
}

/// Play a full conference bracket down to its champion.
pub fn sim_conference(
    bracket: &mut Bracket,
    league: &League,
    state: &mut SeasonState,
    atlas: &CityAtlas,
    draws: &mut DrawSequence,
) -> Result<TeamId, SimError> {
    for round in 0..3 {
        sim_round(bracket, round, league, state, atlas, draws)?;
    }
    bracket.champion().ok_or(SimError::BracketNotResolved {
        remaining: bracket.len(),
    })
}

/// Play the championship game between the two conference champions at the
/// neutral host city: no bye bonus and no home-field edge for either side.
/// The first conference's champion is the designated home side.
pub fn sim_championship(
    home_champ: TeamId,
    away_champ: TeamId,
    league: &League,
    state: &mut SeasonState,
    atlas: &CityAtlas,
    draws: &mut DrawSequence,
) -> Result<TeamId, SimError> {
    let home_odds = playoff_odds(home_champ, away_champ, league, state, atlas, false, true)?;
    let draw = draws.next_draw()?;

    let (winner, loser, winner_odds) = if draw < home_odds {
        (home_champ, away_champ, home_odds)
    } else {
        (away_champ, home_champ, 1.0 - home_odds)
    };
    state.apply_result(winner, loser, winner_odds, K_FACTOR);
    state.record_mut(winner).round = Some(PlayoffRound::Champion);
    Ok(winner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinates;
    use crate::league::fixtures;

    fn flat_atlas() -> CityAtlas {
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

    /// East-conference bracket seeded 1-7 with teams 0-6.
    fn east_bracket() -> Bracket {
        Bracket::new((1..=7u8).map(|s| (s, TeamId(s as usize - 1))))
    }

    #[test]
    fn test_round_zero_removes_three_teams_seed_one_rests() {
        let league = fixtures::league();
        let mut state = SeasonState::new(&league);
        let mut bracket = east_bracket();
        // Home sides all win: draws below any plausible odds.
        let mut draws = DrawSequence::from_draws(vec![0.0, 0.0, 0.0]);

        sim_round(&mut bracket, 0, &league, &mut state, &flat_atlas(), &mut draws).unwrap();

        assert_eq!(bracket.remaining_seeds(), vec![1, 2, 3, 4]);
        assert_eq!(state.record(TeamId(0)).round, None, "bye team played no game");
        assert_eq!(
            state.record(TeamId(1)).round,
            Some(PlayoffRound::Divisional)
        );
    }

    #[test]
    fn test_reseeding_pairs_extremes() {
        let league = fixtures::league();
        let mut state = SeasonState::new(&league);
        let mut bracket = east_bracket();
        // Round 0: seeds 7, 6, 5 upset their hosts (draws above the odds).
        let mut draws = DrawSequence::from_draws(vec![1.0, 1.0, 1.0, 0.0, 0.0]);
        sim_round(&mut bracket, 0, &league, &mut state, &flat_atlas(), &mut draws).unwrap();
        assert_eq!(bracket.remaining_seeds(), vec![1, 5, 6, 7]);

        // Round 1 must pair 1v7 and 5v6; home sides win.
        sim_round(&mut bracket, 1, &league, &mut state, &flat_atlas(), &mut draws).unwrap();
        assert_eq!(bracket.remaining_seeds(), vec![1, 5]);
        assert_eq!(
            state.record(TeamId(0)).round,
            Some(PlayoffRound::Conference)
        );
    }

    #[test]
    fn test_conference_plays_down_to_one() {
        let league = fixtures::league();
        let mut state = SeasonState::new(&league);
        let mut bracket = east_bracket();
        let mut draws = DrawSequence::from_draws(vec![0.0; 6]);

        let champ =
            sim_conference(&mut bracket, &league, &mut state, &flat_atlas(), &mut draws).unwrap();

        assert_eq!(bracket.len(), 1);
        assert_eq!(champ, TeamId(0), "all home wins leave seed 1 standing");
        assert_eq!(draws.remaining(), 0, "a 7-team bracket is exactly 6 games");
        assert_eq!(
            state.record(champ).round,
            Some(PlayoffRound::Championship)
        );
    }

    #[test]
    fn test_championship_single_winner() {
        let league = fixtures::league();
        let mut state = SeasonState::new(&league);
        let mut draws = DrawSequence::from_draws(vec![0.9]);
        let before = state.rating(TeamId(16));

        let winner = sim_championship(
            TeamId(0),
            TeamId(16),
            &league,
            &mut state,
            &flat_atlas(),
            &mut draws,
        )
        .unwrap();

        // Equal teams at a neutral site: 0.9 >= 0.5, away side wins.
        assert_eq!(winner, TeamId(16));
        assert_eq!(state.record(winner).round, Some(PlayoffRound::Champion));
        assert!(state.rating(TeamId(16)) > before);
    }

    #[test]
    fn test_empty_bracket_reports_unresolved() {
        let league = fixtures::league();
        let mut state = SeasonState::new(&league);
        let mut bracket = Bracket::new(std::iter::empty());
        let mut draws = DrawSequence::from_draws(vec![0.0; 6]);

        let result =
            sim_conference(&mut bracket, &league, &mut state, &flat_atlas(), &mut draws);
        assert!(matches!(
            result,
            Err(SimError::BracketNotResolved { remaining: 0 })
        ));
    }
}
