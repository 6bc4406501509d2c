//! League tie-break rules.
//!
//! Two entry points: [`division_champion`] picks a single champion out of a
//! division, and [`resolve_order`] turns a group of teams tied on win total
//! into a strict order for seeding. Both fall back to uniform randomness
//! only after every rule is exhausted; a genuinely circular tie is expected
//! domain behavior, not an error. All randomness flows through the caller's
//! RNG handle so outcomes are reproducible under a fixed seed.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::state::SeasonState;
use crate::team::TeamId;

/// Pick the division champion.
///
/// `division` must be pre-sorted descending by total wins; every team tied
/// with the leader enters the tie-break.
pub fn division_champion<R: Rng>(
    division: &[TeamId],
    state: &SeasonState,
    rng: &mut R,
) -> TeamId {
    let top_wins = state.record(division[0]).total_wins;
    let tied: Vec<TeamId> = division
        .iter()
        .copied()
        .filter(|&t| state.record(t).total_wins == top_wins)
        .collect();
    break_division_tie(tied, state, rng)
}

/// Division tie-break stages, restarting from the first stage whenever a
/// stage strictly narrows the tied set: (1) head-to-head net score among the
/// tied teams, (2) division wins, (3) conference wins, (4) random choice.
fn break_division_tie<R: Rng>(tied: Vec<TeamId>, state: &SeasonState, rng: &mut R) -> TeamId {
    if tied.len() == 1 {
        return tied[0];
    }
    let original = tied.len();

    let narrowed = narrow_by_max(&tied, |team| {
        tied.iter()
            .filter(|&&other| other != team)
            .map(|&other| state.net_versus(team, other))
            .sum()
    });
    if narrowed.len() < original {
        return break_division_tie(narrowed, state, rng);
    }

    let narrowed = narrow_by_max(&tied, |t| i64::from(state.record(t).division_wins));
    if narrowed.len() < original {
        return break_division_tie(narrowed, state, rng);
    }

    let narrowed = narrow_by_max(&tied, |t| i64::from(state.record(t).conference_wins));
    if narrowed.len() < original {
        return break_division_tie(narrowed, state, rng);
    }

    tied[rng.gen_range(0..tied.len())]
}

/// Keep the teams whose key equals the group maximum, preserving order.
fn narrow_by_max(tied: &[TeamId], key: impl Fn(TeamId) -> i64) -> Vec<TeamId> {
    let scores: Vec<i64> = tied.iter().map(|&t| key(t)).collect();
    let best = scores.iter().copied().max().unwrap_or(0);
    tied.iter()
        .zip(&scores)
        .filter(|(_, &s)| s == best)
        .map(|(&t, _)| t)
        .collect()
}

/// Resolve a group of teams tied on win total into a strict order.
///
/// Sweep rule first: a unique team that beat every other tied team and lost
/// to none ranks first; a unique team that lost to every other and beat none
/// ranks last; teams in between keep their input order. When no sweep
/// applies, the group is re-sorted by conference wins and split into
/// sub-ties: a sub-tie still covering the whole group is broken by a random
/// permutation, otherwise each sub-tie is resolved recursively.
pub fn resolve_order<R: Rng>(tie: &[TeamId], state: &SeasonState, rng: &mut R) -> Vec<TeamId> {
    if tie.len() <= 1 {
        return tie.to_vec();
    }

    let mut sweeper = None;
    let mut swept = None;
    for &team in tie {
        let (did_sweep, was_swept) = sweep_status(team, tie, state);
        if did_sweep {
            sweeper = Some(team);
        }
        if was_swept {
            swept = Some(team);
        }
    }

    match (sweeper, swept) {
        (Some(first), Some(last)) => {
            let mut order = vec![first];
            order.extend(tie.iter().copied().filter(|&t| t != first && t != last));
            order.push(last);
            order
        }
        (Some(first), None) => {
            let mut order = vec![first];
            order.extend(tie.iter().copied().filter(|&t| t != first));
            order
        }
        (None, Some(last)) => {
            let mut order: Vec<TeamId> = tie.iter().copied().filter(|&t| t != last).collect();
            order.push(last);
            order
        }
        (None, None) => {
            let mut by_conf = tie.to_vec();
            by_conf.sort_by_key(|&t| std::cmp::Reverse(state.record(t).conference_wins));
            let groups = group_ties(&by_conf, false, |t| {
                i64::from(state.record(t).conference_wins)
            });
            if groups.len() == 1 {
                by_conf.shuffle(rng);
                return by_conf;
            }
            groups
                .iter()
                .flat_map(|group| resolve_order(group, state, rng))
                .collect()
        }
    }
}

/// Whether `team` swept (beat all, lost to none) or was swept by the other
/// tied teams. A team that never played one of the others is neither.
fn sweep_status(team: TeamId, tie: &[TeamId], state: &SeasonState) -> (bool, bool) {
    let rec = state.record(team);
    let others = tie.iter().filter(|&&t| t != team);

    let mut did_sweep = true;
    let mut was_swept = true;
    for &other in others {
        let beat = rec.beaten.contains(&other);
        let lost = rec.lost_to.contains(&other);
        did_sweep &= beat && !lost;
        was_swept &= !beat && lost;
    }
    (did_sweep, was_swept)
}

/// Split a pre-sorted team list into runs with equal key values.
///
/// For wildcard grouping, scanning stops once three non-tied boundaries have
/// been crossed; only the top wildcard slots matter, so deeper groups are
/// never resolved.
pub fn group_ties(
    teams: &[TeamId],
    wildcard: bool,
    key: impl Fn(TeamId) -> i64,
) -> Vec<Vec<TeamId>> {
    let mut groups = Vec::new();
    let mut current = vec![teams[0]];
    let mut current_key = key(teams[0]);
    let mut scanned = 0usize;

    for &team in &teams[1..] {
        scanned += 1;
        if key(team) == current_key {
            current.push(team);
        } else {
            groups.push(current);
            if wildcard && scanned >= 3 {
                return groups;
            }
            current = vec![team];
            current_key = key(team);
        }
    }
    groups.push(current);
    groups
}
