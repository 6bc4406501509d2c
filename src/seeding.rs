use rand::Rng;

use crate::constants::WILDCARD_SEED_BASE;
use crate::state::SeasonState;
use crate::team::TeamId;
use crate::tiebreak::{group_ties, resolve_order};

/// Order a group of teams into playoff seed slots.
///
/// `teams` must be pre-sorted descending by total wins. Consecutive win-total
/// ties are resolved through the tie-break rules and the groups concatenated;
/// division winners take seeds 1-4, wildcards seeds 5 upward. Callers keep
/// only the top three wildcards.
pub fn assign_seeds<R: Rng>(
    teams: &[TeamId],
    wildcard: bool,
    state: &mut SeasonState,
    rng: &mut R,
) -> Vec<TeamId> {
    let groups = group_ties(teams, wildcard, |t| i64::from(state.record(t).total_wins));

    let mut ordered = Vec::with_capacity(teams.len());
    for group in &groups {
        ordered.extend(resolve_order(group, state, rng));
    }

    let base = if wildcard { WILDCARD_SEED_BASE } else { 1 };
    for (position, &team) in ordered.iter().enumerate() {
        state.record_mut(team).seed = Some(base + position as u8);
    }
    ordered
}
