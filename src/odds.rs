use crate::constants::{
    BYE_BONUS, CHAMPIONSHIP_HOST_CITY, HOME_FIELD_BONUS, PLAYOFF_INTENSITY,
    TRAVEL_PENALTY_PER_1000_MILES,
};
use crate::error::SimError;
use crate::geo::{great_circle_miles, CityAtlas};
use crate::league::League;
use crate::schedule::ScheduledGame;
use crate::state::SeasonState;
use crate::team::TeamId;

/// Logistic Elo win probability for a rating difference.
///
/// Strictly inside (0, 1) for any finite difference.
pub fn elo_win_prob(rating_diff: f64) -> f64 {
    1.0 / (10f64.powf(-rating_diff / 400.0) + 1.0)
}

/// Probability of the home team winning a regular-season game.
///
/// Rating difference is home minus away, adjusted for bye weeks (+/-25),
/// home field at a non-neutral site (+48), and travel distance from each
/// team's home city to the venue (4 Elo per 1000 miles). Pure given its
/// inputs.
pub fn regular_season_odds(
    game: &ScheduledGame,
    league: &League,
    state: &SeasonState,
    atlas: &CityAtlas,
) -> Result<f64, SimError> {
    let mut diff = state.rating(game.home) - state.rating(game.away);
    if game.home_off_bye {
        diff += BYE_BONUS;
    }
    if game.away_off_bye {
        diff -= BYE_BONUS;
    }
    if !game.neutral_site {
        diff += HOME_FIELD_BONUS;
    }
    diff += travel_adjustment(&game.venue, game.home, game.away, league, atlas)?;
    Ok(elo_win_prob(diff))
}

/// Probability of the home side winning a playoff game.
///
/// Same structure as the regular-season model, except the bye bonus comes
/// from an explicit flag, the home-field bonus is dropped for the
/// championship game (played at a fixed neutral host city), and the final
/// rating difference is scaled by 1.2: playoff games run truer to form.
pub fn playoff_odds(
    home: TeamId,
    away: TeamId,
    league: &League,
    state: &SeasonState,
    atlas: &CityAtlas,
    home_off_bye: bool,
    championship: bool,
) -> Result<f64, SimError> {
    let venue = if championship {
        CHAMPIONSHIP_HOST_CITY
    } else {
        league.team(home).city.as_str()
    };

    let mut diff = state.rating(home) - state.rating(away);
    if home_off_bye {
        diff += BYE_BONUS;
    }
    if !championship {
        diff += HOME_FIELD_BONUS;
    }
    diff += travel_adjustment(venue, home, away, league, atlas)?;
    diff *= PLAYOFF_INTENSITY;
    Ok(elo_win_prob(diff))
}

fn travel_adjustment(
    venue: &str,
    home: TeamId,
    away: TeamId,
    league: &League,
    atlas: &CityAtlas,
) -> Result<f64, SimError> {
    let venue_coords = atlas.lookup(venue)?;
    let home_coords = atlas.lookup(&league.team(home).city)?;
    let away_coords = atlas.lookup(&league.team(away).city)?;
    let home_miles = great_circle_miles(venue_coords, home_coords);
    let away_miles = great_circle_miles(venue_coords, away_coords);
    Ok((away_miles - home_miles) * TRAVEL_PENALTY_PER_1000_MILES / 1000.0)
}
