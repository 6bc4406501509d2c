use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Distribution, Median, OrderStatistics};

use crate::error::SimError;
use crate::league::League;
use crate::season::TrialOutcome;

/// Final per-team projection across all trials: win-total distribution plus
/// outcome frequencies, tagged with the run configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRecord {
    pub team: String,
    pub trials: usize,
    pub mean: f64,
    pub median: f64,
    pub first_quartile: f64,
    pub third_quartile: f64,
    pub stdev: f64,
    pub playoffs: f64,
    pub won_division: f64,
    pub won_conference: f64,
    pub won_championship: f64,
    pub top_seed: f64,
    pub target_week: u32,
    pub is_custom: bool,
}

/// Running per-team tallies, merged across trials.
#[derive(Clone, Debug, Default)]
struct TeamTally {
    win_samples: Vec<f64>,
    playoffs: usize,
    won_division: usize,
    won_conference: usize,
    won_championship: usize,
    top_seed: usize,
}

/// Fold trial outcomes into one projection record per team.
///
/// Fails with [`SimError::NoTrials`] rather than emitting NaN statistics
/// when no trials ran.
pub fn summarize(
    league: &League,
    outcomes: &[TrialOutcome],
    target_week: u32,
    is_custom: bool,
) -> Result<Vec<ProjectionRecord>, SimError> {
    if outcomes.is_empty() {
        return Err(SimError::NoTrials);
    }

    let trials = outcomes.len();
    let mut tallies = vec![TeamTally::default(); league.len()];
    for outcome in outcomes {
        for (tally, result) in tallies.iter_mut().zip(&outcome.teams) {
            tally.win_samples.push(f64::from(result.wins));
            tally.playoffs += usize::from(result.made_playoffs);
            tally.won_division += usize::from(result.won_division);
            tally.won_conference += usize::from(result.won_conference);
            tally.won_championship += usize::from(result.won_championship);
            tally.top_seed += usize::from(result.top_seed);
        }
    }

    let frac = |count: usize| count as f64 / trials as f64;
    let records = league
        .teams()
        .zip(tallies)
        .map(|((_, team), tally)| {
            let mut samples = Data::new(tally.win_samples);
            ProjectionRecord {
                team: team.name.clone(),
                trials,
                mean: samples.mean().unwrap_or(0.0),
                median: samples.median(),
                first_quartile: samples.lower_quartile(),
                third_quartile: samples.upper_quartile(),
                stdev: samples.std_dev().unwrap_or(0.0),
                playoffs: frac(tally.playoffs),
                won_division: frac(tally.won_division),
                won_conference: frac(tally.won_conference),
                won_championship: frac(tally.won_championship),
                top_seed: frac(tally.top_seed),
                target_week,
                is_custom,
            }
        })
        .collect();
    Ok(records)
}
