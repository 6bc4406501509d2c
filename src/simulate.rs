use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::aggregate::{summarize, ProjectionRecord};
use crate::constants::PLAYOFF_GAME_COUNT;
use crate::error::SimError;
use crate::geo::CityAtlas;
use crate::league::League;
use crate::schedule::Schedule;
use crate::season::{simulate_season, DrawSequence, TrialOutcome};

/// Run configuration: the only knobs that affect simulation behavior.
#[derive(Clone, Copy, Debug)]
pub struct SimConfig {
    /// Number of season trials.
    pub trials: usize,
    /// Week label attached to the emitted projections.
    pub target_week: u32,
    /// Master seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Tag emitted projections as a custom (non-scheduled) run.
    pub is_custom: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            trials: 100,
            target_week: 0,
            seed: None,
            is_custom: false,
        }
    }
}

/// Trial orchestrator: runs N independent season trials and aggregates
/// per-team projections.
pub struct Simulation<'a> {
    league: &'a League,
    schedule: &'a Schedule,
    atlas: &'a CityAtlas,
    config: SimConfig,
}

impl<'a> Simulation<'a> {
    pub fn new(
        league: &'a League,
        schedule: &'a Schedule,
        atlas: &'a CityAtlas,
        config: SimConfig,
    ) -> Self {
        Simulation {
            league,
            schedule,
            atlas,
            config,
        }
    }

    /// Uniform draws needed per trial: one per scheduled game plus the
    /// thirteen playoff games.
    pub fn draw_budget(&self) -> usize {
        self.schedule.game_count() + PLAYOFF_GAME_COUNT
    }

    /// Run all trials and fold the outcomes into projection records.
    ///
    /// Trials are independent: each owns a private ChaCha8 RNG and a
    /// pre-generated draw block derived from the master seed, so results are
    /// reproducible for a fixed seed regardless of how rayon schedules the
    /// work. Partial outcomes are collected and merged after the last trial.
    pub fn run(&self) -> Result<Vec<ProjectionRecord>, SimError> {
        if self.config.trials == 0 {
            return Err(SimError::NoTrials);
        }

        let mut master = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let trial_seeds: Vec<u64> = (0..self.config.trials).map(|_| master.gen()).collect();
        let budget = self.draw_budget();
        info!(
            trials = self.config.trials,
            draw_budget = budget,
            target_week = self.config.target_week,
            "starting season simulation"
        );

        let outcomes: Vec<TrialOutcome> = trial_seeds
            .par_iter()
            .enumerate()
            .map(|(trial, &seed)| {
                let started = std::time::Instant::now();
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let mut draws = DrawSequence::pregenerate(budget, &mut rng);
                let outcome =
                    simulate_season(self.league, self.schedule, self.atlas, &mut draws, &mut rng)?;
                debug!(trial, elapsed_ms = started.elapsed().as_millis() as u64, "trial done");
                Ok(outcome)
            })
            .collect::<Result<_, SimError>>()?;

        let records = summarize(
            self.league,
            &outcomes,
            self.config.target_week,
            self.config.is_custom,
        )?;
        info!(teams = records.len(), "simulation complete");
        Ok(records)
    }
}
