//! Season projection CLI: load the league file, run N season trials, write
//! projections to the sink, and optionally export the full statistics table.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use season_sim::{
    export, CityProvider, JsonLeagueStore, JsonResultSink, League, ResultSink, ScheduleStore,
    SimConfig, SimError, Simulation, TeamStore,
};

#[derive(Parser)]
#[command(name = "season_sim")]
#[command(about = "Monte Carlo season projections", long_about = None)]
struct Cli {
    /// Number of season trials
    #[arg(short = 'n', long = "num", default_value_t = 100)]
    num: usize,

    /// Week label attached to the emitted projections
    #[arg(short = 'w', long = "week", default_value_t = 0)]
    week: u32,

    /// League data file (teams, cities, schedule)
    #[arg(long, default_value = "league.json")]
    data: PathBuf,

    /// Projection sink file
    #[arg(long, default_value = "projections.json")]
    out: PathBuf,

    /// Optional CSV export of the full statistics table
    #[arg(long)]
    export: Option<PathBuf>,

    /// Master RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Tag the projections as a custom run
    #[arg(long, default_value_t = false)]
    custom: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "run failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), SimError> {
    let store = JsonLeagueStore::open(&cli.data)?;
    let league = League::new(store.load_teams()?)?;
    let atlas = store.load_atlas()?;
    let schedule = store.load_schedule(&league)?;

    let config = SimConfig {
        trials: cli.num,
        target_week: cli.week,
        seed: cli.seed,
        is_custom: cli.custom,
    };
    let records = Simulation::new(&league, &schedule, &atlas, config).run()?;

    JsonResultSink::new(&cli.out).write(cli.week, &records)?;
    if let Some(path) = &cli.export {
        export::write_csv(path, &records)?;
    }
    Ok(())
}
