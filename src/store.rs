//! Input/output collaborators: team, schedule, and coordinate loading plus
//! the projection sink. The core consumes only the narrow traits here;
//! file-backed JSON implementations make the binary runnable.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::aggregate::ProjectionRecord;
use crate::error::SimError;
use crate::geo::{CityAtlas, Coordinates};
use crate::league::League;
use crate::schedule::{Schedule, ScheduledGame};
use crate::team::Team;

/// Read-only team source, queried once at startup.
pub trait TeamStore {
    fn load_teams(&self) -> Result<Vec<Team>, SimError>;
}

/// Read-only coordinate source keyed by city name.
pub trait CityProvider {
    fn load_atlas(&self) -> Result<CityAtlas, SimError>;
}

/// Read-only source of incomplete scheduled games.
pub trait ScheduleStore {
    fn load_schedule(&self, league: &League) -> Result<Schedule, SimError>;
}

/// Destination for projection records. Writing for a target week replaces
/// any prior records for that week, so re-runs are idempotent.
pub trait ResultSink {
    fn write(&mut self, target_week: u32, records: &[ProjectionRecord]) -> Result<(), SimError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct CitySpec {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct GameSpec {
    week: u32,
    home: String,
    away: String,
    venue: String,
    #[serde(default)]
    neutral_site: bool,
    #[serde(default)]
    home_off_bye: bool,
    #[serde(default)]
    away_off_bye: bool,
    #[serde(default)]
    complete: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct LeagueFile {
    teams: Vec<Team>,
    cities: Vec<CitySpec>,
    games: Vec<GameSpec>,
}

/// All three input collaborators backed by a single JSON league file.
pub struct JsonLeagueStore {
    file: LeagueFile,
}

impl JsonLeagueStore {
    pub fn open(path: &Path) -> Result<Self, SimError> {
        let raw = fs::read_to_string(path)?;
        let file: LeagueFile = serde_json::from_str(&raw)?;
        Ok(JsonLeagueStore { file })
    }
}

impl TeamStore for JsonLeagueStore {
    fn load_teams(&self) -> Result<Vec<Team>, SimError> {
        Ok(self.file.teams.clone())
    }
}

impl CityProvider for JsonLeagueStore {
    fn load_atlas(&self) -> Result<CityAtlas, SimError> {
        let mut coordinates = HashMap::new();
        for city in &self.file.cities {
            coordinates.insert(
                city.name.clone(),
                Coordinates {
                    latitude: city.latitude,
                    longitude: city.longitude,
                },
            );
        }
        Ok(CityAtlas::new(coordinates))
    }
}

impl ScheduleStore for JsonLeagueStore {
    /// Completed games carry no uncertainty and are excluded from the slate.
    fn load_schedule(&self, league: &League) -> Result<Schedule, SimError> {
        let mut games = Vec::new();
        for spec in self.file.games.iter().filter(|g| !g.complete) {
            games.push(ScheduledGame {
                week: spec.week,
                home: league.id_of(&spec.home)?,
                away: league.id_of(&spec.away)?,
                venue: spec.venue.clone(),
                neutral_site: spec.neutral_site,
                home_off_bye: spec.home_off_bye,
                away_off_bye: spec.away_off_bye,
            });
        }
        Ok(Schedule::new(games))
    }
}

/// JSON-file projection sink with idempotent per-week writes.
pub struct JsonResultSink {
    path: PathBuf,
}

impl JsonResultSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonResultSink { path: path.into() }
    }

    pub fn read_all(&self) -> Result<Vec<ProjectionRecord>, SimError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl ResultSink for JsonResultSink {
    fn write(&mut self, target_week: u32, records: &[ProjectionRecord]) -> Result<(), SimError> {
        let mut all = self.read_all()?;
        all.retain(|r| r.target_week != target_week);
        all.extend(records.iter().cloned());
        fs::write(&self.path, serde_json::to_string_pretty(&all)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(team: &str, target_week: u32) -> ProjectionRecord {
        ProjectionRecord {
            team: team.to_string(),
            trials: 10,
            mean: 8.5,
            median: 9.0,
            first_quartile: 7.0,
            third_quartile: 10.0,
            stdev: 1.5,
            playoffs: 0.4,
            won_division: 0.2,
            won_conference: 0.1,
            won_championship: 0.05,
            top_seed: 0.05,
            target_week,
            is_custom: false,
        }
    }

    fn league_json() -> String {
        let mut teams = Vec::new();
        let mut cities = Vec::new();
        for i in 0..32 {
            let conference = if i < 16 { "East" } else { "West" };
            teams.push(serde_json::json!({
                "name": format!("Team {i:02}"),
                "rating": 1500.0,
                "city": format!("City {i:02}"),
                "division": format!("{} {}", conference, i / 4 % 4 + 1),
                "conference": conference,
            }));
            cities.push(serde_json::json!({
                "name": format!("City {i:02}"),
                "latitude": 40.0,
                "longitude": -90.0 - i as f64,
            }));
        }
        let games = vec![
            serde_json::json!({
                "week": 1, "home": "Team 00", "away": "Team 16",
                "venue": "City 00"
            }),
            serde_json::json!({
                "week": 1, "home": "Team 01", "away": "Team 17",
                "venue": "City 01", "complete": true
            }),
        ];
        serde_json::json!({ "teams": teams, "cities": cities, "games": games }).to_string()
    }

    #[test]
    fn test_json_store_loads_league_and_schedule() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("league.json");
        std::fs::write(&path, league_json()).unwrap();

        let store = JsonLeagueStore::open(&path).unwrap();
        let league = League::new(store.load_teams().unwrap()).unwrap();
        let atlas = store.load_atlas().unwrap();
        let schedule = store.load_schedule(&league).unwrap();

        assert_eq!(league.len(), 32);
        assert_eq!(atlas.len(), 32);
        // The completed game is filtered out.
        assert_eq!(schedule.game_count(), 1);
        assert!(!schedule.week(1)[0].neutral_site);
    }

    #[test]
    fn test_schedule_with_unknown_team_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("league.json");
        let mut raw: serde_json::Value = serde_json::from_str(&league_json()).unwrap();
        raw["games"][0]["home"] = serde_json::json!("Team 99");
        std::fs::write(&path, raw.to_string()).unwrap();

        let store = JsonLeagueStore::open(&path).unwrap();
        let league = League::new(store.load_teams().unwrap()).unwrap();
        assert!(matches!(
            store.load_schedule(&league),
            Err(SimError::UnknownTeam(_))
        ));
    }

    #[test]
    fn test_sink_replaces_same_week_records() {
        let dir = tempdir().unwrap();
        let mut sink = JsonResultSink::new(dir.path().join("projections.json"));

        sink.write(3, &[record("Team 00", 3), record("Team 01", 3)])
            .unwrap();
        sink.write(4, &[record("Team 00", 4)]).unwrap();
        // Re-run of week 3 replaces the earlier week-3 rows only.
        sink.write(3, &[record("Team 02", 3)]).unwrap();

        let all = sink.read_all().unwrap();
        let week3: Vec<_> = all.iter().filter(|r| r.target_week == 3).collect();
        let week4: Vec<_> = all.iter().filter(|r| r.target_week == 4).collect();
        assert_eq!(week3.len(), 1);
        assert_eq!(week3[0].team, "Team 02");
        assert_eq!(week4.len(), 1);
    }
}
