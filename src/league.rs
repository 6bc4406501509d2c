use std::collections::HashMap;

use crate::constants::{
    CONFERENCE_COUNT, DIVISIONS_PER_CONFERENCE, DIVISION_SIZE, LEAGUE_SIZE,
};
use crate::error::SimError;
use crate::team::{Team, TeamId};

/// A division: four teams within one conference.
#[derive(Clone, Debug)]
pub struct Division {
    pub name: String,
    pub conference: usize,
    pub teams: Vec<TeamId>,
}

/// A conference: four divisions, sixteen teams.
#[derive(Clone, Debug)]
pub struct Conference {
    pub name: String,
    pub divisions: Vec<usize>,
    pub teams: Vec<TeamId>,
}

/// The fixed league structure: 32 teams in 8 divisions across 2 conferences.
///
/// Validated once at startup; simulation code can rely on the shape without
/// re-checking. Division and conference membership are precomputed per team
/// so the tie-break hot path is index arithmetic only.
#[derive(Clone, Debug)]
pub struct League {
    teams: Vec<Team>,
    divisions: Vec<Division>,
    conferences: Vec<Conference>,
    division_of: Vec<usize>,
    conference_of: Vec<usize>,
    by_name: HashMap<String, TeamId>,
}

impl League {
    /// Build and validate a league from team records.
    ///
    /// Division and conference groupings follow first-appearance order of
    /// their names in `teams`, which makes the grouping deterministic for a
    /// given input file.
    pub fn new(teams: Vec<Team>) -> Result<Self, SimError> {
        if teams.len() != LEAGUE_SIZE {
            return Err(SimError::LeagueSize {
                count: teams.len(),
                expected: LEAGUE_SIZE,
            });
        }

        let mut by_name = HashMap::new();
        for (i, team) in teams.iter().enumerate() {
            if by_name.insert(team.name.clone(), TeamId(i)).is_some() {
                return Err(SimError::DuplicateTeam(team.name.clone()));
            }
        }

        let mut conferences: Vec<Conference> = Vec::new();
        let mut divisions: Vec<Division> = Vec::new();
        let mut division_of = vec![0usize; teams.len()];
        let mut conference_of = vec![0usize; teams.len()];

        for (i, team) in teams.iter().enumerate() {
            let conf_idx = match conferences.iter().position(|c| c.name == team.conference) {
                Some(idx) => idx,
                None => {
                    conferences.push(Conference {
                        name: team.conference.clone(),
                        divisions: Vec::new(),
                        teams: Vec::new(),
                    });
                    conferences.len() - 1
                }
            };

            let div_idx = match divisions.iter().position(|d| d.name == team.division) {
                Some(idx) => {
                    if divisions[idx].conference != conf_idx {
                        return Err(SimError::SplitDivision {
                            division: team.division.clone(),
                            first: conferences[divisions[idx].conference].name.clone(),
                            second: team.conference.clone(),
                        });
                    }
                    idx
                }
                None => {
                    divisions.push(Division {
                        name: team.division.clone(),
                        conference: conf_idx,
                        teams: Vec::new(),
                    });
                    conferences[conf_idx].divisions.push(divisions.len() - 1);
                    divisions.len() - 1
                }
            };

            divisions[div_idx].teams.push(TeamId(i));
            conferences[conf_idx].teams.push(TeamId(i));
            division_of[i] = div_idx;
            conference_of[i] = conf_idx;
        }

        for division in &divisions {
            if division.teams.len() != DIVISION_SIZE {
                return Err(SimError::DivisionSize {
                    name: division.name.clone(),
                    count: division.teams.len(),
                    expected: DIVISION_SIZE,
                });
            }
        }

        if conferences.len() != CONFERENCE_COUNT {
            return Err(SimError::ConferenceShape {
                name: conferences
                    .first()
                    .map(|c| c.name.clone())
                    .unwrap_or_default(),
                divisions: divisions.len(),
                teams: teams.len(),
                expected_divisions: DIVISIONS_PER_CONFERENCE,
                expected_teams: LEAGUE_SIZE / CONFERENCE_COUNT,
            });
        }
        for conference in &conferences {
            let expected_teams = LEAGUE_SIZE / CONFERENCE_COUNT;
            if conference.divisions.len() != DIVISIONS_PER_CONFERENCE
                || conference.teams.len() != expected_teams
            {
                return Err(SimError::ConferenceShape {
                    name: conference.name.clone(),
                    divisions: conference.divisions.len(),
                    teams: conference.teams.len(),
                    expected_divisions: DIVISIONS_PER_CONFERENCE,
                    expected_teams,
                });
            }
        }

        Ok(League {
            teams,
            divisions,
            conferences,
            division_of,
            conference_of,
            by_name,
        })
    }

    pub fn team(&self, id: TeamId) -> &Team {
        &self.teams[id.index()]
    }

    pub fn teams(&self) -> impl Iterator<Item = (TeamId, &Team)> {
        self.teams.iter().enumerate().map(|(i, t)| (TeamId(i), t))
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn id_of(&self, name: &str) -> Result<TeamId, SimError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| SimError::UnknownTeam(name.to_string()))
    }

    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }

    pub fn conferences(&self) -> &[Conference] {
        &self.conferences
    }

    pub fn division_of(&self, id: TeamId) -> usize {
        self.division_of[id.index()]
    }

    pub fn conference_of(&self, id: TeamId) -> usize {
        self.conference_of[id.index()]
    }

    pub fn same_division(&self, a: TeamId, b: TeamId) -> bool {
        self.division_of(a) == self.division_of(b)
    }

    pub fn same_conference(&self, a: TeamId, b: TeamId) -> bool {
        self.conference_of(a) == self.conference_of(b)
    }
}
