use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const UNKNOWN_TEAM: &str = "Unknown Team";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub short_name: String,
    /// Three-letter code (football-data's `tla`).
    pub abbreviation: String,
}

/// A finished match as seen from the gateway; scores are full-time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub date: DateTime<Utc>,
    pub home_team_id: u32,
    pub away_team_id: u32,
    pub home_team_name: String,
    pub away_team_name: String,
    pub home_score: u32,
    pub away_score: u32,
}

impl MatchResult {
    /// `(goals_for, goals_against)` for the given team, or None when it did not play.
    pub fn goals_for_against(&self, team_id: u32) -> Option<(u32, u32)> {
        if team_id == self.home_team_id {
            Some((self.home_score, self.away_score))
        } else if team_id == self.away_team_id {
            Some((self.away_score, self.home_score))
        } else {
            None
        }
    }

    pub fn is_between(&self, a: u32, b: u32) -> bool {
        (self.home_team_id == a && self.away_team_id == b)
            || (self.home_team_id == b && self.away_team_id == a)
    }

    pub fn formatted_score(&self) -> String {
        format!(
            "{} {} - {} {}",
            self.home_team_name, self.home_score, self.away_score, self.away_team_name
        )
    }
}

/// Win/draw/loss counters; `matches_played` always equals their sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeamStats {
    wins: u32,
    draws: u32,
    losses: u32,
    matches_played: u32,
}

impl TeamStats {
    pub fn from_counts(wins: u32, draws: u32, losses: u32) -> Self {
        Self {
            wins,
            draws,
            losses,
            matches_played: wins + draws + losses,
        }
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    pub fn matches_played(&self) -> u32 {
        self.matches_played
    }
}

/// Stats as exported: the counters plus the team they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStatsRow {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub matches_played: u32,
    pub team_id: u32,
    pub team_name: String,
}

impl TeamStatsRow {
    pub fn new(stats: TeamStats, team_id: u32, team_name: impl Into<String>) -> Self {
        Self {
            wins: stats.wins(),
            draws: stats.draws(),
            losses: stats.losses(),
            matches_played: stats.matches_played(),
            team_id,
            team_name: team_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct H2HEntry {
    pub date: DateTime<Utc>,
    pub score: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct H2HResult {
    pub team_a: Team,
    pub team_b: Team,
    pub team_a_wins: u32,
    pub team_b_wins: u32,
    pub draws: u32,
    pub total_matches: u32,
    pub history: Vec<H2HEntry>,
}

impl H2HResult {
    pub fn label(&self) -> String {
        format!("{} vs {}", self.team_a.name, self.team_b.name)
    }
}

/// Flat summary of an [`H2HResult`] for tabular export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct H2HSummaryRow {
    pub team_a_id: u32,
    pub team_a: String,
    pub team_b_id: u32,
    pub team_b: String,
    pub team_a_wins: u32,
    pub team_b_wins: u32,
    pub draws: u32,
    pub total_matches: u32,
}

impl From<&H2HResult> for H2HSummaryRow {
    fn from(h2h: &H2HResult) -> Self {
        Self {
            team_a_id: h2h.team_a.id,
            team_a: h2h.team_a.name.clone(),
            team_b_id: h2h.team_b.id,
            team_b: h2h.team_b.name.clone(),
            team_a_wins: h2h.team_a_wins,
            team_b_wins: h2h.team_b_wins,
            draws: h2h.draws,
            total_matches: h2h.total_matches,
        }
    }
}

/// One row of the competition table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub position: u32,
    pub team_id: u32,
    pub team_name: String,
    pub played_games: u32,
    pub won: u32,
    pub draw: u32,
    pub lost: u32,
    pub points: i32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
}

/// Win/draw/loss counts from one side's perspective; what the chart draws.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcomes {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl Outcomes {
    pub fn total(&self) -> u32 {
        self.wins + self.draws + self.losses
    }
}

impl From<&TeamStats> for Outcomes {
    fn from(stats: &TeamStats) -> Self {
        Self {
            wins: stats.wins(),
            draws: stats.draws(),
            losses: stats.losses(),
        }
    }
}

impl From<&H2HResult> for Outcomes {
    fn from(h2h: &H2HResult) -> Self {
        Self {
            wins: h2h.team_a_wins,
            draws: h2h.draws,
            losses: h2h.team_b_wins,
        }
    }
}
