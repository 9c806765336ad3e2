use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::dates::DateRange;
use crate::model::{MatchResult, Standing, Team};

const AUTH_HEADER: &str = "X-Auth-Token";
const FINISHED: &str = "FINISHED";
const TOTAL_TABLE: &str = "TOTAL";

/// Read access to competition teams, team matches and the league table.
pub trait DataSource {
    fn fetch_teams(&self) -> Result<Vec<Team>>;
    /// Finished matches for `team_id`, optionally bounded by date.
    fn fetch_matches(&self, team_id: u32, range: &DateRange) -> Result<Vec<MatchResult>>;
    fn fetch_standings(&self) -> Result<Vec<Standing>>;
}

/// Blocking client for the football-data.org v4 API.
pub struct FootballData {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    competition: String,
}

impl FootballData {
    pub fn new(cfg: &Config) -> Result<Self> {
        if cfg.api_key.is_none() {
            warn!("API_KEY is not set; football-data.org will reject most requests");
        }
        let client = Client::builder()
            .timeout(cfg.request_timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            client,
            base_url: cfg.base_url.clone(),
            api_key: cfg.api_key.clone(),
            competition: cfg.competition.clone(),
        })
    }

    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url} {query:?}");
        let mut req = self.client.get(&url).query(query);
        if let Some(key) = self.api_key.as_deref() {
            req = req.header(AUTH_HEADER, key);
        }
        let resp = req.send().context("request failed")?;
        let status = resp.status();
        let body = resp.text().context("failed reading body")?;
        if !status.is_success() {
            return Err(anyhow::anyhow!("http {}: {}", status, body));
        }
        Ok(body)
    }
}

impl DataSource for FootballData {
    fn fetch_teams(&self) -> Result<Vec<Team>> {
        let path = format!("/competitions/{}/teams", self.competition);
        let body = self.get(&path, &[]).context("teams request failed")?;
        parse_teams_json(&body)
    }

    fn fetch_matches(&self, team_id: u32, range: &DateRange) -> Result<Vec<MatchResult>> {
        let mut query = vec![("status", FINISHED.to_string())];
        if let Some(from) = range.date_from() {
            query.push(("dateFrom", from));
        }
        if let Some(to) = range.date_to() {
            query.push(("dateTo", to));
        }
        let path = format!("/teams/{team_id}/matches");
        let body = self.get(&path, &query).context("matches request failed")?;
        parse_matches_json(&body)
    }

    fn fetch_standings(&self) -> Result<Vec<Standing>> {
        let path = format!("/competitions/{}/standings", self.competition);
        let body = self.get(&path, &[]).context("standings request failed")?;
        parse_standings_json(&body)
    }
}

#[derive(Debug, Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    teams: Vec<ApiTeam>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTeam {
    id: u32,
    name: String,
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    tla: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MatchesResponse {
    #[serde(default)]
    matches: Vec<ApiMatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMatch {
    #[serde(default)]
    id: Option<u64>,
    utc_date: String,
    #[serde(default)]
    status: Option<String>,
    home_team: ApiTeamRef,
    away_team: ApiTeamRef,
    score: ApiScore,
}

#[derive(Debug, Deserialize)]
struct ApiTeamRef {
    id: Option<u32>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiScore {
    #[serde(default)]
    full_time: Option<ApiScorePair>,
}

#[derive(Debug, Deserialize)]
struct ApiScorePair {
    home: Option<u32>,
    away: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct StandingsResponse {
    #[serde(default)]
    standings: Vec<ApiStandingGroup>,
}

#[derive(Debug, Deserialize)]
struct ApiStandingGroup {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    table: Vec<ApiTableRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTableRow {
    position: u32,
    team: ApiTeamRef,
    #[serde(default)]
    played_games: u32,
    #[serde(default)]
    won: u32,
    #[serde(default)]
    draw: u32,
    #[serde(default)]
    lost: u32,
    points: i32,
    #[serde(default)]
    goals_for: u32,
    #[serde(default)]
    goals_against: u32,
    #[serde(default)]
    goal_difference: i32,
}

pub fn parse_teams_json(raw: &str) -> Result<Vec<Team>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let data: TeamsResponse = serde_json::from_str(trimmed).context("invalid teams json")?;
    Ok(data
        .teams
        .into_iter()
        .map(|t| Team {
            id: t.id,
            short_name: t.short_name.unwrap_or_else(|| t.name.clone()),
            abbreviation: t.tla.unwrap_or_default(),
            name: t.name,
        })
        .collect())
}

/// Parses a `/teams/{id}/matches` body, keeping finished matches with a full-time score.
pub fn parse_matches_json(raw: &str) -> Result<Vec<MatchResult>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let data: MatchesResponse = serde_json::from_str(trimmed).context("invalid matches json")?;
    let mut out = Vec::with_capacity(data.matches.len());
    for m in data.matches {
        let id = m.id.unwrap_or_default();
        match convert_match(m) {
            Some(result) => out.push(result),
            None => warn!("skipping match {id}: not finished or missing score/team data"),
        }
    }
    Ok(out)
}

fn convert_match(m: ApiMatch) -> Option<MatchResult> {
    if m.status.as_deref().is_some_and(|s| s != FINISHED) {
        return None;
    }
    let date = DateTime::parse_from_rfc3339(&m.utc_date)
        .ok()?
        .with_timezone(&Utc);
    let full_time = m.score.full_time?;
    Some(MatchResult {
        date,
        home_team_id: m.home_team.id?,
        away_team_id: m.away_team.id?,
        home_team_name: m.home_team.name.unwrap_or_default(),
        away_team_name: m.away_team.name.unwrap_or_default(),
        home_score: full_time.home?,
        away_score: full_time.away?,
    })
}

/// Parses a standings body. Home/away split tables are dropped when the response labels them.
pub fn parse_standings_json(raw: &str) -> Result<Vec<Standing>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let data: StandingsResponse =
        serde_json::from_str(trimmed).context("invalid standings json")?;
    let mut out = Vec::new();
    for group in data.standings {
        if group.kind.as_deref().is_some_and(|k| k != TOTAL_TABLE) {
            continue;
        }
        for row in group.table {
            out.push(Standing {
                position: row.position,
                team_id: row.team.id.unwrap_or_default(),
                team_name: row.team.name.unwrap_or_default(),
                played_games: row.played_games,
                won: row.won,
                draw: row.draw,
                lost: row.lost,
                points: row.points,
                goals_for: row.goals_for,
                goals_against: row.goals_against,
                goal_difference: row.goal_difference,
            });
        }
    }
    Ok(out)
}
