//! Report, compare and search flows shared by the CLI and the HTTP service.
//!
//! Dates are validated before the first request goes out, so bad input never
//! costs a network round-trip.

use anyhow::{Context, Result};
use log::info;

use crate::aggregate::{aggregate_h2h, aggregate_single};
use crate::dates::DateRange;
use crate::error::FootballError;
use crate::football_data::DataSource;
use crate::model::{H2HResult, MatchResult, Team, TeamStats, TeamStatsRow, UNKNOWN_TEAM};
use crate::resolver::{team_name, TeamResolver};

/// A team given either by upstream id or by (possibly misspelled) name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamRef {
    Id(u32),
    Name(String),
}

impl TeamRef {
    /// All-digit input is an id; anything else is a name query.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<u32>() {
            Ok(id) => TeamRef::Id(id),
            Err(_) => TeamRef::Name(trimmed.to_string()),
        }
    }
}

/// What to do with a numeric id that is missing from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownId {
    /// Carry on under the "Unknown Team" label.
    Sentinel,
    Reject,
}

#[derive(Debug, Clone)]
pub struct ReportRequest<'a> {
    pub team: &'a str,
    pub date_from: Option<&'a str>,
    pub date_to: Option<&'a str>,
    pub unknown_id: UnknownId,
}

#[derive(Debug, Clone)]
pub struct CompareRequest<'a> {
    pub team1: &'a str,
    pub team2: &'a str,
    pub date_from: Option<&'a str>,
    pub date_to: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct TeamReport {
    pub team_id: u32,
    pub team_name: String,
    pub range: DateRange,
    pub matches: Vec<MatchResult>,
    pub stats: TeamStats,
}

impl TeamReport {
    pub fn stats_row(&self) -> TeamStatsRow {
        TeamStatsRow::new(self.stats, self.team_id, self.team_name.clone())
    }
}

pub fn search<S: DataSource + ?Sized>(
    source: &S,
    resolver: &TeamResolver,
    query: &str,
) -> Result<(Team, f64)> {
    let catalog = source.fetch_teams().context("failed to load team catalog")?;
    Ok(resolver.resolve_scored(query, &catalog)?)
}

pub fn team_report<S: DataSource + ?Sized>(
    source: &S,
    resolver: &TeamResolver,
    req: &ReportRequest<'_>,
) -> Result<TeamReport> {
    let range = DateRange::parse(req.date_from, req.date_to)?;
    let team_ref = TeamRef::parse(req.team);
    if let TeamRef::Name(name) = &team_ref {
        if name.is_empty() {
            return Err(FootballError::InvalidInput("team must not be empty".to_string()).into());
        }
    }

    let catalog = source.fetch_teams().context("failed to load team catalog")?;
    let (team_id, team_name) = match team_ref {
        TeamRef::Id(id) => {
            let name = team_name(id, &catalog);
            if name == UNKNOWN_TEAM && req.unknown_id == UnknownId::Reject {
                return Err(FootballError::NotFound(id.to_string()).into());
            }
            (id, name)
        }
        TeamRef::Name(query) => {
            let team = resolver.resolve(&query, &catalog)?;
            info!("resolved '{query}' to {} ({})", team.name, team.id);
            (team.id, team.name)
        }
    };

    let matches = source
        .fetch_matches(team_id, &range)
        .with_context(|| format!("failed to load matches for team {team_id}"))?;
    let stats = aggregate_single(&matches, team_id);
    Ok(TeamReport {
        team_id,
        team_name,
        range,
        matches,
        stats,
    })
}

/// Resolves both names and aggregates team one's finished matches against team two.
pub fn compare<S: DataSource + ?Sized>(
    source: &S,
    resolver: &TeamResolver,
    req: &CompareRequest<'_>,
) -> Result<H2HResult> {
    let range = DateRange::parse(req.date_from, req.date_to)?;
    let catalog = source.fetch_teams().context("failed to load team catalog")?;
    let team_a = resolver.resolve(req.team1, &catalog)?;
    let team_b = resolver.resolve(req.team2, &catalog)?;
    info!("comparing {} ({}) with {} ({})", team_a.name, team_a.id, team_b.name, team_b.id);

    let matches = source
        .fetch_matches(team_a.id, &range)
        .with_context(|| format!("failed to load matches for team {}", team_a.id))?;
    Ok(aggregate_h2h(&matches, &team_a, &team_b))
}
