use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde::Serialize;

use crate::model::{H2HEntry, H2HSummaryRow, MatchResult, Standing, Team, TeamStatsRow};

const SHEET_NAME: &str = "Data";

pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    fn as_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
        }
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<u32> for Cell {
    fn from(n: u32) -> Self {
        Cell::Number(f64::from(n))
    }
}

impl From<i32> for Cell {
    fn from(n: i32) -> Self {
        Cell::Number(f64::from(n))
    }
}

/// A record that can be written as one spreadsheet/CSV row.
///
/// `HEADERS` uses the same names as the serde fields so the CSV, JSON and
/// XLSX outputs line up.
pub trait ExportRecord: Serialize {
    const HEADERS: &'static [&'static str];
    fn cells(&self) -> Vec<Cell>;
}

#[derive(Debug, Clone)]
pub struct ExportReport {
    pub rows: usize,
    pub csv: PathBuf,
    pub json: PathBuf,
    pub xlsx: PathBuf,
}

/// Writes records as `<label>.csv`, `<label>.json` and `<label>.xlsx` under one directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    dir: PathBuf,
}

impl Exporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn export<T: ExportRecord>(&self, records: &[T], label: &str) -> Result<ExportReport> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir {}", self.dir.display()))?;
        let stem = file_stem(label);

        let csv = self.dir.join(format!("{stem}.csv"));
        write_csv(&csv, records)?;
        let json = self.dir.join(format!("{stem}.json"));
        write_json(&json, records)?;
        let xlsx = self.dir.join(format!("{stem}.xlsx"));
        write_xlsx(&xlsx, records)?;

        info!(
            "exported {} rows to {} (.csv/.json/.xlsx)",
            records.len(),
            self.dir.join(&stem).display()
        );
        Ok(ExportReport {
            rows: records.len(),
            csv,
            json,
            xlsx,
        })
    }
}

/// File-system safe version of an export label. Spaces and accents are kept.
pub fn file_stem(label: &str) -> String {
    let cleaned: String = label
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim_matches('.').trim();
    if cleaned.is_empty() {
        "export".to_string()
    } else {
        cleaned.to_string()
    }
}

fn write_csv<T: ExportRecord>(path: &Path, records: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("open csv {}", path.display()))?;
    writer
        .write_record(T::HEADERS)
        .context("write csv header")?;
    for record in records {
        let row: Vec<String> = record.cells().iter().map(Cell::as_text).collect();
        writer.write_record(&row).context("write csv row")?;
    }
    writer.flush().context("flush csv")?;
    Ok(())
}

fn write_json<T: ExportRecord>(path: &Path, records: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("serialize records")?;
    fs::write(path, json).with_context(|| format!("write json {}", path.display()))?;
    Ok(())
}

fn write_xlsx<T: ExportRecord>(path: &Path, records: &[T]) -> Result<()> {
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;
        write_rows(sheet, records)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    Ok(())
}

fn write_rows<T: ExportRecord>(worksheet: &mut Worksheet, records: &[T]) -> Result<()> {
    let bold = Format::new().set_bold();
    for (col_idx, header) in T::HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col_idx as u16, *header, &bold)
            .with_context(|| format!("write header ({col_idx})"))?;
    }
    for (idx, record) in records.iter().enumerate() {
        let row_idx = (idx + 1) as u32;
        for (col_idx, cell) in record.cells().iter().enumerate() {
            let col = col_idx as u16;
            let written = match cell {
                Cell::Text(s) => worksheet.write_string(row_idx, col, s),
                Cell::Number(n) => worksheet.write_number(row_idx, col, *n),
            };
            written.with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}

impl ExportRecord for MatchResult {
    const HEADERS: &'static [&'static str] = &[
        "date",
        "home_team_id",
        "away_team_id",
        "home_team_name",
        "away_team_name",
        "home_score",
        "away_score",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.date.to_rfc3339().into(),
            self.home_team_id.into(),
            self.away_team_id.into(),
            self.home_team_name.clone().into(),
            self.away_team_name.clone().into(),
            self.home_score.into(),
            self.away_score.into(),
        ]
    }
}

impl ExportRecord for TeamStatsRow {
    const HEADERS: &'static [&'static str] = &[
        "wins",
        "draws",
        "losses",
        "matches_played",
        "team_id",
        "team_name",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.wins.into(),
            self.draws.into(),
            self.losses.into(),
            self.matches_played.into(),
            self.team_id.into(),
            self.team_name.clone().into(),
        ]
    }
}

impl ExportRecord for Team {
    const HEADERS: &'static [&'static str] = &["id", "name", "short_name", "abbreviation"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.id.into(),
            self.name.clone().into(),
            self.short_name.clone().into(),
            self.abbreviation.clone().into(),
        ]
    }
}

impl ExportRecord for Standing {
    const HEADERS: &'static [&'static str] = &[
        "position",
        "team_id",
        "team_name",
        "played_games",
        "won",
        "draw",
        "lost",
        "points",
        "goals_for",
        "goals_against",
        "goal_difference",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.position.into(),
            self.team_id.into(),
            self.team_name.clone().into(),
            self.played_games.into(),
            self.won.into(),
            self.draw.into(),
            self.lost.into(),
            self.points.into(),
            self.goals_for.into(),
            self.goals_against.into(),
            self.goal_difference.into(),
        ]
    }
}

impl ExportRecord for H2HEntry {
    const HEADERS: &'static [&'static str] = &["date", "score"];

    fn cells(&self) -> Vec<Cell> {
        vec![self.date.to_rfc3339().into(), self.score.clone().into()]
    }
}

impl ExportRecord for H2HSummaryRow {
    const HEADERS: &'static [&'static str] = &[
        "team_a_id",
        "team_a",
        "team_b_id",
        "team_b",
        "team_a_wins",
        "team_b_wins",
        "draws",
        "total_matches",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.team_a_id.into(),
            self.team_a.clone().into(),
            self.team_b_id.into(),
            self.team_b.clone().into(),
            self.team_a_wins.into(),
            self.team_b_wins.into(),
            self.draws.into(),
            self.total_matches.into(),
        ]
    }
}
