use chrono::NaiveDate;

use crate::error::FootballError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Optional inclusive `dateFrom`/`dateTo` bounds for a match fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Validates user-supplied bounds. Blank strings count as absent.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self, FootballError> {
        let from = from.and_then(non_empty).map(parse_date).transpose()?;
        let to = to.and_then(non_empty).map(parse_date).transpose()?;
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err(FootballError::InvalidInput(format!(
                    "start date {f} is after end date {t}"
                )));
            }
        }
        Ok(Self { from, to })
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn date_from(&self) -> Option<String> {
        self.from.map(format_date)
    }

    pub fn date_to(&self) -> Option<String> {
        self.to.map(format_date)
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, FootballError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        FootballError::InvalidInput(format!(
            "invalid date '{}', please use YYYY-MM-DD",
            raw.trim()
        ))
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}
