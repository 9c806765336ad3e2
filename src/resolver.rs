use difflib::sequencematcher::SequenceMatcher;

use crate::config::{Config, DEFAULT_MATCH_THRESHOLD};
use crate::error::FootballError;
use crate::model::{Team, UNKNOWN_TEAM};

/// Resolves free-text team queries against a fetched catalog.
#[derive(Debug, Clone, Copy)]
pub struct TeamResolver {
    threshold: f64,
}

impl Default for TeamResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_THRESHOLD)
    }
}

impl TeamResolver {
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_finite() {
            threshold.clamp(0.0, 1.0)
        } else {
            DEFAULT_MATCH_THRESHOLD
        };
        Self { threshold }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.match_threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Closest catalog team by name similarity, if it clears the threshold.
    pub fn resolve(&self, query: &str, catalog: &[Team]) -> Result<Team, FootballError> {
        self.resolve_scored(query, catalog).map(|(team, _)| team)
    }

    /// Like [`resolve`](Self::resolve), also returning the winning score.
    pub fn resolve_scored(
        &self,
        query: &str,
        catalog: &[Team],
    ) -> Result<(Team, f64), FootballError> {
        match best_candidate(query, catalog) {
            Some((team, score)) if score >= self.threshold => Ok((team.clone(), score)),
            _ => Err(FootballError::NotFound(query.trim().to_string())),
        }
    }
}

/// Highest-scoring team for `query` with its score, ignoring any threshold.
/// Equal scores keep the earlier catalog entry.
pub fn best_candidate<'a>(query: &str, catalog: &'a [Team]) -> Option<(&'a Team, f64)> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    let query: Vec<char> = query.chars().collect();

    let mut best: Option<(&Team, f64)> = None;
    for team in catalog {
        let name: Vec<char> = team.name.chars().collect();
        let score = ratio(&name, &query);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((team, score)),
        }
    }
    best
}

/// Catalog name for `id`, or the "Unknown Team" sentinel.
pub fn team_name(id: u32, catalog: &[Team]) -> String {
    catalog
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| UNKNOWN_TEAM.to_string())
}

/// Ratcliff/Obershelp similarity of `query` against a `candidate` name, in `[0, 1]`.
///
/// Not symmetric: matching blocks are searched with the candidate as the first
/// sequence, so ties between equally long blocks go to the earliest position in
/// the candidate.
pub fn similarity(candidate: &str, query: &str) -> f64 {
    let candidate: Vec<char> = candidate.chars().collect();
    let query: Vec<char> = query.chars().collect();
    ratio(&candidate, &query)
}

fn ratio(candidate: &[char], query: &[char]) -> f64 {
    let total = candidate.len() + query.len();
    if total == 0 {
        return 1.0;
    }
    let mut matcher = SequenceMatcher::new(candidate, query);
    let matched: usize = matcher
        .get_matching_blocks()
        .iter()
        .map(|block| block.size)
        .sum();
    2.0 * matched as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: u32, name: &str) -> Team {
        Team {
            id,
            name: name.to_string(),
            short_name: name.to_string(),
            abbreviation: String::new(),
        }
    }

    #[test]
    fn ratio_matches_known_values() {
        assert_eq!(similarity("abcd", "abcd"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("", "abc"), 0.0);
        // "Barc" + "a" out of 12 + 5 chars.
        assert!((similarity("FC Barcelona", "Barca") - 10.0 / 17.0).abs() < 1e-9);
        assert!((similarity("bcde", "abcd") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn candidate_is_the_first_sequence() {
        // Searching the query first would match "Val" + "c" + "a" (0.60) here.
        assert!((similarity("Valencia CF", "Vallecano") - 0.5).abs() < 1e-9);
        assert!((similarity("Rayo Vallecano de Madrid", "Vallecano") - 18.0 / 33.0).abs() < 1e-9);
    }

    #[test]
    fn scored_resolution_reports_winning_score() {
        let catalog = vec![team(1, "Girona FC"), team(2, "Getafe CF")];
        let (hit, score) = TeamResolver::default()
            .resolve_scored("Girona", &catalog)
            .unwrap();
        assert_eq!(hit.id, 1);
        assert!((score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let catalog = vec![team(1, "Abc"), team(2, "Abc")];
        let (hit, _) = best_candidate("Abc", &catalog).unwrap();
        assert_eq!(hit.id, 1);
    }

    #[test]
    fn blank_query_is_not_found() {
        let catalog = vec![team(1, "Girona FC")];
        let err = TeamResolver::default().resolve("   ", &catalog).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn threshold_is_clamped() {
        assert_eq!(TeamResolver::new(4.0).threshold(), 1.0);
        assert_eq!(TeamResolver::new(f64::NAN).threshold(), 0.3);
    }
}
