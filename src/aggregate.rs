use std::cmp::Ordering;

use crate::model::{H2HEntry, H2HResult, MatchResult, Team, TeamStats};

/// Win/draw/loss totals for one team. Matches the team did not play are skipped.
pub fn aggregate_single(matches: &[MatchResult], team_id: u32) -> TeamStats {
    let (mut wins, mut draws, mut losses) = (0u32, 0u32, 0u32);
    for m in matches {
        let Some((goals_for, goals_against)) = m.goals_for_against(team_id) else {
            continue;
        };
        match goals_for.cmp(&goals_against) {
            Ordering::Greater => wins += 1,
            Ordering::Less => losses += 1,
            Ordering::Equal => draws += 1,
        }
    }
    TeamStats::from_counts(wins, draws, losses)
}

/// Head-to-head record between `team_a` and `team_b`.
///
/// Only matches contested by exactly these two teams count. History keeps the
/// input order.
pub fn aggregate_h2h(matches: &[MatchResult], team_a: &Team, team_b: &Team) -> H2HResult {
    let mut team_a_wins = 0u32;
    let mut team_b_wins = 0u32;
    let mut draws = 0u32;
    let mut history = Vec::new();

    for m in matches.iter().filter(|m| m.is_between(team_a.id, team_b.id)) {
        let Some((a_goals, b_goals)) = m.goals_for_against(team_a.id) else {
            continue;
        };
        match a_goals.cmp(&b_goals) {
            Ordering::Greater => team_a_wins += 1,
            Ordering::Less => team_b_wins += 1,
            Ordering::Equal => draws += 1,
        }
        history.push(H2HEntry {
            date: m.date,
            score: m.formatted_score(),
        });
    }

    H2HResult {
        team_a: team_a.clone(),
        team_b: team_b.clone(),
        team_a_wins,
        team_b_wins,
        draws,
        total_matches: team_a_wins + team_b_wins + draws,
        history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn played(day: u32, home: (u32, u32), away: (u32, u32)) -> MatchResult {
        MatchResult {
            date: Utc.with_ymd_and_hms(2024, 3, day, 20, 0, 0).unwrap(),
            home_team_id: home.0,
            away_team_id: away.0,
            home_team_name: format!("T{}", home.0),
            away_team_name: format!("T{}", away.0),
            home_score: home.1,
            away_score: away.1,
        }
    }

    fn team(id: u32) -> Team {
        Team {
            id,
            name: format!("T{id}"),
            short_name: format!("T{id}"),
            abbreviation: format!("T{id:02}"),
        }
    }

    #[test]
    fn away_win_counts_as_win() {
        let stats = aggregate_single(&[played(1, (5, 0), (7, 2))], 7);
        assert_eq!(stats, TeamStats::from_counts(1, 0, 0));
    }

    #[test]
    fn unrelated_matches_are_ignored() {
        let matches = [played(1, (5, 0), (6, 2)), played(2, (7, 1), (5, 1))];
        let stats = aggregate_single(&matches, 7);
        assert_eq!(stats.matches_played(), 1);
        assert_eq!(stats.draws(), 1);
    }

    #[test]
    fn h2h_self_pairing_matches_nothing() {
        let t = team(3);
        let result = aggregate_h2h(&[played(1, (3, 1), (4, 0))], &t, &t);
        assert_eq!(result.total_matches, 0);
        assert!(result.history.is_empty());
    }

    #[test]
    fn h2h_history_uses_home_then_away_names() {
        let result = aggregate_h2h(&[played(4, (2, 0), (1, 3))], &team(1), &team(2));
        assert_eq!(result.history[0].score, "T2 0 - 3 T1");
        assert_eq!(result.team_a_wins, 1);
    }
}
