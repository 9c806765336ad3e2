use chrono::{Duration, TimeZone, Utc};

use football_h2h::aggregate::{aggregate_h2h, aggregate_single};
use football_h2h::model::{MatchResult, Team, TeamStats};

const RMA: u32 = 86;
const FCB: u32 = 81;
const GIR: u32 = 298;

fn team(id: u32, name: &str) -> Team {
    Team {
        id,
        name: name.to_string(),
        short_name: name.to_string(),
        abbreviation: String::new(),
    }
}

fn name_of(id: u32) -> String {
    match id {
        RMA => "Real Madrid CF".to_string(),
        FCB => "FC Barcelona".to_string(),
        GIR => "Girona FC".to_string(),
        other => format!("Team {other}"),
    }
}

fn result(day: i64, home: u32, home_score: u32, away: u32, away_score: u32) -> MatchResult {
    MatchResult {
        date: Utc.with_ymd_and_hms(2024, 8, 1, 19, 0, 0).unwrap() + Duration::days(day),
        home_team_id: home,
        away_team_id: away,
        home_team_name: name_of(home),
        away_team_name: name_of(away),
        home_score,
        away_score,
    }
}

fn clasicos() -> Vec<MatchResult> {
    vec![result(0, RMA, 3, FCB, 1), result(7, FCB, 2, RMA, 2)]
}

fn mixed_season() -> Vec<MatchResult> {
    vec![
        result(0, RMA, 3, FCB, 1),
        result(3, GIR, 0, RMA, 2),
        result(7, FCB, 2, RMA, 2),
        result(10, RMA, 0, GIR, 1),
        result(14, FCB, 4, GIR, 0),
        result(21, RMA, 1, 90, 1),
    ]
}

#[test]
fn h2h_clasico_scenario() {
    let h2h = aggregate_h2h(
        &clasicos(),
        &team(RMA, "Real Madrid CF"),
        &team(FCB, "FC Barcelona"),
    );
    assert_eq!(h2h.team_a_wins, 1);
    assert_eq!(h2h.team_b_wins, 0);
    assert_eq!(h2h.draws, 1);
    assert_eq!(h2h.total_matches, 2);
    assert_eq!(h2h.history[0].score, "Real Madrid CF 3 - 1 FC Barcelona");
    assert_eq!(h2h.history[1].score, "FC Barcelona 2 - 2 Real Madrid CF");
}

#[test]
fn single_team_clasico_scenario() {
    assert_eq!(
        aggregate_single(&clasicos(), RMA),
        TeamStats::from_counts(1, 1, 0)
    );
}

#[test]
fn matches_played_is_sum_of_outcomes() {
    let matches = mixed_season();
    for id in [RMA, FCB, GIR, 90, 12345] {
        let stats = aggregate_single(&matches, id);
        assert_eq!(stats.wins() + stats.draws() + stats.losses(), stats.matches_played());
    }
    let rma = aggregate_single(&matches, RMA);
    assert_eq!(rma, TeamStats::from_counts(2, 2, 1));
    assert_eq!(aggregate_single(&matches, 12345), TeamStats::default());
}

#[test]
fn level_scores_are_all_draws() {
    let matches = vec![
        result(0, RMA, 0, FCB, 0),
        result(1, GIR, 2, RMA, 2),
        result(2, RMA, 5, 90, 5),
    ];
    let stats = aggregate_single(&matches, RMA);
    assert_eq!(stats.wins(), 0);
    assert_eq!(stats.losses(), 0);
    assert_eq!(stats.draws(), stats.matches_played());
    assert_eq!(stats.matches_played(), 3);
}

#[test]
fn single_team_ignores_order() {
    let forward = mixed_season();
    let mut reversed = forward.clone();
    reversed.reverse();
    let mut rotated = forward.clone();
    rotated.rotate_left(2);
    for id in [RMA, FCB, GIR] {
        let expected = aggregate_single(&forward, id);
        assert_eq!(aggregate_single(&reversed, id), expected);
        assert_eq!(aggregate_single(&rotated, id), expected);
    }
}

#[test]
fn h2h_excludes_other_opponents() {
    let h2h = aggregate_h2h(
        &mixed_season(),
        &team(RMA, "Real Madrid CF"),
        &team(FCB, "FC Barcelona"),
    );
    assert_eq!(h2h.total_matches, 2);
    assert_eq!(
        h2h.team_a_wins + h2h.team_b_wins + h2h.draws,
        h2h.total_matches
    );
    assert_eq!(h2h.history.len() as u32, h2h.total_matches);
    assert!(h2h.history.iter().all(|e| !e.score.contains("Girona")));
}

#[test]
fn h2h_keeps_input_order_and_swaps_perspective() {
    let mut matches = mixed_season();
    matches.reverse();
    let h2h = aggregate_h2h(
        &matches,
        &team(FCB, "FC Barcelona"),
        &team(RMA, "Real Madrid CF"),
    );
    assert_eq!(h2h.team_a_wins, 0);
    assert_eq!(h2h.team_b_wins, 1);
    assert_eq!(h2h.draws, 1);
    assert!(h2h.history[0].date > h2h.history[1].date);
}

#[test]
fn h2h_without_meetings_is_empty() {
    let h2h = aggregate_h2h(
        &[result(0, RMA, 1, GIR, 0)],
        &team(FCB, "FC Barcelona"),
        &team(90, "Real Betis Balompié"),
    );
    assert_eq!(h2h.total_matches, 0);
    assert_eq!((h2h.team_a_wins, h2h.team_b_wins, h2h.draws), (0, 0, 0));
    assert!(h2h.history.is_empty());
}
