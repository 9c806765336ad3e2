use chrono::{Duration, TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use football_h2h::aggregate::{aggregate_h2h, aggregate_single};
use football_h2h::football_data::parse_matches_json;
use football_h2h::model::{MatchResult, Team};
use football_h2h::resolver::TeamResolver;

const TEAM_NAMES: &[&str] = &[
    "Athletic Club",
    "Club Atlético de Madrid",
    "CA Osasuna",
    "RCD Espanyol de Barcelona",
    "FC Barcelona",
    "Getafe CF",
    "Real Madrid CF",
    "Rayo Vallecano de Madrid",
    "Levante UD",
    "RCD Mallorca",
    "Real Betis Balompié",
    "Real Sociedad de Fútbol",
    "Villarreal CF",
    "Valencia CF",
    "Deportivo Alavés",
    "Elche CF",
    "Girona FC",
    "RC Celta de Vigo",
    "Sevilla FC",
    "Real Oviedo",
];

fn catalog() -> Vec<Team> {
    TEAM_NAMES
        .iter()
        .enumerate()
        .map(|(idx, name)| Team {
            id: idx as u32 + 1,
            name: name.to_string(),
            short_name: name.to_string(),
            abbreviation: String::new(),
        })
        .collect()
}

fn season(teams: u32, rounds: u32) -> Vec<MatchResult> {
    let start = Utc.with_ymd_and_hms(2024, 8, 15, 19, 0, 0).unwrap();
    let mut out = Vec::new();
    for round in 0..rounds {
        for home in 1..=teams {
            let away = (home + round) % teams + 1;
            if away == home {
                continue;
            }
            out.push(MatchResult {
                date: start + Duration::days(i64::from(round) * 7),
                home_team_id: home,
                away_team_id: away,
                home_team_name: format!("Team {home}"),
                away_team_name: format!("Team {away}"),
                home_score: (home * 7 + round) % 4,
                away_score: (away * 3 + round) % 3,
            });
        }
    }
    out
}

fn matches_json(matches: &[MatchResult]) -> String {
    let rows: Vec<String> = matches
        .iter()
        .enumerate()
        .map(|(idx, m)| {
            format!(
                r#"{{"id":{idx},"utcDate":"{}","status":"FINISHED","homeTeam":{{"id":{},"name":"{}"}},"awayTeam":{{"id":{},"name":"{}"}},"score":{{"fullTime":{{"home":{},"away":{}}}}}}}"#,
                m.date.to_rfc3339(),
                m.home_team_id,
                m.home_team_name,
                m.away_team_id,
                m.away_team_name,
                m.home_score,
                m.away_score
            )
        })
        .collect();
    format!(r#"{{"matches":[{}]}}"#, rows.join(","))
}

fn bench_resolve(c: &mut Criterion) {
    let teams = catalog();
    let resolver = TeamResolver::default();
    c.bench_function("resolve_misspelled_name", |b| {
        b.iter(|| {
            let team = resolver.resolve(black_box("Real Madird"), &teams).unwrap();
            black_box(team.id);
        })
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let matches = season(20, 38);
    let teams = catalog();
    c.bench_function("aggregate_single_season", |b| {
        b.iter(|| black_box(aggregate_single(black_box(&matches), 7)))
    });
    c.bench_function("aggregate_h2h_season", |b| {
        b.iter(|| black_box(aggregate_h2h(black_box(&matches), &teams[6], &teams[4])))
    });
}

fn bench_parse_matches(c: &mut Criterion) {
    let raw = matches_json(&season(20, 38));
    c.bench_function("parse_matches_json", |b| {
        b.iter(|| {
            let rows = parse_matches_json(black_box(&raw)).unwrap();
            black_box(rows.len());
        })
    });
}

criterion_group!(benches, bench_resolve, bench_aggregate, bench_parse_matches);
criterion_main!(benches);
