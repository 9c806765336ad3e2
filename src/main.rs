//! Batch CLI: team reports, head-to-head comparisons, team list and standings.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::warn;

use football_h2h::chart::{self, BarLabels, ChartRenderer};
use football_h2h::config::Config;
use football_h2h::error::FootballError;
use football_h2h::export::Exporter;
use football_h2h::football_data::{DataSource, FootballData};
use football_h2h::model::{H2HSummaryRow, Outcomes};
use football_h2h::pipeline::{self, CompareRequest, ReportRequest, UnknownId};
use football_h2h::resolver::TeamResolver;

#[derive(Parser)]
#[command(name = "football_h2h")]
#[command(about = "Team statistics and head-to-head comparisons from football-data.org", long_about = None)]
struct Cli {
    /// Minimum name similarity (0-1) for fuzzy team matching
    #[arg(long, global = true)]
    threshold: Option<f64>,

    /// Directory for CSV/JSON/XLSX exports and charts
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DateArgs {
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,
    /// End date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Season statistics for one team, plus team list and standings exports
    Report {
        /// Team id or (partial) team name
        team: String,
        #[command(flatten)]
        dates: DateArgs,
        /// Skip the chart file
        #[arg(long)]
        no_chart: bool,
        /// Show the chart in the terminal before exiting
        #[arg(long)]
        show_chart: bool,
    },
    /// Head-to-head record between two teams
    Compare {
        team1: String,
        team2: String,
        #[command(flatten)]
        dates: DateArgs,
        /// Skip the chart file
        #[arg(long)]
        no_chart: bool,
    },
    /// Find a team's id by (partial or misspelled) name
    Search { name: String },
    /// List and export the competition's teams
    Teams,
    /// Export the current league table
    Standings,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn run(cli: Cli) -> Result<()> {
    let mut cfg = Config::from_env();
    if let Some(threshold) = cli.threshold {
        cfg = cfg.with_threshold(threshold);
    }
    if let Some(dir) = cli.output_dir {
        cfg.output_dir = dir;
    }

    let resolver = TeamResolver::from_config(&cfg);
    let exporter = Exporter::new(cfg.output_dir.clone());
    let charts = ChartRenderer::new(cfg.output_dir.clone());

    match cli.command {
        Commands::Report {
            team,
            dates,
            no_chart,
            show_chart,
        } => {
            let req = ReportRequest {
                team: &team,
                date_from: dates.from.as_deref(),
                date_to: dates.to.as_deref(),
                unknown_id: UnknownId::Sentinel,
            };
            let source = FootballData::new(&cfg)?;
            run_report(&source, &resolver, &exporter, &charts, &req, no_chart, show_chart)
        }
        Commands::Compare {
            team1,
            team2,
            dates,
            no_chart,
        } => {
            let req = CompareRequest {
                team1: &team1,
                team2: &team2,
                date_from: dates.from.as_deref(),
                date_to: dates.to.as_deref(),
            };
            let source = FootballData::new(&cfg)?;
            run_compare(&source, &resolver, &exporter, &charts, &req, no_chart)
        }
        Commands::Search { name } => {
            let source = FootballData::new(&cfg)?;
            let (team, score) = pipeline::search(&source, &resolver, &name)
                .map_err(|err| explain_not_found(err, "Team not found. Try a different spelling."))?;
            println!("{:<6}{} (similarity {:.2})", team.id, team.name, score);
            Ok(())
        }
        Commands::Teams => {
            let source = FootballData::new(&cfg)?;
            run_teams(&source, &exporter, true)
        }
        Commands::Standings => {
            let source = FootballData::new(&cfg)?;
            run_standings(&source, &exporter)
        }
    }
}

fn explain_not_found(err: anyhow::Error, hint: &'static str) -> anyhow::Error {
    match err.downcast_ref::<FootballError>() {
        Some(e) if e.is_not_found() => err.context(hint),
        _ => err,
    }
}

fn run_report(
    source: &FootballData,
    resolver: &TeamResolver,
    exporter: &Exporter,
    charts: &ChartRenderer,
    req: &ReportRequest<'_>,
    no_chart: bool,
    show_chart: bool,
) -> Result<()> {
    println!("Fetching data from API...");
    let report = pipeline::team_report(source, resolver, req)
        .map_err(|err| explain_not_found(err, "Team not found. Try a different spelling."))?;

    let raw = exporter.export(&report.matches, "results_of_matches")?;
    println!(
        "{} match results saved to '{}' and '{}'",
        raw.rows,
        raw.csv.display(),
        raw.json.display()
    );

    let row = report.stats_row();
    println!(
        "{} ({}): {} played, {} won, {} drawn, {} lost",
        row.team_name, row.team_id, row.matches_played, row.wins, row.draws, row.losses
    );
    let stats = exporter.export(
        std::slice::from_ref(&row),
        &format!("{}_statistics", report.team_name),
    )?;
    println!("Statistics saved to '{}'", stats.csv.display());

    let outcomes = Outcomes::from(&report.stats);
    if !no_chart {
        let labels = BarLabels::default();
        let path = charts.render(outcomes, &report.team_name, &labels)?;
        print!("{}", chart::render_to_text(outcomes, &report.team_name, &labels));
        println!("Chart saved to '{}'", path.display());
        if show_chart {
            chart::show_in_terminal(outcomes, &report.team_name, &labels)?;
        }
    }

    println!("\nExporting general league data...");
    // Supplementary exports should not sink a report that already succeeded.
    if let Err(err) = run_teams(source, exporter, false) {
        warn!("team list export failed: {err:#}");
    }
    if let Err(err) = run_standings(source, exporter) {
        warn!("standings export failed: {err:#}");
    }

    println!(
        "\nProcess completed successfully. Check the '{}' folder.",
        exporter.dir().display()
    );
    Ok(())
}

fn run_compare(
    source: &FootballData,
    resolver: &TeamResolver,
    exporter: &Exporter,
    charts: &ChartRenderer,
    req: &CompareRequest<'_>,
    no_chart: bool,
) -> Result<()> {
    let h2h = pipeline::compare(source, resolver, req)
        .map_err(|err| explain_not_found(err, "One or both teams not found."))?;

    println!("{}", h2h.label());
    println!("  {} wins: {}", h2h.team_a.name, h2h.team_a_wins);
    println!("  {} wins: {}", h2h.team_b.name, h2h.team_b_wins);
    println!("  draws: {}", h2h.draws);
    println!("  total matches: {}", h2h.total_matches);
    for entry in &h2h.history {
        println!("  {}  {}", entry.date.format("%Y-%m-%d"), entry.score);
    }

    let stem = format!("{}_vs_{}_h2h", h2h.team_a.name, h2h.team_b.name);
    exporter.export(&h2h.history, &stem)?;
    exporter.export(&[H2HSummaryRow::from(&h2h)], &format!("{stem}_summary"))?;

    if !no_chart {
        let labels = BarLabels::head_to_head(&h2h.team_a.short_name, &h2h.team_b.short_name);
        let path = charts.render(Outcomes::from(&h2h), &h2h.label(), &labels)?;
        println!("Chart saved to '{}'", path.display());
    }
    Ok(())
}

fn run_teams(source: &FootballData, exporter: &Exporter, print_table: bool) -> Result<()> {
    let teams = source.fetch_teams().context("failed to load team catalog")?;
    if print_table {
        println!("{:<6}{:<32}{:<18}TLA", "ID", "NAME", "SHORT_NAME");
        for team in &teams {
            println!(
                "{:<6}{:<32}{:<18}{}",
                team.id, team.name, team.short_name, team.abbreviation
            );
        }
    }
    let report = exporter.export(&teams, "football_teams")?;
    println!("Data saved to '{}'", report.csv.display());
    Ok(())
}

fn run_standings(source: &FootballData, exporter: &Exporter) -> Result<()> {
    let standings = source
        .fetch_standings()
        .context("failed to load standings")?;
    let report = exporter.export(&standings, "league_standing")?;
    println!("Data saved to '{}'", report.csv.display());
    Ok(())
}
