//! CLI entry point for the Premier League analytics tool.
//!
//! Loads the match file once into an immutable [`MatchTable`] and runs one
//! report or view over it: the full console report, single aggregations, or
//! CSV/JSON exports for a charting front end.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use pl_analytics::analyzers::head_to_head::head_to_head;
use pl_analytics::analyzers::insights::{
    RECENT_MATCHES, compare_teams, formation_performance, possession_vs_points, recent_matches,
    season_insights,
};
use pl_analytics::analyzers::league_table::league_table;
use pl_analytics::analyzers::team_summary::team_summary;
use pl_analytics::analyzers::trend::performance_trend;
use pl_analytics::config::Settings;
use pl_analytics::error::SelectionError;
use pl_analytics::features::{RollingScope, RoundPolicy};
use pl_analytics::output::{ExportFormat, export};
use pl_analytics::report::{self, ReportRequest};
use pl_analytics::snapshot::MatchTable;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::Directive,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "pl_analytics")]
#[command(about = "Descriptive statistics over Premier League match results", long_about = None)]
struct Cli {
    /// Match results CSV (overrides PL_DATA_PATH)
    #[arg(short, long, global = true, value_name = "FILE")]
    data: Option<PathBuf>,

    /// JSON settings file, applied before environment variables
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Rolling xG window grouping: team or team-season
    #[arg(long, global = true)]
    rolling_scope: Option<RollingScope>,

    /// Rows whose round has no match week: fail or skip
    #[arg(long, global = true)]
    round_policy: Option<RoundPolicy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full console report
    Report {
        /// Season to report on (defaults to the latest season)
        #[arg(short, long)]
        season: Option<i32>,

        /// Team to analyse (overrides PL_DEFAULT_TEAM)
        #[arg(short, long)]
        team: Option<String>,

        /// Opponent for the head-to-head section (overrides PL_DEFAULT_RIVAL)
        #[arg(short, long)]
        rival: Option<String>,

        /// Also print comparison, formation and recent-match sections
        #[arg(long, default_value_t = false)]
        extras: bool,
    },
    /// List seasons and the teams in one of them
    Teams {
        #[arg(short, long)]
        season: Option<i32>,
    },
    /// Print the league table for a season
    Table {
        #[arg(short, long)]
        season: Option<i32>,
    },
    /// Print season insights
    Insights {
        #[arg(short, long)]
        season: Option<i32>,
    },
    /// Print one team's season summary
    Team {
        team: String,
        #[arg(short, long)]
        season: Option<i32>,
    },
    /// Print one team's performance trend
    Trend {
        team: String,
        #[arg(short, long)]
        season: Option<i32>,
    },
    /// Print the fixtures between two teams
    H2h {
        team_a: String,
        team_b: String,
        #[arg(short, long)]
        season: Option<i32>,
    },
    /// Compare points and mean xG across teams
    Compare {
        #[arg(required = true)]
        teams: Vec<String>,
        #[arg(short, long)]
        season: Option<i32>,
    },
    /// Print a team's results by formation
    Formations {
        team: String,
        #[arg(short, long)]
        season: Option<i32>,
    },
    /// Print a team's most recent matches
    Recent {
        team: String,
        #[arg(short, long)]
        season: Option<i32>,
        #[arg(short = 'n', long, default_value_t = RECENT_MATCHES)]
        count: usize,
    },
    /// Write one view as CSV or JSON
    Export {
        #[arg(value_enum)]
        view: View,

        /// File to write
        #[arg(short, long)]
        output: PathBuf,

        /// csv or json
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        #[arg(short, long)]
        season: Option<i32>,

        /// Team for team views; first team for head-to-head
        #[arg(short, long)]
        team: Option<String>,

        /// Second team for head-to-head and comparisons
        #[arg(short, long)]
        rival: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum View {
    Table,
    Trend,
    HeadToHead,
    Compare,
    Possession,
    Formations,
    Recent,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/pl_analytics.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("pl_analytics.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse::<Directive>()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse::<Directive>()?),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let settings = settings(&cli)?;
    let table = MatchTable::load(&settings.data_path, &settings.derive)?;

    match cli.command {
        Commands::Report {
            season,
            team,
            rival,
            extras,
        } => {
            let request = ReportRequest {
                season: resolve_season(&table, season)?,
                team: team.unwrap_or(settings.team),
                rival: rival.unwrap_or(settings.rival),
            };
            info!(season = request.season, team = %request.team, rival = %request.rival, "Running report");
            print!("{}", report::full_report(&table, &request));
            if extras {
                print!("{}", report::team_extras(&table, &request, RECENT_MATCHES));
            }
        }
        Commands::Teams { season } => {
            let season = resolve_season(&table, season)?;
            let seasons: Vec<String> = table.seasons().iter().map(i32::to_string).collect();
            println!("Seasons: {}", seasons.join(", "));
            println!("Teams in {season}:");
            for team in table.teams(season) {
                println!("  {team}");
            }
        }
        Commands::Table { season } => {
            let season = resolve_season(&table, season)?;
            show(league_table(&table, season), |rows| {
                report::render_league_table(season, rows)
            });
        }
        Commands::Insights { season } => {
            let season = resolve_season(&table, season)?;
            show(season_insights(&table, season), report::render_insights);
        }
        Commands::Team { team, season } => {
            let season = resolve_season(&table, season)?;
            show(
                team_summary(&table, &team, season),
                report::render_team_summary,
            );
        }
        Commands::Trend { team, season } => {
            let season = resolve_season(&table, season)?;
            show(
                performance_trend(&table, &team, season),
                report::render_trend,
            );
        }
        Commands::H2h {
            team_a,
            team_b,
            season,
        } => {
            let season = resolve_season(&table, season)?;
            let fixtures = head_to_head(&table, &team_a, &team_b, season);
            print!(
                "{}",
                report::render_head_to_head(&team_a, &team_b, season, &fixtures)
            );
        }
        Commands::Compare { teams, season } => {
            let season = resolve_season(&table, season)?;
            let rows = compare_teams(&table, &teams, season);
            print!("{}", report::render_comparison(season, &rows));
        }
        Commands::Formations { team, season } => {
            let season = resolve_season(&table, season)?;
            let rows = formation_performance(&table, &team, season);
            print!("{}", report::render_formations(&team, season, &rows));
        }
        Commands::Recent {
            team,
            season,
            count,
        } => {
            let season = resolve_season(&table, season)?;
            let rows = recent_matches(&table, &team, season, count);
            print!("{}", report::render_recent(&team, season, &rows));
        }
        Commands::Export {
            view,
            output,
            format,
            season,
            team,
            rival,
        } => {
            let season = resolve_season(&table, season)?;
            let team = team.unwrap_or(settings.team);
            let rival = rival.unwrap_or(settings.rival);
            run_export(&table, view, &output, format, season, &team, &rival)?;
        }
    }

    Ok(())
}

/// Defaults, then the settings file or environment, then CLI flags.
fn settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::default()
            .with_file(path)?
            .with_vars(|key| std::env::var(key).ok())?,
        None => Settings::from_env()?,
    };
    if let Some(data) = &cli.data {
        settings.data_path = data.clone();
    }
    if let Some(scope) = cli.rolling_scope {
        settings.derive.rolling_scope = scope;
    }
    if let Some(policy) = cli.round_policy {
        settings.derive.round_policy = policy;
    }
    Ok(settings)
}

fn resolve_season(table: &MatchTable, season: Option<i32>) -> Result<i32> {
    match season.or_else(|| table.latest_season()) {
        Some(season) => Ok(season),
        None => bail!("no matches loaded"),
    }
}

/// Prints a rendered view, or a notice when the selection has no rows.
fn show<T>(result: Result<T, SelectionError>, render: impl FnOnce(&T) -> String) {
    match result {
        Ok(value) => print!("{}", render(&value)),
        Err(e) => {
            warn!(error = %e, "Selection returned no data");
            print!("{}", report::render_not_found(&e));
        }
    }
}

#[tracing::instrument(skip(table))]
fn run_export(
    table: &MatchTable,
    view: View,
    output: &Path,
    format: ExportFormat,
    season: i32,
    team: &str,
    rival: &str,
) -> Result<()> {
    match view {
        View::Table => {
            export(output, &league_table(table, season)?, format)?;
        }
        View::Trend => {
            export(output, &performance_trend(table, team, season)?.points, format)?;
        }
        View::HeadToHead => {
            export(output, &head_to_head(table, team, rival, season), format)?;
        }
        View::Compare => {
            let teams = vec![team.to_string(), rival.to_string()];
            export(output, &compare_teams(table, &teams, season), format)?;
        }
        View::Possession => {
            export(output, &possession_vs_points(table, season), format)?;
        }
        View::Formations => {
            export(output, &formation_performance(table, team, season), format)?;
        }
        View::Recent => {
            export(
                output,
                &recent_matches(table, team, season, RECENT_MATCHES),
                format,
            )?;
        }
    }
    Ok(())
}
