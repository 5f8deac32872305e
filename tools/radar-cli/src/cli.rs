//! # Command Line Interface
//!
//! Each invocation loads the stats file once and recomputes the requested
//! view from scratch.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use percentile_engine::{format_value, ComparisonTable, PercentileEngine, RadarPlan, Selection};
use receiving_stats::{Metric, Population, StatsTable, TimeBucket};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::RadarConfig;

/// Columns printed ahead of the metrics by `stats`
const IDENTITY_COLUMNS: [&str; 3] = ["Player Name", "Position", "Team Abbreviation"];

/// Percentile radar comparisons for NFL receivers
#[derive(Parser, Debug)]
#[command(name = "radar-cli")]
#[command(about = "Compare NFL receivers with Next Gen Stats percentile rankings")]
pub struct Cli {
    /// Path to the receiving stats CSV (overrides the config file)
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare one or two players on a radar chart
    Compare {
        /// Statistic to compare, column name or short label (repeat 3-7 times)
        #[arg(short, long = "metric")]
        metrics: Vec<String>,

        /// Player to compare (repeat up to twice; defaults to the touchdown leaders)
        #[arg(short, long = "player")]
        players: Vec<String>,

        /// Week 1-18; omit for the full season
        #[arg(short, long)]
        week: Option<u32>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Show the top players for a statistic
    Leaders {
        /// Statistic to rank by
        #[arg(short, long)]
        metric: String,

        /// Week 1-18; omit for the full season
        #[arg(short, long)]
        week: Option<u32>,

        /// Only this team (abbreviation)
        #[arg(long)]
        team: Option<String>,

        /// Only this position
        #[arg(long)]
        position: Option<String>,

        /// Number of rows (defaults to the configured limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Every row of a season or week, followed by its summary
    Stats {
        /// Week 1-18; omit for the full season
        #[arg(short, long)]
        week: Option<u32>,

        /// Only this player (exact name)
        #[arg(short, long)]
        player: Option<String>,

        /// Only this team (abbreviation)
        #[arg(long)]
        team: Option<String>,
    },
    /// Summed yards, receptions and touchdowns plus the average catch rate
    Summary {
        /// Week 1-18; omit for the full season
        #[arg(short, long)]
        week: Option<u32>,

        /// Only this player (exact name)
        #[arg(short, long)]
        player: Option<String>,

        /// Only this team (abbreviation)
        #[arg(long)]
        team: Option<String>,

        /// Only this position
        #[arg(long)]
        position: Option<String>,
    },
    /// List players available for a season or week
    Players {
        /// Week 1-18; omit for the full season
        #[arg(short, long)]
        week: Option<u32>,
    },
    /// List the comparable statistics
    Metrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Serialize)]
struct CompareOutput<'a> {
    plan: &'a RadarPlan,
    table: &'a ComparisonTable,
}

/// CLI handler
pub struct CliHandler {
    table: StatsTable,
    config: RadarConfig,
    engine: PercentileEngine,
}

impl CliHandler {
    /// Create a handler over an already-loaded table
    pub fn new(table: StatsTable, config: RadarConfig) -> Self {
        Self {
            table,
            config,
            engine: PercentileEngine::new(),
        }
    }

    /// Load the stats file and create a handler
    pub async fn load(data_path: &Path, config: RadarConfig) -> Result<Self> {
        let table = StatsTable::load_from_file(data_path)
            .await
            .with_context(|| format!("Failed to load receiving stats from {data_path:?}"))?;
        Ok(Self::new(table, config))
    }

    /// Handle CLI commands
    pub fn handle_command<W: Write>(&self, command: Commands, out: &mut W) -> Result<()> {
        match command {
            Commands::Compare {
                metrics,
                players,
                week,
                format,
            } => {
                self.compare(metrics, players, week, format, out)?;
            }
            Commands::Leaders {
                metric,
                week,
                team,
                position,
                limit,
            } => {
                let (team, position) = (team.as_deref(), position.as_deref());
                self.show_leaders(&metric, week, team, position, limit, out)?;
            }
            Commands::Stats { week, player, team } => {
                self.show_stats(week, player.as_deref(), team.as_deref(), out)?;
            }
            Commands::Summary {
                week,
                player,
                team,
                position,
            } => {
                let population = self
                    .population(week)?
                    .only_player(player.as_deref())
                    .filter(team.as_deref(), position.as_deref());
                write_summary(&population, out)?;
            }
            Commands::Players { week } => {
                self.show_players(week, out)?;
            }
            Commands::Metrics => {
                self.show_metrics(out)?;
            }
        }
        Ok(())
    }

    fn population(&self, week: Option<u32>) -> Result<Population<'_>> {
        let bucket = match week {
            None => TimeBucket::Season,
            Some(w) => TimeBucket::try_from(w)?,
        };
        Ok(self.table.slice(bucket))
    }

    fn compare<W: Write>(
        &self,
        metrics: Vec<String>,
        players: Vec<String>,
        week: Option<u32>,
        format: OutputFormat,
        out: &mut W,
    ) -> Result<()> {
        let population = self.population(week)?;

        let metrics = if metrics.is_empty() {
            self.config.comparison.default_metrics.clone()
        } else {
            metrics
        };
        let players = if players.is_empty() {
            population.default_subjects()
        } else {
            players
        };

        let selection =
            Selection::new(&metrics, &players).context("Invalid comparison selection")?;

        let plan = self.engine.plan_for(&population, &selection).with_context(|| {
            format!(
                "No data for the selected players in {}; choose players from this view",
                population.bucket()
            )
        })?;
        let table = ComparisonTable::for_selection(&population, &selection)?;

        info!(
            "Compared {} players over {} metrics in {}",
            plan.traces.len(),
            plan.metrics.len(),
            plan.bucket
        );

        match format {
            OutputFormat::Json => {
                let output = CompareOutput {
                    plan: &plan,
                    table: &table,
                };
                writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
            }
            OutputFormat::Table => {
                writeln!(
                    out,
                    "⚔️  Player Comparison ({}) - percentile rankings, higher is better",
                    plan.bucket
                )?;
                writeln!(out, "{}", "=".repeat(60))?;
                for (rank, trace) in plan.traces.iter().enumerate() {
                    writeln!(
                        out,
                        "{}. {} (average {:.1}%)",
                        rank + 1,
                        trace.player,
                        trace.average_percentile
                    )?;
                    // the closing vertex repeats the first axis
                    let axes = trace.labels.len().saturating_sub(1);
                    for i in 0..axes {
                        let actual = trace.actual_values[i]
                            .map(|v| format!("{v:.1}"))
                            .unwrap_or_else(|| "-".to_string());
                        writeln!(
                            out,
                            "   {:<12} {:>8}  {:>5.1}%",
                            trace.labels[i], actual, trace.percentiles[i]
                        )?;
                    }
                }
                writeln!(out)?;
                writeln!(out, "📊 Side-by-Side Comparison")?;
                write!(out, "{table}")?;
            }
        }
        Ok(())
    }

    fn show_leaders<W: Write>(
        &self,
        metric: &str,
        week: Option<u32>,
        team: Option<&str>,
        position: Option<&str>,
        limit: Option<usize>,
        out: &mut W,
    ) -> Result<()> {
        let metric: Metric = metric.parse()?;
        let population = self.population(week)?.filter(team, position);
        let leaders = population.leaders(metric, limit.unwrap_or(self.config.leaders.limit));

        let mut scope = String::new();
        if let Some(team) = team {
            scope.push_str(&format!(" - {team}"));
        }
        if let Some(position) = position {
            scope.push_str(&format!(" - {position}"));
        }

        if leaders.is_empty() {
            writeln!(out, "No data available for the selected filters.")?;
            return Ok(());
        }

        writeln!(
            out,
            "🏆 Top {} Players Based on {} ({}){}",
            leaders.len(),
            metric,
            population.bucket(),
            scope
        )?;
        writeln!(out, "{}", "=".repeat(60))?;
        for (rank, row) in leaders.iter().enumerate() {
            let value = row.metric(metric).unwrap_or_default();
            writeln!(
                out,
                "{:>2}. {:<24} {:<4} {:<3} {:>8.1}",
                rank + 1,
                row.name,
                row.team,
                row.position,
                value
            )?;
        }
        Ok(())
    }

    fn show_stats<W: Write>(
        &self,
        week: Option<u32>,
        player: Option<&str>,
        team: Option<&str>,
        out: &mut W,
    ) -> Result<()> {
        let population = self.population(week)?.only_player(player).filter(team, None);

        writeln!(out, "📋 Complete {} Statistics", population.bucket())?;
        if population.is_empty() {
            writeln!(out, "No data available for the selected filters.")?;
        } else {
            let headers: Vec<&str> = IDENTITY_COLUMNS
                .iter()
                .copied()
                .chain(Metric::ALL.iter().map(|m| m.column()))
                .collect();
            let rows: Vec<Vec<String>> = population
                .rows()
                .iter()
                .map(|r| {
                    let mut cells = vec![r.name.clone(), r.position.clone(), r.team.clone()];
                    cells.extend(Metric::ALL.iter().map(|m| format_value(r.metric(*m))));
                    cells
                })
                .collect();
            write_grid(out, &headers, &rows, IDENTITY_COLUMNS.len())?;
        }
        writeln!(out)?;

        write_summary(&population, out)
    }

    fn show_players<W: Write>(&self, week: Option<u32>, out: &mut W) -> Result<()> {
        let population = self.population(week)?;
        let names = population.player_names();

        if names.is_empty() {
            writeln!(out, "No players found for {}", population.bucket())?;
            return Ok(());
        }
        for name in names {
            writeln!(out, "{name}")?;
        }
        Ok(())
    }

    fn show_metrics<W: Write>(&self, out: &mut W) -> Result<()> {
        for metric in Metric::ALL {
            writeln!(out, "{:<34} {}", metric.column(), metric.label())?;
        }
        Ok(())
    }
}

/// Totals block shared by `summary` and `stats`
fn write_summary<W: Write>(population: &Population<'_>, out: &mut W) -> Result<()> {
    let totals = population.totals();
    let catch_rate = totals
        .avg_catch_percentage
        .map(|v| format!("{v:.1}%"))
        .unwrap_or_else(|| "-".to_string());

    writeln!(
        out,
        "📈 {} Summary ({} players)",
        population.bucket(),
        population.len()
    )?;
    writeln!(out, "{}", "=".repeat(40))?;
    writeln!(out, "🎯 Total Yards:      {:.0}", totals.yards)?;
    writeln!(out, "✋ Total Receptions: {:.0}", totals.receptions)?;
    writeln!(out, "🔥 Total TDs:        {:.0}", totals.touchdowns)?;
    writeln!(out, "📈 Avg Catch %:      {catch_rate}")?;
    Ok(())
}

/// Aligned text grid; columns from `numeric_from` on are right-aligned
fn write_grid<W: Write>(
    out: &mut W,
    headers: &[&str],
    rows: &[Vec<String>],
    numeric_from: usize,
) -> Result<()> {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    writeln!(out, "{}", grid_line(headers.iter().copied(), &widths, numeric_from))?;
    for row in rows {
        writeln!(out, "{}", grid_line(row.iter().map(String::as_str), &widths, numeric_from))?;
    }
    Ok(())
}

fn grid_line<'c>(
    cells: impl Iterator<Item = &'c str>,
    widths: &[usize],
    numeric_from: usize,
) -> String {
    cells
        .zip(widths.iter().copied())
        .enumerate()
        .map(|(i, (cell, width))| {
            if i < numeric_from {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATS_CSV: &str = "\
Week,Player Name,Position,Team Abbreviation,Receptions,Targets,Catch Percentage,Yards,Receiving Touchdowns,YAC Above Expectation
0,Ja'Marr Chase,WR,CIN,80,110,72.7,1050,9,0.5
0,Travis Kelce,TE,KC,70,95,73.7,820,5,0.8
0,Puka Nacua,WR,LAR,88,112,78.6,1120,6,1.1
0,Tee Higgins,WR,CIN,55,90,61.1,780,10,-0.8
1,Ja'Marr Chase,WR,CIN,6,9,66.7,88,1,-0.1
1,Puka Nacua,WR,LAR,9,11,81.8,131,0,1.5
";

    fn handler() -> CliHandler {
        let table = StatsTable::from_reader(STATS_CSV.as_bytes()).unwrap();
        CliHandler::new(table, RadarConfig::default())
    }

    fn run(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("radar-cli").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        handler().handle_command(cli.command, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    /// Column names on the line after the `stats` title
    fn stats_header(text: &str) -> Vec<String> {
        text.lines()
            .nth(1)
            .unwrap()
            .split("  ")
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn compare_with_defaults_uses_touchdown_leaders() {
        let text = run(&["compare"]).unwrap();
        assert!(text.contains("1. Ja'Marr Chase (average 45.0%)"));
        assert!(text.contains("2. Tee Higgins (average 15.0%)"));
        assert!(text.contains("Side-by-Side Comparison"));
        assert!(text.contains("Receiving Touchdowns"));
    }

    #[test]
    fn compare_json_carries_plan_and_table() {
        let text = run(&[
            "compare",
            "-m",
            "Yards",
            "-m",
            "Rec TDs",
            "-m",
            "YAC+",
            "-p",
            "Puka Nacua",
            "--week",
            "1",
            "-f",
            "json",
        ])
        .unwrap();

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["plan"]["bucket"], 1);
        assert_eq!(json["plan"]["traces"][0]["player"], "Puka Nacua");
        assert_eq!(json["plan"]["traces"][0]["percentiles"][0], 50.0);
        assert_eq!(json["plan"]["traces"][0]["labels"].as_array().unwrap().len(), 4);
        assert_eq!(json["table"]["players"][0], "Puka Nacua");
    }

    #[test]
    fn compare_rejects_bad_selection() {
        let err =
            run(&["compare", "-m", "Yards", "-m", "Targets", "-p", "Puka Nacua"]).unwrap_err();
        assert!(format!("{err:#}").contains("at least 3"));

        let err = run(&["compare", "-p", "A", "-p", "B", "-p", "C"]).unwrap_err();
        assert!(format!("{err:#}").contains("at most 2 players"));
    }

    #[test]
    fn compare_reports_no_data_for_stale_player() {
        let err = run(&["compare", "-p", "Tee Higgins", "--week", "1"]).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("No data"));
        assert!(message.contains("Week 1"));
    }

    #[test]
    fn invalid_week_is_an_error() {
        assert!(run(&["players", "--week", "19"]).is_err());
    }

    #[test]
    fn leaders_with_filters() {
        let text = run(&["leaders", "-m", "Yards", "--team", "CIN"]).unwrap();
        assert!(text.contains("Top 2 Players Based on Yards (Season) - CIN"));
        let chase = text.find("Ja'Marr Chase").unwrap();
        let higgins = text.find("Tee Higgins").unwrap();
        assert!(chase < higgins);

        let text = run(&["leaders", "-m", "Yards", "--team", "BUF"]).unwrap();
        assert!(text.contains("No data available"));

        assert!(run(&["leaders", "-m", "Fantasy Points"]).is_err());
    }

    #[test]
    fn players_summary_and_metrics() {
        let text = run(&["players", "-w", "1"]).unwrap();
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec!["Ja'Marr Chase", "Puka Nacua"]
        );

        let text = run(&["summary", "--team", "CIN"]).unwrap();
        assert!(text.contains("Season Summary (2 players)"));
        assert!(text.contains("Total Yards:      1830"));
        assert!(text.contains("Total TDs:        19"));
        assert!(text.contains("Avg Catch %:      66.9%"));

        let text = run(&["metrics"]).unwrap();
        assert_eq!(text.lines().count(), Metric::ALL.len());
        assert!(text.contains("Share of Intended Air Yards (%)"));
    }

    #[test]
    fn summary_scoped_to_one_player() {
        let text = run(&["summary", "-w", "1", "-p", "Puka Nacua"]).unwrap();
        assert!(text.contains("Week 1 Summary (1 players)"));
        assert!(text.contains("Total Yards:      131"));
        assert!(text.contains("Avg Catch %:      81.8%"));
    }

    #[test]
    fn summary_of_empty_view_has_no_catch_rate() {
        let text = run(&["summary", "--team", "BUF"]).unwrap();
        assert!(text.contains("Total Yards:      0"));
        assert!(text.contains("Avg Catch %:      -"));
    }

    #[test]
    fn stats_lists_priority_columns_first() {
        let text = run(&["stats"]).unwrap();
        assert!(text.starts_with("📋 Complete Season Statistics"));

        let expected: Vec<String> = [
            "Player Name",
            "Position",
            "Team Abbreviation",
            "Yards",
            "Targets",
            "Receptions",
            "Receiving Touchdowns",
            "Catch Percentage",
            "Avg Yards After Catch",
            "Avg Expected YAC",
            "YAC Above Expectation",
            "Avg Cushion",
            "Avg Separation",
            "Avg Intended Air Yards",
            "Share of Intended Air Yards (%)",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect();
        assert_eq!(stats_header(&text), expected);

        // one line per season row, in file order
        let rows: Vec<&str> = text.lines().skip(2).take(4).collect();
        assert!(rows[0].starts_with("Ja'Marr Chase"));
        assert!(rows[3].starts_with("Tee Higgins"));
        assert!(rows[2].contains("1120.0"));
        assert!(text.contains("Season Summary (4 players)"));
    }

    #[test]
    fn stats_filters_by_team() {
        let text = run(&["stats", "--team", "CIN"]).unwrap();
        assert!(text.contains("Ja'Marr Chase"));
        assert!(text.contains("Tee Higgins"));
        assert!(!text.contains("Travis Kelce"));
        assert!(!text.contains("Puka Nacua"));

        // the summary covers the filtered rows only
        assert!(text.contains("Season Summary (2 players)"));
        assert!(text.contains("Total Yards:      1830"));
        assert!(text.contains("Avg Catch %:      66.9%"));
    }

    #[test]
    fn stats_filters_by_player() {
        let text = run(&["stats", "--week", "1", "--player", "Puka Nacua"]).unwrap();
        assert!(text.starts_with("📋 Complete Week 1 Statistics"));
        assert!(text.contains("131.0"));
        assert!(text.contains("81.8"));
        assert!(!text.contains("Ja'Marr Chase"));
        assert!(text.contains("Total Yards:      131"));
        assert!(text.contains("Avg Catch %:      81.8%"));

        let text = run(&["stats", "-p", "Travis Kelce", "--team", "CIN"]).unwrap();
        assert!(text.contains("No data available for the selected filters."));
        assert!(text.contains("Season Summary (0 players)"));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["radar-cli", "metrics", "--data", "x.csv"]).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("x.csv")));
        assert!(matches!(cli.command, Commands::Metrics));
    }
}
