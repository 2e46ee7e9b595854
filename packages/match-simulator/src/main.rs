//! Match simulator CLI - fast in-memory match simulation against the
//! scoring engine.
//!
//! Plays whole matches through the pure pipeline with seeded RNG play
//! generation, for rule-table tuning and engine stress runs. Sanity mode
//! additionally asserts the undo round-trip and replay equivalence
//! invariants on every match.

mod metrics;
mod output;
mod simulator;
mod types;

use clap::Parser;
use engine::{EngineConfig, MatchSettings};
use metrics::{build_match_metrics, MatchMetrics};
use output::OutputWriter;
use simulator::{build_roster, derive_match_seed, PlayMix, Simulator};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};
use types::OutputFormat;

#[derive(Parser)]
#[command(name = "match-simulator")]
#[command(about = "Fast in-memory match simulator for the scoring engine")]
struct Args {
    /// Number of matches to simulate
    #[arg(short, long, default_value = "1")]
    matches: u32,

    /// Base seed (deterministic runs) - per-match seeds are derived from it
    #[arg(long)]
    seed: Option<u64>,

    /// Players per team
    #[arg(long, default_value = "2")]
    players_per_team: usize,

    /// Points required to win
    #[arg(long, default_value = "11")]
    score_limit: u32,

    /// Disable the win-by-two rule
    #[arg(long)]
    no_win_by_two: bool,

    /// Points a sink is worth (3 or 5)
    #[arg(long, default_value = "3")]
    sink_points: u32,

    /// Chance a throw is a non-terminal bad throw
    #[arg(long, default_value = "0.35")]
    bad_throw_rate: f64,

    /// Chance a throw is a self sink
    #[arg(long, default_value = "0.002")]
    self_sink_rate: f64,

    /// Chance the defense records any outcome
    #[arg(long, default_value = "0.6")]
    defense_rate: f64,

    /// Chance a recorded defense is a catch
    #[arg(long, default_value = "0.4")]
    catch_rate: f64,

    /// Chance a bad throw carries a FIFA kick
    #[arg(long, default_value = "0.25")]
    fifa_rate: f64,

    /// Chance a bad throw carries a redemption attempt
    #[arg(long, default_value = "0.05")]
    redemption_rate: f64,

    /// Chance an accepted play is immediately undone
    #[arg(long, default_value = "0.05")]
    undo_rate: f64,

    /// Assert undo round-trip and replay equivalence while running
    #[arg(long)]
    sanity: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress output files
    #[arg(long)]
    compress: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Silent by default, only warnings and errors
    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if args.show_output {
        info!("Starting match simulator");
        info!(
            "Configuration: {} matches, {}v{}, limit {}, win by two: {}",
            args.matches,
            args.players_per_team,
            args.players_per_team,
            args.score_limit,
            !args.no_win_by_two
        );
    }

    let config = EngineConfig::from_env()?;
    let mix = PlayMix {
        bad_throw_rate: args.bad_throw_rate,
        self_sink_rate: args.self_sink_rate,
        defense_rate: args.defense_rate,
        catch_rate: args.catch_rate,
        fifa_rate: args.fifa_rate,
        redemption_rate: args.redemption_rate,
        undo_rate: args.undo_rate,
    };
    mix.validate()?;

    let mut output_writer =
        OutputWriter::create(&args.output_dir, args.output_format, args.compress)?;
    if args.show_output {
        info!("Output directory: {}", args.output_dir);
    }

    let base_seed = args.seed.unwrap_or_else(rand::random);
    if args.show_output {
        info!("Base seed: {}", base_seed);
    }

    // Run simulations
    let start = Instant::now();
    let mut results: Vec<MatchMetrics> = Vec::new();
    let mut errors = 0u32;

    for match_no in 1..=args.matches {
        let match_start = Instant::now();
        let match_seed = derive_match_seed(base_seed, match_no);

        let run = run_match(&args, &config, mix, match_seed);
        match run {
            Ok(result) => {
                let duration_ms = match_start.elapsed().as_secs_f64() * 1000.0;
                let metrics = build_match_metrics(
                    match_no,
                    match_seed,
                    args.matches,
                    args.players_per_team,
                    &result,
                    duration_ms,
                );

                if let Err(e) = output_writer.write_match(&metrics) {
                    warn!("Failed to write metrics for match {}: {}", match_no, e);
                }

                if args.verbose {
                    info!(
                        "Match {} completed: {}-{} in {} events",
                        match_no,
                        metrics.result.team_one_score,
                        metrics.result.team_two_score,
                        metrics.activity.events
                    );
                }
                results.push(metrics);
            }
            Err(e) => {
                errors += 1;
                warn!("Match {} failed: {}", match_no, e);
            }
        }
    }

    let elapsed = start.elapsed();

    let (jsonl_path, csv_path) = output_writer.output_paths();
    let jsonl_path = jsonl_path.map(Path::to_path_buf);
    let csv_path = csv_path.to_path_buf();

    output_writer.finish()?;

    if args.show_output {
        if let Some(path) = jsonl_path {
            info!("Detailed results written to: {}", path.display());
        }
        info!("Summary CSV written to: {}", csv_path.display());

        print_summary(&results, errors, elapsed, args.matches);
    }

    Ok(())
}

fn run_match(
    args: &Args,
    config: &EngineConfig,
    mix: PlayMix,
    seed: u64,
) -> Result<simulator::MatchRunResult, simulator::SimulatorError> {
    let roster = build_roster(args.players_per_team);
    let settings = MatchSettings::new(
        args.score_limit,
        !args.no_win_by_two,
        args.sink_points,
        "Team One",
        "Team Two",
    )
    .map_err(|e| simulator::SimulatorError::Engine(format!("Settings: {e}")))?;

    Simulator::new(roster, settings, config.clone(), mix, seed, args.sanity)?.run()
}

fn print_summary(results: &[MatchMetrics], errors: u32, elapsed: std::time::Duration, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Matches completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);
    if !results.is_empty() {
        println!(
            "Average time per match: {:?}",
            elapsed / results.len() as u32
        );
    }

    if results.is_empty() {
        return;
    }

    let mut team_one_wins = 0u32;
    let mut team_two_wins = 0u32;
    let mut self_sinks = 0u32;
    let mut total_events = 0usize;
    let mut total_undos = 0u64;
    let mut total_saves = 0usize;
    let mut total_margin = 0i64;
    let mut sanity_checks = 0u64;

    for metrics in results {
        match metrics.result.winner.as_deref() {
            Some("TEAM_ONE") => team_one_wins += 1,
            Some("TEAM_TWO") => team_two_wins += 1,
            _ => {}
        }
        if metrics.activity.self_sink {
            self_sinks += 1;
        }
        total_events += metrics.activity.events;
        total_undos += metrics.activity.undos as u64;
        total_saves += metrics.activity.fifa_saves;
        total_margin += metrics.result.margin as i64;
        sanity_checks += metrics.activity.sanity_checks;
    }

    let n = results.len() as f64;
    println!("\n=== Results ===");
    println!(
        "Wins: TEAM_ONE={} TEAM_TWO={} (self sinks: {})",
        team_one_wins, team_two_wins, self_sinks
    );
    println!(
        "Averages: events={:.1}, undos={:.2}, fifa saves={:.2}, margin={:.2}",
        total_events as f64 / n,
        total_undos as f64 / n,
        total_saves as f64 / n,
        total_margin as f64 / n
    );
    if sanity_checks > 0 {
        println!("Sanity checks passed: {}", sanity_checks);
    }
}
