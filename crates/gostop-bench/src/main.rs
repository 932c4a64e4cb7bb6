use std::path::PathBuf;

use clap::Parser;

use gostop_bench::config::{BenchmarkConfig, ResolvedOutputs};
use gostop_bench::logging::init_logging;
use gostop_bench::tournament::TournamentRunner;

/// Self-play tournament harness for the Go-Stop bot tiers.
#[derive(Debug, Parser)]
#[command(
    name = "gostop-bench",
    author,
    version,
    about = "Deterministic Go-Stop bot tournament harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of deals to play.
    #[arg(long, value_name = "ROUNDS")]
    rounds: Option<usize>,

    /// Override the RNG seed for deal generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Play every deal once instead of once per seating.
    #[arg(long)]
    no_swap: bool,

    /// Exit after validating the configuration (no tournament is run).
    #[arg(long)]
    validate_only: bool,

    /// Log every candidate score regardless of config (forces GOSTOP_DECISION_DETAILS=1).
    #[arg(long)]
    log_decision_details: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(rounds) = cli.rounds {
        config.deals.rounds = rounds;
    }

    if let Some(seed) = cli.seed {
        config.deals.seed = Some(seed);
    }

    if cli.no_swap {
        config.deals.swap_seats = false;
    }

    if cli.log_decision_details {
        config.logging.decision_details = true;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let rounds = config.deals.rounds;
    let seatings = config.deals.seatings();
    let lineup = config
        .agents
        .iter()
        .map(|agent| format!("{} ({})", agent.name, agent.difficulty))
        .collect::<Vec<_>>()
        .join(" vs ");

    println!(
        "Loaded configuration '{run_id}': {lineup}, {rounds} deal{} x {seatings} seating{}",
        if rounds == 1 { "" } else { "s" },
        if seatings == 1 { "" } else { "s" }
    );

    let _logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = TournamentRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: tournament execution skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Tournament complete for '{run_id}': {} deals x {} seatings -> {} rows at {}",
        summary.rounds_played,
        summary.seatings,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    for agent in summary.standings.agents() {
        println!(
            "  {:<12} {:<10} won {:>4}  lost {:>4}  drawn {:>4}  net {:+}",
            agent.name,
            agent.difficulty.as_str(),
            agent.wins,
            agent.losses,
            agent.draws,
            agent.net_payout()
        );
    }
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}
