mod menu;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use u_procsim::config::SimulationConfig;
use u_procsim::pool::Scenario;
use u_procsim::report::{render_json, TextReport};
use u_procsim::scheduler::{simulate, Policy};

/// Memory-constrained multi-processor scheduling simulator.
///
/// Selections left off the command line are asked for interactively,
/// unless a configuration file is given.
#[derive(Parser, Debug)]
#[command(name = "u-procsim", version, about)]
struct Args {
    /// Processor scenario (1-4).
    #[arg(short, long)]
    scenario: Option<Scenario>,

    /// Scheduling algorithm (FIFO, SJF, RR, ML).
    #[arg(short, long)]
    algorithm: Option<Policy>,

    /// Workload seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of processes to generate.
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print the batch after the wait/turnaround pre-pass.
    #[arg(long)]
    show_batch: bool,

    /// Print per-processor activity.
    #[arg(long)]
    show_processors: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn resolve_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    let interactive = args.config.is_none();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    if let Some(scenario) = args.scenario {
        config.scenario = scenario;
    } else if interactive {
        config.scenario = menu::select_scenario(&mut input, &mut output)?;
    }

    if let Some(policy) = args.algorithm {
        config.policy = policy;
    } else if interactive {
        config.policy = menu::select_policy(&mut input, &mut output)?;
    }

    if let Some(seed) = args.seed {
        config.seed = seed;
    } else if interactive {
        config.seed = menu::select_seed(&mut input, &mut output)?;
    }

    if let Some(batch_size) = args.batch_size {
        config.workload.batch_size = batch_size;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let config = resolve_config(&args)?;
    info!(?config, "resolved configuration");

    let report = simulate(&config).context("simulation failed")?;

    let rendered = match args.format {
        OutputFormat::Text => TextReport::new(&report)
            .with_batch(args.show_batch)
            .with_processors(args.show_processors)
            .to_string(),
        OutputFormat::Json => render_json(&report)? + "\n",
    };

    let mut stdout = io::stdout().lock();
    write!(stdout, "{rendered}")?;
    Ok(())
}
