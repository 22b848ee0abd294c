mod config;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use triad_core::{DEFAULT_TRAILING_WINDOW, NudgeMode, linspace, simulate};

use crate::config::RunConfig;
use crate::report::{Report, render_text};

#[derive(Parser)]
#[command(name = "triad", about = "Triadic facet/dwelling model simulator")]
struct Cli {
    /// TOML file with [model] and [nudge] sections (default: $TRIAD_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    /// Override Hill output scale
    #[arg(long, global = true)]
    gamma: Option<f64>,

    /// Override Hill half-maximal input
    #[arg(long, global = true)]
    threshold: Option<f64>,

    /// Override Hill exponent
    #[arg(long, global = true)]
    steepness: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the unperturbed and nudged scenarios and summarize them
    Simulate {
        /// Nudge mode: jump or pulse (default: config, else jump)
        #[arg(long)]
        mode: Option<NudgeMode>,

        /// Time of the intervention
        #[arg(long, default_value_t = 25.0)]
        intervention_time: f64,

        /// End of the time grid (grid starts at 0)
        #[arg(long, default_value_t = 50.0)]
        t_end: f64,

        /// Number of grid samples
        #[arg(long, default_value_t = 500)]
        samples: usize,

        /// Initial state f1,f2,f3,d
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        y0: Option<Vec<f64>>,

        /// Trailing window (samples) for end-of-run averages
        #[arg(long, default_value_t = DEFAULT_TRAILING_WINDOW)]
        window: usize,

        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Tabulate the Hill activation curve over [0, 1]
    Curve {
        /// Number of points
        #[arg(long, default_value_t = 11)]
        points: usize,
    },

    /// Print the effective configuration as TOML
    Params,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<RunConfig> {
    let mut config = RunConfig::resolve(cli.config.as_deref())?;
    if let Some(gamma) = cli.gamma {
        config.model.gamma = gamma;
    }
    if let Some(threshold) = cli.threshold {
        config.model.threshold = threshold;
    }
    if let Some(steepness) = cli.steepness {
        config.model.steepness = steepness;
    }
    config
        .model
        .validate()
        .context("invalid model parameters")?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Simulate {
            mode,
            intervention_time,
            t_end,
            samples,
            y0,
            window,
            json,
        } => cmd_simulate(
            &cli,
            *mode,
            *intervention_time,
            *t_end,
            *samples,
            y0.as_deref(),
            *window,
            *json,
        ),
        Commands::Curve { points } => cmd_curve(&cli, *points),
        Commands::Params => cmd_params(&cli),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_simulate(
    cli: &Cli,
    mode: Option<NudgeMode>,
    intervention_time: f64,
    t_end: f64,
    samples: usize,
    y0: Option<&[f64]>,
    window: usize,
    json: bool,
) -> Result<()> {
    let config = load_config(cli)?;
    let nudge = config.nudge_for(mode);
    let t = linspace(0.0, t_end, samples).context("invalid time grid")?;

    tracing::info!(
        "simulating {} samples over [0, {t_end}], {} nudge at t={intervention_time}",
        samples,
        nudge.mode()
    );
    let sim = simulate(&t, y0, intervention_time, nudge, &config.model)
        .context("simulation failed")?;

    let report = Report::new(&t, intervention_time, &sim, window);
    if json {
        let out = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{out}");
    } else {
        print!("{}", render_text(&report));
    }
    Ok(())
}

fn cmd_curve(cli: &Cli, points: usize) -> Result<()> {
    let config = load_config(cli)?;
    let hill = config.model.hill();
    let xs = linspace(0.0, 1.0, points).context("invalid point count")?;

    println!(
        "# hill: gamma={}, threshold={}, steepness={}",
        hill.gamma, hill.threshold, hill.steepness
    );
    for (x, y) in xs.iter().zip(hill.eval_all(&xs)) {
        println!("{x:.4}\t{y:.6}");
    }
    Ok(())
}

fn cmd_params(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let out = toml::to_string_pretty(&config).context("failed to render config")?;
    print!("{out}");
    Ok(())
}
