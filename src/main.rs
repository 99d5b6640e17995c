use windsim::{Scenario, ScenarioConfig};
use windsim::{run_3d, run_headless};
use windsim::{bench_advance, bench_frames};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Step without opening a window
    #[arg(long)]
    headless: bool,

    /// Frames to run headless, overrides the scenario
    #[arg(long)]
    frames: Option<usize>,

    /// RNG seed, overrides the scenario
    #[arg(long)]
    seed: Option<u64>,

    /// Run the timing benchmarks and exit
    #[arg(long)]
    bench: bool,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("opening scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    if args.bench {
        bench_advance()?;
        bench_frames()?;
        return Ok(());
    }

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if args.seed.is_some() {
        scenario_cfg.engine.seed = args.seed;
    }
    if args.frames.is_some() {
        scenario_cfg.engine.frames = args.frames;
    }

    let mut scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;

    if args.headless {
        let frames = scenario.engine.frames;
        run_headless(&mut scenario, frames);
    } else {
        run_3d(scenario);
    }

    Ok(())
}
