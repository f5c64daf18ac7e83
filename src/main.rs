use nbsim::{bench_kernel, verify, RunConfig};

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Run configuration under `scenarios/`; built-in defaults when omitted
    #[arg(short, long)]
    file_name: Option<String>,

    /// Override the initialization seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of kernel calls
    #[arg(long)]
    steps: Option<usize>,

    /// Also cross-check against the array-of-structures kernel
    #[arg(long)]
    verify: bool,
}

// load here to keep main clean
fn load_config(args: &Args) -> Result<RunConfig> {
    let mut cfg = match &args.file_name {
        Some(file_name) => {
            let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
            RunConfig::from_yaml_path(&config_path)?
        }
        None => RunConfig::default(),
    };

    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    if let Some(steps) = args.steps {
        cfg.steps = steps;
    }
    cfg.verify |= args.verify;

    Ok(cfg)
}

fn main() -> Result<()> {
    // logs go to stderr, stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let cfg = load_config(&args)?;
    info!(seed = cfg.seed, steps = cfg.steps, "starting run");

    if cfg.verify {
        let check = verify(cfg.seed, cfg.verify_steps);
        if !check.passed(1e-4, 1e-4) {
            warn!(?check, "lane kernel disagrees with reference kernel");
        }
    }

    let report = bench_kernel(&cfg);
    println!("{report}");

    Ok(())
}
