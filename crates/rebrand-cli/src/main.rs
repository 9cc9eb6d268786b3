mod args;
mod runner;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use rayon::prelude::*;
use rebrand_core::RegistryConfig;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = RegistryConfig::load(&args.registry)
        .with_context(|| format!("failed to load registry {}", args.registry.display()))?;
    if let Some(postfix) = &args.postfix {
        config = config.with_postfix(postfix.clone());
    }
    let registry = config
        .into_registry()
        .with_context(|| format!("invalid registry {}", args.registry.display()))?;

    let inputs = runner::collect_inputs(&args.inputs)?;
    if let Some(out_dir) = &args.out_dir {
        if !args.check {
            runner::ensure_distinct_outputs(&inputs, out_dir, args.emit)?;
        }
    }
    let reports = inputs
        .par_iter()
        .map(|input| runner::process_file(input, &registry, args.emit))
        .collect::<Result<Vec<_>>>()?;
    let synthesized: usize = reports
        .iter()
        .map(|report| report.stats.rules_synthesized)
        .sum();
    tracing::info!(
        files = reports.len(),
        rules_synthesized = synthesized,
        "Rebrand finished"
    );

    if args.check {
        let changed: Vec<_> = reports.iter().filter(|report| report.changed).collect();
        for report in &changed {
            eprintln!("would rebrand {}", report.input.path.display());
        }
        return Ok(if changed.is_empty() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    match &args.out_dir {
        Some(out_dir) => {
            for report in &reports {
                let target = runner::write_report(report, out_dir, args.emit)?;
                tracing::debug!(file = %target.display(), "Wrote output");
            }
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            let headers = reports.len() > 1;
            for report in &reports {
                if headers {
                    writeln!(out, "==> {} <==", report.input.path.display())?;
                }
                out.write_all(report.output.as_bytes())?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
