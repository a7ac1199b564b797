#![forbid(unsafe_code)]

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::metadata::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hostcheck::constants::{EXIT_MISMATCH, EXIT_TIMEOUT};
use hostcheck::{cases, cli, hosts, output, resolver, verify};

fn main() -> Result<()> {
    let config = cli::parse_args()?;

    init_logging(config.verbose);

    // Set up interrupt handling
    let interrupted = Arc::new(AtomicBool::new(false));
    let _ = signal_hook::flag::register(signal_hook::consts::SIGINT, interrupted.clone());
    let _ = signal_hook::flag::register(signal_hook::consts::SIGTERM, interrupted.clone());

    let entries = hosts::load_mapping(&config.mapping_path)?;
    let cases = cases::build_cases(&entries);
    tracing::debug!(
        entries = entries.len(),
        cases = cases.len(),
        "case list built"
    );

    let resolver = resolver::from_config(&config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let result = runtime.block_on(verify::run_verification(
        cases,
        resolver,
        &config,
        interrupted,
    ))?;

    if config.json_output {
        println!("{}", output::format_json(&result)?);
    } else {
        output::format_human(&result);
    }

    if result.summary.mismatches > 0 {
        std::process::exit(EXIT_MISMATCH);
    }
    if result.summary.timeouts > 0 {
        std::process::exit(EXIT_TIMEOUT);
    }

    Ok(())
}

/// Route diagnostics to stderr so stdout stays clean for the report stream.
/// `--verbose` turns on debug output for this crate; RUST_LOG is honored
/// either way.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
            .add_directive("hostcheck=debug".parse().expect("static directive parses"))
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    };

    let formatter = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(formatter)
        .with(filter)
        .init();
}
