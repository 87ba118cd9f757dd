//! force-rgb binary.
//!
//! Reads the hardware registry, finds external displays, and writes display
//! overrides that force RGB 4:4:4 output:
//! - `DisplayVendorID-<vendor>/DisplayProductID-<product>` per display
//! - optional installation into the system overrides directory

mod app;
mod cli;
mod source;

use std::process::ExitCode;

use clap::Parser;
use cli::Cli;

fn main() -> anyhow::Result<ExitCode> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	let outcome = app::run(&cli, &mut std::io::stdout().lock())?;
	tracing::debug!(?outcome, "run finished");
	Ok(outcome.into())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("force_rgb_edid=debug,force_rgb_term=debug")
		} else {
			EnvFilter::new("force_rgb_edid=warn,force_rgb_term=warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}
