//! Runs the override generation for parsed command-line arguments.

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use force_rgb_edid::{DirSink, ExtractError, NO_DISPLAYS_HELP, RunSummary};

use crate::cli::Cli;
use crate::source::{RegistrySource, os_version};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	/// Every detected display received an override.
	Success,
	/// No external display was found.
	NoDisplays,
	/// At least one display failed.
	PartialFailure,
}

impl From<Outcome> for ExitCode {
	fn from(outcome: Outcome) -> Self {
		match outcome {
			Outcome::Success => ExitCode::SUCCESS,
			Outcome::NoDisplays | Outcome::PartialFailure => ExitCode::FAILURE,
		}
	}
}

/// Generates overrides as configured by `cli`, writing progress to `out`.
///
/// Errors are reserved for problems outside a single display: reading the
/// registry, cleaning, and installing.
pub fn run(cli: &Cli, out: &mut dyn Write) -> anyhow::Result<Outcome> {
	if cli.clean {
		let removed = force_rgb_edid::clean_overrides(&cli.output_dir)
			.with_context(|| format!("failed to clean {}", cli.output_dir.display()))?;
		for name in removed {
			writeln!(out, "Removed previous override {name}")?;
		}
	}

	let dump = RegistrySource::from_arg(cli.dump.as_deref())
		.read()
		.context("failed to read the hardware registry")?;

	let mut sink = DirSink::new(&cli.output_dir);
	let summary = match force_rgb_edid::run(&dump, &cli.run_options(), &mut sink, out) {
		Ok(summary) => summary,
		Err(ExtractError::NoDisplaysFound) => {
			writeln!(out, "{NO_DISPLAYS_HELP}")?;
			return Ok(Outcome::NoDisplays);
		}
	};

	if cli.install {
		install(cli, &summary, out)?;
	}

	for failure in &summary.failed {
		writeln!(out, "Failed: {}: {}", failure.label, failure.error)?;
	}
	Ok(if summary.is_success() {
		Outcome::Success
	} else {
		Outcome::PartialFailure
	})
}

fn install(cli: &Cli, summary: &RunSummary, out: &mut dyn Write) -> anyhow::Result<()> {
	let dest = match &cli.overrides_dir {
		Some(dir) => dir.clone(),
		None => force_rgb_edid::default_overrides_dir(&os_version().context("failed to detect the OS version")?),
	};
	writeln!(out, "Installing overrides into {}", dest.display())?;

	let now = chrono::Local::now().naive_local();
	let installed = force_rgb_edid::install_overrides(&cli.output_dir, &summary.vendor_dirs(), &dest, now)
		.with_context(|| format!("failed to install overrides into {}", dest.display()))?;
	for path in installed {
		writeln!(out, " - Installed {}", path.display())?;
	}
	Ok(())
}
