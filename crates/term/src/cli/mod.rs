//! CLI schema and parsing helpers for the force-rgb binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use force_rgb_edid::{DisplayIsTv, RunOptions, Strategy};

/// Identity source for detected displays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
	/// Registry fields when present, EDID header bytes otherwise
	#[default]
	Auto,
	/// Registry `ProductID`/`LegacyManufacturerID`/`ProductName` fields only
	Structured,
	/// EDID manufacturer and product code bytes only
	Bytes,
}

impl From<StrategyArg> for Strategy {
	fn from(arg: StrategyArg) -> Self {
		match arg {
			StrategyArg::Auto => Strategy::Auto,
			StrategyArg::Structured => Strategy::Structured,
			StrategyArg::Bytes => Strategy::ByteDerived,
		}
	}
}

#[derive(Parser, Debug)]
#[command(name = "force-rgb")]
#[command(about = "Generate display overrides that force RGB 4:4:4 output")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Read the registry dump from a file (`-` for stdin) instead of running `ioreg -l -w0`
	#[arg(long, value_name = "PATH")]
	pub dump: Option<PathBuf>,

	/// Directory to write DisplayVendorID-* overrides into
	#[arg(long, short = 'o', value_name = "DIR", default_value = ".")]
	pub output_dir: PathBuf,

	/// How vendor and product ids are determined
	#[arg(long, value_enum, default_value_t)]
	pub strategy: StrategyArg,

	/// Force the DisplayIsTV property (none, true, or false)
	#[arg(long, short = 'd', value_name = "VALUE", default_value = "none")]
	pub display_is_tv: DisplayIsTv,

	/// Remove DisplayVendorID-* directories from the output directory first
	#[arg(long)]
	pub clean: bool,

	/// Copy generated overrides into the system overrides directory
	#[arg(long)]
	pub install: bool,

	/// Overrides directory used by --install (detected from the OS version if omitted)
	#[arg(long, value_name = "DIR", requires = "install")]
	pub overrides_dir: Option<PathBuf>,

	/// Verbose logging
	#[arg(long, short = 'v')]
	pub verbose: bool,
}

impl Cli {
	/// Pipeline settings selected on the command line.
	pub fn run_options(&self) -> RunOptions {
		RunOptions {
			strategy: self.strategy.into(),
			display_is_tv: self.display_is_tv,
		}
	}
}

#[cfg(test)]
mod tests;
