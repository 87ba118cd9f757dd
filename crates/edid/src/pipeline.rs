//! End-to-end extraction and override emission.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Component, PathBuf};

use crate::emit::{Report, emit};
use crate::error::{EmitError, Result};
use crate::extract::{Extractor, Strategy};
use crate::plist::DisplayIsTv;
use crate::sink::FileSink;

/// Explanation printed when no external display is found.
pub const NO_DISPLAYS_HELP: &str = "No external display data found!
This might be because:
1. No external displays are connected
2. The display is using a connection type that doesn't expose EDID
3. The display EDID is not accessible via this method";

/// Settings for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
	/// How displays are identified.
	pub strategy: Strategy,
	/// `DisplayIsTV` setting written into every override.
	pub display_is_tv: DisplayIsTv,
}

/// A display whose override could not be produced.
#[derive(Debug)]
pub struct DisplayFailure {
	/// Display name and ids, for reporting.
	pub label: String,
	/// What went wrong.
	pub error: EmitError,
}

/// Outcome of a run that found at least one display.
#[derive(Debug, Default)]
pub struct RunSummary {
	/// Written override paths, relative to the sink root.
	pub written: Vec<PathBuf>,
	/// Displays that failed.
	pub failed: Vec<DisplayFailure>,
}

impl RunSummary {
	/// Whether every display produced an override.
	pub fn is_success(&self) -> bool {
		self.failed.is_empty()
	}

	/// Distinct vendor directories that received an override.
	pub fn vendor_dirs(&self) -> Vec<String> {
		self.written
			.iter()
			.filter_map(|path| match path.components().next() {
				Some(Component::Normal(dir)) => Some(dir.to_string_lossy().into_owned()),
				_ => None,
			})
			.collect::<BTreeSet<_>>()
			.into_iter()
			.collect()
	}
}

/// Finds every external display in `dump` and writes its override to `sink`.
///
/// Progress text goes to `out`. Returns [`ExtractError::NoDisplaysFound`]
/// without writing anything when no display qualifies. A display that fails
/// is recorded in the summary and the remaining displays are still processed.
///
/// [`ExtractError::NoDisplaysFound`]: crate::ExtractError::NoDisplaysFound
pub fn run(dump: &str, options: &RunOptions, sink: &mut dyn FileSink, out: &mut dyn Write) -> Result<RunSummary> {
	let extraction = Extractor::new(options.strategy).extract(dump);
	let multiple = extraction.has_multiple();
	let displays = extraction.into_displays()?;
	let mut report = Report::new(out);

	if multiple {
		tracing::warn!(count = displays.len(), "multiple external displays found");
		report.line(format_args!(
			"Found {} displays!  You should only install the override file for the one which\nis giving you problems.\n",
			displays.len()
		));
	}

	let mut summary = RunSummary::default();
	for display in &displays {
		match emit(display, options.display_is_tv, sink, &mut report) {
			Ok(path) => summary.written.push(path),
			Err(error) => {
				let label = format!(
					"{} (vendor 0x{:x}, product 0x{:x})",
					display.name, display.vendor_id, display.product_id
				);
				tracing::debug!(display = %label, %error, "display override failed");
				summary.failed.push(DisplayFailure { label, error });
			}
		}
	}
	Ok(summary)
}
