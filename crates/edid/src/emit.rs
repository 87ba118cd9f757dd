//! Per-display patching and override output.

use std::io::Write;
use std::path::PathBuf;

use crate::error::EmitError;
use crate::extract::DisplayRecord;
use crate::name::decode_monitor_name;
use crate::patch::PatchedEdid;
use crate::plist::{DisplayIsTv, OverrideDescriptor};
use crate::sink::FileSink;

/// Progress writer that never fails the run.
///
/// Console output is best effort; write errors are logged and dropped.
pub(crate) struct Report<'a> {
	out: &'a mut dyn Write,
}

impl<'a> Report<'a> {
	pub(crate) fn new(out: &'a mut dyn Write) -> Self {
		Self { out }
	}

	pub(crate) fn line(&mut self, text: impl std::fmt::Display) {
		if let Err(e) = writeln!(self.out, "{text}") {
			tracing::warn!("progress output failed: {e}");
		}
	}
}

/// Builds the override for `record` without writing it.
///
/// The name comes from the EDID name descriptor when there is one, otherwise
/// from the record.
pub fn build_override(record: &DisplayRecord, display_is_tv: DisplayIsTv) -> Result<OverrideDescriptor, EmitError> {
	let edid = PatchedEdid::from_hex(&record.edid_hex)?;
	Ok(OverrideDescriptor {
		name: decode_monitor_name(&record.edid_hex).unwrap_or_else(|| record.name.clone()),
		edid,
		vendor_id: record.vendor_id,
		product_id: record.product_id,
		display_is_tv,
	})
}

/// Patches `record` and writes its override to `sink`.
///
/// Returns the override path relative to the sink root.
pub(crate) fn emit(
	record: &DisplayRecord,
	display_is_tv: DisplayIsTv,
	sink: &mut dyn FileSink,
	report: &mut Report<'_>,
) -> Result<PathBuf, EmitError> {
	let descriptor = build_override(record, display_is_tv)?;
	let (vendor, product) = (descriptor.vendor_id, descriptor.product_id);

	report.line(format_args!(
		"Found display '{}': vendor ID={vendor} (0x{vendor:x}), product ID={product} (0x{product:x})",
		descriptor.name
	));
	report.line(format_args!("Raw EDID data:\n{}", record.edid_hex));
	report.line("Setting color support to RGB 4:4:4 only");
	report.line(format_args!("Number of extension blocks: {}", descriptor.edid.dropped_extensions()));
	report.line("Removing extension block");
	report.line("");
	report.line(format_args!("Recalculated checksum: 0x{:x}", descriptor.edid.checksum()));
	report.line(format_args!("New EDID:\n{}", hex::encode_upper(descriptor.edid.as_bytes())));

	let path = record.override_path();
	let written = sink.write(&path, descriptor.to_xml().as_bytes()).map_err(|source| EmitError::Write {
		path: path.clone(),
		source,
	})?;

	report.line(format_args!("Output file: {}", written.display()));
	report.line("");
	tracing::info!(path = %written.display(), vendor, product, "wrote display override");
	Ok(path)
}

#[cfg(test)]
mod tests;
