//! Display identification from registry scan results.
//!
//! Each EDID candidate that is long enough to be a real external panel is
//! assigned a vendor id, product id, and fallback name using a [`Strategy`].
//! Built-in panels are filtered out here so nothing downstream ever sees them.

use std::path::PathBuf;

use thiserror::Error;

use crate::error::{EdidError, ExtractError, Result};
use crate::scan::{CandidateFinder, IoregFinder, RegistryScan};

/// Shortest EDID hex payload treated as an external display.
pub const MIN_EDID_HEX_LEN: usize = 200;

/// Vendor id reserved for built-in panels (0x106B).
pub const BUILTIN_VENDOR_ID: u16 = 4203;

/// Name used when the registry has no product name for a display.
pub const FALLBACK_NAME: &str = "External Display";

/// Product name fragments that identify a built-in panel.
const BUILTIN_NAME_MARKERS: [&str; 2] = ["Color LCD", "Built-in"];

/// How vendor id, product id, and name are determined for a candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
	/// Structured registry fields when present for the candidate, EDID bytes otherwise.
	#[default]
	Auto,
	/// The i-th `ProductID`, `LegacyManufacturerID`, and `ProductName` fields.
	Structured,
	/// Manufacturer and product code bytes of the EDID header.
	ByteDerived,
}

/// An external display found in the registry dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
	/// Captured EDID bytes as lowercase hex, extension blocks included.
	pub edid_hex: String,
	/// Manufacturer id.
	pub vendor_id: u16,
	/// Manufacturer-assigned model id.
	pub product_id: u16,
	/// Registry product name, or [`FALLBACK_NAME`].
	pub name: String,
}

impl DisplayRecord {
	/// Directory holding overrides for this display's vendor.
	pub fn vendor_dir(&self) -> String {
		format!("DisplayVendorID-{:x}", self.vendor_id)
	}

	/// Override file path relative to the output root.
	pub fn override_path(&self) -> PathBuf {
		PathBuf::from(self.vendor_dir()).join(format!("DisplayProductID-{:x}", self.product_id))
	}
}

/// Why a candidate was dropped.
#[derive(Debug, Error)]
pub enum RejectReason {
	/// Payload shorter than [`MIN_EDID_HEX_LEN`].
	#[error("EDID payload is only {len} hex characters")]
	TooShort {
		/// Hex length of the payload.
		len: usize,
	},
	/// Vendor id is [`BUILTIN_VENDOR_ID`].
	#[error("built-in panel vendor id")]
	BuiltInVendor,
	/// Registry name marks a built-in panel.
	#[error("built-in panel name {0:?}")]
	BuiltInName(String),
	/// A structured identity field has no entry at this ordinal.
	#[error("registry identity fields missing")]
	MissingFields,
	/// A structured id does not fit in 16 bits.
	#[error("id {0} is out of range")]
	IdOutOfRange(String),
	/// The payload could not be decoded.
	#[error(transparent)]
	Edid(#[from] EdidError),
}

/// A dropped candidate and its position among all EDID matches.
#[derive(Debug)]
pub struct Rejection {
	/// Index of the candidate among every EDID match in the dump.
	pub index: usize,
	/// Why it was dropped.
	pub reason: RejectReason,
}

/// Output of a scan: accepted displays and rejected candidates.
#[derive(Debug, Default)]
pub struct Extraction {
	/// External displays in dump order.
	pub displays: Vec<DisplayRecord>,
	/// Candidates that were filtered out.
	pub rejected: Vec<Rejection>,
}

impl Extraction {
	/// Whether more than one external display was found.
	pub fn has_multiple(&self) -> bool {
		self.displays.len() > 1
	}

	/// Returns the displays, or [`ExtractError::NoDisplaysFound`] if there are none.
	pub fn into_displays(self) -> Result<Vec<DisplayRecord>> {
		if self.displays.is_empty() {
			return Err(ExtractError::NoDisplaysFound);
		}
		Ok(self.displays)
	}
}

/// Identity resolved for one candidate before built-in filtering.
struct Identity<'a> {
	vendor_id: u16,
	product_id: u16,
	name: &'a str,
	from_bytes: bool,
}

/// Turns registry dump text into display records.
#[derive(Debug, Clone, Default)]
pub struct Extractor<F = IoregFinder> {
	finder: F,
	strategy: Strategy,
}

impl Extractor {
	/// Creates an extractor for `ioreg` output.
	pub fn new(strategy: Strategy) -> Self {
		Self::with_finder(IoregFinder, strategy)
	}
}

impl<F: CandidateFinder> Extractor<F> {
	/// Creates an extractor over a custom candidate finder.
	pub fn with_finder(finder: F, strategy: Strategy) -> Self {
		Self { finder, strategy }
	}

	/// Scans `dump` and identifies every external display in it.
	pub fn extract(&self, dump: &str) -> Extraction {
		let scan = self.finder.scan(dump);
		let mut out = Extraction::default();
		let mut ordinal = 0;

		for (index, &hex) in scan.edids.iter().enumerate() {
			if hex.len() < MIN_EDID_HEX_LEN {
				reject(&mut out, index, RejectReason::TooShort { len: hex.len() });
				continue;
			}
			let identity = match self.strategy {
				Strategy::Structured => structured(&scan, ordinal),
				Strategy::ByteDerived => byte_derived(&scan, index, hex),
				Strategy::Auto => match structured(&scan, ordinal) {
					Err(RejectReason::MissingFields) => byte_derived(&scan, index, hex),
					resolved => resolved,
				},
			};
			ordinal += 1;

			match identity.and_then(accept) {
				Ok(identity) => out.displays.push(DisplayRecord {
					edid_hex: hex.to_ascii_lowercase(),
					vendor_id: identity.vendor_id,
					product_id: identity.product_id,
					name: identity.name.to_string(),
				}),
				Err(reason) => reject(&mut out, index, reason),
			}
		}

		tracing::debug!(
			strategy = ?self.strategy,
			candidates = scan.edids.len(),
			displays = out.displays.len(),
			"extraction finished"
		);
		out
	}
}

fn reject(out: &mut Extraction, index: usize, reason: RejectReason) {
	tracing::debug!(index, %reason, "EDID candidate rejected");
	out.rejected.push(Rejection { index, reason });
}

fn accept(identity: Identity<'_>) -> std::result::Result<Identity<'_>, RejectReason> {
	if identity.vendor_id == BUILTIN_VENDOR_ID {
		return Err(RejectReason::BuiltInVendor);
	}
	if identity.from_bytes && BUILTIN_NAME_MARKERS.iter().any(|m| identity.name.contains(m)) {
		return Err(RejectReason::BuiltInName(identity.name.to_string()));
	}
	Ok(identity)
}

fn structured<'a>(scan: &RegistryScan<'a>, ordinal: usize) -> std::result::Result<Identity<'a>, RejectReason> {
	let (Some(product), Some(vendor), Some(&name)) = (
		scan.product_ids.get(ordinal),
		scan.vendor_ids.get(ordinal),
		scan.product_names.get(ordinal),
	) else {
		return Err(RejectReason::MissingFields);
	};
	Ok(Identity {
		vendor_id: parse_id(vendor)?,
		product_id: parse_id(product)?,
		name,
		from_bytes: false,
	})
}

fn byte_derived<'a>(
	scan: &RegistryScan<'a>,
	index: usize,
	hex: &str,
) -> std::result::Result<Identity<'a>, RejectReason> {
	let bytes = hex::decode(hex).map_err(EdidError::from)?;
	// Manufacturer id is stored big-endian, the product code little-endian.
	let (vendor_id, product_id) = match bytes.get(8..12) {
		Some(&[m0, m1, p0, p1]) => (u16::from_be_bytes([m0, m1]), u16::from_le_bytes([p0, p1])),
		_ => return Err(EdidError::Truncated { len: bytes.len() }.into()),
	};
	Ok(Identity {
		vendor_id,
		product_id,
		name: scan.product_names.get(index).copied().unwrap_or(FALLBACK_NAME),
		from_bytes: true,
	})
}

fn parse_id(digits: &str) -> std::result::Result<u16, RejectReason> {
	digits
		.parse()
		.map_err(|_| RejectReason::IdOutOfRange(digits.to_string()))
}
