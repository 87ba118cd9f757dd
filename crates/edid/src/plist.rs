//! Display override property list serialization.
//!
//! The display services read overrides from
//! `DisplayVendorID-<vendor>/DisplayProductID-<product>` and only recognize
//! the exact key names written here.

use std::fmt::Write as _;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

use crate::patch::PatchedEdid;

/// Suffix appended to the display name in generated overrides.
pub const OVERRIDE_NAME_SUFFIX: &str = " - forced RGB mode (EDID override)";

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
"#;

/// Base64 line width inside `<data>`.
const DATA_LINE_WIDTH: usize = 60;

/// Whether an override forces the `DisplayIsTV` property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayIsTv {
	/// Leave the key out and let the OS detect the display type.
	#[default]
	Omit,
	/// Write the key with this value.
	Force(bool),
}

/// Invalid `DisplayIsTV` setting.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid DisplayIsTV value {0:?}: only none, true, or false can be passed")]
pub struct ParseDisplayIsTvError(String);

impl FromStr for DisplayIsTv {
	type Err = ParseDisplayIsTvError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"y" | "1" | "on" | "yes" | "true" => Ok(Self::Force(true)),
			"n" | "0" | "no" | "off" | "false" => Ok(Self::Force(false)),
			"none" | "null" | "omit" => Ok(Self::Omit),
			_ => Err(ParseDisplayIsTvError(s.to_string())),
		}
	}
}

/// Contents of one display override file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideDescriptor {
	/// Display name, without [`OVERRIDE_NAME_SUFFIX`].
	pub name: String,
	/// Patched EDID base block.
	pub edid: PatchedEdid,
	/// Manufacturer id.
	pub vendor_id: u16,
	/// Model id.
	pub product_id: u16,
	/// Optional `DisplayIsTV` override.
	pub display_is_tv: DisplayIsTv,
}

impl OverrideDescriptor {
	/// Value written under `DisplayProductName`.
	pub fn product_name(&self) -> String {
		format!("{}{OVERRIDE_NAME_SUFFIX}", self.name)
	}

	/// Serializes the override as an XML property list.
	pub fn to_xml(&self) -> String {
		let mut out = String::from(HEADER);
		out.push_str("<dict>\n");
		entry(&mut out, "DisplayProductName", "string", &escape(&self.product_name()));
		entry(&mut out, "IODisplayEDID", "data", &wrap_base64(self.edid.as_bytes()));
		entry(&mut out, "DisplayVendorID", "integer", &self.vendor_id.to_string());
		entry(&mut out, "DisplayProductID", "integer", &self.product_id.to_string());
		if let DisplayIsTv::Force(value) = self.display_is_tv {
			let _ = writeln!(out, "  <key>DisplayIsTV</key>\n  <{value}/>");
		}
		out.push_str("</dict>\n</plist>\n");
		out
	}
}

fn entry(out: &mut String, key: &str, tag: &str, value: &str) {
	let _ = writeln!(out, "  <key>{key}</key>\n  <{tag}>{value}</{tag}>");
}

/// Base64 split into newline-terminated lines of [`DATA_LINE_WIDTH`].
fn wrap_base64(bytes: &[u8]) -> String {
	let encoded = STANDARD.encode(bytes);
	let mut out = String::with_capacity(encoded.len() + encoded.len() / DATA_LINE_WIDTH + 1);
	for line in encoded.as_bytes().chunks(DATA_LINE_WIDTH) {
		// base64 output is ASCII, so byte chunks are valid str boundaries.
		out.push_str(std::str::from_utf8(line).unwrap_or_default());
		out.push('\n');
	}
	out
}

fn escape(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'\t' | '\n' | '\r' => out.push(c),
			// Not allowed anywhere in an XML 1.0 document.
			c if c.is_control() || c == '\u{fffe}' || c == '\u{ffff}' => {}
			_ => out.push(c),
		}
	}
	out
}
