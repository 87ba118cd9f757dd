//! Candidate finding over raw registry dump text.
//!
//! The dump is unstructured as far as this crate is concerned: all knowledge
//! of marker strings and field names lives behind [`CandidateFinder`], so the
//! extraction rules never see the text format directly.

use std::sync::LazyLock;

use regex::Regex;

/// Raw matches pulled out of a registry dump, each list in dump order.
///
/// Slices borrow from the scanned text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryScan<'a> {
	/// Hex payload of every `"EDID" = <...>` entry.
	pub edids: Vec<&'a str>,
	/// Digits of every `"ProductID"=N` field.
	pub product_ids: Vec<&'a str>,
	/// Digits of every `"LegacyManufacturerID"=N` field.
	pub vendor_ids: Vec<&'a str>,
	/// Every `"ProductName"="..."` value.
	pub product_names: Vec<&'a str>,
}

/// Locates EDID candidates and identity fields in dump text.
pub trait CandidateFinder {
	/// Scans `dump` and returns every match, preserving order of appearance.
	fn scan<'a>(&self, dump: &'a str) -> RegistryScan<'a>;
}

static EDID: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"(?i)"EDID" = <([0-9a-f]+)>"#).expect("EDID pattern is valid"));
static PRODUCT_ID: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#""ProductID"=(\d+)"#).expect("ProductID pattern is valid"));
static VENDOR_ID: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#""LegacyManufacturerID"=(\d+)"#).expect("LegacyManufacturerID pattern is valid")
});
static PRODUCT_NAME: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#""ProductName"="([^"]+)""#).expect("ProductName pattern is valid"));

/// Finder for the text produced by `ioreg -l -w0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IoregFinder;

impl CandidateFinder for IoregFinder {
	fn scan<'a>(&self, dump: &'a str) -> RegistryScan<'a> {
		RegistryScan {
			edids: captures(&EDID, dump),
			product_ids: captures(&PRODUCT_ID, dump),
			vendor_ids: captures(&VENDOR_ID, dump),
			product_names: captures(&PRODUCT_NAME, dump),
		}
	}
}

fn captures<'a>(re: &Regex, text: &'a str) -> Vec<&'a str> {
	re.captures_iter(text)
		.filter_map(|caps| caps.get(1))
		.map(|m| m.as_str())
		.collect()
}
