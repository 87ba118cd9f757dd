//! End-to-end runs over synthetic `ioreg` dumps.

use std::fs;

use force_rgb_edid::{DirSink, DisplayIsTv, ExtractError, MemorySink, RunOptions, Strategy, run};

/// A 256-byte capture (base block plus one extension) with the given ids.
fn capture(vendor: u16, product: u16) -> String {
	let mut bytes = vec![0u8; 256];
	bytes[..8].copy_from_slice(&[0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00]);
	bytes[8..10].copy_from_slice(&vendor.to_be_bytes());
	bytes[10..12].copy_from_slice(&product.to_le_bytes());
	bytes[24] = 0xba;
	bytes[126] = 1;
	hex::encode(bytes)
}

fn display_entry(vendor: u16, product: u16, name: &str) -> String {
	format!(
		"    | |   +-o AppleCLCD2  <class AppleCLCD2>\n    | |   |   \"EDID\" = <{}>\n    | |   |   \"DisplayAttributes\" = {{\"ProductAttributes\"={{\"ProductName\"=\"{name}\",\"ProductID\"={product},\"LegacyManufacturerID\"={vendor}}}}}\n",
		capture(vendor, product)
	)
}

fn options(strategy: Strategy) -> RunOptions {
	RunOptions {
		strategy,
		display_is_tv: DisplayIsTv::Omit,
	}
}

#[test]
fn single_display_writes_one_override() {
	let dump = format!(
		"+-o Root  <class IORegistryEntry>\n{}",
		display_entry(0x10ac, 0x1234, "TestMonitor")
	);
	let root = tempfile::tempdir().unwrap();
	let mut sink = DirSink::new(root.path());
	let mut out = Vec::new();

	let summary = run(&dump, &options(Strategy::ByteDerived), &mut sink, &mut out).unwrap();

	assert!(summary.is_success());
	let entries: Vec<_> = fs::read_dir(root.path())
		.unwrap()
		.map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
		.collect();
	assert_eq!(entries, ["DisplayVendorID-10ac"]);

	let xml = fs::read_to_string(root.path().join("DisplayVendorID-10ac/DisplayProductID-1234")).unwrap();
	assert!(xml.contains("<key>DisplayVendorID</key>\n  <integer>4268</integer>"));
	assert!(xml.contains("<key>DisplayProductID</key>\n  <integer>4660</integer>"));
	assert!(xml.contains("<string>TestMonitor - forced RGB mode (EDID override)</string>"));

	let text = String::from_utf8(out).unwrap();
	assert!(!text.contains("displays!"));
}

#[test]
fn structured_and_byte_derived_agree_on_registry_ids() {
	let dump = display_entry(0x10ac, 0x1234, "TestMonitor");
	for strategy in [Strategy::Auto, Strategy::Structured, Strategy::ByteDerived] {
		let mut sink = MemorySink::default();
		let summary = run(&dump, &options(strategy), &mut sink, &mut std::io::sink()).unwrap();
		assert_eq!(summary.vendor_dirs(), ["DisplayVendorID-10ac"], "strategy {strategy:?}");
	}
}

#[test]
fn builtin_panel_only_reports_no_displays() {
	let dump = display_entry(4203, 0xa044, "Color LCD");
	let mut sink = MemorySink::default();

	for strategy in [Strategy::Auto, Strategy::Structured, Strategy::ByteDerived] {
		let err = run(&dump, &options(strategy), &mut sink, &mut std::io::sink()).unwrap_err();
		assert!(matches!(err, ExtractError::NoDisplaysFound));
	}
	assert!(sink.files.is_empty());
}

#[test]
fn two_displays_warn_once_and_write_both() {
	let dump = format!(
		"{}{}{}",
		display_entry(4203, 0xa044, "Color LCD"),
		display_entry(0x10ac, 0x1234, "DELL U2720Q"),
		display_entry(0x1e6d, 0x7707, "LG HDR 4K"),
	);
	let mut sink = MemorySink::default();
	let mut out = Vec::new();

	let summary = run(&dump, &options(Strategy::Auto), &mut sink, &mut out).unwrap();

	assert_eq!(summary.written.len(), 2);
	assert_eq!(sink.files.len(), 2);
	let text = String::from_utf8(out).unwrap();
	assert_eq!(text.matches("Found 2 displays!").count(), 1);
	assert!(text.contains("Found display 'DELL U2720Q'"));
	assert!(text.contains("Found display 'LG HDR 4K'"));
}

#[test]
fn display_is_tv_is_written_when_forced() {
	let dump = display_entry(0x10ac, 0x1234, "TV");
	let mut sink = MemorySink::default();
	let options = RunOptions {
		strategy: Strategy::Auto,
		display_is_tv: DisplayIsTv::Force(true),
	};

	run(&dump, &options, &mut sink, &mut std::io::sink()).unwrap();

	let xml = String::from_utf8(sink.files.into_values().next().unwrap()).unwrap();
	assert!(xml.contains("<key>DisplayIsTV</key>\n  <true/>"));
}
