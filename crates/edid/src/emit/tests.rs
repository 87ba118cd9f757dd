use std::io;
use std::path::Path;

use super::*;
use crate::error::EdidError;
use crate::sink::{DirSink, MemorySink};

fn record(edid: &[u8], name: &str) -> DisplayRecord {
	DisplayRecord {
		edid_hex: hex::encode(edid),
		vendor_id: 0x10ac,
		product_id: 0x1234,
		name: name.to_string(),
	}
}

fn base_block() -> Vec<u8> {
	let mut bytes = vec![0u8; 256];
	bytes[24] = 0x1a;
	bytes[126] = 1;
	bytes
}

struct FailingSink;

impl FileSink for FailingSink {
	fn write(&mut self, _: &Path, _: &[u8]) -> io::Result<PathBuf> {
		Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
	}
}

#[test]
fn descriptor_name_overrides_record_name() {
	let mut edid = base_block();
	edid[54..59].copy_from_slice(&[0, 0, 0, 0xfc, 0]);
	edid[59..72].copy_from_slice(b"ACME123\n     ");

	let descriptor = build_override(&record(&edid, "TestMonitor"), DisplayIsTv::Omit).unwrap();
	assert_eq!(descriptor.name, "ACME123");
}

#[test]
fn record_name_is_fallback() {
	let descriptor = build_override(&record(&base_block(), "TestMonitor"), DisplayIsTv::Omit).unwrap();
	assert_eq!(descriptor.name, "TestMonitor");
	assert_eq!(descriptor.edid.as_bytes()[24], 0x02);
}

#[test]
fn writes_override_and_reports_progress() {
	let mut sink = MemorySink::default();
	let mut out = Vec::new();

	let path = emit(
		&record(&base_block(), "TestMonitor"),
		DisplayIsTv::Omit,
		&mut sink,
		&mut Report::new(&mut out),
	)
	.unwrap();

	assert_eq!(path, Path::new("DisplayVendorID-10ac/DisplayProductID-1234"));
	assert!(sink.files.contains_key(&path));

	let text = String::from_utf8(out).unwrap();
	assert!(text.starts_with("Found display 'TestMonitor': vendor ID=4268 (0x10ac), product ID=4660 (0x1234)\n"));
	assert!(text.contains("Number of extension blocks: 1\n"));
	assert!(text.contains("Recalculated checksum: 0xfe\n"));
	assert!(text.contains("Output file: DisplayVendorID-10ac/DisplayProductID-1234\n"));
}

#[test]
fn reports_resolved_output_location() {
	let root = tempfile::tempdir().unwrap();
	let mut sink = DirSink::new(root.path().join("out"));
	let mut out = Vec::new();

	emit(&record(&base_block(), "TestMonitor"), DisplayIsTv::Omit, &mut sink, &mut Report::new(&mut out)).unwrap();

	let expected = root.path().join("out/DisplayVendorID-10ac/DisplayProductID-1234");
	assert!(expected.is_file());
	let text = String::from_utf8(out).unwrap();
	assert!(text.contains(&format!("Output file: {}\n", expected.display())));
}

#[test]
fn write_failure_carries_path() {
	let mut out = Vec::new();
	let err = emit(
		&record(&base_block(), "TestMonitor"),
		DisplayIsTv::Omit,
		&mut FailingSink,
		&mut Report::new(&mut out),
	)
	.unwrap_err();

	match err {
		EmitError::Write { path, source } => {
			assert_eq!(path, Path::new("DisplayVendorID-10ac/DisplayProductID-1234"));
			assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
		}
		other => panic!("expected write error, got {other:?}"),
	}
}

#[test]
fn short_edid_is_a_display_error() {
	let mut sink = MemorySink::default();
	let mut out = Vec::new();
	let err = emit(&record(&[0u8; 100], "Short"), DisplayIsTv::Omit, &mut sink, &mut Report::new(&mut out))
		.unwrap_err();

	assert!(matches!(err, EmitError::Edid(EdidError::Truncated { len: 100 })));
	assert!(sink.files.is_empty());
}
