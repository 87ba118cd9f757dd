//! Display Product Name descriptor decoding.

/// Header of a Display Product Name descriptor (tag `0xFC`).
pub const NAME_DESCRIPTOR_MARKER: &str = "000000fc00";

/// Hex length of the descriptor's text payload (13 bytes).
const NAME_HEX_LEN: usize = 26;

/// Decodes the monitor name programmed into an EDID, if it has one.
///
/// Searches `edid_hex` for [`NAME_DESCRIPTOR_MARKER`] on a byte boundary and
/// decodes the 13 bytes that follow as text, stopping at the `0x0A`
/// terminator or any other control byte and dropping trailing spaces. Returns `None` when there is no descriptor or its
/// text is blank, so callers can fall back to the registry name.
pub fn decode_monitor_name(edid_hex: &str) -> Option<String> {
	let hex = edid_hex.to_ascii_lowercase();
	let start = hex
		.match_indices(NAME_DESCRIPTOR_MARKER)
		.map(|(idx, _)| idx)
		.find(|idx| idx % 2 == 0)?
		+ NAME_DESCRIPTOR_MARKER.len();

	// Descriptors cut short by the end of the capture keep whatever bytes remain.
	let end = (start + NAME_HEX_LEN).min(hex.len());
	let payload = &hex[start..start + (end - start) / 2 * 2];
	let bytes = hex::decode(payload).ok()?;

	let text = String::from_utf8_lossy(&bytes);
	// The name ends at the first control byte; anything after it is padding.
	let text = text.split(char::is_control).next().unwrap_or_default();
	let name = text.trim_end_matches(|c: char| c.is_whitespace() || c == '\0');
	(!name.is_empty()).then(|| name.to_string())
}
