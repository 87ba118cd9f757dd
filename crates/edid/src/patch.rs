//! Base EDID block patching.
//!
//! The patch forces the feature support byte to advertise RGB 4:4:4 only,
//! drops every extension block, and repairs the checksum so the block still
//! validates.

use crate::error::EdidError;

/// Length of the base EDID block.
pub const BLOCK_LEN: usize = 128;
/// Offset of the feature support byte.
pub const FEATURE_SUPPORT: usize = 24;
/// Offset of the extension block count.
pub const EXTENSION_COUNT: usize = 126;
/// Offset of the checksum byte.
pub const CHECKSUM: usize = 127;
/// Color encoding bits of the feature support byte. Clear means RGB 4:4:4 only.
pub const COLOR_ENCODING_MASK: u8 = 0b0001_1000;

/// A patched 128-byte base block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchedEdid {
	block: [u8; BLOCK_LEN],
	dropped_extensions: u8,
}

impl PatchedEdid {
	/// Decodes `hex` and patches the result.
	pub fn from_hex(hex: &str) -> Result<Self, EdidError> {
		Self::from_bytes(&hex::decode(hex)?)
	}

	/// Patches the base block of a captured EDID.
	///
	/// Bytes past the base block are ignored.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, EdidError> {
		let mut block: [u8; BLOCK_LEN] = bytes
			.get(..BLOCK_LEN)
			.and_then(|b| b.try_into().ok())
			.ok_or(EdidError::Truncated { len: bytes.len() })?;

		block[FEATURE_SUPPORT] &= !COLOR_ENCODING_MASK;
		let dropped_extensions = block[EXTENSION_COUNT];
		block[EXTENSION_COUNT] = 0;
		block[CHECKSUM] = checksum(&block[..CHECKSUM]);

		Ok(Self {
			block,
			dropped_extensions,
		})
	}

	/// The patched block.
	pub fn as_bytes(&self) -> &[u8; BLOCK_LEN] {
		&self.block
	}

	/// The recomputed checksum byte.
	pub fn checksum(&self) -> u8 {
		self.block[CHECKSUM]
	}

	/// Extension block count the capture declared before patching.
	pub fn dropped_extensions(&self) -> u8 {
		self.dropped_extensions
	}
}

/// Returns the byte that makes `bytes` plus itself sum to zero modulo 256.
pub fn checksum(bytes: &[u8]) -> u8 {
	bytes.iter().fold(0u8, |sum, &b| sum.wrapping_add(b)).wrapping_neg()
}
