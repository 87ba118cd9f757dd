//! Error types for EDID extraction, patching, and output.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while decoding or patching raw EDID bytes.
#[derive(Debug, Error)]
pub enum EdidError {
	/// The captured hex string has odd length or non-hex characters.
	#[error("malformed EDID hex: {0}")]
	MalformedHex(#[from] hex::FromHexError),

	/// The decoded EDID is shorter than one base block.
	#[error("EDID is {len} bytes, a base block needs 128")]
	Truncated {
		/// Number of bytes actually decoded.
		len: usize,
	},
}

/// Errors that end a run before any display is processed.
#[derive(Debug, Error)]
pub enum ExtractError {
	/// No EDID candidate survived filtering.
	#[error("no external display data found")]
	NoDisplaysFound,
}

/// Failure to produce the override file for a single display.
#[derive(Debug, Error)]
pub enum EmitError {
	/// The display's EDID could not be patched.
	#[error("cannot patch EDID: {0}")]
	Edid(#[from] EdidError),

	/// The override document could not be written.
	#[error("cannot write {path}: {source}")]
	Write {
		/// Path of the override, relative to the sink root.
		path: PathBuf,
		/// The underlying I/O error.
		source: std::io::Error,
	},
}

/// Errors from cleaning or installing override directories.
#[derive(Debug, Error)]
pub enum InstallError {
	/// A filesystem operation on `path` failed.
	#[error("I/O error on {path}: {source}")]
	Io {
		/// Path the operation was applied to.
		path: PathBuf,
		/// The underlying I/O error.
		source: std::io::Error,
	},
}

impl InstallError {
	pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
		let path = path.into();
		move |source| Self::Io { path, source }
	}
}

/// Result type for extraction.
pub type Result<T> = std::result::Result<T, ExtractError>;
