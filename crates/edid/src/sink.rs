//! Destinations for generated override documents.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Accepts override documents at paths relative to the sink root.
pub trait FileSink {
	/// Writes `contents` to `path`, creating its parent directory if needed.
	///
	/// An existing directory is not an error. An existing file is replaced.
	/// Returns where the document ended up, for reporting.
	fn write(&mut self, path: &Path, contents: &[u8]) -> io::Result<PathBuf>;
}

/// Writes documents under a root directory.
///
/// Each file is written to a temporary sibling and renamed into place, so an
/// interrupted run never leaves a truncated override behind.
#[derive(Debug, Clone)]
pub struct DirSink {
	root: PathBuf,
}

impl DirSink {
	/// Creates a sink rooted at `root`.
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}
}

impl FileSink for DirSink {
	fn write(&mut self, path: &Path, contents: &[u8]) -> io::Result<PathBuf> {
		let target = self.root.join(path);
		let parent = target.parent().unwrap_or(&self.root);
		std::fs::create_dir_all(parent)?;

		let mut tmp = NamedTempFile::new_in(parent)?;
		tmp.write_all(contents)?;
		tmp.as_file().sync_all()?;
		tmp.persist(&target).map_err(|e| e.error)?;
		Ok(target)
	}
}

/// Keeps documents in memory, keyed by relative path.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
	/// Written documents.
	pub files: BTreeMap<PathBuf, Vec<u8>>,
}

impl FileSink for MemorySink {
	fn write(&mut self, path: &Path, contents: &[u8]) -> io::Result<PathBuf> {
		self.files.insert(path.to_path_buf(), contents.to_vec());
		Ok(path.to_path_buf())
	}
}
