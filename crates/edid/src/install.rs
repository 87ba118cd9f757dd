//! Cleaning and installing generated override directories.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::InstallError;

/// System overrides directory before macOS 10.15.
pub const LEGACY_OVERRIDES_DIR: &str = "/System/Library/Displays/Contents/Resources/Overrides";
/// System overrides directory on macOS 10.15 and later.
pub const OVERRIDES_DIR: &str = "/Library/Displays/Contents/Resources/Overrides";

/// Lowercase prefix of generated vendor directories.
const VENDOR_DIR_PREFIX: &str = "displayvendorid";

/// Timestamp appended to displaced overrides.
const BACKUP_STAMP: &str = "%Y-%m-%d %H.%M.%S";

/// Overrides directory used by the given macOS version, e.g. `"14.2.1"`.
pub fn default_overrides_dir(os_version: &str) -> PathBuf {
	if version_below(os_version, &[10, 15]) {
		PathBuf::from(LEGACY_OVERRIDES_DIR)
	} else {
		PathBuf::from(OVERRIDES_DIR)
	}
}

fn version_below(version: &str, bound: &[u32]) -> bool {
	let parts: Vec<u32> = version
		.trim()
		.split('.')
		.map(|part| part.parse().unwrap_or(0))
		.collect();
	parts.as_slice() < bound
}

/// Removes vendor override directories left in `dir` by earlier runs.
///
/// Returns the names of the removed directories. A missing `dir` is treated
/// as empty.
pub fn clean_overrides(dir: &Path) -> Result<Vec<String>, InstallError> {
	let entries = match fs::read_dir(dir) {
		Ok(entries) => entries,
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
		Err(e) => return Err(InstallError::io(dir)(e)),
	};

	let mut removed = Vec::new();
	for entry in entries {
		let entry = entry.map_err(InstallError::io(dir))?;
		let name = entry.file_name().to_string_lossy().into_owned();
		if !entry.path().is_dir() || !name.to_ascii_lowercase().starts_with(VENDOR_DIR_PREFIX) {
			continue;
		}
		fs::remove_dir_all(entry.path()).map_err(InstallError::io(entry.path()))?;
		tracing::debug!(dir = %name, "removed previous override directory");
		removed.push(name);
	}
	removed.sort();
	Ok(removed)
}

/// Copies vendor directories from `source` into `dest`.
///
/// Each directory is first copied into a hidden staging directory inside
/// `dest`. Only then is an existing `dest/<vendor>` renamed with a
/// `-<timestamp>` suffix taken from `now` and the staged copy renamed into
/// place. If that last rename fails the backup is moved back, so a failed
/// install leaves the previous override active. Returns the installed
/// directories.
pub fn install_overrides(
	source: &Path,
	vendor_dirs: &[String],
	dest: &Path,
	now: NaiveDateTime,
) -> Result<Vec<PathBuf>, InstallError> {
	fs::create_dir_all(dest).map_err(InstallError::io(dest))?;

	let mut installed = Vec::with_capacity(vendor_dirs.len());
	for name in vendor_dirs {
		let from = source.join(name);
		let to = dest.join(name);

		let staged = tempfile::Builder::new()
			.prefix(&format!(".{name}-"))
			.tempdir_in(dest)
			.map_err(InstallError::io(dest))?;
		copy_files(&from, staged.path())?;
		// Temp dirs are created owner-only; overrides must be readable system-wide.
		#[cfg(unix)]
		{
			use std::os::unix::fs::PermissionsExt;
			fs::set_permissions(staged.path(), fs::Permissions::from_mode(0o755))
				.map_err(InstallError::io(staged.path()))?;
		}

		let backup = if fs::symlink_metadata(&to).is_ok() {
			let backup = dest.join(format!("{name}-{}", now.format(BACKUP_STAMP)));
			fs::rename(&to, &backup).map_err(InstallError::io(&to))?;
			tracing::info!(from = %to.display(), to = %backup.display(), "backed up existing override");
			Some(backup)
		} else {
			None
		};

		if let Err(error) = fs::rename(staged.path(), &to) {
			if let Some(backup) = &backup
				&& let Err(restore) = fs::rename(backup, &to)
			{
				tracing::warn!(backup = %backup.display(), error = %restore, "failed to restore previous override");
			}
			return Err(InstallError::io(&to)(error));
		}
		// Renamed away; nothing left for the guard to remove.
		let _ = staged.keep();

		tracing::info!(path = %to.display(), "installed override");
		installed.push(to);
	}
	Ok(installed)
}

/// Copies the regular files of `from` into the existing directory `to`.
fn copy_files(from: &Path, to: &Path) -> Result<(), InstallError> {
	for entry in fs::read_dir(from).map_err(InstallError::io(from))? {
		let path = entry.map_err(InstallError::io(from))?.path();
		if !path.is_file() {
			continue;
		}
		let Some(file_name) = path.file_name() else {
			continue;
		};
		fs::copy(&path, to.join(file_name)).map_err(InstallError::io(&path))?;
	}
	Ok(())
}
