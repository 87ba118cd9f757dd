//! Registry dump and OS version providers.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, bail};

/// Where the registry dump text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
	/// Run `ioreg -l -w0`.
	Ioreg,
	/// Read a saved dump.
	File(PathBuf),
	/// Read the dump from standard input.
	Stdin,
}

impl RegistrySource {
	/// Source selected by the `--dump` argument.
	pub fn from_arg(dump: Option<&Path>) -> Self {
		match dump {
			None => Self::Ioreg,
			Some(path) if path == Path::new("-") => Self::Stdin,
			Some(path) => Self::File(path.to_path_buf()),
		}
	}

	/// Reads the full dump text.
	pub fn read(&self) -> anyhow::Result<String> {
		match self {
			Self::Ioreg => command_output("ioreg", &["-l", "-w0"]),
			Self::File(path) => {
				let bytes = std::fs::read(path).with_context(|| format!("failed to read dump {}", path.display()))?;
				Ok(String::from_utf8_lossy(&bytes).into_owned())
			}
			Self::Stdin => {
				let mut bytes = Vec::new();
				std::io::stdin()
					.read_to_end(&mut bytes)
					.context("failed to read dump from stdin")?;
				Ok(String::from_utf8_lossy(&bytes).into_owned())
			}
		}
	}
}

/// Product version reported by `sw_vers`, e.g. `14.2.1`.
pub fn os_version() -> anyhow::Result<String> {
	Ok(command_output("sw_vers", &["-productVersion"])?.trim().to_string())
}

fn command_output(program: &str, args: &[&str]) -> anyhow::Result<String> {
	tracing::debug!(program, ?args, "running command");
	let output = Command::new(program)
		.args(args)
		.output()
		.with_context(|| format!("failed to run {program}"))?;
	if !output.status.success() {
		bail!(
			"{program} exited with {}: {}",
			output.status,
			String::from_utf8_lossy(&output.stderr).trim()
		);
	}
	Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests;
