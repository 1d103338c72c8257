//! The archive binary, located once and passed to every operation.

use std::path::Path;
use std::process::{Command, Output};

use archive_core::error::{ArchiveError, Result};
use archive_core::options::ArchiveOptions;

/// Proof that the archive binary answered the liveness probe.
#[derive(Debug, Clone)]
pub struct SevenZip {
    binary: String,
}

impl SevenZip {
    /// Run `binary` with no arguments. Fails with `BinaryNotFound` when it
    /// cannot be started or exits unsuccessfully.
    pub fn locate(binary: &str) -> Result<Self> {
        if !archive_utils::binary_runs(binary) {
            return Err(ArchiveError::BinaryNotFound {
                binary: binary.to_string(),
            });
        }
        log::debug!("Found archive binary `{}`", binary);
        Ok(Self {
            binary: binary.to_string(),
        })
    }

    pub fn from_options(options: &ArchiveOptions) -> Result<Self> {
        Self::locate(&options.seven_zip_binary)
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Run a subcommand against `archive` and return its output. A failing
    /// exit status is an error carrying stderr.
    pub(crate) fn run(
        &self,
        command: &str,
        switches: &[String],
        archive: &Path,
        names: &[&str],
    ) -> Result<Output> {
        let mut cmd = Command::new(&self.binary);
        cmd.arg(command).args(switches).arg(archive.as_os_str());
        if !names.is_empty() {
            // `-spd` keeps wildcard characters in entry names literal
            cmd.arg("-spd").arg("--").args(names);
        }

        log::debug!("Running {} {} on {}", self.binary, command, archive.display());

        let output = cmd
            .output()
            .map_err(|e| ArchiveError::Command(format!("Failed to run {}: {}", self.binary, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ArchiveError::Command(format!(
                "{} {} failed on {}: {}",
                self.binary,
                command,
                archive.display(),
                stderr.trim()
            )));
        }
        Ok(output)
    }
}
