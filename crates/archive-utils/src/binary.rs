//! Probes for external binaries on the execution path.

use std::process::{Command, Stdio};

/// Run `program` with no arguments and report whether it exited successfully.
///
/// Only liveness is checked, not which formats the binary supports.
pub fn binary_runs(program: &str) -> bool {
    match Command::new(program)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) => {
            log::debug!("Probe `{}` exited with {}", program, status);
            status.success()
        }
        Err(e) => {
            log::debug!("Probe `{}` failed to start: {}", program, e);
            false
        }
    }
}

/// Report whether `program` can be spawned at all. The exit status is ignored,
/// which suits tools that exit non-zero when printing their version.
pub fn binary_spawns(program: &str, args: &[&str]) -> bool {
    match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) => {
            log::debug!("Probe `{} {}` exited with {}", program, args.join(" "), status);
            true
        }
        Err(e) => {
            log::debug!("Probe `{}` failed to start: {}", program, e);
            false
        }
    }
}
