//! Desktop collaborator traits and their real implementations.
//!
//! The loops never talk to the platform directly; they see these three
//! capabilities and treat every failure as data. The real implementations
//! shell out to `xdotool` for window queries/activation and use `sysinfo`
//! for the process table, so a missing tool or window degrades to "nothing
//! focused" rather than an error.

use std::process::Command;

use sysinfo::{ProcessRefreshKind, System};

/// Read access to the foreground window.
pub trait WindowSystem: Send + Sync {
    /// Title of the window currently holding input focus, if any.
    fn foreground_title(&self) -> Option<String>;
}

/// Read access to the process table.
pub trait ProcessTable: Send + Sync {
    /// Whether a process matching `name` is currently resident.
    fn is_resident(&self, name: &str) -> bool;
}

/// Ability to push a window into the foreground.
pub trait WindowAutomation: Send + Sync {
    /// Activates the first window whose title matches `title_pattern`.
    fn bring_to_foreground(&self, title_pattern: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Default)]
pub struct DesktopWindowSystem;

impl WindowSystem for DesktopWindowSystem {
    fn foreground_title(&self) -> Option<String> {
        match Command::new("xdotool")
            .args(["getactivewindow", "getwindowname"])
            .output()
        {
            Ok(output) if output.status.success() => {
                let title = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if title.is_empty() {
                    None
                } else {
                    Some(title)
                }
            }
            Ok(_) | Err(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SystemProcessTable;

impl ProcessTable for SystemProcessTable {
    fn is_resident(&self, name: &str) -> bool {
        let mut sys = System::new();
        sys.refresh_processes_specifics(ProcessRefreshKind::new());
        sys.processes_by_name(name).next().is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DesktopWindowAutomation;

impl WindowAutomation for DesktopWindowAutomation {
    fn bring_to_foreground(&self, title_pattern: &str) -> Result<(), String> {
        let output = Command::new("xdotool")
            .args(["search", "--name", title_pattern, "windowactivate"])
            .output()
            .map_err(|err| format!("failed to run xdotool: {err}"))?;
        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        if stderr.is_empty() {
            Err(format!("xdotool exited with {}", output.status))
        } else {
            Err(format!("xdotool exited with {}: {stderr}", output.status))
        }
    }
}
