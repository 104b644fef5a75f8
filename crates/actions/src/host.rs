//! Thin wrappers over the host: process spawn/kill, desktop open, input
//! synthesis, screen capture.

use crate::error::ActionError;
use std::path::{Path, PathBuf};
use sysinfo::System;
use tokio::process::Command;
use tokio::task;
use walkdir::WalkDir;

pub async fn command_exists(command: &str) -> bool {
    Command::new("which")
        .arg(command)
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}

pub async fn which(command: &str) -> Option<PathBuf> {
    let output = Command::new("which").arg(command).output().await.ok()?;
    if !output.status.success() {
        return None;
    }
    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

pub async fn run_checked(command: &str, args: &[&str]) -> Result<(), ActionError> {
    let output = Command::new(command).args(args).output().await?;
    if output.status.success() {
        return Ok(());
    }
    Err(ActionError::OperationFailed(
        String::from_utf8_lossy(&output.stderr).trim().to_string(),
    ))
}

/// Spawn a program detached from our stdio, leaving it running.
pub async fn spawn_detached(program: &Path, args: &[&str]) -> Result<(), ActionError> {
    Command::new(program)
        .args(args)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()?;
    Ok(())
}

/// Hand a path or URL to the desktop's default opener.
pub async fn open_with_default(target: &str) -> Result<(), ActionError> {
    let target = target.to_string();
    task::spawn_blocking(move || open::that(&target))
        .await
        .map_err(|e| ActionError::OperationFailed(e.to_string()))?
        .map_err(ActionError::Io)
}

/// Probe a small set of install roots for an executable, at most two
/// directory levels deep so the walk stays bounded.
pub async fn probe_install_roots(exe: &str, roots: Vec<PathBuf>) -> Option<PathBuf> {
    let exe = exe.to_string();
    task::spawn_blocking(move || {
        for root in roots {
            if !root.is_dir() {
                continue;
            }
            for entry in WalkDir::new(&root)
                .max_depth(2)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file()
                    && entry.file_name().to_string_lossy().eq_ignore_ascii_case(&exe)
                {
                    return Some(entry.into_path());
                }
            }
        }
        None
    })
    .await
    .ok()
    .flatten()
}

/// Forcefully terminate every process matching one of the candidate names.
/// Returns the name that matched, if any did.
pub async fn kill_by_name(candidates: Vec<String>) -> Result<Option<String>, ActionError> {
    task::spawn_blocking(move || {
        let sys = System::new_all();
        for candidate in &candidates {
            let mut killed = false;
            for process in sys.processes().values() {
                let name = process.name();
                // The kernel truncates comm names to 15 bytes.
                let truncated = candidate
                    .get(..candidate.len().min(15))
                    .unwrap_or(candidate.as_str());
                if name.eq_ignore_ascii_case(candidate) || name.eq_ignore_ascii_case(truncated) {
                    if process.kill() {
                        killed = true;
                    }
                }
            }
            if killed {
                return Ok(Some(candidate.clone()));
            }
        }
        Ok(None)
    })
    .await
    .map_err(|e| ActionError::OperationFailed(e.to_string()))?
}

/// Type text into the currently focused window.
pub async fn type_text(text: &str) -> Result<(), ActionError> {
    if text.contains('\0') {
        return Err(ActionError::OperationFailed(
            "text contains null byte".to_string(),
        ));
    }
    if command_exists("wtype").await {
        return run_checked("wtype", &[text]).await;
    }
    if command_exists("ydotool").await {
        return run_checked("ydotool", &["type", text]).await;
    }
    Err(ActionError::OperationFailed(
        "no text input backend found (install 'wtype' or 'ydotool')".to_string(),
    ))
}

/// Capture the full screen to the given file.
pub async fn capture_screen(target: &Path) -> Result<(), ActionError> {
    let target = target.to_string_lossy().to_string();
    if command_exists("grim").await {
        return run_checked("grim", &[&target]).await;
    }
    if command_exists("hyprshot").await {
        return run_checked("hyprshot", &["-m", "output", "-o", &target]).await;
    }
    Err(ActionError::OperationFailed(
        "no screenshot backend found (install 'grim' or 'hyprshot')".to_string(),
    ))
}
