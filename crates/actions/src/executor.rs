//! Maps each action to one host side effect and reports the outcome as a
//! human-readable string. Handlers never propagate errors to the caller.

use crate::apps;
use crate::error::ActionError;
use crate::guard::CommandGuard;
use crate::host;
use crate::search;
use deskmate_intent::{tables, Action, ActionKind};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

/// Wall-clock budget for SYSTEM_CMD shells.
const SHELL_TIMEOUT: Duration = Duration::from_secs(15);
/// Combined output is cut at this many characters.
const OUTPUT_LIMIT: usize = 600;

pub struct ActionExecutor {
    launch_aliases: HashMap<&'static str, &'static str>,
    kill_aliases: HashMap<&'static str, &'static [&'static str]>,
    search_dirs: Vec<PathBuf>,
    install_roots: Vec<PathBuf>,
    screenshot_dir: PathBuf,
}

impl ActionExecutor {
    pub fn new() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
        let screenshot_dir = dirs::desktop_dir().unwrap_or_else(|| home.clone());
        Self {
            launch_aliases: apps::launch_alias_map(),
            kill_aliases: apps::kill_alias_map(),
            search_dirs: vec![
                home.join("Desktop"),
                home.join("Documents"),
                home.join("Downloads"),
            ],
            install_roots: vec![
                home.join(".local/bin"),
                PathBuf::from("/usr/local/bin"),
                PathBuf::from("/opt"),
            ],
            screenshot_dir,
        }
    }

    /// Perform one action. Always returns a result string; internal faults
    /// are folded into it instead of propagating.
    pub async fn run(&self, action: &Action) -> String {
        tracing::info!(kind = %action.kind, argument = %action.argument, "executing action");

        let outcome = match action.kind {
            ActionKind::OpenUrl => self.open_url(&action.argument).await,
            ActionKind::OpenApp => self.open_app(&action.argument).await,
            ActionKind::SearchWeb => self.search_web(&action.argument).await,
            ActionKind::OpenFolder => self.open_folder(&action.argument).await,
            ActionKind::FindFile => {
                search::find_files(&action.argument, self.search_dirs.clone()).await
            }
            ActionKind::SystemCmd => self.system_cmd(&action.argument).await,
            ActionKind::CloseApp => self.close_app(&action.argument).await,
            ActionKind::Screenshot => self.screenshot().await,
            ActionKind::TypeText => self.type_text(&action.argument).await,
        };

        match outcome {
            Ok(message) => message,
            Err(ActionError::Blocked(command)) => {
                tracing::warn!(kind = %action.kind, "command refused by denylist");
                format!("Blocked potentially dangerous command: {command}")
            }
            Err(err) => {
                tracing::warn!(kind = %action.kind, "action failed: {err}");
                format!("Action failed: {err}")
            }
        }
    }

    async fn open_url(&self, url: &str) -> Result<String, ActionError> {
        let url = if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("https://{url}")
        };
        host::open_with_default(&url).await?;
        Ok(format!("Opened: {url}"))
    }

    async fn open_app(&self, name: &str) -> Result<String, ActionError> {
        let key = name.trim().to_lowercase();
        let exe = self
            .launch_aliases
            .get(key.as_str())
            .copied()
            .unwrap_or(key.as_str());

        if let Some(path) = host::which(exe).await {
            host::spawn_detached(&path, &[]).await?;
            return Ok(format!("Opened: {name} (found on PATH)"));
        }

        if let Some(path) = host::probe_install_roots(exe, self.install_roots.clone()).await {
            host::spawn_detached(&path, &[]).await?;
            return Ok(format!("Opened: {name} (found at {})", path.display()));
        }

        // Last resort: the desktop opener knows about .desktop entries and
        // URI handlers that PATH lookups miss.
        match host::open_with_default(exe).await {
            Ok(()) => Ok(format!("Opened: {name} (via desktop opener)")),
            Err(_) => Err(ActionError::NotFound(format!(
                "couldn't find '{name}'. Is it installed?"
            ))),
        }
    }

    async fn search_web(&self, query: &str) -> Result<String, ActionError> {
        let url = format!(
            "https://www.google.com/search?q={}",
            urlencoding::encode(query)
        );
        host::open_with_default(&url).await?;
        Ok(format!("Searched the web for: {query}"))
    }

    async fn open_folder(&self, path: &str) -> Result<String, ActionError> {
        let expanded = tables::expand_home(path);
        if !expanded.exists() {
            return Err(ActionError::NotFound(format!(
                "folder not found: {}",
                expanded.display()
            )));
        }
        host::open_with_default(&expanded.to_string_lossy()).await?;
        Ok(format!("Opened folder: {}", expanded.display()))
    }

    async fn system_cmd(&self, command: &str) -> Result<String, ActionError> {
        CommandGuard::validate(command)?;

        let output = timeout(
            SHELL_TIMEOUT,
            Command::new("sh").args(["-c", command]).output(),
        )
        .await
        .map_err(|_| ActionError::Timeout)??;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let combined = if stdout.trim().is_empty() {
            stderr.trim().to_string()
        } else {
            stdout.trim().to_string()
        };

        if combined.is_empty() {
            return Ok("Command executed (no output).".to_string());
        }
        let mut shown: String = combined.chars().take(OUTPUT_LIMIT).collect();
        if combined.chars().count() > OUTPUT_LIMIT {
            shown.push_str("\n... (truncated)");
        }
        Ok(format!("Command result:\n{shown}"))
    }

    async fn close_app(&self, name: &str) -> Result<String, ActionError> {
        let candidates = apps::kill_candidates(&self.kill_aliases, name);
        match host::kill_by_name(candidates).await? {
            Some(process) => Ok(format!("Closed: {name} ({process})")),
            None => Ok(format!("Couldn't find '{name}' running.")),
        }
    }

    async fn screenshot(&self) -> Result<String, ActionError> {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let target = self
            .screenshot_dir
            .join(format!("deskmate_screenshot_{stamp}.png"));
        host::capture_screen(&target).await?;
        Ok(format!("Screenshot saved: {}", target.display()))
    }

    async fn type_text(&self, text: &str) -> Result<String, ActionError> {
        timeout(Duration::from_secs(5), host::type_text(text))
            .await
            .map_err(|_| ActionError::Timeout)??;
        Ok("Typed text.".to_string())
    }
}

impl Default for ActionExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn denylisted_command_is_refused_without_spawning() {
        let executor = ActionExecutor::new();
        let result = executor
            .run(&Action::new(ActionKind::SystemCmd, "shutdown -h now"))
            .await;
        assert!(result.starts_with("Blocked"), "{result}");
    }

    #[tokio::test]
    async fn denylist_refusal_covers_casing_variants() {
        let executor = ActionExecutor::new();
        for cmd in ["SHUTDOWN now", "Rm -Rf /", "ShUtDoWn"] {
            let result = executor
                .run(&Action::new(ActionKind::SystemCmd, cmd))
                .await;
            assert!(result.starts_with("Blocked"), "{cmd} -> {result}");
        }
    }

    #[tokio::test]
    async fn shell_command_output_is_captured() {
        let executor = ActionExecutor::new();
        let result = executor
            .run(&Action::new(ActionKind::SystemCmd, "echo deskmate-test"))
            .await;
        assert!(result.contains("deskmate-test"), "{result}");
    }

    #[tokio::test]
    async fn long_shell_output_is_truncated() {
        let executor = ActionExecutor::new();
        let result = executor
            .run(&Action::new(
                ActionKind::SystemCmd,
                "yes x | head -c 2000 | tr -d '\\n'; echo",
            ))
            .await;
        assert!(result.contains("... (truncated)"), "{result}");
    }

    #[tokio::test]
    async fn missing_folder_reports_not_found() {
        let executor = ActionExecutor::new();
        let result = executor
            .run(&Action::new(ActionKind::OpenFolder, "/no/such/dir/xyz"))
            .await;
        assert!(result.contains("folder not found"), "{result}");
    }

    #[tokio::test]
    async fn close_unknown_app_reports_not_running() {
        let executor = ActionExecutor::new();
        let result = executor
            .run(&Action::new(
                ActionKind::CloseApp,
                "definitely-not-a-process-xyz",
            ))
            .await;
        assert!(result.contains("Couldn't find"), "{result}");
    }
}
