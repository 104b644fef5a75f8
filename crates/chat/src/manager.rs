//! Backend liveness, model discovery, and best-effort auto-start of the
//! Ollama daemon.

use crate::error::ChatError;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

const HEALTH_TIMEOUT: Duration = Duration::from_secs(3);
const TAGS_TIMEOUT: Duration = Duration::from_secs(5);
/// How long to wait for a freshly spawned daemon to come up.
const STARTUP_POLLS: u32 = 15;

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    name: String,
}

#[derive(Debug, Clone)]
pub struct BackendManager {
    base_url: String,
    client: reqwest::Client,
}

impl BackendManager {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Liveness probe: 200 on the base URL means reachable.
    pub async fn is_running(&self) -> bool {
        match self
            .client
            .get(&self.base_url)
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    /// Installed model names, empty on any failure.
    pub async fn list_models(&self) -> Vec<String> {
        let url = format!("{}/api/tags", self.base_url);
        let resp = match self.client.get(&url).timeout(TAGS_TIMEOUT).send().await {
            Ok(resp) if resp.status().is_success() => resp,
            _ => return Vec::new(),
        };
        match resp.json::<TagsResponse>().await {
            Ok(tags) => tags.models.into_iter().map(|m| m.name).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Start the backend daemon if it is not already up, then wait for it
    /// to answer the liveness probe.
    pub async fn ensure_running(&self) -> Result<(), ChatError> {
        if self.is_running().await {
            return Ok(());
        }

        let binary = match locate_backend_binary().await {
            Some(path) => path,
            None => {
                return Err(ChatError::Backend(
                    "ollama not found on this system. Install it from https://ollama.com/download"
                        .to_string(),
                ))
            }
        };

        tracing::info!(binary = %binary.display(), "starting backend daemon");
        Command::new(&binary)
            .arg("serve")
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
            .map_err(|e| ChatError::Backend(format!("failed to start ollama: {e}")))?;

        for _ in 0..STARTUP_POLLS {
            tokio::time::sleep(Duration::from_secs(1)).await;
            if self.is_running().await {
                return Ok(());
            }
        }
        Err(ChatError::Backend(
            "ollama started but isn't responding yet. Try again in a moment.".to_string(),
        ))
    }
}

async fn locate_backend_binary() -> Option<PathBuf> {
    let output = Command::new("which").arg("ollama").output().await.ok()?;
    if output.status.success() {
        let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    let mut candidates = vec![
        PathBuf::from("/usr/local/bin/ollama"),
        PathBuf::from("/usr/bin/ollama"),
    ];
    if let Some(home) = dirs::home_dir() {
        candidates.insert(0, home.join(".local/bin/ollama"));
    }
    candidates.into_iter().find(|p| p.exists())
}
