//! Locally spawned geckodriver, one per Firefox fetch.
//!
//! The child is started on a free loopback port and killed when the service
//! is stopped or dropped.

use crate::error::FetchError;
use reqwest::Client;
use std::net::TcpListener;
use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::{Child, Command};

pub const DEFAULT_GECKODRIVER: &str = "geckodriver";

const STARTUP_TIMEOUT: Duration = Duration::from_secs(15);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct GeckoService {
    child: Child,
    endpoint: String,
}

impl GeckoService {
    /// Spawn `binary --port <free port>` and wait until it answers `/status`
    pub async fn start(binary: &Path, client: &Client) -> Result<Self, FetchError> {
        let port = free_port()?;

        let mut cmd = Command::new(binary);
        cmd.arg("--port")
            .arg(port.to_string())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let child = cmd
            .spawn()
            .map_err(|e| FetchError::Launch(format!("could not start {}: {}", binary.display(), e)))?;

        let mut service = Self {
            child,
            endpoint: format!("http://127.0.0.1:{}", port),
        };
        service.wait_ready(client).await?;

        tracing::debug!("geckodriver listening on {}", service.endpoint);
        Ok(service)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn wait_ready(&mut self, client: &Client) -> Result<(), FetchError> {
        let deadline = Instant::now() + STARTUP_TIMEOUT;
        let status_url = format!("{}/status", self.endpoint);

        loop {
            if let Ok(Some(status)) = self.child.try_wait() {
                return Err(FetchError::Launch(format!(
                    "geckodriver exited during startup ({})",
                    status
                )));
            }

            if let Ok(response) = client.get(&status_url).send().await {
                if response.status().is_success() {
                    return Ok(());
                }
            }

            if Instant::now() >= deadline {
                return Err(FetchError::Launch(format!(
                    "geckodriver did not answer on {} within {}s",
                    self.endpoint,
                    STARTUP_TIMEOUT.as_secs()
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    pub async fn stop(mut self) {
        if let Err(e) = self.child.kill().await {
            tracing::debug!("geckodriver already gone: {}", e);
        }
    }
}

fn free_port() -> Result<u16, FetchError> {
    TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .map(|addr| addr.port())
        .map_err(|e| FetchError::Launch(format!("no free port for geckodriver: {}", e)))
}
