// Polling client: fetch the stats endpoint on a fixed interval and publish
// the latest decoded snapshot through a watch channel.

use crate::models::Snapshot;
use reqwest::Client;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{RwLock, oneshot, watch};
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::Instrument;
use url::Url;

/// One failure class per tick outcome. All three are recovered locally by the
/// poll loop: logged, previous snapshot left untouched, next tick proceeds.
#[derive(Debug, Error)]
pub enum PollerError {
    /// The configured endpoint address is not a usable URL.
    #[error("invalid endpoint address {address:?}: {reason}")]
    Config { address: String, reason: String },

    /// Network-layer failure: DNS, connect, timeout, or an HTTP error status.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body is not a well-formed stats array.
    #[error("malformed stats body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Shared endpoint address and channels for the poll loop.
pub struct PollerDeps {
    /// Current endpoint address; edits take effect on the next tick.
    pub endpoint: Arc<RwLock<String>>,
    pub tx: watch::Sender<Snapshot>,
    pub shutdown_rx: oneshot::Receiver<()>,
}

/// Poll loop timing.
pub struct PollerConfig {
    pub poll_interval_ms: u64,
    pub request_timeout_ms: u64,
}

/// HTTP client shared by all ticks, with the per-request timeout applied.
pub fn build_client(request_timeout_ms: u64) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_millis(request_timeout_ms))
        .build()
}

/// Validate a user-entered endpoint address. Leading/trailing whitespace is
/// tolerated; addresses are pasted into a text field in practice.
fn parse_endpoint(address: &str) -> Result<Url, PollerError> {
    let trimmed = address.trim();
    let url = Url::parse(trimmed).map_err(|e| PollerError::Config {
        address: address.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(PollerError::Config {
            address: address.to_string(),
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}

/// One tick's work: validate the address, GET it, decode the body.
/// No request is sent for an invalid address, and nothing is published here;
/// the caller swaps the snapshot only on Ok. Exposed for tests.
pub async fn fetch_snapshot(client: &Client, address: &str) -> Result<Snapshot, PollerError> {
    let url = parse_endpoint(address)?;
    let response = client.get(url).send().await?.error_for_status()?;
    let body = response.text().await?;
    let snapshot: Snapshot = serde_json::from_str(&body)?;
    Ok(snapshot)
}

/// Spawns the poll loop: tick immediately, then every `poll_interval_ms`,
/// until shutdown. Every tick is attempted regardless of prior outcome; the
/// fixed interval is the only retry mechanism.
pub fn spawn(deps: PollerDeps, config: PollerConfig) -> tokio::task::JoinHandle<()> {
    let PollerDeps {
        endpoint,
        tx,
        mut shutdown_rx,
    } = deps;
    let PollerConfig {
        poll_interval_ms,
        request_timeout_ms,
    } = config;

    let poller_span = tracing::span!(tracing::Level::DEBUG, "poller", poll_interval_ms);

    let poll_loop = async move {
        let client = match build_client(request_timeout_ms) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "failed to build HTTP client; poller not started");
                return;
            }
        };

        let mut tick = interval(Duration::from_millis(poll_interval_ms));
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    // Ticks are serialized: the next fetch starts only after this
                    // one resolves. A request outlasting the interval makes the
                    // timer skip, not overlap.
                    let address = endpoint.read().await.clone();
                    match fetch_snapshot(&client, &address).await {
                        Ok(snapshot) => {
                            let containers = snapshot.len();
                            tx.send_replace(snapshot);
                            tracing::debug!(
                                operation = "publish_snapshot",
                                containers,
                                "snapshot published"
                            );
                        }
                        Err(e) => {
                            tracing::warn!(
                                error = %e,
                                operation = "fetch_snapshot",
                                address = %address,
                                "tick failed; keeping previous snapshot"
                            );
                        }
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Poller shutting down");
                    break;
                }
            }
        }
    };

    tokio::spawn(poll_loop.instrument(poller_span))
}
