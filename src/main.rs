use anyhow::Result;
use dockwatch::*;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tokio::sync::{RwLock, watch};

/// Presenter stand-in: format one snapshot for the terminal.
fn render_snapshot(snapshot: &models::Snapshot) -> String {
    if snapshot.is_empty() {
        return "(no running containers)\n".to_string();
    }
    let mut out = String::new();
    for container in snapshot {
        out.push_str(&format!(
            "{:<24} CPU: {:>7.2}%   Mem: {:>10.2} MB\n",
            container.name, container.cpu_usage, container.memory_usage
        ));
    }
    out
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let app_config = config::AppConfig::load()?;
    let prefs = prefs::PrefsStore::open_default()?;
    let address = prefs
        .get(prefs::ENDPOINT_ADDRESS_KEY)
        .unwrap_or_else(|| app_config.watcher.default_endpoint.clone());
    tracing::info!(address = %address, "watching stats endpoint");

    let endpoint = Arc::new(RwLock::new(address));
    let (tx, mut rx) = watch::channel(models::Snapshot::new());
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let poller_handle = poller::spawn(
        poller::PollerDeps {
            endpoint: endpoint.clone(),
            tx,
            shutdown_rx,
        },
        poller::PollerConfig {
            poll_interval_ms: app_config.watcher.poll_interval_ms,
            request_timeout_ms: app_config.watcher.request_timeout_ms,
        },
    );

    // Render every published snapshot; failed ticks publish nothing, so the
    // last good list stays on screen.
    let render_handle = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let rendered = render_snapshot(&rx.borrow_and_update());
            println!("--- container stats ---");
            print!("{rendered}");
        }
    });

    // Each non-empty stdin line is a new endpoint address: stored for the
    // next tick and persisted so a restart keeps watching the same place.
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(line) => {
                        let new_address = line.trim();
                        if new_address.is_empty() {
                            continue;
                        }
                        *endpoint.write().await = new_address.to_string();
                        if let Err(e) = prefs.set(prefs::ENDPOINT_ADDRESS_KEY, new_address) {
                            tracing::warn!(error = %e, "failed to persist endpoint address");
                        }
                        tracing::info!(address = %new_address, "endpoint address updated");
                    }
                    None => {
                        // stdin closed (e.g. piped run); keep polling until a signal
                        stdin_open = false;
                    }
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Received shutdown signal");
                break;
            }
        }
    }

    let _ = shutdown_tx.send(());
    let _ = poller_handle.await;
    render_handle.abort();
    Ok(())
}
