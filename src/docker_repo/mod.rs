// Docker container stats via bollard

mod stats;

use crate::models::ContainerStats;
use bollard::Docker;
use bollard::query_parameters::{ListContainersOptions, StatsOptions};
use futures_util::StreamExt;
use std::collections::HashMap;
use tracing::warn;

pub struct DockerRepo {
    docker: Docker,
}

impl DockerRepo {
    pub fn connect() -> anyhow::Result<Self> {
        let docker = Docker::connect_with_unix_defaults()?;
        Ok(Self { docker })
    }

    /// One stats sample per running container, in listing order. A container
    /// whose stats frame cannot be fetched or processed is skipped with a
    /// warning; the rest of the response is still served.
    pub async fn collect_stats(&self) -> anyhow::Result<Vec<ContainerStats>> {
        let mut filters = HashMap::new();
        filters.insert("status".to_string(), vec!["running".to_string()]);

        let filter = ListContainersOptions {
            all: false,
            filters: Some(filters),
            ..Default::default()
        };

        let containers = self.docker.list_containers(Some(filter)).await?;

        let samples = containers.iter().map(|c| {
            let id = c.id.as_ref().cloned().unwrap_or_default();
            let name = c
                .names
                .as_ref()
                .and_then(|n| n.first())
                .cloned()
                .unwrap_or_else(|| id.clone());
            let name = name.trim_start_matches('/').to_string();
            self.sample_container(id, name)
        });

        let collected = futures_util::future::join_all(samples).await;
        Ok(collected.into_iter().flatten().collect())
    }

    /// Fetch a single stats frame for one container and reduce it to the
    /// wire shape.
    async fn sample_container(&self, id: String, name: String) -> Option<ContainerStats> {
        let options = StatsOptions {
            stream: false,
            ..Default::default()
        };
        let mut stream = self.docker.stats(&id, Some(options));

        match stream.next().await {
            Some(Ok(frame)) => {
                let parsed = stats::process_statistics(&frame, &name);
                if parsed.is_none() {
                    warn!(container = %name, "stats frame missing CPU samples; skipping");
                }
                parsed
            }
            Some(Err(e)) => {
                warn!(container = %name, error = %e, "stats fetch failed; skipping");
                None
            }
            None => {
                warn!(container = %name, "empty stats stream; skipping");
                None
            }
        }
    }
}
