// Wire models shared by the stats API and the watcher

use serde::{Deserialize, Serialize};

/// Stats for one running container, as served by `GET /stats`.
///
/// Wire form is camelCase: `{"name": ..., "cpuUsage": ..., "memoryUsage": ...}`.
/// Unknown extra fields are ignored on decode; a missing field or a type
/// mismatch rejects the record (and with it the whole response).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerStats {
    pub name: String,
    /// CPU usage percent; may exceed 100 when a container uses multiple cores.
    pub cpu_usage: f64,
    /// Memory usage in megabytes.
    pub memory_usage: f64,
}

/// The complete set of container stats from one successful fetch.
///
/// Fully replaced on every update, never merged; order follows the API
/// response. A container absent from one response is simply absent from the
/// next snapshot.
pub type Snapshot = Vec<ContainerStats>;
