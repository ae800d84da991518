// Reduce a raw Docker stats frame to the name/cpuUsage/memoryUsage wire shape.

use crate::models::ContainerStats;
use bollard::models::ContainerStatsResponse;

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Compute CPU percent and memory MB from one stats frame. Returns None when
/// the frame carries no CPU samples to diff. Exposed for unit tests.
pub(crate) fn process_statistics(s: &ContainerStatsResponse, name: &str) -> Option<ContainerStats> {
    let cpu_stats = s.cpu_stats.as_ref()?;
    let precpu_stats = s.precpu_stats.as_ref()?;

    let cpu_usage = cpu_stats.cpu_usage.as_ref()?;
    let precpu_usage = precpu_stats.cpu_usage.as_ref()?;

    let cpu_delta =
        cpu_usage.total_usage.unwrap_or(0) as i64 - precpu_usage.total_usage.unwrap_or(0) as i64;
    let system_delta = cpu_stats.system_cpu_usage.unwrap_or(0) as i64
        - precpu_stats.system_cpu_usage.unwrap_or(0) as i64;
    let online = cpu_stats.online_cpus.unwrap_or(1) as f64;
    let cpu_percent = if system_delta > 0 && online > 0.0 {
        (cpu_delta as f64 / system_delta as f64) * online * 100.0
    } else {
        0.0
    };

    let mem_usage = s.memory_stats.as_ref().and_then(|m| m.usage).unwrap_or(0);

    Some(ContainerStats {
        name: name.to_string(),
        cpu_usage: cpu_percent,
        memory_usage: mem_usage as f64 / BYTES_PER_MEGABYTE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bollard::models::{
        ContainerCpuStats, ContainerCpuUsage, ContainerMemoryStats, ContainerStatsResponse,
    };

    fn minimal_cpu_stats(total_usage: u64, system_cpu_usage: u64) -> ContainerCpuStats {
        ContainerCpuStats {
            cpu_usage: Some(ContainerCpuUsage {
                total_usage: Some(total_usage),
                ..Default::default()
            }),
            system_cpu_usage: Some(system_cpu_usage),
            online_cpus: Some(2),
            throttling_data: None,
        }
    }

    #[test]
    fn process_statistics_returns_none_when_cpu_stats_missing() {
        let s = ContainerStatsResponse {
            cpu_stats: None,
            precpu_stats: Some(minimal_cpu_stats(0, 0)),
            ..Default::default()
        };
        assert!(process_statistics(&s, "name").is_none());
    }

    #[test]
    fn process_statistics_returns_none_when_precpu_stats_missing() {
        let s = ContainerStatsResponse {
            cpu_stats: Some(minimal_cpu_stats(100, 1000)),
            precpu_stats: None,
            ..Default::default()
        };
        assert!(process_statistics(&s, "name").is_none());
    }

    #[test]
    fn process_statistics_computes_cpu_percent_and_memory_megabytes() {
        let s = ContainerStatsResponse {
            cpu_stats: Some(minimal_cpu_stats(100_000_000, 1_000_000_000)),
            precpu_stats: Some(minimal_cpu_stats(50_000_000, 500_000_000)),
            memory_stats: Some(ContainerMemoryStats {
                usage: Some(256 * 1024 * 1024),
                ..Default::default()
            }),
            ..Default::default()
        };
        let out = process_statistics(&s, "mycontainer").unwrap();
        assert_eq!(out.name, "mycontainer");
        // delta 50M over system delta 500M on 2 cpus -> 20%
        assert!((out.cpu_usage - 20.0).abs() < 0.01);
        assert!((out.memory_usage - 256.0).abs() < f64::EPSILON);
    }

    #[test]
    fn process_statistics_zero_system_delta_returns_zero_cpu_percent() {
        let s = ContainerStatsResponse {
            cpu_stats: Some(minimal_cpu_stats(100, 500)),
            precpu_stats: Some(minimal_cpu_stats(50, 500)),
            ..Default::default()
        };
        let out = process_statistics(&s, "n").unwrap();
        assert_eq!(out.cpu_usage, 0.0);
    }

    #[test]
    fn process_statistics_missing_memory_reads_as_zero() {
        let s = ContainerStatsResponse {
            cpu_stats: Some(minimal_cpu_stats(100_000, 1_000_000)),
            precpu_stats: Some(minimal_cpu_stats(50_000, 500_000)),
            ..Default::default()
        };
        let out = process_statistics(&s, "n").unwrap();
        assert_eq!(out.memory_usage, 0.0);
    }
}
