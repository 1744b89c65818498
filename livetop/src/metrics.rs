//! Metric collection: the read contract the sample loop depends on, and its
//! sysinfo-backed implementation.

use sysinfo::{CpuRefreshKind, MemoryRefreshKind, Networks, RefreshKind, System};

use crate::error::MetricReadError;
use crate::types::NetCounters;

/// Point-in-time reads used on every tick. Each call may fail independently;
/// the loop treats a failure as a stale reading for that series only.
pub trait MetricSource {
    /// Global CPU utilization, 0..=100.
    fn read_cpu(&mut self) -> Result<f64, MetricReadError>;

    /// Used RAM as a percentage of total, 0..=100.
    fn read_memory(&mut self) -> Result<f64, MetricReadError>;

    /// Cumulative bytes sent/received across all interfaces.
    fn read_network_counters(&mut self) -> Result<NetCounters, MetricReadError>;

    fn host_name(&self) -> Option<String> {
        None
    }
}

pub struct SysinfoSource {
    sys: System,
    nets: Networks,
}

impl SysinfoSource {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
            .with_memory(MemoryRefreshKind::nothing().with_ram());

        // First CPU refresh primes the usage delta; the next tick is a full period later.
        let sys = System::new_with_specifics(refresh_kind);
        let nets = Networks::new_with_refreshed_list();
        Self { sys, nets }
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSource for SysinfoSource {
    fn read_cpu(&mut self) -> Result<f64, MetricReadError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(MetricReadError::Unsupported);
        }
        self.sys.refresh_cpu_usage();
        if self.sys.cpus().is_empty() {
            return Err(MetricReadError::Unavailable("cpu"));
        }
        Ok(f64::from(self.sys.global_cpu_usage()).clamp(0.0, 100.0))
    }

    fn read_memory(&mut self) -> Result<f64, MetricReadError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(MetricReadError::Unsupported);
        }
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        if total == 0 {
            return Err(MetricReadError::Unavailable("memory"));
        }
        let used = total.saturating_sub(self.sys.available_memory());
        Ok(used as f64 / total as f64 * 100.0)
    }

    fn read_network_counters(&mut self) -> Result<NetCounters, MetricReadError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(MetricReadError::Unsupported);
        }
        // true: interfaces that disappeared stop contributing to the totals
        self.nets.refresh(true);
        if self.nets.is_empty() {
            return Err(MetricReadError::Unavailable("network interfaces"));
        }
        let counters = self
            .nets
            .iter()
            .fold(NetCounters::default(), |acc, (_, data)| NetCounters {
                sent: acc.sent.saturating_add(data.total_transmitted()),
                received: acc.received.saturating_add(data.total_received()),
            });
        Ok(counters)
    }

    fn host_name(&self) -> Option<String> {
        System::host_name()
    }
}
