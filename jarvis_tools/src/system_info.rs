use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use jarvis_core::SystemInfoProvider;
use sysinfo::{Disks, MINIMUM_CPU_UPDATE_INTERVAL, System};
use tracing::debug;

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Reports the OS, processor, memory, CPU load and main disk through `sysinfo`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInfo;

#[derive(Debug, Clone, PartialEq)]
pub struct HostSnapshot {
    pub os: String,
    pub processor: String,
    /// Bytes.
    pub memory_total: u64,
    pub memory_available: u64,
    /// Percent across all cores.
    pub cpu_usage: f32,
    pub disk: Option<DiskSpace>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskSpace {
    /// Bytes.
    pub total: u64,
    pub available: u64,
}

#[expect(clippy::cast_precision_loss, reason = "sizes are reported to two decimals")]
fn gib(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GIB
}

#[expect(clippy::cast_precision_loss, reason = "percentages are reported to one decimal")]
fn percent_used(total: u64, available: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    total.saturating_sub(available) as f64 / total as f64 * 100.0
}

impl HostSnapshot {
    /// Samples the machine. CPU usage needs two readings, so this blocks for
    /// `MINIMUM_CPU_UPDATE_INTERVAL`.
    #[must_use]
    pub fn capture() -> Self {
        let mut system = System::new();
        system.refresh_memory();
        system.refresh_cpu_usage();
        std::thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL);
        system.refresh_cpu_usage();

        let processor = system
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
            .unwrap_or_else(|| std::env::consts::ARCH.to_string());
        let os = System::long_os_version()
            .or_else(System::name)
            .unwrap_or_else(|| std::env::consts::OS.to_string());

        let disks = Disks::new_with_refreshed_list();
        let main_disk = disks
            .iter()
            .find(|disk| disk.mount_point() == Path::new("/"))
            .or_else(|| disks.iter().next());
        let disk = main_disk.map(|disk| DiskSpace {
            total: disk.total_space(),
            available: disk.available_space(),
        });
        if disk.is_none() {
            debug!("No disks reported");
        }

        Self {
            os,
            processor,
            memory_total: system.total_memory(),
            memory_available: system.available_memory(),
            cpu_usage: system.global_cpu_usage(),
            disk,
        }
    }

    #[must_use]
    pub fn describe(&self) -> String {
        let mut info = format!(
            "You're running {} with a {} processor. ",
            self.os, self.processor
        );
        info.push_str(&format!(
            "You have {:.2} GB of RAM with {:.1}% in use. ",
            gib(self.memory_total),
            percent_used(self.memory_total, self.memory_available)
        ));
        info.push_str(&format!("Your CPU is at {:.1}% capacity.", self.cpu_usage));
        if let Some(disk) = self.disk {
            info.push_str(&format!(
                " Your main disk has {:.2} GB total with {:.1}% used.",
                gib(disk.total),
                percent_used(disk.total, disk.available)
            ));
        }
        info
    }
}

#[async_trait]
impl SystemInfoProvider for SystemInfo {
    async fn snapshot(&self) -> anyhow::Result<String> {
        let snapshot = tokio::task::spawn_blocking(HostSnapshot::capture)
            .await
            .context("System information task failed")?;
        Ok(snapshot.describe())
    }
}
