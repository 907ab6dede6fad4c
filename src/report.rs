//! Serializable snapshot of the whole facade for the CLI. A failed
//! probe degrades to an omitted section with a logged warning, so a
//! partially degraded host still yields a report.

use crate::config::Section;
use crate::{CpuRecord, FactsError, NetworkInterfaceMap, UserInfo, EOL};
use serde::Serialize;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<IdentitySection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<CpuSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemorySection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conventions: Option<ConventionsSection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdentitySection {
    pub arch: &'static str,
    pub platform: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    pub uptime_seconds: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CpuSection {
    pub count: usize,
    pub loadavg: [f64; 3],
    pub cpus: Vec<CpuRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemorySection {
    pub free_bytes: u64,
    pub total_bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkSection {
    pub interfaces: NetworkInterfaceMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homedir: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConventionsSection {
    pub tmpdir: String,
    pub endianness: &'static str,
    pub eol: &'static str,
}

fn ok_or_log<T>(probe: &'static str, outcome: Result<T, FactsError>) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(error = %err, probe, "probe failed, omitting from report");
            None
        }
    }
}

impl Report {
    pub fn collect(sections: &[Section]) -> Self {
        let identity = sections.contains(&Section::Identity).then(|| IdentitySection {
            arch: crate::arch(),
            platform: crate::platform(),
            hostname: ok_or_log("hostname", crate::hostname()),
            os_type: ok_or_log("os_type", crate::os_type()),
            release: ok_or_log("release", crate::release()),
            uptime_seconds: crate::uptime(),
        });

        let cpu = sections.contains(&Section::Cpu).then(|| {
            let cpus = ok_or_log("cpus", crate::cpus()).unwrap_or_default();
            CpuSection {
                count: cpus.len(),
                loadavg: crate::loadavg(),
                cpus,
            }
        });

        let memory = sections.contains(&Section::Memory).then(|| MemorySection {
            free_bytes: crate::freemem(),
            total_bytes: crate::totalmem(),
        });

        let network = sections
            .contains(&Section::Network)
            .then(|| ok_or_log("network_interfaces", crate::network_interfaces()))
            .flatten()
            .map(|interfaces| NetworkSection { interfaces });

        let user = sections.contains(&Section::User).then(|| UserSection {
            user: ok_or_log("user_info", crate::user_info()),
            homedir: ok_or_log("homedir", crate::homedir()),
        });

        let conventions = sections
            .contains(&Section::Conventions)
            .then(|| ConventionsSection {
                tmpdir: crate::tmpdir(),
                endianness: crate::endianness().as_str(),
                eol: EOL,
            });

        Self {
            identity,
            cpu,
            memory,
            network,
            user,
            conventions,
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();

        if let Some(identity) = &self.identity {
            out.push_str("== identity ==\n");
            out.push_str(&format!(
                "arch: {}\nplatform: {}\n",
                identity.arch, identity.platform
            ));
            if let Some(hostname) = &identity.hostname {
                out.push_str(&format!("hostname: {hostname}\n"));
            }
            if let Some(os_type) = &identity.os_type {
                out.push_str(&format!("type: {os_type}\n"));
            }
            if let Some(release) = &identity.release {
                out.push_str(&format!("release: {release}\n"));
            }
            let uptime = Duration::from_secs(identity.uptime_seconds as u64);
            out.push_str(&format!("uptime: {}\n", humantime::format_duration(uptime)));
        }

        if let Some(cpu) = &self.cpu {
            out.push_str("== cpu ==\n");
            out.push_str(&format!(
                "logical cpus: {}\nloadavg: {:.2} {:.2} {:.2}\n",
                cpu.count, cpu.loadavg[0], cpu.loadavg[1], cpu.loadavg[2]
            ));
            for (i, record) in cpu.cpus.iter().enumerate() {
                out.push_str(&format!(
                    "cpu{i}: {} @ {} MHz (user {} nice {} sys {} idle {} irq {})\n",
                    record.model,
                    record.speed_mhz,
                    record.times.user,
                    record.times.nice,
                    record.times.sys,
                    record.times.idle,
                    record.times.irq
                ));
            }
        }

        if let Some(memory) = &self.memory {
            out.push_str("== memory ==\n");
            out.push_str(&format!(
                "free: {} bytes\ntotal: {} bytes\n",
                memory.free_bytes, memory.total_bytes
            ));
        }

        if let Some(network) = &self.network {
            out.push_str("== network ==\n");
            for (name, entries) in &network.interfaces {
                for entry in entries {
                    let cidr = entry.cidr.as_deref().unwrap_or("-");
                    out.push_str(&format!(
                        "{name}: {} {} mask {} mac {} cidr {}{}\n",
                        entry.family.as_str(),
                        entry.address,
                        entry.netmask,
                        entry.mac,
                        cidr,
                        if entry.internal { " (internal)" } else { "" }
                    ));
                }
            }
        }

        if let Some(user) = &self.user {
            out.push_str("== user ==\n");
            if let Some(info) = &user.user {
                out.push_str(&format!("username: {}\n", info.username));
                if let Some(uid) = info.uid {
                    out.push_str(&format!("uid: {uid}\n"));
                }
                if let Some(gid) = info.gid {
                    out.push_str(&format!("gid: {gid}\n"));
                }
                if let Some(shell) = &info.shell {
                    out.push_str(&format!("shell: {shell}\n"));
                }
            }
            if let Some(homedir) = &user.homedir {
                out.push_str(&format!("homedir: {homedir}\n"));
            }
        }

        if let Some(conventions) = &self.conventions {
            out.push_str("== conventions ==\n");
            out.push_str(&format!(
                "tmpdir: {}\nendianness: {}\neol: {:?}\n",
                conventions.tmpdir, conventions.endianness, conventions.eol
            ));
        }

        out
    }
}
