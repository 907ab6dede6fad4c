use crate::checked::ProbeContext;
use crate::constants::errno;
use crate::error::FactsError;
use crate::probes::{with_scratch, CPU_VALUE_STRIDE, MAX_CPUS};
#[cfg(target_os = "linux")]
use std::fs;
use sysinfo::{CpuExt, SystemExt};

/// One logical CPU's worth of models plus the stride-6 values copied
/// out of the scratch buffer.
pub(crate) struct CpuSample {
    pub models: Vec<String>,
    pub values: Vec<f64>,
}

pub(crate) fn cpu_sample() -> Result<CpuSample, FactsError> {
    with_scratch(|scratch| {
        scratch.system.refresh_cpu();
        let count = scratch.system.cpus().len();
        if count > MAX_CPUS {
            return Err(FactsError::ResourceExceeded {
                probe: "cpus",
                count,
                capacity: MAX_CPUS,
            });
        }

        let ticks = cpu_ticks();
        let mut models = Vec::with_capacity(count);
        for (i, cpu) in scratch.system.cpus().iter().enumerate() {
            models.push(cpu.brand().to_string());
            let base = i * CPU_VALUE_STRIDE;
            let t = ticks.get(i).copied().unwrap_or([0; 5]);
            scratch.cpu_values[base] = cpu.frequency() as f64;
            scratch.cpu_values[base + 1] = t[0] as f64;
            scratch.cpu_values[base + 2] = t[1] as f64;
            scratch.cpu_values[base + 3] = t[2] as f64;
            scratch.cpu_values[base + 4] = t[3] as f64;
            scratch.cpu_values[base + 5] = t[4] as f64;
        }

        Ok(CpuSample {
            models,
            values: scratch.cpu_values[..count * CPU_VALUE_STRIDE].to_vec(),
        })
    })
}

pub(crate) fn free_memory_bytes() -> u64 {
    with_scratch(|scratch| {
        scratch.system.refresh_memory();
        scratch.system.free_memory()
    })
}

pub(crate) fn total_memory_bytes() -> u64 {
    with_scratch(|scratch| {
        scratch.system.refresh_memory();
        scratch.system.total_memory()
    })
}

/// Writes the three load averages into the scratch triple, then copies
/// them out into a fresh fixed-length value.
pub(crate) fn load_average() -> [f64; 3] {
    with_scratch(|scratch| {
        let avg = scratch.system.load_average();
        scratch.avg_values[0] = avg.one;
        scratch.avg_values[1] = avg.five;
        scratch.avg_values[2] = avg.fifteen;
        scratch.avg_values
    })
}

pub(crate) fn uptime_seconds() -> f64 {
    with_scratch(|scratch| scratch.system.uptime() as f64)
}

pub(crate) fn hostname() -> Result<String, ProbeContext> {
    with_scratch(|scratch| scratch.system.host_name())
        .ok_or_else(|| ProbeContext::new("gethostname", errno::ENOENT))
}

/// Kernel release string, uname(2) style.
pub(crate) fn release() -> Result<String, ProbeContext> {
    with_scratch(|scratch| scratch.system.kernel_version())
        .ok_or_else(|| ProbeContext::new("uname", errno::ENOSYS))
}

/// Operating system name, uname(2) sysname style.
pub(crate) fn os_type() -> Result<String, ProbeContext> {
    let sysname = match std::env::consts::OS {
        "linux" | "android" => "Linux",
        "macos" | "ios" => "Darwin",
        "windows" => "Windows_NT",
        "freebsd" => "FreeBSD",
        "openbsd" => "OpenBSD",
        "netbsd" => "NetBSD",
        "dragonfly" => "DragonFly",
        "solaris" | "illumos" => "SunOS",
        _ => "",
    };
    if sysname.is_empty() {
        return Err(ProbeContext::new("uname", errno::ENOSYS));
    }
    Ok(sysname.to_string())
}

/// Cumulative per-CPU ticks as user, nice, sys, idle, irq. The kernel
/// exposes the breakdown on Linux; other targets report zeros while
/// model and speed stay populated.
#[cfg(target_os = "linux")]
fn cpu_ticks() -> Vec<[u64; 5]> {
    match fs::read_to_string("/proc/stat") {
        Ok(stat) => parse_proc_stat(&stat),
        Err(_) => Vec::new(),
    }
}

#[cfg(not(target_os = "linux"))]
fn cpu_ticks() -> Vec<[u64; 5]> {
    Vec::new()
}

#[cfg(any(target_os = "linux", test))]
fn parse_proc_stat(stat: &str) -> Vec<[u64; 5]> {
    let mut out = Vec::new();
    for line in stat.lines() {
        let mut fields = line.split_whitespace();
        let Some(label) = fields.next() else {
            continue;
        };
        // Per-CPU rows only; the aggregate "cpu" row has no digit suffix.
        if !label.starts_with("cpu") || label == "cpu" {
            continue;
        }
        let values: Vec<u64> = fields.filter_map(|v| v.parse().ok()).collect();
        if values.len() < 6 {
            continue;
        }
        // user nice system idle iowait irq ...
        out.push([values[0], values[1], values[2], values[3], values[5]]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proc_stat_parser_picks_per_cpu_rows() {
        let stat = "\
cpu  8362 120 2800 1663000 420 310 95 0 0 0
cpu0 4705 60 1400 831500 210 155 48 0 0 0
cpu1 3657 60 1400 831500 210 155 47 0 0 0
intr 12345678 0 0
ctxt 987654
btime 1700000000
";
        let ticks = parse_proc_stat(stat);
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0], [4705, 60, 1400, 831500, 155]);
        assert_eq!(ticks[1], [3657, 60, 1400, 831500, 155]);
    }

    #[test]
    fn proc_stat_parser_skips_short_rows() {
        let ticks = parse_proc_stat("cpu0 1 2 3\ncpu1 1 2 3 4 5 6 7\n");
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0], [1, 2, 3, 4, 6]);
    }

    #[test]
    fn os_type_names_the_current_platform() {
        let sysname = os_type().expect("supported target");
        assert!(["Linux", "Darwin", "Windows_NT", "FreeBSD", "OpenBSD", "NetBSD"]
            .contains(&sysname.as_str()));
    }

    #[test]
    fn memory_totals_are_plausible() {
        let total = total_memory_bytes();
        let free = free_memory_bytes();
        assert!(total > 0);
        assert!(free <= total);
    }
}
