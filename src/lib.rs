//! Platform-neutral facade over host OS state: CPU topology, memory
//! totals, load average, network interfaces, user and host identity,
//! and the platform's path/line-ending conventions.
//!
//! Probes are synchronous, short-lived queries against the host;
//! reusable native buffers stay behind a lock inside the probe layer
//! and every public value is a fresh, caller-owned copy.

pub mod compat;
pub mod config;
pub mod constants;
pub mod error;
pub mod report;

mod checked;
mod normalize;
mod probes;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::Serialize;

pub use crate::compat::{Compat, DeprecationPolicy, DeprecationSink, TracingSink};
pub use crate::error::{FactsError, SystemError};

/// Line ending convention of the host platform.
pub const EOL: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Cumulative CPU times in OS ticks, one record per logical CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CpuTimes {
    pub user: u64,
    pub nice: u64,
    pub sys: u64,
    pub idle: u64,
    pub irq: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpuRecord {
    pub model: String,
    pub speed_mhz: u64,
    pub times: CpuTimes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AddressFamily {
    #[serde(rename = "IPv4")]
    V4,
    #[serde(rename = "IPv6")]
    V6,
}

impl AddressFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            AddressFamily::V4 => "IPv4",
            AddressFamily::V6 => "IPv6",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceEntry {
    pub address: String,
    pub netmask: String,
    pub family: AddressFamily,
    pub mac: String,
    pub internal: bool,
    /// Derived from address and netmask; `None` when the mask's suffix
    /// cannot be determined.
    pub cidr: Option<String>,
}

/// Interface name to entries, in native enumeration order.
pub type NetworkInterfaceMap = IndexMap<String, Vec<InterfaceEntry>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserInfo {
    pub username: String,
    pub homedir: String,
    pub shell: Option<String>,
    pub uid: Option<u32>,
    pub gid: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Endianness {
    #[serde(rename = "BE")]
    Be,
    #[serde(rename = "LE")]
    Le,
}

impl Endianness {
    pub fn as_str(self) -> &'static str {
        match self {
            Endianness::Be => "BE",
            Endianness::Le => "LE",
        }
    }
}

// Hardware byte order cannot change at runtime; probe once, keep for
// the process lifetime.
static ENDIANNESS: Lazy<Endianness> = Lazy::new(normalize::native_endianness);

pub fn arch() -> &'static str {
    std::env::consts::ARCH
}

pub fn platform() -> &'static str {
    std::env::consts::OS
}

/// One record per logical CPU, in native enumeration order.
pub fn cpus() -> Result<Vec<CpuRecord>, FactsError> {
    let sample = probes::system::cpu_sample()?;
    Ok(normalize::zip_cpu_records(sample.models, &sample.values))
}

pub fn freemem() -> u64 {
    probes::system::free_memory_bytes()
}

pub fn totalmem() -> u64 {
    probes::system::total_memory_bytes()
}

/// 1-, 5- and 15-minute load averages.
pub fn loadavg() -> [f64; 3] {
    probes::system::load_average()
}

/// Interface addresses grouped by name, with per-entry CIDR notation
/// derived from the netmask. A malformed mask degrades that entry's
/// `cidr` to `None` instead of failing the call.
#[track_caller]
pub fn network_interfaces() -> Result<NetworkInterfaceMap, FactsError> {
    let raw = probes::net::interface_addresses()?;
    Ok(normalize::group_interfaces(raw))
}

#[track_caller]
pub fn hostname() -> Result<String, FactsError> {
    checked::checked(probes::system::hostname())
}

#[track_caller]
pub fn homedir() -> Result<String, FactsError> {
    checked::checked(probes::user::home_directory())
}

#[track_caller]
pub fn user_info() -> Result<UserInfo, FactsError> {
    checked::checked(probes::user::user_info())
}

/// Kernel release string.
#[track_caller]
pub fn release() -> Result<String, FactsError> {
    checked::checked(probes::system::release())
}

/// Operating system name in uname sysname style, e.g. `Linux`,
/// `Darwin`, `Windows_NT`.
#[track_caller]
pub fn os_type() -> Result<String, FactsError> {
    checked::checked(probes::system::os_type())
}

/// Seconds since boot.
pub fn uptime() -> f64 {
    probes::system::uptime_seconds()
}

/// Temp directory per platform convention. The environment is consulted
/// on every call and exactly one trailing separator is stripped, except
/// for a bare root.
pub fn tmpdir() -> String {
    normalize::resolve_tmpdir()
}

pub fn endianness() -> Endianness {
    *ENDIANNESS
}

/// Raw platform constant table (errno and signal numbers).
pub fn constants() -> &'static IndexMap<&'static str, i64> {
    constants::all()
}

#[deprecated(note = "use tmpdir() instead (DEP0022)")]
pub fn tmp_dir() -> String {
    compat::default_compat().tmp_dir()
}

#[deprecated(note = "use network_interfaces() instead (DEP0023)")]
pub fn get_network_interfaces() -> Result<NetworkInterfaceMap, FactsError> {
    compat::default_compat().get_network_interfaces()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endianness_is_stable_and_in_domain() {
        let first = endianness();
        let second = endianness();
        assert_eq!(first, second);
        assert!(matches!(first.as_str(), "BE" | "LE"));
    }

    #[test]
    fn loadavg_always_has_three_finite_values() {
        let avg = loadavg();
        assert_eq!(avg.len(), 3);
        assert!(avg.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn eol_matches_platform() {
        if cfg!(windows) {
            assert_eq!(EOL, "\r\n");
        } else {
            assert_eq!(EOL, "\n");
        }
    }

    #[test]
    fn identity_strings_are_nonempty() {
        assert!(!arch().is_empty());
        assert!(!platform().is_empty());
    }

    #[test]
    fn cpus_reports_every_logical_cpu() {
        let records = cpus().expect("cpu probe");
        assert!(!records.is_empty());
        #[cfg(target_os = "linux")]
        assert!(records.iter().any(|r| r.times.idle > 0));
    }

    #[test]
    fn tmpdir_never_keeps_a_strippable_separator() {
        let dir = tmpdir();
        assert!(!dir.is_empty());
        if dir.len() > 1 {
            let sep = if cfg!(windows) { '\\' } else { '/' };
            if dir.ends_with(sep) {
                // Only the drive-root exception may retain one.
                assert!(cfg!(windows) && dir.ends_with(":\\"));
            }
        }
    }

    #[test]
    fn memory_totals_are_consistent() {
        assert!(totalmem() >= freemem());
    }

    #[test]
    fn constants_table_is_exposed() {
        assert_eq!(constants()["ENOENT"], 2);
    }

    #[test]
    #[allow(deprecated)]
    fn deprecated_aliases_forward() {
        assert_eq!(tmp_dir(), tmpdir());
    }
}
