//! Pure transforms from raw probe output into the stable public shape.

use crate::probes::net::RawInterface;
use crate::probes::CPU_VALUE_STRIDE;
use crate::{AddressFamily, CpuRecord, CpuTimes, Endianness, InterfaceEntry, NetworkInterfaceMap};
use std::net::{Ipv4Addr, Ipv6Addr};

pub(crate) fn native_endianness() -> Endianness {
    if cfg!(target_endian = "big") {
        Endianness::Be
    } else {
        Endianness::Le
    }
}

/// Zips a model list with the co-indexed stride-6 value buffer into
/// owned CPU records, preserving enumeration order. Stride fields map
/// positionally to speed, user, nice, sys, idle, irq.
pub(crate) fn zip_cpu_records(models: Vec<String>, values: &[f64]) -> Vec<CpuRecord> {
    models
        .into_iter()
        .zip(values.chunks_exact(CPU_VALUE_STRIDE))
        .map(|(model, chunk)| CpuRecord {
            model,
            speed_mhz: chunk[0] as u64,
            times: CpuTimes {
                user: chunk[1] as u64,
                nice: chunk[2] as u64,
                sys: chunk[3] as u64,
                idle: chunk[4] as u64,
                irq: chunk[5] as u64,
            },
        })
        .collect()
}

/// Groups raw interface rows by name, deriving the CIDR notation per
/// entry. A mask whose suffix cannot be determined yields `cidr: None`
/// rather than an error; partial network data is still returned.
pub(crate) fn group_interfaces(raw: Vec<RawInterface>) -> NetworkInterfaceMap {
    let mut map = NetworkInterfaceMap::new();
    for RawInterface {
        name,
        address,
        netmask,
        family,
        mac,
        internal,
    } in raw
    {
        let cidr = cidr_suffix(&netmask, family)
            .filter(|&suffix| suffix != 0)
            .map(|suffix| format!("{address}/{suffix}"));
        map.entry(name).or_default().push(InterfaceEntry {
            address,
            netmask,
            family,
            mac,
            internal,
            cidr,
        });
    }
    map
}

/// Count of contiguous leading set bits in a subnet mask, protocol-aware
/// for the IPv4 vs IPv6 mask width. `None` if the mask does not parse
/// for the family or its set bits are not contiguous.
pub(crate) fn cidr_suffix(netmask: &str, family: AddressFamily) -> Option<u8> {
    let aligned: u128 = match family {
        AddressFamily::V4 => {
            let mask: Ipv4Addr = netmask.parse().ok()?;
            u128::from(u32::from(mask)) << 96
        }
        AddressFamily::V6 => {
            let mask: Ipv6Addr = netmask.parse().ok()?;
            u128::from(mask)
        }
    };
    let ones = aligned.leading_ones();
    if ones == 128 || aligned << ones == 0 {
        Some(ones as u8)
    } else {
        None
    }
}

/// Temp directory per the Windows rules: first of `TEMP`, `TMP`, else
/// `{SystemRoot|windir}\temp`; one trailing backslash stripped unless
/// the path is a bare drive root.
pub(crate) fn windows_tmpdir(lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut path = lookup("TEMP").or_else(|| lookup("TMP")).unwrap_or_else(|| {
        let root = lookup("SystemRoot")
            .or_else(|| lookup("windir"))
            .unwrap_or_default();
        format!("{root}\\temp")
    });
    if path.len() > 1 && path.ends_with('\\') && !path.ends_with(":\\") {
        path.pop();
    }
    path
}

/// Temp directory per the POSIX rules: first of `TMPDIR`, `TMP`, `TEMP`
/// env vars, else `/tmp`; one trailing slash stripped unless the path is
/// the root itself.
pub(crate) fn posix_tmpdir(lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut path = lookup("TMPDIR")
        .or_else(|| lookup("TMP"))
        .or_else(|| lookup("TEMP"))
        .unwrap_or_else(|| "/tmp".to_string());
    if path.len() > 1 && path.ends_with('/') {
        path.pop();
    }
    path
}

pub(crate) fn resolve_tmpdir() -> String {
    let lookup = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
    if cfg!(windows) {
        windows_tmpdir(lookup)
    } else {
        posix_tmpdir(lookup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn posix_tmpdir_strips_one_trailing_slash() {
        assert_eq!(posix_tmpdir(env(&[("TMPDIR", "/tmp/")])), "/tmp");
        assert_eq!(posix_tmpdir(env(&[("TMPDIR", "/var/tmp//")])), "/var/tmp/");
    }

    #[test]
    fn posix_tmpdir_keeps_bare_root() {
        assert_eq!(posix_tmpdir(env(&[("TMPDIR", "/")])), "/");
    }

    #[test]
    fn posix_tmpdir_falls_back_through_vars() {
        assert_eq!(posix_tmpdir(env(&[("TEMP", "/scratch")])), "/scratch");
        assert_eq!(posix_tmpdir(env(&[])), "/tmp");
    }

    #[test]
    fn windows_tmpdir_strips_one_trailing_backslash() {
        assert_eq!(
            windows_tmpdir(env(&[("TEMP", "C:\\Users\\x\\")])),
            "C:\\Users\\x"
        );
    }

    #[test]
    fn windows_tmpdir_keeps_drive_root() {
        assert_eq!(windows_tmpdir(env(&[("TEMP", "C:\\")])), "C:\\");
    }

    #[test]
    fn windows_tmpdir_falls_back_to_system_root() {
        assert_eq!(
            windows_tmpdir(env(&[("SystemRoot", "C:\\Windows")])),
            "C:\\Windows\\temp"
        );
        assert_eq!(
            windows_tmpdir(env(&[("windir", "D:\\Win")])),
            "D:\\Win\\temp"
        );
    }

    #[test]
    fn cidr_suffix_for_common_masks() {
        assert_eq!(cidr_suffix("255.255.255.0", AddressFamily::V4), Some(24));
        assert_eq!(cidr_suffix("255.255.255.255", AddressFamily::V4), Some(32));
        assert_eq!(cidr_suffix("ffff:ffff:ffff:ffff::", AddressFamily::V6), Some(64));
        assert_eq!(cidr_suffix("::", AddressFamily::V6), Some(0));
    }

    #[test]
    fn cidr_suffix_rejects_noncontiguous_or_malformed_masks() {
        assert_eq!(cidr_suffix("255.0.255.0", AddressFamily::V4), None);
        assert_eq!(cidr_suffix("not-a-mask", AddressFamily::V4), None);
        assert_eq!(cidr_suffix("255.255.255.0", AddressFamily::V6), None);
    }

    #[test]
    fn interface_grouping_derives_cidr_and_soft_fails() {
        let raw = vec![
            RawInterface {
                name: "eth0".to_string(),
                address: "192.168.1.10".to_string(),
                netmask: "255.255.255.0".to_string(),
                family: AddressFamily::V4,
                mac: "aa:bb:cc:dd:ee:ff".to_string(),
                internal: false,
            },
            RawInterface {
                name: "eth0".to_string(),
                address: "192.168.1.11".to_string(),
                netmask: "255.0.255.0".to_string(),
                family: AddressFamily::V4,
                mac: "aa:bb:cc:dd:ee:ff".to_string(),
                internal: false,
            },
            RawInterface {
                name: "lo".to_string(),
                address: "127.0.0.1".to_string(),
                netmask: "255.0.0.0".to_string(),
                family: AddressFamily::V4,
                mac: "00:00:00:00:00:00".to_string(),
                internal: true,
            },
        ];

        let map = group_interfaces(raw);
        assert_eq!(map.len(), 2);
        // Native enumeration order survives grouping.
        let names: Vec<_> = map.keys().collect();
        assert_eq!(names, ["eth0", "lo"]);

        let eth0 = &map["eth0"];
        assert_eq!(eth0.len(), 2);
        assert_eq!(eth0[0].cidr.as_deref(), Some("192.168.1.10/24"));
        assert_eq!(eth0[1].cidr, None);
        assert_eq!(map["lo"][0].cidr.as_deref(), Some("127.0.0.1/8"));
    }

    #[test]
    fn zip_cpu_records_maps_stride_positionally() {
        let models = vec!["A".to_string(), "B".to_string()];
        let values = [
            100.0, 1.0, 2.0, 3.0, 4.0, 5.0, //
            200.0, 6.0, 7.0, 8.0, 9.0, 10.0,
        ];
        let records = zip_cpu_records(models, &values);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].model, "A");
        assert_eq!(records[0].speed_mhz, 100);
        assert_eq!(
            records[0].times,
            CpuTimes {
                user: 1,
                nice: 2,
                sys: 3,
                idle: 4,
                irq: 5
            }
        );
        assert_eq!(records[1].model, "B");
        assert_eq!(records[1].speed_mhz, 200);
        assert_eq!(records[1].times.irq, 10);
    }
}
