use crate::checked::{checked, ProbeContext};
use crate::error::FactsError;
use crate::probes::{with_scratch, MAX_INTERFACES};
use crate::AddressFamily;
use if_addrs::IfAddr;
use std::collections::HashMap;
use sysinfo::{NetworkExt, NetworksExt, SystemExt};

const NULL_MAC: &str = "00:00:00:00:00:00";

/// One raw interface row as enumerated by the host, before CIDR
/// derivation and grouping.
#[derive(Debug, Clone)]
pub(crate) struct RawInterface {
    pub name: String,
    pub address: String,
    pub netmask: String,
    pub family: AddressFamily,
    pub mac: String,
    pub internal: bool,
}

/// Enumerates interface addresses in native order. Fails at the native
/// boundary through the checked wrapper, or with `ResourceExceeded`
/// when the host reports more rows than the probe is sized for.
#[track_caller]
pub(crate) fn interface_addresses() -> Result<Vec<RawInterface>, FactsError> {
    let addrs = checked(
        if_addrs::get_if_addrs().map_err(|err| ProbeContext::from_io("getifaddrs", &err)),
    )?;
    if addrs.len() > MAX_INTERFACES {
        return Err(FactsError::ResourceExceeded {
            probe: "interface_addresses",
            count: addrs.len(),
            capacity: MAX_INTERFACES,
        });
    }

    let macs = mac_by_interface();
    let mut out = Vec::with_capacity(addrs.len());
    for iface in addrs {
        let (address, netmask, family) = match &iface.addr {
            IfAddr::V4(v4) => (
                v4.ip.to_string(),
                v4.netmask.to_string(),
                AddressFamily::V4,
            ),
            IfAddr::V6(v6) => (
                v6.ip.to_string(),
                v6.netmask.to_string(),
                AddressFamily::V6,
            ),
        };
        let internal = iface.is_loopback();
        let mac = macs
            .get(&iface.name)
            .cloned()
            .unwrap_or_else(|| NULL_MAC.to_string());
        out.push(RawInterface {
            name: iface.name,
            address,
            netmask,
            family,
            mac,
            internal,
        });
    }
    Ok(out)
}

fn mac_by_interface() -> HashMap<String, String> {
    with_scratch(|scratch| {
        scratch.system.refresh_networks_list();
        scratch.system.refresh_networks();
        scratch
            .system
            .networks()
            .iter()
            .map(|(name, data)| (name.clone(), data.mac_address().to_string()))
            .collect()
    })
}
