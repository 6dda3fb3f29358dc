//! Text and JSON output for record lists, shared by the CLI and the HTTP adapter.

use serde::Serialize;

use crate::models::{Host, Network};

/// One aligned line per host: address, name and the four aliases.
///
/// With `show_mac` the normalized MAC is printed as the first column.
pub fn hosts_table(hosts: &[Host], show_mac: bool) -> String {
    let mut out = String::new();
    for host in hosts {
        let names = format!(
            "{}  {}  {}  {}  {}",
            host.fqdn, host.short1, host.short2, host.short3, host.short4
        );
        let line = if show_mac {
            format!("{:<17}  {:<15}    {}\n", host.mac, host.ipv4, names)
        } else {
            format!("{:<15}    {}\n", host.ipv4, names)
        };
        out.push_str(&line);
    }
    out
}

/// One aligned line per network: id, CIDR and description.
pub fn networks_table(networks: &[Network]) -> String {
    let mut out = String::new();
    for network in networks {
        out.push_str(&format!(
            "{:<15}  {:<18}  {}\n",
            network.network, network.cidr, network.description
        ));
    }
    out
}

/// Serializes a record list as a JSON array.
pub fn json<T: Serialize>(records: &[T]) -> serde_json::Result<String> {
    serde_json::to_string(records)
}
