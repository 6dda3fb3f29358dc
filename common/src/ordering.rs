//! Numeric ordering of listed records.
//!
//! Every listing (all hosts, hosts in a network, by name, address or MAC, all
//! networks, one network) is sorted here, on the derived padded key and never on
//! the dotted string.

use crate::models::{Host, Network};

/// A record that carries a padded sort key.
pub trait PaddedKey {
    fn padded_key(&self) -> &str;
}

impl PaddedKey for Host {
    fn padded_key(&self) -> &str {
        &self.padded_ip
    }
}

impl PaddedKey for Network {
    fn padded_key(&self) -> &str {
        &self.padded_network
    }
}

/// Sorts ascending by padded key, comparing bytes.
///
/// The sort is stable: records with equal keys stay in retrieval order.
pub fn sort_by_padded_key<T: PaddedKey>(records: &mut [T]) {
    records.sort_by(|a, b| a.padded_key().as_bytes().cmp(b.padded_key().as_bytes()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(fqdn: &str, ipv4: &str) -> Host {
        Host::new(fqdn, "192.168.10", ipv4).keyed()
    }

    fn addresses(hosts: &[Host]) -> Vec<&str> {
        hosts.iter().map(|h| h.ipv4.as_str()).collect()
    }

    #[test]
    fn hosts_sort_numerically() {
        let mut hosts = vec![
            host("a", "192.168.10.1"),
            host("c", "192.168.10.10"),
            host("b", "192.168.10.2"),
        ];

        sort_by_padded_key(&mut hosts);

        assert_eq!(addresses(&hosts), ["192.168.10.1", "192.168.10.2", "192.168.10.10"]);
    }

    #[test]
    fn mixed_networks_sort_by_every_octet() {
        let mut hosts = vec![
            host("a", "192.168.2.254"),
            host("b", "11.222.3.40"),
            host("c", "172.10.10.1"),
            host("d", "11.222.3.4"),
            host("e", "192.168.2.2"),
            host("f", "11.222.3.39"),
        ];

        sort_by_padded_key(&mut hosts);

        assert_eq!(
            addresses(&hosts),
            ["11.222.3.4", "11.222.3.39", "11.222.3.40", "172.10.10.1", "192.168.2.2", "192.168.2.254"]
        );
    }

    #[test]
    fn equal_keys_keep_retrieval_order() {
        let mut hosts = vec![
            host("second", "10.0.0.5"),
            host("first", "10.0.0.1"),
            host("third", "10.0.0.5"),
        ];

        sort_by_padded_key(&mut hosts);

        let names: Vec<&str> = hosts.iter().map(|h| h.fqdn.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn networks_sort_numerically() {
        let mut networks = vec![
            Network::new("192.168.10", "192.168.10.0/24", "office").keyed(),
            Network::new("9.0.0", "9.0.0.0/24", "lab").keyed(),
            Network::new("10.0.0", "10.0.0.0/24", "dmz").keyed(),
        ];

        sort_by_padded_key(&mut networks);

        let ids: Vec<&str> = networks.iter().map(|n| n.network.as_str()).collect();
        assert_eq!(ids, ["9.0.0", "10.0.0", "192.168.10"]);
    }
}
