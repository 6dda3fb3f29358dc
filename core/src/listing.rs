//! # Listings
//!
//! The read side shared by the CLI and the web service. Each query selects
//! records with a `LIKE` filter, so callers may pass `%` and `_` wildcards, and
//! the result is always ordered by padded key.

use narcotk_common::codec;
use narcotk_common::ordering::sort_by_padded_key;
use narcotk_common::{Host, Network};

use crate::error::InventoryResult;
use crate::repository::InventoryRepository;
use crate::statement::{HOST_COLUMNS, NETWORK_COLUMNS, Statement};
use crate::storage::Storage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostQuery {
    All,
    InNetwork(String),
    ByName(String),
    /// Matches either the IPv4 or the IPv6 column.
    ByAddress(String),
    /// The value is normalized before matching.
    ByMac(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkQuery {
    All,
    ById(String),
}

impl HostQuery {
    pub fn to_statement(&self) -> Statement {
        let select = format!("SELECT {HOST_COLUMNS} FROM hosts");
        match self {
            HostQuery::All => Statement::new(select),
            HostQuery::InNetwork(id) => {
                Statement::new(format!("{select} WHERE network LIKE ?")).bind(id)
            }
            HostQuery::ByName(fqdn) => {
                Statement::new(format!("{select} WHERE fqdn LIKE ?")).bind(fqdn)
            }
            HostQuery::ByAddress(ip) => {
                Statement::new(format!("{select} WHERE ipv4 LIKE ? OR ipv6 LIKE ?"))
                    .bind(ip)
                    .bind(ip)
            }
            HostQuery::ByMac(mac) => Statement::new(format!("{select} WHERE mac LIKE ?"))
                .bind(codec::normalize_mac(mac)),
        }
    }
}

impl NetworkQuery {
    pub fn to_statement(&self) -> Statement {
        let select = format!("SELECT {NETWORK_COLUMNS} FROM networks");
        match self {
            NetworkQuery::All => Statement::new(select),
            NetworkQuery::ById(id) => {
                Statement::new(format!("{select} WHERE network LIKE ?")).bind(id)
            }
        }
    }
}

/// Hosts matching `query`, ordered by padded IPv4.
pub fn hosts<S: Storage>(
    repo: &mut InventoryRepository<S>,
    query: &HostQuery,
) -> InventoryResult<Vec<Host>> {
    let mut hosts: Vec<Host> = repo.find_hosts(&query.to_statement())?;
    sort_by_padded_key(&mut hosts);
    Ok(hosts)
}

/// Networks matching `query`, ordered by padded network id.
pub fn networks<S: Storage>(
    repo: &mut InventoryRepository<S>,
    query: &NetworkQuery,
) -> InventoryResult<Vec<Network>> {
    let mut networks: Vec<Network> = repo.find_networks(&query.to_statement())?;
    sort_by_padded_key(&mut networks);
    Ok(networks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::SqliteStorage;
    use pretty_assertions::assert_eq;

    fn populated() -> InventoryRepository<SqliteStorage> {
        let mut repo = InventoryRepository::new(SqliteStorage::in_memory().unwrap());
        repo.setup().unwrap();
        for (id, cidr) in [("192.168.10", "192.168.10.0/24"), ("192.168.9", "192.168.9.0/24")] {
            repo.add_network(&Network::new(id, cidr, "")).unwrap();
        }
        for (fqdn, ip) in [
            ("ten.example.com", "192.168.10.10"),
            ("two.example.com", "192.168.10.2"),
            ("one.example.com", "192.168.10.1"),
        ] {
            repo.add_host(&Host::new(fqdn, "192.168.10", ip)).unwrap();
        }
        repo.add_host(
            &Host::new("nine.example.com", "192.168.9", "192.168.9.200")
                .with_mac("AA-BB-CC-DD-EE-FF")
                .with_ipv6("fe80::9"),
        )
        .unwrap();
        repo
    }

    fn names(hosts: &[Host]) -> Vec<&str> {
        hosts.iter().map(|h| h.fqdn.as_str()).collect()
    }

    #[test]
    fn all_hosts_in_numeric_order() {
        let mut repo = populated();
        let hosts = hosts(&mut repo, &HostQuery::All).unwrap();
        assert_eq!(
            names(&hosts),
            [
                "nine.example.com",
                "one.example.com",
                "two.example.com",
                "ten.example.com"
            ]
        );
    }

    #[test]
    fn hosts_by_network() {
        let mut repo = populated();
        let hosts = hosts(&mut repo, &HostQuery::InNetwork("192.168.10".into())).unwrap();
        assert_eq!(
            names(&hosts),
            ["one.example.com", "two.example.com", "ten.example.com"]
        );
    }

    #[test]
    fn hosts_by_name_address_and_mac() {
        let mut repo = populated();

        let by_name = hosts(&mut repo, &HostQuery::ByName("two.example.com".into())).unwrap();
        assert_eq!(names(&by_name), ["two.example.com"]);

        let by_v4 = hosts(&mut repo, &HostQuery::ByAddress("192.168.10.1".into())).unwrap();
        assert_eq!(names(&by_v4), ["one.example.com"]);

        let by_v6 = hosts(&mut repo, &HostQuery::ByAddress("fe80::9".into())).unwrap();
        assert_eq!(names(&by_v6), ["nine.example.com"]);

        let by_mac = hosts(&mut repo, &HostQuery::ByMac("AABBCCDDEEFF".into())).unwrap();
        assert_eq!(names(&by_mac), ["nine.example.com"]);
    }

    #[test]
    fn wildcards_are_honoured() {
        let mut repo = populated();
        let hosts = hosts(&mut repo, &HostQuery::ByName("t%".into())).unwrap();
        assert_eq!(names(&hosts), ["two.example.com", "ten.example.com"]);
    }

    #[test]
    fn no_match_is_empty_not_an_error() {
        let mut repo = populated();
        assert!(hosts(&mut repo, &HostQuery::ByName("absent".into())).unwrap().is_empty());
    }

    #[test]
    fn networks_in_numeric_order() {
        let mut repo = populated();
        let all = networks(&mut repo, &NetworkQuery::All).unwrap();
        let ids: Vec<&str> = all.iter().map(|n| n.network.as_str()).collect();
        assert_eq!(ids, ["192.168.9", "192.168.10"]);
        assert_eq!(all[0].padded_network, "192168009");

        let one = networks(&mut repo, &NetworkQuery::ById("192.168.10".into())).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].cidr, "192.168.10.0/24");
    }

    #[test]
    fn queries_pass_the_gate() {
        let gate = crate::gate::StatementGate::new();
        for query in [
            HostQuery::All,
            HostQuery::InNetwork("x".into()),
            HostQuery::ByName("x".into()),
            HostQuery::ByAddress("x".into()),
            HostQuery::ByMac("x".into()),
        ] {
            assert!(gate.validate(&query.to_statement()).is_ok(), "{query:?}");
        }
        assert!(gate.validate(&NetworkQuery::All.to_statement()).is_ok());
    }
}
