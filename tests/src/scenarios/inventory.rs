use narcotk_common::{Host, HostUpdate, Network};
use narcotk_core::listing::{self, HostQuery};
use narcotk_core::{InventoryError, InventoryRepository, SqliteStorage};
use pretty_assertions::assert_eq;

/// A file-backed inventory with the `192.168.1` network.
fn on_disk() -> (tempfile::TempDir, InventoryRepository<SqliteStorage>) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory/hosts.db");

    let mut repo = InventoryRepository::new(SqliteStorage::create(&path).unwrap());
    repo.setup().unwrap();
    repo.add_network(&Network::new("192.168.1", "192.168.1.0/24", "office"))
        .unwrap();

    (dir, repo)
}

fn all_hosts(repo: &mut InventoryRepository<SqliteStorage>) -> Vec<Host> {
    listing::hosts(repo, &HostQuery::All).unwrap()
}

#[test]
fn added_host_reads_back_unchanged() {
    let (_dir, mut repo) = on_disk();
    let host = Host::new("server1.example.com", "192.168.1", "192.168.1.1")
        .with_ipv6("fe80::1")
        .with_shorts(["server1", "s1", "", ""])
        .with_mac("DE:AD:BE:EF:CA:FE");

    repo.add_host(&host).unwrap();

    let found = listing::hosts(&mut repo, &HostQuery::ByName("server1.example.com".into())).unwrap();
    let expected = Host {
        mac: String::from("de:ad:be:ef:ca:fe"),
        ..host
    }
    .keyed();
    assert_eq!(found, vec![expected]);
}

#[test]
fn data_survives_reopening() {
    let (dir, mut repo) = on_disk();
    repo.add_host(&Host::new("a.example.com", "192.168.1", "192.168.1.7"))
        .unwrap();
    let path = repo.storage().path().to_path_buf();
    drop(repo);

    let mut reopened = InventoryRepository::new(SqliteStorage::open(&path).unwrap());
    assert_eq!(all_hosts(&mut reopened).len(), 1);
    drop(dir);
}

#[test]
fn host_in_unknown_network_leaves_table_unchanged() {
    let (_dir, mut repo) = on_disk();
    let err = repo
        .add_host(&Host::new("x.example.com", "10.10.10", "10.10.10.1"))
        .unwrap_err();

    assert!(matches!(err, InventoryError::UnknownNetwork(_)));
    assert!(all_hosts(&mut repo).is_empty());
}

#[test]
fn duplicate_network_keeps_the_stored_one() {
    let (_dir, mut repo) = on_disk();
    let err = repo
        .add_network(&Network::new("192.168.1", "192.168.0.0/16", "other"))
        .unwrap_err();
    assert!(matches!(err, InventoryError::AlreadyExists { .. }));

    let networks = listing::networks(&mut repo, &narcotk_core::NetworkQuery::All).unwrap();
    assert_eq!(networks.len(), 1);
    assert_eq!(networks[0].cidr, "192.168.1.0/24");
}

#[test]
fn mac_only_update_touches_nothing_else() {
    let (_dir, mut repo) = on_disk();
    let before = repo
        .add_host(
            &Host::new("web.example.com", "192.168.1", "192.168.1.20")
                .with_shorts(["web", "", "", ""]),
        )
        .unwrap();

    let update = HostUpdate {
        mac: Some("AABBCCDDEEFF".into()),
        ..HostUpdate::default()
    };
    repo.update_host("web.example.com", "192.168.1", &update)
        .unwrap();

    let after = all_hosts(&mut repo).remove(0);
    assert_eq!(after.mac, "aa:bb:cc:dd:ee:ff");
    assert_eq!(
        Host {
            mac: String::new(),
            ..after
        },
        before
    );
}

#[test]
fn listing_orders_numerically() {
    let (_dir, mut repo) = on_disk();
    for last in ["10", "2", "1"] {
        repo.add_host(&Host::new(
            format!("h{last}.example.com"),
            "192.168.1",
            format!("192.168.1.{last}"),
        ))
        .unwrap();
    }

    let order: Vec<String> = all_hosts(&mut repo).into_iter().map(|h| h.ipv4).collect();
    assert_eq!(order, ["192.168.1.1", "192.168.1.2", "192.168.1.10"]);
}

#[test]
fn deleting_a_missing_host_changes_nothing() {
    let (_dir, mut repo) = on_disk();
    repo.add_host(&Host::new("a.example.com", "192.168.1", "192.168.1.1"))
        .unwrap();

    let err = repo.delete_host("b.example.com", "192.168.1").unwrap_err();
    assert!(matches!(err, InventoryError::NotFound { .. }));
    assert_eq!(all_hosts(&mut repo).len(), 1);
}

#[test]
fn renamed_network_takes_its_hosts_along() {
    let (_dir, mut repo) = on_disk();
    repo.add_host(&Host::new("a.example.com", "192.168.1", "192.168.1.1"))
        .unwrap();

    let update = narcotk_common::NetworkUpdate {
        network: Some("192.168.2".into()),
        ..Default::default()
    };
    repo.update_network("192.168.1", &update).unwrap();

    let moved = listing::hosts(&mut repo, &HostQuery::InNetwork("192.168.2".into())).unwrap();
    assert_eq!(moved.len(), 1);
    assert!(listing::hosts(&mut repo, &HostQuery::InNetwork("192.168.1".into()))
        .unwrap()
        .is_empty());
}
