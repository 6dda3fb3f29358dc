//! # Inventory Repository
//!
//! The only path to the `networks` and `hosts` tables. Every statement passes the
//! [`StatementGate`] before it reaches storage, and every mutation runs inside a
//! single transaction so its existence checks and its write see the same state.
//!
//! Host writes require the referenced network to exist; network deletes are
//! refused while hosts still reference the network.

use narcotk_common::codec;
use narcotk_common::{Host, HostUpdate, Network, NetworkUpdate};
use tracing::{debug, info, warn};

use crate::error::{Entity, InventoryError, InventoryResult, host_key};
use crate::gate::StatementGate;
use crate::schema;
use crate::statement::{self, Statement};
use crate::storage::{Row, Storage, StorageError};

pub struct InventoryRepository<S: Storage> {
    storage: S,
    gate: StatementGate,
}

impl<S: Storage> InventoryRepository<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            gate: StatementGate::new(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Creates both tables if they are missing.
    pub fn setup(&mut self) -> InventoryResult<()> {
        for definition in schema::create_tables() {
            self.execute(&definition)?;
        }
        info!("Database tables are in place");
        Ok(())
    }

    pub fn network_exists(&mut self, id: &str) -> InventoryResult<bool> {
        Ok(!self.query(&statement::select_network(id))?.is_empty())
    }

    pub fn host_exists(&mut self, fqdn: &str, network: &str) -> InventoryResult<bool> {
        Ok(!self.query(&statement::select_host(fqdn, network))?.is_empty())
    }

    /// Inserts a network and returns it as stored.
    pub fn add_network(&mut self, network: &Network) -> InventoryResult<Network> {
        let network: Network = network.clone().keyed();

        self.atomically(|repo| {
            if repo.network_exists(&network.network)? {
                return Err(InventoryError::already_exists(Entity::Network, &network.network));
            }
            repo.execute(&statement::insert_network(&network))
                .map_err(on_conflict(Entity::Network, &network.network))?;
            Ok(())
        })?;

        info!("Added network {} ({})", network.network, network.cidr);
        Ok(network)
    }

    /// Applies `update` to the network `old_id`.
    ///
    /// A rename carries every host of the old id over to the new one in the same
    /// transaction.
    pub fn update_network(
        &mut self,
        old_id: &str,
        update: &NetworkUpdate,
    ) -> InventoryResult<Network> {
        let updated: Network = self.atomically(|repo| {
            let stored = repo.find_networks(&statement::select_network(old_id))?;
            let current: Network = single(stored, Entity::Network, old_id)?;
            let updated: Network = current.merged(update);

            let renamed = update.renames(old_id);
            if renamed && repo.network_exists(&updated.network)? {
                return Err(InventoryError::already_exists(Entity::Network, &updated.network));
            }

            repo.execute(&statement::update_network(old_id, &updated))
                .map_err(on_conflict(Entity::Network, &updated.network))?;

            if renamed {
                let moved = repo
                    .execute(&statement::move_hosts(old_id, &updated.network))
                    .map_err(on_conflict(Entity::Host, &updated.network))?;
                debug!("Moved {moved} host(s) from {old_id} to {}", updated.network);
            }
            Ok(updated)
        })?;

        info!("Updated network {old_id}");
        Ok(updated)
    }

    pub fn delete_network(&mut self, id: &str) -> InventoryResult<()> {
        self.atomically(|repo| {
            if !repo.network_exists(id)? {
                return Err(InventoryError::not_found(Entity::Network, id));
            }

            let hosts = repo.query(&statement::host_names_in(id))?.len();
            if hosts > 0 {
                return Err(InventoryError::NetworkInUse {
                    network: id.to_string(),
                    hosts,
                });
            }

            repo.execute(&statement::delete_network(id))?;
            Ok(())
        })?;

        info!("Deleted network {id}");
        Ok(())
    }

    /// Inserts a host and returns it as stored, MAC normalized.
    ///
    /// Checks run in a fixed order: duplicate identity, unknown network, invalid
    /// address. The first failing check decides the error.
    pub fn add_host(&mut self, host: &Host) -> InventoryResult<Host> {
        let host: Host = Host {
            mac: codec::normalize_mac(&host.mac),
            ..host.clone()
        }
        .keyed();
        let key = host_key(&host.fqdn, &host.network);

        self.atomically(|repo| {
            if repo.host_exists(&host.fqdn, &host.network)? {
                return Err(InventoryError::already_exists(Entity::Host, &key));
            }
            if !repo.network_exists(&host.network)? {
                return Err(InventoryError::UnknownNetwork(host.network.clone()));
            }
            check_ipv4(&host.ipv4)?;

            repo.execute(&statement::insert_host(&host))
                .map_err(on_conflict(Entity::Host, &key))?;
            Ok(())
        })?;

        info!("Added host {key} ({})", host.ipv4);
        Ok(host)
    }

    /// Applies `update` to the host identified by `(fqdn, network)`.
    pub fn update_host(
        &mut self,
        fqdn: &str,
        network: &str,
        update: &HostUpdate,
    ) -> InventoryResult<Host> {
        let key = host_key(fqdn, network);

        let updated: Host = self.atomically(|repo| {
            let stored = repo.find_hosts(&statement::select_host(fqdn, network))?;
            let current: Host = single(stored, Entity::Host, &key)?;
            let updated: Host = current.merged(update);

            if !repo.network_exists(&updated.network)? {
                return Err(InventoryError::UnknownNetwork(updated.network.clone()));
            }
            check_ipv4(&updated.ipv4)?;

            let new_key = host_key(&updated.fqdn, &updated.network);
            if !updated.is_identified_by(fqdn, network)
                && repo.host_exists(&updated.fqdn, &updated.network)?
            {
                return Err(InventoryError::already_exists(Entity::Host, new_key));
            }

            repo.execute(&statement::update_host(fqdn, network, &updated))
                .map_err(on_conflict(Entity::Host, &new_key))?;
            Ok(updated)
        })?;

        info!("Updated host {key}");
        Ok(updated)
    }

    pub fn delete_host(&mut self, fqdn: &str, network: &str) -> InventoryResult<()> {
        let key = host_key(fqdn, network);

        self.atomically(|repo| {
            if !repo.host_exists(fqdn, network)? {
                return Err(InventoryError::not_found(Entity::Host, &key));
            }
            repo.execute(&statement::delete_host(fqdn, network))?;
            Ok(())
        })?;

        info!("Deleted host {key}");
        Ok(())
    }

    /// Runs a host selection. `filter` must select the host columns in table
    /// order. Results come back unordered.
    pub fn find_hosts(&mut self, filter: &Statement) -> InventoryResult<Vec<Host>> {
        let rows: Vec<Row> = self.query(filter)?;
        let mut hosts: Vec<Host> = Vec::with_capacity(rows.len());

        for row in rows {
            let [network, ipv4, ipv6, fqdn, short1, short2, short3, short4, mac] =
                row.into_array()?;
            hosts.push(
                Host {
                    padded_ip: String::new(),
                    network,
                    ipv4,
                    ipv6,
                    fqdn,
                    short1,
                    short2,
                    short3,
                    short4,
                    mac,
                }
                .keyed(),
            );
        }
        Ok(hosts)
    }

    /// Runs a network selection. `filter` must select the network columns in
    /// table order. Results come back unordered.
    pub fn find_networks(&mut self, filter: &Statement) -> InventoryResult<Vec<Network>> {
        self.query(filter)?
            .into_iter()
            .map(|row| -> InventoryResult<Network> {
                let [network, cidr, description] = row.into_array()?;
                Ok(Network::new(network, cidr, description).keyed())
            })
            .collect()
    }

    fn admit(&self, statement: &Statement) -> InventoryResult<()> {
        debug!("Statement: {statement}");
        self.gate.validate(statement).map_err(|e| {
            warn!("Rejected statement {statement}: {e}");
            InventoryError::StatementRejected {
                statement: statement.sql().to_string(),
                reason: e.to_string(),
            }
        })
    }

    fn execute(&mut self, statement: &Statement) -> InventoryResult<usize> {
        self.admit(statement)?;
        Ok(self.storage.execute(statement)?)
    }

    fn query(&mut self, statement: &Statement) -> InventoryResult<Vec<Row>> {
        self.admit(statement)?;
        Ok(self.storage.query(statement)?)
    }

    /// Runs `op` inside a transaction, rolling back on any error.
    fn atomically<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> InventoryResult<T>,
    ) -> InventoryResult<T> {
        self.storage.begin()?;

        let outcome = op(self).and_then(|value| {
            self.storage.commit()?;
            Ok(value)
        });

        if outcome.is_err() {
            if let Err(e) = self.storage.rollback() {
                warn!("Rollback failed: {e}");
            }
        }
        outcome
    }
}

fn check_ipv4(value: &str) -> InventoryResult<()> {
    if codec::is_valid_ip(value) {
        return Ok(());
    }
    Err(InventoryError::InvalidAddress {
        field: "ipv4",
        value: value.to_string(),
    })
}

/// Picks the one record of an identity lookup.
fn single<T>(mut records: Vec<T>, entity: Entity, key: &str) -> InventoryResult<T> {
    if records.len() > 1 {
        return Err(InventoryError::AmbiguousMatch {
            entity,
            key: key.to_string(),
            count: records.len(),
        });
    }
    records
        .pop()
        .ok_or_else(|| InventoryError::not_found(entity, key))
}

/// Reports a uniqueness violation from the engine as a duplicate.
fn on_conflict(entity: Entity, key: &str) -> impl FnOnce(InventoryError) -> InventoryError {
    let key = key.to_string();
    move |e| match e {
        InventoryError::Storage(StorageError::Constraint(_)) => {
            InventoryError::already_exists(entity, key)
        }
        other => other,
    }
}
