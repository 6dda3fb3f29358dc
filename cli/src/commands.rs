pub mod host;
pub mod list;
pub mod network;
pub mod serve;
pub mod setup;
pub mod show_config;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use narcotk_common::config::Config;
use narcotk_core::{InventoryRepository, SqliteStorage};

#[derive(Parser)]
#[command(name = "narcotk-hosts")]
#[command(version, about = "Keeps track of hosts and the networks they live in.")]
pub struct CommandLine {
    /// Configuration file (default: ./narcotk-hosts-config.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// SQLite database file
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,
    /// Print JSON instead of aligned columns
    #[arg(long, global = true)]
    pub json: bool,
    /// Print the MAC address column
    #[arg(long, global = true)]
    pub show_mac: bool,
    /// Print the header file before listings
    #[arg(long, global = true)]
    pub show_header: bool,
    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List hosts, all of them or those matching one filter
    #[command(alias = "l")]
    List(list::HostFilter),
    /// List networks
    #[command(alias = "n")]
    Networks {
        /// Only this network id
        #[arg(long)]
        network: Option<String>,
    },
    /// Add a network
    AddNetwork {
        /// Network id, e.g. 192.168.10
        id: String,
        #[arg(long)]
        cidr: String,
        #[arg(long, default_value = "")]
        desc: String,
    },
    /// Change or rename a network
    UpdateNetwork(network::UpdateNetworkArgs),
    /// Delete a network that has no hosts
    DelNetwork { id: String },
    /// Add a host to an existing network
    AddHost(host::AddHostArgs),
    /// Change fields of a host
    UpdateHost(host::UpdateHostArgs),
    /// Delete a host
    DelHost {
        fqdn: String,
        #[arg(long)]
        network: String,
    },
    /// Create the database file and its tables
    SetupDb,
    /// Serve lookups over HTTP, or HTTPS when EnableTLS is set
    Serve {
        #[arg(long)]
        listen_ip: Option<String>,
        #[arg(long)]
        listen_port: Option<u16>,
        /// Serve HTTPS regardless of EnableTLS
        #[arg(long)]
        tls: bool,
    },
    /// Show the effective configuration
    Config,
}

/// The four short aliases of a host.
#[derive(Args, Debug, Default)]
pub struct Shorts {
    #[arg(long)]
    pub short1: Option<String>,
    #[arg(long)]
    pub short2: Option<String>,
    #[arg(long)]
    pub short3: Option<String>,
    #[arg(long)]
    pub short4: Option<String>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Applies the global flags on top of the loaded configuration.
    pub fn apply_overrides(&self, mut cfg: Config) -> Config {
        if let Some(database) = &self.database {
            cfg.database = database.clone();
        }
        cfg.json |= self.json;
        cfg.show_header |= self.show_header;
        cfg.verbose |= self.verbose;
        cfg
    }
}

/// Opens the configured database. It must have been created with `setup-db`.
pub fn open_repository(cfg: &Config) -> anyhow::Result<InventoryRepository<SqliteStorage>> {
    let storage = SqliteStorage::open(&cfg.database)
        .context("cannot open the inventory database (create it with `setup-db`)")?;
    Ok(InventoryRepository::new(storage))
}
