use clap::Args;
use narcotk_common::config::Config;
use narcotk_common::models::present;
use narcotk_common::{Network, NetworkUpdate};

use crate::commands::open_repository;
use crate::terminal::print;

#[derive(Args, Debug)]
pub struct UpdateNetworkArgs {
    /// Network to change
    pub id: String,
    #[command(flatten)]
    pub changes: NetworkChanges,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = true)]
pub struct NetworkChanges {
    /// New network id; its hosts move along
    #[arg(long)]
    pub network: Option<String>,
    #[arg(long)]
    pub cidr: Option<String>,
    #[arg(long)]
    pub desc: Option<String>,
}

impl From<NetworkChanges> for NetworkUpdate {
    fn from(changes: NetworkChanges) -> Self {
        NetworkUpdate {
            network: present(changes.network),
            cidr: present(changes.cidr),
            description: present(changes.desc),
        }
    }
}

pub fn add(cfg: &Config, id: String, cidr: String, desc: String) -> anyhow::Result<()> {
    let mut repo = open_repository(cfg)?;
    let stored: Network = repo.add_network(&Network::new(id, cidr, desc))?;
    print::networks(cfg, &[stored])
}

pub fn update(cfg: &Config, args: UpdateNetworkArgs) -> anyhow::Result<()> {
    let update: NetworkUpdate = args.changes.into();
    if update.is_empty() {
        anyhow::bail!("nothing to change for network {}", args.id);
    }

    let mut repo = open_repository(cfg)?;
    let stored: Network = repo.update_network(&args.id, &update)?;
    print::networks(cfg, &[stored])
}

pub fn delete(cfg: &Config, id: &str) -> anyhow::Result<()> {
    let mut repo = open_repository(cfg)?;
    Ok(repo.delete_network(id)?)
}
