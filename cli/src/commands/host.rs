use clap::Args;
use narcotk_common::config::Config;
use narcotk_common::models::present;
use narcotk_common::{Host, HostUpdate};

use crate::commands::{Shorts, open_repository};
use crate::terminal::print;

#[derive(Args, Debug)]
pub struct AddHostArgs {
    /// Fully qualified host name
    pub fqdn: String,
    /// Network the host belongs to; must exist
    #[arg(long)]
    pub network: String,
    #[arg(long)]
    pub ip: String,
    #[arg(long)]
    pub ipv6: Option<String>,
    #[command(flatten)]
    pub shorts: Shorts,
    #[arg(long)]
    pub mac: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateHostArgs {
    /// Current name of the host
    pub fqdn: String,
    /// Current network of the host
    #[arg(long)]
    pub network: String,
    #[command(flatten)]
    pub changes: HostChanges,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = true)]
pub struct HostChanges {
    /// New fully qualified name
    #[arg(long)]
    pub host: Option<String>,
    /// Move the host to this network
    #[arg(long)]
    pub new_network: Option<String>,
    #[arg(long)]
    pub ip: Option<String>,
    #[arg(long)]
    pub ipv6: Option<String>,
    #[arg(long)]
    pub short1: Option<String>,
    #[arg(long)]
    pub short2: Option<String>,
    #[arg(long)]
    pub short3: Option<String>,
    #[arg(long)]
    pub short4: Option<String>,
    #[arg(long)]
    pub mac: Option<String>,
}

impl From<AddHostArgs> for Host {
    fn from(args: AddHostArgs) -> Self {
        Host {
            padded_ip: String::new(),
            network: args.network,
            ipv4: args.ip,
            ipv6: args.ipv6.unwrap_or_default(),
            fqdn: args.fqdn,
            short1: args.shorts.short1.unwrap_or_default(),
            short2: args.shorts.short2.unwrap_or_default(),
            short3: args.shorts.short3.unwrap_or_default(),
            short4: args.shorts.short4.unwrap_or_default(),
            mac: args.mac.unwrap_or_default(),
        }
    }
}

impl From<HostChanges> for HostUpdate {
    fn from(changes: HostChanges) -> Self {
        HostUpdate {
            fqdn: present(changes.host),
            network: present(changes.new_network),
            ipv4: present(changes.ip),
            ipv6: present(changes.ipv6),
            short1: present(changes.short1),
            short2: present(changes.short2),
            short3: present(changes.short3),
            short4: present(changes.short4),
            mac: present(changes.mac),
        }
    }
}

pub fn add(cfg: &Config, args: AddHostArgs, show_mac: bool) -> anyhow::Result<()> {
    let mut repo = open_repository(cfg)?;
    let stored: Host = repo.add_host(&Host::from(args))?;
    print::hosts(cfg, &[stored], show_mac)
}

pub fn update(cfg: &Config, args: UpdateHostArgs, show_mac: bool) -> anyhow::Result<()> {
    let update: HostUpdate = args.changes.into();
    if update.is_empty() {
        anyhow::bail!("nothing to change for host {}", args.fqdn);
    }

    let mut repo = open_repository(cfg)?;
    let stored: Host = repo.update_host(&args.fqdn, &args.network, &update)?;
    print::hosts(cfg, &[stored], show_mac)
}

pub fn delete(cfg: &Config, fqdn: &str, network: &str) -> anyhow::Result<()> {
    let mut repo = open_repository(cfg)?;
    Ok(repo.delete_host(fqdn, network)?)
}
