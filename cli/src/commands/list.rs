use clap::Args;
use narcotk_common::config::Config;
use narcotk_common::{Host, Network};
use narcotk_core::listing::{self, HostQuery, NetworkQuery};
use tracing::info;

use crate::commands::open_repository;
use crate::terminal::print;

#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct HostFilter {
    /// Hosts in this network
    #[arg(long)]
    pub network: Option<String>,
    /// Host by fully qualified name
    #[arg(long)]
    pub host: Option<String>,
    /// Host by IPv4 or IPv6 address
    #[arg(long)]
    pub ip: Option<String>,
    /// Host by MAC address, any separator
    #[arg(long)]
    pub mac: Option<String>,
}

impl HostFilter {
    pub fn into_query(self) -> HostQuery {
        match self {
            HostFilter { network: Some(id), .. } => HostQuery::InNetwork(id),
            HostFilter { host: Some(fqdn), .. } => HostQuery::ByName(fqdn),
            HostFilter { ip: Some(ip), .. } => HostQuery::ByAddress(ip),
            HostFilter { mac: Some(mac), .. } => HostQuery::ByMac(mac),
            _ => HostQuery::All,
        }
    }
}

pub fn hosts(cfg: &Config, filter: HostFilter, show_mac: bool) -> anyhow::Result<()> {
    let mut repo = open_repository(cfg)?;
    let hosts: Vec<Host> = listing::hosts(&mut repo, &filter.into_query())?;

    if hosts.is_empty() {
        info!("No hosts found");
        return Ok(());
    }
    print::hosts(cfg, &hosts, show_mac)
}

pub fn networks(cfg: &Config, network: Option<String>) -> anyhow::Result<()> {
    let query: NetworkQuery = match network {
        Some(id) => NetworkQuery::ById(id),
        None => NetworkQuery::All,
    };
    let mut repo = open_repository(cfg)?;
    let networks: Vec<Network> = listing::networks(&mut repo, &query)?;

    if networks.is_empty() {
        info!("No networks found");
        return Ok(());
    }
    print::networks(cfg, &networks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_picks_the_given_field() {
        assert_eq!(HostFilter::default().into_query(), HostQuery::All);
        let by_mac = HostFilter {
            mac: Some("aa-bb".into()),
            ..HostFilter::default()
        };
        assert_eq!(by_mac.into_query(), HostQuery::ByMac("aa-bb".into()));
    }
}
