mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, host, list, network, serve, setup, show_config};
use narcotk_common::config::Config;
use terminal::logging::Logging;
use tracing::{debug, error};

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    let logging = Logging::init(commands.verbose);

    match run(commands, &logging).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(commands: CommandLine, logging: &Logging) -> anyhow::Result<()> {
    let cfg: Config = commands.apply_overrides(Config::load(commands.config.as_deref())?);
    if cfg.verbose && !commands.verbose {
        logging.set_verbose();
    }
    debug!("Using database {}", cfg.database.display());

    let show_mac: bool = commands.show_mac;
    match commands.command {
        Commands::List(filter) => list::hosts(&cfg, filter, show_mac),
        Commands::Networks { network } => list::networks(&cfg, network),
        Commands::AddNetwork { id, cidr, desc } => network::add(&cfg, id, cidr, desc),
        Commands::UpdateNetwork(args) => network::update(&cfg, args),
        Commands::DelNetwork { id } => network::delete(&cfg, &id),
        Commands::AddHost(args) => host::add(&cfg, args, show_mac),
        Commands::UpdateHost(args) => host::update(&cfg, args, show_mac),
        Commands::DelHost { fqdn, network } => host::delete(&cfg, &fqdn, &network),
        Commands::SetupDb => setup::setup_db(&cfg),
        Commands::Serve {
            listen_ip,
            listen_port,
            tls,
        } => serve::serve(cfg, listen_ip, listen_port, tls).await,
        Commands::Config => {
            show_config::show(&cfg);
            Ok(())
        }
    }
}
