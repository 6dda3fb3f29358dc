//! Everything the binary writes to stdout.

use std::path::Path;

use colored::*;
use narcotk_common::config::Config;
use narcotk_common::{Host, Network, render};
use tracing::warn;

use crate::terminal::colors;

/// Prints host records the way the configuration asks for.
pub fn hosts(cfg: &Config, hosts: &[Host], show_mac: bool) -> anyhow::Result<()> {
    if cfg.json {
        println!("{}", render::json(hosts)?);
        return Ok(());
    }
    header(cfg);
    print!("{}", render::hosts_table(hosts, show_mac));
    Ok(())
}

pub fn networks(cfg: &Config, networks: &[Network]) -> anyhow::Result<()> {
    if cfg.json {
        println!("{}", render::json(networks)?);
        return Ok(());
    }
    header(cfg);
    print!("{}", render::networks_table(networks));
    Ok(())
}

/// Copies the header file to stdout when `ShowHeader` is on.
fn header(cfg: &Config) {
    if cfg.show_header {
        print_file(&cfg.header_file);
    }
}

fn print_file(path: &Path) {
    match std::fs::read_to_string(path) {
        Ok(text) => print!("{text}"),
        Err(e) => warn!("Cannot read {}: {e}", path.display()),
    }
}

/// `key.....: value`, keys padded to `key_width`.
pub fn aligned_line(key: &str, value: &str, key_width: usize) {
    let dots: String = ".".repeat((key_width + 1).saturating_sub(key.len()));
    println!(
        "{}{}{} {}",
        key.color(colors::PRIMARY),
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR),
        value.color(colors::TEXT_DEFAULT)
    );
}
