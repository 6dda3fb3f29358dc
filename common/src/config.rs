//! # Runtime Configuration
//!
//! Settings are read from a TOML file whose keys keep the names of the historic
//! configuration (`ListenPort`, `Database`, ...). Every key is optional and falls
//! back to its default; adapters apply their command-line overrides on top.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

/// File looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "narcotk-hosts-config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Print the header file before plain-text listings.
    #[serde(rename = "ShowHeader")]
    pub show_header: bool,
    /// Address the web service binds to.
    #[serde(rename = "ListenIP")]
    pub listen_ip: String,
    #[serde(rename = "ListenPort")]
    pub listen_port: u16,
    /// SQLite database file.
    #[serde(rename = "Database")]
    pub database: PathBuf,
    #[serde(rename = "HeaderFile")]
    pub header_file: PathBuf,
    /// Served at `/` when set.
    #[serde(rename = "IndexFile")]
    pub index_file: Option<PathBuf>,
    /// Directory holding per-host files served by `/host/{host}?file=ext`.
    #[serde(rename = "Files")]
    pub files: PathBuf,
    /// Emit JSON instead of aligned columns.
    #[serde(rename = "JSON")]
    pub json: bool,
    /// Shared secret for `/register`. The endpoint is disabled when unset.
    #[serde(rename = "RegistrationKey")]
    pub registration_key: Option<String>,
    #[serde(rename = "Verbose")]
    pub verbose: bool,
    /// Serve HTTPS instead of HTTP.
    #[serde(rename = "EnableTLS")]
    pub enable_tls: bool,
    /// PEM certificate chain for HTTPS.
    #[serde(rename = "TLSCert")]
    pub tls_cert: PathBuf,
    /// PEM private key for HTTPS.
    #[serde(rename = "TLSKey")]
    pub tls_key: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_header: false,
            listen_ip: String::from("127.0.0.1"),
            listen_port: 23000,
            database: PathBuf::from("./narcotk_hosts_all.db"),
            header_file: PathBuf::from("./header.txt"),
            index_file: None,
            files: PathBuf::from("./files"),
            json: false,
            registration_key: None,
            verbose: false,
            enable_tls: false,
            tls_cert: PathBuf::from("./tls/server.crt"),
            tls_key: PathBuf::from("./tls/server.key"),
        }
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// * `Some(path)`: the file must exist and parse.
    /// * `None`: [`DEFAULT_CONFIG_FILE`] is used if present, defaults otherwise.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path: &Path = match path {
            Some(path) => path,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    info!("No configuration file loaded - using defaults");
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let text: String = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read configuration file {}", path.display()))?;
        let cfg = Self::from_toml(&text)
            .with_context(|| format!("invalid configuration file {}", path.display()))?;

        info!("Loaded configuration from {}", path.display());
        Ok(cfg)
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// `ip:port` the web service listens on.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.listen_ip, self.listen_port)
    }

    /// Key/value pairs for display. The registration key itself is not shown.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let optional = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };

        vec![
            ("ShowHeader", self.show_header.to_string()),
            ("ListenIP", self.listen_ip.clone()),
            ("ListenPort", self.listen_port.to_string()),
            ("Database", self.database.display().to_string()),
            ("HeaderFile", self.header_file.display().to_string()),
            ("IndexFile", optional(&self.index_file)),
            ("Files", self.files.display().to_string()),
            ("JSON", self.json.to_string()),
            (
                "RegistrationKey",
                match self.registration_key {
                    Some(_) => String::from("(set)"),
                    None => String::from("(disabled)"),
                },
            ),
            ("Verbose", self.verbose.to_string()),
            ("EnableTLS", self.enable_tls.to_string()),
            ("TLSCert", self.tls_cert.display().to_string()),
            ("TLSKey", self.tls_key.display().to_string()),
        ]
    }
}
