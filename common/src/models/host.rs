use serde::{Deserialize, Serialize};

use crate::codec;

/// An inventory entry for one machine.
///
/// Identity is the `(fqdn, network)` pair; there is no single-column key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    #[serde(rename = "PaddedIP", default)]
    pub padded_ip: String,
    #[serde(rename = "Network")]
    pub network: String,
    #[serde(rename = "IPv4")]
    pub ipv4: String,
    #[serde(rename = "IPv6", default)]
    pub ipv6: String,
    #[serde(rename = "Hostname")]
    pub fqdn: String,
    #[serde(rename = "Short1", default)]
    pub short1: String,
    #[serde(rename = "Short2", default)]
    pub short2: String,
    #[serde(rename = "Short3", default)]
    pub short3: String,
    #[serde(rename = "Short4", default)]
    pub short4: String,
    #[serde(rename = "MAC", default)]
    pub mac: String,
}

/// Fields to change on an existing host. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostUpdate {
    pub fqdn: Option<String>,
    pub network: Option<String>,
    pub ipv4: Option<String>,
    pub ipv6: Option<String>,
    pub short1: Option<String>,
    pub short2: Option<String>,
    pub short3: Option<String>,
    pub short4: Option<String>,
    pub mac: Option<String>,
}

impl Host {
    pub fn new(fqdn: impl Into<String>, network: impl Into<String>, ipv4: impl Into<String>) -> Self {
        Self {
            fqdn: fqdn.into(),
            network: network.into(),
            ipv4: ipv4.into(),
            ..Self::default()
        }
    }

    pub fn with_mac(mut self, mac: impl Into<String>) -> Self {
        self.mac = mac.into();
        self
    }

    pub fn with_ipv6(mut self, ipv6: impl Into<String>) -> Self {
        self.ipv6 = ipv6.into();
        self
    }

    /// Sets the four short aliases in order.
    pub fn with_shorts(mut self, shorts: [&str; 4]) -> Self {
        let [s1, s2, s3, s4] = shorts;
        self.short1 = s1.to_string();
        self.short2 = s2.to_string();
        self.short3 = s3.to_string();
        self.short4 = s4.to_string();
        self
    }

    /// Recomputes the derived `PaddedIP` from `ipv4`.
    pub fn keyed(mut self) -> Self {
        self.padded_ip = codec::padded_key(&self.ipv4);
        self
    }

    /// Whether this host answers to `(fqdn, network)`. Host names ignore ASCII
    /// case.
    pub fn is_identified_by(&self, fqdn: &str, network: &str) -> bool {
        self.fqdn.eq_ignore_ascii_case(fqdn) && self.network == network
    }

    /// Applies `update` on top of this host: present fields overwrite, absent
    /// fields keep their current value. A new MAC is normalized.
    pub fn merged(&self, update: &HostUpdate) -> Host {
        Host {
            padded_ip: String::new(),
            network: super::merge(&self.network, &update.network),
            ipv4: super::merge(&self.ipv4, &update.ipv4),
            ipv6: super::merge(&self.ipv6, &update.ipv6),
            fqdn: super::merge(&self.fqdn, &update.fqdn),
            short1: super::merge(&self.short1, &update.short1),
            short2: super::merge(&self.short2, &update.short2),
            short3: super::merge(&self.short3, &update.short3),
            short4: super::merge(&self.short4, &update.short4),
            mac: match &update.mac {
                Some(mac) => codec::normalize_mac(mac),
                None => self.mac.clone(),
            },
        }
        .keyed()
    }
}

impl HostUpdate {
    pub fn is_empty(&self) -> bool {
        *self == HostUpdate::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stored() -> Host {
        Host::new("server1.example.com", "192.168.1", "192.168.1.10")
            .with_ipv6("::10")
            .with_shorts(["server1", "s1", "", ""])
            .with_mac("de:ad:be:ef:ca:fe")
            .keyed()
    }

    #[test]
    fn mac_only_update_keeps_everything_else() {
        let update = HostUpdate {
            mac: Some("AA-BB-CC-DD-EE-FF".into()),
            ..HostUpdate::default()
        };

        let merged = stored().merged(&update);

        assert_eq!(
            merged,
            Host {
                mac: "aa:bb:cc:dd:ee:ff".into(),
                ..stored()
            }
        );
    }

    #[test]
    fn address_change_rekeys() {
        let update = HostUpdate {
            ipv4: Some("192.168.1.9".into()),
            ..HostUpdate::default()
        };

        let merged = stored().merged(&update);
        assert_eq!(merged.padded_ip, "192168001009");
        assert_eq!(merged.fqdn, "server1.example.com");
    }

    #[test]
    fn empty_update_is_identity() {
        assert!(HostUpdate::default().is_empty());
        assert_eq!(stored().merged(&HostUpdate::default()), stored());
    }

    #[test]
    fn host_names_ignore_case() {
        assert!(stored().is_identified_by("Server1.EXAMPLE.com", "192.168.1"));
        assert!(!stored().is_identified_by("server1.example.com", "192.168.2"));
        assert!(!stored().is_identified_by("server2.example.com", "192.168.1"));
    }

    #[test]
    fn json_uses_historic_field_names() {
        let json = serde_json::to_value(stored()).unwrap();
        assert_eq!(json["PaddedIP"], "192168001010");
        assert_eq!(json["Hostname"], "server1.example.com");
        assert_eq!(json["IPv4"], "192.168.1.10");
        assert_eq!(json["MAC"], "de:ad:be:ef:ca:fe");
    }
}
