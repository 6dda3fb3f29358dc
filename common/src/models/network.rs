use serde::{Deserialize, Serialize};

use crate::codec;

/// A named address block. `network` (e.g. `192.168.10`) is the primary key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    #[serde(rename = "PaddedNetwork", default)]
    pub padded_network: String,
    #[serde(rename = "Network")]
    pub network: String,
    #[serde(rename = "CIDR")]
    pub cidr: String,
    #[serde(rename = "Description", default)]
    pub description: String,
}

/// Fields to change on an existing network. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkUpdate {
    pub network: Option<String>,
    pub cidr: Option<String>,
    pub description: Option<String>,
}

impl Network {
    pub fn new(
        network: impl Into<String>,
        cidr: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            padded_network: String::new(),
            network: network.into(),
            cidr: cidr.into(),
            description: description.into(),
        }
    }

    /// Recomputes the derived `PaddedNetwork` from the network id.
    pub fn keyed(mut self) -> Self {
        self.padded_network = codec::padded_key(&self.network);
        self
    }

    pub fn merged(&self, update: &NetworkUpdate) -> Network {
        Network {
            padded_network: String::new(),
            network: super::merge(&self.network, &update.network),
            cidr: super::merge(&self.cidr, &update.cidr),
            description: super::merge(&self.description, &update.description),
        }
        .keyed()
    }
}

impl NetworkUpdate {
    pub fn is_empty(&self) -> bool {
        *self == NetworkUpdate::default()
    }

    /// `true` when the update moves the record to a different id.
    pub fn renames(&self, current: &str) -> bool {
        self.network.as_deref().is_some_and(|id| id != current)
    }
}
