//! Per-router bundle of everything decoded for one device

use serde::{Deserialize, Serialize};

use crate::chassis::HardwareModule;
use crate::interfaces::{InterfaceDescription, InterfaceKind, InterfaceList};
use crate::lacp::{LacpAggregate, LacpDigest};
use crate::reply::Facts;

/// All facts gathered for a single router
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterFacts {
    pub router: String,
    /// Model reported by the version reply
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub descriptions: Option<Vec<InterfaceDescription>>,
    #[serde(default)]
    pub interfaces: Option<InterfaceList>,
    #[serde(default)]
    pub inventory: Option<HardwareModule>,
    #[serde(default)]
    pub lacp: Option<Vec<LacpAggregate>>,
    #[serde(default)]
    pub lacp_digest: Option<LacpDigest>,
}

impl RouterFacts {
    pub fn new(router: impl Into<String>) -> Self {
        Self {
            router: router.into(),
            ..Self::default()
        }
    }

    /// Merge one extractor's output; a later reply of the same kind replaces the earlier one
    pub fn absorb(&mut self, facts: Facts) {
        match facts {
            Facts::Version(fact) => {
                self.family = Some(fact.model);
                self.version = Some(fact.version);
            }
            Facts::InterfaceDescriptions { interfaces } => self.descriptions = Some(interfaces),
            Facts::InterfaceList(list) => self.interfaces = Some(list),
            Facts::ChassisInventory(chassis) => self.inventory = Some(chassis),
            Facts::Lacp { aggregates, digest } => {
                self.lacp = Some(aggregates);
                self.lacp_digest = Some(digest);
            }
        }
    }

    /// Description of the first interface named `name`, physical or logical
    pub fn description_of(&self, name: &str) -> Option<&str> {
        self.descriptions
            .as_ref()?
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.description.as_str())
    }

    /// Physical interfaces that carry a description
    pub fn described_physicals(&self) -> impl Iterator<Item = &InterfaceDescription> {
        self.descriptions
            .iter()
            .flatten()
            .filter(|d| d.kind == InterfaceKind::Physical && !d.description.is_empty())
    }

    /// Does logical unit `logical` exist under `physical`? False when no interface list was decoded.
    pub fn has_logical(&self, physical: &str, logical: &str) -> bool {
        self.interfaces
            .as_ref()
            .is_some_and(|list| list.contains_logical(physical, logical))
    }

    /// Aggregate owning `member`, from the LACP digest
    pub fn aggregate_of(&self, member: &str) -> Option<&str> {
        self.lacp_digest.as_ref()?.aggregate_of(member)
    }
}
