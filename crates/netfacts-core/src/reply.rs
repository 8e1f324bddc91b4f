//! Reply kinds and routing of a reply to its extractor

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chassis::{resolve_inventory, HardwareModule};
use crate::error::DecodeError;
use crate::interfaces::{resolve_descriptions, resolve_topology, InterfaceDescription, InterfaceList};
use crate::lacp::{resolve_lacp, LacpAggregate, LacpDigest};
use crate::version::{resolve_version, VersionFact};

/// The command reply shapes this crate understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplyKind {
    Version,
    InterfaceDescriptions,
    InterfaceList,
    ChassisInventory,
    Lacp,
}

impl ReplyKind {
    pub const ALL: [ReplyKind; 5] = [
        Self::Version,
        Self::InterfaceDescriptions,
        Self::InterfaceList,
        Self::ChassisInventory,
        Self::Lacp,
    ];

    /// Kebab-case name, as accepted by [`FromStr`]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::InterfaceDescriptions => "interface-descriptions",
            Self::InterfaceList => "interface-list",
            Self::ChassisInventory => "chassis-inventory",
            Self::Lacp => "lacp",
        }
    }

    /// Junos RPC (with its distinguishing argument) that produces this reply
    pub fn rpc(self) -> &'static str {
        match self {
            Self::Version => "get-software-information",
            Self::InterfaceDescriptions => "get-interface-information <descriptions/>",
            Self::InterfaceList => "get-interface-information <terse/>",
            Self::ChassisInventory => "get-chassis-inventory",
            Self::Lacp => "get-lacp-interface-information",
        }
    }

    /// Root element of the decoded document
    pub fn root_element(self) -> &'static str {
        match self {
            Self::Version => "software-information",
            Self::InterfaceDescriptions | Self::InterfaceList => "interface-information",
            Self::ChassisInventory => "chassis-inventory",
            Self::Lacp => "lacp-interface-information-list",
        }
    }
}

impl fmt::Display for ReplyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReplyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown reply kind: {}", s))
    }
}

/// Output of one extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Facts {
    Version(VersionFact),
    InterfaceDescriptions {
        interfaces: Vec<InterfaceDescription>,
    },
    InterfaceList(InterfaceList),
    ChassisInventory(HardwareModule),
    Lacp {
        aggregates: Vec<LacpAggregate>,
        digest: LacpDigest,
    },
}

impl Facts {
    pub fn kind(&self) -> ReplyKind {
        match self {
            Self::Version(_) => ReplyKind::Version,
            Self::InterfaceDescriptions { .. } => ReplyKind::InterfaceDescriptions,
            Self::InterfaceList(_) => ReplyKind::InterfaceList,
            Self::ChassisInventory(_) => ReplyKind::ChassisInventory,
            Self::Lacp { .. } => ReplyKind::Lacp,
        }
    }
}

/// Run the extractor matching `kind` on `text`
pub fn decode(kind: ReplyKind, text: &str) -> Result<Facts, DecodeError> {
    match kind {
        ReplyKind::Version => resolve_version(text).map(Facts::Version),
        ReplyKind::InterfaceDescriptions => {
            resolve_descriptions(text).map(|interfaces| Facts::InterfaceDescriptions { interfaces })
        }
        ReplyKind::InterfaceList => resolve_topology(text).map(Facts::InterfaceList),
        ReplyKind::ChassisInventory => resolve_inventory(text).map(Facts::ChassisInventory),
        ReplyKind::Lacp => {
            resolve_lacp(text).map(|(aggregates, digest)| Facts::Lacp { aggregates, digest })
        }
    }
}
