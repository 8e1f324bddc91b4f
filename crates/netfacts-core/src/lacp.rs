//! LACP membership from `get-lacp-interface-information` replies
//!
//! Each `<lacp-interface-information>` names one aggregate in its
//! `<lag-lacp-header>` and lists its members as `<lag-lacp-protocol>`
//! entries. Besides the raw per-aggregate list, a [`LacpDigest`] maps every
//! member back to its aggregate.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::guard::{decode_reply, from_xml, last};

const ROOT: &str = "lacp-interface-information-list";

/// One link aggregation group and its protocol-reported members
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LacpAggregate {
    pub name: String,
    /// Member interface names in document order
    #[serde(default)]
    pub members: Vec<String>,
}

/// Reverse index from member interface to owning aggregate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LacpDigest(HashMap<String, String>);

impl LacpDigest {
    /// Build the index from aggregates in order.
    ///
    /// A member listed under several aggregates maps to the last one.
    pub fn build(aggregates: &[LacpAggregate]) -> Self {
        let mut map = HashMap::new();
        for aggregate in aggregates {
            for member in &aggregate.members {
                map.insert(member.clone(), aggregate.name.clone());
            }
        }
        Self(map)
    }

    /// Aggregate owning `member`, if any
    pub fn aggregate_of(&self, member: &str) -> Option<&str> {
        self.0.get(member).map(String::as_str)
    }

    /// Members mapped to `aggregate`, sorted by name
    pub fn members_of(&self, aggregate: &str) -> Vec<&str> {
        let mut members: Vec<&str> = self
            .0
            .iter()
            .filter(|(_, agg)| agg.as_str() == aggregate)
            .map(|(member, _)| member.as_str())
            .collect();
        members.sort_unstable();
        members
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(member, aggregate)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(m, a)| (m.as_str(), a.as_str()))
    }

    pub fn into_inner(self) -> HashMap<String, String> {
        self.0
    }
}

#[derive(Debug, Default, Deserialize)]
struct LacpInterfaceInformationList {
    #[serde(rename = "lacp-interface-information", default)]
    interfaces: Vec<LacpInterfaceInformation>,
}

#[derive(Debug, Default, Deserialize)]
struct LacpInterfaceInformation {
    #[serde(rename = "lag-lacp-header", default, deserialize_with = "last")]
    header: LagLacpHeader,
    #[serde(rename = "lag-lacp-protocol", default)]
    protocols: Vec<LagLacpProtocol>,
}

#[derive(Debug, Default, Deserialize)]
struct LagLacpHeader {
    #[serde(rename = "aggregate-name", default, deserialize_with = "last")]
    aggregate_name: String,
}

#[derive(Debug, Default, Deserialize)]
struct LagLacpProtocol {
    #[serde(default, deserialize_with = "last")]
    name: String,
}

/// Resolve aggregates and the member digest from an LACP reply.
///
/// The digest is only produced for a successfully decoded reply.
pub fn resolve_lacp(text: &str) -> Result<(Vec<LacpAggregate>, LacpDigest), DecodeError> {
    decode_reply(ROOT, text, |text| {
        let list: LacpInterfaceInformationList = from_xml(ROOT, text)?;

        let aggregates: Vec<LacpAggregate> = list
            .interfaces
            .into_iter()
            .map(|i| LacpAggregate {
                name: i.header.aggregate_name,
                members: i.protocols.into_iter().map(|p| p.name).collect(),
            })
            .collect();
        let digest = LacpDigest::build(&aggregates);

        Ok((aggregates, digest))
    })
}
