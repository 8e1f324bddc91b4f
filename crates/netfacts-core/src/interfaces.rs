//! Interface descriptions and interface presence from `get-interface-information`
//!
//! Two reply shapes share the `<interface-information>` root:
//! - the `descriptions` flavour lists `physical-interface` and
//!   `logical-interface` entries as siblings, each with a free-text description
//! - the `terse` flavour nests `logical-interface` inside its
//!   `physical-interface`, names only

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::guard::{decode_reply, from_xml, last};

const ROOT: &str = "interface-information";

/// Whether an interface is a port or a unit configured on one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceKind {
    Physical,
    Logical,
}

/// One interface's description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDescription {
    pub kind: InterfaceKind,
    /// Interface name, empty if the reply omitted it
    pub name: String,
    /// Configured description, empty if none
    pub description: String,
}

/// A physical interface and the names of its logical units
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalInterface {
    pub name: String,
    #[serde(default)]
    pub logicals: Vec<String>,
}

/// Physical-to-logical containment skeleton of a device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceList {
    #[serde(default)]
    pub physicals: Vec<PhysicalInterface>,
}

impl InterfaceList {
    /// First physical interface with the given name
    pub fn physical(&self, name: &str) -> Option<&PhysicalInterface> {
        self.physicals.iter().find(|p| p.name == name)
    }

    /// Does logical unit `logical` exist under physical interface `physical`?
    pub fn contains_logical(&self, physical: &str, logical: &str) -> bool {
        self.physicals
            .iter()
            .filter(|p| p.name == physical)
            .any(|p| p.logicals.iter().any(|l| l == logical))
    }

    /// Total number of logical units across all physical interfaces
    pub fn logical_count(&self) -> usize {
        self.physicals.iter().map(|p| p.logicals.len()).sum()
    }
}

// Raw `descriptions` layout

#[derive(Debug, Default, Deserialize)]
struct DescriptionReply {
    #[serde(rename = "$value", default)]
    entries: Vec<DescriptionEntry>,
}

/// One child of `<interface-information>`, in document order
#[derive(Debug, Deserialize)]
enum DescriptionEntry {
    #[serde(rename = "physical-interface")]
    Physical(DescribedInterface),
    #[serde(rename = "logical-interface")]
    Logical(DescribedInterface),
    #[serde(other)]
    Other,
}

#[derive(Debug, Default, Deserialize)]
struct DescribedInterface {
    #[serde(default, deserialize_with = "last")]
    name: String,
    #[serde(default, deserialize_with = "last")]
    description: String,
}

impl DescribedInterface {
    fn into_description(self, kind: InterfaceKind) -> InterfaceDescription {
        InterfaceDescription {
            kind,
            name: self.name,
            description: self.description,
        }
    }
}

// Raw `terse` layout

#[derive(Debug, Default, Deserialize)]
struct TerseReply {
    #[serde(rename = "physical-interface", default)]
    physical: Vec<TersePhysical>,
}

#[derive(Debug, Default, Deserialize)]
struct TersePhysical {
    #[serde(default, deserialize_with = "last")]
    name: String,
    #[serde(rename = "logical-interface", default)]
    logical: Vec<TerseLogical>,
}

#[derive(Debug, Default, Deserialize)]
struct TerseLogical {
    #[serde(default, deserialize_with = "last")]
    name: String,
}

/// Resolve interface descriptions from an `interface-information` descriptions reply.
///
/// Entries keep document order across both kinds. Logical entries are not
/// tied to a physical parent here.
pub fn resolve_descriptions(text: &str) -> Result<Vec<InterfaceDescription>, DecodeError> {
    decode_reply(ROOT, text, |text| {
        let reply: DescriptionReply = from_xml(ROOT, text)?;

        let descriptions = reply
            .entries
            .into_iter()
            .filter_map(|entry| match entry {
                DescriptionEntry::Physical(i) => Some(i.into_description(InterfaceKind::Physical)),
                DescriptionEntry::Logical(i) => Some(i.into_description(InterfaceKind::Logical)),
                DescriptionEntry::Other => None,
            })
            .collect();

        Ok(descriptions)
    })
}

/// Resolve the physical/logical interface skeleton from a terse `interface-information` reply
pub fn resolve_topology(text: &str) -> Result<InterfaceList, DecodeError> {
    decode_reply(ROOT, text, |text| {
        let reply: TerseReply = from_xml(ROOT, text)?;

        let physicals = reply
            .physical
            .into_iter()
            .map(|p| PhysicalInterface {
                name: p.name,
                logicals: p.logical.into_iter().map(|l| l.name).collect(),
            })
            .collect();

        Ok(InterfaceList { physicals })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTIONS_REPLY: &str = r#"<interface-information style="description">
    <physical-interface>
        <name>ge-0/0/0</name>
        <admin-status>up</admin-status>
        <oper-status>up</oper-status>
        <description>uplink to core-01</description>
    </physical-interface>
    <logical-interface>
        <name>ge-0/0/0.100</name>
        <admin-status>up</admin-status>
        <oper-status>up</oper-status>
        <description>customer A</description>
    </logical-interface>
    <physical-interface>
        <name>xe-0/1/0</name>
        <admin-status>up</admin-status>
        <oper-status>down</oper-status>
        <description>spare</description>
    </physical-interface>
    <logical-interface>
        <name>xe-0/1/0.0</name>
        <description>mgmt</description>
    </logical-interface>
</interface-information>"#;

    const TERSE_REPLY: &str = r#"<interface-information style="terse">
    <physical-interface>
        <name>ge-0/0/0</name>
        <admin-status>up</admin-status>
        <oper-status>up</oper-status>
        <logical-interface>
            <name>ge-0/0/0.0</name>
            <admin-status>up</admin-status>
            <oper-status>up</oper-status>
            <filter-information/>
            <address-family>
                <address-family-name>inet</address-family-name>
            </address-family>
        </logical-interface>
        <logical-interface>
            <name>ge-0/0/0.32767</name>
        </logical-interface>
    </physical-interface>
    <physical-interface>
        <name>ge-0/0/1</name>
        <admin-status>up</admin-status>
        <oper-status>down</oper-status>
    </physical-interface>
    <physical-interface>
        <name>ae0</name>
        <logical-interface>
            <name>ae0.0</name>
        </logical-interface>
    </physical-interface>
</interface-information>"#;

    #[test]
    fn test_single_physical_empty_description() {
        let xml = "<interface-information><physical-interface><name>ge-0/0/0</name><description></description></physical-interface></interface-information>";

        let list = resolve_descriptions(xml).unwrap();
        assert_eq!(
            list,
            vec![InterfaceDescription {
                kind: InterfaceKind::Physical,
                name: "ge-0/0/0".to_string(),
                description: String::new(),
            }]
        );
    }

    #[test]
    fn test_descriptions_interleaved_groups() {
        let list = resolve_descriptions(DESCRIPTIONS_REPLY).unwrap();
        assert_eq!(list.len(), 4);

        let names: Vec<_> = list.iter().map(|d| (d.kind, d.name.as_str())).collect();
        assert_eq!(
            names,
            vec![
                (InterfaceKind::Physical, "ge-0/0/0"),
                (InterfaceKind::Logical, "ge-0/0/0.100"),
                (InterfaceKind::Physical, "xe-0/1/0"),
                (InterfaceKind::Logical, "xe-0/1/0.0"),
            ]
        );
        assert_eq!(list[0].description, "uplink to core-01");
        assert_eq!(list[1].description, "customer A");
        assert_eq!(list[2].description, "spare");
    }

    #[test]
    fn test_descriptions_skip_unknown_siblings() {
        let xml = r#"<interface-information>
            <physical-interface><name>p1</name></physical-interface>
            <interface-count>3</interface-count>
            <logical-interface><name>l1</name></logical-interface>
            <physical-interface><name>p2</name></physical-interface>
        </interface-information>"#;

        let names: Vec<_> = resolve_descriptions(xml)
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["p1", "l1", "p2"]);
    }

    #[test]
    fn test_descriptions_repeated_elements_keep_last() {
        let xml = "<interface-information><physical-interface><name>ge-0/0/0</name><description>a</description><description>b</description></physical-interface></interface-information>";

        let list = resolve_descriptions(xml).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "ge-0/0/0");
        assert_eq!(list[0].description, "b");
    }

    #[test]
    fn test_wrong_root_is_rejected() {
        let err = resolve_descriptions("<chassis-inventory><chassis/></chassis-inventory>")
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Malformed {
                document: "interface-information",
                ..
            }
        ));

        let err = resolve_topology("<lacp-interface-information-list/>").unwrap_err();
        assert!(err.to_string().contains("<lacp-interface-information-list>"));
    }

    #[test]
    fn test_topology_repeated_name_keeps_last() {
        let xml = "<interface-information><physical-interface><name>ge-0/0/0</name><name>ge-0/0/9</name><logical-interface><name>ge-0/0/9.0</name></logical-interface></physical-interface></interface-information>";

        let list = resolve_topology(xml).unwrap();
        assert_eq!(list.physicals.len(), 1);
        assert!(list.contains_logical("ge-0/0/9", "ge-0/0/9.0"));
    }

    #[test]
    fn test_descriptions_missing_parts() {
        let xml = "<interface-information><logical-interface><description>orphan</description></logical-interface></interface-information>";

        let list = resolve_descriptions(xml).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].kind, InterfaceKind::Logical);
        assert_eq!(list[0].name, "");
        assert_eq!(list[0].description, "orphan");

        assert!(resolve_descriptions("<interface-information/>")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_descriptions_malformed() {
        let err = resolve_descriptions("<interface-information><physical-interface>")
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Malformed {
                document: "interface-information",
                ..
            }
        ));
    }

    #[test]
    fn test_topology_nesting() {
        let list = resolve_topology(TERSE_REPLY).unwrap();
        assert_eq!(list.physicals.len(), 3);

        assert_eq!(list.physicals[0].name, "ge-0/0/0");
        assert_eq!(list.physicals[0].logicals, vec!["ge-0/0/0.0", "ge-0/0/0.32767"]);
        assert!(list.physicals[1].logicals.is_empty());
        assert_eq!(list.logical_count(), 3);

        assert!(list.contains_logical("ae0", "ae0.0"));
        assert!(!list.contains_logical("ge-0/0/1", "ge-0/0/0.0"));
        assert!(!list.contains_logical("xe-9/9/9", "xe-9/9/9.0"));
        assert_eq!(list.physical("ge-0/0/1").map(|p| p.logicals.len()), Some(0));
    }

    #[test]
    fn test_topology_malformed() {
        let err = resolve_topology(
            "<interface-information><physical-interface><name>ge-0/0/0</physical-interface></interface-information>",
        )
        .unwrap_err();
        assert_eq!(err.document(), "interface-information");
    }

    #[test]
    fn test_topology_repeated_decode_is_stable() {
        assert_eq!(
            resolve_topology(TERSE_REPLY).unwrap(),
            resolve_topology(TERSE_REPLY).unwrap()
        );
    }
}
