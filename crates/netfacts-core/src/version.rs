//! Software version and device model from `get-software-information` replies
//!
//! Junos answers the same RPC in two layouts. Chassis with several routing
//! engines or virtual-chassis members (EX, QFX) wrap one
//! `<software-information>` per member in `<multi-routing-engine-results>`;
//! single-engine platforms (ACX, MX without `invoke-on`) return
//! `<software-information>` directly. The layout is sniffed from the raw text
//! before decoding, then both are normalised into a [`VersionFact`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DecodeError;
use crate::guard::{decode_reply, from_xml_any_root, last};

const WRAPPED_MARKER: &str = "<multi-routing-engine-results";

/// Resolved identity of a device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionFact {
    /// Platform family (wrapped layout) or host name (unwrapped layout)
    pub model: String,
    /// Junos version string, verbatim
    pub version: String,
}

/// Layout of a software-information reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionDialect {
    /// `<multi-routing-engine-results>` with one item per routing engine
    Wrapped,
    /// Bare `<software-information>`
    Unwrapped,
}

impl VersionDialect {
    /// Pick the layout from a textual marker, without parsing
    pub fn detect(text: &str) -> Self {
        if text.contains(WRAPPED_MARKER) {
            Self::Wrapped
        } else {
            Self::Unwrapped
        }
    }

    /// Root element decoded for this layout
    pub fn root_element(self) -> &'static str {
        match self {
            Self::Wrapped => "multi-routing-engine-results",
            Self::Unwrapped => "software-information",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct MultiRoutingEngineResults {
    #[serde(rename = "multi-routing-engine-item", default)]
    items: Vec<RoutingEngineItem>,
}

#[derive(Debug, Default, Deserialize)]
struct RoutingEngineItem {
    #[serde(rename = "software-information", default, deserialize_with = "last")]
    software: SoftwareInformation,
}

#[derive(Debug, Default, Deserialize)]
struct SoftwareInformation {
    #[serde(rename = "host-name", default, deserialize_with = "last")]
    host_name: String,
    #[serde(rename = "product-name", default, deserialize_with = "last")]
    product_name: String,
    #[serde(rename = "junos-version", default, deserialize_with = "last")]
    junos_version: String,
}

/// A decoded reply, still in its source layout
#[derive(Debug)]
enum VersionReply {
    Wrapped(MultiRoutingEngineResults),
    Unwrapped(SoftwareInformation),
}

impl VersionReply {
    fn decode(text: &str) -> Result<Self, DecodeError> {
        let dialect = VersionDialect::detect(text);
        debug!(?dialect, "Selected software-information layout");

        // Either layout is accepted under any root element
        let document = dialect.root_element();
        match dialect {
            VersionDialect::Wrapped => from_xml_any_root(document, text).map(Self::Wrapped),
            VersionDialect::Unwrapped => from_xml_any_root(document, text).map(Self::Unwrapped),
        }
    }

    fn into_fact(self) -> VersionFact {
        match self {
            // Only the first routing engine is reported
            Self::Wrapped(results) => results
                .items
                .into_iter()
                .next()
                .map(|item| VersionFact {
                    model: family_prefix(&item.software.product_name),
                    version: item.software.junos_version,
                })
                .unwrap_or_default(),
            Self::Unwrapped(info) => VersionFact {
                model: info.host_name,
                version: info.junos_version,
            },
        }
    }
}

/// Leading run of ASCII letters, e.g. `EX4300-48T` -> `EX`
pub fn family_prefix(product_name: &str) -> String {
    product_name
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect()
}

/// Resolve model and version from a `get-software-information` reply.
///
/// Absent fields yield empty strings; only undecodable markup is an error.
pub fn resolve_version(text: &str) -> Result<VersionFact, DecodeError> {
    decode_reply("software-information", text, |text| {
        VersionReply::decode(text).map(VersionReply::into_fact)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EX_REPLY: &str = r#"<multi-routing-engine-results>
    <multi-routing-engine-item>
        <re-name>fpc0</re-name>
        <software-information>
            <host-name>sw-core-01</host-name>
            <product-model>ex4300-48t</product-model>
            <product-name>EX4300-48T</product-name>
            <junos-version>21.4R3-S5.4</junos-version>
            <package-information>
                <name>junos</name>
                <comment>JUNOS Base OS boot [21.4R3-S5.4]</comment>
            </package-information>
        </software-information>
    </multi-routing-engine-item>
    <multi-routing-engine-item>
        <re-name>fpc1</re-name>
        <software-information>
            <host-name>sw-core-01</host-name>
            <product-name>QFX5120-48Y</product-name>
            <junos-version>22.2R1.9</junos-version>
        </software-information>
    </multi-routing-engine-item>
</multi-routing-engine-results>"#;

    #[test]
    fn test_unwrapped_dialect() {
        let xml = "<software-information><host-name>rtr1</host-name><junos-version>21.4R3</junos-version></software-information>";

        let fact = resolve_version(xml).unwrap();
        assert_eq!(
            fact,
            VersionFact {
                model: "rtr1".to_string(),
                version: "21.4R3".to_string(),
            }
        );
    }

    #[test]
    fn test_unwrapped_host_name_is_verbatim() {
        let xml = r#"<software-information>
            <host-name>ACX7100-edge2</host-name>
            <product-model>acx7100-48l</product-model>
            <junos-version>23.2R1-S1.6-EVO</junos-version>
        </software-information>"#;

        let fact = resolve_version(xml).unwrap();
        assert_eq!(fact.model, "ACX7100-edge2");
        assert_eq!(fact.version, "23.2R1-S1.6-EVO");
    }

    #[test]
    fn test_wrapped_dialect_uses_first_engine() {
        let fact = resolve_version(EX_REPLY).unwrap();
        assert_eq!(fact.model, "EX");
        assert_eq!(fact.version, "21.4R3-S5.4");
    }

    #[test]
    fn test_wrapped_without_product_name() {
        let xml = r#"<multi-routing-engine-results>
            <multi-routing-engine-item>
                <software-information>
                    <junos-version>20.4R3.8</junos-version>
                </software-information>
            </multi-routing-engine-item>
        </multi-routing-engine-results>"#;

        let fact = resolve_version(xml).unwrap();
        assert_eq!(fact.model, "");
        assert_eq!(fact.version, "20.4R3.8");
    }

    #[test]
    fn test_repeated_elements_keep_last() {
        let xml = r#"<multi-routing-engine-results>
            <multi-routing-engine-item>
                <re-name>fpc0</re-name>
                <software-information>
                    <product-name>EX2300-24P</product-name>
                    <junos-version>20.4R3.8</junos-version>
                </software-information>
                <software-information>
                    <product-name>EX4300-48T</product-name>
                    <junos-version>21.4R3-S5.4</junos-version>
                </software-information>
            </multi-routing-engine-item>
        </multi-routing-engine-results>"#;

        let fact = resolve_version(xml).unwrap();
        assert_eq!(fact.model, "EX");
        assert_eq!(fact.version, "21.4R3-S5.4");

        let xml = "<software-information><host-name>rtr1</host-name><junos-version>21.4R1</junos-version><junos-version>21.4R3</junos-version></software-information>";
        assert_eq!(resolve_version(xml).unwrap().version, "21.4R3");
    }

    #[test]
    fn test_unwrapped_accepts_any_root() {
        let xml = "<rpc-reply><host-name>rtr9</host-name><junos-version>22.4R2</junos-version></rpc-reply>";

        let fact = resolve_version(xml).unwrap();
        assert_eq!(fact.model, "rtr9");
        assert_eq!(fact.version, "22.4R2");
    }

    #[test]
    fn test_wrapped_without_items() {
        let xml = "<multi-routing-engine-results></multi-routing-engine-results>";
        assert_eq!(resolve_version(xml).unwrap(), VersionFact::default());
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let xml = "<software-information><product-model>mx204</product-model></software-information>";
        assert_eq!(resolve_version(xml).unwrap(), VersionFact::default());
    }

    #[test]
    fn test_malformed_reply() {
        let err = resolve_version("<software-information><host-name>rtr1</software-information>")
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Malformed {
                document: "software-information",
                ..
            }
        ));

        let err = resolve_version(
            "<multi-routing-engine-results><multi-routing-engine-item></multi-routing-engine-results>",
        )
        .unwrap_err();
        assert_eq!(err.document(), "multi-routing-engine-results");
    }

    #[test]
    fn test_family_prefix() {
        assert_eq!(family_prefix("ABC123"), "ABC");
        assert_eq!(family_prefix("EX4300-48T"), "EX");
        assert_eq!(family_prefix("qfx5110-48s-4c"), "qfx");
        assert_eq!(family_prefix("4300"), "");
        assert_eq!(family_prefix(""), "");
    }

    #[test]
    fn test_detect_dialect() {
        assert_eq!(VersionDialect::detect(EX_REPLY), VersionDialect::Wrapped);
        assert_eq!(
            VersionDialect::detect("<software-information/>"),
            VersionDialect::Unwrapped
        );
    }

    #[test]
    fn test_repeated_decode_is_stable() {
        assert_eq!(
            resolve_version(EX_REPLY).unwrap(),
            resolve_version(EX_REPLY).unwrap()
        );
    }
}
