//! Hardware inventory from `get-chassis-inventory` replies
//!
//! Junos reports the module tree with a distinct element per depth:
//! `chassis` > `chassis-module` > `chassis-sub-module` >
//! `chassis-sub-sub-module` > `chassis-sub-sub-sub-module`. The raw model
//! mirrors that with one struct per level, the deepest carrying no children,
//! and is then folded into a single [`HardwareModule`] tree.
//!
//! An absent `<chassis>` element decodes the same as an empty one. Use
//! [`HardwareModule::is_empty`] to detect a reply without inventory.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::guard::{decode_reply, from_xml, last};

const ROOT: &str = "chassis-inventory";

/// Depth of a module in the chassis tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleLevel {
    Chassis,
    Module,
    SubModule,
    SubSubModule,
    SubSubSubModule,
}

impl ModuleLevel {
    /// 0 for the chassis, 4 for the deepest level
    pub fn depth(self) -> usize {
        match self {
            Self::Chassis => 0,
            Self::Module => 1,
            Self::SubModule => 2,
            Self::SubSubModule => 3,
            Self::SubSubSubModule => 4,
        }
    }

    /// Level of this level's children, `None` at the deepest level
    pub fn child(self) -> Option<Self> {
        match self {
            Self::Chassis => Some(Self::Module),
            Self::Module => Some(Self::SubModule),
            Self::SubModule => Some(Self::SubSubModule),
            Self::SubSubModule => Some(Self::SubSubSubModule),
            Self::SubSubSubModule => None,
        }
    }

    /// XML element that carries modules of this level
    pub fn element(self) -> &'static str {
        match self {
            Self::Chassis => "chassis",
            Self::Module => "chassis-module",
            Self::SubModule => "chassis-sub-module",
            Self::SubSubModule => "chassis-sub-sub-module",
            Self::SubSubSubModule => "chassis-sub-sub-sub-module",
        }
    }
}

/// One node of the chassis module tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareModule {
    pub level: ModuleLevel,
    pub name: String,
    pub description: String,
    /// Child modules in document order; always empty at the deepest level
    #[serde(default)]
    pub children: Vec<HardwareModule>,
}

impl HardwareModule {
    fn leaf(level: ModuleLevel, name: String, description: String) -> Self {
        Self {
            level,
            name,
            description,
            children: Vec::new(),
        }
    }

    /// No name, no description and no children.
    ///
    /// This is what both a missing and an empty `<chassis>` decode to.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.description.is_empty() && self.children.is_empty()
    }

    /// Number of modules below this one, at any depth
    pub fn module_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.module_count())
            .sum()
    }

    /// Pre-order walk over this module and all descendants, in document order
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Iterator returned by [`HardwareModule::walk`]
pub struct Walk<'a> {
    stack: Vec<&'a HardwareModule>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a HardwareModule;

    fn next(&mut self) -> Option<Self::Item> {
        let module = self.stack.pop()?;
        self.stack.extend(module.children.iter().rev());
        Some(module)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ChassisInventory {
    #[serde(default, deserialize_with = "last")]
    chassis: RawChassis,
}

#[derive(Debug, Default, Deserialize)]
struct RawChassis {
    #[serde(default, deserialize_with = "last")]
    name: String,
    #[serde(default, deserialize_with = "last")]
    description: String,
    #[serde(rename = "chassis-module", default)]
    modules: Vec<RawModule>,
}

#[derive(Debug, Default, Deserialize)]
struct RawModule {
    #[serde(default, deserialize_with = "last")]
    name: String,
    #[serde(default, deserialize_with = "last")]
    description: String,
    #[serde(rename = "chassis-sub-module", default)]
    sub_modules: Vec<RawSubModule>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSubModule {
    #[serde(default, deserialize_with = "last")]
    name: String,
    #[serde(default, deserialize_with = "last")]
    description: String,
    #[serde(rename = "chassis-sub-sub-module", default)]
    sub_sub_modules: Vec<RawSubSubModule>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSubSubModule {
    #[serde(default, deserialize_with = "last")]
    name: String,
    #[serde(default, deserialize_with = "last")]
    description: String,
    #[serde(rename = "chassis-sub-sub-sub-module", default)]
    sub_sub_sub_modules: Vec<RawSubSubSubModule>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSubSubSubModule {
    #[serde(default, deserialize_with = "last")]
    name: String,
    #[serde(default, deserialize_with = "last")]
    description: String,
}

/// Folding of one raw level into the public tree
trait IntoModule {
    fn into_module(self) -> HardwareModule;
}

fn fold<T: IntoModule>(children: Vec<T>) -> Vec<HardwareModule> {
    children.into_iter().map(IntoModule::into_module).collect()
}

impl IntoModule for RawChassis {
    fn into_module(self) -> HardwareModule {
        HardwareModule {
            children: fold(self.modules),
            ..HardwareModule::leaf(ModuleLevel::Chassis, self.name, self.description)
        }
    }
}

impl IntoModule for RawModule {
    fn into_module(self) -> HardwareModule {
        HardwareModule {
            children: fold(self.sub_modules),
            ..HardwareModule::leaf(ModuleLevel::Module, self.name, self.description)
        }
    }
}

impl IntoModule for RawSubModule {
    fn into_module(self) -> HardwareModule {
        HardwareModule {
            children: fold(self.sub_sub_modules),
            ..HardwareModule::leaf(ModuleLevel::SubModule, self.name, self.description)
        }
    }
}

impl IntoModule for RawSubSubModule {
    fn into_module(self) -> HardwareModule {
        HardwareModule {
            children: fold(self.sub_sub_sub_modules),
            ..HardwareModule::leaf(ModuleLevel::SubSubModule, self.name, self.description)
        }
    }
}

impl IntoModule for RawSubSubSubModule {
    fn into_module(self) -> HardwareModule {
        HardwareModule::leaf(ModuleLevel::SubSubSubModule, self.name, self.description)
    }
}

/// Resolve the chassis module tree from a `chassis-inventory` reply.
///
/// Sibling order is preserved at every level and modules sharing a name
/// (redundant PSUs, fan trays) are kept as separate nodes.
pub fn resolve_inventory(text: &str) -> Result<HardwareModule, DecodeError> {
    decode_reply(ROOT, text, |text| {
        let inventory: ChassisInventory = from_xml(ROOT, text)?;
        Ok(inventory.chassis.into_module())
    })
}
