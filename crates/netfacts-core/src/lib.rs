//! Netfacts Core - Typed facts from Junos XML command replies
//!
//! This crate turns raw reply text into strongly-typed facts:
//! - Software version and device model (two reply layouts)
//! - Interface descriptions and physical/logical interface presence
//! - Chassis hardware inventory as a module tree
//! - LACP aggregates with a member-to-aggregate digest
//!
//! Every extractor takes the reply text, performs a single decode and
//! returns its own result. Panics inside an extractor are contained and
//! reported as [`DecodeError::InternalFault`].

pub mod chassis;
pub mod error;
mod guard;
pub mod interfaces;
pub mod lacp;
pub mod reply;
pub mod router;
pub mod version;

pub use chassis::{resolve_inventory, HardwareModule, ModuleLevel};
pub use error::DecodeError;
pub use interfaces::{
    resolve_descriptions, resolve_topology, InterfaceDescription, InterfaceKind, InterfaceList,
    PhysicalInterface,
};
pub use lacp::{resolve_lacp, LacpAggregate, LacpDigest};
pub use reply::{decode, Facts, ReplyKind};
pub use router::RouterFacts;
pub use version::{resolve_version, VersionDialect, VersionFact};
