//! Resource catalogue
//!
//! Value types for the entities the orchestrator exposes. The client layer
//! is polymorphic over them: it only serializes and deserializes, never
//! inspects fields, so each type carries the common identity fields plus a
//! flattened catch-all map that round-trips everything else verbatim.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A serializable resource type the orchestrator exposes, identified by the
/// name used in command help and argument diagnostics.
pub trait ResourceKind: Serialize + DeserializeOwned + Send + Sync + 'static {
    const NAME: &'static str;
}

macro_rules! resource_kind {
    ($type:ty, $name:literal) => {
        impl crate::catalogue::ResourceKind for $type {
            const NAME: &'static str = $name;
        }
    };
}
pub(crate) use resource_kind;

pub mod descriptor;
pub mod nfvo;
pub mod record;

pub use descriptor::{
    NetworkServiceDescriptor, VNFDependency, VNFForwardingGraphDescriptor, VirtualLink,
    VirtualNetworkFunctionDescriptor,
};
pub use nfvo::{Configuration, Event, Key, Project, User, VNFPackage, VimInstance};
pub use record::{
    NetworkServiceRecord, VNFCInstance, VNFRecordDependency, VirtualNetworkFunctionRecord,
};
