//! Descriptor entities: the deployment templates the orchestrator
//! instantiates records from.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::resource_kind;

/// Template for a network service, composed of VNF descriptors and their
/// dependencies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkServiceDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
resource_kind!(NetworkServiceDescriptor, "NetworkServiceDescriptor");

/// Template for a single virtual network function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualNetworkFunctionDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
resource_kind!(
    VirtualNetworkFunctionDescriptor,
    "VirtualNetworkFunctionDescriptor"
);

/// Source/target dependency between two VNF descriptors of one service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VNFDependency {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
resource_kind!(VNFDependency, "VNFDependency");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
resource_kind!(VirtualLink, "VirtualLink");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VNFForwardingGraphDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
resource_kind!(VNFForwardingGraphDescriptor, "VNFForwardingGraphDescriptor");
