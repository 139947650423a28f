//! Record entities: the runtime state the orchestrator keeps for deployed
//! services and their parts.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::resource_kind;

/// Runtime record of a deployed network service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkServiceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
resource_kind!(NetworkServiceRecord, "NetworkServiceRecord");

/// Runtime record of one VNF inside a service record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualNetworkFunctionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
resource_kind!(VirtualNetworkFunctionRecord, "VirtualNetworkFunctionRecord");

/// One deployed component instance of a VNF (the unit scale-out adds and
/// scale-in removes).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VNFCInstance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
resource_kind!(VNFCInstance, "VNFCInstance");

/// Dependency between two VNF records of a deployed service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VNFRecordDependency {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
resource_kind!(VNFRecordDependency, "VNFRecordDependency");
