//! Capability listing
//!
//! The declarative table of every remote operation the CLI offers. Each
//! resource gets the five generic operations; the descriptor and record
//! resources add their nested operations on top, overriding or extending
//! the generic set. Command names follow `{ResourcePrefix}-{operation}`.
//!
//! Several operations deliberately target a different resource type than
//! their owning resource (`NetworkServiceRecord-createVNFR` yields a
//! `VirtualNetworkFunctionRecord`); the declared remap below is what the
//! registry resolves, nothing is inferred from the command name.

use std::sync::Arc;

use futures::FutureExt;
use serde::Serialize;
use serde_json::{json, Value};

use super::coerce::{Arg, Args, ArgumentError};
use super::registry::{
    object_parser, CallResult, DispatchError, ParamKind, Registry, RegistryBuilder,
};
use crate::catalogue::{
    Configuration, Event, Key, NetworkServiceDescriptor, NetworkServiceRecord, Project,
    ResourceKind, User, VNFCInstance, VNFDependency, VNFForwardingGraphDescriptor, VNFPackage,
    VNFRecordDependency, VimInstance, VirtualLink, VirtualNetworkFunctionDescriptor,
    VirtualNetworkFunctionRecord,
};
use crate::nfvo::agent::encode;
use crate::nfvo::{ApiError, NfvoClient, CREATED_OR_NO_CONTENT};

use super::registry::ParamKind::{FileBackedObject, Identifier, StructuredList, StructuredMap};

const DATACENTERS: &str = "/datacenters";
const NS_DESCRIPTORS: &str = "/ns-descriptors";
const VNF_DESCRIPTORS: &str = "/vnf-descriptors";
const NS_RECORDS: &str = "/ns-records";
const CONFIGURATIONS: &str = "/configurations";
const EVENTS: &str = "/events";
const VNF_PACKAGES: &str = "/vnf-packages";
const VIRTUAL_LINKS: &str = "/virtual-links";
const VNF_FORWARDING_GRAPHS: &str = "/vnf-forwarding-graphs";
const KEYS: &str = "/keys";
const PROJECTS: &str = "/projects";
const USERS: &str = "/users";

/// Wraps a handler body into the boxed-future shape the registry stores.
macro_rules! handler {
    (|$client:ident, $args:ident| $body:block) => {
        Arc::new(move |$client: Arc<NfvoClient>, $args: Vec<Arg>| {
            let fut = async move {
                #[allow(unused_mut)]
                let mut $args = Args::new($args);
                $body
            };
            let fut: futures::future::BoxFuture<
                'static,
                Result<CallResult, DispatchError>,
            > = fut.boxed();
            fut
        })
    };
}

/// Build the full command table. Called once at startup.
pub fn build_registry() -> Registry {
    let mut builder = RegistryBuilder::new();

    crud::<NetworkServiceRecord>(&mut builder, "NetworkServiceRecord", NS_RECORDS);
    network_service_record_operations(&mut builder);

    crud::<Configuration>(&mut builder, "Configuration", CONFIGURATIONS);
    crud::<Event>(&mut builder, "Event", EVENTS);
    crud::<VNFForwardingGraphDescriptor>(
        &mut builder,
        "VNFForwardingGraphDescriptor",
        VNF_FORWARDING_GRAPHS,
    );
    crud::<VimInstance>(&mut builder, "VimInstance", DATACENTERS);

    crud::<NetworkServiceDescriptor>(&mut builder, "NetworkServiceDescriptor", NS_DESCRIPTORS);
    network_service_descriptor_operations(&mut builder);

    crud::<VirtualNetworkFunctionDescriptor>(
        &mut builder,
        "VirtualNetworkFunctionDescriptor",
        VNF_DESCRIPTORS,
    );
    crud::<VirtualLink>(&mut builder, "VirtualLink", VIRTUAL_LINKS);
    crud::<VNFPackage>(&mut builder, "VNFPackage", VNF_PACKAGES);
    crud::<Key>(&mut builder, "Key", KEYS);
    crud::<Project>(&mut builder, "Project", PROJECTS);
    crud::<User>(&mut builder, "User", USERS);

    builder.build()
}

/// Register the five generic operations every resource inherits.
fn crud<T: ResourceKind>(builder: &mut RegistryBuilder, prefix: &'static str, path: &'static str) {
    builder.operation(
        prefix,
        "create",
        format!("Create the object of type {prefix}"),
        vec![FileBackedObject],
        T::NAME,
        Some(object_parser::<T>()),
        handler!(|client, args| {
            let object: T = typed(args.object()?)?;
            match client.agent::<T>(path).create(&object).await? {
                Some(created) => Ok(CallResult::Item(to_result(&created)?)),
                None => Ok(CallResult::NoContent),
            }
        }),
    );

    builder.operation(
        prefix,
        "delete",
        format!("Delete the object of type {prefix} passing the id"),
        vec![Identifier],
        T::NAME,
        None,
        handler!(|client, args| {
            let id = args.identifier()?;
            client.agent::<T>(path).delete(&id).await?;
            Ok(CallResult::NoContent)
        }),
    );

    builder.operation(
        prefix,
        "findAll",
        format!("Find all the objects of type {prefix}"),
        Vec::new(),
        T::NAME,
        None,
        handler!(|client, _args| {
            let items = client.agent::<T>(path).find_all().await?;
            Ok(CallResult::List(to_result_list(&items)?))
        }),
    );

    builder.operation(
        prefix,
        "findById",
        format!("Find the object of type {prefix} through the id"),
        vec![Identifier],
        T::NAME,
        None,
        handler!(|client, args| {
            let id = args.identifier()?;
            let item = client.agent::<T>(path).find_by_id(&id).await?;
            Ok(CallResult::Item(to_result(&item)?))
        }),
    );

    builder.operation(
        prefix,
        "update",
        format!("Update the object of type {prefix} passing the new object and the id of the old object"),
        vec![FileBackedObject, Identifier],
        T::NAME,
        Some(object_parser::<T>()),
        handler!(|client, args| {
            let object: T = typed(args.object()?)?;
            let id = args.identifier()?;
            let updated = client.agent::<T>(path).update(&id, &object).await?;
            Ok(CallResult::Item(to_result(&updated)?))
        }),
    );
}

fn network_service_descriptor_operations(builder: &mut RegistryBuilder) {
    let prefix = "NetworkServiceDescriptor";

    builder.operation(
        prefix,
        "createVNFD",
        "Create the VirtualNetworkFunctionDescriptor of a NetworkServiceDescriptor with specific id",
        vec![Identifier, FileBackedObject],
        VirtualNetworkFunctionDescriptor::NAME,
        Some(object_parser::<VirtualNetworkFunctionDescriptor>()),
        handler!(|client, args| {
            let id = args.identifier()?;
            let vnfd = args.object()?;
            let agent = client.agent::<NetworkServiceDescriptor>(NS_DESCRIPTORS);
            let created: Option<Value> = agent
                .create_at(
                    &format!("{}/vnfdescriptors", encode(&id)),
                    &vnfd,
                    CREATED_OR_NO_CONTENT,
                )
                .await?;
            Ok(item_or_no_content(created))
        }),
    );

    builder.operation(
        prefix,
        "getVirtualNetworkFunctionDescriptors",
        "Get all the VirtualNetworkFunctionDescriptors of a NetworkServiceDescriptor with specific id",
        vec![Identifier],
        VirtualNetworkFunctionDescriptor::NAME,
        None,
        handler!(|client, args| {
            let id = args.identifier()?;
            let agent = client.agent::<NetworkServiceDescriptor>(NS_DESCRIPTORS);
            let descriptors: Vec<VirtualNetworkFunctionDescriptor> = agent
                .fetch_all_at(&format!("{}/vnfdescriptors", encode(&id)))
                .await?;
            Ok(CallResult::List(to_result_list(&descriptors)?))
        }),
    );

    builder.operation(
        prefix,
        "getVirtualNetworkFunctionDescriptor",
        "Get the VirtualNetworkFunctionDescriptor of a NetworkServiceDescriptor with specific id",
        vec![Identifier, Identifier],
        VirtualNetworkFunctionDescriptor::NAME,
        None,
        handler!(|client, args| {
            let id = args.identifier()?;
            let id_vnfd = args.identifier()?;
            let agent = client.agent::<NetworkServiceDescriptor>(NS_DESCRIPTORS);
            let descriptor: VirtualNetworkFunctionDescriptor = agent
                .fetch_at(&format!("{}/vnfdescriptors/{}", encode(&id), encode(&id_vnfd)))
                .await?;
            Ok(CallResult::Item(to_result(&descriptor)?))
        }),
    );

    builder.operation(
        prefix,
        "deleteVirtualNetworkFunctionDescriptor",
        "Delete the VirtualNetworkFunctionDescriptor of a NetworkServiceDescriptor with specific id",
        vec![Identifier, Identifier],
        VirtualNetworkFunctionDescriptor::NAME,
        None,
        handler!(|client, args| {
            let id = args.identifier()?;
            let id_vnfd = args.identifier()?;
            let agent = client.agent::<NetworkServiceDescriptor>(NS_DESCRIPTORS);
            agent
                .delete_at(&format!("{}/vnfdescriptors/{}", encode(&id), encode(&id_vnfd)))
                .await?;
            Ok(CallResult::NoContent)
        }),
    );

    builder.operation(
        prefix,
        "createVNFDependency",
        "Create the VNFDependency of a NetworkServiceDescriptor with specific id",
        vec![Identifier, FileBackedObject],
        VNFDependency::NAME,
        Some(object_parser::<VNFDependency>()),
        handler!(|client, args| {
            let id = args.identifier()?;
            let dependency = args.object()?;
            let agent = client.agent::<NetworkServiceDescriptor>(NS_DESCRIPTORS);
            let created: Option<Value> = agent
                .create_at(
                    &format!("{}/vnfdependencies", encode(&id)),
                    &dependency,
                    CREATED_OR_NO_CONTENT,
                )
                .await?;
            Ok(item_or_no_content(created))
        }),
    );
}

fn network_service_record_operations(builder: &mut RegistryBuilder) {
    let prefix = "NetworkServiceRecord";

    // Overload of the generic create: instantiate a record from a
    // NetworkServiceDescriptor id plus deployment inputs.
    builder.operation(
        prefix,
        "create",
        "Create a NetworkServiceRecord from a NetworkServiceDescriptor id, \
         a vim-instance map, a key list and a configurations map",
        vec![Identifier, StructuredMap, StructuredList, StructuredMap],
        NetworkServiceRecord::NAME,
        None,
        handler!(|client, args| {
            let id = args.identifier()?;
            let vdu_vim_instances = args.map()?;
            let keys = args.list()?;
            let configurations = args.map()?;
            let body = json!({
                "vduVimInstances": vdu_vim_instances,
                "keys": keys,
                "configurations": configurations,
            });
            let agent = client.agent::<NetworkServiceRecord>(NS_RECORDS);
            let created: Option<NetworkServiceRecord> = agent
                .create_at(&encode(&id), &body, CREATED_OR_NO_CONTENT)
                .await?;
            match created {
                Some(record) => Ok(CallResult::Item(to_result(&record)?)),
                None => Ok(CallResult::NoContent),
            }
        }),
    );

    builder.operation(
        prefix,
        "getVirtualNetworkFunctionRecords",
        "Get all the VirtualNetworkFunctionRecords of NetworkServiceRecord with specific id",
        vec![Identifier],
        VirtualNetworkFunctionRecord::NAME,
        None,
        handler!(|client, args| {
            let id = args.identifier()?;
            let agent = client.agent::<NetworkServiceRecord>(NS_RECORDS);
            let records: Vec<VirtualNetworkFunctionRecord> = agent
                .fetch_all_at(&format!("{}/vnfrecords", encode(&id)))
                .await?;
            Ok(CallResult::List(to_result_list(&records)?))
        }),
    );

    builder.operation(
        prefix,
        "getVirtualNetworkFunctionRecord",
        "Get the VirtualNetworkFunctionRecord of NetworkServiceRecord with specific id",
        vec![Identifier, Identifier],
        VirtualNetworkFunctionRecord::NAME,
        None,
        handler!(|client, args| {
            let id = args.identifier()?;
            let id_vnf = args.identifier()?;
            let agent = client.agent::<NetworkServiceRecord>(NS_RECORDS);
            let record: VirtualNetworkFunctionRecord = agent
                .fetch_at(&format!("{}/vnfrecords/{}", encode(&id), encode(&id_vnf)))
                .await?;
            Ok(CallResult::Item(to_result(&record)?))
        }),
    );

    builder.operation(
        prefix,
        "deleteVirtualNetworkFunctionRecord",
        "Delete the VirtualNetworkFunctionRecord of NetworkServiceRecord with specific id",
        vec![Identifier, Identifier],
        VirtualNetworkFunctionRecord::NAME,
        None,
        handler!(|client, args| {
            let id = args.identifier()?;
            let id_vnf = args.identifier()?;
            let agent = client.agent::<NetworkServiceRecord>(NS_RECORDS);
            agent
                .delete_at(&format!("{}/vnfrecords/{}", encode(&id), encode(&id_vnf)))
                .await?;
            Ok(CallResult::NoContent)
        }),
    );

    builder.operation(
        prefix,
        "createVNFR",
        "Create a VirtualNetworkFunctionRecord in the NetworkServiceRecord with specific id",
        vec![Identifier, FileBackedObject],
        VirtualNetworkFunctionRecord::NAME,
        Some(object_parser::<VirtualNetworkFunctionRecord>()),
        handler!(|client, args| {
            let id = args.identifier()?;
            let vnfr = args.object()?;
            let agent = client.agent::<NetworkServiceRecord>(NS_RECORDS);
            let created: Option<Value> = agent
                .create_at(
                    &format!("{}/vnfrecords", encode(&id)),
                    &vnfr,
                    CREATED_OR_NO_CONTENT,
                )
                .await?;
            Ok(item_or_no_content(created))
        }),
    );

    builder.operation(
        prefix,
        "updateVNFR",
        "Update the VirtualNetworkFunctionRecord of the NetworkServiceRecord with specific id",
        vec![Identifier, Identifier, FileBackedObject],
        VirtualNetworkFunctionRecord::NAME,
        Some(object_parser::<VirtualNetworkFunctionRecord>()),
        handler!(|client, args| {
            let id = args.identifier()?;
            let id_vnfr = args.identifier()?;
            let vnfr = args.object()?;
            let agent = client.agent::<NetworkServiceRecord>(NS_RECORDS);
            let updated: Value = agent
                .update_at(&format!("{}/vnfrecords/{}", encode(&id), encode(&id_vnfr)), &vnfr)
                .await?;
            Ok(CallResult::Item(updated))
        }),
    );

    // Scale out: one variant picks the VDU, the other leaves it to the
    // orchestrator. Same name, arities 3 and 4.
    builder.operation(
        prefix,
        "createVNFCInstance",
        "Create a VNFCInstance in the VirtualNetworkFunctionRecord with specific id (scale out)",
        vec![Identifier, Identifier, FileBackedObject],
        VNFCInstance::NAME,
        Some(object_parser::<VNFCInstance>()),
        handler!(|client, args| {
            let id = args.identifier()?;
            let id_vnf = args.identifier()?;
            let component = args.object()?;
            let agent = client.agent::<NetworkServiceRecord>(NS_RECORDS);
            let created: Option<Value> = agent
                .create_at(
                    &format!(
                        "{}/vnfrecords/{}/vdunits/vnfcinstances",
                        encode(&id),
                        encode(&id_vnf)
                    ),
                    &component,
                    CREATED_OR_NO_CONTENT,
                )
                .await?;
            Ok(item_or_no_content(created))
        }),
    );

    builder.operation(
        prefix,
        "createVNFCInstance",
        "Create a VNFCInstance in the VDU with specific id (scale out)",
        vec![Identifier, Identifier, Identifier, FileBackedObject],
        VNFCInstance::NAME,
        Some(object_parser::<VNFCInstance>()),
        handler!(|client, args| {
            let id = args.identifier()?;
            let id_vnf = args.identifier()?;
            let id_vdu = args.identifier()?;
            let component = args.object()?;
            let agent = client.agent::<NetworkServiceRecord>(NS_RECORDS);
            let created: Option<Value> = agent
                .create_at(
                    &format!(
                        "{}/vnfrecords/{}/vdunits/{}/vnfcinstances",
                        encode(&id),
                        encode(&id_vnf),
                        encode(&id_vdu)
                    ),
                    &component,
                    CREATED_OR_NO_CONTENT,
                )
                .await?;
            Ok(item_or_no_content(created))
        }),
    );

    // Scale in, with the same arity ladder in reverse.
    builder.operation(
        prefix,
        "deleteVNFCInstance",
        "Remove a VNFCInstance from the VirtualNetworkFunctionRecord with specific id (scale in)",
        vec![Identifier, Identifier],
        VNFCInstance::NAME,
        None,
        handler!(|client, args| {
            let id = args.identifier()?;
            let id_vnf = args.identifier()?;
            let agent = client.agent::<NetworkServiceRecord>(NS_RECORDS);
            agent
                .delete_at(&format!(
                    "{}/vnfrecords/{}/vdunits/vnfcinstances",
                    encode(&id),
                    encode(&id_vnf)
                ))
                .await?;
            Ok(CallResult::NoContent)
        }),
    );

    builder.operation(
        prefix,
        "deleteVNFCInstance",
        "Remove a VNFCInstance from the VDU with specific id (scale in)",
        vec![Identifier, Identifier, Identifier],
        VNFCInstance::NAME,
        None,
        handler!(|client, args| {
            let id = args.identifier()?;
            let id_vnf = args.identifier()?;
            let id_vdu = args.identifier()?;
            let agent = client.agent::<NetworkServiceRecord>(NS_RECORDS);
            agent
                .delete_at(&format!(
                    "{}/vnfrecords/{}/vdunits/{}/vnfcinstances",
                    encode(&id),
                    encode(&id_vnf),
                    encode(&id_vdu)
                ))
                .await?;
            Ok(CallResult::NoContent)
        }),
    );

    builder.operation(
        prefix,
        "deleteVNFCInstance",
        "Remove the VNFCInstance with specific id from the VDU (scale in)",
        vec![Identifier, Identifier, Identifier, Identifier],
        VNFCInstance::NAME,
        None,
        handler!(|client, args| {
            let id = args.identifier()?;
            let id_vnf = args.identifier()?;
            let id_vdu = args.identifier()?;
            let id_vnfc = args.identifier()?;
            let agent = client.agent::<NetworkServiceRecord>(NS_RECORDS);
            agent
                .delete_at(&format!(
                    "{}/vnfrecords/{}/vdunits/{}/vnfcinstances/{}",
                    encode(&id),
                    encode(&id_vnf),
                    encode(&id_vdu),
                    encode(&id_vnfc)
                ))
                .await?;
            Ok(CallResult::NoContent)
        }),
    );

    builder.operation(
        prefix,
        "getVNFDependencies",
        "Get all the VirtualNetworkFunctionRecord dependencies of NetworkServiceRecord with specific id",
        vec![Identifier],
        VNFRecordDependency::NAME,
        None,
        handler!(|client, args| {
            let id = args.identifier()?;
            let agent = client.agent::<NetworkServiceRecord>(NS_RECORDS);
            let dependencies: Vec<VNFRecordDependency> = agent
                .fetch_all_at(&format!("{}/vnfdependencies", encode(&id)))
                .await?;
            Ok(CallResult::List(to_result_list(&dependencies)?))
        }),
    );

    builder.operation(
        prefix,
        "getVNFDependency",
        "Get the VirtualNetworkFunctionRecord Dependency of a NetworkServiceRecord with specific id",
        vec![Identifier, Identifier],
        VNFRecordDependency::NAME,
        None,
        handler!(|client, args| {
            let id = args.identifier()?;
            let id_dep = args.identifier()?;
            let agent = client.agent::<NetworkServiceRecord>(NS_RECORDS);
            let dependency: VNFRecordDependency = agent
                .fetch_at(&format!("{}/vnfdependencies/{}", encode(&id), encode(&id_dep)))
                .await?;
            Ok(CallResult::Item(to_result(&dependency)?))
        }),
    );

    builder.operation(
        prefix,
        "deleteVNFDependency",
        "Delete the VirtualNetworkFunctionRecord Dependency of a NetworkServiceRecord with specific id",
        vec![Identifier, Identifier],
        VNFRecordDependency::NAME,
        None,
        handler!(|client, args| {
            let id = args.identifier()?;
            let id_dep = args.identifier()?;
            let agent = client.agent::<NetworkServiceRecord>(NS_RECORDS);
            agent
                .delete_at(&format!("{}/vnfdependencies/{}", encode(&id), encode(&id_dep)))
                .await?;
            Ok(CallResult::NoContent)
        }),
    );

    builder.operation(
        prefix,
        "postVNFDependency",
        "Create the VirtualNetworkFunctionRecord Dependency of a NetworkServiceRecord with specific id",
        vec![Identifier, FileBackedObject],
        VNFRecordDependency::NAME,
        Some(object_parser::<VNFRecordDependency>()),
        handler!(|client, args| {
            let id = args.identifier()?;
            let dependency = args.object()?;
            let agent = client.agent::<NetworkServiceRecord>(NS_RECORDS);
            let created: Option<Value> = agent
                .create_at(
                    &format!("{}/vnfdependencies", encode(&id)),
                    &dependency,
                    CREATED_OR_NO_CONTENT,
                )
                .await?;
            Ok(item_or_no_content(created))
        }),
    );

    builder.operation(
        prefix,
        "updateVNFDependency",
        "Update the VirtualNetworkFunctionRecord Dependency of a NetworkServiceRecord with specific id",
        vec![Identifier, Identifier, FileBackedObject],
        VNFRecordDependency::NAME,
        Some(object_parser::<VNFRecordDependency>()),
        handler!(|client, args| {
            let id = args.identifier()?;
            let id_dep = args.identifier()?;
            let dependency = args.object()?;
            let agent = client.agent::<NetworkServiceRecord>(NS_RECORDS);
            let updated: Value = agent
                .update_at(
                    &format!("{}/vnfdependencies/{}", encode(&id), encode(&id_dep)),
                    &dependency,
                )
                .await?;
            Ok(CallResult::Item(updated))
        }),
    );
}

fn typed<T: ResourceKind>(value: Value) -> Result<T, DispatchError> {
    serde_json::from_value(value)
        .map_err(|e| ArgumentError::bad_json(T::NAME, Some(e)).into())
}

fn to_result<T: Serialize>(object: &T) -> Result<Value, DispatchError> {
    serde_json::to_value(object).map_err(|e| DispatchError::Api(ApiError::malformed(&e)))
}

fn to_result_list<T: Serialize>(objects: &[T]) -> Result<Vec<Value>, DispatchError> {
    objects.iter().map(to_result).collect()
}

fn item_or_no_content(value: Option<Value>) -> CallResult {
    match value {
        Some(value) => CallResult::Item(value),
        None => CallResult::NoContent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_operations_are_registered_for_every_resource() {
        let registry = build_registry();
        for prefix in [
            "VimInstance",
            "NetworkServiceDescriptor",
            "VirtualNetworkFunctionDescriptor",
            "NetworkServiceRecord",
            "Configuration",
            "Event",
            "VNFPackage",
            "VirtualLink",
            "VNFForwardingGraphDescriptor",
            "Key",
            "Project",
            "User",
        ] {
            for op in ["create", "delete", "findAll", "findById", "update"] {
                assert!(
                    registry.contains(&format!("{prefix}-{op}")),
                    "{prefix}-{op} missing"
                );
            }
        }
    }

    #[test]
    fn create_vnfr_targets_the_dependent_record_type() {
        let registry = build_registry();
        let descriptors = registry
            .descriptors("NetworkServiceRecord-createVNFR")
            .unwrap();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].target(), "VirtualNetworkFunctionRecord");
    }

    #[test]
    fn create_vnfd_targets_the_descriptor_type() {
        let registry = build_registry();
        let descriptors = registry
            .descriptors("NetworkServiceDescriptor-createVNFD")
            .unwrap();
        assert_eq!(descriptors[0].target(), "VirtualNetworkFunctionDescriptor");
    }

    #[test]
    fn delete_vnfc_instance_has_three_arities() {
        let registry = build_registry();
        let mut arities: Vec<usize> = registry
            .descriptors("NetworkServiceRecord-deleteVNFCInstance")
            .unwrap()
            .iter()
            .map(|d| d.arity())
            .collect();
        arities.sort_unstable();
        assert_eq!(arities, vec![2, 3, 4]);
    }

    #[test]
    fn resolve_picks_the_descriptor_matching_the_token_count() {
        let registry = build_registry();
        let two = vec!["nsr".to_string(), "vnf".to_string()];
        let three = vec!["nsr".to_string(), "vnf".to_string(), "vdu".to_string()];
        assert_eq!(
            registry
                .resolve("NetworkServiceRecord-deleteVNFCInstance", &two)
                .unwrap()
                .arity(),
            2
        );
        assert_eq!(
            registry
                .resolve("NetworkServiceRecord-deleteVNFCInstance", &three)
                .unwrap()
                .arity(),
            3
        );
    }

    #[test]
    fn resolving_an_unknown_command_is_command_not_found() {
        let registry = build_registry();
        let err = registry.resolve("unknown-cmd", &[]).unwrap_err();
        assert!(matches!(err, DispatchError::CommandNotFound(name) if name == "unknown-cmd"));
    }

    #[test]
    fn unmatched_arity_is_missing_or_invalid_parameter() {
        let registry = build_registry();
        let one = vec!["nsr".to_string()];
        let err = registry
            .resolve("NetworkServiceRecord-deleteVNFCInstance", &one)
            .unwrap_err();
        assert!(matches!(err, DispatchError::MissingOrInvalidParameter(_)));
    }

    #[test]
    fn record_create_keeps_both_the_generic_and_the_composite_variant() {
        let registry = build_registry();
        let mut arities: Vec<usize> = registry
            .descriptors("NetworkServiceRecord-create")
            .unwrap()
            .iter()
            .map(|d| d.arity())
            .collect();
        arities.sort_unstable();
        assert_eq!(arities, vec![1, 4]);
    }
}
