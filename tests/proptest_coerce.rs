//! Property-based tests for argument coercion using proptest
//!
//! Coercion is pure data transformation: whatever JSON lands in the file
//! must come out of the coercer unchanged, for arbitrary maps and lists.

use std::io::Write;
use std::sync::OnceLock;

use proptest::prelude::*;
use serde_json::{Map, Value};

use nfvctl::command::coerce::{coerce, Arg};
use nfvctl::command::registry::OperationDescriptor;
use nfvctl::command::{build_registry, Registry};

static REGISTRY: OnceLock<Registry> = OnceLock::new();

fn registry() -> &'static Registry {
    REGISTRY.get_or_init(build_registry)
}

/// The composite record create declares id + map + list + map, which covers
/// every structured parameter kind in one descriptor.
fn composite_create() -> &'static OperationDescriptor {
    registry()
        .descriptors("NetworkServiceRecord-create")
        .expect("command registered")
        .iter()
        .find(|d| d.arity() == 4)
        .expect("composite variant registered")
}

fn temp_json(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write");
    file
}

fn tokens(
    id: &str,
    map_file: &tempfile::NamedTempFile,
    list_file: &tempfile::NamedTempFile,
    configs_file: &tempfile::NamedTempFile,
) -> Vec<String> {
    vec![
        id.to_string(),
        map_file.path().to_string_lossy().into_owned(),
        list_file.path().to_string_lossy().into_owned(),
        configs_file.path().to_string_lossy().into_owned(),
    ]
}

proptest! {
    #[test]
    fn identifiers_pass_through_unchanged(id in "[a-zA-Z0-9-]{1,24}") {
        let map_file = temp_json("{}");
        let list_file = temp_json("[]");
        let configs_file = temp_json("{}");

        let args = coerce(
            composite_create(),
            &tokens(&id, &map_file, &list_file, &configs_file),
        )
        .expect("coercion succeeds");

        prop_assert_eq!(&args[0], &Arg::Id(id));
    }

    #[test]
    fn structured_maps_round_trip(
        entries in prop::collection::btree_map("[a-z]{1,8}", "[a-zA-Z0-9 ]{0,12}", 0..8)
    ) {
        let serialized = serde_json::to_string(&entries).expect("serialize map");
        let map_file = temp_json(&serialized);
        let list_file = temp_json("[]");
        let configs_file = temp_json("{}");

        let args = coerce(
            composite_create(),
            &tokens("nsd-1", &map_file, &list_file, &configs_file),
        )
        .expect("coercion succeeds");

        let expected: Map<String, Value> = entries
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        prop_assert_eq!(&args[1], &Arg::Map(expected));
    }

    #[test]
    fn structured_lists_round_trip(
        items in prop::collection::vec("[a-z0-9]{0,16}", 0..16)
    ) {
        let serialized = serde_json::to_string(&items).expect("serialize list");
        let map_file = temp_json("{}");
        let list_file = temp_json(&serialized);
        let configs_file = temp_json("{}");

        let args = coerce(
            composite_create(),
            &tokens("nsd-1", &map_file, &list_file, &configs_file),
        )
        .expect("coercion succeeds");

        let expected: Vec<Value> = items.into_iter().map(Value::String).collect();
        prop_assert_eq!(&args[2], &Arg::List(expected));
    }
}
