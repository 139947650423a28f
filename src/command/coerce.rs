//! Argument coercion
//!
//! Converts the raw positional tokens following a command name into typed
//! call arguments: identifiers pass through, the other parameter kinds are
//! file paths whose JSON contents are parsed into a generic map, a generic
//! list, or the descriptor's target type. Pure data transformation, no
//! network effects.

use std::path::Path;

use serde_json::{Map, Value};

use super::registry::{DispatchError, OperationDescriptor, ParamKind};

/// Failures while turning raw tokens into typed arguments.
#[derive(Debug, thiserror::Error)]
pub enum ArgumentError {
    /// The file's contents could not be parsed as the expected shape
    /// (`map`, `list`, or a resource type name).
    #[error("the provided json file could not be parsed as a {kind}")]
    BadJson {
        kind: String,
        #[source]
        cause: Option<serde_json::Error>,
    },

    #[error("file not found or unreadable: {0}")]
    FileNotFound(String),

    /// An argument did not have the shape its position declares. Only
    /// reachable when a handler is driven with arguments that did not come
    /// from this coercer.
    #[error("parameter {position} has the wrong shape: expected {expected}")]
    TypeMismatch {
        position: usize,
        expected: &'static str,
    },
}

impl ArgumentError {
    pub(crate) fn bad_json(kind: impl Into<String>, cause: Option<serde_json::Error>) -> Self {
        let error = ArgumentError::BadJson {
            kind: kind.into(),
            cause,
        };
        tracing::debug!("{error:?}");
        error
    }
}

/// One coerced positional argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Id(String),
    Map(Map<String, Value>),
    List(Vec<Value>),
    Object(Value),
}

/// Positional cursor handed to operation handlers.
pub struct Args {
    inner: std::vec::IntoIter<Arg>,
    position: usize,
}

impl Args {
    pub fn new(args: Vec<Arg>) -> Self {
        Self {
            inner: args.into_iter(),
            position: 0,
        }
    }

    fn next(&mut self, expected: &'static str) -> Result<Arg, ArgumentError> {
        self.position += 1;
        self.inner.next().ok_or(ArgumentError::TypeMismatch {
            position: self.position,
            expected,
        })
    }

    pub fn identifier(&mut self) -> Result<String, ArgumentError> {
        match self.next("identifier")? {
            Arg::Id(id) => Ok(id),
            _ => Err(self.mismatch("identifier")),
        }
    }

    pub fn map(&mut self) -> Result<Map<String, Value>, ArgumentError> {
        match self.next("map")? {
            Arg::Map(map) => Ok(map),
            _ => Err(self.mismatch("map")),
        }
    }

    pub fn list(&mut self) -> Result<Vec<Value>, ArgumentError> {
        match self.next("list")? {
            Arg::List(list) => Ok(list),
            _ => Err(self.mismatch("list")),
        }
    }

    pub fn object(&mut self) -> Result<Value, ArgumentError> {
        match self.next("object")? {
            Arg::Object(value) => Ok(value),
            _ => Err(self.mismatch("object")),
        }
    }

    fn mismatch(&self, expected: &'static str) -> ArgumentError {
        ArgumentError::TypeMismatch {
            position: self.position,
            expected,
        }
    }
}

/// Coerce the raw tokens into the argument sequence `descriptor` declares.
pub fn coerce(
    descriptor: &OperationDescriptor,
    raw: &[String],
) -> Result<Vec<Arg>, DispatchError> {
    if raw.len() != descriptor.arity() {
        return Err(DispatchError::WrongArity {
            expected: descriptor.arity(),
            got: raw.len(),
        });
    }

    let mut out = Vec::with_capacity(raw.len());
    for (kind, token) in descriptor.params().iter().zip(raw) {
        let arg = match kind {
            ParamKind::Identifier => Arg::Id(token.clone()),
            ParamKind::StructuredMap => {
                let text = read_file(token)?;
                let map = serde_json::from_str::<Map<String, Value>>(&text)
                    .map_err(|e| ArgumentError::bad_json("map", Some(e)))?;
                Arg::Map(map)
            }
            ParamKind::StructuredList => {
                let text = read_file(token)?;
                let list = serde_json::from_str::<Vec<Value>>(&text)
                    .map_err(|e| ArgumentError::bad_json("list", Some(e)))?;
                Arg::List(list)
            }
            ParamKind::FileBackedObject => {
                let text = read_file(token)?;
                Arg::Object(descriptor.parse_object(&text)?)
            }
        };
        out.push(arg);
    }
    Ok(out)
}

fn read_file(path: &str) -> Result<String, ArgumentError> {
    if !Path::new(path).is_file() {
        return Err(ArgumentError::FileNotFound(path.to_string()));
    }
    std::fs::read_to_string(path).map_err(|_| ArgumentError::FileNotFound(path.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_json(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn descriptor(params: Vec<ParamKind>) -> OperationDescriptor {
        OperationDescriptor::for_tests("Test-op", params)
    }

    fn path_of(file: &tempfile::NamedTempFile) -> String {
        file.path().to_string_lossy().into_owned()
    }

    #[test]
    fn identifier_passes_through_unchanged() {
        let descriptor = descriptor(vec![ParamKind::Identifier]);
        let args = coerce(&descriptor, &["abc-123".to_string()]).unwrap();
        assert_eq!(args, vec![Arg::Id("abc-123".to_string())]);
    }

    #[test]
    fn map_file_round_trips() {
        let file = temp_json(r#"{"a":"b"}"#);
        let descriptor = descriptor(vec![ParamKind::StructuredMap]);
        let args = coerce(&descriptor, &[path_of(&file)]).unwrap();
        match &args[0] {
            Arg::Map(map) => assert_eq!(map.get("a").unwrap(), "b"),
            other => panic!("expected a map, got {other:?}"),
        }
    }

    #[test]
    fn list_file_round_trips() {
        let file = temp_json(r#"["x","y"]"#);
        let descriptor = descriptor(vec![ParamKind::StructuredList]);
        let args = coerce(&descriptor, &[path_of(&file)]).unwrap();
        match &args[0] {
            Arg::List(list) => assert_eq!(list.len(), 2),
            other => panic!("expected a list, got {other:?}"),
        }
    }

    #[test]
    fn malformed_map_is_bad_json() {
        let file = temp_json("not json at all");
        let descriptor = descriptor(vec![ParamKind::StructuredMap]);
        let err = coerce(&descriptor, &[path_of(&file)]).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Argument(ArgumentError::BadJson { ref kind, .. }) if kind == "map"
        ));
    }

    #[test]
    fn array_where_map_expected_is_bad_json() {
        let file = temp_json("[1,2,3]");
        let descriptor = descriptor(vec![ParamKind::StructuredMap]);
        let err = coerce(&descriptor, &[path_of(&file)]).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Argument(ArgumentError::BadJson { ref kind, .. }) if kind == "map"
        ));
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let descriptor = descriptor(vec![ParamKind::StructuredList]);
        let err = coerce(&descriptor, &["/no/such/file.json".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Argument(ArgumentError::FileNotFound(_))
        ));
    }

    #[test]
    fn token_count_mismatch_is_wrong_arity() {
        let descriptor = descriptor(vec![ParamKind::Identifier, ParamKind::Identifier]);
        let err = coerce(&descriptor, &["only-one".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::WrongArity {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn args_cursor_reports_shape_mismatch() {
        let mut args = Args::new(vec![Arg::Id("x".to_string())]);
        let err = args.map().unwrap_err();
        assert!(matches!(
            err,
            ArgumentError::TypeMismatch {
                position: 1,
                expected: "map"
            }
        ));
    }
}
