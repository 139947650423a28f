//! Command descriptor registry
//!
//! A statically built table mapping command names of the form
//! `{ResourcePrefix}-{operation}` to one or more callable descriptors.
//! Several operations may share a name and differ in arity; arity is the
//! disambiguation key at resolution time. Built once at startup from the
//! declarative capability listing in [`super::commands`], never mutated
//! afterward.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::Value;

use super::coerce::{Arg, ArgumentError};
use crate::catalogue::ResourceKind;
use crate::nfvo::{ApiError, NfvoClient};

/// Shape of one positional command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Raw string, typically a resource id.
    Identifier,
    /// Path to a JSON file parsed into a generic string-keyed map.
    StructuredMap,
    /// Path to a JSON file parsed into a generic ordered list.
    StructuredList,
    /// Path to a JSON file parsed into the descriptor's target type.
    FileBackedObject,
}

impl ParamKind {
    /// Placeholder shown in usage lines.
    pub fn usage(self, target: &str) -> String {
        match self {
            ParamKind::Identifier => "<id>".to_string(),
            ParamKind::StructuredMap => "<json-map-file>".to_string(),
            ParamKind::StructuredList => "<json-list-file>".to_string(),
            ParamKind::FileBackedObject => format!("<{target}-file>"),
        }
    }
}

/// Outcome of a dispatched operation.
#[derive(Debug, Clone, PartialEq)]
pub enum CallResult {
    /// A single deserialized resource.
    Item(Value),
    /// A sequence of deserialized resources.
    List(Vec<Value>),
    /// Success without a payload (delete-like operations).
    NoContent,
}

/// Failures of command resolution and dispatch.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("missing or invalid parameter: {0}")]
    MissingOrInvalidParameter(String),

    #[error("wrong number of parameters: expected {expected}, got {got}")]
    WrongArity { expected: usize, got: usize },

    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// The invocation half of a descriptor: takes the shared client and the
/// coerced arguments, performs the remote call, yields a [`CallResult`].
pub type Handler = Arc<
    dyn Fn(Arc<NfvoClient>, Vec<Arg>) -> BoxFuture<'static, Result<CallResult, DispatchError>>
        + Send
        + Sync,
>;

/// Parses a file-backed object parameter into the descriptor's target type.
/// Captured at registration time so no type inspection happens per call.
pub type ObjectParser = Arc<dyn Fn(&str) -> Result<Value, ArgumentError> + Send + Sync>;

/// Validating parser for `T`: the file must hold JSON that deserializes as
/// `T`; the raw value is forwarded so unknown fields survive untouched.
pub fn object_parser<T: ResourceKind>() -> ObjectParser {
    Arc::new(|raw: &str| {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| ArgumentError::bad_json(T::NAME, Some(e)))?;
        T::deserialize(&value).map_err(|e| ArgumentError::bad_json(T::NAME, Some(e)))?;
        Ok(value)
    })
}

/// Registered metadata and invocation handle for one remote operation.
#[derive(Clone)]
pub struct OperationDescriptor {
    name: String,
    help: String,
    params: Vec<ParamKind>,
    /// Target resource type name. Differs from the owning resource's
    /// nominal type when the operation yields a dependent resource.
    target: &'static str,
    object_parser: Option<ObjectParser>,
    handler: Handler,
}

impl std::fmt::Debug for OperationDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationDescriptor")
            .field("name", &self.name)
            .field("help", &self.help)
            .field("params", &self.params)
            .field("target", &self.target)
            .field("object_parser", &self.object_parser.is_some())
            .finish_non_exhaustive()
    }
}

impl OperationDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn params(&self) -> &[ParamKind] {
        &self.params
    }

    pub fn target(&self) -> &'static str {
        self.target
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Parse a file-backed object argument's raw contents.
    pub fn parse_object(&self, raw: &str) -> Result<Value, ArgumentError> {
        match &self.object_parser {
            Some(parser) => parser(raw),
            // Descriptors without a registered parser only validate syntax.
            None => serde_json::from_str(raw)
                .map_err(|e| ArgumentError::bad_json(self.target, Some(e))),
        }
    }

    /// Run the operation with already-coerced arguments.
    pub async fn invoke(
        &self,
        client: Arc<NfvoClient>,
        args: Vec<Arg>,
    ) -> Result<CallResult, DispatchError> {
        (self.handler)(client, args).await
    }

    /// Single usage line: `name <id> <VimInstance-file> ...`.
    pub fn usage(&self) -> String {
        let mut line = self.name.clone();
        for param in &self.params {
            line.push(' ');
            line.push_str(&param.usage(self.target));
        }
        line
    }

    #[cfg(test)]
    pub(crate) fn for_tests(name: &str, params: Vec<ParamKind>) -> Self {
        let handler: Handler = Arc::new(|_client: Arc<NfvoClient>, _args: Vec<Arg>| {
            let fut: BoxFuture<'static, Result<CallResult, DispatchError>> =
                Box::pin(async { Ok(CallResult::NoContent) });
            fut
        });
        Self {
            name: name.to_string(),
            help: String::new(),
            params,
            target: "Test",
            object_parser: None,
            handler,
        }
    }
}

/// Immutable command table plus the registration order used for the help
/// catalogue.
pub struct Registry {
    commands: HashMap<String, Vec<OperationDescriptor>>,
    order: Vec<String>,
}

impl Registry {
    pub fn contains(&self, command: &str) -> bool {
        self.commands.contains_key(command)
    }

    /// All descriptors registered under `command`, in registration order.
    pub fn descriptors(&self, command: &str) -> Option<&[OperationDescriptor]> {
        self.commands.get(command).map(|list| list.as_slice())
    }

    /// Command names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|name| name.as_str())
    }

    /// Names starting with `prefix`, for the unknown-command suggestions.
    pub fn prefix_matches(&self, prefix: &str) -> Vec<&OperationDescriptor> {
        self.order
            .iter()
            .filter(|name| name.starts_with(prefix))
            .filter_map(|name| self.commands.get(name).and_then(|list| list.first()))
            .collect()
    }

    /// Select the descriptor for `command` matching the raw token count.
    ///
    /// Candidates whose arity differs are skipped; a candidate declaring a
    /// file-backed parameter whose token does not name an existing file is
    /// treated as non-matching and scanning continues. Nothing left over
    /// means the parameters were missing or invalid.
    pub fn resolve(
        &self,
        command: &str,
        raw_args: &[String],
    ) -> Result<&OperationDescriptor, DispatchError> {
        let candidates = self
            .commands
            .get(command)
            .filter(|list| !list.is_empty())
            .ok_or_else(|| DispatchError::CommandNotFound(command.to_string()))?;

        for descriptor in candidates {
            if descriptor.arity() != raw_args.len() {
                continue;
            }
            let files_ok = descriptor
                .params
                .iter()
                .zip(raw_args)
                .all(|(kind, token)| match kind {
                    ParamKind::FileBackedObject => Path::new(token).is_file(),
                    _ => true,
                });
            if files_ok {
                return Ok(descriptor);
            }
        }

        Err(DispatchError::MissingOrInvalidParameter(format!(
            "no variant of {} accepts {} parameter(s) as given (file parameters must name existing files)",
            command,
            raw_args.len()
        )))
    }
}

/// Builds the registry from declarative listings. Registering a (name,
/// arity) pair that already exists replaces the earlier entry, so specific
/// agents override the inherited generic operations.
pub struct RegistryBuilder {
    commands: HashMap<String, Vec<OperationDescriptor>>,
    order: Vec<String>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register one operation under `{prefix}-{operation}`.
    #[allow(clippy::too_many_arguments)]
    pub fn operation(
        &mut self,
        prefix: &str,
        operation: &str,
        help: impl Into<String>,
        params: Vec<ParamKind>,
        target: &'static str,
        object_parser: Option<ObjectParser>,
        handler: Handler,
    ) -> &mut Self {
        let name = format!("{prefix}-{operation}");
        let descriptor = OperationDescriptor {
            name: name.clone(),
            help: help.into(),
            params,
            target,
            object_parser,
            handler,
        };

        let list = self.commands.entry(name.clone()).or_default();
        if list.is_empty() {
            self.order.push(name);
        }
        match list
            .iter_mut()
            .find(|existing| existing.arity() == descriptor.arity())
        {
            Some(existing) => *existing = descriptor,
            None => list.push(descriptor),
        }
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            commands: self.commands,
            order: self.order,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
