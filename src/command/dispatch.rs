//! Command dispatcher
//!
//! Takes the raw command line, resolves the descriptor, coerces the
//! arguments, invokes the remote operation and hands back a printable
//! outcome. This is the single place where every error on that chain is
//! converted into a user-visible message; nothing below it prints.

use std::sync::Arc;

use super::coerce::coerce;
use super::registry::{CallResult, DispatchError, OperationDescriptor, ParamKind, Registry};
use crate::nfvo::NfvoClient;

/// What the binary should do with a finished dispatch.
#[derive(Debug)]
pub enum Outcome {
    /// Catalogue or per-command usage text; print and exit 0.
    Help(String),
    /// Unknown command; print the suggestion text and exit 1.
    Unknown(String),
    /// A completed remote call.
    Call(CallResult),
}

/// Dispatch one command line: first token is the command name, the rest are
/// raw positional parameters.
pub async fn dispatch(
    registry: &Registry,
    client: Arc<NfvoClient>,
    argv: &[String],
) -> Result<Outcome, DispatchError> {
    let Some((command, params)) = argv.split_first() else {
        return Ok(Outcome::Help(catalogue(registry)));
    };

    if command == "help" {
        return Ok(match params {
            [] => Outcome::Help(catalogue(registry)),
            [cmd] if registry.contains(cmd) => Outcome::Help(command_usage(registry, cmd)),
            [cmd, ..] => Outcome::Unknown(suggestions(registry, cmd)),
        });
    }

    if !registry.contains(command) {
        return Ok(Outcome::Unknown(suggestions(registry, command)));
    }

    if params.last().is_some_and(|p| p == "help") {
        return Ok(Outcome::Help(command_usage(registry, command)));
    }

    let descriptor = registry.resolve(command, params)?;
    let args = coerce(descriptor, params)?;
    tracing::debug!(
        "invoking {} with {} parameter(s)",
        descriptor.name(),
        params.len()
    );
    let result = descriptor.invoke(client, args).await?;
    Ok(Outcome::Call(result))
}

/// The full command catalogue, one line per command.
pub fn catalogue(registry: &Registry) -> String {
    let mut out = String::new();
    out.push_str("Available commands are\n");
    push_row(&mut out, "help", "print the usage");
    for name in registry.names() {
        if let Some(first) = registry.descriptors(name).and_then(|list| list.first()) {
            push_row(&mut out, name, first.help());
        }
    }
    out
}

/// Per-parameter usage for one command, covering every arity variant.
pub fn command_usage(registry: &Registry, command: &str) -> String {
    let Some(descriptors) = registry.descriptors(command) else {
        return suggestions(registry, command);
    };

    let mut out = String::new();
    for descriptor in descriptors {
        out.push_str(&format!("Usage: {}\n", descriptor.usage()));
        if !descriptor.params().is_empty() {
            out.push_str("Where:\n");
            for param in descriptor.params() {
                push_row(
                    &mut out,
                    &param.usage(descriptor.target()),
                    &describe(*param, descriptor),
                );
            }
        }
        out.push('\n');
    }
    if let Some(first) = descriptors.first() {
        out.push_str(&format!("{}\n", first.help()));
    }
    out
}

/// Suggestion text for an unknown leading token: the commands sharing its
/// prefix, or a plain not-found line.
pub fn suggestions(registry: &Registry, token: &str) -> String {
    let matches = registry.prefix_matches(token);
    if matches.is_empty() {
        return format!("{token}: command not found");
    }
    let mut out = String::new();
    for descriptor in matches {
        push_row(&mut out, descriptor.name(), descriptor.help());
    }
    out
}

fn push_row(out: &mut String, left: &str, right: &str) {
    out.push_str(&format!("{:<60}{}\n", format!("{left}:"), right));
}

fn describe(param: ParamKind, descriptor: &OperationDescriptor) -> String {
    match param {
        ParamKind::Identifier => "is an identifier".to_string(),
        ParamKind::StructuredMap => "is a path to a JSON file holding an object".to_string(),
        ParamKind::StructuredList => "is a path to a JSON file holding an array".to_string(),
        ParamKind::FileBackedObject => {
            format!("is a path to a JSON file holding a {}", descriptor.target())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::build_registry;

    #[test]
    fn catalogue_lists_help_and_commands() {
        let registry = build_registry();
        let text = catalogue(&registry);
        assert!(text.starts_with("Available commands are"));
        assert!(text.contains("help:"));
        assert!(text.contains("VimInstance-create:"));
        assert!(text.contains("NetworkServiceRecord-createVNFR:"));
    }

    #[test]
    fn usage_covers_every_arity_variant() {
        let registry = build_registry();
        let text = command_usage(&registry, "NetworkServiceRecord-deleteVNFCInstance");
        assert_eq!(text.matches("Usage:").count(), 3);
    }

    #[test]
    fn usage_names_the_remapped_target_type() {
        let registry = build_registry();
        let text = command_usage(&registry, "NetworkServiceRecord-createVNFR");
        assert!(text.contains("<VirtualNetworkFunctionRecord-file>"));
    }

    #[test]
    fn suggestions_list_prefix_matches() {
        let registry = build_registry();
        let text = suggestions(&registry, "VimInstance");
        assert!(text.contains("VimInstance-findAll:"));
    }

    #[test]
    fn suggestions_fall_back_to_not_found() {
        let registry = build_registry();
        assert_eq!(
            suggestions(&registry, "frobnicate"),
            "frobnicate: command not found"
        );
    }
}
