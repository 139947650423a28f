//! Command layer
//!
//! Maps textual commands to typed remote operations.
//!
//! # Module Structure
//!
//! - [`registry`] - Descriptor table with arity-based overload resolution
//! - [`commands`] - The declarative capability listing built at startup
//! - [`coerce`] - Raw token to typed argument conversion
//! - [`dispatch`] - Command-line entry: resolve, coerce, invoke, report
//! - [`output`] - Success rendering

pub mod coerce;
pub mod commands;
pub mod dispatch;
pub mod output;
pub mod registry;

pub use coerce::{Arg, ArgumentError};
pub use commands::build_registry;
pub use dispatch::{dispatch, Outcome};
pub use registry::{CallResult, DispatchError, ParamKind, Registry};
