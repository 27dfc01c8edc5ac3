//! Envmerge: Environment Resolution and Typed Configuration
//!
//! Resolves the active deployment environment (explicit override reconciled
//! with CIDR-based host inference) and assembles a single frozen, typed
//! configuration mapping from environment variables under a declarative
//! rule set.

pub mod cli;
pub mod error;
pub mod flags;
pub mod loader;
pub mod logging;
pub mod merge;
pub mod resolve;
pub mod rules;
pub mod types;

pub use error::{MergeError, ResolveError, SetupError};
pub use flags::FlagSet;
pub use loader::Loader;
pub use merge::Settings;
pub use resolve::NetworkRange;
pub use rules::{RuleSet, ValueType, VariableRule};
pub use types::{EnvironmentName, Value};
