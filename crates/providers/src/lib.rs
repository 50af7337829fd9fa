//! Tool-provider implementations and resolution for Turnstone.
//!
//! All providers implement the `turnstone_core::ToolProvider` trait.
//! The registry holds externally supplied providers; the resolver picks the
//! construction path for each requested name — in-process for the reserved
//! built-in provider, registry lookup for everything else.

pub mod builtin;
pub mod registry;
pub mod resolver;

pub use builtin::{BUILTIN_PROVIDER_ID, BuiltinProvider};
pub use registry::ProviderRegistry;
pub use resolver::{ProviderResolver, ResolvedProvider};
