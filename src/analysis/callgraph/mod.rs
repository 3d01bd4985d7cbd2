//! Call graph construction and override resolution.
//!
//! This module builds the two structures the propagation engine runs on: the
//! whole-program [`CallGraph`] (forward call edges plus a reverse caller
//! index) and the [`OverrideResolver`] (the precomputed override relation
//! derived from declared inheritance edges).
//!
//! # Architecture
//!
//! Both structures are built in a single pass over an immutable
//! [`ProgramModel`](crate::ProgramModel) snapshot and are never mutated
//! afterwards within a run. Polymorphic dispatch is represented as an
//! explicit, enumerable override relation rather than resolved per call
//! site - a call through a supertype declaration is linked to its concrete
//! implementations by exact name+descriptor matching over the transitive
//! subtype closure.
//!
//! # Components
//!
//! - [`CallGraph`]: method records, forward call edges, reverse caller index
//! - [`CallGraphStats`]: aggregate metrics about a built graph
//! - [`OverrideResolver`]: sub/supertype closures and override lookup
//! - [`ResolverStats`]: aggregate metrics about the resolver state

mod graph;
mod resolution;

pub use graph::{CallGraph, CallGraphStats};
pub use resolution::{OverrideResolver, ResolverStats};
