//! The abstract program model consumed by the analysis core.
//!
//! A program model adapter reads compiled artifacts and hands over a
//! [`ProgramModel`]: one [`MethodRecord`] per method in the analyzed program
//! (identity, statically resolvable call targets, modifier flags) plus the
//! declared type hierarchy as [`TypeEdge`]s. The core never interprets the
//! binary format itself; everything downstream is keyed by [`MethodId`].
//!
//! # Components
//!
//! - [`MethodId`]: structural (owner, name, descriptor) method identity
//! - [`MethodFlags`]: abstract / suspension-primitive modifier flags
//! - [`MethodRecord`]: a method and its call-edge list
//! - [`TypeEdge`]: one class-extends or interface-implements edge
//! - [`ProgramModel`]: the full per-run snapshot

mod method;
mod program;

pub use method::{MethodFlags, MethodId, MethodRecord};
pub use program::{ProgramModel, TypeEdge};
