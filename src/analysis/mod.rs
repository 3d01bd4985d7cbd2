//! Whole-program analysis over the abstract program model.
//!
//! Two submodules cooperate to produce the classification:
//!
//! - [`callgraph`]: builds the immutable [`CallGraph`] and the
//!   [`OverrideResolver`] from a [`ProgramModel`](crate::ProgramModel)
//!   snapshot
//! - [`suspend`]: runs the backward fixed-point propagation and exposes the
//!   manual classifier and result snapshot
//!
//! Everything here is a single-threaded batch computation: one run owns its
//! graph, resolver, and result sets, and nothing persists across runs.

pub mod callgraph;
pub mod suspend;

pub use callgraph::{CallGraph, CallGraphStats, OverrideResolver, ResolverStats};
pub use suspend::{scan_program, ManualSuspendableClassifier, ScanResults, SuspendScan};
