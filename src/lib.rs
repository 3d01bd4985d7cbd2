// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # suspscan
//!
//! Whole-program classification of suspendable methods for cooperative
//! scheduling. Given a normalized snapshot of a compiled program, `suspscan`
//! decides for every method whether it can transfer control to a scheduler
//! mid-execution, without requiring per-method annotations. The result drives
//! a downstream instrumentation pass that rewrites suspendable bodies to
//! support pausing and resuming.
//!
//! A method is suspendable if it directly invokes the designated suspension
//! primitive, transitively calls another suspendable method, or implements an
//! abstract/interface declaration that some concrete implementation makes
//! suspendable. The engine builds a whole-program call graph, precomputes the
//! override relation from declared inheritance edges, and runs a backward
//! worklist fixed point over both.
//!
//! ## Quick Start
//!
//! ```rust
//! use suspscan::{scan_program, MethodFlags, MethodId, MethodRecord, ProgramModel, TypeEdge};
//!
//! // IA declares foo(I)V; B implements it by parking the scheduler;
//! // A calls through the interface type.
//! let park = MethodId::new("co/acme/Sched", "park", "()V");
//! let ia_foo = MethodId::new("co/acme/IA", "foo", "(I)V");
//! let b_foo = MethodId::new("co/acme/B", "foo", "(I)V");
//! let a_foo = MethodId::new("co/acme/A", "foo", "(Lco/acme/IA;)V");
//!
//! let mut model = ProgramModel::new();
//! model.push_method(MethodRecord::new(park, Vec::new(), MethodFlags::SUSPEND_PRIMITIVE));
//! model.push_method(MethodRecord::new(ia_foo.clone(), Vec::new(), MethodFlags::ABSTRACT));
//! model.push_method(MethodRecord::new(
//!     b_foo.clone(),
//!     vec![MethodId::new("co/acme/Sched", "park", "()V")],
//!     MethodFlags::empty(),
//! ));
//! model.push_method(MethodRecord::new(a_foo.clone(), vec![ia_foo.clone()], MethodFlags::empty()));
//! model.push_type_edge(TypeEdge::new("co/acme/B", "co/acme/IA"));
//!
//! let results = scan_program(&model, None)?;
//! assert!(results.contains_suspendable(&b_foo));
//! assert!(results.contains_suspendable(&a_foo));
//! assert!(results.contains_suspendable_super(&ia_foo));
//! # Ok::<(), suspscan::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`model`] - the adapter handoff: method records and type hierarchy edges
//! - [`analysis::callgraph`] - call graph construction and override resolution
//! - [`analysis::suspend`] - the propagation engine, manual classifier, and
//!   result snapshot
//! - [`prelude`] - convenient re-exports of the common types
//! - [`Error`] and [`Result`] - error handling
//!
//! The crate consumes an abstract [`ProgramModel`], not a binary format: a
//! program model adapter enumerates every method, its statically resolvable
//! call targets, its modifier flags, and the declared inheritance edges. How
//! those are extracted from compiled artifacts is out of scope here.
//!
//! ## Approximations
//!
//! The analysis is static and closed-world for user code: dynamically
//! generated or reflection-invoked code is invisible to it, and call targets
//! without a record (library or native methods) are conservatively treated as
//! non-suspendable unless a [`ManualSuspendableClassifier`] entry says
//! otherwise. Those approximation decisions are not errors; malformed input
//! is, and it aborts the run rather than producing a partial classification.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result):
//!
//! ```rust
//! use suspscan::{Error, ManualSuspendableClassifier};
//!
//! match ManualSuspendableClassifier::from_path("META-INF/suspendables") {
//!     Ok(classifier) => println!("{} entries", classifier.len()),
//!     Err(Error::ResourceNotFound { path, .. }) => println!("missing: {path}"),
//!     Err(Error::Parse { resource, line, message }) => {
//!         println!("bad entry {resource}:{line}: {message}");
//!     }
//!     Err(e) => println!("error: {e}"),
//! }
//! ```

pub(crate) mod error;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use suspscan::prelude::*;
///
/// let model = ProgramModel::new();
/// let results = scan_program(&model, None)?;
/// assert_eq!(results.suspendable_count(), 0);
/// # Ok::<(), suspscan::Error>(())
/// ```
pub mod prelude;

/// Whole-program analysis: call graph, override resolution, and the
/// suspendable propagation engine.
pub mod analysis;

/// The abstract program model handed over by a compiled-artifact adapter.
pub mod model;

/// `suspscan` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is
/// always [`Error`], used consistently for all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `suspscan` Error type
///
/// The main error type for all operations in this crate. Every variant aborts
/// the run it occurs in; see [`error module docs`](Error) for the taxonomy.
pub use error::Error;

pub use analysis::{
    scan_program, CallGraph, CallGraphStats, ManualSuspendableClassifier, OverrideResolver,
    ResolverStats, ScanResults, SuspendScan,
};
pub use model::{MethodFlags, MethodId, MethodRecord, ProgramModel, TypeEdge};
