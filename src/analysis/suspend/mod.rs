//! Suspendable-method classification.
//!
//! This module hosts the algorithmic center of the crate: the worklist
//! fixed-point engine that propagates the suspendable property backward
//! through call edges and override relations, the file-driven manual
//! classifier used to seed it, and the immutable result snapshot consumed by
//! a downstream instrumentation pass.
//!
//! # Components
//!
//! - [`SuspendScan`]: the override-aware backward propagation engine
//! - [`ManualSuspendableClassifier`]: flat allow-list of user-declared entries
//! - [`ScanResults`]: the two immutable output sets
//! - [`scan_program`]: build-and-scan convenience entry point
//!
//! # Example
//!
//! ```rust
//! use suspscan::{scan_program, MethodFlags, MethodId, MethodRecord, ProgramModel};
//!
//! let park = MethodId::new("co/acme/Sched", "park", "()V");
//! let step = MethodId::new("co/acme/Worker", "step", "()V");
//!
//! let mut model = ProgramModel::new();
//! model.push_method(MethodRecord::new(
//!     park.clone(),
//!     Vec::new(),
//!     MethodFlags::SUSPEND_PRIMITIVE,
//! ));
//! model.push_method(MethodRecord::new(
//!     step.clone(),
//!     vec![park.clone()],
//!     MethodFlags::empty(),
//! ));
//!
//! let results = scan_program(&model, None)?;
//! assert!(results.contains_suspendable(&park));
//! assert!(results.contains_suspendable(&step));
//! # Ok::<(), suspscan::Error>(())
//! ```

mod classifier;
mod results;
mod scanner;

pub use classifier::ManualSuspendableClassifier;
pub use results::ScanResults;
pub use scanner::{scan_program, SuspendScan};
