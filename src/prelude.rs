//! # suspscan Prelude
//!
//! This module provides a convenient prelude for the most commonly used types
//! from the library. Import it to get quick access to the model types, the
//! analysis structures, and error handling in one line.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all suspscan operations
pub use crate::Error;

/// The result type used throughout suspscan
pub use crate::Result;

// ================================================================================================
// Program Model
// ================================================================================================

/// Method identity, flags, and per-method records
pub use crate::model::{MethodFlags, MethodId, MethodRecord};

/// The per-run program snapshot and its hierarchy edges
pub use crate::model::{ProgramModel, TypeEdge};

// ================================================================================================
// Analysis
// ================================================================================================

/// Call graph construction and override resolution
pub use crate::analysis::callgraph::{CallGraph, CallGraphStats, OverrideResolver, ResolverStats};

/// Suspendable classification: engine, manual classifier, results
pub use crate::analysis::suspend::{
    scan_program, ManualSuspendableClassifier, ScanResults, SuspendScan,
};
