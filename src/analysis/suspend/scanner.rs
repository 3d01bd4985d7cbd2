//! The suspendable propagation engine.
//!
//! Performs backward reachability on the call graph with an override-aware
//! worklist fixed point. A method is suspendable if it directly invokes the
//! suspension primitive, transitively calls a suspendable method, or is
//! reached through a supertype declaration that has a suspendable
//! implementation. The scan is a pure function of its inputs: all mutable
//! state lives inside one [`SuspendScan::run`] call and is discarded after
//! the result snapshot is taken.

use std::collections::HashSet;

use tracing::debug;

use crate::{
    analysis::callgraph::{CallGraph, OverrideResolver},
    analysis::suspend::{ManualSuspendableClassifier, ScanResults},
    model::{MethodId, MethodRecord, ProgramModel},
    Result,
};

/// Classifies every method of a program as suspendable or not.
///
/// Borrows a built [`CallGraph`] and [`OverrideResolver`]; an optional
/// [`ManualSuspendableClassifier`] contributes extra seeds for methods the
/// automatic scan cannot see (native or externally compiled code).
///
/// # Algorithm
///
/// 1. Seed the suspendable set with every method whose record carries the
///    suspension-primitive flag, plus every manual classifier entry.
/// 2. Pop a method from the worklist; every caller not yet in the set is
///    inserted and pushed.
/// 3. When the popped method is concrete, fan out over its supertype
///    declarations: an abstract declaration is recorded as a suspendable
///    super, and in all cases the declaration's callers are treated exactly
///    like callers of a suspendable method. This makes a call through an
///    interface type suspendable as soon as any implementation is.
/// 4. The sets grow monotonically and are bounded by the program, so the
///    loop terminates on arbitrary cycles, including cycles through
///    override edges.
///
/// Worklist order affects nothing but diagnostics; the propagation is
/// confluent.
///
/// # Example
///
/// ```rust,ignore
/// let graph = CallGraph::build(&model)?;
/// let resolver = OverrideResolver::new(&model);
///
/// let results = SuspendScan::new(&graph, &resolver)
///     .with_classifier(&manual)
///     .run();
/// ```
#[derive(Debug)]
pub struct SuspendScan<'a> {
    graph: &'a CallGraph,
    resolver: &'a OverrideResolver,
    classifier: Option<&'a ManualSuspendableClassifier>,
}

impl<'a> SuspendScan<'a> {
    /// Creates a scan over a built call graph and override resolver.
    #[must_use]
    pub fn new(graph: &'a CallGraph, resolver: &'a OverrideResolver) -> Self {
        SuspendScan {
            graph,
            resolver,
            classifier: None,
        }
    }

    /// Merges a manual classifier's entries into the seed set.
    ///
    /// Manual entries may name methods the graph has no record of; their
    /// in-program callers are still propagated to through the reverse index.
    #[must_use]
    pub fn with_classifier(mut self, classifier: &'a ManualSuspendableClassifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Runs the fixed-point propagation and returns an immutable snapshot of
    /// the suspendable and suspendable-super sets.
    ///
    /// Unknown call targets never propagate: a method outside the analyzed
    /// program is conservatively non-suspendable unless a manual entry says
    /// otherwise.
    #[must_use]
    pub fn run(&self) -> ScanResults {
        let mut suspendables: HashSet<MethodId> = HashSet::new();
        let mut supers: HashSet<MethodId> = HashSet::new();
        let mut worklist: Vec<MethodId> = Vec::new();

        for record in self.graph.records() {
            if record.is_suspend_primitive() && suspendables.insert(record.id().clone()) {
                worklist.push(record.id().clone());
            }
        }
        let primitive_seeds = worklist.len();

        if let Some(classifier) = self.classifier {
            for id in classifier.suspendables() {
                if suspendables.insert(id.clone()) {
                    worklist.push(id.clone());
                }
            }
            // Manually declared supers behave as if an implementation had
            // just become suspendable: their callers join the worklist.
            for id in classifier.super_suspendables() {
                supers.insert(id.clone());
                for caller in self.graph.callers(id) {
                    if suspendables.insert(caller.clone()) {
                        worklist.push(caller.clone());
                    }
                }
            }
        }
        let seed_count = worklist.len();

        while let Some(method) = worklist.pop() {
            // Monotonicity: everything ever pushed stays in the set.
            debug_assert!(suspendables.contains(&method));

            for caller in self.graph.callers(&method) {
                if suspendables.insert(caller.clone()) {
                    worklist.push(caller.clone());
                }
            }

            // Override fan-out applies to concrete methods only; an abstract
            // declaration that became suspendable already is one.
            if self
                .graph
                .record(&method)
                .is_some_and(MethodRecord::is_abstract)
            {
                continue;
            }

            for declaration in self.resolver.super_declarations(&method) {
                if self
                    .graph
                    .record(&declaration)
                    .is_some_and(MethodRecord::is_abstract)
                {
                    supers.insert(declaration.clone());
                }
                // A call through the supertype may dispatch here, so the
                // declaration's callers propagate like callers of `method`.
                for caller in self.graph.callers(&declaration) {
                    if suspendables.insert(caller.clone()) {
                        worklist.push(caller.clone());
                    }
                }
            }
        }

        debug!(
            primitive_seeds,
            seeds = seed_count,
            suspendables = suspendables.len(),
            suspendable_supers = supers.len(),
            "suspendable scan finished"
        );

        ScanResults::new(suspendables, supers)
    }
}

/// Builds the call graph and override resolver from a model and runs a scan
/// in one call.
///
/// # Arguments
///
/// * `model` - The fully enumerated program snapshot
/// * `classifier` - Optional manual seed source
///
/// # Errors
///
/// Returns [`Error::DuplicateMethod`](crate::Error::DuplicateMethod) if the
/// model reports the same method twice.
pub fn scan_program(
    model: &ProgramModel,
    classifier: Option<&ManualSuspendableClassifier>,
) -> Result<ScanResults> {
    let graph = CallGraph::build(model)?;
    let resolver = OverrideResolver::new(model);

    let mut scan = SuspendScan::new(&graph, &resolver);
    if let Some(classifier) = classifier {
        scan = scan.with_classifier(classifier);
    }
    Ok(scan.run())
}
