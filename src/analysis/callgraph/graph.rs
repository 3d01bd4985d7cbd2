//! Call graph construction and representation.
//!
//! This module provides the main [`CallGraph`] structure which represents the
//! inter-procedural call relationships of one analyzed program. The graph is
//! built in a single pass over a [`ProgramModel`] snapshot: every record
//! becomes a node, every call target becomes a forward edge, and a reverse
//! caller index is maintained alongside so that backward propagation never has
//! to re-scan the records.
//!
//! The reverse index deliberately keeps caller lists for callee identities
//! that have no record of their own (library or native methods referenced by
//! analyzed code). A manually seeded external method can then still make its
//! in-program callers suspendable.

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use tracing::debug;

use crate::{
    model::{MethodId, MethodRecord, ProgramModel},
    Error, Result,
};

/// Inter-procedural call graph over method identities.
///
/// The graph owns one [`MethodRecord`] per known method and answers three
/// questions: which methods does a method call, which methods call it, and is
/// a given identity part of the analyzed program at all. The last distinction
/// matters because the analysis is closed-world for user code but open-world
/// for dependencies - an unknown callee is simply not propagated through.
///
/// Once built from a model the graph is immutable for the rest of the run.
///
/// # Example
///
/// ```rust,ignore
/// let graph = CallGraph::build(&model)?;
///
/// let stats = graph.stats();
/// println!("Methods: {}, Edges: {}", stats.method_count, stats.edge_count);
///
/// for caller in graph.callers(&target) {
///     println!("called by {caller}");
/// }
/// ```
#[derive(Debug, Default)]
pub struct CallGraph {
    /// Method records keyed by identity. Forward edges live in the records.
    records: HashMap<MethodId, MethodRecord>,
    /// Reverse adjacency: callee identity to the methods that call it.
    /// Keys are not restricted to known methods.
    callers: HashMap<MethodId, Vec<MethodId>>,
    /// Number of distinct (caller, callee) pairs.
    edge_count: usize,
}

impl CallGraph {
    /// Creates an empty call graph.
    ///
    /// Useful for adapters that insert records incrementally via
    /// [`add_method`](Self::add_method) instead of materializing a full
    /// [`ProgramModel`] first.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a call graph from a program model snapshot.
    ///
    /// # Arguments
    ///
    /// * `model` - The fully enumerated program snapshot
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateMethod`] if the model reports the same
    /// method identity twice. The run aborts; a silently replaced record
    /// would make later propagation unsound.
    pub fn build(model: &ProgramModel) -> Result<Self> {
        let mut graph = Self::new();
        for record in model.methods() {
            graph.add_method(record.clone())?;
        }

        debug!(
            methods = graph.method_count(),
            edges = graph.edge_count(),
            "call graph built"
        );
        Ok(graph)
    }

    /// Inserts a method record into the graph.
    ///
    /// Multiple calls from the same caller to the same callee collapse into a
    /// single edge; the duplicate targets remain visible in the record itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateMethod`] if a record with the same identity
    /// was already inserted within this run.
    pub fn add_method(&mut self, record: MethodRecord) -> Result<()> {
        if self.records.contains_key(record.id()) {
            return Err(Error::DuplicateMethod(record.id().clone()));
        }

        let mut seen: HashSet<&MethodId> = HashSet::new();
        for target in record.calls() {
            if seen.insert(target) {
                self.callers
                    .entry(target.clone())
                    .or_default()
                    .push(record.id().clone());
                self.edge_count += 1;
            }
        }

        self.records.insert(record.id().clone(), record);
        Ok(())
    }

    /// Returns the call targets of a known method.
    ///
    /// The returned slice may contain duplicates if the method body invokes
    /// the same target more than once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMethod`] if the identity has no record in this
    /// graph. An empty slice and an error are deliberately distinct: the
    /// former means "known method with no calls", the latter "not part of the
    /// analyzed program".
    pub fn call_targets(&self, id: &MethodId) -> Result<&[MethodId]> {
        self.records
            .get(id)
            .map(MethodRecord::calls)
            .ok_or_else(|| Error::UnknownMethod(id.clone()))
    }

    /// Returns `true` if the identity has a record in this graph.
    #[must_use]
    pub fn is_known(&self, id: &MethodId) -> bool {
        self.records.contains_key(id)
    }

    /// Returns the record of a method, or `None` if it is not in this graph.
    #[must_use]
    pub fn record(&self, id: &MethodId) -> Option<&MethodRecord> {
        self.records.get(id)
    }

    /// Returns an iterator over all method records in the graph.
    pub fn records(&self) -> impl Iterator<Item = &MethodRecord> {
        self.records.values()
    }

    /// Returns every method that calls the given identity.
    ///
    /// Defined (possibly empty) for any identity, including ones without a
    /// record - callers of an external method are still in-program methods
    /// worth propagating to.
    #[must_use]
    pub fn callers(&self, id: &MethodId) -> &[MethodId] {
        self.callers.get(id).map_or(&[], Vec::as_slice)
    }

    /// Returns the number of methods in the graph.
    #[must_use]
    pub fn method_count(&self) -> usize {
        self.records.len()
    }

    /// Returns the number of distinct call edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns statistics about the call graph.
    #[must_use]
    pub fn stats(&self) -> CallGraphStats {
        let abstract_methods = self.records().filter(|r| r.is_abstract()).count();
        let suspension_sites = self.records().filter(|r| r.is_suspend_primitive()).count();
        let external_targets = self
            .callers
            .keys()
            .filter(|id| !self.records.contains_key(*id))
            .count();

        CallGraphStats {
            method_count: self.records.len(),
            edge_count: self.edge_count,
            abstract_methods,
            suspension_sites,
            external_targets,
        }
    }

    /// Generates a DOT format representation of this call graph.
    ///
    /// Methods that invoke the suspension primitive are highlighted in green,
    /// abstract/interface declarations in yellow. Edges to targets outside the
    /// analyzed program are omitted. The output can be rendered with Graphviz.
    ///
    /// # Arguments
    ///
    /// * `title` - Optional title for the graph
    #[must_use]
    pub fn to_dot(&self, title: Option<&str>) -> String {
        let mut dot = String::new();

        dot.push_str("digraph CallGraph {\n");
        if let Some(name) = title {
            let _ = writeln!(dot, "    label=\"{}\";", escape_dot(name));
        } else {
            dot.push_str("    label=\"Call Graph\";\n");
        }
        dot.push_str("    labelloc=t;\n");
        dot.push_str("    node [shape=box, fontname=\"Courier\", fontsize=10];\n");
        dot.push_str("    rankdir=TB;\n\n");

        let mut ids: Vec<&MethodId> = self.records.keys().collect();
        ids.sort();

        for id in &ids {
            let record = &self.records[*id];
            let style = if record.is_suspend_primitive() {
                ", style=filled, fillcolor=lightgreen"
            } else if record.is_abstract() {
                ", style=filled, fillcolor=lightyellow"
            } else {
                ""
            };
            let label = escape_dot(&id.to_string());
            let _ = writeln!(dot, "    \"{label}\" [label=\"{label}\"{style}];");
        }

        dot.push('\n');

        for id in &ids {
            let record = &self.records[*id];
            let mut seen: HashSet<&MethodId> = HashSet::new();
            for target in record.calls() {
                if self.records.contains_key(target) && seen.insert(target) {
                    let _ = writeln!(
                        dot,
                        "    \"{}\" -> \"{}\";",
                        escape_dot(&id.to_string()),
                        escape_dot(&target.to_string())
                    );
                }
            }
        }

        dot.push_str("}\n");
        dot
    }
}

/// Escapes a string for use inside a DOT quoted identifier or label.
fn escape_dot(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Statistics about a call graph.
#[derive(Debug, Clone, Default)]
pub struct CallGraphStats {
    /// Number of methods (records) in the graph.
    pub method_count: usize,
    /// Number of distinct call edges between methods.
    pub edge_count: usize,
    /// Number of abstract/interface declarations without a body.
    pub abstract_methods: usize,
    /// Number of methods that directly invoke the suspension primitive.
    pub suspension_sites: usize,
    /// Number of call targets with no record (library/native references).
    pub external_targets: usize,
}
