//! The program model handed over by a compiled-artifact adapter.

use std::sync::Arc;

use crate::model::MethodRecord;

/// A normalized snapshot of one analyzed program.
///
/// This is the handoff format between a program model adapter (the component
/// that reads compiled artifacts, out of scope for this crate) and the
/// analysis core: a sequence of [`MethodRecord`]s plus a sequence of
/// [`TypeEdge`]s. The core treats the model as ground truth and never goes
/// back to the artifacts.
///
/// A model is built fresh per analysis run and is not updated once the run's
/// [`CallGraph`](crate::CallGraph) and
/// [`OverrideResolver`](crate::OverrideResolver) have been constructed from it.
///
/// # Example
///
/// ```rust
/// use suspscan::{MethodFlags, MethodId, MethodRecord, ProgramModel, TypeEdge};
///
/// let mut model = ProgramModel::new();
/// model.push_method(MethodRecord::new(
///     MethodId::new("co/acme/Sched", "park", "()V"),
///     Vec::new(),
///     MethodFlags::SUSPEND_PRIMITIVE,
/// ));
/// model.push_type_edge(TypeEdge::new("co/acme/B", "co/acme/IA"));
/// assert_eq!(model.method_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ProgramModel {
    methods: Vec<MethodRecord>,
    type_edges: Vec<TypeEdge>,
}

impl ProgramModel {
    /// Creates an empty program model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a method record to the model.
    ///
    /// The adapter must report each method exactly once; duplicates are
    /// detected later, when a call graph is built from the model.
    pub fn push_method(&mut self, record: MethodRecord) {
        self.methods.push(record);
    }

    /// Appends a declared inheritance edge to the model.
    pub fn push_type_edge(&mut self, edge: TypeEdge) {
        self.type_edges.push(edge);
    }

    /// Returns every method record in the model.
    #[must_use]
    pub fn methods(&self) -> &[MethodRecord] {
        &self.methods
    }

    /// Returns every declared inheritance edge in the model.
    #[must_use]
    pub fn type_edges(&self) -> &[TypeEdge] {
        &self.type_edges
    }

    /// Returns the number of methods in the model.
    #[must_use]
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    /// Returns the number of declared inheritance edges in the model.
    #[must_use]
    pub fn type_edge_count(&self) -> usize {
        self.type_edges.len()
    }
}

/// A declared inheritance relationship between two types.
///
/// Covers both class-extends and interface-implements edges; the override
/// resolver does not distinguish the two, because binary dispatch treats them
/// identically for name+descriptor matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeEdge {
    subtype: Arc<str>,
    supertype: Arc<str>,
}

impl TypeEdge {
    /// Creates a new inheritance edge from `subtype` to `supertype`.
    #[must_use]
    pub fn new(subtype: impl Into<Arc<str>>, supertype: impl Into<Arc<str>>) -> Self {
        TypeEdge {
            subtype: subtype.into(),
            supertype: supertype.into(),
        }
    }

    /// Returns the subtype (the extending class or implementing type).
    #[must_use]
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Returns the supertype (the extended class or implemented interface).
    #[must_use]
    pub fn supertype(&self) -> &str {
        &self.supertype
    }
}
