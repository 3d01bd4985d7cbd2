//! Override resolution over the declared type hierarchy.
//!
//! This module links supertype method declarations to the subtype methods
//! that override or implement them. The resolver precomputes the hierarchy
//! from the program model's [`TypeEdge`]s and indexes every declared method
//! per owner type, enabling efficient lookup during propagation:
//!
//! - Direct call resolution needs nothing from here
//! - A call through an interface or abstract type is suspendable when *any*
//!   implementation of that declaration is, so the propagation engine fans
//!   out over the override relation computed here
//!
//! Matching follows the binary dispatch contract: exact name+descriptor
//! equality only. A covariant or differently erased signature is a different
//! method as far as dispatch is concerned; adapters that want to fold
//! synthetic bridge methods must normalize them before handing over the model.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::model::{MethodId, ProgramModel};

/// Resolves override relations using the declared type hierarchy.
///
/// The resolver precomputes direct sub/supertype adjacency and a per-type
/// index of declared (name, descriptor) pairs from the model. Transitive
/// queries run a worklist closure over the precomputed adjacency, so diamond
/// interface implementation and multi-level inheritance need no special
/// handling.
#[derive(Debug, Default)]
pub struct OverrideResolver {
    /// Direct supertypes per type (class extends + interface implements).
    supertypes: HashMap<Arc<str>, Vec<Arc<str>>>,
    /// Inverse adjacency: direct subtypes per type.
    subtypes: HashMap<Arc<str>, Vec<Arc<str>>>,
    /// Methods declared per owner type, as reported by the model.
    declarations: HashMap<Arc<str>, Vec<MethodId>>,
}

impl OverrideResolver {
    /// Builds an override resolver from a program model snapshot.
    ///
    /// # Arguments
    ///
    /// * `model` - The fully enumerated program snapshot
    #[must_use]
    pub fn new(model: &ProgramModel) -> Self {
        let mut resolver = Self::default();

        for edge in model.type_edges() {
            let sub: Arc<str> = Arc::from(edge.subtype());
            let sup: Arc<str> = Arc::from(edge.supertype());
            resolver
                .supertypes
                .entry(sub.clone())
                .or_default()
                .push(sup.clone());
            resolver.subtypes.entry(sup).or_default().push(sub);
        }

        for record in model.methods() {
            resolver
                .declarations
                .entry(Arc::from(record.id().owner()))
                .or_default()
                .push(record.id().clone());
        }

        debug!(
            types = resolver.declarations.len(),
            hierarchy_edges = model.type_edge_count(),
            "override resolver built"
        );
        resolver
    }

    /// Returns all declared supertypes of a type, including the type itself.
    ///
    /// This is the reflexive-transitive closure of the declared inheritance
    /// relation, covering multi-level inheritance and diamond interface
    /// implementation.
    #[must_use]
    pub fn declared_supertypes(&self, type_name: &str) -> HashSet<Arc<str>> {
        closure(&self.supertypes, type_name)
    }

    /// Returns all subtypes of a type, including the type itself.
    ///
    /// Reflexive-transitive closure of the inverse inheritance relation,
    /// restricted to types reachable in the analyzed program.
    #[must_use]
    pub fn subtypes_of(&self, type_name: &str) -> HashSet<Arc<str>> {
        closure(&self.subtypes, type_name)
    }

    /// Returns every method that overrides or implements the given declaration.
    ///
    /// Searches all strict transitive subtypes of the declaration's owner for
    /// a declared method with exactly the same name and descriptor. The
    /// method itself is never part of its own override set.
    ///
    /// A declaration with no implementors in the analyzed program yields an
    /// empty set.
    #[must_use]
    pub fn overrides_of(&self, method: &MethodId) -> Vec<MethodId> {
        self.matching_declarations(method, &self.subtypes_of(method.owner()))
    }

    /// Returns every supertype declaration that the given method overrides or
    /// implements.
    ///
    /// The inverse of [`overrides_of`](Self::overrides_of): declarations with
    /// the same name and descriptor on strict transitive supertypes of the
    /// method's owner. This is the edge set the propagation engine fans out
    /// over when a concrete method turns out to be suspendable.
    #[must_use]
    pub fn super_declarations(&self, method: &MethodId) -> Vec<MethodId> {
        self.matching_declarations(method, &self.declared_supertypes(method.owner()))
    }

    /// Collects declarations matching `method` by name+descriptor on the given
    /// types, excluding the method's own owner.
    fn matching_declarations(&self, method: &MethodId, types: &HashSet<Arc<str>>) -> Vec<MethodId> {
        let mut result = Vec::new();
        for type_name in types {
            if **type_name == *method.owner() {
                continue;
            }
            let Some(declared) = self.declarations.get(type_name) else {
                continue;
            };
            for candidate in declared {
                if candidate.name() == method.name()
                    && candidate.descriptor() == method.descriptor()
                {
                    result.push(method.with_owner(type_name.clone()));
                }
            }
        }
        result
    }

    /// Returns statistics about the resolver state.
    #[must_use]
    pub fn stats(&self) -> ResolverStats {
        let hierarchy_edges = self.supertypes.values().map(Vec::len).sum();
        let declared_methods = self.declarations.values().map(Vec::len).sum();
        let max_direct_subtypes = self.subtypes.values().map(Vec::len).max().unwrap_or(0);

        ResolverStats {
            total_types: self.declarations.len(),
            hierarchy_edges,
            declared_methods,
            max_direct_subtypes,
        }
    }
}

/// Reflexive-transitive closure of an adjacency relation, via worklist.
fn closure(adjacency: &HashMap<Arc<str>, Vec<Arc<str>>>, start: &str) -> HashSet<Arc<str>> {
    let mut visited: HashSet<Arc<str>> = HashSet::new();
    let mut worklist: Vec<Arc<str>> = vec![Arc::from(start)];

    while let Some(current) = worklist.pop() {
        if !visited.insert(current.clone()) {
            continue;
        }
        if let Some(nexts) = adjacency.get(&current) {
            for next in nexts {
                if !visited.contains(next) {
                    worklist.push(next.clone());
                }
            }
        }
    }

    visited
}

/// Statistics about the override resolver state.
#[derive(Debug, Clone, Default)]
pub struct ResolverStats {
    /// Number of types with at least one declared method.
    pub total_types: usize,
    /// Number of declared inheritance edges indexed.
    pub hierarchy_edges: usize,
    /// Number of method declarations indexed across all types.
    pub declared_methods: usize,
    /// Largest number of direct subtypes of any single type.
    pub max_direct_subtypes: usize,
}
