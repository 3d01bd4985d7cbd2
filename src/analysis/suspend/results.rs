//! Immutable scan result snapshots.

use std::collections::HashSet;
use std::io::Write;

use crate::{model::MethodId, Result};

/// The read-only outcome of one suspendable scan.
///
/// Holds two immutable sets: concrete suspendable methods, and
/// abstract/interface declarations with at least one suspendable
/// implementation. The latter signals downstream instrumentation to treat
/// calls through that supertype conservatively as suspendable, even though
/// the declaration itself has no body.
///
/// Results can be persisted in the manual classifier's line format via the
/// writer methods, and round-trip through
/// [`ManualSuspendableClassifier::from_reader`](crate::ManualSuspendableClassifier::from_reader).
#[derive(Debug)]
pub struct ScanResults {
    suspendables: HashSet<MethodId>,
    suspendable_supers: HashSet<MethodId>,
}

impl ScanResults {
    /// Snapshots the two result sets of a finished scan.
    pub(crate) fn new(
        suspendables: HashSet<MethodId>,
        suspendable_supers: HashSet<MethodId>,
    ) -> Self {
        ScanResults {
            suspendables,
            suspendable_supers,
        }
    }

    /// Returns `true` if the method was classified suspendable.
    #[must_use]
    pub fn contains_suspendable(&self, id: &MethodId) -> bool {
        self.suspendables.contains(id)
    }

    /// Returns `true` if the declaration has at least one suspendable
    /// implementation.
    #[must_use]
    pub fn contains_suspendable_super(&self, id: &MethodId) -> bool {
        self.suspendable_supers.contains(id)
    }

    /// Returns an iterator over all suspendable methods.
    pub fn suspendables(&self) -> impl Iterator<Item = &MethodId> {
        self.suspendables.iter()
    }

    /// Returns an iterator over all suspendable supers.
    pub fn suspendable_supers(&self) -> impl Iterator<Item = &MethodId> {
        self.suspendable_supers.iter()
    }

    /// Returns the number of suspendable methods.
    #[must_use]
    pub fn suspendable_count(&self) -> usize {
        self.suspendables.len()
    }

    /// Returns the number of suspendable supers.
    #[must_use]
    pub fn suspendable_super_count(&self) -> usize {
        self.suspendable_supers.len()
    }

    /// Writes the suspendable set in the manual classifier line format,
    /// sorted for determinism.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the writer fails.
    pub fn write_suspendables<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_sorted(&self.suspendables, writer)
    }

    /// Writes the suspendable-super set in the manual classifier line format,
    /// sorted for determinism.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the writer fails.
    pub fn write_suspendable_supers<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_sorted(&self.suspendable_supers, writer)
    }
}

fn write_sorted<W: Write>(set: &HashSet<MethodId>, writer: &mut W) -> Result<()> {
    let mut entries: Vec<&MethodId> = set.iter().collect();
    entries.sort();
    for entry in entries {
        writeln!(writer, "{entry}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> ScanResults {
        let mut suspendables = HashSet::new();
        suspendables.insert(MethodId::new("co/acme/B", "foo", "(I)V"));
        suspendables.insert(MethodId::new("co/acme/A", "foo", "(Lco/acme/IA;)V"));
        let mut supers = HashSet::new();
        supers.insert(MethodId::new("co/acme/IA", "foo", "(I)V"));
        ScanResults::new(suspendables, supers)
    }

    #[test]
    fn test_membership_queries() {
        let results = results();
        assert!(results.contains_suspendable(&MethodId::new("co/acme/B", "foo", "(I)V")));
        assert!(!results.contains_suspendable(&MethodId::new("co/acme/IA", "foo", "(I)V")));
        assert!(results.contains_suspendable_super(&MethodId::new("co/acme/IA", "foo", "(I)V")));
        assert_eq!(results.suspendable_count(), 2);
        assert_eq!(results.suspendable_super_count(), 1);
    }

    #[test]
    fn test_writer_output_is_sorted() {
        let results = results();
        let mut out = Vec::new();
        results.write_suspendables(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "co/acme/A.foo(Lco/acme/IA;)V\nco/acme/B.foo(I)V\n"
        );

        let mut supers = Vec::new();
        results.write_suspendable_supers(&mut supers).unwrap();
        assert_eq!(String::from_utf8(supers).unwrap(), "co/acme/IA.foo(I)V\n");
    }
}
