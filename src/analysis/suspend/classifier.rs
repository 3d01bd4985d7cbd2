//! The file-driven manual suspendable classifier.
//!
//! A manual classifier is a flat, explicit allow-list of method signatures
//! loaded once from a line-oriented text resource. It performs no graph
//! analysis; it is either queried standalone (for programs with no automatic
//! scan available) or merged as extra seeds into a
//! [`SuspendScan`](crate::SuspendScan) - typically to mark native or
//! externally compiled methods the call graph cannot observe.
//!
//! # Resource format
//!
//! One fully qualified method signature per line, in the form
//! `ownerType.methodName(parameterDescriptors)returnDescriptor`, e.g.
//!
//! ```text
//! # lines starting with '#' are comments, blank lines are ignored
//! co/acme/NativeSched.park()V
//! co/acme/Worker.step(IJ)V
//! ```
//!
//! Owner segments use `/`; the last `.` before the `(` separates the owner
//! from the method name. A malformed line rejects the whole resource: the
//! list is a trust boundary, so nothing is silently skipped.
//!
//! A companion resource of the same format can list supertype declarations
//! known to have suspendable implementations (suspendable supers).

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::{model::MethodId, Error, Result};

/// An immutable, exact-match lookup table of user-declared suspendable methods.
///
/// # Example
///
/// ```rust
/// use std::io::Cursor;
/// use suspscan::ManualSuspendableClassifier;
///
/// let resource = "# native scheduler entry points\nco/acme/Sched.park()V\n";
/// let classifier = ManualSuspendableClassifier::from_reader(Cursor::new(resource), "inline")?;
///
/// assert!(classifier.is_suspendable("co/acme/Sched", "park", "()V"));
/// assert!(!classifier.is_suspendable("co/acme/Sched", "park", "(I)V"));
/// # Ok::<(), suspscan::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct ManualSuspendableClassifier {
    suspendables: HashSet<MethodId>,
    supers: HashSet<MethodId>,
}

impl ManualSuspendableClassifier {
    /// Loads a classifier from a suspendables resource on disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceNotFound`] if the file cannot be opened,
    /// [`Error::Parse`] on the first malformed line, or [`Error::Io`] on a
    /// read failure.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::ResourceNotFound {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), &path.display().to_string())
    }

    /// Loads a classifier from any buffered reader.
    ///
    /// `resource` names the input in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] on the first malformed line, or [`Error::Io`]
    /// on a read failure.
    pub fn from_reader<R: BufRead>(reader: R, resource: &str) -> Result<Self> {
        let suspendables = parse_resource(reader, resource)?;
        debug!(resource, entries = suspendables.len(), "suspendables resource loaded");
        Ok(ManualSuspendableClassifier {
            suspendables,
            supers: HashSet::new(),
        })
    }

    /// Loads a companion suspendable-supers resource from disk.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`from_path`](Self::from_path).
    pub fn with_supers_path(self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::ResourceNotFound {
            path: path.display().to_string(),
            source,
        })?;
        self.with_supers_reader(BufReader::new(file), &path.display().to_string())
    }

    /// Loads a companion suspendable-supers resource from a buffered reader.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`from_reader`](Self::from_reader).
    pub fn with_supers_reader<R: BufRead>(mut self, reader: R, resource: &str) -> Result<Self> {
        self.supers = parse_resource(reader, resource)?;
        debug!(resource, entries = self.supers.len(), "suspendable-supers resource loaded");
        Ok(self)
    }

    /// Returns `true` if the given signature is listed as suspendable.
    ///
    /// Exact match only; an absent signature is `false`, never an error.
    #[must_use]
    pub fn is_suspendable(&self, owner: &str, name: &str, descriptor: &str) -> bool {
        self.suspendables
            .contains(&MethodId::new(owner, name, descriptor))
    }

    /// Returns `true` if the given signature is listed as a suspendable super.
    #[must_use]
    pub fn is_super_suspendable(&self, owner: &str, name: &str, descriptor: &str) -> bool {
        self.supers.contains(&MethodId::new(owner, name, descriptor))
    }

    /// Returns an iterator over all listed suspendable methods.
    pub fn suspendables(&self) -> impl Iterator<Item = &MethodId> {
        self.suspendables.iter()
    }

    /// Returns an iterator over all listed suspendable supers.
    pub fn super_suspendables(&self) -> impl Iterator<Item = &MethodId> {
        self.supers.iter()
    }

    /// Returns the number of listed suspendable methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.suspendables.len()
    }

    /// Returns `true` if no suspendable methods are listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.suspendables.is_empty()
    }
}

/// Parses a whole resource into a set of method identities.
fn parse_resource<R: BufRead>(reader: R, resource: &str) -> Result<HashSet<MethodId>> {
    let mut entries = HashSet::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        entries.insert(parse_line(entry, resource, index as u64 + 1)?);
    }

    Ok(entries)
}

/// Parses one `owner.name(args)ret` signature line.
fn parse_line(entry: &str, resource: &str, line: u64) -> Result<MethodId> {
    let malformed = |message: &str| Error::Parse {
        resource: resource.to_string(),
        line,
        message: message.to_string(),
    };

    let open = entry
        .find('(')
        .ok_or_else(|| malformed("missing '(' starting the descriptor"))?;
    let (qualified, descriptor) = entry.split_at(open);

    let dot = qualified
        .rfind('.')
        .ok_or_else(|| malformed("missing '.' between owner type and method name"))?;
    let (owner, name) = (&qualified[..dot], &qualified[dot + 1..]);
    if owner.is_empty() {
        return Err(malformed("empty owner type"));
    }
    if name.is_empty() {
        return Err(malformed("empty method name"));
    }

    let close = descriptor
        .find(')')
        .ok_or_else(|| malformed("missing ')' in descriptor"))?;
    if close + 1 == descriptor.len() {
        return Err(malformed("missing return descriptor"));
    }

    Ok(MethodId::new(owner, name, descriptor))
}
