//! Method identities and per-method records.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

/// Uniquely identifies a method within an analyzed program.
///
/// A method identity is the triple of owner type name, method name, and
/// signature descriptor. Equality and hashing are structural over all three
/// components; this triple is the sole key used throughout the call graph.
///
/// The fields are reference-counted strings, so cloning an identity during
/// propagation is O(1) and never copies the underlying text.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MethodId {
    owner: Arc<str>,
    name: Arc<str>,
    descriptor: Arc<str>,
}

impl MethodId {
    /// Creates a new method identity.
    ///
    /// # Arguments
    ///
    /// * `owner` - Fully qualified owner type name (segments separated by `/`)
    /// * `name` - Method name
    /// * `descriptor` - Parameter/return signature descriptor, e.g. `(I)V`
    #[must_use]
    pub fn new(
        owner: impl Into<Arc<str>>,
        name: impl Into<Arc<str>>,
        descriptor: impl Into<Arc<str>>,
    ) -> Self {
        MethodId {
            owner: owner.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }

    /// Returns the fully qualified owner type name.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the signature descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Returns the identity of a method with the same name and descriptor
    /// declared on a different owner type.
    ///
    /// This is how override-relation queries materialize the identity of a
    /// matching declaration on a sub- or supertype without re-interning the
    /// name and descriptor.
    #[must_use]
    pub fn with_owner(&self, owner: impl Into<Arc<str>>) -> Self {
        MethodId {
            owner: owner.into(),
            name: self.name.clone(),
            descriptor: self.descriptor.clone(),
        }
    }
}

impl fmt::Display for MethodId {
    /// Renders the identity in the manual-resource line grammar:
    /// `ownerType.methodName(parameterDescriptors)returnDescriptor`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}{}", self.owner, self.name, self.descriptor)
    }
}

impl fmt::Debug for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodId({self})")
    }
}

bitflags! {
    /// Modifier flags of a method record, as reported by the program model adapter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MethodFlags: u8 {
        /// The method is declared abstract or on an interface and has no body.
        const ABSTRACT = 0x01;
        /// The method body directly invokes the designated suspension primitive.
        const SUSPEND_PRIMITIVE = 0x02;
    }
}

/// A single method as reported by the program model adapter.
///
/// Carries the method's identity, the identities of every statically resolvable
/// call target in its body, and its modifier flags. Duplicate call targets are
/// allowed and the order of targets is irrelevant for classification.
#[derive(Debug, Clone)]
pub struct MethodRecord {
    id: MethodId,
    calls: Vec<MethodId>,
    flags: MethodFlags,
}

impl MethodRecord {
    /// Creates a new method record.
    ///
    /// # Arguments
    ///
    /// * `id` - The method's identity
    /// * `calls` - Identities of every method this method invokes
    /// * `flags` - Modifier flags detected by the adapter
    #[must_use]
    pub fn new(id: MethodId, calls: Vec<MethodId>, flags: MethodFlags) -> Self {
        MethodRecord { id, calls, flags }
    }

    /// Returns the method's identity.
    #[must_use]
    pub fn id(&self) -> &MethodId {
        &self.id
    }

    /// Returns the identities of every call target in this method's body.
    #[must_use]
    pub fn calls(&self) -> &[MethodId] {
        &self.calls
    }

    /// Returns the method's modifier flags.
    #[must_use]
    pub fn flags(&self) -> MethodFlags {
        self.flags
    }

    /// Returns `true` if the method is declared abstract / on an interface.
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.flags.contains(MethodFlags::ABSTRACT)
    }

    /// Returns `true` if the method body directly invokes the suspension primitive.
    #[must_use]
    pub fn is_suspend_primitive(&self) -> bool {
        self.flags.contains(MethodFlags::SUSPEND_PRIMITIVE)
    }
}
