use thiserror::Error;

use crate::model::MethodId;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every variant is an input error in the sense of the classification contract: when one is
/// returned, the run that produced it is aborted and no partial result is handed out. Silently
/// dropping a method from the graph would make the fixed-point propagation unsound, so the
/// caller is told exactly which input was bad instead.
///
/// # Error Categories
///
/// ## Program Model Errors
/// - [`Error::DuplicateMethod`] - The adapter handed over the same method twice
/// - [`Error::UnknownMethod`] - A query for a method the graph has no record of
///
/// ## Manual Classifier Errors
/// - [`Error::ResourceNotFound`] - The backing resource could not be opened
/// - [`Error::Parse`] - A malformed line in a manual classifier resource
/// - [`Error::Io`] - I/O failure while reading an already-open resource
///
/// # Examples
///
/// ```rust
/// use suspscan::{Error, ManualSuspendableClassifier};
///
/// match ManualSuspendableClassifier::from_path("does/not/exist") {
///     Ok(_) => println!("loaded"),
///     Err(Error::ResourceNotFound { path, .. }) => {
///         eprintln!("no such resource: {path}");
///     }
///     Err(Error::Parse { resource, line, message }) => {
///         eprintln!("bad entry {resource}:{line}: {message}");
///     }
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The same method identity was added to a call graph twice.
    ///
    /// The program model adapter must enumerate every method exactly once per run.
    /// A duplicate means the model is inconsistent, and the run aborts rather than
    /// silently replacing the earlier record.
    #[error("Duplicate method record - {0}")]
    DuplicateMethod(MethodId),

    /// A call-target query was made for a method the graph has no record of.
    ///
    /// This distinguishes "method not in the analyzed program" from "method with no
    /// calls". Callers that probe external/library methods should use
    /// [`CallGraph::is_known`](crate::CallGraph::is_known) first.
    #[error("Unknown method - {0}")]
    UnknownMethod(MethodId),

    /// A manual classifier resource could not be opened.
    ///
    /// # Fields
    ///
    /// * `path` - The path that was requested
    /// * `source` - The underlying I/O error
    #[error("Could not open suspendables resource '{path}'")]
    ResourceNotFound {
        /// The path of the resource that could not be opened
        path: String,
        /// The underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A manual classifier resource contained a malformed entry.
    ///
    /// A manual suspendables list is a trust boundary, so the whole resource is
    /// rejected on the first bad line instead of skipping it.
    ///
    /// # Fields
    ///
    /// * `resource` - Name of the resource being parsed
    /// * `line` - One-based line number of the offending entry
    /// * `message` - What was wrong with the entry
    #[error("Malformed entry - {resource}:{line}: {message}")]
    Parse {
        /// The resource in which the malformed entry was found
        resource: String,
        /// The one-based line number of the malformed entry
        line: u64,
        /// Description of the malformation
        message: String,
    },

    /// I/O error while reading an already-open resource.
    ///
    /// Wraps standard I/O errors such as read failures or invalid encodings
    /// encountered after the resource was successfully opened.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
