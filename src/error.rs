use thiserror::Error;

use crate::mutation::MutantId;
use crate::syntax::SyntaxKind;

/// Errors produced by the mutation core.
#[derive(Debug, Error)]
pub enum Error {
    /// No embedded resource is registered under this logical name.
    #[error("unknown resource `{0}`")]
    UnknownResource(String),

    /// The embedded resource exists but is not a valid serialized syntax tree.
    #[error("resource `{name}` is not a valid syntax tree")]
    CorruptResource {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The return type a replacement block would need cannot be determined.
    ///
    /// Mutators treat this as "not applicable" and never surface it to callers.
    #[error("cannot resolve return type: {0}")]
    UnresolvedReturnType(String),

    /// A node does not have the children its kind requires.
    #[error("malformed {kind:?} node: {reason}")]
    MalformedNode {
        kind: SyntaxKind,
        reason: &'static str,
    },

    /// Every id the selector field can hold has been handed out.
    #[error("mutant ids exhausted: the selector field holds at most {}", MutantId::MAX)]
    MutantIdsExhausted,

    /// Two subtrees that must be interchangeable belong to different grammatical classes.
    #[error("cannot pair {original:?} with {replacement:?}")]
    StructuralMismatch {
        original: SyntaxKind,
        replacement: SyntaxKind,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
