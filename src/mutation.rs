use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::syntax::SyntaxNode;

/// Identifier of a single mutant within a compilation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MutantId(u32);

impl MutantId {
    /// Largest id the selector field (`int ActiveMutation`) can hold.
    pub const MAX: MutantId = MutantId(i32::MAX as u32);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The identifier following this one, or `None` past [`MutantId::MAX`].
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self).filter(|id| *id <= Self::MAX)
    }
}

impl From<u32> for MutantId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for MutantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mutator family that produced a [`Mutation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutatorKind {
    /// Statement blocks emptied (keeping a default-value return where one is required).
    Block,

    /// Comparison operator changes (for example `==` ↔ `!=`, `<` ↔ `>=`).
    Condition,
}

/// One candidate alteration of a subtree.
///
/// `original` borrows from the source tree until the orchestrator splices the
/// placed result back in; `replacement` is freshly built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mutation<'a> {
    pub original: &'a SyntaxNode,
    pub replacement: SyntaxNode,
    pub display_name: Cow<'static, str>,
    pub kind: MutatorKind,
}

impl<'a> Mutation<'a> {
    pub fn new(
        original: &'a SyntaxNode,
        replacement: SyntaxNode,
        display_name: impl Into<Cow<'static, str>>,
        kind: MutatorKind,
    ) -> Self {
        let mutation = Self {
            original,
            replacement,
            display_name: display_name.into(),
            kind,
        };

        debug_assert!(
            mutation.is_interchangeable(),
            "replacement {:?} cannot stand in for {:?}",
            mutation.replacement.kind(),
            mutation.original.kind()
        );

        mutation
    }

    /// Both sides are statements, or both are expressions.
    pub fn is_interchangeable(&self) -> bool {
        let (a, b) = (self.original.kind(), self.replacement.kind());
        (a.is_statement() && b.is_statement()) || (a.is_expression() && b.is_expression())
    }
}
