use std::collections::HashMap;
use std::fmt;

use crate::error::Result;
use crate::mutation::Mutation;
use crate::syntax::{SyntaxKind, SyntaxRef};

pub mod block;
pub mod condition;

pub use self::block::BlockMutator;
pub use self::condition::ConditionMutator;

/// A strategy that proposes alterations for nodes of one kind.
///
/// Implementations must be pure: the same node in the same context always yields
/// the same mutations, whatever order the tree is walked in.
pub trait Mutator: Send + Sync {
    /// Short, stable identifier used in logs.
    fn name(&self) -> &'static str;

    /// Node kind this strategy consumes.
    fn target(&self) -> SyntaxKind;

    /// Candidate mutations for `node`. Nodes of any other kind yield nothing.
    fn apply_mutations<'a>(&self, node: &SyntaxRef<'a>) -> Result<Vec<Mutation<'a>>>;
}

/// Strategies keyed by the node kind they consume.
#[derive(Default)]
pub struct MutatorRegistry {
    by_kind: HashMap<SyntaxKind, Vec<Box<dyn Mutator>>>,
}

impl MutatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in strategy.
    pub fn with_default_mutators() -> Self {
        let mut registry = Self::new();
        registry.register(BlockMutator).register(ConditionMutator);
        registry
    }

    pub fn register(&mut self, mutator: impl Mutator + 'static) -> &mut Self {
        self.by_kind
            .entry(mutator.target())
            .or_default()
            .push(Box::new(mutator));
        self
    }

    /// Strategies for `kind`, in registration order.
    pub fn mutators_for(&self, kind: SyntaxKind) -> &[Box<dyn Mutator>] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Mutations every strategy registered for the node's kind produces.
    pub fn mutations_for<'a>(&self, node: &SyntaxRef<'a>) -> Result<Vec<Mutation<'a>>> {
        let mut mutations = Vec::new();
        for mutator in self.mutators_for(node.kind()) {
            mutations.extend(mutator.apply_mutations(node)?);
        }
        Ok(mutations)
    }

    pub fn len(&self) -> usize {
        self.by_kind.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for MutatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.by_kind.iter().collect();
        kinds.sort_by_key(|(kind, _)| **kind);

        f.debug_map()
            .entries(kinds.into_iter().map(|(kind, mutators)| {
                (kind, mutators.iter().map(|m| m.name()).collect::<Vec<_>>())
            }))
            .finish()
    }
}
