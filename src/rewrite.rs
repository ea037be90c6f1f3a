use serde::Serialize;
use tracing::debug;

use tree_mutant::ast::{AstNode, Expression, Statement};
use tree_mutant::mutators::MutatorRegistry;
use tree_mutant::placer::{self, GuardKind};
use tree_mutant::render::render;
use tree_mutant::syntax::{SyntaxKind, SyntaxNode, SyntaxRef};
use tree_mutant::{Error, MutantId, Mutation, MutatorKind, Result};

/// One mutant placed into a rewritten tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedMutant {
    pub id: MutantId,
    pub guard: GuardKind,
    pub kind: MutatorKind,
    pub display_name: String,

    /// Rendered original subtree.
    pub original: String,

    /// Rendered replacement subtree.
    pub replacement: String,
}

/// Result of placing every candidate mutation of a tree.
#[derive(Debug)]
pub struct Rewrite {
    pub tree: SyntaxNode,
    pub mutants: Vec<PlacedMutant>,
}

/// A candidate mutation found by [`scan`], numbered in discovery order.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate<'a> {
    pub index: usize,
    #[serde(flatten)]
    pub mutation: Mutation<'a>,
}

/// Candidate mutations of every node in `root`, in preorder.
pub fn scan<'a>(root: &'a SyntaxNode, registry: &MutatorRegistry) -> Result<Vec<Candidate<'a>>> {
    let mut candidates = Vec::new();

    for node in SyntaxRef::root(root).descendants() {
        for mutation in registry.mutations_for(&node)? {
            candidates.push(Candidate {
                index: candidates.len() + 1,
                mutation,
            });
        }
    }

    Ok(candidates)
}

/// Place every candidate mutation of `root`, allocating ids from `first_id` in preorder.
///
/// Fails with [`Error::MutantIdsExhausted`] when an id would exceed [`MutantId::MAX`].
pub fn place_all(root: &SyntaxNode, registry: &MutatorRegistry, first_id: MutantId) -> Result<Rewrite> {
    let mut rewriter = Rewriter {
        registry,
        next_id: Some(first_id).filter(|id| *id <= MutantId::MAX),
        mutants: Vec::new(),
    };

    let tree = rewriter.rewrite(&SyntaxRef::root(root))?;
    rewriter.mutants.sort_by_key(|m| m.id);

    Ok(Rewrite {
        tree,
        mutants: rewriter.mutants,
    })
}

struct Rewriter<'r> {
    registry: &'r MutatorRegistry,
    next_id: Option<MutantId>,
    mutants: Vec<PlacedMutant>,
}

impl Rewriter<'_> {
    fn rewrite(&mut self, cursor: &SyntaxRef<'_>) -> Result<SyntaxNode> {
        // Mutations see the original context; ids are handed out before children.
        let mutations = self.registry.mutations_for(cursor)?;
        let ids = mutations
            .iter()
            .map(|_| self.allocate())
            .collect::<Result<Vec<_>>>()?;

        let children = cursor
            .children()
            .map(|child| self.rewrite(&child))
            .collect::<Result<Vec<_>>>()?;

        let mut node = cursor.node().rebuild(children);

        for (mutation, id) in mutations.into_iter().zip(ids) {
            let (placed, guard) = place(node, mutation.replacement.clone(), id)?;
            debug!(%id, ?guard, name = %mutation.display_name, "placed mutant");

            self.mutants.push(PlacedMutant {
                id,
                guard,
                kind: mutation.kind,
                display_name: mutation.display_name.into_owned(),
                original: render(mutation.original),
                replacement: render(&mutation.replacement),
            });
            node = placed;
        }

        Ok(node)
    }

    fn allocate(&mut self) -> Result<MutantId> {
        let id = self.next_id.ok_or(Error::MutantIdsExhausted)?;
        self.next_id = id.next();
        Ok(id)
    }
}

/// Guard `node` with `replacement`, keeping the grammatical class of `node`.
///
/// A guarded block is wrapped back into a block, since its slot (a function body,
/// an accessor) may not accept any other statement.
fn place(node: SyntaxNode, replacement: SyntaxNode, id: MutantId) -> Result<(SyntaxNode, GuardKind)> {
    let mismatch = Error::StructuralMismatch {
        original: node.kind(),
        replacement: replacement.kind(),
    };

    if node.kind().is_expression() {
        let (Some(original), Some(mutated)) = (Expression::cast(node), Expression::cast(replacement)) else {
            return Err(mismatch);
        };
        let guard = placer::place_with_conditional_expression(original, mutated, id);
        return Ok((guard.into_syntax(), GuardKind::MutationConditional));
    }

    let was_block = node.kind() == SyntaxKind::Block;
    let (Some(original), Some(mutated)) = (Statement::cast(node), Statement::cast(replacement)) else {
        return Err(mismatch);
    };

    let guard = placer::place_statement(original, mutated, id);
    let placed = if was_block {
        placer::wrap_in_block(guard).into_syntax()
    } else {
        guard.into_syntax()
    };

    Ok((placed, GuardKind::MutationIf))
}
