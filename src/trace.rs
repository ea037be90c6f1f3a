use crate::mutation::MutantId;
use crate::placer::{self, MutationTag};
use crate::selector;
use crate::syntax::{SyntaxNode, SyntaxRef};

/// Tags of every placed mutant in `root`, in preorder.
pub fn placed_mutants(root: &SyntaxNode) -> Vec<MutationTag> {
    SyntaxRef::root(root)
        .descendants()
        .iter()
        .filter_map(|node| MutationTag::of(node.node()))
        .collect()
}

/// The guard placed for `id`, if any.
pub fn find_mutant(root: &SyntaxNode, id: MutantId) -> Option<&SyntaxNode> {
    SyntaxRef::root(root)
        .descendants()
        .into_iter()
        .map(|node| node.node())
        .find(|node| MutationTag::of(node).is_some_and(|tag| tag.mutant_id == id))
}

/// Replace every guard with its original branch.
pub fn strip_mutations(root: &SyntaxNode) -> SyntaxNode {
    resolve(root, &|guard| {
        placer::remove_statement_guard(guard).or_else(|| placer::remove_expression_guard(guard))
    })
}

/// Replace every guard with the branch that runs while the selector holds `active`.
///
/// With [`selector::INACTIVE`] this is the same tree as [`strip_mutations`].
pub fn activate(root: &SyntaxNode, active: i64) -> SyntaxNode {
    resolve(root, &|guard| selector::live_branch(guard, active))
}

fn resolve(node: &SyntaxNode, branch: &dyn Fn(&SyntaxNode) -> Option<&SyntaxNode>) -> SyntaxNode {
    if let Some(taken) = branch(node) {
        return resolve(taken, branch);
    }

    // Synthetic blocks only exist to hold a guard where a block is required.
    if let [only] = node.children() {
        if placer::is_synthetic_block(node) && MutationTag::of(only).is_some() {
            return resolve(only, branch);
        }
    }

    node.rebuild(node.children().iter().map(|c| resolve(c, branch)).collect())
}
