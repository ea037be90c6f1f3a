use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::ast::{AstNode, Block, Expression, Statement};
use crate::error::Result;
use crate::factory as mk;
use crate::mutation::MutantId;
use crate::resources;
use crate::selector;
use crate::syntax::{Annotation, SyntaxKind, SyntaxNode};

/// Annotation kind of statement guards.
pub const MUTATION_IF: &str = "MutationIf";

/// Annotation kind of expression guards.
pub const MUTATION_CONDITIONAL: &str = "MutationConditional";

/// Annotation kind of one-statement blocks created only to hold a placed statement.
pub const SYNTHETIC_BLOCK: &str = "MutationBlock";

/// Set on a statement guard whose original branch [`place_statement`] wrapped.
pub const WRAPPED_ORIGINAL: &str = "MutationWrappedOriginal";

/// Set on a statement guard whose mutated branch [`place_statement`] wrapped.
pub const WRAPPED_MUTATED: &str = "MutationWrappedMutated";

/// Grammatical form of a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuardKind {
    MutationIf,
    MutationConditional,
}

impl GuardKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GuardKind::MutationIf => MUTATION_IF,
            GuardKind::MutationConditional => MUTATION_CONDITIONAL,
        }
    }

    fn node_kind(self) -> SyntaxKind {
        match self {
            GuardKind::MutationIf => SyntaxKind::IfStatement,
            GuardKind::MutationConditional => SyntaxKind::ConditionalExpression,
        }
    }
}

/// Traceability tag attached to every guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MutationTag {
    pub kind: GuardKind,
    pub mutant_id: MutantId,
}

impl MutationTag {
    /// Read the tag of a guard. Returns `None` for anything that is not one.
    pub fn of(node: &SyntaxNode) -> Option<Self> {
        [GuardKind::MutationIf, GuardKind::MutationConditional]
            .into_iter()
            .filter(|kind| kind.node_kind() == node.kind())
            .find_map(|kind| {
                let id = node.annotation(kind.as_str())?.data.as_deref()?.parse().ok()?;
                Some(Self {
                    kind,
                    mutant_id: MutantId::new(id),
                })
            })
    }

    fn to_annotation(self) -> Annotation {
        Annotation::with_data(self.kind.as_str(), self.mutant_id.to_string())
    }
}

static HELPER: OnceCell<SyntaxNode> = OnceCell::new();

/// Declaration of the active selector field, parsed from the embedded template.
///
/// The first successful parse is cached for the lifetime of the process. A corrupt
/// template fails every call.
pub fn active_mutant_selector_helper() -> Result<&'static SyntaxNode> {
    HELPER.get_or_try_init(|| resources::load_tree(resources::ACTIVE_MUTATION_HELPER))
}

/// `if (selector == id) mutated else original`
pub fn place_with_if_statement(original: Block, mutated: Block, mutant_id: MutantId) -> Statement {
    trace!(%mutant_id, "placing statement guard");

    let tag = MutationTag {
        kind: GuardKind::MutationIf,
        mutant_id,
    };

    let guard = mk::if_statement(
        selector::guard_condition(mutant_id),
        mutated.into(),
        Some(original.into()),
    );

    Statement::new_unchecked(guard.into_syntax().with_annotation(tag.to_annotation()))
}

/// Statement overload: non-block statements are first wrapped into blocks.
///
/// The guard records which branches were wrapped, so removal unwraps exactly those.
pub fn place_statement(original: Statement, mutated: Statement, mutant_id: MutantId) -> Statement {
    let wrapped_original = original.syntax().kind() != SyntaxKind::Block;
    let wrapped_mutated = mutated.syntax().kind() != SyntaxKind::Block;

    let mut guard = place_with_if_statement(wrap_in_block(original), wrap_in_block(mutated), mutant_id)
        .into_syntax();
    if wrapped_original {
        guard = guard.with_annotation(Annotation::new(WRAPPED_ORIGINAL));
    }
    if wrapped_mutated {
        guard = guard.with_annotation(Annotation::new(WRAPPED_MUTATED));
    }

    Statement::new_unchecked(guard)
}

/// `selector == id ? mutated : original`
pub fn place_with_conditional_expression(
    original: Expression,
    mutated: Expression,
    mutant_id: MutantId,
) -> Expression {
    trace!(%mutant_id, "placing expression guard");

    let tag = MutationTag {
        kind: GuardKind::MutationConditional,
        mutant_id,
    };

    let guard = mk::conditional(selector::guard_condition(mutant_id), mutated, original);
    Expression::new_unchecked(guard.into_syntax().with_annotation(tag.to_annotation()))
}

/// Original statement of a statement guard, or `None` if `node` is not one.
pub fn remove_statement_guard(node: &SyntaxNode) -> Option<&SyntaxNode> {
    let tag = MutationTag::of(node)?;
    if tag.kind != GuardKind::MutationIf {
        return None;
    }

    let original = node.child(2)?.child(0)?;
    Some(unwrap_if_marked(node, original, WRAPPED_ORIGINAL))
}

/// Mutated statement of a statement guard, or `None` if `node` is not one.
pub fn mutated_statement(node: &SyntaxNode) -> Option<&SyntaxNode> {
    let tag = MutationTag::of(node)?;
    if tag.kind != GuardKind::MutationIf {
        return None;
    }

    let mutated = node.child(1)?;
    Some(unwrap_if_marked(node, mutated, WRAPPED_MUTATED))
}

fn unwrap_if_marked<'a>(guard: &SyntaxNode, branch: &'a SyntaxNode, marker: &str) -> &'a SyntaxNode {
    if guard.has_annotation(marker) {
        unwrap_synthetic_block(branch)
    } else {
        branch
    }
}

/// Original expression of an expression guard, or `None` if `node` is not one.
pub fn remove_expression_guard(node: &SyntaxNode) -> Option<&SyntaxNode> {
    let tag = MutationTag::of(node)?;
    if tag.kind != GuardKind::MutationConditional {
        return None;
    }

    node.child(2)
}

/// Use a block as-is; wrap any other statement into a synthetic one-statement block.
pub fn wrap_in_block(statement: Statement) -> Block {
    match statement.into_block() {
        Ok(block) => block,
        Err(statement) => {
            let block = mk::block([statement]);
            Block::new_unchecked(
                block
                    .into_syntax()
                    .with_annotation(Annotation::new(SYNTHETIC_BLOCK)),
            )
        }
    }
}

pub fn is_synthetic_block(node: &SyntaxNode) -> bool {
    node.kind() == SyntaxKind::Block && node.has_annotation(SYNTHETIC_BLOCK)
}

/// The single statement of a synthetic block, or the node itself.
pub fn unwrap_synthetic_block(node: &SyntaxNode) -> &SyntaxNode {
    match node.children() {
        [only] if is_synthetic_block(node) => only,
        _ => node,
    }
}
