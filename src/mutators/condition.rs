use crate::error::Result;
use crate::mutation::{Mutation, MutatorKind};
use crate::mutators::Mutator;
use crate::syntax::{SyntaxKind, SyntaxRef};

/// Swaps comparison operators for their negation.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConditionMutator;

/// `(operator, rule name, replacement operator)`
fn comparison_rules() -> &'static [(&'static str, &'static str, &'static str)] {
    &[
        // equality / inequality
        ("==", "eq_to_neq", "!="),
        ("!=", "neq_to_eq", "=="),
        // ordered comparisons
        ("<=", "le_to_gt", ">"),
        (">=", "ge_to_lt", "<"),
        ("<", "lt_to_ge", ">="),
        (">", "gt_to_le", "<="),
    ]
}

impl Mutator for ConditionMutator {
    fn name(&self) -> &'static str {
        "condition"
    }

    fn target(&self) -> SyntaxKind {
        SyntaxKind::BinaryExpression
    }

    fn apply_mutations<'a>(&self, node: &SyntaxRef<'a>) -> Result<Vec<Mutation<'a>>> {
        let original = node.node();
        if original.kind() != SyntaxKind::BinaryExpression {
            return Ok(Vec::new());
        }

        let Some(op) = original.text() else {
            return Ok(Vec::new());
        };

        let mutations = comparison_rules()
            .iter()
            .filter(|(pattern, _, _)| *pattern == op)
            .map(|(pattern, name, replacement)| {
                Mutation::new(
                    original,
                    original.rebuild(original.children().to_vec()).with_text(*replacement),
                    format!("{name}: {pattern} -> {replacement}"),
                    MutatorKind::Condition,
                )
            })
            .collect();

        Ok(mutations)
    }
}
