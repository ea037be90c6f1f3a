use crate::ast::{AstNode, Expression};
use crate::factory as mk;
use crate::mutation::MutantId;
use crate::placer::{self, GuardKind, MutationTag};
use crate::syntax::{SyntaxKind, SyntaxNode};

pub const HELPER_NAMESPACE: &str = "TreeMutant";
pub const HELPER_CLASS: &str = "ActiveMutationHelper";
pub const SELECTOR_FIELD: &str = "ActiveMutation";

/// Selector value meaning "no mutant is active". Mutant ids are never negative.
pub const INACTIVE: i64 = -1;

/// `TreeMutant.ActiveMutationHelper.ActiveMutation`
pub fn selector_access() -> Expression {
    mk::member_access(
        mk::member_access(mk::identifier(HELPER_NAMESPACE), HELPER_CLASS),
        SELECTOR_FIELD,
    )
}

pub fn is_selector_access(node: &SyntaxNode) -> bool {
    *node == selector_access().into_syntax()
}

/// `TreeMutant.ActiveMutationHelper.ActiveMutation == id`
pub fn guard_condition(id: MutantId) -> Expression {
    mk::binary("==", selector_access(), mk::numeric_literal(id))
}

/// Evaluate a guard condition for a given selector value.
///
/// Returns `None` when `condition` is not a selector comparison.
pub fn evaluate_condition(condition: &SyntaxNode, active: i64) -> Option<bool> {
    if condition.kind() != SyntaxKind::BinaryExpression || condition.text() != Some("==") {
        return None;
    }

    let [selector, literal] = condition.children() else {
        return None;
    };

    if !is_selector_access(selector) || literal.kind() != SyntaxKind::NumericLiteral {
        return None;
    }

    let id: i64 = literal.text()?.parse().ok()?;
    Some(active == id)
}

/// The branch of a guard that executes when the selector holds `active`.
///
/// Returns `None` for nodes that are not guards.
pub fn live_branch(guard: &SyntaxNode, active: i64) -> Option<&SyntaxNode> {
    let tag = MutationTag::of(guard)?;
    let taken = evaluate_condition(guard.child(0)?, active)?;

    match (tag.kind, taken) {
        (GuardKind::MutationIf, true) => placer::mutated_statement(guard),
        (GuardKind::MutationIf, false) => placer::remove_statement_guard(guard),
        (GuardKind::MutationConditional, true) => guard.child(1),
        (GuardKind::MutationConditional, false) => placer::remove_expression_guard(guard),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;

    #[test]
    fn condition_reads_the_helper_field() {
        let cond = guard_condition(MutantId::new(3));
        insta::assert_snapshot!(
            render(cond.syntax()),
            @"TreeMutant.ActiveMutationHelper.ActiveMutation == 3"
        );
    }

    #[test]
    fn condition_holds_only_for_its_own_id() {
        let cond = guard_condition(MutantId::new(5));

        assert_eq!(evaluate_condition(cond.syntax(), 5), Some(true));
        for other in [INACTIVE, 0, 4, 6, 50] {
            assert_eq!(evaluate_condition(cond.syntax(), other), Some(false));
        }
    }

    #[test]
    fn foreign_conditions_are_not_evaluated() {
        let plain = mk::binary("==", mk::identifier("x"), mk::numeric_literal(1));
        let wrong_op = mk::binary("!=", selector_access(), mk::numeric_literal(1));

        assert_eq!(evaluate_condition(plain.syntax(), 1), None);
        assert_eq!(evaluate_condition(wrong_op.syntax(), 1), None);
    }

    #[test]
    fn helper_template_declares_the_inactive_selector() {
        let helper = placer::active_mutant_selector_helper().expect("helper");
        let rendered = render(helper);

        assert_eq!(
            rendered,
            format!(
                "namespace {HELPER_NAMESPACE} {{ class {HELPER_CLASS} {{ public static int {SELECTOR_FIELD} = {INACTIVE}; }} }}"
            )
        );
    }
}
