use tracing::debug;

use crate::ast::{AstNode, Block, TypeRef};
use crate::error::{Error, Result};
use crate::factory as mk;
use crate::mutation::{Mutation, MutatorKind};
use crate::mutators::Mutator;
use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxRef};

/// Empties statement blocks.
///
/// When the block is the body of something that must produce a value, the
/// replacement returns the default value of the declared type instead, so the
/// mutated program still type-checks:
///
/// ```text
/// int Count() { ... }            ->  int Count() { return default(int); }
/// void Reset() { ... }           ->  void Reset() { }
/// Func<int> f = () => { ... };   ->  Func<int> f = () => { return default(int); };
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct BlockMutator;

/// Syntactic role of a block, decided by its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockContext<'a> {
    FunctionBody { return_type: &'a SyntaxNode },
    PropertyGetter { property_type: &'a SyntaxNode },
    TypedLambda { return_type: &'a SyntaxNode },
    Plain,
}

impl<'a> BlockContext<'a> {
    fn resolve(block: &SyntaxRef<'a>) -> Result<Self> {
        let Some(parent) = block.parent() else {
            return Ok(BlockContext::Plain);
        };

        match parent.kind() {
            SyntaxKind::FunctionDeclaration => Ok(BlockContext::FunctionBody {
                return_type: declared_type(parent.node())?,
            }),
            SyntaxKind::GetAccessor => {
                // get accessor -> accessor list -> property
                let property = parent
                    .parent()
                    .and_then(|accessors| accessors.parent())
                    .filter(|p| p.kind() == SyntaxKind::PropertyDeclaration)
                    .ok_or(Error::MalformedNode {
                        kind: SyntaxKind::GetAccessor,
                        reason: "getter is not owned by a property declaration",
                    })?;

                Ok(BlockContext::PropertyGetter {
                    property_type: declared_type(property.node())?,
                })
            }
            SyntaxKind::LambdaExpression => Ok(BlockContext::TypedLambda {
                return_type: lambda_return_type(&parent)?,
            }),
            _ => Ok(BlockContext::Plain),
        }
    }

    /// Type the replacement block has to return, if any.
    fn return_type(self) -> Option<&'a SyntaxNode> {
        match self {
            BlockContext::FunctionBody { return_type }
            | BlockContext::TypedLambda { return_type } => Some(return_type),
            BlockContext::PropertyGetter { property_type } => Some(property_type),
            BlockContext::Plain => None,
        }
    }
}

fn declared_type(declaration: &SyntaxNode) -> Result<&SyntaxNode> {
    declaration.type_child().ok_or(Error::MalformedNode {
        kind: declaration.kind(),
        reason: "declaration has no type",
    })
}

/// Return type of a lambda bound to a generic typed declaration, such as
/// `Func<string, bool> f = (s) => { ... }`. The last type argument is the result.
fn lambda_return_type<'a>(lambda: &SyntaxRef<'a>) -> Result<&'a SyntaxNode> {
    let unresolved =
        || Error::UnresolvedReturnType("lambda is not bound to a generic typed declaration".into());

    let declarator = lambda
        .parent()
        .filter(|p| p.kind() == SyntaxKind::VariableDeclarator)
        .ok_or_else(unresolved)?;

    let declaration = declarator
        .parent()
        .filter(|p| p.kind() == SyntaxKind::VariableDeclaration)
        .ok_or_else(unresolved)?;

    let declared = declaration
        .node()
        .type_child()
        .filter(|ty| ty.kind() == SyntaxKind::GenericType)
        .ok_or_else(unresolved)?;

    declared.children().last().ok_or_else(unresolved)
}

fn replacement_block(context: BlockContext<'_>) -> Block {
    let return_type = context
        .return_type()
        .and_then(|ty| TypeRef::cast(ty.clone()))
        .filter(|ty| !ty.is_void());

    match return_type {
        Some(ty) => mk::block([mk::return_statement(Some(mk::default_of(ty)))]),
        None => mk::block([]),
    }
}

impl Mutator for BlockMutator {
    fn name(&self) -> &'static str {
        "block_removal"
    }

    fn target(&self) -> SyntaxKind {
        SyntaxKind::Block
    }

    fn apply_mutations<'a>(&self, node: &SyntaxRef<'a>) -> Result<Vec<Mutation<'a>>> {
        if node.kind() != SyntaxKind::Block {
            return Ok(Vec::new());
        }

        let context = match BlockContext::resolve(node) {
            Ok(context) => context,
            Err(Error::UnresolvedReturnType(reason)) => {
                debug!(%reason, "block removal not applicable");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let replacement = replacement_block(context);

        Ok(vec![Mutation::new(
            node.node(),
            replacement.into_syntax(),
            "Remove code block",
            MutatorKind::Block,
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Statement;
    use crate::render::render;

    fn body() -> Block {
        mk::block([
            mk::expression_statement(mk::invocation(mk::identifier("Work"), [])),
            mk::return_statement(Some(mk::identifier("result"))),
        ])
    }

    /// Apply the mutator to the first block found in `tree` in preorder.
    fn mutate_first_block(tree: &SyntaxNode) -> Result<Vec<String>> {
        let root = SyntaxRef::root(tree);
        let block = root
            .descendants()
            .into_iter()
            .find(|n| n.kind() == SyntaxKind::Block)
            .expect("tree should contain a block");

        let mutations = BlockMutator.apply_mutations(&block)?;
        for m in &mutations {
            assert!(std::ptr::eq(m.original, block.node()));
            assert_eq!(m.display_name, "Remove code block");
            assert_eq!(m.kind, MutatorKind::Block);
        }

        Ok(mutations.iter().map(|m| render(&m.replacement)).collect())
    }

    fn function(return_type: TypeRef) -> SyntaxNode {
        mk::function(return_type, "Run", [], body())
    }

    #[test]
    fn void_function_body_becomes_empty() {
        let tree = function(mk::predefined_type("void"));
        assert_eq!(mutate_first_block(&tree).unwrap(), ["{ }"]);
    }

    #[test]
    fn typed_function_body_returns_default() {
        let tree = function(mk::predefined_type("int"));
        assert_eq!(mutate_first_block(&tree).unwrap(), ["{ return default(int); }"]);
    }

    #[test]
    fn composite_return_types_use_the_same_default_construct() {
        let cases = [
            (mk::array_type(mk::predefined_type("byte")), "{ return default(byte[]); }"),
            (
                mk::generic_type("List", [mk::named_type("Order")]),
                "{ return default(List<Order>); }",
            ),
            (
                mk::nullable_type(mk::named_type("Point")),
                "{ return default(Point?); }",
            ),
        ];

        for (ty, expected) in cases {
            assert_eq!(mutate_first_block(&function(ty)).unwrap(), [expected]);
        }
    }

    #[test]
    fn getter_body_returns_property_default() {
        let tree = mk::property(mk::predefined_type("string"), "Name", [mk::getter(body())]);
        assert_eq!(mutate_first_block(&tree).unwrap(), ["{ return default(string); }"]);
    }

    #[test]
    fn setter_body_becomes_empty() {
        let tree = mk::property(mk::predefined_type("string"), "Name", [mk::setter(body())]);
        assert_eq!(mutate_first_block(&tree).unwrap(), ["{ }"]);
    }

    #[test]
    fn typed_lambda_returns_last_type_argument_default() {
        let tree = mk::variable_declaration(
            mk::generic_type("Func", [mk::predefined_type("string"), mk::predefined_type("bool")]),
            "check",
            Some(mk::lambda(
                [mk::parameter(mk::predefined_type("string"), "s")],
                body().into_syntax(),
            )),
        );

        assert_eq!(mutate_first_block(&tree).unwrap(), ["{ return default(bool); }"]);
    }

    #[test]
    fn lambda_in_field_declaration_returns_default() {
        // public Func<int> Zero = () => { ... };
        let tree = mk::field(
            Some("public"),
            mk::variable_declaration(
                mk::generic_type("Func", [mk::predefined_type("int")]),
                "Zero",
                Some(mk::lambda([], body().into_syntax())),
            ),
        );

        assert_eq!(mutate_first_block(&tree).unwrap(), ["{ return default(int); }"]);
    }

    #[test]
    fn lambda_in_local_declaration_returns_default() {
        // Func<int, string> format = (n) => { ... };
        let tree = mk::local_declaration(mk::variable_declaration(
            mk::generic_type("Func", [mk::predefined_type("int"), mk::predefined_type("string")]),
            "format",
            Some(mk::lambda(
                [mk::parameter(mk::predefined_type("int"), "n")],
                body().into_syntax(),
            )),
        ))
        .into_syntax();

        assert_eq!(mutate_first_block(&tree).unwrap(), ["{ return default(string); }"]);
    }

    #[test]
    fn lambda_nested_in_initializer_is_not_applicable() {
        // Func<int> f = Wrap(() => { ... });
        let tree = mk::variable_declaration(
            mk::generic_type("Func", [mk::predefined_type("int")]),
            "f",
            Some(mk::invocation(
                mk::identifier("Wrap"),
                [mk::lambda([], body().into_syntax())],
            )),
        );

        assert!(mutate_first_block(&tree).unwrap().is_empty());
    }

    #[test]
    fn unbound_lambda_is_not_applicable() {
        // Work(() => { ... });
        let tree = mk::invocation(
            mk::identifier("Work"),
            [mk::lambda([], body().into_syntax())],
        )
        .into_syntax();

        assert_eq!(mutate_first_block(&tree).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn lambda_bound_to_non_generic_type_is_not_applicable() {
        let tree = mk::variable_declaration(
            mk::named_type("Handler"),
            "handler",
            Some(mk::lambda([], body().into_syntax())),
        );

        assert!(mutate_first_block(&tree).unwrap().is_empty());
    }

    #[test]
    fn nested_blocks_need_no_return() {
        // int Run() { if (ready) { Work(); return result; } return 0; }
        let inner: Statement = mk::if_statement(mk::identifier("ready"), body().into(), None);
        let outer = mk::block([inner, mk::return_statement(Some(mk::numeric_literal(0)))]);
        let tree = mk::function(mk::predefined_type("int"), "Run", [], outer);

        let root = SyntaxRef::root(&tree);
        let blocks: Vec<_> = root
            .descendants()
            .into_iter()
            .filter(|n| n.kind() == SyntaxKind::Block)
            .collect();
        assert_eq!(blocks.len(), 2);

        let outer = BlockMutator.apply_mutations(&blocks[0]).unwrap();
        let inner = BlockMutator.apply_mutations(&blocks[1]).unwrap();
        assert_eq!(render(&outer[0].replacement), "{ return default(int); }");
        assert_eq!(render(&inner[0].replacement), "{ }");
    }

    #[test]
    fn root_block_and_other_kinds() {
        let tree = body().into_syntax();
        assert_eq!(mutate_first_block(&tree).unwrap(), ["{ }"]);

        let literal = mk::numeric_literal(1).into_syntax();
        let mutations = BlockMutator.apply_mutations(&SyntaxRef::root(&literal)).unwrap();
        assert!(mutations.is_empty());
    }

    #[test]
    fn repeated_application_is_deterministic() {
        let tree = function(mk::predefined_type("long"));
        let root = SyntaxRef::root(&tree);
        let block = root.children().nth(2).unwrap();

        let first = BlockMutator.apply_mutations(&block).unwrap();
        let second = BlockMutator.apply_mutations(&block).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn function_without_type_is_an_error() {
        let tree = SyntaxNode::new(SyntaxKind::FunctionDeclaration)
            .with_text("Broken")
            .with_child(body().into_syntax());

        let err = mutate_first_block(&tree).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedNode {
                kind: SyntaxKind::FunctionDeclaration,
                ..
            }
        ));
    }

    #[test]
    fn orphan_getter_is_an_error() {
        let tree = mk::getter(body());
        assert!(matches!(
            mutate_first_block(&tree),
            Err(Error::MalformedNode {
                kind: SyntaxKind::GetAccessor,
                ..
            })
        ));
    }
}
