use std::fmt::Display;

use crate::ast::{AstNode, Block, Expression, Statement, TypeRef};
use crate::syntax::{SyntaxKind, SyntaxNode};

// Expressions.

pub fn identifier(name: impl Into<String>) -> Expression {
    Expression::new_unchecked(SyntaxNode::new(SyntaxKind::IdentifierName).with_text(name))
}

/// `target.name`, stored as `MemberAccessExpression(name) = [target]`.
pub fn member_access(target: Expression, name: impl Into<String>) -> Expression {
    Expression::new_unchecked(
        SyntaxNode::new(SyntaxKind::MemberAccessExpression)
            .with_text(name)
            .with_child(target.into_syntax()),
    )
}

pub fn numeric_literal(value: impl Display) -> Expression {
    Expression::new_unchecked(
        SyntaxNode::new(SyntaxKind::NumericLiteral).with_text(value.to_string()),
    )
}

pub fn string_literal(value: impl Into<String>) -> Expression {
    Expression::new_unchecked(SyntaxNode::new(SyntaxKind::StringLiteral).with_text(value))
}

pub fn bool_literal(value: bool) -> Expression {
    let kind = if value {
        SyntaxKind::TrueLiteral
    } else {
        SyntaxKind::FalseLiteral
    };
    Expression::new_unchecked(SyntaxNode::new(kind))
}

/// `left op right`, stored as `BinaryExpression(op) = [left, right]`.
pub fn binary(op: impl Into<String>, left: Expression, right: Expression) -> Expression {
    Expression::new_unchecked(
        SyntaxNode::new(SyntaxKind::BinaryExpression)
            .with_text(op)
            .with_child(left.into_syntax())
            .with_child(right.into_syntax()),
    )
}

pub fn prefix_unary(op: impl Into<String>, operand: Expression) -> Expression {
    Expression::new_unchecked(
        SyntaxNode::new(SyntaxKind::PrefixUnaryExpression)
            .with_text(op)
            .with_child(operand.into_syntax()),
    )
}

/// `condition ? when_true : when_false`.
pub fn conditional(condition: Expression, when_true: Expression, when_false: Expression) -> Expression {
    Expression::new_unchecked(SyntaxNode::new(SyntaxKind::ConditionalExpression).with_children([
        condition.into_syntax(),
        when_true.into_syntax(),
        when_false.into_syntax(),
    ]))
}

pub fn parenthesized(inner: Expression) -> Expression {
    Expression::new_unchecked(
        SyntaxNode::new(SyntaxKind::ParenthesizedExpression).with_child(inner.into_syntax()),
    )
}

/// The language default value of `ty`, for example `default(int)`.
pub fn default_of(ty: TypeRef) -> Expression {
    Expression::new_unchecked(
        SyntaxNode::new(SyntaxKind::DefaultExpression).with_child(ty.into_syntax()),
    )
}

pub fn invocation(callee: Expression, args: impl IntoIterator<Item = Expression>) -> Expression {
    Expression::new_unchecked(
        SyntaxNode::new(SyntaxKind::InvocationExpression)
            .with_child(callee.into_syntax())
            .with_children(args.into_iter().map(Expression::into_syntax)),
    )
}

/// `(params) => body`, stored as `LambdaExpression = [ParameterList, body]`.
///
/// `body` is either a block or an expression.
pub fn lambda(params: impl IntoIterator<Item = SyntaxNode>, body: SyntaxNode) -> Expression {
    Expression::new_unchecked(
        SyntaxNode::new(SyntaxKind::LambdaExpression)
            .with_child(parameter_list(params))
            .with_child(body),
    )
}

// Statements.

pub fn block(statements: impl IntoIterator<Item = Statement>) -> Block {
    Block::new_unchecked(
        SyntaxNode::new(SyntaxKind::Block)
            .with_children(statements.into_iter().map(Statement::into_syntax)),
    )
}

pub fn return_statement(value: Option<Expression>) -> Statement {
    Statement::new_unchecked(
        SyntaxNode::new(SyntaxKind::ReturnStatement)
            .with_children(value.map(Expression::into_syntax)),
    )
}

/// `if (condition) then else otherwise`, stored as
/// `IfStatement = [condition, then, ElseClause?]` with `ElseClause = [otherwise]`.
pub fn if_statement(condition: Expression, then: Statement, otherwise: Option<Statement>) -> Statement {
    let else_clause = otherwise.map(|stmt| {
        SyntaxNode::new(SyntaxKind::ElseClause).with_child(stmt.into_syntax())
    });

    Statement::new_unchecked(
        SyntaxNode::new(SyntaxKind::IfStatement)
            .with_child(condition.into_syntax())
            .with_child(then.into_syntax())
            .with_children(else_clause),
    )
}

pub fn expression_statement(expr: Expression) -> Statement {
    Statement::new_unchecked(
        SyntaxNode::new(SyntaxKind::ExpressionStatement).with_child(expr.into_syntax()),
    )
}

pub fn local_declaration(declaration: SyntaxNode) -> Statement {
    Statement::new_unchecked(
        SyntaxNode::new(SyntaxKind::LocalDeclarationStatement).with_child(declaration),
    )
}

pub fn while_statement(condition: Expression, body: Statement) -> Statement {
    Statement::new_unchecked(
        SyntaxNode::new(SyntaxKind::WhileStatement)
            .with_child(condition.into_syntax())
            .with_child(body.into_syntax()),
    )
}

// Types.

/// Built-in type keyword such as `int`, `bool` or `void`.
pub fn predefined_type(keyword: impl Into<String>) -> TypeRef {
    TypeRef::new_unchecked(SyntaxNode::new(SyntaxKind::PredefinedType).with_text(keyword))
}

pub fn named_type(name: impl Into<String>) -> TypeRef {
    TypeRef::new_unchecked(SyntaxNode::new(SyntaxKind::NamedType).with_text(name))
}

/// `Name<A, B>`, stored as `GenericType(name) = [A, B]`.
pub fn generic_type(name: impl Into<String>, args: impl IntoIterator<Item = TypeRef>) -> TypeRef {
    TypeRef::new_unchecked(
        SyntaxNode::new(SyntaxKind::GenericType)
            .with_text(name)
            .with_children(args.into_iter().map(TypeRef::into_syntax)),
    )
}

pub fn array_type(element: TypeRef) -> TypeRef {
    TypeRef::new_unchecked(SyntaxNode::new(SyntaxKind::ArrayType).with_child(element.into_syntax()))
}

pub fn nullable_type(inner: TypeRef) -> TypeRef {
    TypeRef::new_unchecked(SyntaxNode::new(SyntaxKind::NullableType).with_child(inner.into_syntax()))
}

// Declarations.

pub fn parameter(ty: TypeRef, name: impl Into<String>) -> SyntaxNode {
    SyntaxNode::new(SyntaxKind::Parameter)
        .with_text(name)
        .with_child(ty.into_syntax())
}

pub fn parameter_list(params: impl IntoIterator<Item = SyntaxNode>) -> SyntaxNode {
    SyntaxNode::new(SyntaxKind::ParameterList).with_children(params)
}

/// `FunctionDeclaration(name) = [return_type, ParameterList, body]`.
pub fn function(
    return_type: TypeRef,
    name: impl Into<String>,
    params: impl IntoIterator<Item = SyntaxNode>,
    body: Block,
) -> SyntaxNode {
    SyntaxNode::new(SyntaxKind::FunctionDeclaration)
        .with_text(name)
        .with_child(return_type.into_syntax())
        .with_child(parameter_list(params))
        .with_child(body.into_syntax())
}

/// `PropertyDeclaration(name) = [type, AccessorList = [accessors...]]`.
pub fn property(
    ty: TypeRef,
    name: impl Into<String>,
    accessors: impl IntoIterator<Item = SyntaxNode>,
) -> SyntaxNode {
    SyntaxNode::new(SyntaxKind::PropertyDeclaration)
        .with_text(name)
        .with_child(ty.into_syntax())
        .with_child(SyntaxNode::new(SyntaxKind::AccessorList).with_children(accessors))
}

pub fn getter(body: Block) -> SyntaxNode {
    SyntaxNode::new(SyntaxKind::GetAccessor).with_child(body.into_syntax())
}

pub fn setter(body: Block) -> SyntaxNode {
    SyntaxNode::new(SyntaxKind::SetAccessor).with_child(body.into_syntax())
}

/// `ty name = initializer`, stored as
/// `VariableDeclaration = [ty, VariableDeclarator(name) = [initializer?]]`.
pub fn variable_declaration(
    ty: TypeRef,
    name: impl Into<String>,
    initializer: Option<Expression>,
) -> SyntaxNode {
    let declarator = SyntaxNode::new(SyntaxKind::VariableDeclarator)
        .with_text(name)
        .with_children(initializer.map(Expression::into_syntax));

    SyntaxNode::new(SyntaxKind::VariableDeclaration)
        .with_child(ty.into_syntax())
        .with_child(declarator)
}

/// Field member; `modifiers` is kept verbatim (for example `public static`).
pub fn field(modifiers: Option<&str>, declaration: SyntaxNode) -> SyntaxNode {
    let node = SyntaxNode::new(SyntaxKind::FieldDeclaration).with_child(declaration);
    match modifiers {
        Some(modifiers) => node.with_text(modifiers),
        None => node,
    }
}

pub fn class(name: impl Into<String>, members: impl IntoIterator<Item = SyntaxNode>) -> SyntaxNode {
    SyntaxNode::new(SyntaxKind::ClassDeclaration)
        .with_text(name)
        .with_children(members)
}

pub fn namespace(name: impl Into<String>, members: impl IntoIterator<Item = SyntaxNode>) -> SyntaxNode {
    SyntaxNode::new(SyntaxKind::NamespaceDeclaration)
        .with_text(name)
        .with_children(members)
}

pub fn compilation_unit(members: impl IntoIterator<Item = SyntaxNode>) -> SyntaxNode {
    SyntaxNode::new(SyntaxKind::CompilationUnit).with_children(members)
}
