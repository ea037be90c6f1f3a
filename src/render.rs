use crate::syntax::{SyntaxKind, SyntaxNode};

pub fn render(node: &SyntaxNode) -> String {
    use SyntaxKind::*;

    let text = node.text().unwrap_or("");
    let child = |i: usize| node.child(i).map(render).unwrap_or_default();
    let joined = |sep: &str| {
        node.children()
            .iter()
            .map(render)
            .collect::<Vec<_>>()
            .join(sep)
    };

    match node.kind() {
        CompilationUnit => joined(" "),
        NamespaceDeclaration => format!("namespace {text} {}", braced(node.children())),
        ClassDeclaration => format!("class {text} {}", braced(node.children())),
        FieldDeclaration => match node.text() {
            Some(modifiers) => format!("{modifiers} {};", child(0)),
            None => format!("{};", child(0)),
        },
        FunctionDeclaration => format!("{} {text}{} {}", child(0), child(1), child(2)),
        ParameterList => format!("({})", joined(", ")),
        Parameter => format!("{} {text}", child(0)),
        PropertyDeclaration => format!("{} {text} {}", child(0), child(1)),
        AccessorList | Block => braced(node.children()),
        GetAccessor => format!("get {}", child(0)),
        SetAccessor => format!("set {}", child(0)),
        VariableDeclaration => {
            let declarators: Vec<_> = node.children().iter().skip(1).map(render).collect();
            format!("{} {}", child(0), declarators.join(", "))
        }
        VariableDeclarator => match node.child(0) {
            Some(init) => format!("{text} = {}", render(init)),
            None => text.to_string(),
        },

        ReturnStatement => match node.child(0) {
            Some(value) => format!("return {};", render(value)),
            None => "return;".to_string(),
        },
        IfStatement => match node.child(2) {
            Some(else_clause) => format!("if ({}) {} {}", child(0), child(1), render(else_clause)),
            None => format!("if ({}) {}", child(0), child(1)),
        },
        ElseClause => format!("else {}", child(0)),
        ExpressionStatement | LocalDeclarationStatement => format!("{};", child(0)),
        WhileStatement => format!("while ({}) {}", child(0), child(1)),

        IdentifierName | NumericLiteral | PredefinedType | NamedType => text.to_string(),
        StringLiteral => format!("{text:?}"),
        TrueLiteral => "true".to_string(),
        FalseLiteral => "false".to_string(),
        NullLiteral => "null".to_string(),
        MemberAccessExpression => format!("{}.{text}", operand(node, 0)),
        BinaryExpression => format!("{} {text} {}", operand(node, 0), operand(node, 1)),
        PrefixUnaryExpression => format!("{text}{}", operand(node, 0)),
        ConditionalExpression => format!("{} ? {} : {}", child(0), child(1), child(2)),
        ParenthesizedExpression => format!("({})", child(0)),
        DefaultExpression => format!("default({})", child(0)),
        InvocationExpression => {
            let args: Vec<_> = node.children().iter().skip(1).map(render).collect();
            format!("{}({})", child(0), args.join(", "))
        }
        LambdaExpression => format!("{} => {}", child(0), child(1)),

        GenericType => format!("{text}<{}>", joined(", ")),
        ArrayType => format!("{}[]", child(0)),
        NullableType => format!("{}?", child(0)),
    }
}

/// Operand of an operator; a conditional there needs parentheses to read unambiguously.
fn operand(node: &SyntaxNode, index: usize) -> String {
    match node.child(index) {
        Some(c) if c.kind() == SyntaxKind::ConditionalExpression => format!("({})", render(c)),
        Some(c) => render(c),
        None => String::new(),
    }
}

fn braced(items: &[SyntaxNode]) -> String {
    if items.is_empty() {
        return "{ }".to_string();
    }

    let inner: Vec<_> = items.iter().map(render).collect();
    format!("{{ {} }}", inner.join(" "))
}
