use serde::{Deserialize, Serialize};

/// Grammatical kind of a [`SyntaxNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SyntaxKind {
    // Declarations.
    CompilationUnit,
    NamespaceDeclaration,
    ClassDeclaration,
    FieldDeclaration,
    FunctionDeclaration,
    ParameterList,
    Parameter,
    PropertyDeclaration,
    AccessorList,
    GetAccessor,
    SetAccessor,
    VariableDeclaration,
    VariableDeclarator,

    // Statements.
    Block,
    ReturnStatement,
    IfStatement,
    ElseClause,
    ExpressionStatement,
    LocalDeclarationStatement,
    WhileStatement,

    // Expressions.
    IdentifierName,
    MemberAccessExpression,
    NumericLiteral,
    StringLiteral,
    TrueLiteral,
    FalseLiteral,
    NullLiteral,
    BinaryExpression,
    PrefixUnaryExpression,
    ConditionalExpression,
    ParenthesizedExpression,
    DefaultExpression,
    InvocationExpression,
    LambdaExpression,

    // Types.
    PredefinedType,
    NamedType,
    GenericType,
    ArrayType,
    NullableType,
}

impl SyntaxKind {
    /// Kinds that may appear wherever a statement is expected.
    ///
    /// `ElseClause` is not a statement on its own; it only exists as the third
    /// child of an `IfStatement`.
    pub fn is_statement(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            Block
                | ReturnStatement
                | IfStatement
                | ExpressionStatement
                | LocalDeclarationStatement
                | WhileStatement
        )
    }

    pub fn is_expression(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            IdentifierName
                | MemberAccessExpression
                | NumericLiteral
                | StringLiteral
                | TrueLiteral
                | FalseLiteral
                | NullLiteral
                | BinaryExpression
                | PrefixUnaryExpression
                | ConditionalExpression
                | ParenthesizedExpression
                | DefaultExpression
                | InvocationExpression
                | LambdaExpression
        )
    }

    pub fn is_type(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            PredefinedType | NamedType | GenericType | ArrayType | NullableType
        )
    }
}

/// Out-of-band metadata attached to a node.
///
/// Annotations never change the grammatical meaning of a node. They are part of
/// the node value, so clones, rebuilt parents and serialized trees keep them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    /// Annotation family, for example `MutationIf`.
    pub kind: String,

    /// Optional payload, for example a mutant id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl Annotation {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            data: None,
        }
    }

    pub fn with_data(kind: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            data: Some(data.into()),
        }
    }
}

/// Immutable, owned syntax tree node.
///
/// `text` holds whatever token text the kind needs: a declared name, an operator,
/// literal text or a type keyword. Child order per kind is fixed by the
/// constructors in [`crate::factory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxNode {
    kind: SyntaxKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<SyntaxNode>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    annotations: Vec<Annotation>,
}

impl SyntaxNode {
    pub fn new(kind: SyntaxKind) -> Self {
        Self {
            kind,
            text: None,
            children: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: SyntaxNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = SyntaxNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Build a copy of this node (kind, text, annotations) over new children.
    pub fn rebuild(&self, children: Vec<SyntaxNode>) -> Self {
        Self {
            kind: self.kind,
            text: self.text.clone(),
            children,
            annotations: self.annotations.clone(),
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&SyntaxNode> {
        self.children.get(index)
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// First annotation of the given family.
    pub fn annotation(&self, kind: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.kind == kind)
    }

    pub fn has_annotation(&self, kind: &str) -> bool {
        self.annotation(kind).is_some()
    }

    /// First child that is a type node (declared type of a declaration).
    pub fn type_child(&self) -> Option<&SyntaxNode> {
        self.children.iter().find(|c| c.kind.is_type())
    }
}

/// Borrowed cursor over a tree: a node plus the chain of its ancestors.
///
/// Nodes do not store parent links, so context queries go through this cursor.
#[derive(Debug, Clone)]
pub struct SyntaxRef<'a> {
    node: &'a SyntaxNode,
    ancestors: Vec<&'a SyntaxNode>,
}

impl<'a> SyntaxRef<'a> {
    /// Cursor positioned at a tree root.
    pub fn root(node: &'a SyntaxNode) -> Self {
        Self {
            node,
            ancestors: Vec::new(),
        }
    }

    pub fn node(&self) -> &'a SyntaxNode {
        self.node
    }

    pub fn kind(&self) -> SyntaxKind {
        self.node.kind()
    }

    pub fn parent(&self) -> Option<SyntaxRef<'a>> {
        let mut ancestors = self.ancestors.clone();
        let node = ancestors.pop()?;
        Some(SyntaxRef { node, ancestors })
    }

    pub fn children(&self) -> impl Iterator<Item = SyntaxRef<'a>> + '_ {
        self.node.children().iter().map(move |child| {
            let mut ancestors = self.ancestors.clone();
            ancestors.push(self.node);
            SyntaxRef {
                node: child,
                ancestors,
            }
        })
    }

    /// Ancestors from the direct parent up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = &'a SyntaxNode> + '_ {
        self.ancestors.iter().rev().copied()
    }

    /// This node and all of its descendants, in preorder.
    pub fn descendants(&self) -> Vec<SyntaxRef<'a>> {
        let mut out = vec![self.clone()];
        for child in self.children() {
            out.extend(child.descendants());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SyntaxNode {
        SyntaxNode::new(SyntaxKind::Block).with_child(
            SyntaxNode::new(SyntaxKind::ReturnStatement)
                .with_child(SyntaxNode::new(SyntaxKind::NumericLiteral).with_text("1")),
        )
    }

    #[test]
    fn kind_classification_is_disjoint() {
        for kind in [
            SyntaxKind::Block,
            SyntaxKind::IfStatement,
            SyntaxKind::BinaryExpression,
            SyntaxKind::GenericType,
            SyntaxKind::ElseClause,
        ] {
            let classes = [kind.is_statement(), kind.is_expression(), kind.is_type()];
            assert!(classes.iter().filter(|c| **c).count() <= 1, "{kind:?}");
        }
        assert!(!SyntaxKind::ElseClause.is_statement());
    }

    #[test]
    fn cursor_walks_up_to_the_root() {
        let tree = sample();
        let root = SyntaxRef::root(&tree);
        let literal = root.descendants().pop().expect("literal");

        assert_eq!(literal.kind(), SyntaxKind::NumericLiteral);
        let parent = literal.parent().expect("return statement");
        assert_eq!(parent.kind(), SyntaxKind::ReturnStatement);
        assert_eq!(parent.parent().unwrap().kind(), SyntaxKind::Block);
        assert!(root.parent().is_none());

        let kinds: Vec<_> = literal.ancestors().map(|n| n.kind()).collect();
        assert_eq!(kinds, [SyntaxKind::ReturnStatement, SyntaxKind::Block]);
    }

    #[test]
    fn annotations_survive_clone_and_rebuild() {
        let node = sample().with_annotation(Annotation::with_data("MutationIf", "7"));
        let copy = node.clone();
        let rebuilt = node.rebuild(Vec::new());

        assert_eq!(copy.annotation("MutationIf"), node.annotation("MutationIf"));
        assert_eq!(
            rebuilt.annotation("MutationIf").and_then(|a| a.data.as_deref()),
            Some("7")
        );
        assert!(rebuilt.children().is_empty());
    }

    #[test]
    fn deserializes_compact_json() {
        let json = r#"{"kind":"Block","children":[{"kind":"ReturnStatement"}]}"#;
        let node: SyntaxNode = serde_json::from_str(json).unwrap();

        assert_eq!(node.kind(), SyntaxKind::Block);
        assert_eq!(node.children()[0].kind(), SyntaxKind::ReturnStatement);
        assert!(node.annotations().is_empty());
    }
}
