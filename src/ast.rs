use crate::syntax::{SyntaxKind, SyntaxNode};

/// A syntax node viewed as a member of one grammatical class.
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;

    fn cast(node: SyntaxNode) -> Option<Self>;

    fn syntax(&self) -> &SyntaxNode;

    fn into_syntax(self) -> SyntaxNode;
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, |$kind:ident| $can_cast:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(SyntaxNode);

        impl $name {
            /// Wrap a node whose class the caller has already established.
            pub(crate) fn new_unchecked(node: SyntaxNode) -> Self {
                debug_assert!(
                    <Self as AstNode>::can_cast(node.kind()),
                    "{:?} is not a valid {}",
                    node.kind(),
                    stringify!($name)
                );
                Self(node)
            }
        }

        impl AstNode for $name {
            fn can_cast($kind: SyntaxKind) -> bool {
                $can_cast
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                Self::can_cast(node.kind()).then(|| Self(node))
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }

            fn into_syntax(self) -> SyntaxNode {
                self.0
            }
        }
    };
}

ast_node!(
    /// `{ ... }` statement block.
    Block,
    |kind| kind == SyntaxKind::Block
);

ast_node!(
    /// Any node valid in statement position, blocks included.
    Statement,
    |kind| kind.is_statement()
);

ast_node!(
    /// Any node valid in expression position.
    Expression,
    |kind| kind.is_expression()
);

ast_node!(TypeRef, |kind| kind.is_type());

impl Block {
    pub fn statements(&self) -> &[SyntaxNode] {
        self.0.children()
    }

    pub fn is_empty(&self) -> bool {
        self.0.children().is_empty()
    }
}

impl From<Block> for Statement {
    fn from(block: Block) -> Self {
        Statement(block.0)
    }
}

impl Statement {
    /// Narrow to a [`Block`] when this statement is one.
    pub fn into_block(self) -> Result<Block, Statement> {
        if self.0.kind() == SyntaxKind::Block {
            Ok(Block(self.0))
        } else {
            Err(self)
        }
    }
}

impl TypeRef {
    /// `void` and nothing else denotes "no value".
    pub fn is_void(&self) -> bool {
        self.0.kind() == SyntaxKind::PredefinedType && self.0.text() == Some("void")
    }
}
