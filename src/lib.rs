//! Mutation-injection core for syntax-tree mutation testing.
//!
//! Mutators propose [`Mutation`]s for individual nodes; the [`placer`] embeds each
//! accepted mutation next to the original code behind a guard that reads a single
//! global selector field, so one compiled program can run any of its mutants.
//!
//! ```
//! use tree_mutant::ast::AstNode;
//! use tree_mutant::factory as mk;
//! use tree_mutant::mutators::MutatorRegistry;
//! use tree_mutant::syntax::SyntaxRef;
//! use tree_mutant::{MutantId, placer, trace};
//!
//! let function = mk::function(
//!     mk::predefined_type("int"),
//!     "Answer",
//!     [],
//!     mk::block([mk::return_statement(Some(mk::numeric_literal(42)))]),
//! );
//!
//! let registry = MutatorRegistry::with_default_mutators();
//! let body = SyntaxRef::root(&function).children().nth(2).unwrap();
//! let mutation = registry.mutations_for(&body).unwrap().remove(0);
//! assert_eq!(tree_mutant::render::render(&mutation.replacement), "{ return default(int); }");
//!
//! let original = mk::block([mk::return_statement(Some(mk::numeric_literal(42)))]);
//! let mutated = tree_mutant::ast::Block::cast(mutation.replacement).unwrap();
//! let guard = placer::place_with_if_statement(original.clone(), mutated, MutantId::new(1));
//!
//! assert_eq!(placer::remove_statement_guard(guard.syntax()), Some(original.syntax()));
//! assert_eq!(trace::placed_mutants(guard.syntax()).len(), 1);
//! ```

pub mod ast;
pub mod error;
pub mod factory;
pub mod mutation;
pub mod mutators;
pub mod placer;
pub mod render;
pub mod resources;
pub mod selector;
pub mod syntax;
pub mod trace;

pub use error::{Error, Result};
pub use mutation::{MutantId, Mutation, MutatorKind};
