use std::path::PathBuf;

use serde::Serialize;
use tree_mutant::MutantId;
use tree_mutant::render::render;
use tree_mutant::syntax::SyntaxNode;

use crate::rewrite::{Candidate, PlacedMutant, Rewrite};

/// Machine-readable report for a `place` run.
///
/// In `--json` mode we print this to stdout as pretty JSON.
#[derive(Debug, Serialize)]
pub struct PlaceReport<'a> {
    /// Tool name, stable across versions.
    pub tool: &'static str,

    /// Current crate version.
    pub version: &'static str,

    /// The tree file that was rewritten.
    pub input: PathBuf,

    /// Id of the first placed mutant.
    pub first_id: MutantId,

    /// Placed mutants, ordered by id.
    pub mutants: &'a [PlacedMutant],

    /// The rewritten tree.
    pub tree: &'a SyntaxNode,
}

impl<'a> PlaceReport<'a> {
    pub fn new(input: PathBuf, first_id: MutantId, rewrite: &'a Rewrite) -> Self {
        Self {
            tool: "tree-mutant",
            version: env!("CARGO_PKG_VERSION"),
            input,
            first_id,
            mutants: &rewrite.mutants,
            tree: &rewrite.tree,
        }
    }

    /// Id range covered by this run, if anything was placed.
    pub fn id_range(&self) -> Option<(MutantId, MutantId)> {
        Some((self.mutants.first()?.id, self.mutants.last()?.id))
    }
}

/// Format one candidate mutation as a single, readable line.
pub fn format_candidate(c: &Candidate<'_>) -> String {
    format!(
        "#{index} {kind:?}/{name}: {orig} -> {mutated}",
        index = c.index,
        kind = c.mutation.kind,
        name = c.mutation.display_name,
        orig = render(c.mutation.original),
        mutated = render(&c.mutation.replacement),
    )
}

/// Format one placed mutant as a single, readable line.
pub fn format_placed(m: &PlacedMutant) -> String {
    format!(
        "#{id} {guard} {kind:?}/{name}: {orig} -> {mutated}",
        id = m.id,
        guard = m.guard.as_str(),
        kind = m.kind,
        name = m.display_name,
        orig = m.original,
        mutated = m.replacement,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_mutant::ast::AstNode;
    use tree_mutant::factory as mk;
    use tree_mutant::mutators::MutatorRegistry;
    use tree_mutant::placer::GuardKind;
    use tree_mutant::MutatorKind;

    use crate::rewrite::{place_all, scan};

    fn comparison() -> SyntaxNode {
        mk::binary("==", mk::identifier("a"), mk::identifier("b")).into_syntax()
    }

    #[test]
    fn candidate_line_shows_both_variants() {
        let tree = comparison();
        let candidates = scan(&tree, &MutatorRegistry::with_default_mutators()).unwrap();

        insta::assert_snapshot!(
            format_candidate(&candidates[0]),
            @"#1 Condition/eq_to_neq: == -> !=: a == b -> a != b"
        );
    }

    #[test]
    fn placed_line_names_the_guard() {
        let m = PlacedMutant {
            id: MutantId::new(7),
            guard: GuardKind::MutationIf,
            kind: MutatorKind::Block,
            display_name: "Remove code block".to_string(),
            original: "{ Work(); }".to_string(),
            replacement: "{ }".to_string(),
        };

        insta::assert_snapshot!(
            format_placed(&m),
            @"#7 MutationIf Block/Remove code block: { Work(); } -> { }"
        );
    }

    #[test]
    fn id_range_spans_placed_mutants() {
        let tree = comparison();
        let registry = MutatorRegistry::with_default_mutators();

        let rewrite = place_all(&tree, &registry, MutantId::new(5)).unwrap();
        let report = PlaceReport::new(PathBuf::from("tree.json"), MutantId::new(5), &rewrite);
        assert_eq!(report.id_range(), Some((MutantId::new(5), MutantId::new(5))));

        let empty = place_all(&mk::identifier("a").into_syntax(), &registry, MutantId::new(1)).unwrap();
        let report = PlaceReport::new(PathBuf::from("tree.json"), MutantId::new(1), &empty);
        assert_eq!(report.id_range(), None);
    }
}
