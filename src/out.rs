use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tree_mutant::syntax::SyntaxNode;

use crate::report::PlaceReport;

/// Write every artifact of a `place` run into `out_dir`:
/// - mutated.json (rewritten tree)
/// - mutants.json (placed mutants)
/// - helper.json  (active-mutation helper declaration)
/// - log          (stable summary, no timestamps)
pub fn write_place_outputs(out_dir: &Path, report: &PlaceReport<'_>, helper: &SyntaxNode) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("failed to create out dir {:?}", out_dir))?;

    write_pretty_json(&out_dir.join("mutated.json"), report.tree)?;
    write_pretty_json(&out_dir.join("mutants.json"), report.mutants)?;
    write_pretty_json(&out_dir.join("helper.json"), helper)?;
    write_log(out_dir, report)
}

/// Write a stable `log` file with the run summary.
pub fn write_log(out_dir: &Path, report: &PlaceReport<'_>) -> Result<()> {
    let path = out_dir.join("log");

    let mut lines = Vec::new();
    lines.push(format!("tool: {}", report.tool));
    lines.push(format!("version: {}", report.version));
    lines.push(format!("input: {}", report.input.display()));
    lines.push(format!("first_id: {}", report.first_id));
    lines.push(format!("placed: {}", report.mutants.len()));
    for m in report.mutants {
        lines.push(format!("mutant {}: {} {:?} {}", m.id, m.guard.as_str(), m.kind, m.display_name));
    }

    let content = lines.join("\n") + "\n";
    fs::write(&path, content).with_context(|| format!("failed to write {:?}", path))?;
    Ok(())
}

// `?Sized` allows passing unsized values such as slices (e.g. `&[PlacedMutant]`).
pub fn write_pretty_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize json")?;
    fs::write(path, json).with_context(|| format!("failed to write {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tree_mutant::MutantId;
    use tree_mutant::mutators::MutatorRegistry;
    use tree_mutant::placer;

    use crate::input::TreeFile;
    use crate::rewrite::place_all;

    #[test]
    fn writes_all_artifacts() {
        let tree = TreeFile::new("tests/fixtures/calculator.json").read_tree().unwrap();
        let rewrite =
            place_all(&tree, &MutatorRegistry::with_default_mutators(), MutantId::new(1)).unwrap();
        let report = PlaceReport::new(PathBuf::from("calculator.json"), MutantId::new(1), &rewrite);
        let helper = placer::active_mutant_selector_helper().unwrap();

        let temp = tempfile::TempDir::new().unwrap();
        write_place_outputs(temp.path(), &report, helper).unwrap();

        let mutated: SyntaxNode =
            serde_json::from_str(&fs::read_to_string(temp.path().join("mutated.json")).unwrap())
                .unwrap();
        assert_eq!(mutated, rewrite.tree);

        let log = fs::read_to_string(temp.path().join("log")).unwrap();
        assert!(log.starts_with("tool: tree-mutant\n"));
        assert!(log.contains(&format!("placed: {}\n", rewrite.mutants.len())));
        assert!(temp.path().join("helper.json").exists());
        assert!(temp.path().join("mutants.json").exists());
    }
}
