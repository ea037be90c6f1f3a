use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tree_mutant::syntax::SyntaxNode;

/// Serialized syntax tree on disk.
#[derive(Debug, Clone)]
pub struct TreeFile {
    path: PathBuf,
}

impl TreeFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and deserialize the tree.
    pub fn read_tree(&self) -> Result<SyntaxNode> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read syntax tree {:?}", self.path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("{:?} is not a serialized syntax tree", self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_mutant::syntax::SyntaxKind;

    #[test]
    fn reads_fixture_tree() {
        let tree = TreeFile::new("tests/fixtures/calculator.json")
            .read_tree()
            .expect("fixture should load");

        assert_eq!(tree.kind(), SyntaxKind::CompilationUnit);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = TreeFile::new("tests/fixtures/missing.json")
            .read_tree()
            .unwrap_err();

        assert!(format!("{err:#}").contains("missing.json"));
    }
}
