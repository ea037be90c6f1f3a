use std::path::PathBuf;

use tree_mutant::MutantId;

/// Configuration for a `place` run, derived from the CLI.
#[derive(Debug, Clone)]
pub struct Options {
    /// Serialized syntax tree to rewrite.
    pub input: PathBuf,

    /// Id of the first placed mutant.
    pub first_id: MutantId,

    /// Directory receiving the rewritten tree and reports.
    pub out_dir: Option<PathBuf>,

    /// When true, emit JSON output instead of human-readable summary.
    pub json_output: bool,
}

impl Options {
    /// Construct an `Options` instance with default values.
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            first_id: MutantId::new(1),
            out_dir: None,
            json_output: false,
        }
    }
}
