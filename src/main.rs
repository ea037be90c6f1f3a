mod cli;
mod input;
mod options;
mod out;
mod report;
mod rewrite;
mod ui;

/// Entry point for the `tree-mutant` binary.
fn main() -> anyhow::Result<()> {
    cli::run()
}
