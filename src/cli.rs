use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use tree_mutant::mutators::MutatorRegistry;
use tree_mutant::render::render;
use tree_mutant::{MutantId, placer, trace};

use crate::input::TreeFile;
use crate::options::Options;
use crate::out::write_place_outputs;
use crate::report::{PlaceReport, format_candidate};
use crate::rewrite::{place_all, scan};
use crate::ui::Ui;

/// Top-level CLI arguments for the `tree-mutant` binary.
#[derive(Debug, Parser)]
#[command(
    name = "tree-mutant",
    version,
    about = "Compile-once mutant placement for syntax trees"
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands supported by `tree-mutant`.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the active-mutation helper declaration.
    Helper {
        /// Emit the helper tree as JSON to stdout.
        #[arg(long)]
        json: bool,
    },

    /// List candidate mutations without placing them.
    Scan {
        /// Serialized syntax tree (JSON).
        #[arg(long)]
        input: PathBuf,

        /// Emit the candidates as JSON to stdout.
        #[arg(long)]
        json: bool,
    },

    /// Place every candidate mutation behind a guard.
    Place {
        /// Serialized syntax tree (JSON).
        #[arg(long)]
        input: PathBuf,

        /// Id given to the first placed mutant (at most 2147483647, the selector's range).
        #[arg(
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MutantId::MAX.get()))
        )]
        first_id: u32,

        /// Write mutated.json, mutants.json, helper.json and log into this directory.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Emit a machine-readable JSON report to stdout.
        #[arg(long)]
        json: bool,
    },

    /// Remove every guard, restoring the original tree.
    Strip {
        /// Serialized syntax tree (JSON).
        #[arg(long)]
        input: PathBuf,

        /// Emit the stripped tree as JSON to stdout.
        #[arg(long)]
        json: bool,
    },
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize json")?;
    println!("{json}");
    Ok(())
}

/// Logs go to stderr and are filtered by `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parse CLI arguments and dispatch the selected command.
pub fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Helper { json } => {
            let helper = placer::active_mutant_selector_helper()?;

            if json {
                return print_json(helper);
            }
            Ui::new(false).line(render(helper));
            Ok(())
        }

        Command::Scan { input, json } => {
            let ui = Ui::new(json);
            let tree = load(&ui, TreeFile::new(input))?;
            let candidates = scan(&tree, &MutatorRegistry::with_default_mutators())?;

            if json {
                return print_json(&candidates);
            }

            ui.title("tree-mutant: scan");
            for candidate in &candidates {
                ui.line(format_candidate(candidate));
            }
            ui.line(format!("found {} candidate mutations", candidates.len()));
            Ok(())
        }

        Command::Place {
            input,
            first_id,
            out,
            json,
        } => {
            let mut options = Options::new(input);
            options.first_id = MutantId::new(first_id);
            options.out_dir = out;
            options.json_output = json;

            run_place(&options)
        }

        Command::Strip { input, json } => {
            let ui = Ui::new(json);
            let tree = load(&ui, TreeFile::new(input))?;

            let placed = trace::placed_mutants(&tree).len();
            let stripped = trace::strip_mutations(&tree);

            if json {
                return print_json(&stripped);
            }

            ui.title("tree-mutant: strip");
            ui.line(format!("removed {placed} guards"));
            ui.line(render(&stripped));
            Ok(())
        }
    }
}

fn load(ui: &Ui, file: TreeFile) -> Result<tree_mutant::syntax::SyntaxNode> {
    file.read_tree().inspect_err(|e| {
        ui.error(format!("failed to load {:?}: {e:#}", file.path()));
    })
}

fn run_place(options: &Options) -> Result<()> {
    let json = options.json_output;
    let mut ui = Ui::new(json);

    ui.title("tree-mutant: place");
    ui.line(format!("input: {:?}", options.input));

    let tree = load(&ui, TreeFile::new(options.input.clone()))?;

    if !trace::placed_mutants(&tree).is_empty() {
        ui.warn("input already contains placed mutants; new ids may collide");
    }

    let registry = MutatorRegistry::with_default_mutators();
    let rewrite = place_all(&tree, &registry, options.first_id)?;
    let report = PlaceReport::new(options.input.clone(), options.first_id, &rewrite);

    for m in report.mutants {
        ui.placed_mutant(m);
    }

    match report.id_range() {
        Some((first, last)) => ui.line(format!("placed {} mutants (#{first}..#{last})", report.mutants.len())),
        None => ui.line("no mutation candidates found"),
    }

    let (statements, expressions) = ui.guard_counts();
    ui.line(format!("guards: {statements} if, {expressions} conditional"));

    if let Some(out_dir) = &options.out_dir {
        let helper = placer::active_mutant_selector_helper()?;
        write_place_outputs(out_dir, &report, helper)?;
        ui.line(format!("wrote outputs to {:?}", out_dir));
    }

    if json {
        return print_json(&report);
    }

    Ok(())
}
