use console::{Term, style};
use std::{env, fmt::Display};

use tree_mutant::placer::GuardKind;

use crate::report::format_placed;
use crate::rewrite::PlacedMutant;

/// Small UI helper:
/// - normal mode: human output to stdout, errors to stderr
/// - `--json` mode: ALL human output to stderr (stdout stays machine-readable JSON)
/// - fancy styling only on a real TTY and when NO_COLOR/CI are not set
#[derive(Debug, Clone)]
pub struct Ui {
    out: Term,
    err: Term,
    fancy: bool,
    enabled: bool,

    // Guards reported so far, per kind. These do not affect output formatting.
    statement_guards: u64,
    expression_guards: u64,
}

impl Ui {
    pub fn new(json: bool) -> Self {
        // In --json mode, keep stdout clean for JSON and send all human output to stderr.
        let out = if json { Term::stderr() } else { Term::stdout() };
        let err = Term::stderr();

        let no_color = env::var_os("NO_COLOR").is_some();
        let in_ci = env::var_os("CI").is_some();

        let fancy = out.is_term() && !no_color && !in_ci;

        Self {
            out,
            err,
            fancy,
            enabled: true,
            statement_guards: 0,
            expression_guards: 0,
        }
    }

    #[cfg(test)]
    pub fn silent() -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            fancy: false,
            enabled: false,
            statement_guards: 0,
            expression_guards: 0,
        }
    }

    fn write_out(&self, s: &str) {
        if self.enabled {
            let _ = self.out.write_line(s);
        }
    }

    fn write_err(&self, s: &str) {
        if self.enabled {
            let _ = self.err.write_line(s);
        }
    }

    pub fn line(&self, msg: impl Display) {
        self.write_out(&msg.to_string());
    }

    pub fn title(&self, msg: impl Display) {
        let s = msg.to_string();
        if self.fancy {
            self.write_out(&style(s).bold().to_string());
        } else {
            self.write_out(&s);
        }
    }

    pub fn warn(&self, msg: impl Display) {
        let s = msg.to_string();
        if self.fancy {
            self.write_err(&style(s).yellow().to_string());
        } else {
            self.write_err(&s);
        }
    }

    pub fn error(&self, msg: impl Display) {
        let s = msg.to_string();
        if self.fancy {
            self.write_err(&style(s).red().bold().to_string());
        } else {
            self.write_err(&s);
        }
    }

    /// One line per placed mutant.
    ///
    /// Non-fancy output is the plain [`format_placed`] line, so CLI tests stay stable.
    pub fn placed_mutant(&mut self, m: &PlacedMutant) {
        match m.guard {
            GuardKind::MutationIf => self.statement_guards = self.statement_guards.saturating_add(1),
            GuardKind::MutationConditional => {
                self.expression_guards = self.expression_guards.saturating_add(1)
            }
        }

        if !self.fancy {
            self.line(format_placed(m));
            return;
        }

        let tag = match m.guard {
            GuardKind::MutationIf => style("IF  ").cyan().bold(),
            GuardKind::MutationConditional => style("?:  ").magenta().bold(),
        };

        self.line(format!(
            "{tag} #{id} {kind:?}/{name}: {orig} -> {mutated}",
            id = m.id,
            kind = m.kind,
            name = style(&m.display_name).bold(),
            orig = style(&m.original).dim(),
            mutated = m.replacement,
        ));
    }

    /// Guards reported so far as `(statement, expression)`.
    pub fn guard_counts(&self) -> (u64, u64) {
        (self.statement_guards, self.expression_guards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_mutant::{MutantId, MutatorKind};

    fn placed(id: u32, guard: GuardKind) -> PlacedMutant {
        PlacedMutant {
            id: MutantId::new(id),
            guard,
            kind: MutatorKind::Condition,
            display_name: "gt_to_le: > -> <=".to_string(),
            original: "a > b".to_string(),
            replacement: "a <= b".to_string(),
        }
    }

    #[test]
    fn placed_mutant_counts_guards_by_kind() {
        let mut ui = Ui::silent();
        assert_eq!(ui.guard_counts(), (0, 0));

        ui.placed_mutant(&placed(1, GuardKind::MutationConditional));
        ui.placed_mutant(&placed(2, GuardKind::MutationIf));
        ui.placed_mutant(&placed(3, GuardKind::MutationConditional));

        assert_eq!(ui.guard_counts(), (1, 2));
    }
}
