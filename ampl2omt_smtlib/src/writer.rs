//! Problem to SMT-LIB text.

use std::collections::HashMap;

use ampl2omt_nl::{Objective, ObjectiveKind, Problem};
use ampl2omt_term::{Payload, Term, TermStore};
use itertools::Itertools;
use tracing::{debug, info};

use crate::config::WriterConfig;

const PREAMBLE: &str = "(set-logic QF_NRAT)\n(set-option :produce-models true)";
const EPILOGUE: &str = "(check-sat)\n(get-objectives)";

/// Renders problems whose terms live in one [`TermStore`].
#[derive(Debug, Clone, Copy)]
pub struct SmtlibWriter<'a> {
    terms: &'a TermStore,
    config: WriterConfig,
}

impl<'a> SmtlibWriter<'a> {
    #[must_use]
    pub const fn new(terms: &'a TermStore, config: WriterConfig) -> Self {
        Self { terms, config }
    }

    #[must_use]
    pub const fn config(&self) -> WriterConfig {
        self.config
    }

    /// The whole script: logic and options, declarations, assertions,
    /// objectives, then `check-sat` and `get-objectives`, with a blank line
    /// between sections.
    #[must_use]
    pub fn render(&self, problem: &Problem) -> String {
        info!(
            "Rendering {} variables, {} constraints, {} objectives (daggify: {})",
            problem.variables().len(),
            problem.constraints().len(),
            problem.objectives().len(),
            self.config.daggify
        );
        [
            PREAMBLE.to_string(),
            self.declare_vars(problem),
            self.declare_constraints(problem),
            self.declare_objectives(problem),
            EPILOGUE.to_string(),
        ]
        .join("\n\n")
    }

    /// One `declare-fun` per problem variable.
    #[must_use]
    pub fn declare_vars(&self, problem: &Problem) -> String {
        problem
            .variables()
            .iter()
            .map(|var| format!("(declare-fun {} () Real)", self.leaf(*var)))
            .join("\n")
    }

    #[must_use]
    pub fn declare_constraints(&self, problem: &Problem) -> String {
        problem
            .constraints()
            .iter()
            .map(|c| format!("(assert {})", self.render_term(*c, self.config.daggify)))
            .join("\n")
    }

    #[must_use]
    pub fn declare_objectives(&self, problem: &Problem) -> String {
        problem
            .objectives()
            .iter()
            .map(|objective| self.objective(objective))
            .join("\n")
    }

    fn objective(&self, objective: &Objective) -> String {
        let directive = match objective.kind {
            ObjectiveKind::Minimize => "minimize",
            ObjectiveKind::Maximize => "maximize",
        };
        format!(
            "({directive} {})",
            self.render_term(objective.term, self.config.daggify)
        )
    }

    /// Renders one term.
    ///
    /// Walks the DAG in post-order so each node is rendered once from the
    /// renderings of its children. Without `daggify`, a shared subterm is
    /// inlined at every occurrence. With it, each interior node is bound to a
    /// fresh `.def_N` in visiting order and referenced by that name afterwards.
    #[must_use]
    pub fn render_term(&self, term: Term, daggify: bool) -> String {
        let order = self.terms.post_order(term);
        let mut rendered: HashMap<Term, String> = HashMap::with_capacity(order.len());
        let mut bindings = Vec::new();

        for node in order {
            let text = if self.terms.children(node).is_empty() {
                self.leaf(node)
            } else {
                let application = self.application(node, &rendered);
                if daggify {
                    let name = format!(".def_{}", bindings.len());
                    bindings.push(format!("(let (({name} {application}))"));
                    name
                } else {
                    application
                }
            };
            rendered.insert(node, text);
        }

        let root = rendered.remove(&term).unwrap_or_default();
        if bindings.is_empty() {
            return root;
        }
        debug!("{term} rendered with {} let bindings", bindings.len());
        let closing = ")".repeat(bindings.len());
        format!("{} {root}{closing}", bindings.join(" "))
    }

    /// `(<symbol> <children>)` from already rendered children.
    fn application(&self, node: Term, rendered: &HashMap<Term, String>) -> String {
        let args = self
            .terms
            .children(node)
            .iter()
            .map(|child| rendered.get(child).map_or("", String::as_str))
            .join(" ");
        format!("({} {args})", self.terms.op(node).symbol())
    }

    fn leaf(&self, node: Term) -> String {
        match self.terms.payload(node) {
            Payload::Real(_) => self
                .terms
                .payload(node)
                .as_real()
                .map(format_real)
                .unwrap_or_default(),
            Payload::Name(name) => name.clone(),
            Payload::None => self.terms.op(node).symbol().to_string(),
        }
    }
}

/// Decimal form of a real constant, always with a fractional part.
///
/// ```
/// use ampl2omt_smtlib::format_real;
///
/// assert_eq!(format_real(2.0), "2.0");
/// assert_eq!(format_real(-1.5), "-1.5");
/// assert_eq!(format_real(1e-7), "0.0000001");
/// ```
#[must_use]
pub fn format_real(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1.0, "1.0")]
    #[case(100.0, "100.0")]
    #[case(0.1, "0.1")]
    #[case(-1.5, "-1.5")]
    #[case(0.0, "0.0")]
    #[case(1e20, "100000000000000000000.0")]
    fn reals(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_real(value), expected);
    }

    #[test]
    fn leaves_render_without_bindings() {
        let mut terms = TermStore::new();
        let x0 = terms.var("x0");
        let one = terms.real(1.0);
        let writer = SmtlibWriter::new(&terms, WriterConfig::default());
        for daggify in [false, true] {
            assert_eq!(writer.render_term(x0, daggify), "x0");
            assert_eq!(writer.render_term(one, daggify), "1.0");
        }
    }

    #[test]
    fn definitions_restart_per_term() {
        let mut terms = TermStore::new();
        let x0 = terms.var("x0");
        let x1 = terms.var("x1");
        let a = terms.plus(x0, x1);
        let b = terms.mult(x0, x1);
        let writer = SmtlibWriter::new(&terms, WriterConfig::new(true));
        assert_eq!(writer.render_term(a, true), "(let ((.def_0 (+ x0 x1))) .def_0)");
        assert_eq!(writer.render_term(b, true), "(let ((.def_0 (* x0 x1))) .def_0)");
    }
}
