//! Staging area filled by the parser and finalized into a [`Problem`].

use std::collections::{BTreeMap, HashMap, btree_map, hash_map};

use ampl2omt_term::{Term, TermStore};
use contracts::*;
use tracing::{debug, info};

use crate::error::NlError;
use crate::problem::{Bounds, Objective, Problem};

/// Counts declared in the second header line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeaderCounts {
    pub n_vars: usize,
    pub n_cons: usize,
    pub n_obj: usize,
    /// Constraints with distinct finite lower and upper bounds.
    pub n_ranges: usize,
    /// Equality constraints.
    pub n_eqs: usize,
}

/// Mutable state accumulated while parsing one file.
///
/// Problem variables and defined variables share one index space but live in
/// separate registries. Everything is keyed by the index used in the file.
#[derive(Debug, Default)]
pub struct ProblemBuilder {
    header: HeaderCounts,
    problem_vars: BTreeMap<usize, Term>,
    defined_vars: HashMap<usize, Term>,
    cons_body: BTreeMap<usize, Term>,
    objectives: BTreeMap<usize, Objective>,
    var_bounds: BTreeMap<usize, Bounds>,
    cons_bounds: BTreeMap<usize, Bounds>,
}

impl ProblemBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn set_header(&mut self, header: HeaderCounts) {
        self.header = header;
    }

    #[must_use]
    pub const fn header(&self) -> HeaderCounts {
        self.header
    }

    // ---- variables ----

    /// Registers problem variable `index`.
    ///
    /// # Errors
    ///
    /// Returns [`NlError::DuplicateIndex`] if `index` is already a problem variable.
    #[ensures(self.is_problem_var(index))]
    pub fn add_problem_var(&mut self, index: usize, term: Term) -> Result<(), NlError> {
        match self.problem_vars.entry(index) {
            btree_map::Entry::Occupied(_) => Err(NlError::DuplicateIndex {
                what: "variable",
                index,
            }),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(term);
                Ok(())
            },
        }
    }

    #[must_use]
    pub fn problem_var(&self, index: usize) -> Option<Term> {
        self.problem_vars.get(&index).copied()
    }

    #[must_use]
    pub fn is_problem_var(&self, index: usize) -> bool {
        self.problem_vars.contains_key(&index)
    }

    /// Binds defined variable `index` to `term`.
    ///
    /// # Errors
    ///
    /// Returns [`NlError::DuplicateIndex`] if `index` is a problem variable or was
    /// already defined.
    #[ensures(ret.is_ok() -> self.definition(index) == Some(term))]
    pub fn add_definition(&mut self, index: usize, term: Term) -> Result<(), NlError> {
        if self.is_problem_var(index) {
            return Err(NlError::DuplicateIndex {
                what: "problem variable",
                index,
            });
        }
        match self.defined_vars.entry(index) {
            hash_map::Entry::Occupied(_) => Err(NlError::DuplicateIndex {
                what: "defined variable",
                index,
            }),
            hash_map::Entry::Vacant(slot) => {
                slot.insert(term);
                Ok(())
            },
        }
    }

    #[must_use]
    pub fn definition(&self, index: usize) -> Option<Term> {
        self.defined_vars.get(&index).copied()
    }

    /// Resolves a `v<index>` reference: problem variables first, then definitions.
    #[must_use]
    pub fn lookup(&self, index: usize) -> Option<Term> {
        self.problem_var(index).or_else(|| self.definition(index))
    }

    // ---- constraints and objectives ----

    /// Registers the body of constraint `index`.
    ///
    /// # Errors
    ///
    /// Returns [`NlError::IndexOutOfRange`] if `index` is not below the declared
    /// constraint count, or [`NlError::DuplicateIndex`] on a second body.
    #[ensures(ret.is_ok() -> self.cons_body(index) == Some(term))]
    pub fn add_cons_body(&mut self, index: usize, term: Term) -> Result<(), NlError> {
        check_index("constraint", index, self.header.n_cons)?;
        match self.cons_body.entry(index) {
            btree_map::Entry::Occupied(_) => Err(NlError::DuplicateIndex {
                what: "constraint",
                index,
            }),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(term);
                Ok(())
            },
        }
    }

    #[must_use]
    pub fn cons_body(&self, index: usize) -> Option<Term> {
        self.cons_body.get(&index).copied()
    }

    /// Registers objective `index`.
    ///
    /// # Errors
    ///
    /// Returns [`NlError::IndexOutOfRange`] if `index` is not below the declared
    /// objective count, or [`NlError::DuplicateIndex`] on a second objective.
    pub fn add_objective(&mut self, index: usize, objective: Objective) -> Result<(), NlError> {
        check_index("objective", index, self.header.n_obj)?;
        match self.objectives.entry(index) {
            btree_map::Entry::Occupied(_) => Err(NlError::DuplicateIndex {
                what: "objective",
                index,
            }),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(objective);
                Ok(())
            },
        }
    }

    #[must_use]
    pub fn objective(&self, index: usize) -> Option<&Objective> {
        self.objectives.get(&index)
    }

    // ---- bounds ----

    /// Sets the bounds of variable `index`.
    ///
    /// # Errors
    ///
    /// Returns [`NlError::IndexOutOfRange`] if `index` is not a declared variable.
    pub fn add_var_bounds(&mut self, index: usize, bounds: Bounds) -> Result<(), NlError> {
        check_index("variable", index, self.header.n_vars)?;
        self.var_bounds.insert(index, bounds);
        Ok(())
    }

    /// Sets the range of constraint `index`.
    ///
    /// # Errors
    ///
    /// Returns [`NlError::IndexOutOfRange`] if `index` is not a declared constraint.
    pub fn add_cons_bounds(&mut self, index: usize, bounds: Bounds) -> Result<(), NlError> {
        check_index("constraint", index, self.header.n_cons)?;
        self.cons_bounds.insert(index, bounds);
        Ok(())
    }

    #[must_use]
    pub const fn var_bounds(&self) -> &BTreeMap<usize, Bounds> {
        &self.var_bounds
    }

    #[must_use]
    pub const fn cons_bounds(&self) -> &BTreeMap<usize, Bounds> {
        &self.cons_bounds
    }

    // ---- finalization ----

    fn check_integrity(&self) -> Result<(), NlError> {
        let h = &self.header;
        expect_count("variables", h.n_vars, self.problem_vars.len())?;
        expect_count("constraints", h.n_cons, self.cons_body.len())?;
        expect_count("objectives", h.n_obj, self.objectives.len())?;

        let n_eqs = self.cons_bounds.values().filter(|b| b.is_equality()).count();
        let n_ranges = self.cons_bounds.values().filter(|b| b.is_range()).count();
        expect_count("equality constraints", h.n_eqs, n_eqs)?;
        expect_count("range constraints", h.n_ranges, n_ranges)?;

        if let Some(index) = (0..h.n_vars).find(|i| !self.var_bounds.contains_key(i)) {
            return Err(NlError::MissingBounds { index });
        }
        Ok(())
    }

    /// Checks the registered items against the header and builds the problem.
    ///
    /// Variable bounds (in index order) and then constraint ranges (in index
    /// order) become explicit relational constraints; see [`Bounds::synthesize`].
    ///
    /// # Errors
    ///
    /// Returns an integrity error if any count disagrees with the header or a
    /// variable has no bounds.
    pub fn finalize(self, terms: &mut TermStore) -> Result<Problem, NlError> {
        self.check_integrity()?;

        let mut constraints = Vec::new();
        for (index, bounds) in &self.var_bounds {
            let var = self.problem_var(*index).ok_or(NlError::IndexOutOfRange {
                what: "variable",
                index: *index,
                limit: self.header.n_vars,
            })?;
            constraints.extend(bounds.synthesize(terms, var));
        }
        for (index, bounds) in &self.cons_bounds {
            let body = self.cons_body(*index).ok_or(NlError::CountMismatch {
                what: "constraint bodies",
                expected: self.header.n_cons,
                actual: self.cons_body.len(),
            })?;
            constraints.extend(bounds.synthesize(terms, body));
        }

        debug!(
            "synthesized {} constraints from {} variable bounds and {} constraint ranges",
            constraints.len(),
            self.var_bounds.len(),
            self.cons_bounds.len()
        );
        info!(
            "problem finalized: {} variables, {} objectives, {} constraints",
            self.problem_vars.len(),
            self.objectives.len(),
            constraints.len()
        );

        Ok(Problem::new(
            self.problem_vars.into_values().collect(),
            self.objectives.into_values().collect(),
            constraints,
        ))
    }
}

fn check_index(what: &'static str, index: usize, limit: usize) -> Result<(), NlError> {
    if index >= limit {
        return Err(NlError::IndexOutOfRange { what, index, limit });
    }
    Ok(())
}

fn expect_count(what: &'static str, expected: usize, actual: usize) -> Result<(), NlError> {
    if expected != actual {
        return Err(NlError::CountMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}
