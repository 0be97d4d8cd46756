//! DAG traversal.

use std::collections::HashSet;

use crate::store::TermStore;
use crate::term::Term;

impl TermStore {
    /// Post-order over the DAG rooted at `root`.
    ///
    /// Children come before their parents, siblings left to right, and every
    /// node appears exactly once no matter how many parents reference it. Uses
    /// an explicit stack, so depth is bounded by memory rather than the call
    /// stack.
    #[must_use]
    pub fn post_order(&self, root: Term) -> Vec<Term> {
        let mut order = Vec::new();
        let mut done: HashSet<Term> = HashSet::new();
        // (term, children already pushed)
        let mut stack = vec![(root, false)];

        while let Some((term, expanded)) = stack.pop() {
            if done.contains(&term) {
                continue;
            }
            if expanded {
                done.insert(term);
                order.push(term);
                continue;
            }
            stack.push((term, true));
            stack.extend(
                self.children(term)
                    .iter()
                    .rev()
                    .filter(|child| !done.contains(*child))
                    .map(|child| (*child, false)),
            );
        }
        order
    }
}
