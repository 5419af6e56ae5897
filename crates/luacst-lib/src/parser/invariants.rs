//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use rowan::GreenNode;

use super::core::Parser;
use super::cst::SyntaxKind;

impl Parser<'_> {
    /// Lookahead without consuming burns fuel; `bump` and recursion changes refill it.
    #[inline]
    pub(super) fn ensure_progress(&self) {
        assert!(
            self.debug_fuel.get() != 0,
            "parser is stuck: no token consumed after too many lookaheads at offset {}",
            self.pos
        );
        self.debug_fuel.set(self.debug_fuel.get() - 1);
    }

    #[inline]
    pub(super) fn assert_current(&self, expected_kind: SyntaxKind) {
        let current_kind = self.current();
        assert_eq!(
            current_kind, expected_kind,
            "broken parser invariant: expected {:?} but found {:?} (upstream caller's responsibility)",
            expected_kind, current_kind,
        );
    }
}

#[inline]
pub(super) fn assert_lossless(green: &GreenNode, source: &str) {
    assert_eq!(
        usize::from(green.text_len()),
        source.len(),
        "broken parser invariant: tree does not cover the whole input"
    );
}
