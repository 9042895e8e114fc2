//! Core types for alignment parameters and results.

use crate::symbol::Symbol;
use velella_core::{Result, VelellaError};

/// Gap and search parameters for a global alignment.
///
/// Both penalties are non-negative costs: opening a gap costs `gap_open`,
/// each further extension costs an additional `gap_extend`. `window` bounds
/// how far the gap search looks ahead; `0` means unbounded, which restores
/// full Needleman-Wunsch behaviour.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignParams {
    pub gap_open: i32,
    pub gap_extend: i32,
    pub window: usize,
}

impl AlignParams {
    /// Create alignment parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if either penalty is negative.
    pub fn new(gap_open: i32, gap_extend: i32, window: usize) -> Result<Self> {
        if gap_open < 0 {
            return Err(VelellaError::InvalidInput(
                "gap_open must be non-negative".into(),
            ));
        }
        if gap_extend < 0 {
            return Err(VelellaError::InvalidInput(
                "gap_extend must be non-negative".into(),
            ));
        }
        Ok(Self {
            gap_open,
            gap_extend,
            window,
        })
    }
}

impl Default for AlignParams {
    /// Open 10, extend 1, unbounded window.
    fn default() -> Self {
        Self {
            gap_open: 10,
            gap_extend: 1,
            window: 0,
        }
    }
}

/// The result of a pairwise global alignment.
///
/// The two aligned sequences have equal length and carry [`Symbol::GAP`]
/// markers at positions where the other input was consumed. Removing the gap
/// markers from `aligned1` reproduces the first input in order, and likewise
/// for `aligned2`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alignment<S> {
    /// Score stored at the alignment's starting cell.
    pub score: i32,
    /// First sequence with gap markers inserted.
    pub aligned1: Vec<S>,
    /// Second sequence with gap markers inserted.
    pub aligned2: Vec<S>,
}

impl<S: Symbol> Alignment<S> {
    /// Number of alignment columns. At most `len1 + len2`.
    pub fn len(&self) -> usize {
        self.aligned1.len()
    }

    /// Whether the alignment has no columns.
    pub fn is_empty(&self) -> bool {
        self.aligned1.is_empty()
    }

    /// Number of columns where both symbols are present and equal.
    pub fn matches(&self) -> usize {
        self.aligned1
            .iter()
            .zip(&self.aligned2)
            .filter(|(a, b)| a == b && **a != S::GAP)
            .count()
    }

    /// Number of gap columns across both sequences.
    pub fn gaps(&self) -> usize {
        self.aligned1
            .iter()
            .zip(&self.aligned2)
            .filter(|(a, b)| **a == S::GAP || **b == S::GAP)
            .count()
    }

    /// Fraction of columns that are exact matches, in `[0.0, 1.0]`.
    ///
    /// Returns 0.0 for an empty alignment.
    pub fn identity_fraction(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.matches() as f64 / self.len() as f64
    }

    /// The two sequences with gap markers removed.
    pub fn strip_gaps(&self) -> (Vec<S>, Vec<S>) {
        let strip = |seq: &[S]| seq.iter().copied().filter(|s| *s != S::GAP).collect();
        (strip(&self.aligned1), strip(&self.aligned2))
    }
}

impl<S: Symbol> velella_core::Scored for Alignment<S> {
    fn score(&self) -> f64 {
        self.score as f64
    }
}

impl<S: Symbol> velella_core::Summarizable for Alignment<S> {
    fn summary(&self) -> String {
        format!(
            "{} columns, {} matches, {} gap columns, score {}",
            self.len(),
            self.matches(),
            self.gaps(),
            self.score
        )
    }
}
