//! Global alignment with affine gap penalties and free end gaps.
//!
//! The engine fills the DP matrix backwards from the far corner, so each
//! cell holds the best score attainable from that cell to the end of both
//! sequences. The two end-edge borders are seeded with plain pair scores
//! (free trailing gaps), the alignment start is chosen by scanning the two
//! zero-index edges (free leading gaps), and the traceback walks forward
//! along recorded directions.
//!
//! Gap handling follows the classic mutation-data-matrix aligner this engine
//! models: within each gap search the affine penalty
//! `gap_open + extensions * gap_extend` selects the best jump target, while
//! the cell comparison and the stored scores use the raw target values. A
//! positive `window` caps how far a gap may extend before being re-evaluated,
//! trading optimality at long gaps for speed; `window = 0` means unbounded.

use crate::matrix::{AlignmentMatrix, Direction};
use crate::scoring::ScoreScheme;
use crate::symbol::Symbol;
use crate::types::{AlignParams, Alignment};
use velella_core::{Result, VelellaError};

/// Align two sequences globally and reconstruct the aligned output.
///
/// This is the single engine behind the character, uppercase-folded, and
/// numeric-token variants: the symbol domain comes from `S`, the comparison
/// behaviour from `scheme`, and the gap search bound from `params`.
///
/// # Errors
///
/// Returns an error for empty input, negative penalties, failed grid
/// allocation, or a corrupt direction matrix.
pub fn align<S: Symbol>(
    seq1: &[S],
    seq2: &[S],
    scheme: &ScoreScheme<'_, S>,
    params: &AlignParams,
) -> Result<Alignment<S>> {
    let matrix = AlignmentMatrix::fill(seq1, seq2, scheme, params)?;
    matrix.traceback(seq1, seq2)
}

impl AlignmentMatrix {
    /// Run the DP fill for `seq1` against `seq2` and return the filled grids.
    ///
    /// Exposed separately from [`align`] so diagnostics can inspect or
    /// [`dump`](AlignmentMatrix::dump) the grids between fill and traceback.
    ///
    /// # Errors
    ///
    /// Returns an error if either sequence is empty, a penalty is negative,
    /// or grid allocation fails.
    pub fn fill<S: Symbol>(
        seq1: &[S],
        seq2: &[S],
        scheme: &ScoreScheme<'_, S>,
        params: &AlignParams,
    ) -> Result<Self> {
        let len1 = seq1.len();
        let len2 = seq2.len();
        if len1 == 0 || len2 == 0 {
            return Err(VelellaError::InvalidInput(
                "sequences must not be empty".into(),
            ));
        }
        if params.gap_open < 0 || params.gap_extend < 0 {
            return Err(VelellaError::InvalidInput(
                "gap penalties must be non-negative".into(),
            ));
        }

        let mut m = AlignmentMatrix::new(len1, len2)?;
        let window = if params.window == 0 {
            m.dim
        } else {
            params.window
        };

        // End-edge borders: plain pair scores, no gap terms.
        for j in 0..len2 {
            let s = scheme.score_pair(seq1[len1 - 1], seq2[j]);
            m.set(len1 - 1, j, s, Direction::Unset);
        }
        for i in 0..len1 {
            let s = scheme.score_pair(seq1[i], seq2[len2 - 1]);
            m.set(i, len2 - 1, s, Direction::Unset);
        }

        // Interior: L-shaped sweeps anchored along the anti-diagonal, moving
        // in from (len1-2, len2-2). Each anchor fills the rest of its row,
        // then the rest of its column.
        let mut i = len1 as isize - 2;
        let mut j = len2 as isize - 2;
        while i >= 0 && j >= 0 {
            let (ai, aj) = (i as usize, j as usize);
            for j1 in (0..=aj).rev() {
                m.fill_cell(ai, j1, seq1, seq2, scheme, params, window);
            }
            for i1 in (0..ai).rev() {
                m.fill_cell(i1, aj, seq1, seq2, scheme, params, window);
            }
            i -= 1;
            j -= 1;
        }

        Ok(m)
    }

    fn fill_cell<S: Symbol>(
        &mut self,
        i: usize,
        j: usize,
        seq1: &[S],
        seq2: &[S],
        scheme: &ScoreScheme<'_, S>,
        params: &AlignParams,
        window: usize,
    ) {
        let diagonal = self.score_at(i + 1, j + 1);

        // Best jump target below the diagonal: (k, j+1), skipping seq1 rows.
        // The penalised value picks the target, the raw value competes.
        let mut gap2: Option<(i32, usize)> = None;
        let mut penalised_best = i32::MIN;
        for k in (i + 2)..self.len1.min(i + 3 + window) {
            let raw = self.score_at(k, j + 1);
            let penalised = raw - (params.gap_open + (k - i - 2) as i32 * params.gap_extend);
            if penalised >= penalised_best {
                penalised_best = penalised;
                gap2 = Some((raw, k));
            }
        }

        // Best jump target right of the diagonal: (i+1, l), skipping seq2
        // columns.
        let mut gap1: Option<(i32, usize)> = None;
        let mut penalised_best = i32::MIN;
        for l in (j + 2)..self.len2.min(j + 3 + window) {
            let raw = self.score_at(i + 1, l);
            let penalised = raw - (params.gap_open + (l - j - 2) as i32 * params.gap_extend);
            if penalised >= penalised_best {
                penalised_best = penalised;
                gap1 = Some((raw, l));
            }
        }

        // Fixed tie-break order: diagonal beats either gap on equality, and
        // a gap in sequence 2 beats a gap in sequence 1 only on a strictly
        // higher score.
        let mut best = i32::MIN;
        let mut dirn = Direction::Unset;
        if let Some((raw, l)) = gap1 {
            best = raw;
            dirn = Direction::GapInSeq1 { to: l };
        }
        if let Some((raw, k)) = gap2 {
            if raw > best {
                best = raw;
                dirn = Direction::GapInSeq2 { to: k };
            }
        }
        if diagonal >= best {
            best = diagonal;
            dirn = Direction::Diagonal;
        }

        let pair = scheme.score_pair(seq1[i], seq2[j]);
        self.set(i, j, best + pair, dirn);
    }

    /// Find the alignment's starting cell by scanning the two zero-index
    /// edges for the highest score.
    ///
    /// Within an edge the first maximum wins; across edges the row edge wins
    /// only when strictly higher than the column edge.
    pub fn best_edge(&self) -> (usize, usize) {
        let mut best_j = 0;
        for j in 1..self.len2 {
            if self.score_at(0, j) > self.score_at(0, best_j) {
                best_j = j;
            }
        }
        let mut best_i = 0;
        for i in 1..self.len1 {
            if self.score_at(i, 0) > self.score_at(best_i, 0) {
                best_i = i;
            }
        }
        if self.score_at(best_i, 0) > self.score_at(0, best_j) {
            (best_i, 0)
        } else {
            (0, best_j)
        }
    }

    /// Walk the direction matrix from the best edge cell to the far corner,
    /// emitting aligned symbol pairs and gap markers.
    ///
    /// Symbols before the starting cell and after the point where the
    /// shorter sequence runs out are emitted as unpenalised gap-aligned
    /// insertions.
    ///
    /// # Errors
    ///
    /// Returns [`VelellaError::Internal`] if a consulted direction entry
    /// matches none of the expected patterns, which means the matrix was
    /// built or walked inconsistently.
    pub fn traceback<S: Symbol>(&self, seq1: &[S], seq2: &[S]) -> Result<Alignment<S>> {
        let (len1, len2) = (self.len1, self.len2);
        let (best_i, best_j) = self.best_edge();

        let mut out1: Vec<S> = Vec::with_capacity(len1 + len2);
        let mut out2: Vec<S> = Vec::with_capacity(len1 + len2);

        // Unpenalised leading insertions up to the starting cell.
        if best_j == 0 {
            for x in 0..best_i {
                out1.push(seq1[x]);
                out2.push(S::GAP);
            }
        } else {
            for y in 0..best_j {
                out1.push(S::GAP);
                out2.push(seq2[y]);
            }
        }

        let (mut i, mut j) = (best_i, best_j);
        out1.push(seq1[i]);
        out2.push(seq2[j]);

        while i < len1 - 1 && j < len2 - 1 {
            match self.direction_at(i, j) {
                Direction::Diagonal => {
                    i += 1;
                    j += 1;
                }
                Direction::GapInSeq2 { to } if to > i + 1 && to < len1 => {
                    for x in (i + 1)..to {
                        out1.push(seq1[x]);
                        out2.push(S::GAP);
                    }
                    i = to;
                    j += 1;
                }
                Direction::GapInSeq1 { to } if to > j + 1 && to < len2 => {
                    for y in (j + 1)..to {
                        out1.push(S::GAP);
                        out2.push(seq2[y]);
                    }
                    j = to;
                    i += 1;
                }
                other => {
                    log::error!("direction matrix corrupt at ({i}, {j}): {other:?}");
                    return Err(VelellaError::Internal(format!(
                        "direction matrix corrupt at ({i}, {j})"
                    )));
                }
            }
            out1.push(seq1[i]);
            out2.push(seq2[j]);
        }

        // One sequence is exhausted; the rest of the other is a trailing
        // overhang.
        if i < len1 - 1 {
            for x in (i + 1)..len1 {
                out1.push(seq1[x]);
                out2.push(S::GAP);
            }
        } else if j < len2 - 1 {
            for y in (j + 1)..len2 {
                out1.push(S::GAP);
                out2.push(seq2[y]);
            }
        }

        Ok(Alignment {
            score: self.score_at(best_i, best_j),
            aligned1: out1,
            aligned2: out2,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> ScoreScheme<'static, u8> {
        ScoreScheme::identity()
    }

    fn params(gap_open: i32, gap_extend: i32, window: usize) -> AlignParams {
        AlignParams {
            gap_open,
            gap_extend,
            window,
        }
    }

    #[test]
    fn self_alignment_is_gapless() {
        let seq: &[u8] = b"ACDEFGHIKL";
        let a = align(seq, seq, &identity(), &AlignParams::default()).unwrap();
        assert_eq!(a.len(), seq.len());
        assert_eq!(a.score, seq.len() as i32);
        assert_eq!(a.gaps(), 0);
        assert_eq!(a.aligned1, seq);
        assert_eq!(a.aligned2, seq);
    }

    #[test]
    fn single_symbol_pair() {
        let a = align(b"A".as_slice(), b"A".as_slice(), &identity(), &AlignParams::default())
            .unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(a.score, 1);
    }

    #[test]
    fn shorter_first_sequence_gets_trailing_gaps() {
        let a = align(b"A".as_slice(), b"ACT".as_slice(), &identity(), &AlignParams::default())
            .unwrap();
        assert_eq!(a.aligned1, b"A--");
        assert_eq!(a.aligned2, b"ACT");
        assert_eq!(a.score, 1);
    }

    #[test]
    fn leading_overhang_from_best_edge() {
        let a = align(
            b"XXACGT".as_slice(),
            b"ACGT".as_slice(),
            &identity(),
            &params(2, 1, 0),
        )
        .unwrap();
        assert_eq!(a.aligned1, b"XXACGT");
        assert_eq!(a.aligned2, b"--ACGT");
        assert_eq!(a.score, 4);
    }

    #[test]
    fn empty_sequence_errors() {
        assert!(align(b"".as_slice(), b"ACGT".as_slice(), &identity(), &AlignParams::default())
            .is_err());
        assert!(align(b"ACGT".as_slice(), b"".as_slice(), &identity(), &AlignParams::default())
            .is_err());
    }

    #[test]
    fn negative_penalties_rejected() {
        let bad = params(-1, 0, 0);
        assert!(align(b"AC".as_slice(), b"AC".as_slice(), &identity(), &bad).is_err());
    }

    #[test]
    fn window_bound_changes_long_gap_handling() {
        // Unbounded search jumps the GGGG run to pair the final C; a window
        // of 1 cannot reach it and settles for the diagonal.
        let s1: &[u8] = b"AC";
        let s2: &[u8] = b"AGGGGC";

        let unbounded = align(s1, s2, &identity(), &params(1, 0, 0)).unwrap();
        assert_eq!(unbounded.aligned1, b"A----C");
        assert_eq!(unbounded.aligned2, b"AGGGGC");
        assert_eq!(unbounded.score, 2);

        let bounded = align(s1, s2, &identity(), &params(1, 0, 1)).unwrap();
        assert_eq!(bounded.score, 1);
        assert_ne!(bounded.aligned1, unbounded.aligned1);
    }

    #[test]
    fn zero_window_equals_explicit_maxdim() {
        let s1: &[u8] = b"ACTCLMCT";
        let s2: &[u8] = b"ACTCCT";
        let free = align(s1, s2, &identity(), &params(10, 1, 0)).unwrap();
        let capped = align(s1, s2, &identity(), &params(10, 1, 8)).unwrap();
        assert_eq!(free.score, capped.score);
        assert_eq!(free.aligned1, capped.aligned1);
        assert_eq!(free.aligned2, capped.aligned2);
    }

    #[test]
    fn corrupt_direction_matrix_is_an_internal_error() {
        let s1: &[u8] = b"ACGTACGT";
        let s2: &[u8] = b"ACGTACGT";
        let mut m = AlignmentMatrix::fill(s1, s2, &identity(), &AlignParams::default()).unwrap();
        let at = m.idx(0, 0);
        m.dirn[at] = Direction::GapInSeq2 { to: 1 }; // not > i+1: invalid
        let err = m.traceback(s1, s2).unwrap_err();
        assert!(matches!(err, VelellaError::Internal(_)));
    }

    #[test]
    fn fill_then_dump_then_traceback() {
        let s1: &[u8] = b"ACT";
        let s2: &[u8] = b"ACT";
        let m = AlignmentMatrix::fill(s1, s2, &identity(), &AlignParams::default()).unwrap();
        let mut out = Vec::new();
        m.dump(&mut out).unwrap();
        assert!(!out.is_empty());
        let a = m.traceback(s1, s2).unwrap();
        assert_eq!(a.score, 3);
    }

    #[test]
    fn best_edge_prefers_column_on_ties() {
        // Symmetric input: row and column edge maxima tie, so the column
        // edge supplies the start.
        let s1: &[u8] = b"GATTACA";
        let m = AlignmentMatrix::fill(s1, s1, &identity(), &AlignParams::default()).unwrap();
        assert_eq!(m.best_edge(), (0, 0));
    }

    #[test]
    fn numeric_tokens_use_zero_gap_marker() {
        let s1: &[i32] = &[4, 4, 2, 9];
        let s2: &[i32] = &[4, 4, 9];
        let a = align(s1, s2, &ScoreScheme::identity(), &params(5, 0, 0)).unwrap();
        let (r1, r2) = a.strip_gaps();
        assert_eq!(r1, s1);
        assert_eq!(r2, s2);
        assert!(a.aligned2.contains(&0));
    }
}
