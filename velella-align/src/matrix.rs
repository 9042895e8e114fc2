//! DP grids for the global aligner: cell scores and traceback directions.

use std::io::{self, Write};

use velella_core::{Result, VelellaError};

/// Which cell contributed the optimum at a given position.
///
/// Recorded during the matrix fill and consumed by the traceback. `Unset`
/// marks cells that are never assigned (the two end-edge borders, and the
/// square over-allocation beyond the sequence lengths).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// No direction recorded.
    Unset,
    /// Optimum came from the diagonal neighbour `(i+1, j+1)`.
    Diagonal,
    /// Optimum came from `(to, j+1)` with `to > i+1`: the skipped rows
    /// become gap columns in sequence 2.
    GapInSeq2 { to: usize },
    /// Optimum came from `(i+1, to)` with `to > j+1`: the skipped columns
    /// become gap columns in sequence 1.
    GapInSeq1 { to: usize },
}

/// The two same-shaped grids backing one alignment call.
///
/// Both grids are allocated square at `maxdim x maxdim` where
/// `maxdim = max(len1, len2)`; only the `len1 x len2` region is ever read or
/// written. The grids are exclusively owned by one alignment call: filled
/// once, optionally dumped, then dropped.
#[derive(Debug, Clone)]
pub struct AlignmentMatrix {
    pub(crate) dim: usize,
    pub(crate) len1: usize,
    pub(crate) len2: usize,
    pub(crate) score: Vec<i32>,
    pub(crate) dirn: Vec<Direction>,
}

impl AlignmentMatrix {
    /// Allocate zeroed grids for sequences of the given lengths.
    pub(crate) fn new(len1: usize, len2: usize) -> Result<Self> {
        let dim = len1.max(len2);
        let cells = dim
            .checked_mul(dim)
            .ok_or_else(|| VelellaError::Allocation(format!("{dim} x {dim} grid overflows")))?;

        let mut score = Vec::new();
        score
            .try_reserve_exact(cells)
            .map_err(|_| VelellaError::Allocation(format!("score grid of {dim} x {dim} cells")))?;
        score.resize(cells, 0);

        let mut dirn = Vec::new();
        dirn.try_reserve_exact(cells).map_err(|_| {
            VelellaError::Allocation(format!("direction grid of {dim} x {dim} cells"))
        })?;
        dirn.resize(cells, Direction::Unset);

        Ok(Self {
            dim,
            len1,
            len2,
            score,
            dirn,
        })
    }

    #[inline]
    pub(crate) fn idx(&self, i: usize, j: usize) -> usize {
        i * self.dim + j
    }

    /// Score stored at `(i, j)`. Panics outside the `len1 x len2` region.
    pub fn score_at(&self, i: usize, j: usize) -> i32 {
        self.score[self.idx(i, j)]
    }

    /// Direction stored at `(i, j)`. Panics outside the `len1 x len2` region.
    pub fn direction_at(&self, i: usize, j: usize) -> Direction {
        self.dirn[self.idx(i, j)]
    }

    #[inline]
    pub(crate) fn set(&mut self, i: usize, j: usize, score: i32, dirn: Direction) {
        let at = self.idx(i, j);
        self.score[at] = score;
        self.dirn[at] = dirn;
    }

    /// Direction at `(i, j)` as explicit grid coordinates, `(-1, -1)` for
    /// [`Direction::Unset`].
    fn direction_coords(&self, i: usize, j: usize) -> (isize, isize) {
        match self.dirn[self.idx(i, j)] {
            Direction::Unset => (-1, -1),
            Direction::Diagonal => ((i + 1) as isize, (j + 1) as isize),
            Direction::GapInSeq2 { to } => (to as isize, (j + 1) as isize),
            Direction::GapInSeq1 { to } => ((i + 1) as isize, to as isize),
        }
    }

    /// Dump both grids row-major over the used `len1 x len2` region:
    /// fixed-width integers, one grid row per line. Purely observational;
    /// intended for diagnostics before the matrix is dropped.
    pub fn dump<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "Score matrix:")?;
        for i in 0..self.len1 {
            for j in 0..self.len2 {
                write!(w, "{:5} ", self.score[self.idx(i, j)])?;
            }
            writeln!(w)?;
        }
        writeln!(w, "Direction matrix:")?;
        for i in 0..self.len1 {
            for j in 0..self.len2 {
                let (x, y) = self.direction_coords(i, j);
                write!(w, "({x:4},{y:4}) ")?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}
