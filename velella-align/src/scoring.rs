//! Scoring for pairwise alignment: substitution models and scoring schemes.
//!
//! A [`ScoreModel`] wraps a finite symbol alphabet and a square score table
//! (a mutation data matrix, MDM). A [`ScoreScheme`] is what the alignment
//! engine actually consumes: either identity ("match") scoring or a borrowed
//! `ScoreModel`, each optionally case-folded before comparison.

use core::cell::Cell;

use crate::symbol::Symbol;
use velella_core::{Result, VelellaError};

/// How many unknown-symbol lookups are reported before warnings go quiet.
const WARNING_LIMIT: u32 = 10;

/// Score awarded for an exact match under identity scoring.
const MATCH_SCORE: i32 = 1;

/// A substitution score model: an ordered symbol alphabet and a square
/// integer score table indexed by alphabet position.
///
/// Looking up a symbol outside the alphabet is recovered locally: the lookup
/// scores 0 and a bounded warning is emitted (the first ten occurrences are
/// logged, the eleventh logs a single suppression notice, later ones are
/// silent). The warning counter lives on the model, so independent models
/// (and repeated runs in tests) do not share warning state.
///
/// The model is read-only during alignment; `zero` and `reweight` are
/// exclusive operations the caller must serialize against concurrent use.
#[derive(Debug, Clone)]
pub struct ScoreModel<S: Symbol> {
    alphabet: Vec<S>,
    /// Row-major, `alphabet.len()` squared.
    table: Vec<i32>,
    warnings: Cell<u32>,
}

impl<S: Symbol> ScoreModel<S> {
    /// Build a model from an alphabet and a row-major square table.
    ///
    /// # Errors
    ///
    /// Returns an error if the alphabet is empty or contains duplicates, or
    /// if the table is not `|alphabet|` squared.
    pub fn from_parts(alphabet: Vec<S>, table: Vec<i32>) -> Result<Self> {
        if alphabet.is_empty() {
            return Err(VelellaError::InvalidInput(
                "score model alphabet must not be empty".into(),
            ));
        }
        for (n, sym) in alphabet.iter().enumerate() {
            if alphabet[..n].contains(sym) {
                return Err(VelellaError::InvalidInput(format!(
                    "duplicate alphabet symbol {}",
                    sym.display()
                )));
            }
        }
        if table.len() != alphabet.len() * alphabet.len() {
            return Err(VelellaError::InvalidInput(format!(
                "score table has {} cells, expected {} for a {}-symbol alphabet",
                table.len(),
                alphabet.len() * alphabet.len(),
                alphabet.len()
            )));
        }
        Ok(Self {
            alphabet,
            table,
            warnings: Cell::new(0),
        })
    }

    /// Build an identity model over `alphabet`: 1 on the diagonal, 0
    /// elsewhere.
    ///
    /// # Errors
    ///
    /// Returns an error if the alphabet is empty or contains duplicates.
    pub fn identity(alphabet: Vec<S>) -> Result<Self> {
        let dim = alphabet.len();
        let mut table = vec![0; dim * dim];
        for n in 0..dim {
            table[n * dim + n] = MATCH_SCORE;
        }
        Self::from_parts(alphabet, table)
    }

    /// Alphabet size (the score table side).
    pub fn dim(&self) -> usize {
        self.alphabet.len()
    }

    /// The ordered alphabet.
    pub fn alphabet(&self) -> &[S] {
        &self.alphabet
    }

    fn index_of(&self, sym: S) -> Option<usize> {
        self.alphabet.iter().position(|s| *s == sym)
    }

    /// Substitution score for a pair of symbols.
    ///
    /// Symbols outside the alphabet score 0 and bump the bounded warning
    /// counter. Calling with both symbols set to [`Symbol::NULL`] is a
    /// documented no-op that saturates the counter, silencing all further
    /// unknown-symbol warnings; use it when out-of-alphabet lookups (e.g.
    /// a padding symbol) are expected and benign.
    pub fn score(&self, a: S, b: S) -> i32 {
        if a.is_null() && b.is_null() {
            self.silence_warnings();
            return 0;
        }
        match (self.index_of(a), self.index_of(b)) {
            (Some(ia), Some(ib)) => self.table[ia * self.dim() + ib],
            _ => {
                self.warn_unknown(a, b);
                0
            }
        }
    }

    fn warn_unknown(&self, a: S, b: S) {
        let n = self.warnings.get();
        if n < WARNING_LIMIT {
            log::warn!(
                "no substitution score for ({}, {}); scoring 0",
                a.display(),
                b.display()
            );
            self.warnings.set(n + 1);
        } else if n == WARNING_LIMIT {
            log::warn!("further unknown-symbol warnings suppressed");
            self.warnings.set(n + 1);
        }
    }

    /// Saturate the warning counter so no further unknown-symbol warnings
    /// (including the suppression notice) are emitted.
    pub fn silence_warnings(&self) {
        self.warnings.set(WARNING_LIMIT + 1);
    }

    /// Warning counter state: number of warnings emitted so far, saturating
    /// at one past the reporting limit once suppressed.
    pub fn warning_count(&self) -> u32 {
        self.warnings.get()
    }

    /// Shift the whole table so its minimum value is 0 and return the new
    /// maximum. Pairwise score differences are preserved.
    ///
    /// Useful before heuristics that assume non-negative scores.
    pub fn zero(&mut self) -> i32 {
        let min = self.table.iter().copied().min().unwrap_or(0);
        for v in &mut self.table {
            *v -= min;
        }
        self.table.iter().copied().max().unwrap_or(0)
    }

    /// Scale the score for one substitution pair by `factor`, truncating to
    /// integer. When `a != b` the mirror cell is scaled by the same factor,
    /// keeping the table symmetric.
    ///
    /// # Errors
    ///
    /// Returns an error if either symbol is outside the alphabet.
    pub fn reweight(&mut self, a: S, b: S, factor: f64) -> Result<()> {
        let missing = |sym: S| {
            VelellaError::InvalidInput(format!("symbol {} not in alphabet", sym.display()))
        };
        let ia = self.index_of(a).ok_or_else(|| missing(a))?;
        let ib = self.index_of(b).ok_or_else(|| missing(b))?;
        let dim = self.dim();
        self.table[ia * dim + ib] = (self.table[ia * dim + ib] as f64 * factor) as i32;
        if ia != ib {
            self.table[ib * dim + ia] = (self.table[ib * dim + ia] as f64 * factor) as i32;
        }
        Ok(())
    }
}

impl ScoreModel<u8> {
    /// BLOSUM62 substitution matrix over the 24-symbol protein alphabet
    /// `ARNDCQEGHILKMFPSTWYVBZX*`.
    pub fn blosum62() -> Self {
        Self {
            alphabet: BLOSUM_ALPHABET.to_vec(),
            table: BLOSUM62.to_vec(),
            warnings: Cell::new(0),
        }
    }
}

/// A scoring scheme accepted by the alignment engine.
///
/// The four observable variants of the engine collapse onto this enum plus
/// the symbol domain and the window bound: identity vs matrix scoring, and
/// plain vs case-folded comparison.
#[derive(Debug, Clone, Copy)]
pub enum ScoreScheme<'m, S: Symbol> {
    /// Identity ("match") scoring: 1 for an exact match, 0 otherwise.
    Identity { fold_case: bool },
    /// Substitution-matrix scoring through a borrowed [`ScoreModel`].
    Matrix {
        model: &'m ScoreModel<S>,
        fold_case: bool,
    },
}

impl<'m, S: Symbol> ScoreScheme<'m, S> {
    /// Case-sensitive identity scoring.
    pub fn identity() -> Self {
        ScoreScheme::Identity { fold_case: false }
    }

    /// Identity scoring with both symbols case-folded before comparison.
    pub fn identity_folded() -> Self {
        ScoreScheme::Identity { fold_case: true }
    }

    /// Case-sensitive matrix scoring.
    pub fn matrix(model: &'m ScoreModel<S>) -> Self {
        ScoreScheme::Matrix {
            model,
            fold_case: false,
        }
    }

    /// Matrix scoring with both symbols case-folded before lookup.
    pub fn matrix_folded(model: &'m ScoreModel<S>) -> Self {
        ScoreScheme::Matrix {
            model,
            fold_case: true,
        }
    }

    /// Score a pair of symbols under this scheme.
    pub fn score_pair(&self, a: S, b: S) -> i32 {
        match *self {
            ScoreScheme::Identity { fold_case } => {
                let (a, b) = if fold_case { (a.fold(), b.fold()) } else { (a, b) };
                if a == b {
                    MATCH_SCORE
                } else {
                    0
                }
            }
            ScoreScheme::Matrix { model, fold_case } => {
                if fold_case {
                    model.score(a.fold(), b.fold())
                } else {
                    model.score(a, b)
                }
            }
        }
    }
}

// ===========================================================================
// BLOSUM62 data (NCBI reference values).
// Row/column order: A R N D C Q E G H I L K M F P S T W Y V B Z X *
// ===========================================================================

const BLOSUM_ALPHABET: &[u8; 24] = b"ARNDCQEGHILKMFPSTWYVBZX*";

#[rustfmt::skip]
const BLOSUM62: [i32; 24 * 24] = [
//   A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   B   Z   X   *
     4, -1, -2, -2,  0, -1, -1,  0, -2, -1, -1, -1, -1, -2, -1,  1,  0, -3, -2,  0, -2, -1,  0, -4, // A
    -1,  5,  0, -2, -3,  1,  0, -2,  0, -3, -2,  2, -1, -3, -2, -1, -1, -3, -2, -3, -1,  0, -1, -4, // R
    -2,  0,  6,  1, -3,  0,  0,  0,  1, -3, -3,  0, -2, -3, -2,  1,  0, -4, -2, -3,  3,  0, -1, -4, // N
    -2, -2,  1,  6, -3,  0,  2, -1, -1, -3, -4, -1, -3, -3, -1,  0, -1, -4, -3, -3,  4,  1, -1, -4, // D
     0, -3, -3, -3,  9, -3, -4, -3, -3, -1, -1, -3, -1, -2, -3, -1, -1, -2, -2, -1, -3, -3, -2, -4, // C
    -1,  1,  0,  0, -3,  5,  2, -2,  0, -3, -2,  1,  0, -3, -1,  0, -1, -2, -1, -2,  0,  3, -1, -4, // Q
    -1,  0,  0,  2, -4,  2,  5, -2,  0, -3, -3,  1, -2, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4, // E
     0, -2,  0, -1, -3, -2, -2,  6, -2, -4, -4, -2, -3, -3, -2,  0, -2, -2, -3, -3, -1, -2, -1, -4, // G
    -2,  0,  1, -1, -3,  0,  0, -2,  8, -3, -3, -1, -2, -1, -2, -1, -2, -2,  2, -3,  0,  0, -1, -4, // H
    -1, -3, -3, -3, -1, -3, -3, -4, -3,  4,  2, -3,  1,  0, -3, -2, -1, -3, -1,  3, -3, -3, -1, -4, // I
    -1, -2, -3, -4, -1, -2, -3, -4, -3,  2,  4, -2,  2,  0, -3, -2, -1, -2, -1,  1, -4, -3, -1, -4, // L
    -1,  2,  0, -1, -3,  1,  1, -2, -1, -3, -2,  5, -1, -3, -1,  0, -1, -3, -2, -2,  0,  1, -1, -4, // K
    -1, -1, -2, -3, -1,  0, -2, -3, -2,  1,  2, -1,  5,  0, -2, -1, -1, -1, -1,  1, -3, -1, -1, -4, // M
    -2, -3, -3, -3, -2, -3, -3, -3, -1,  0,  0, -3,  0,  6, -4, -2, -2,  1,  3, -1, -3, -3, -1, -4, // F
    -1, -2, -2, -1, -3, -1, -1, -2, -2, -3, -3, -1, -2, -4,  7, -1, -1, -4, -3, -2, -2, -1, -2, -4, // P
     1, -1,  1,  0, -1,  0,  0,  0, -1, -2, -2,  0, -1, -2, -1,  4,  1, -3, -2, -2,  0,  0,  0, -4, // S
     0, -1,  0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -2, -1,  1,  5, -2, -2,  0, -1, -1,  0, -4, // T
    -3, -3, -4, -4, -2, -2, -3, -2, -2, -3, -2, -3, -1,  1, -4, -3, -2, 11,  2, -3, -4, -3, -2, -4, // W
    -2, -2, -2, -3, -2, -1, -2, -3,  2, -1, -1, -2, -1,  3, -3, -2, -2,  2,  7, -1, -3, -2, -1, -4, // Y
     0, -3, -3, -3, -1, -2, -2, -3, -3,  3,  1, -2,  1, -1, -2, -2,  0, -3, -1,  4, -3, -2, -1, -4, // V
    -2, -1,  3,  4, -3,  0,  1, -1,  0, -3, -4,  0, -3, -3, -2,  0, -1, -4, -3, -3,  4,  1, -1, -4, // B
    -1,  0,  0,  1, -3,  3,  4, -2,  0, -3, -3,  1, -1, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4, // Z
     0, -1, -1, -1, -2, -1, -1, -1, -1, -1, -1, -1, -1, -1, -2,  0,  0, -2, -1, -1, -1, -1, -1, -4, // X
    -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4,  1, // *
];
