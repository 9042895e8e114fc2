//! Pairwise global sequence alignment for the Velella toolkit.
//!
//! Provides a Needleman-Wunsch-style global aligner with affine gap
//! penalties, free leading/trailing overhangs, substitution-matrix scoring
//! ([`ScoreModel`], BLOSUM62 built in, arbitrary matrices via [`parse_mdm`]),
//! and an optional bounded gap-search window. The engine is generic over the
//! symbol domain: character residues (`u8`) and numeric tokens (`i32`).
//!
//! # Quick start
//!
//! ```
//! use velella_align::{align, AlignParams, ScoreScheme};
//!
//! let seq1: &[u8] = b"ACTCLMCT";
//! let seq2: &[u8] = b"ACTCCT";
//! let result = align(seq1, seq2, &ScoreScheme::identity(), &AlignParams::default()).unwrap();
//! assert_eq!(result.aligned1, b"ACTCLMCT");
//! assert_eq!(result.aligned2, b"ACTC--CT");
//! assert_eq!(result.score, 6);
//! ```

pub mod global;
pub mod matrix;
pub mod mdm;
pub mod scoring;
pub mod symbol;
pub mod types;

pub use global::align;
pub use matrix::{AlignmentMatrix, Direction};
pub use mdm::parse_mdm;
pub use scoring::{ScoreModel, ScoreScheme};
pub use symbol::Symbol;
pub use types::{AlignParams, Alignment};
