//! Mutation data matrix (MDM) text format.
//!
//! The format is a square integer score table plus an alphabet line:
//!
//! ```text
//! ! Comment lines start with '!' or '#'.
//! A  C  G  T
//!  2 -1 -1 -1
//! -1  2 -1 -1
//! -1 -1  2 -1
//! -1 -1 -1  2
//! ```
//!
//! The alphabet line is the first line containing no numeric-looking tokens
//! and may appear before or after the score rows. Every other non-comment,
//! non-blank line is a score row; exactly one row per alphabet symbol is
//! consumed (trailing extra rows after that are ignored). A missing alphabet,
//! zero score rows, or a ragged table is a parse error; a malformed file
//! never yields a zero-sized model.

use crate::scoring::ScoreModel;
use velella_core::{Result, VelellaError};

/// Parse MDM text into a [`ScoreModel`] over character symbols.
///
/// # Errors
///
/// Returns [`VelellaError::Parse`] for a missing or duplicated alphabet
/// line, a bad score field, or a row/column count that does not match the
/// alphabet size.
///
/// # Examples
///
/// ```
/// # use velella_align::mdm::parse_mdm;
/// let text = "# toy matrix\nA B\n1 0\n0 1\n";
/// let model = parse_mdm(text).unwrap();
/// assert_eq!(model.score(b'A', b'A'), 1);
/// ```
pub fn parse_mdm(input: &str) -> Result<ScoreModel<u8>> {
    let mut alphabet: Option<Vec<u8>> = None;
    let mut rows: Vec<Vec<i32>> = Vec::new();

    for (n, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('!') || line.starts_with('#') {
            continue;
        }
        let lineno = n + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        let numeric = fields.iter().filter(|f| f.parse::<i32>().is_ok()).count();

        if numeric == 0 {
            if alphabet.is_some() {
                return Err(VelellaError::Parse(format!(
                    "line {lineno}: second alphabet line"
                )));
            }
            let mut symbols = Vec::with_capacity(fields.len());
            for field in &fields {
                match field.as_bytes() {
                    [sym] => symbols.push(*sym),
                    _ => {
                        return Err(VelellaError::Parse(format!(
                            "line {lineno}: alphabet symbol {field:?} is not a single character"
                        )))
                    }
                }
            }
            alphabet = Some(symbols);
        } else {
            // A score row. Once the declared row count has been consumed the
            // remainder of the file is ignored.
            if let Some(a) = &alphabet {
                if rows.len() == a.len() {
                    continue;
                }
            }
            let mut row = Vec::with_capacity(fields.len());
            for field in &fields {
                let value = field.parse::<i32>().map_err(|_| {
                    VelellaError::Parse(format!("line {lineno}: bad score field {field:?}"))
                })?;
                row.push(value);
            }
            rows.push(row);
        }
    }

    let alphabet =
        alphabet.ok_or_else(|| VelellaError::Parse("no alphabet line in matrix text".into()))?;
    let dim = alphabet.len();
    if rows.is_empty() {
        return Err(VelellaError::Parse("no score rows in matrix text".into()));
    }
    if rows.len() != dim {
        return Err(VelellaError::Parse(format!(
            "expected {dim} score rows, found {}",
            rows.len()
        )));
    }

    let mut table = Vec::with_capacity(dim * dim);
    for (n, row) in rows.iter().enumerate() {
        if row.len() != dim {
            return Err(VelellaError::Parse(format!(
                "score row {} has {} fields, expected {dim}",
                n + 1,
                row.len()
            )));
        }
        table.extend_from_slice(row);
    }

    ScoreModel::from_parts(alphabet, table)
}
