//! Shared primitives for the Velella alignment toolkit.
//!
//! `velella-core` provides the foundation the other Velella crates build on:
//!
//! - **Error types** — [`VelellaError`] and [`Result`] for structured error
//!   handling
//! - **Traits** — small cross-crate contracts like [`Scored`] and
//!   [`Summarizable`]

pub mod error;
pub mod traits;

pub use error::{Result, VelellaError};
pub use traits::*;
