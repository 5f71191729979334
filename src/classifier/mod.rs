//! Heuristic classifiers
//!
//! Pure, synchronous string classifiers. Every function here is
//! referentially transparent: the same input always yields the same verdict,
//! with no hidden state and no I/O.

pub mod file;
pub mod url;
