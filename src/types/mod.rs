//! This module defines the core, strongly-typed data representations used
//! throughout huffpack.
//!
//! It currently includes the `Symbol` alias and the canonical `Alphabet` enum,
//! which together describe every value a coder can encode.

pub mod alphabet;

// Re-export the main type(s) for easier access.
pub use alphabet::{Alphabet, Symbol};
