//! This module defines the contracts between the coder and its external
//! collaborators: whatever produces symbols (a text file, a raster image) and
//! whatever reassembles them after decoding.

use crate::error::HuffmanError;
use crate::types::{Alphabet, Symbol};

/// Something that can be flattened into a finite symbol sequence.
pub trait SymbolSource {
    /// The alphabet every produced symbol belongs to.
    fn alphabet(&self) -> Alphabet;

    /// The symbols, in the order the collaborator wants them back.
    fn to_symbols(&self) -> Result<Vec<Symbol>, HuffmanError>;
}

/// Something that can be rebuilt from a decoded symbol sequence plus the
/// layout metadata the collaborator kept outside the container.
pub trait SymbolSink: Sized {
    type Layout;

    fn from_symbols(symbols: &[Symbol], layout: Self::Layout) -> Result<Self, HuffmanError>;
}
