//! This module defines the canonical, type-safe representation of the symbol
//! alphabets a coder instance operates over.

use crate::error::HuffmanError;
use num_traits::{PrimInt, Unsigned};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single coded unit. Always strictly less than the alphabet size of the
/// coder that produced or consumes it.
pub type Symbol = u32;

/// The finite alphabet of a coder instance.
///
/// Byte-valued text and packed 24-bit RGB colours are the two alphabets the
/// library is built around; `Custom` covers any other bounded range.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(tag = "kind", content = "size", rename_all = "snake_case")]
pub enum Alphabet {
    /// 256 symbols, one per byte value.
    #[default]
    Bytes,
    /// 16,777,216 symbols, one per `(r << 16) | (g << 8) | b` colour.
    Rgb24,
    /// `[0, size)` for an arbitrary non-zero `size`.
    Custom(u32),
}

impl Alphabet {
    pub const BYTES_SIZE: u32 = 1 << 8;
    pub const RGB24_SIZE: u32 = 1 << 24;

    /// Maps a raw alphabet size (as stored in a container header) back to the
    /// canonical variant.
    pub fn from_size(size: u32) -> Result<Self, HuffmanError> {
        match size {
            0 => Err(HuffmanError::InvalidConfig(
                "Alphabet size must be at least 1".to_string(),
            )),
            Self::BYTES_SIZE => Ok(Self::Bytes),
            Self::RGB24_SIZE => Ok(Self::Rgb24),
            n => Ok(Self::Custom(n)),
        }
    }

    /// The number of symbols in the alphabet.
    pub fn size(&self) -> u32 {
        match self {
            Self::Bytes => Self::BYTES_SIZE,
            Self::Rgb24 => Self::RGB24_SIZE,
            Self::Custom(n) => *n,
        }
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        symbol < self.size()
    }

    /// Widens a slice of any unsigned integer type into coder symbols,
    /// rejecting values that do not belong to this alphabet.
    pub fn symbols_from<T>(&self, values: &[T]) -> Result<Vec<Symbol>, HuffmanError>
    where
        T: PrimInt + Unsigned,
    {
        let size = self.size();
        values
            .iter()
            .map(|&v| {
                let wide = v.to_u64().ok_or_else(|| {
                    HuffmanError::InternalError("Unsigned value does not fit in u64".to_string())
                })?;
                if wide >= u64::from(size) {
                    return Err(HuffmanError::UnknownSymbol {
                        symbol: wide,
                        alphabet_size: size,
                    });
                }
                Ok(wide as Symbol)
            })
            .collect()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes => write!(f, "Bytes(256)"),
            Self::Rgb24 => write!(f, "Rgb24(16777216)"),
            Self::Custom(n) => write!(f, "Custom({})", n),
        }
    }
}
