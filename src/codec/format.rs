// In: src/codec/format.rs

//! Defines the on-disk constants and the public analysis struct for the huffpack
//! container format. `container.rs` is the authoritative reader/writer; this
//! module only holds the contracts both sides agree on.

use serde::{Deserialize, Serialize};

use crate::error::HuffmanError;
use crate::types::Alphabet;

/// The magic number to identify a huffpack container.
pub const CONTAINER_MAGIC: &[u8; 4] = b"HUFC";
/// The current version of the container format.
pub const CONTAINER_FORMAT_VERSION: u16 = 1;

/// magic(4) + version(2) + alphabet_size(4) + symbol_count(8) + table_entry_count(4)
pub const FIXED_HEADER_SIZE: usize = 22;
/// payload_bits(8) + payload_len(8)
pub const PAYLOAD_PREFIX_SIZE: usize = 16;
/// The smallest well-formed container: an empty input.
pub const MIN_CONTAINER_SIZE: usize = FIXED_HEADER_SIZE + PAYLOAD_PREFIX_SIZE;

/// The public-facing result of `analyze_container`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CompressionStats {
    pub format_version: u16,
    pub alphabet: Alphabet,
    pub alphabet_size: u32,
    pub symbol_count: u64,
    pub table_entries: u32,
    pub payload_bits: u64,
    /// Everything before the payload bytes, code table included.
    pub header_size: usize,
    pub payload_size: usize,
    pub total_size: usize,
    /// Payload bits per coded symbol; zero for an empty container.
    pub bits_per_symbol: f64,
}

impl CompressionStats {
    pub fn to_json(&self) -> Result<String, HuffmanError> {
        Ok(serde_json::to_string(self)?)
    }

    /// `total_size / original_size`, or `None` if the original was empty.
    pub fn ratio_against(&self, original_size: usize) -> Option<f64> {
        (original_size > 0).then(|| self.total_size as f64 / original_size as f64)
    }
}
