// In: src/error.rs

//! This module defines the single, unified error type for the entire huffpack library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HuffmanError {
    // =========================================================================
    // === Coder Errors (Encode/Decode boundary)
    // =========================================================================
    /// A symbol outside `[0, alphabet_size)` was handed to the encoder.
    #[error("Symbol {symbol} is outside the declared alphabet of size {alphabet_size}")]
    UnknownSymbol { symbol: u64, alphabet_size: u32 },

    /// The bitstream ran out before the declared number of symbols was decoded.
    #[error("Bitstream exhausted after decoding {decoded} of {expected} symbols")]
    TruncatedStream { decoded: u64, expected: u64 },

    #[error("Corrupt code tree: {0}")]
    CorruptTree(String),

    // =========================================================================
    // === Format, Configuration & Collaborator Errors
    // =========================================================================
    #[error("Container serialization/deserialization failed: {0}")]
    ContainerFormat(String),

    #[error("Invalid coder configuration: {0}")]
    InvalidConfig(String),

    #[error("Raster layout error: {0}")]
    RasterLayout(String),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the underlying I/O subsystem (e.g., a log file that cannot be opened).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically during config or stats (de)serialization.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// An error from a safe byte-casting operation failing.
    #[error("Byte slice casting error: {0}")]
    PodCast(String), // Manual `From` impl is needed as bytemuck::PodCastError doesn't impl Error
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

impl From<bytemuck::PodCastError> for HuffmanError {
    fn from(err: bytemuck::PodCastError) -> Self {
        HuffmanError::PodCast(err.to_string())
    }
}

impl HuffmanError {
    /// Returns `true` for errors that indicate a damaged or forged container
    /// rather than caller misuse.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            HuffmanError::TruncatedStream { .. }
                | HuffmanError::CorruptTree(_)
                | HuffmanError::ContainerFormat(_)
        )
    }
}
