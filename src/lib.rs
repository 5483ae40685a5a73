//! This file is the root of the `huffpack` Rust crate: a static Huffman coder
//! over finite symbol alphabets, with adapters for byte text and 24-bit rasters.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`codec`, `kernels`, etc.)
//!     so the Rust compiler knows they exist.
//! 2.  Re-exporting the small public surface most callers need.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[doc(hidden)]
pub use log as __log;

//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod bridge;
pub mod codec;
pub mod config;
pub mod error;
pub mod kernels;
pub mod traits;
pub mod types;

//==================================================================================
// 2. Public Surface
//==================================================================================
pub use bridge::{
    analyze_container, compress_raster, compress_symbols, compress_text, decompress_raster,
    decompress_symbols, decompress_text, RasterImage, TextSource,
};
pub use codec::{decode, encode, CompressionStats, Container};
pub use config::CoderConfig;
pub use error::HuffmanError;
pub use observability::enable_verbose_logging;
pub use types::{Alphabet, Symbol};
