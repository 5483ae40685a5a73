// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the byte-level public API. It turns collaborator data (text,
// raster images, raw symbol slices) into container bytes and back, so callers
// never touch `Container`, `CodeTable` or the kernels directly.
//
// Data Flow (Compression):
//
//   1. [Collaborator adapter (raster)]   -> TextSource / RasterImage
//         |
//         `-> SymbolSource::to_symbols + alphabet ->
//
//   2. [Stateless API (compress_*)]      -> CoderConfig for that alphabet
//         |
//         `-> codec::encode -> Container::to_bytes
//
// Data Flow (Decompression):
//
//   1. [Stateless API (decompress_*)]    -> Container::from_bytes -> codec::decode
//         |
//         `-> alphabet and symbol count checked against the caller's layout
//
//   2. [Collaborator adapter (raster)]   -> SymbolSink::from_symbols rebuilds
//                                           Vec<u8> / RasterImage
//
// ====================================================================================
pub mod raster;
pub mod stateless_api;

pub use raster::{Bgr, RasterImage, RasterLayout, TextSource};

pub use stateless_api::{
    analyze_container, compress_raster, compress_symbols, compress_text, decompress_raster,
    decompress_symbols, decompress_text,
};
