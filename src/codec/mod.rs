// In: src/codec/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Codec Layer
// ====================================================================================
//
// The codec orchestrates the pure kernels into the two public operations.
//
// Data Flow (Encode):
//
//   symbols -> [kernels::frequency]      FrequencyTable
//           -> [kernels::tree]           HuffmanTree (via kernels::priority_queue)
//           -> [kernels::code_table]     CodeTable
//           -> [kernels::bitstream]      BitWriter -> PackedBits
//           -> [container]               Container { symbol_count, CodeTable, payload }
//
// Data Flow (Decode):
//
//   Container -> CodeTable::to_tree      HuffmanTree (rebuilt, no encoder state)
//             -> BitReader               bit-by-bit walk from the root
//             -> symbols                 stop at symbol_count
//
// ====================================================================================
pub mod container;
pub mod decoder;
pub mod encoder;
pub mod format;

pub use container::{Container, HeaderInfo};
pub use decoder::decode;
pub use encoder::encode;
pub use format::CompressionStats;

#[cfg(test)]
mod codec_tests;
