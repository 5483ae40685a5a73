//! This module collects the pure, stateless building blocks of the coder.
//!
//! Each kernel owns one data structure and knows nothing about containers or
//! collaborators; the `codec` layer wires them together in a fixed order.

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Layer 1: Statistics
pub mod frequency;

/// Layer 2: Tree Construction
pub mod priority_queue;
pub mod tree;

/// Layer 3: Code Assignment
pub mod code_table;

/// Final Stage: Bit Packing
pub mod bitstream;

pub use bitstream::{BitReader, BitWriter, PackedBits};
pub use code_table::{Code, CodeTable};
pub use frequency::FrequencyTable;
pub use priority_queue::PriorityQueue;
pub use tree::{HuffmanTree, NodeId, NodeKind, TreeNode};
