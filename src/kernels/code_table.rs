//! This module contains the code table: the symbol -> bit-code mapping derived
//! from a Huffman tree, its compact serialized form, and the reverse
//! reconstruction of a decoding tree from that form.
//!
//! Serialized record layout (one per symbol, ascending symbol order):
//!
//! ```text
//! symbol: u32 LE | code_length: u8 | ceil(code_length / 8) bytes, MSB-first, zero padded
//! ```

use std::io::{Cursor, Read};

use bitvec::prelude::*;
use hashbrown::HashMap;

use crate::error::HuffmanError;
use crate::kernels::frequency::FrequencyTable;
use crate::kernels::tree::{HuffmanTree, NodeId, NodeKind};
use crate::types::Symbol;

/// A single symbol's code, most significant (first emitted) bit first.
pub type Code = BitVec<u8, Msb0>;

/// The longest code the serialized record can describe.
pub const MAX_CODE_LENGTH: usize = u8::MAX as usize;

/// Bytes taken by a record's fixed part (symbol + length).
pub(crate) const RECORD_FIXED_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    alphabet_size: u32,
    codes: HashMap<Symbol, Code>,
}

impl CodeTable {
    /// An empty table, as produced for an empty input.
    pub fn empty(alphabet_size: u32) -> Self {
        Self {
            alphabet_size,
            codes: HashMap::new(),
        }
    }

    /// Derives every leaf's code with a depth-first walk, left before right,
    /// appending `0` on a left edge and `1` on a right edge.
    ///
    /// A tree whose root is itself a leaf assigns that symbol the one-bit
    /// code `0`, so every occurrence still costs one bit in the stream.
    pub fn from_tree(tree: &HuffmanTree, alphabet_size: u32) -> Result<Self, HuffmanError> {
        let mut table = Self::empty(alphabet_size);
        let Some(root) = tree.root() else {
            return Ok(table);
        };

        if let NodeKind::Leaf { symbol } = tree.node(root)?.kind {
            table.insert(symbol, bitvec![u8, Msb0; 0])?;
            return Ok(table);
        }

        // Explicit stack; the right child is pushed first so the left is visited first.
        let mut stack: Vec<(NodeId, Code)> = vec![(root, Code::new())];
        while let Some((id, path)) = stack.pop() {
            match tree.node(id)?.kind {
                NodeKind::Leaf { symbol } => table.insert(symbol, path)?,
                NodeKind::Internal { left, right } => {
                    if path.len() >= MAX_CODE_LENGTH {
                        return Err(HuffmanError::InternalError(format!(
                            "Huffman code length exceeds the maximum of {} bits",
                            MAX_CODE_LENGTH
                        )));
                    }
                    let (left, right) = match (left, right) {
                        (Some(l), Some(r)) => (l, r),
                        _ => {
                            return Err(HuffmanError::InternalError(format!(
                                "Internal node {} is missing a child in a built tree",
                                id
                            )))
                        }
                    };
                    let mut right_path = path.clone();
                    right_path.push(true);
                    stack.push((right, right_path));

                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((left, left_path));
                }
            }
        }
        Ok(table)
    }

    /// Builds a table from explicit `(symbol, code)` pairs, validating each
    /// entry the way a decoder must treat untrusted input.
    pub fn from_entries<I>(alphabet_size: u32, entries: I) -> Result<Self, HuffmanError>
    where
        I: IntoIterator<Item = (Symbol, Code)>,
    {
        let mut table = Self::empty(alphabet_size);
        for (symbol, code) in entries {
            table.insert(symbol, code)?;
        }
        Ok(table)
    }

    fn insert(&mut self, symbol: Symbol, code: Code) -> Result<(), HuffmanError> {
        if symbol >= self.alphabet_size {
            return Err(HuffmanError::CorruptTree(format!(
                "Code table references symbol {} outside the alphabet of size {}",
                symbol, self.alphabet_size
            )));
        }
        if code.is_empty() || code.len() > MAX_CODE_LENGTH {
            return Err(HuffmanError::CorruptTree(format!(
                "Symbol {} has an invalid code length of {}",
                symbol,
                code.len()
            )));
        }
        if self.codes.insert(symbol, code).is_some() {
            return Err(HuffmanError::CorruptTree(format!(
                "Symbol {} appears more than once in the code table",
                symbol
            )));
        }
        Ok(())
    }

    pub fn get(&self, symbol: Symbol) -> Option<&BitSlice<u8, Msb0>> {
        self.codes.get(&symbol).map(|c| c.as_bitslice())
    }

    pub fn code_length(&self, symbol: Symbol) -> Option<usize> {
        self.codes.get(&symbol).map(|c| c.len())
    }

    pub fn alphabet_size(&self) -> u32 {
        self.alphabet_size
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// All entries in ascending symbol order.
    pub fn sorted_entries(&self) -> Vec<(Symbol, &Code)> {
        let mut entries: Vec<(Symbol, &Code)> = self.codes.iter().map(|(&s, c)| (s, c)).collect();
        entries.sort_unstable_by_key(|&(s, _)| s);
        entries
    }

    /// Total payload bits needed to encode a sequence with these frequencies.
    pub fn encoded_bit_len(&self, frequencies: &FrequencyTable) -> Result<u64, HuffmanError> {
        frequencies
            .iter_ascending()
            .into_iter()
            .try_fold(0u64, |acc, (symbol, count)| -> Result<u64, HuffmanError> {
                let len = self.code_length(symbol).ok_or(HuffmanError::UnknownSymbol {
                    symbol: u64::from(symbol),
                    alphabet_size: self.alphabet_size,
                })?;
                Ok(acc + count * len as u64)
            })
    }

    /// Rebuilds a decoding tree from the codes alone.
    pub fn to_tree(&self) -> Result<HuffmanTree, HuffmanError> {
        if self.is_empty() {
            return Ok(HuffmanTree::default());
        }
        let mut tree = HuffmanTree::with_empty_root();
        for (symbol, code) in self.sorted_entries() {
            tree.graft(symbol, code)?;
        }
        Ok(tree)
    }

    /// Appends the serialized records (without a count prefix) to `out`.
    pub fn write_records(&self, out: &mut Vec<u8>) {
        for (symbol, code) in self.sorted_entries() {
            out.extend_from_slice(&symbol.to_le_bytes());
            out.push(code.len() as u8);
            out.extend_from_slice(&pack_code(code));
        }
    }

    /// Reads `entry_count` serialized records from `cursor`.
    pub fn read_records(
        cursor: &mut Cursor<&[u8]>,
        alphabet_size: u32,
        entry_count: usize,
    ) -> Result<Self, HuffmanError> {
        let map_err = |e: std::io::Error| {
            HuffmanError::ContainerFormat(format!("Truncated code table record: {}", e))
        };
        let mut table = Self::empty(alphabet_size);
        table.codes.reserve(entry_count);

        let mut u32_buf = [0u8; 4];
        let mut u8_buf = [0u8; 1];
        for _ in 0..entry_count {
            cursor.read_exact(&mut u32_buf).map_err(map_err)?;
            let symbol = u32::from_le_bytes(u32_buf);
            cursor.read_exact(&mut u8_buf).map_err(map_err)?;
            let len = u8_buf[0] as usize;

            let mut code_bytes = vec![0u8; len.div_ceil(8)];
            cursor.read_exact(&mut code_bytes).map_err(map_err)?;
            let bits = BitSlice::<u8, Msb0>::from_slice(&code_bytes);
            if bits[len..].any() {
                return Err(HuffmanError::CorruptTree(format!(
                    "Code for symbol {} has non-zero padding bits",
                    symbol
                )));
            }
            let code = bits[..len].to_bitvec();

            table.insert(symbol, code)?;
        }
        Ok(table)
    }

    /// Size in bytes of the serialized records.
    pub fn serialized_len(&self) -> usize {
        self.codes
            .values()
            .map(|c| RECORD_FIXED_SIZE + c.len().div_ceil(8))
            .sum()
    }
}

/// Packs a code into whole bytes, zeroing the unused tail bits.
fn pack_code(code: &BitSlice<u8, Msb0>) -> Vec<u8> {
    let mut packed = code.to_bitvec();
    packed.set_uninitialized(false);
    packed.into_vec()
}

/// Renders a code as a `0`/`1` string for diagnostics.
pub fn code_to_string(code: &BitSlice<u8, Msb0>) -> String {
    code.iter()
        .by_vals()
        .map(|b| if b { '1' } else { '0' })
        .collect()
}
