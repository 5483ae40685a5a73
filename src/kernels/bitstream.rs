//! This module contains the bit-level writer and reader used for the encoded
//! payload.
//!
//! Bits are packed most-significant-bit first within each byte. The writer's
//! final byte is zero-padded, so the exact number of meaningful bits travels
//! alongside the bytes; the reader never yields a bit past that count.

use bitvec::prelude::*;

use crate::error::HuffmanError;

/// A finished bitstream: whole bytes plus the count of meaningful bits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackedBits {
    pub bytes: Vec<u8>,
    pub bit_count: u64,
}

#[derive(Debug, Default)]
pub struct BitWriter {
    bits: BitVec<u8, Msb0>,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes the writer for `bit_capacity` bits.
    pub fn with_capacity(bit_capacity: usize) -> Self {
        Self {
            bits: BitVec::with_capacity(bit_capacity),
        }
    }

    pub fn push_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Appends a whole bit sequence, first bit first.
    pub fn push_bits(&mut self, bits: &BitSlice<u8, Msb0>) {
        self.bits.extend_from_bitslice(bits);
    }

    /// Number of bits written so far.
    pub fn bit_len(&self) -> u64 {
        self.bits.len() as u64
    }

    /// Zero-pads the trailing partial byte and returns the packed buffer.
    pub fn finish(mut self) -> PackedBits {
        let bit_count = self.bits.len() as u64;
        self.bits.set_uninitialized(false);
        PackedBits {
            bytes: self.bits.into_vec(),
            bit_count,
        }
    }
}

/// Yields the first `bit_count` bits of a byte buffer, MSB-first.
#[derive(Debug)]
pub struct BitReader<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    position: usize,
}

impl<'a> BitReader<'a> {
    /// Fails with `ContainerFormat` if `bit_count` exceeds the bits the buffer holds.
    pub fn new(bytes: &'a [u8], bit_count: u64) -> Result<Self, HuffmanError> {
        let available = (bytes.len() as u64).saturating_mul(8);
        if bit_count > available {
            return Err(HuffmanError::ContainerFormat(format!(
                "Declared bit count {} exceeds the {} bits in a {}-byte payload",
                bit_count,
                available,
                bytes.len()
            )));
        }
        let all = BitSlice::<u8, Msb0>::from_slice(bytes);
        Ok(Self {
            bits: &all[..bit_count as usize],
            position: 0,
        })
    }

    pub fn read_bit(&mut self) -> Option<bool> {
        let bit = *self.bits.get(self.position)?;
        self.position += 1;
        Some(bit)
    }

    /// Bits consumed so far.
    pub fn position(&self) -> u64 {
        self.position as u64
    }

    /// Meaningful bits not yet consumed.
    pub fn remaining(&self) -> u64 {
        (self.bits.len() - self.position) as u64
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.read_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits.len() - self.position;
        (remaining, Some(remaining))
    }
}
