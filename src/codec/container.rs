//! Defines the self-describing byte format for a compressed symbol sequence.
//! This module is the single source of truth for serialization, deserialization,
//! and efficient header peeking of a container.
//!
//! Layout (little-endian):
//!
//! ```text
//! magic "HUFC" | version u16 | alphabet_size u32 | symbol_count u64 | table_entry_count u32
//! table records (see `kernels::code_table`)
//! payload_bits u64 | payload_len u64 | payload bytes
//! ```

use std::io::{Cursor, Read};

use crate::codec::format::{
    CONTAINER_FORMAT_VERSION, CONTAINER_MAGIC, FIXED_HEADER_SIZE, MIN_CONTAINER_SIZE,
    PAYLOAD_PREFIX_SIZE,
};
use crate::error::HuffmanError;
use crate::kernels::code_table::{CodeTable, RECORD_FIXED_SIZE};

//==================================================================================
// Public Structs
//==================================================================================

/// Metadata extracted from a container's header by `peek_info`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct HeaderInfo {
    pub format_version: u16,
    pub alphabet_size: u32,
    pub symbol_count: u64,
    pub table_entry_count: u32,
    pub payload_bits: u64,
    /// Size of everything that precedes the payload bytes.
    pub header_size: usize,
    pub payload_size: usize,
}

/// A fully encoded symbol sequence in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub alphabet_size: u32,
    /// Number of symbols the decoder must emit before stopping.
    pub symbol_count: u64,
    pub code_table: CodeTable,
    /// MSB-first packed codes, zero-padded to a whole byte.
    pub payload: Vec<u8>,
    /// Meaningful bits in `payload`.
    pub payload_bits: u64,
}

//==================================================================================
// Core Implementation
//==================================================================================

impl Container {
    /// The container for an empty input: no table, no payload.
    pub fn empty(alphabet_size: u32) -> Self {
        Self {
            alphabet_size,
            symbol_count: 0,
            code_table: CodeTable::empty(alphabet_size),
            payload: Vec::new(),
            payload_bits: 0,
        }
    }

    /// Serializes the container into its canonical byte form. Table records
    /// are written in ascending symbol order, so equal containers always
    /// produce identical bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, HuffmanError> {
        let entry_count = u32::try_from(self.code_table.len()).map_err(|_| {
            HuffmanError::ContainerFormat("Code table has more than u32::MAX entries".into())
        })?;

        let final_size = MIN_CONTAINER_SIZE + self.code_table.serialized_len() + self.payload.len();
        let mut buf = Vec::with_capacity(final_size);

        buf.extend_from_slice(CONTAINER_MAGIC);
        buf.extend_from_slice(&CONTAINER_FORMAT_VERSION.to_le_bytes());
        buf.extend_from_slice(&self.alphabet_size.to_le_bytes());
        buf.extend_from_slice(&self.symbol_count.to_le_bytes());
        buf.extend_from_slice(&entry_count.to_le_bytes());

        self.code_table.write_records(&mut buf);

        buf.extend_from_slice(&self.payload_bits.to_le_bytes());
        buf.extend_from_slice(&(self.payload.len() as u64).to_le_bytes());
        buf.extend_from_slice(&self.payload);

        Ok(buf)
    }

    /// Deserializes a complete container, validating every length field and
    /// every table record.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HuffmanError> {
        let (info, code_table) = parse_header(bytes)?;

        let payload = bytes[info.header_size..].to_vec();

        Ok(Self {
            alphabet_size: info.alphabet_size,
            symbol_count: info.symbol_count,
            code_table,
            payload,
            payload_bits: info.payload_bits,
        })
    }

    /// Parses the header without copying the (potentially large) payload.
    pub fn peek_info(bytes: &[u8]) -> Result<HeaderInfo, HuffmanError> {
        parse_header(bytes).map(|(info, _)| info)
    }
}

//==================================================================================
// Private Helpers
//==================================================================================

fn parse_header(bytes: &[u8]) -> Result<(HeaderInfo, CodeTable), HuffmanError> {
    if bytes.len() < MIN_CONTAINER_SIZE {
        return Err(HuffmanError::ContainerFormat(format!(
            "Container is too small to be valid. Minimum size: {}, got: {}",
            MIN_CONTAINER_SIZE,
            bytes.len()
        )));
    }

    let mut cursor = Cursor::new(bytes);
    let map_err = |e: std::io::Error| HuffmanError::ContainerFormat(e.to_string());

    let mut magic_buf = [0u8; 4];
    cursor.read_exact(&mut magic_buf).map_err(map_err)?;
    if magic_buf != *CONTAINER_MAGIC {
        return Err(HuffmanError::ContainerFormat(
            "Invalid container magic number".into(),
        ));
    }

    let mut u16_buf = [0u8; 2];
    cursor.read_exact(&mut u16_buf).map_err(map_err)?;
    let version = u16::from_le_bytes(u16_buf);
    if version != CONTAINER_FORMAT_VERSION {
        return Err(HuffmanError::ContainerFormat(format!(
            "Unsupported container version: expected {}, got {}",
            CONTAINER_FORMAT_VERSION, version
        )));
    }

    let mut u32_buf = [0u8; 4];
    let mut u64_buf = [0u8; 8];

    cursor.read_exact(&mut u32_buf).map_err(map_err)?;
    let alphabet_size = u32::from_le_bytes(u32_buf);
    if alphabet_size == 0 {
        return Err(HuffmanError::ContainerFormat(
            "Container declares an empty alphabet".into(),
        ));
    }

    cursor.read_exact(&mut u64_buf).map_err(map_err)?;
    let symbol_count = u64::from_le_bytes(u64_buf);

    cursor.read_exact(&mut u32_buf).map_err(map_err)?;
    let table_entry_count = u32::from_le_bytes(u32_buf);
    debug_assert_eq!(cursor.position() as usize, FIXED_HEADER_SIZE);

    // SECURITY: bound the entry count before allocating for it.
    if table_entry_count > alphabet_size {
        return Err(HuffmanError::ContainerFormat(format!(
            "Table declares {} entries for an alphabet of {} symbols",
            table_entry_count, alphabet_size
        )));
    }
    let table_budget = bytes.len() - MIN_CONTAINER_SIZE;
    if (table_entry_count as usize).saturating_mul(RECORD_FIXED_SIZE + 1) > table_budget {
        return Err(HuffmanError::ContainerFormat(format!(
            "Table declares {} entries but only {} bytes remain",
            table_entry_count, table_budget
        )));
    }

    let code_table =
        CodeTable::read_records(&mut cursor, alphabet_size, table_entry_count as usize)?;

    cursor.read_exact(&mut u64_buf).map_err(map_err)?;
    let payload_bits = u64::from_le_bytes(u64_buf);
    cursor.read_exact(&mut u64_buf).map_err(map_err)?;
    let payload_len = u64::from_le_bytes(u64_buf);

    if payload_len != payload_bits.div_ceil(8) {
        return Err(HuffmanError::ContainerFormat(format!(
            "Payload length {} does not match {} declared bits",
            payload_len, payload_bits
        )));
    }

    let header_size = cursor.position() as usize;
    let remaining = (bytes.len() - header_size) as u64;
    if remaining != payload_len {
        return Err(HuffmanError::ContainerFormat(format!(
            "Expected {} payload bytes, found {}",
            payload_len, remaining
        )));
    }
    debug_assert!(header_size >= FIXED_HEADER_SIZE + PAYLOAD_PREFIX_SIZE);

    let info = HeaderInfo {
        format_version: version,
        alphabet_size,
        symbol_count,
        table_entry_count,
        payload_bits,
        header_size,
        payload_size: payload_len as usize,
    };
    Ok((info, code_table))
}

//==================================================================================
// Unit Tests
//==================================================================================
