//! The decode orchestrator: rebuilds the tree from the container's code table
//! and walks the payload through it one bit at a time.

use crate::codec::container::Container;
use crate::error::HuffmanError;
use crate::kernels::bitstream::BitReader;
use crate::kernels::tree::NodeKind;
use crate::types::Symbol;

/// Decodes exactly `container.symbol_count` symbols.
///
/// Decoding stops the moment the declared count is reached, so the zero
/// padding in the final payload byte is never interpreted as codes. Fails
/// with `TruncatedStream` if the meaningful bits run out first and with
/// `CorruptTree` if a bit leads to a missing child. On failure nothing is
/// returned.
pub fn decode(container: &Container) -> Result<Vec<Symbol>, HuffmanError> {
    decode_counted(container).map(|(symbols, _)| symbols)
}

/// Decodes like `decode`, also returning the number of payload bits consumed.
pub(crate) fn decode_counted(container: &Container) -> Result<(Vec<Symbol>, u64), HuffmanError> {
    let expected = container.symbol_count;
    if expected == 0 {
        return Ok((Vec::new(), 0));
    }
    if container.code_table.alphabet_size() != container.alphabet_size {
        return Err(HuffmanError::ContainerFormat(format!(
            "Container alphabet {} disagrees with code table alphabet {}",
            container.alphabet_size,
            container.code_table.alphabet_size()
        )));
    }
    if container.code_table.is_empty() {
        return Err(HuffmanError::CorruptTree(format!(
            "No code table for a stream of {} symbols",
            expected
        )));
    }

    let tree = container.code_table.to_tree()?;
    let root = tree
        .root()
        .ok_or_else(|| HuffmanError::CorruptTree("Rebuilt tree has no root".into()))?;
    let mut reader = BitReader::new(&container.payload, container.payload_bits)?;

    // Every symbol costs at least one bit, which bounds a forged count.
    let capacity = expected.min(container.payload_bits);
    let mut symbols = Vec::with_capacity(usize::try_from(capacity).unwrap_or(0));
    let mut decoded: u64 = 0;
    let mut cursor = root;

    while decoded < expected {
        let bit = reader.read_bit().ok_or(HuffmanError::TruncatedStream {
            decoded,
            expected,
        })?;
        cursor = tree.child(cursor, bit)?;
        if let NodeKind::Leaf { symbol } = tree.node(cursor)?.kind {
            symbols.push(symbol);
            decoded += 1;
            cursor = root;
        }
    }

    if reader.remaining() > 0 {
        log::warn!(
            "decode: {} meaningful bits left over after {} symbols",
            reader.remaining(),
            expected
        );
    }
    log_metric!(
        "event" = "decode",
        "symbols" = decoded,
        "bits_consumed" = reader.position()
    );

    Ok((symbols, reader.position()))
}
