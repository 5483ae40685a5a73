//! The encode orchestrator: FrequencyTable -> HuffmanTree -> CodeTable -> BitWriter.
//!
//! Every call owns its frequency table, tree, code table and writer; nothing
//! outlives the call except the returned `Container`.

use std::time::Instant;

use crate::codec::container::Container;
use crate::config::CoderConfig;
use crate::error::HuffmanError;
use crate::kernels::bitstream::{BitWriter, PackedBits};
use crate::kernels::code_table::CodeTable;
use crate::kernels::frequency::FrequencyTable;
use crate::kernels::tree::HuffmanTree;
use crate::types::Symbol;

/// Encodes `symbols` into a self-describing container.
///
/// Fails with `UnknownSymbol` if any symbol lies outside the configured
/// alphabet. An empty input yields `Container::empty`.
pub fn encode(symbols: &[Symbol], config: &CoderConfig) -> Result<Container, HuffmanError> {
    config.validate()?;
    let start = Instant::now();
    let alphabet_size = config.alphabet.size();

    let frequencies = if config.frequency_shards > 1 {
        FrequencyTable::from_symbols_sharded(symbols, alphabet_size, config.frequency_shards)?
    } else {
        FrequencyTable::from_symbols(symbols, alphabet_size)?
    };
    if frequencies.is_empty() {
        log::debug!("encode: empty input over {}", config.alphabet);
        return Ok(Container::empty(alphabet_size));
    }

    let tree = HuffmanTree::build(&frequencies)?;
    let code_table = CodeTable::from_tree(&tree, alphabet_size)?;
    drop(tree);

    let expected_bits = code_table.encoded_bit_len(&frequencies)?;
    let packed = pack_symbols(symbols, &code_table, expected_bits)?;
    if packed.bit_count != expected_bits {
        return Err(HuffmanError::InternalError(format!(
            "Encoded {} bits but the code table predicts {}",
            packed.bit_count, expected_bits
        )));
    }

    log_metric!(
        "event" = "encode",
        "symbols" = symbols.len(),
        "distinct" = frequencies.distinct(),
        "payload_bits" = packed.bit_count
    );
    if config.enable_stats_logging {
        log::info!(
            "encode: {} symbols ({} distinct, {}) -> {} bits ({:.3} bits/symbol) in {:.2?}",
            symbols.len(),
            frequencies.distinct(),
            config.alphabet,
            packed.bit_count,
            packed.bit_count as f64 / symbols.len() as f64,
            start.elapsed()
        );
    }

    Ok(Container {
        alphabet_size,
        symbol_count: symbols.len() as u64,
        code_table,
        payload: packed.bytes,
        payload_bits: packed.bit_count,
    })
}

/// Writes each symbol's code, in input order, into a fresh bit writer.
fn pack_symbols(
    symbols: &[Symbol],
    code_table: &CodeTable,
    expected_bits: u64,
) -> Result<PackedBits, HuffmanError> {
    let mut writer = BitWriter::with_capacity(usize::try_from(expected_bits).unwrap_or(0));
    for &symbol in symbols {
        let code = code_table
            .get(symbol)
            .ok_or(HuffmanError::UnknownSymbol {
                symbol: u64::from(symbol),
                alphabet_size: code_table.alphabet_size(),
            })?;
        writer.push_bits(code);
    }
    Ok(writer.finish())
}
