// In: src/bridge/stateless_api.rs

use crate::bridge::raster::{RasterImage, RasterLayout, TextSource};
use crate::codec::{self, CompressionStats, Container};
use crate::config::CoderConfig;
use crate::error::HuffmanError;
use crate::traits::{SymbolSink, SymbolSource};
use crate::types::{Alphabet, Symbol};

/// Compresses an arbitrary symbol sequence into container bytes.
pub fn compress_symbols(symbols: &[Symbol], config: &CoderConfig) -> Result<Vec<u8>, HuffmanError> {
    codec::encode(symbols, config)?.to_bytes()
}

/// Decompresses container bytes back into the original symbol sequence.
pub fn decompress_symbols(bytes: &[u8]) -> Result<Vec<Symbol>, HuffmanError> {
    let container = Container::from_bytes(bytes)?;
    codec::decode(&container)
}

/// Compresses text with one symbol per byte.
pub fn compress_text(text: &[u8]) -> Result<Vec<u8>, HuffmanError> {
    compress_source(&TextSource(text))
}

pub fn decompress_text(bytes: &[u8]) -> Result<Vec<u8>, HuffmanError> {
    let container = Container::from_bytes(bytes)?;
    expect_alphabet(&container, Alphabet::Bytes)?;
    let symbols = codec::decode(&container)?;
    Vec::<u8>::from_symbols(&symbols, ())
}

/// Compresses the pixels of a raster in row order. Row padding is not stored;
/// the caller keeps `width` and `height` alongside the container.
pub fn compress_raster(image: &RasterImage) -> Result<Vec<u8>, HuffmanError> {
    compress_source(image)
}

/// Rebuilds a padded raster from container bytes. The container must hold
/// exactly `width * height` symbols of the 24-bit alphabet.
pub fn decompress_raster(bytes: &[u8], width: u32, height: u32) -> Result<RasterImage, HuffmanError> {
    let layout = RasterLayout { width, height };
    let container = Container::from_bytes(bytes)?;
    expect_alphabet(&container, Alphabet::Rgb24)?;
    if container.symbol_count != layout.pixel_count() {
        return Err(HuffmanError::RasterLayout(format!(
            "Container holds {} symbols but a {}x{} raster needs {}",
            container.symbol_count,
            width,
            height,
            layout.pixel_count()
        )));
    }

    let symbols = codec::decode(&container)?;
    RasterImage::from_symbols(&symbols, layout)
}

/// Analyzes a container without decoding its payload.
pub fn analyze_container(bytes: &[u8]) -> Result<CompressionStats, HuffmanError> {
    let info = Container::peek_info(bytes)?;

    let bits_per_symbol = if info.symbol_count == 0 {
        0.0
    } else {
        info.payload_bits as f64 / info.symbol_count as f64
    };

    Ok(CompressionStats {
        format_version: info.format_version,
        alphabet: Alphabet::from_size(info.alphabet_size)?,
        alphabet_size: info.alphabet_size,
        symbol_count: info.symbol_count,
        table_entries: info.table_entry_count,
        payload_bits: info.payload_bits,
        header_size: info.header_size,
        payload_size: info.payload_size,
        total_size: bytes.len(),
        bits_per_symbol,
    })
}

fn compress_source<S: SymbolSource>(source: &S) -> Result<Vec<u8>, HuffmanError> {
    let config = CoderConfig::with_alphabet(source.alphabet());
    compress_symbols(&source.to_symbols()?, &config)
}

fn expect_alphabet(container: &Container, expected: Alphabet) -> Result<(), HuffmanError> {
    let found = Alphabet::from_size(container.alphabet_size)?;
    if found != expected {
        return Err(HuffmanError::ContainerFormat(format!(
            "Expected a container over {}, found one over {}",
            expected, found
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_container_after_compression() {
        let text = b"aaaaaaaabbbbccd";
        let compressed = compress_text(text).unwrap();
        let stats = analyze_container(&compressed).unwrap();

        assert_eq!(stats.total_size, compressed.len());
        assert_eq!(stats.header_size + stats.payload_size, stats.total_size);
        assert_eq!(stats.symbol_count, text.len() as u64);
        assert_eq!(stats.table_entries, 4);
        assert_eq!(stats.alphabet_size, 256);
        assert_eq!(stats.alphabet, Alphabet::Bytes);
        assert!(stats.bits_per_symbol > 0.0 && stats.bits_per_symbol < 8.0);

        let json = stats.to_json().unwrap();
        assert!(json.contains("\"symbol_count\":15"));
        assert!(json.contains("\"alphabet\":{\"kind\":\"bytes\"}"));
    }

    #[test]
    fn test_analyze_empty_container() {
        let compressed = compress_text(b"").unwrap();
        let stats = analyze_container(&compressed).unwrap();
        assert_eq!(stats.symbol_count, 0);
        assert_eq!(stats.bits_per_symbol, 0.0);
        assert_eq!(stats.payload_size, 0);
        assert_eq!(stats.ratio_against(0), None);
    }
}
