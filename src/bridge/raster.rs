//! Adapters between the coder's flat symbol sequences and its two collaborators:
//! byte-oriented text and 24-bit BGR raster images.
//!
//! A raster row holds `width` pixels of three bytes each (blue, green, red)
//! followed by zero padding up to a 4-byte boundary. Only pixels become
//! symbols; padding is recreated on the way back.

use bytemuck::{Pod, Zeroable};

use crate::error::HuffmanError;
use crate::traits::{SymbolSink, SymbolSource};
use crate::types::{Alphabet, Symbol};

//==================================================================================
// 1. Text
//==================================================================================

/// Borrowed text bytes, one symbol per byte in file order.
#[derive(Debug, Clone, Copy)]
pub struct TextSource<'a>(pub &'a [u8]);

impl SymbolSource for TextSource<'_> {
    fn alphabet(&self) -> Alphabet {
        Alphabet::Bytes
    }

    fn to_symbols(&self) -> Result<Vec<Symbol>, HuffmanError> {
        Ok(self.0.iter().map(|&b| Symbol::from(b)).collect())
    }
}

impl SymbolSink for Vec<u8> {
    type Layout = ();

    fn from_symbols(symbols: &[Symbol], _layout: ()) -> Result<Self, HuffmanError> {
        symbols
            .iter()
            .map(|&s| {
                if !Alphabet::Bytes.contains(s) {
                    return Err(HuffmanError::UnknownSymbol {
                        symbol: u64::from(s),
                        alphabet_size: Alphabet::BYTES_SIZE,
                    });
                }
                Ok(s as u8)
            })
            .collect()
    }
}

//==================================================================================
// 2. Raster
//==================================================================================

/// One pixel as stored in a 24-bit bottom-up bitmap row.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Bgr {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Bgr {
    /// Packs the pixel as `(r << 16) | (g << 8) | b`.
    pub fn to_symbol(self) -> Symbol {
        (Symbol::from(self.r) << 16) | (Symbol::from(self.g) << 8) | Symbol::from(self.b)
    }

    pub fn from_symbol(symbol: Symbol) -> Result<Self, HuffmanError> {
        if !Alphabet::Rgb24.contains(symbol) {
            return Err(HuffmanError::UnknownSymbol {
                symbol: u64::from(symbol),
                alphabet_size: Alphabet::RGB24_SIZE,
            });
        }
        Ok(Self {
            b: (symbol & 0xFF) as u8,
            g: ((symbol >> 8) & 0xFF) as u8,
            r: ((symbol >> 16) & 0xFF) as u8,
        })
    }
}

/// Dimensions needed to turn a decoded symbol sequence back into rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterLayout {
    pub width: u32,
    pub height: u32,
}

impl RasterLayout {
    /// Bytes per row: three per pixel, padded to a multiple of four.
    pub fn row_stride(&self) -> usize {
        (self.width as usize * 3 + 3) & !3
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// A 24-bit raster with padded rows, in storage order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub row_stride: usize,
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Wraps padded pixel rows. `pixels` must hold at least
    /// `row_stride * height` bytes; anything beyond is dropped.
    pub fn new(width: u32, height: u32, mut pixels: Vec<u8>) -> Result<Self, HuffmanError> {
        let layout = RasterLayout { width, height };
        let row_stride = layout.row_stride();
        let needed = row_stride
            .checked_mul(height as usize)
            .ok_or_else(|| HuffmanError::RasterLayout("Raster size overflows usize".into()))?;
        if pixels.len() < needed {
            return Err(HuffmanError::RasterLayout(format!(
                "{}x{} raster needs {} bytes ({} per row), got {}",
                width,
                height,
                needed,
                row_stride,
                pixels.len()
            )));
        }
        pixels.truncate(needed);
        Ok(Self {
            width,
            height,
            row_stride,
            pixels,
        })
    }

    pub fn layout(&self) -> RasterLayout {
        RasterLayout {
            width: self.width,
            height: self.height,
        }
    }

    /// The pixels of row `y`, without padding.
    pub fn row(&self, y: u32) -> Result<&[Bgr], HuffmanError> {
        let start = y as usize * self.row_stride;
        let end = start + self.width as usize * 3;
        let bytes = self.pixels.get(start..end).ok_or_else(|| {
            HuffmanError::RasterLayout(format!("Row {} is outside the raster", y))
        })?;
        Ok(bytemuck::try_cast_slice(bytes)?)
    }
}

impl SymbolSource for RasterImage {
    fn alphabet(&self) -> Alphabet {
        Alphabet::Rgb24
    }

    fn to_symbols(&self) -> Result<Vec<Symbol>, HuffmanError> {
        let mut symbols = Vec::with_capacity(self.layout().pixel_count() as usize);
        for y in 0..self.height {
            symbols.extend(self.row(y)?.iter().map(|px| px.to_symbol()));
        }
        Ok(symbols)
    }
}

impl SymbolSink for RasterImage {
    type Layout = RasterLayout;

    fn from_symbols(symbols: &[Symbol], layout: RasterLayout) -> Result<Self, HuffmanError> {
        if symbols.len() as u64 != layout.pixel_count() {
            return Err(HuffmanError::RasterLayout(format!(
                "{}x{} raster needs {} symbols, got {}",
                layout.width,
                layout.height,
                layout.pixel_count(),
                symbols.len()
            )));
        }
        let row_stride = layout.row_stride();
        let row_bytes = layout.width as usize * 3;
        let mut pixels = vec![0u8; row_stride * layout.height as usize];

        if row_bytes > 0 {
            for (row, chunk) in pixels
                .chunks_exact_mut(row_stride)
                .zip(symbols.chunks_exact(layout.width as usize))
            {
                let row_pixels: &mut [Bgr] = bytemuck::try_cast_slice_mut(&mut row[..row_bytes])?;
                for (px, &symbol) in row_pixels.iter_mut().zip(chunk) {
                    *px = Bgr::from_symbol(symbol)?;
                }
            }
        }

        Ok(Self {
            width: layout.width,
            height: layout.height,
            row_stride,
            pixels,
        })
    }
}
