//! Writer for 8-bpp run-length encoded PCX files.
//!
//! Odd-width scanlines are padded with one zero byte so `bytes_per_line` is
//! even, as ZSoft's format requires.

use log::{debug, error};
use thiserror::Error;

use super::format::PcxHeader;
use crate::compression::{rle_compression, RleCompressionError};
use crate::constants::{
    ENCODING_RLE, MANUFACTURER_ZSOFT, PALETTE_COLORS, PALETTE_MARKER, SUPPORTED_BITS_PER_PIXEL,
};

const VERSION_3_0: u8 = 5;
const DEFAULT_DPI: u16 = 72;

#[derive(Error, Debug)]
pub enum PcxWriteError {
    #[error("Image dimensions {width}x{height} cannot be stored in a PCX header")]
    InvalidDimensions { width: usize, height: usize },
    #[error("Expected {expected} pixels, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },
    #[error("Pixel data compression failed")]
    CompressionFailed(#[from] RleCompressionError),
}

/// Builds a complete PCX file from palette indices and 8-bit RGB colors.
pub fn encode_pcx(
    width: usize,
    height: usize,
    pixels: &[u8],
    palette: &[[u8; 3]; PALETTE_COLORS],
) -> Result<Vec<u8>, PcxWriteError> {
    let max = i16::MAX as usize + 1;
    if width == 0 || height == 0 || width > max || height > max {
        error!("Cannot write a {}x{} PCX file", width, height);
        return Err(PcxWriteError::InvalidDimensions { width, height });
    }
    if pixels.len() != width * height {
        return Err(PcxWriteError::PixelCountMismatch {
            expected: width * height,
            actual: pixels.len(),
        });
    }

    let bytes_per_line = width + width % 2;
    let header = PcxHeader {
        manufacturer: MANUFACTURER_ZSOFT,
        version: VERSION_3_0,
        encoding: ENCODING_RLE,
        bits_per_pixel: SUPPORTED_BITS_PER_PIXEL,
        x_min: 0,
        y_min: 0,
        x_max: (width - 1) as i16,
        y_max: (height - 1) as i16,
        h_dpi: DEFAULT_DPI,
        v_dpi: DEFAULT_DPI,
        color_planes: 1,
        bytes_per_line: bytes_per_line as u16,
        palette_info: 1,
    };

    let padded: Vec<u8> = if bytes_per_line == width {
        pixels.to_vec()
    } else {
        pixels
            .chunks_exact(width)
            .flat_map(|line| line.iter().copied().chain([0]))
            .collect()
    };
    let compressed = rle_compression(&padded, bytes_per_line)?;
    debug!(
        "Compressed {} pixels into {} bytes",
        pixels.len(),
        compressed.len()
    );

    let mut file = Vec::with_capacity(PcxHeader::SIZE + compressed.len() + 1 + palette.len() * 3);
    file.extend_from_slice(&header.to_bytes());
    file.extend_from_slice(&compressed);
    file.push(PALETTE_MARKER);
    for color in palette {
        file.extend_from_slice(color);
    }

    Ok(file)
}
