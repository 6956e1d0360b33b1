use super::format::{PcxHeader, PcxImage};
use crate::compression::{extract_palette, rle_decompression, PaletteError, RleDecompressionError};
use crate::constants::{
    ENCODING_RLE, HEADER_SIZE, MANUFACTURER_ZSOFT, PALETTE_SIZE, SUPPORTED_BITS_PER_PIXEL,
};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("File of {0} bytes is too short for a PCX header and palette")]
    TruncatedFile(usize),
    #[error("Input file is not 8-bpp ({0} bits per pixel)")]
    UnsupportedBitsPerPixel(u8),
    #[error("Input file has {0} color planes, only 1 is supported")]
    UnsupportedColorPlanes(u8),
    #[error("Invalid PCX signature 0x{0:02x}")]
    InvalidSignature(u8),
    #[error("Unsupported PCX encoding {0}")]
    UnsupportedEncoding(u8),
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Pixel data decoding failed")]
    DecompressionFailed(#[from] RleDecompressionError),
    #[error("Palette extraction failed")]
    PaletteFailed(#[from] PaletteError),
}

/// Controls how much of the header is checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Also reject a wrong signature, a non-RLE encoding and multi-plane images.
    pub strict: bool,
}

fn read_i16(bytes: &[u8; HEADER_SIZE], offset: usize) -> i16 {
    i16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u16(bytes: &[u8; HEADER_SIZE], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

/// Reads the 128-byte header at the start of `data` field by field.
pub fn parse_header(data: &[u8]) -> Result<PcxHeader, DecodeError> {
    let bytes: &[u8; HEADER_SIZE] = data
        .get(..HEADER_SIZE)
        .and_then(|header| header.try_into().ok())
        .ok_or_else(|| {
            error!("File of {} bytes has no complete header", data.len());
            DecodeError::TruncatedFile(data.len())
        })?;

    Ok(PcxHeader {
        manufacturer: bytes[PcxHeader::MANUFACTURER_OFFSET],
        version: bytes[PcxHeader::VERSION_OFFSET],
        encoding: bytes[PcxHeader::ENCODING_OFFSET],
        bits_per_pixel: bytes[PcxHeader::BITS_PER_PIXEL_OFFSET],
        x_min: read_i16(bytes, PcxHeader::X_MIN_OFFSET),
        y_min: read_i16(bytes, PcxHeader::Y_MIN_OFFSET),
        x_max: read_i16(bytes, PcxHeader::X_MAX_OFFSET),
        y_max: read_i16(bytes, PcxHeader::Y_MAX_OFFSET),
        h_dpi: read_u16(bytes, PcxHeader::H_DPI_OFFSET),
        v_dpi: read_u16(bytes, PcxHeader::V_DPI_OFFSET),
        color_planes: bytes[PcxHeader::COLOR_PLANES_OFFSET],
        bytes_per_line: read_u16(bytes, PcxHeader::BYTES_PER_LINE_OFFSET),
        palette_info: read_u16(bytes, PcxHeader::PALETTE_INFO_OFFSET),
    })
}

fn validate_header(header: &PcxHeader, options: &DecodeOptions) -> Result<(), DecodeError> {
    if header.bits_per_pixel != SUPPORTED_BITS_PER_PIXEL {
        error!("Input file is {}-bpp", header.bits_per_pixel);
        return Err(DecodeError::UnsupportedBitsPerPixel(header.bits_per_pixel));
    }

    if options.strict {
        if header.manufacturer != MANUFACTURER_ZSOFT {
            return Err(DecodeError::InvalidSignature(header.manufacturer));
        }
        if header.encoding != ENCODING_RLE {
            return Err(DecodeError::UnsupportedEncoding(header.encoding));
        }
        if header.color_planes != 1 {
            return Err(DecodeError::UnsupportedColorPlanes(header.color_planes));
        }
    } else if header.manufacturer != MANUFACTURER_ZSOFT || header.encoding != ENCODING_RLE {
        warn!(
            "Header looks non-standard (signature 0x{:02x}, encoding {}), decoding anyway",
            header.manufacturer, header.encoding
        );
    }

    let (width, height) = (header.width(), header.height());
    if width <= 0 || height <= 0 {
        error!("Invalid image dimensions {}x{}", width, height);
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    Ok(())
}

/// Bytes per encoded scanline: `bytes_per_line` when it leaves room for the
/// padding even-width writers add, the image width otherwise.
fn scanline_stride(header: &PcxHeader) -> usize {
    usize::from(header.bytes_per_line).max(header.width() as usize)
}

fn strip_padding(decoded: &[u8], width: usize, stride: usize) -> Vec<u8> {
    decoded
        .chunks_exact(stride)
        .flat_map(|line| &line[..width])
        .copied()
        .collect()
}

pub fn decode(data: &[u8]) -> Result<PcxImage, DecodeError> {
    decode_with(data, &DecodeOptions::default())
}

/// Decodes an 8-bpp PCX file held entirely in memory.
///
/// The header is checked before anything else is read, so an unsupported bit
/// depth is reported without touching the pixel data.
pub fn decode_with(data: &[u8], options: &DecodeOptions) -> Result<PcxImage, DecodeError> {
    let header = parse_header(data)?;
    debug!("Header parsed: {:?}", header);

    validate_header(&header, options)?;
    debug!("Header validated (strict: {})", options.strict);

    if data.len() < HEADER_SIZE + PALETTE_SIZE {
        error!(
            "File of {} bytes cannot hold both header and palette",
            data.len()
        );
        return Err(DecodeError::TruncatedFile(data.len()));
    }

    // Both dimensions are at most 32768, the product fits any usize >= 32 bits.
    let (width, height) = (header.width() as usize, header.height() as usize);
    let stride = scanline_stride(&header);
    let compressed = &data[HEADER_SIZE..data.len() - PALETTE_SIZE];
    debug!(
        "Decoding {} compressed bytes into {} lines of {} bytes",
        compressed.len(),
        height,
        stride
    );

    let decoded = rle_decompression(compressed, stride * height)?;
    let pixels = if stride == width {
        decoded
    } else {
        debug!("Stripping {} padding bytes per line", stride - width);
        strip_padding(&decoded, width, stride)
    };
    let palette = extract_palette(data)?;

    info!(
        "Decoded {}x{} image with a {} color palette",
        header.width(),
        header.height(),
        palette.colors().len()
    );

    Ok(PcxImage::new(header, pixels, palette))
}
