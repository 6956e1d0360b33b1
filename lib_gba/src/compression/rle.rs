//! PCX run-length coding.
//!
//! A byte with both top bits set and a non-zero count (`> 0xC0`) starts a run:
//! its low six bits are the run length and the next byte is the value. Any
//! other byte, `0xC0` included, is a literal palette index.

use log::{debug, error};
use thiserror::Error;

use crate::constants::PALETTE_MARKER;

pub const RUN_MARKER: u8 = 0xC0;
pub const MAX_RUN: usize = 63;

#[derive(Error, Debug)]
pub enum RleCompressionError {
    #[error("Invalid line length: {bytes_per_line} bytes per line for {len} pixels")]
    InvalidLineLength { len: usize, bytes_per_line: usize },
}

#[derive(Error, Debug)]
pub enum RleDecompressionError {
    #[error("Cannot allocate a pixel buffer of {0} bytes")]
    AllocationFailed(usize),
    #[error("Corrupt data at position {position}: output would exceed {capacity} pixels")]
    Overflow { position: usize, capacity: usize },
    #[error("Stream ended after {decoded} of {expected} pixels")]
    Truncated { decoded: usize, expected: usize },
}

/// Decodes a PCX run-length stream into exactly `pixel_count` palette indices.
///
/// # Arguments
/// * `data` - The compressed region between the header and the palette
/// * `pixel_count` - Capacity of the output buffer (`width * height`)
///
/// # Errors
/// * `Overflow` as soon as a run or literal would not fit the buffer
/// * `Truncated` if the stream ends before the buffer is full
/// * `AllocationFailed` if the buffer cannot be reserved
pub fn rle_decompression(
    data: &[u8],
    pixel_count: usize,
) -> Result<Vec<u8>, RleDecompressionError> {
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(pixel_count)
        .map_err(|_| RleDecompressionError::AllocationFailed(pixel_count))?;

    let mut position = 0;
    while position < data.len() {
        if pixels.len() == pixel_count {
            // Encoders put the palette marker right after the last scanline.
            if data[position..] == [PALETTE_MARKER] {
                debug!("Skipping palette marker at position {}", position);
                break;
            }
            error!(
                "{} bytes left over at position {} with a full buffer",
                data.len() - position,
                position
            );
            return Err(RleDecompressionError::Overflow {
                position,
                capacity: pixel_count,
            });
        }

        let byte = data[position];
        let (count, value, consumed) = if byte > RUN_MARKER {
            let value = match data.get(position + 1) {
                Some(&value) => value,
                None => {
                    error!("Run marker at position {} has no value byte", position);
                    return Err(RleDecompressionError::Truncated {
                        decoded: pixels.len(),
                        expected: pixel_count,
                    });
                }
            };
            ((byte - RUN_MARKER) as usize, value, 2)
        } else {
            (1, byte, 1)
        };

        if pixels.len() + count > pixel_count {
            error!(
                "Run of {} at position {} overflows buffer ({} of {} used)",
                count,
                position,
                pixels.len(),
                pixel_count
            );
            return Err(RleDecompressionError::Overflow {
                position,
                capacity: pixel_count,
            });
        }

        pixels.resize(pixels.len() + count, value);
        position += consumed;
    }

    if pixels.len() < pixel_count {
        error!(
            "Stream exhausted after {} of {} pixels",
            pixels.len(),
            pixel_count
        );
        return Err(RleDecompressionError::Truncated {
            decoded: pixels.len(),
            expected: pixel_count,
        });
    }

    debug!("Decoded {} pixels from {} bytes", pixels.len(), position);
    Ok(pixels)
}

/// Encodes palette indices the way PCX writers do: line by line, runs capped
/// at 63, and every value that looks like a marker written as a run.
///
/// # Arguments
/// * `pixels` - Row-major palette indices
/// * `bytes_per_line` - Scanline length, runs never cross it
pub fn rle_compression(
    pixels: &[u8],
    bytes_per_line: usize,
) -> Result<Vec<u8>, RleCompressionError> {
    if bytes_per_line == 0 || pixels.len() % bytes_per_line != 0 {
        return Err(RleCompressionError::InvalidLineLength {
            len: pixels.len(),
            bytes_per_line,
        });
    }

    let mut encoded = Vec::with_capacity(pixels.len());

    for line in pixels.chunks(bytes_per_line) {
        let mut i = 0;
        while i < line.len() {
            let value = line[i];
            let mut count = 1;
            while i + count < line.len() && line[i + count] == value && count < MAX_RUN {
                count += 1;
            }

            if count > 1 || value >= RUN_MARKER {
                encoded.push(RUN_MARKER | count as u8);
            }
            encoded.push(value);
            i += count;
        }
    }

    Ok(encoded)
}
