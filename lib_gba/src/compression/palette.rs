use log::{debug, error};
use thiserror::Error;

use crate::constants::{PALETTE_COLORS, PALETTE_SIZE};

#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("File of {0} bytes is too short to hold a 256 color palette")]
    TooShort(usize),
}

/// 256 colors with 5-bit channels, in (R, G, B) order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: [[u8; 3]; PALETTE_COLORS],
}

impl Palette {
    pub fn new(colors: [[u8; 3]; PALETTE_COLORS]) -> Self {
        Self { colors }
    }

    pub fn colors(&self) -> &[[u8; 3]; PALETTE_COLORS] {
        &self.colors
    }

    /// The palette in file layout: `r0, g0, b0, r1, ...`.
    pub fn as_flat(&self) -> &[u8] {
        self.colors.as_flattened()
    }

    /// Every color packed as a 5-5-5 word.
    pub fn packed(&self) -> Vec<u16> {
        self.colors.iter().map(|&color| pack_bgr555(color)).collect()
    }
}

/// Maps an 8-bit channel onto 0..=31, truncating.
pub fn quantize_channel(value: u8) -> u8 {
    value / 8
}

/// Packs a 5-bit color with red in the low bits: `r | g << 5 | b << 10`.
pub fn pack_bgr555([r, g, b]: [u8; 3]) -> u16 {
    u16::from(r & 0x1F) | u16::from(g & 0x1F) << 5 | u16::from(b & 0x1F) << 10
}

/// Reads the last 768 bytes of a PCX file as 256 RGB colors and quantizes
/// every channel to 5 bits.
///
/// # Errors
/// - Returns `PaletteError::TooShort` if the file holds fewer than 768 bytes
pub fn extract_palette(file: &[u8]) -> Result<Palette, PaletteError> {
    if file.len() < PALETTE_SIZE {
        error!("File of {} bytes cannot hold a palette", file.len());
        return Err(PaletteError::TooShort(file.len()));
    }

    let raw = &file[file.len() - PALETTE_SIZE..];
    let mut colors = [[0u8; 3]; PALETTE_COLORS];
    for (color, rgb) in colors.iter_mut().zip(raw.chunks_exact(3)) {
        *color = [
            quantize_channel(rgb[0]),
            quantize_channel(rgb[1]),
            quantize_channel(rgb[2]),
        ];
    }
    debug!("Palette extracted, first color {:?}", colors[0]);

    Ok(Palette::new(colors))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_bounds() {
        assert_eq!(quantize_channel(0), 0);
        assert_eq!(quantize_channel(7), 0);
        assert_eq!(quantize_channel(8), 1);
        assert_eq!(quantize_channel(255), 31);
    }

    #[test]
    fn test_quantize_truncates_full_range() {
        for value in 0..=255u8 {
            assert_eq!(quantize_channel(value), value >> 3);
        }
    }

    #[test]
    fn test_pack_bgr555() {
        assert_eq!(pack_bgr555([31, 0, 16]), 0x401F);
        assert_eq!(pack_bgr555([0, 31, 0]), 0x03E0);
        assert_eq!(pack_bgr555([31, 31, 31]), 0x7FFF);
        assert_eq!(pack_bgr555([0, 0, 0]), 0);
    }

    #[test]
    fn test_palette_too_short() {
        let file = vec![0; PALETTE_SIZE - 1];
        assert!(matches!(
            extract_palette(&file),
            Err(PaletteError::TooShort(767))
        ));
    }

    #[test]
    fn test_palette_reads_file_tail() {
        let mut file = vec![0xAA; 10];
        file.extend((0..PALETTE_SIZE).map(|i| i as u8));

        let palette = extract_palette(&file).unwrap();
        assert_eq!(palette.colors()[0], [0, 0, 0]);
        assert_eq!(palette.colors()[1], [0, 0, 0]);
        assert_eq!(palette.colors()[3], [1, 1, 1]);
        assert_eq!(palette.colors()[85], [31, 0, 0]);
        assert_eq!(palette.as_flat().len(), PALETTE_SIZE);
        assert_eq!(palette.as_flat()[255], 31);
        assert_eq!(palette.as_flat()[256], 0);
    }

    #[test]
    fn test_palette_packed() {
        let mut file = vec![0; PALETTE_SIZE];
        file[..3].copy_from_slice(&[255, 0, 128]);

        let packed = extract_palette(&file).unwrap().packed();
        assert_eq!(packed.len(), PALETTE_COLORS);
        assert_eq!(packed[0], 0x401F);
        assert!(packed[1..].iter().all(|&word| word == 0));
    }
}
