use crate::compression::Palette;
use crate::constants::HEADER_SIZE;

/// The fields of the 128-byte PCX header this crate reads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PcxHeader {
    pub manufacturer: u8,
    pub version: u8,
    pub encoding: u8,
    pub bits_per_pixel: u8,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub h_dpi: u16,
    pub v_dpi: u16,
    pub color_planes: u8,
    pub bytes_per_line: u16,
    pub palette_info: u16,
}

impl PcxHeader {
    pub const SIZE: usize = HEADER_SIZE;

    pub const MANUFACTURER_OFFSET: usize = 0;
    pub const VERSION_OFFSET: usize = 1;
    pub const ENCODING_OFFSET: usize = 2;
    pub const BITS_PER_PIXEL_OFFSET: usize = 3;
    pub const X_MIN_OFFSET: usize = 4;
    pub const Y_MIN_OFFSET: usize = 6;
    pub const X_MAX_OFFSET: usize = 8;
    pub const Y_MAX_OFFSET: usize = 10;
    pub const H_DPI_OFFSET: usize = 12;
    pub const V_DPI_OFFSET: usize = 14;
    pub const COLOR_PLANES_OFFSET: usize = 65;
    pub const BYTES_PER_LINE_OFFSET: usize = 66;
    pub const PALETTE_INFO_OFFSET: usize = 68;

    /// `x_max + 1`; zero or negative for a malformed header.
    pub fn width(&self) -> i32 {
        i32::from(self.x_max) + 1
    }

    /// `y_max + 1`; zero or negative for a malformed header.
    pub fn height(&self) -> i32 {
        i32::from(self.y_max) + 1
    }

    /// Serializes the header back into its 128-byte on-disk form.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[Self::MANUFACTURER_OFFSET] = self.manufacturer;
        bytes[Self::VERSION_OFFSET] = self.version;
        bytes[Self::ENCODING_OFFSET] = self.encoding;
        bytes[Self::BITS_PER_PIXEL_OFFSET] = self.bits_per_pixel;
        for (offset, value) in [
            (Self::X_MIN_OFFSET, self.x_min),
            (Self::Y_MIN_OFFSET, self.y_min),
            (Self::X_MAX_OFFSET, self.x_max),
            (Self::Y_MAX_OFFSET, self.y_max),
        ] {
            bytes[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
        }
        for (offset, value) in [
            (Self::H_DPI_OFFSET, self.h_dpi),
            (Self::V_DPI_OFFSET, self.v_dpi),
            (Self::BYTES_PER_LINE_OFFSET, self.bytes_per_line),
            (Self::PALETTE_INFO_OFFSET, self.palette_info),
        ] {
            bytes[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
        }
        bytes[Self::COLOR_PLANES_OFFSET] = self.color_planes;
        bytes
    }
}

/// A decoded 8-bpp PCX image.
#[derive(Debug)]
pub struct PcxImage {
    pub header: PcxHeader,
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
    pub palette: Palette,
}

impl PcxImage {
    pub fn new(header: PcxHeader, pixels: Vec<u8>, palette: Palette) -> Self {
        let width = header.width().max(0) as usize;
        let height = header.height().max(0) as usize;
        Self {
            header,
            width,
            height,
            pixels,
            palette,
        }
    }

    /// Palette indices of one scanline, 0-based. `None` past the last line.
    pub fn line(&self, line: usize) -> Option<&[u8]> {
        if line >= self.height {
            return None;
        }
        self.pixels.get(line * self.width..(line + 1) * self.width)
    }
}
