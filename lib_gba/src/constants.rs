/// Extension of the generated C header.
pub const HEADER_EXT: &str = "h";
/// Extension of the generated binary asset.
pub const BINARY_EXT: &str = "bin";

pub const HEADER_SIZE: usize = 128;
pub const PALETTE_COLORS: usize = 256;
pub const PALETTE_SIZE: usize = PALETTE_COLORS * 3;

/// Byte written by VGA era encoders right before the trailing palette.
pub const PALETTE_MARKER: u8 = 0x0C;

pub const MANUFACTURER_ZSOFT: u8 = 0x0A;
pub const ENCODING_RLE: u8 = 1;
pub const SUPPORTED_BITS_PER_PIXEL: u8 = 8;

pub const DATA_SUFFIX: &str = "Data";
pub const PALETTE_SUFFIX: &str = "Palette";

pub const BANNER: &str = "PCX to GBA Converter";
