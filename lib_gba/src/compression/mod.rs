pub mod palette;
pub mod rle;

pub use palette::{extract_palette, pack_bgr555, quantize_channel, Palette, PaletteError};
pub use rle::{rle_compression, rle_decompression, RleCompressionError, RleDecompressionError};
