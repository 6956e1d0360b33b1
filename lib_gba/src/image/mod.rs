pub mod decoder;
pub mod encoder;
pub mod format;
pub mod pcx;

pub use decoder::{decode, decode_with, parse_header, DecodeError, DecodeOptions};
pub use encoder::{encode_binary, encode_header, pack_pixels, EncoderOptions, GbaAsset};
pub use pcx::encode_pcx;
