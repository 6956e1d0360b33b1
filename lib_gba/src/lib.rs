pub mod compression;
pub mod constants;
pub mod convert;
pub mod image;

use log::*;
use std::io::Write;

pub use crate::convert::{convert_file, ConvertError, Conversion, ErrorKind, OutputFormat, Settings};
pub use crate::image::format::{PcxHeader, PcxImage};
pub use crate::image::{decode, decode_with, encode_header, DecodeOptions, EncoderOptions, GbaAsset};

/// Sends log records to stderr, `level` for this crate and the binary.
/// `RUST_LOG` takes precedence when set.
pub fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter(Some("lib_gba"), level)
        .filter(Some("pcx2gba"), level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}
