//! File level conversion: read a PCX file, decode it and write the packed
//! result next to it (or wherever the settings say).

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compression::{PaletteError, RleDecompressionError};
use crate::constants::{BINARY_EXT, HEADER_EXT};
use crate::image::encoder::EncodingError;
use crate::image::{decode_with, encode_binary, encode_header, DecodeError, DecodeOptions};
use crate::image::{EncoderOptions, GbaAsset};

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Cannot open file {}", .path.display())]
    FileNotFound { path: PathBuf, source: io::Error },
    #[error("Cannot read file {}", .path.display())]
    Unreadable { path: PathBuf, source: io::Error },
    #[error("Cannot allocate {0} bytes")]
    AllocationFailure(usize),
    #[error("Unusable path {}: no file name, or it names the input file", .0.display())]
    InvalidPath(PathBuf),
    #[error("Cannot create file {}", .path.display())]
    OutputWriteFailure { path: PathBuf, source: io::Error },

    #[error(transparent)]
    DecodeFailed(#[from] DecodeError),
    #[error(transparent)]
    EncodeFailed(#[from] EncodingError),
}

/// Coarse failure categories, one per way a conversion can go wrong.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArguments,
    FileNotFound,
    Unreadable,
    AllocationFailure,
    UnsupportedFormat,
    InvalidSignature,
    UnsupportedEncoding,
    InvalidDimensions,
    TruncatedFile,
    CorruptData,
    InvalidPath,
    OutputWriteFailure,
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::FileNotFound { .. } => ErrorKind::FileNotFound,
            ConvertError::Unreadable { .. } => ErrorKind::Unreadable,
            ConvertError::AllocationFailure(_) => ErrorKind::AllocationFailure,
            ConvertError::InvalidPath(_) => ErrorKind::InvalidPath,
            ConvertError::OutputWriteFailure { .. } => ErrorKind::OutputWriteFailure,
            ConvertError::DecodeFailed(err) => match err {
                DecodeError::TruncatedFile(_) => ErrorKind::TruncatedFile,
                DecodeError::UnsupportedBitsPerPixel(_)
                | DecodeError::UnsupportedColorPlanes(_) => ErrorKind::UnsupportedFormat,
                DecodeError::InvalidSignature(_) => ErrorKind::InvalidSignature,
                DecodeError::UnsupportedEncoding(_) => ErrorKind::UnsupportedEncoding,
                DecodeError::InvalidDimensions { .. } => ErrorKind::InvalidDimensions,
                DecodeError::DecompressionFailed(rle) => match rle {
                    RleDecompressionError::AllocationFailed(_) => ErrorKind::AllocationFailure,
                    RleDecompressionError::Overflow { .. } => ErrorKind::CorruptData,
                    RleDecompressionError::Truncated { .. } => ErrorKind::TruncatedFile,
                },
                DecodeError::PaletteFailed(PaletteError::TooShort(_)) => ErrorKind::TruncatedFile,
            },
            ConvertError::EncodeFailed(err) => match err {
                EncodingError::InvalidName(_) | EncodingError::InvalidLayout => {
                    ErrorKind::InvalidArguments
                }
                EncodingError::FormatFailed(_) | EncodingError::SerializationFailed(_) => {
                    ErrorKind::OutputWriteFailure
                }
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// C header with `#define`s and `u16` arrays.
    #[default]
    Header,
    /// bincode serialized `GbaAsset`.
    Binary,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Header => HEADER_EXT,
            OutputFormat::Binary => BINARY_EXT,
        }
    }
}

/// Everything a conversion can be told from the outside.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub decode: DecodeOptions,
    pub encoder: EncoderOptions,
    pub format: OutputFormat,
    /// Output path; derived from the input path when unset.
    pub output: Option<PathBuf>,
    /// Array and define prefix; derived from the input file name when unset.
    pub name: Option<String>,
}

/// Result of an in-memory conversion.
#[derive(Debug)]
pub struct Rendered {
    pub asset: GbaAsset,
    pub bits_per_pixel: u8,
    pub bytes: Vec<u8>,
}

/// Summary of a finished file conversion.
#[derive(Debug)]
pub struct Conversion {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u8,
}

/// The input file name without its extension, turned into a C identifier.
pub fn array_name_for(input: &Path) -> Result<String, ConvertError> {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| ConvertError::InvalidPath(input.to_path_buf()))?;

    let mut name: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }

    Ok(name)
}

/// The input path with its extension, whatever its length, replaced.
pub fn output_path_for(input: &Path, format: OutputFormat) -> Result<PathBuf, ConvertError> {
    if input.file_stem().map_or(true, |stem| stem.is_empty()) {
        return Err(ConvertError::InvalidPath(input.to_path_buf()));
    }
    Ok(input.with_extension(format.extension()))
}

/// True when both paths name the same file, also through `.`/`..` or links.
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Reads the whole file, reserving the buffer up front so a failed
/// allocation is reported instead of aborting.
pub fn load_input(path: &Path) -> Result<Vec<u8>, ConvertError> {
    let mut file = File::open(path).map_err(|source| {
        error!("Cannot open file {}: {}", path.display(), source);
        match source.kind() {
            io::ErrorKind::NotFound => ConvertError::FileNotFound {
                path: path.to_path_buf(),
                source,
            },
            _ => ConvertError::Unreadable {
                path: path.to_path_buf(),
                source,
            },
        }
    })?;

    let unreadable = |source: io::Error| ConvertError::Unreadable {
        path: path.to_path_buf(),
        source,
    };
    let size = file.metadata().map_err(unreadable)?.len() as usize;

    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(size)
        .map_err(|_| ConvertError::AllocationFailure(size))?;
    file.read_to_end(&mut buffer).map_err(unreadable)?;
    debug!("Read {} bytes from {}", buffer.len(), path.display());

    Ok(buffer)
}

/// Decodes PCX bytes and renders them in the configured output format.
pub fn convert_bytes(data: &[u8], name: &str, settings: &Settings) -> Result<Rendered, ConvertError> {
    let image = decode_with(data, &settings.decode)?;
    let asset = GbaAsset::from_image(name, &image)?;

    let bytes = match settings.format {
        OutputFormat::Header => encode_header(&asset, &settings.encoder)?.into_bytes(),
        OutputFormat::Binary => encode_binary(&asset)?,
    };

    Ok(Rendered {
        asset,
        bits_per_pixel: image.header.bits_per_pixel,
        bytes,
    })
}

/// Converts `input` and writes the result to disk.
pub fn convert_file(input: &Path, settings: &Settings) -> Result<Conversion, ConvertError> {
    info!("Converting {}", input.display());

    let name = match &settings.name {
        Some(name) => name.clone(),
        None => array_name_for(input)?,
    };
    let output = match &settings.output {
        Some(output) => output.clone(),
        None => output_path_for(input, settings.format)?,
    };
    debug!("Array name {}, output {}", name, output.display());

    if same_file(input, &output) {
        error!(
            "Output {} would overwrite the input file",
            output.display()
        );
        return Err(ConvertError::InvalidPath(output));
    }

    let rendered = {
        let data = load_input(input)?;
        convert_bytes(&data, &name, settings)?
    };

    fs::write(&output, &rendered.bytes).map_err(|source| {
        error!("Cannot create file {}: {}", output.display(), source);
        ConvertError::OutputWriteFailure {
            path: output.clone(),
            source,
        }
    })?;
    info!(
        "Wrote {} bytes to {}",
        rendered.bytes.len(),
        output.display()
    );

    Ok(Conversion {
        input: input.to_path_buf(),
        output,
        width: rendered.asset.width,
        height: rendered.asset.height,
        bits_per_pixel: rendered.bits_per_pixel,
    })
}
