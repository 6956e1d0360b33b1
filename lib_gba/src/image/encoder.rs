use std::fmt::{self, Write};

use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::format::PcxImage;
use crate::constants::{BANNER, DATA_SUFFIX, PALETTE_SUFFIX};

#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("Invalid array name {0:?}")]
    InvalidName(String),
    #[error("At least one word per line is required")]
    InvalidLayout,
    #[error("Failed to format source text")]
    FormatFailed(#[from] fmt::Error),
    #[error("Failed to serialize binary asset")]
    SerializationFailed(#[from] bincode::Error),
}

/// Layout of the generated C source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderOptions {
    pub words_per_line: usize,
    pub indent: usize,
    pub element_type: String,
    pub data_suffix: String,
    pub palette_suffix: String,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            words_per_line: 10,
            indent: 20,
            element_type: "u16".to_string(),
            data_suffix: DATA_SUFFIX.to_string(),
            palette_suffix: PALETTE_SUFFIX.to_string(),
        }
    }
}

/// Pixel data and palette packed into 16-bit words, ready to be written out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GbaAsset {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u16>,
    pub palette: Vec<u16>,
}

impl GbaAsset {
    pub fn from_image(name: &str, image: &PcxImage) -> Result<Self, EncodingError> {
        if !is_identifier(name) {
            error!("{:?} cannot be used as a C identifier", name);
            return Err(EncodingError::InvalidName(name.to_string()));
        }

        let data = pack_pixels(&image.pixels);
        let palette = image.palette.packed();
        debug!(
            "Packed {} pixels into {} words, {} palette words",
            image.pixels.len(),
            data.len(),
            palette.len()
        );

        Ok(Self {
            name: name.to_string(),
            width: image.width as u32,
            height: image.height as u32,
            data,
            palette,
        })
    }
}

/// Packs pairs of palette indices as `low | high << 8`. A trailing odd pixel
/// gets a zero high byte.
pub fn pack_pixels(pixels: &[u8]) -> Vec<u16> {
    pixels
        .chunks(2)
        .map(|pair| u16::from(pair[0]) | u16::from(pair.get(1).copied().unwrap_or(0)) << 8)
        .collect()
}

pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn write_array(
    out: &mut String,
    options: &EncoderOptions,
    name: &str,
    words: &[u16],
) -> fmt::Result {
    let indent = " ".repeat(options.indent);
    writeln!(out, "const {} {}[] = {{", options.element_type, name)?;
    out.push_str(&indent);

    for (i, word) in words.iter().enumerate() {
        write!(out, "0x{:04x}", word)?;
        if i + 1 == words.len() {
            break;
        }
        if (i + 1) % options.words_per_line == 0 {
            write!(out, ",\n{}", indent)?;
        } else {
            out.push_str(", ");
        }
    }

    out.push_str("};\n");
    Ok(())
}

/// Renders the asset as a C header: dimension defines, then the data and
/// palette arrays.
pub fn encode_header(asset: &GbaAsset, options: &EncoderOptions) -> Result<String, EncodingError> {
    info!("Starting header encoding for {}", asset.name);

    if options.words_per_line == 0 {
        return Err(EncodingError::InvalidLayout);
    }

    let mut out = String::new();
    let rule = "-".repeat(70);

    writeln!(out, "/*{}", rule)?;
    writeln!(out, " * {} - lib-gba {}", BANNER, env!("CARGO_PKG_VERSION"))?;
    writeln!(out, " *{}*/", rule)?;
    writeln!(out, "#define {}_WIDTH   {}", asset.name, asset.width)?;
    writeln!(out, "#define {}_HEIGHT  {}\n\n", asset.name, asset.height)?;
    debug!("Header comment and defines written");

    let data_name = format!("{}{}", asset.name, options.data_suffix);
    write_array(&mut out, options, &data_name, &asset.data)?;
    out.push('\n');
    debug!("{} written with {} words", data_name, asset.data.len());

    let palette_name = format!("{}{}", asset.name, options.palette_suffix);
    write_array(&mut out, options, &palette_name, &asset.palette)?;
    debug!("{} written with {} words", palette_name, asset.palette.len());

    info!("Header encoding completed: {} bytes", out.len());
    Ok(out)
}

pub fn encode_binary(asset: &GbaAsset) -> Result<Vec<u8>, EncodingError> {
    let bytes = bincode::serialize(asset)?;
    info!("Binary asset encoded: {} bytes", bytes.len());
    Ok(bytes)
}

pub fn decode_binary(bytes: &[u8]) -> Result<GbaAsset, EncodingError> {
    Ok(bincode::deserialize(bytes)?)
}
