#![allow(dead_code)]

use std::path::PathBuf;

pub const WIDTH: usize = 8;
pub const HEIGHT: usize = 4;

/// 8x4 indices with long runs, values above 192 and single pixels.
pub const GRID: [u8; WIDTH * HEIGHT] = [
    0, 0, 0, 0, 1, 2, 3, 4, //
    200, 200, 200, 193, 192, 255, 255, 5, //
    7, 7, 7, 7, 7, 7, 7, 7, //
    250, 9, 9, 0, 0, 194, 194, 194,
];

/// 8-bit RGB palette where every channel of color `i` is derived from `i`.
pub fn gradient_palette() -> [[u8; 3]; 256] {
    let mut palette = [[0u8; 3]; 256];
    for (i, color) in palette.iter_mut().enumerate() {
        *color = [i as u8, 255 - i as u8, (i / 2) as u8];
    }
    palette
}

/// Assembles a PCX file by hand: 128-byte header, `compressed` as is, the
/// 0x0C marker and the palette.
pub fn pcx_file(
    width: usize,
    height: usize,
    bits_per_pixel: u8,
    compressed: &[u8],
    palette: &[[u8; 3]; 256],
) -> Vec<u8> {
    build_pcx(width, height, bits_per_pixel, compressed, true, palette)
}

/// Like `pcx_file` but without the 0x0C marker, so the scanned region holds
/// exactly `compressed`.
pub fn pcx_file_unmarked(
    width: usize,
    height: usize,
    bits_per_pixel: u8,
    compressed: &[u8],
    palette: &[[u8; 3]; 256],
) -> Vec<u8> {
    build_pcx(width, height, bits_per_pixel, compressed, false, palette)
}

fn build_pcx(
    width: usize,
    height: usize,
    bits_per_pixel: u8,
    compressed: &[u8],
    marker: bool,
    palette: &[[u8; 3]; 256],
) -> Vec<u8> {
    let mut file = vec![0u8; 128];
    file[0] = 0x0A;
    file[1] = 5;
    file[2] = 1;
    file[3] = bits_per_pixel;
    file[8..10].copy_from_slice(&((width - 1) as i16).to_le_bytes());
    file[10..12].copy_from_slice(&((height - 1) as i16).to_le_bytes());
    file[65] = 1;
    file[66..68].copy_from_slice(&(width as u16).to_le_bytes());

    file.extend_from_slice(compressed);
    if marker {
        file.push(0x0C);
    }
    for color in palette {
        file.extend_from_slice(color);
    }
    file
}

/// A scratch directory unique to this test process and `name`.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lib_gba_{}_{}", std::process::id(), name));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
