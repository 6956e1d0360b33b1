mod common;

use common::{gradient_palette, pcx_file, pcx_file_unmarked, GRID, HEIGHT, WIDTH};
use lib_gba::compression::RleDecompressionError;
use lib_gba::image::{decode, encode_pcx, DecodeError};

#[test]
fn test_decode_handmade_stream() {
    let compressed = [
        0xC4, 0, 1, 2, 3, 4, // line 0
        0xC3, 200, 0xC1, 193, 192, 0xC2, 255, 5, // line 1
        0xC8, 7, // line 2
        0xC1, 250, 0xC2, 9, 0xC2, 0, 0xC3, 194, // line 3
    ];
    let file = pcx_file(WIDTH, HEIGHT, 8, &compressed, &gradient_palette());

    let image = decode(&file).unwrap();
    assert_eq!(image.width, WIDTH);
    assert_eq!(image.height, HEIGHT);
    assert_eq!(image.pixels, GRID);
}

#[test]
fn test_decode_written_pcx() {
    let file = encode_pcx(WIDTH, HEIGHT, &GRID, &gradient_palette()).unwrap();

    let image = decode(&file).unwrap();
    assert_eq!(image.pixels, GRID);
    assert_eq!(image.line(2), Some(&[7u8; 8][..]));
}

#[test]
fn test_decode_palette_truncates() {
    let file = encode_pcx(WIDTH, HEIGHT, &GRID, &gradient_palette()).unwrap();
    let image = decode(&file).unwrap();

    for (i, color) in image.palette.colors().iter().enumerate() {
        let i = i as u8;
        assert_eq!(*color, [i / 8, (255 - i) / 8, (i / 2) / 8]);
    }
    assert_eq!(image.palette.colors()[255], [31, 0, 15]);
    assert_eq!(image.palette.colors()[8], [1, 30, 0]);
}

#[test]
fn test_decode_exact_4x2() {
    let file = pcx_file(4, 2, 8, &[0xC4, 3, 0xC2, 1, 2, 2], &gradient_palette());
    let image = decode(&file).unwrap();
    assert_eq!(image.pixels, vec![3, 3, 3, 3, 1, 1, 2, 2]);
}

#[test]
fn test_decode_short_4x2() {
    let file = pcx_file_unmarked(4, 2, 8, &[0xC4, 3, 0xC2, 1], &gradient_palette());
    assert!(matches!(
        decode(&file),
        Err(DecodeError::DecompressionFailed(
            RleDecompressionError::Truncated {
                decoded: 6,
                expected: 8
            }
        ))
    ));
}

#[test]
fn test_decode_short_4x2_reads_marker_as_pixel() {
    // With the buffer not yet full the 0x0C marker is an ordinary literal.
    let file = pcx_file(4, 2, 8, &[0xC4, 3, 0xC2, 1], &gradient_palette());
    assert!(matches!(
        decode(&file),
        Err(DecodeError::DecompressionFailed(
            RleDecompressionError::Truncated {
                decoded: 7,
                expected: 8
            }
        ))
    ));
}

#[test]
fn test_decode_exact_4x2_unmarked() {
    let file = pcx_file_unmarked(4, 2, 8, &[0xC4, 3, 0xC2, 1, 2, 2], &gradient_palette());
    assert_eq!(decode(&file).unwrap().pixels, vec![3, 3, 3, 3, 1, 1, 2, 2]);
}

#[test]
fn test_decode_written_odd_width() {
    let pixels = [1, 2, 3, 200, 200, 200, 0, 9, 9];
    let file = encode_pcx(3, 3, &pixels, &gradient_palette()).unwrap();
    assert_eq!(decode(&file).unwrap().pixels, pixels);
}

#[test]
fn test_decode_overflowing_4x2() {
    let file = pcx_file(4, 2, 8, &[0xC4, 3, 0xC6, 1], &gradient_palette());
    assert!(matches!(
        decode(&file),
        Err(DecodeError::DecompressionFailed(
            RleDecompressionError::Overflow {
                position: 2,
                capacity: 8
            }
        ))
    ));
}

#[test]
fn test_decode_rejects_4bpp() {
    // The stream would overflow if it were decoded.
    let file = pcx_file(4, 2, 4, &[0xFF, 1, 0xFF, 1], &gradient_palette());
    assert!(matches!(
        decode(&file),
        Err(DecodeError::UnsupportedBitsPerPixel(4))
    ));
}
