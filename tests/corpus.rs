//! Test corpus: pipeline runs across patterns and sizes, checked against an
//! independent reading of the 8-bit output.

use graybmp::*;

fn checkerboard(w: usize, h: usize) -> Vec<Pixel> {
    (0..w * h)
        .map(|i| {
            let (x, y) = (i % w, i / w);
            if (x + y) % 2 == 0 {
                Pixel::rgb(200, 220, 240)
            } else {
                Pixel::rgb(10, 40, 70)
            }
        })
        .collect()
}

fn noise_pattern(w: usize, h: usize) -> Vec<Pixel> {
    let mut state: u32 = 0xDEAD_BEEF;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state as u8
    };
    (0..w * h)
        .map(|_| {
            let (r, g, b) = (next(), next(), next());
            Pixel::rgb(r, g, b)
        })
        .collect()
}

/// Serialize pixels as a 24-bit BMP, rows in memory order.
fn encode24(w: usize, h: i32, pixels: &[Pixel]) -> Vec<u8> {
    let stride = w * 3 + row_padding(w, 3);
    let rows = h.unsigned_abs() as usize;
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((54 + stride * rows) as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(&54u32.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(w as i32).to_le_bytes());
    out.extend_from_slice(&h.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&[0u8; 24]);
    for row in 0..rows {
        for px in &pixels[row * w..(row + 1) * w] {
            out.extend_from_slice(&px.to_bgr_bytes());
        }
        out.extend(std::iter::repeat_n(0u8, stride - w * 3));
    }
    out
}

/// Read back an 8-bit palette BMP: (width, height, gray samples resolved through the palette).
fn read_gray8(data: &[u8]) -> (i32, i32, Vec<u8>) {
    let u32_at = |at: usize| u32::from_le_bytes(data[at..at + 4].try_into().unwrap());
    assert_eq!(&data[0..2], b"BM");
    assert_eq!(u32_at(2) as usize, data.len(), "file size field");
    let offset = u32_at(10) as usize;
    let width = u32_at(18) as i32;
    let height = u32_at(22) as i32;
    assert_eq!(u16::from_le_bytes([data[28], data[29]]), 8);
    assert_eq!(u32_at(34) as usize, data.len() - offset, "image size field");

    let palette = &data[54..offset];
    assert_eq!(palette.len(), 1024);

    let w = width as usize;
    let stride = (w + 3) & !3;
    let mut gray = Vec::new();
    for row in data[offset..].chunks_exact(stride.max(1)).take(height.unsigned_abs() as usize) {
        assert!(row[w..].iter().all(|&b| b == 0), "padding must be zero");
        for &idx in &row[..w] {
            let entry = &palette[idx as usize * 4..idx as usize * 4 + 4];
            assert_eq!(entry[0], entry[1]);
            assert_eq!(entry[1], entry[2]);
            gray.push(entry[0]);
        }
    }
    (width, height, gray)
}

fn run_pipeline(w: usize, h: i32, pixels: &[Pixel]) {
    let input = encode24(w, h, pixels);
    let mut image = decode_bmp(&input, Unstoppable).unwrap();
    assert_eq!(image.pixels().unwrap(), pixels);

    to_grayscale(&mut image).unwrap();
    let output = encode_gray_bmp(&image, Unstoppable).unwrap();

    let (ow, oh, gray) = read_gray8(&output);
    assert_eq!((ow, oh), (w as i32, h));
    let expected: Vec<u8> = pixels
        .iter()
        .map(|&p| luma(p, LumaRounding::Truncate))
        .collect();
    assert_eq!(gray, expected);
}

#[test]
fn checkerboard_all_padding_classes() {
    for w in 1..=9 {
        for h in [1, 2, 5] {
            run_pipeline(w, h, &checkerboard(w, h as usize));
        }
    }
}

#[test]
fn noise_all_padding_classes() {
    for w in [1, 2, 3, 4, 5, 7, 13, 64] {
        for h in [1, 3, 17] {
            run_pipeline(w, h, &noise_pattern(w, h as usize));
        }
    }
}

#[test]
fn top_down_noise() {
    run_pipeline(6, -4, &noise_pattern(6, 4));
}

#[test]
fn gray_input_is_preserved() {
    let w = 16;
    let pixels: Vec<Pixel> = (0..=255u8).map(|v| Pixel::rgb(v, v, v)).collect();
    let mut image = decode_bmp(&encode24(w, 16, &pixels), Unstoppable).unwrap();
    to_grayscale(&mut image).unwrap();
    let expected: Vec<u8> = (0..=255u8).collect();
    assert_eq!(image.grayscale().unwrap(), &expected[..]);
}

#[test]
fn every_truncation_fails_cleanly() {
    let input = encode24(3, 2, &checkerboard(3, 2));
    // Only the final row's 3 padding bytes are optional.
    for len in 0..input.len() - 3 {
        let result = decode_bmp(&input[..len], Unstoppable);
        assert!(result.is_err(), "prefix of {len} bytes decoded");
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Format);
    }
    assert!(decode_bmp(&input[..input.len() - 3], Unstoppable).is_ok());
}
