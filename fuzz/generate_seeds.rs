#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    for dir in ["fuzz/corpus/fuzz_decode", "fuzz/corpus/fuzz_roundtrip"] {
        fs::create_dir_all(dir).unwrap();

        // Minimal BMP 1x1 24-bit
        fs::write(format!("{dir}/bmp_1x1.bmp"), bmp24(1, 1)).unwrap();
        // 5x2, exercises row padding
        fs::write(format!("{dir}/bmp_5x2.bmp"), bmp24(5, 2)).unwrap();
        // Top-down 3x3
        fs::write(format!("{dir}/bmp_3x3_topdown.bmp"), bmp24(3, -3)).unwrap();

        // Truncated/malformed seeds for edge coverage
        fs::write(format!("{dir}/empty.bin"), b"").unwrap();
        fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
        let mut eight_bit = bmp24(2, 2);
        eight_bit[28] = 8;
        fs::write(format!("{dir}/bmp_8bit.bmp"), eight_bit).unwrap();
    }

    println!("Generated seed corpus in fuzz/corpus/");
}

fn bmp24(width: i32, height: i32) -> Vec<u8> {
    let stride = (width as usize * 3 + 3) & !3;
    let size = 54 + stride * height.unsigned_abs() as usize;
    let mut bmp = vec![0u8; size];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(size as u32).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    for (i, b) in bmp[54..].iter_mut().enumerate() {
        *b = (i * 37) as u8;
    }
    bmp
}
