#![no_main]
use libfuzzer_sys::fuzz_target;
use graybmp::*;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must survive the grayscale pipeline with consistent headers
    let limits = Limits {
        max_pixels: Some(1 << 24),
        ..Default::default()
    };
    let Ok(mut image) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    to_grayscale(&mut image).expect("decoded image has pixels");
    let Ok(encoded) = encode_gray_bmp(&image, enough::Unstoppable) else {
        return;
    };

    let file_size = u32::from_le_bytes(encoded[2..6].try_into().unwrap());
    assert_eq!(file_size as usize, encoded.len(), "file size field mismatch");
    let width = i32::from_le_bytes(encoded[18..22].try_into().unwrap());
    let height = i32::from_le_bytes(encoded[22..26].try_into().unwrap());
    assert_eq!(width, image.width());
    assert_eq!(height, image.height());
    let stride = image.width() as usize + row_padding(image.width() as usize, 1);
    assert_eq!(encoded.len(), 1078 + stride * image.rows());

    let pgm = encode_gray_pgm(&image, enough::Unstoppable).expect("grayscale present");
    let header = format!("P5\n{} {}\n255\n", image.width(), image.rows());
    assert!(pgm.starts_with(header.as_bytes()));
    assert_eq!(pgm.len(), header.len() + image.width() as usize * image.rows());
});
