#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header probe and full decode must never panic
    let _ = graybmp::probe_bmp(data);

    let limits = graybmp::Limits {
        max_pixels: Some(1 << 24),
        ..Default::default()
    };
    let _ = graybmp::DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);
});
