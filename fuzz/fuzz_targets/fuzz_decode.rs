#![no_main]
use bmpfilter::{DecodeRequest, Limits, Permissiveness};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Keep permissive decodes of tiny files with huge headers from exhausting memory
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };

    // Must never panic, at any strictness
    for permissiveness in [
        Permissiveness::Strict,
        Permissiveness::Standard,
        Permissiveness::Permissive,
    ] {
        let _ = DecodeRequest::new(data)
            .with_limits(&limits)
            .with_permissiveness(permissiveness)
            .decode(enough::Unstoppable);
    }
});
