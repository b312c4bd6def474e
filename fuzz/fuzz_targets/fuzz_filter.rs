#![no_main]
use bmpfilter::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, bmp_data)) = data.split_first() else {
        return;
    };
    let filter = Filter::ALL[usize::from(selector) % Filter::ALL.len()];

    let limits = Limits {
        max_pixels: Some(1 << 16),
        ..Default::default()
    };
    let Ok(mut bitmap) = DecodeRequest::new(bmp_data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    let (width, height) = (bitmap.width(), bitmap.height());
    bitmap
        .apply(filter, enough::Unstoppable)
        .expect("filters cannot fail without cancellation");
    assert_eq!((bitmap.width(), bitmap.height()), (width, height));

    let encoded = bitmap
        .encode(enough::Unstoppable)
        .expect("decoded bitmap must re-encode");
    assert_eq!(
        &encoded[..bmp::HEADERS_LEN],
        &bmp_data[..bmp::HEADERS_LEN],
        "headers must pass through unchanged"
    );

    let Ok(decoded) = decode(&encoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };
    assert_eq!(decoded.image(), bitmap.image(), "roundtrip pixel mismatch");
});
