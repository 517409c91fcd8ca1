#![no_main]
use libfuzzer_sys::fuzz_target;
use zenqoi::*;

fuzz_target!(|data: &[u8]| {
    // Whatever a stream decodes to, re-encoding it must reproduce those pixels
    let limits = Limits::default().with_max_pixels(1 << 20);
    let Ok(decoded) = DecodeRequest::new(data).with_limits(&limits).decode() else {
        return;
    };

    let reencoded = encode(decoded.pixels(), &decoded.descriptor)
        .expect("decoded pixels must re-encode");
    let decoded2 = decode(&reencoded).expect("re-encoded stream must decode");

    assert_eq!(decoded.pixels(), decoded2.pixels(), "roundtrip pixel mismatch");
    assert_eq!(decoded.descriptor, decoded2.descriptor);
});
