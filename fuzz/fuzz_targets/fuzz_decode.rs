#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header probe and every output channel count must never panic
    let _ = zenqoi::probe(data);
    for channels in [0, 3, 4] {
        let _ = zenqoi::decode_with_channels(data, channels);
    }
});
