#![no_main]

use libfuzzer_sys::fuzz_target;

use exit_format_codec::{decode_allocation, decode_allocations, decode_exit, encode_exit};

// Decoding arbitrary bytes must never panic, and anything that decodes
// must re-encode to bytes that decode to the same exit.
fuzz_target!(|data: &[u8]| {
    let _ = decode_allocation(data);
    let _ = decode_allocations(data);

    if let Ok(exit) = decode_exit(data) {
        let encoded = encode_exit(&exit);
        let decoded = decode_exit(&encoded).expect("re-encoded exit must decode");
        assert_eq!(decoded, exit);
    }
});
