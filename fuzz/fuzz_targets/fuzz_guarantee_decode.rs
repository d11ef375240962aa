#![no_main]

use libfuzzer_sys::fuzz_target;

use exit_format_codec::{decode_guarantee_data, decode_tag_list, encode_guarantee_data};

fuzz_target!(|data: &[u8]| {
    let _ = decode_tag_list(data);

    if let Ok(destinations) = decode_guarantee_data(data) {
        let encoded = encode_guarantee_data(&destinations);
        assert_eq!(decode_guarantee_data(&encoded).unwrap(), destinations);
    }
});
