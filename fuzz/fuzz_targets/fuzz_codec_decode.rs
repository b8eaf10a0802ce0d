#![no_main]

use dirvote_messages::{encode_feature, encode_vote, try_decode_feature, try_decode_vote};
use libfuzzer_sys::fuzz_target;

// Decoding arbitrary bytes must never panic, and anything that decodes must
// survive a re-encode unchanged.
fuzz_target!(|data: &[u8]| {
    if let Ok(vote) = try_decode_vote(data) {
        let again = try_decode_vote(&encode_vote(&vote)).expect("re-encoded vote must decode");
        assert_eq!(again, vote);
    }

    if let Ok(feature) = try_decode_feature(data, None) {
        let again = try_decode_feature(&encode_feature(&feature), None)
            .expect("re-encoded feature must decode");
        assert_eq!(again, feature);
    }
});
