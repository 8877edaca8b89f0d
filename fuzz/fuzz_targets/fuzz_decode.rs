// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use dynvar::{codec, DecodeLimits, Decoder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Whole-buffer decode
    if let Ok(value) = codec::decode(data) {
        // Anything that decodes must re-encode and decode again
        let bytes = codec::encode(&value).expect("decoded value re-encodes");
        let again = codec::decode(&bytes).expect("re-encoded value decodes");
        let _ = value == again;
    }

    // Streaming decode with tight limits
    let limits = DecodeLimits::default().max_depth(32).max_length(1 << 16);
    let mut decoder = Decoder::with_limits(data, limits);
    while decoder.decode_value().is_ok() {}
});
