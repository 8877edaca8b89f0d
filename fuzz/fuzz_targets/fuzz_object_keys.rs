// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use dynvar::{codec, is_key_safe, Variant};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Use every decodable prefix as a key into one Object
    let mut object = Variant::object();
    let mut rest = data;
    while let Ok((key, used)) = codec::decode_prefix(rest) {
        let safe = is_key_safe(&key);
        let hash = key.hash_code();
        match object.mem(key) {
            Ok(slot) => {
                assert!(safe);
                let _ = slot.assign(Variant::number(hash as i32));
            }
            Err(_) => assert!(!safe),
        }
        rest = &rest[used..];
        if used == 0 || rest.is_empty() {
            break;
        }
    }
    let _ = object.hash_code();
    let _ = codec::encode(&object);
});
