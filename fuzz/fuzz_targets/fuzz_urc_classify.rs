//! Fuzz target: URC decoding and classification
//!
//! Feeds arbitrary `(code, param)` pairs, including call payloads with
//! arbitrary caller strings, through `Urc::decode` and `classify_urc`.
//! Verifies:
//! - No panics for any input
//! - Documented codes with a numeric parameter, and the incoming-call code
//!   with any parameter, never decode to `Urc::Unknown`
//! - Every produced message renders to non-empty text
//!
//! cargo fuzz run fuzz_urc_classify

#![no_main]

use libfuzzer_sys::fuzz_target;
use tracker::classify::modem::{CallInfo, UrcKind};
use tracker::classify::{Urc, UrcParam, classify_urc};

fuzz_target!(|data: &[u8]| {
    if data.len() < 5 {
        return;
    }
    let code = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let param = if data[4] & 1 == 0 {
        let mut v = [0u8; 4];
        for (dst, src) in v.iter_mut().zip(&data[5..]) {
            *dst = *src;
        }
        UrcParam::Value(u32::from_le_bytes(v))
    } else {
        UrcParam::Call(CallInfo::new(&String::from_utf8_lossy(&data[5..])))
    };

    // A call payload on a numeric code is deliberately `Unknown`.
    let typed = matches!(param, UrcParam::Value(_)) || code == UrcKind::IncomingCall.code();
    let urc = Urc::decode(code, param);
    if typed && UrcKind::from_code(code).is_some() {
        assert!(urc.kind().is_some(), "documented code {code} decoded as unknown");
    }

    let c = classify_urc(&urc);
    if let Some(msg) = c.message {
        assert!(!msg.to_string().is_empty());
    }
});
