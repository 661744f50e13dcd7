#![no_main]

use bnwrap_core::{BigNumber, ParseError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    match BigNumber::from_hex_string(text) {
        Ok(value) => {
            // Canonical text must parse back to the same value
            let canonical = value.to_hex_string();
            let reparsed = BigNumber::from_hex_string(&canonical).unwrap();
            assert_eq!(reparsed, value);
            assert_eq!(reparsed.to_hex_string(), canonical);

            // Accepted input is an optional '-' followed by hex digits only
            let digits = text.strip_prefix('-').unwrap_or(text);
            assert!(!digits.is_empty());
            assert!(digits.bytes().all(|b| b.is_ascii_hexdigit()));
        }
        Err(ParseError::Empty) => assert!(text.is_empty()),
        Err(ParseError::MissingDigits) => assert_eq!(text, "-"),
        Err(ParseError::InvalidDigit { ch, position }) => {
            assert_eq!(text[position..].chars().next(), Some(ch));
            assert!(!ch.is_ascii_hexdigit());
        }
        Err(ParseError::MisplacedSign { position }) => {
            let byte = text.as_bytes()[position];
            assert!(byte == b'-' || byte == b'+');
        }
    }
});
