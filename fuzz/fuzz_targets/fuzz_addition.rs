#![no_main]

use arbitrary::Arbitrary;
use bnwrap_core::BigNumber;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct AdditionInput {
    a: i64,
    b: i64,
    magnitude: Vec<u8>,
    negate: bool,
}

fuzz_target!(|input: AdditionInput| {
    let a = BigNumber::from_integer(input.a);
    let b = BigNumber::from_integer(input.b);

    // Machine-width reference
    let sum = &a + &b;
    assert_eq!(
        sum.to_dec_string(),
        (input.a as i128 + input.b as i128).to_string()
    );

    let mut c = BigNumber::from_bytes_be(&input.magnitude);
    if input.negate {
        c = BigNumber::from_hex_string(&format!("-{}", c.to_hex_string())).unwrap();
    }

    assert_eq!(&a + &c, &c + &a);
    assert_eq!((&a + &b) + &c, &a + (&b + &c));

    let mut acc = a.clone();
    acc += &c;
    assert_eq!(acc, a + c);
});
