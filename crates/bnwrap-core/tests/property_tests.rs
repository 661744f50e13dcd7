//! Property-based tests for bnwrap-core using proptest
//!
//! These tests verify invariants that should hold for all valid inputs.

use bnwrap_core::group::{scalar_from_bignumber, scalar_to_bignumber};
use bnwrap_core::{shamir, BigNumber, CurveId, CurveParams, DlProof, NistP256, ParseError};
use proptest::prelude::*;
use rand::rngs::OsRng;

// ============================================
// Arbitrary Implementations
// ============================================

fn arb_hex_text() -> impl Strategy<Value = String> {
    "-?[0-9a-fA-F]{1,80}"
}

fn arb_bignumber() -> impl Strategy<Value = BigNumber> {
    prop_oneof![
        any::<i64>().prop_map(BigNumber::from_integer),
        arb_hex_text().prop_map(|s| BigNumber::from_hex_string(&s).unwrap()),
        prop::collection::vec(any::<u8>(), 0..64).prop_map(|b| BigNumber::from_bytes_be(&b)),
    ]
}

// ============================================
// Property Tests
// ============================================

proptest! {
    // ----------------------------------------
    // Construction and formatting
    // ----------------------------------------

    #[test]
    fn integer_hex_roundtrip(n in any::<i64>()) {
        let value = BigNumber::from_integer(n);
        let recovered = BigNumber::from_hex_string(&value.to_hex_string()).unwrap();
        prop_assert_eq!(recovered, value);
    }

    #[test]
    fn integer_decimal_matches_std(n in any::<i64>()) {
        prop_assert_eq!(BigNumber::from_integer(n).to_dec_string(), n.to_string());
    }

    #[test]
    fn hex_format_roundtrip(x in arb_bignumber()) {
        let recovered = BigNumber::from_hex_string(&x.to_hex_string()).unwrap();
        prop_assert_eq!(recovered, x);
    }

    #[test]
    fn hex_format_is_canonical(text in arb_hex_text()) {
        let value = BigNumber::from_hex_string(&text).unwrap();
        let hex = value.to_hex_string();
        let digits = hex.trim_start_matches('-');

        prop_assert!(!hex.chars().any(|c| c.is_ascii_lowercase()));
        if value.is_zero() {
            prop_assert_eq!(hex.as_str(), "0");
        } else {
            prop_assert_eq!(digits.len() % 2, 0);
            prop_assert!(!digits.starts_with("00"));
            prop_assert_eq!(hex.starts_with('-'), value.is_negative());
        }
    }

    #[test]
    fn hex_case_insensitive(text in "[0-9a-f]{1,40}") {
        let lower = BigNumber::from_hex_string(&text).unwrap();
        let upper = BigNumber::from_hex_string(&text.to_uppercase()).unwrap();
        prop_assert_eq!(lower, upper);
    }

    #[test]
    fn bytes_roundtrip_preserves_magnitude(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let value = BigNumber::from_bytes_be(&bytes);
        let first_nonzero = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        prop_assert_eq!(value.to_bytes_be(), bytes[first_nonzero..].to_vec());
        let ours = value.to_hex_string();
        let theirs = hex::encode_upper(&bytes[first_nonzero..]);
        prop_assert_eq!(ours.trim_start_matches('0'), theirs.trim_start_matches('0'));
    }

    #[test]
    fn serde_json_roundtrip(x in arb_bignumber()) {
        let json = serde_json::to_string(&x).unwrap();
        prop_assert_eq!(json.clone(), format!("\"{}\"", x.to_hex_string()));
        let recovered: BigNumber = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(recovered, x);
    }

    // ----------------------------------------
    // Parsing failures
    // ----------------------------------------

    #[test]
    fn invalid_character_rejected(
        prefix in "[0-9a-f]{0,10}",
        bad in "[g-zG-Z_ x.]",
        suffix in "[0-9a-f]{0,10}"
    ) {
        let text = format!("{}{}{}", prefix, bad, suffix);
        let result = BigNumber::from_hex_string(&text);
        prop_assert!(
            matches!(result, Err(ParseError::InvalidDigit { position, .. }) if position == prefix.len()),
            "unexpected result for {:?}: {:?}", text, result
        );
    }

    #[test]
    fn inner_sign_rejected(prefix in "[0-9a-f]{1,10}", suffix in "[0-9a-f]{0,10}") {
        let text = format!("{}-{}", prefix, suffix);
        prop_assert_eq!(
            BigNumber::from_hex_string(&text),
            Err(ParseError::MisplacedSign { position: prefix.len() })
        );
    }

    // ----------------------------------------
    // Addition laws
    // ----------------------------------------

    #[test]
    fn add_commutative(a in arb_bignumber(), b in arb_bignumber()) {
        prop_assert_eq!(&a + &b, &b + &a);
    }

    #[test]
    fn add_associative(a in arb_bignumber(), b in arb_bignumber(), c in arb_bignumber()) {
        prop_assert_eq!((&a + &b) + &c, &a + (&b + &c));
    }

    #[test]
    fn zero_is_identity(x in arb_bignumber()) {
        prop_assert_eq!(&x + &BigNumber::create_zero(), x.clone());
        prop_assert_eq!(BigNumber::create_zero() + &x, x);
    }

    #[test]
    fn add_assign_matches_add(a in arb_bignumber(), b in arb_bignumber()) {
        let mut acc = a.clone();
        acc += &b;
        prop_assert_eq!(acc, a + b);
    }

    #[test]
    fn add_matches_i128(a in any::<i64>(), b in any::<i64>()) {
        let sum = BigNumber::from_integer(a) + BigNumber::from_integer(b);
        prop_assert_eq!(sum.to_dec_string(), (a as i128 + b as i128).to_string());
    }

    #[test]
    fn sum_matches_fold(values in prop::collection::vec(any::<i64>(), 0..20)) {
        let expected: i128 = values.iter().map(|&v| v as i128).sum();
        let total: BigNumber = values.iter().map(|&v| BigNumber::from_integer(v)).sum();
        prop_assert_eq!(total.to_dec_string(), expected.to_string());
    }

    // ----------------------------------------
    // Sharing and proofs
    // ----------------------------------------

    #[test]
    fn shamir_any_quorum_recovers(
        secret in arb_bignumber(),
        threshold in 0usize..4,
        extra in 0usize..3,
        skip in 0usize..3
    ) {
        let parties = threshold + 1 + extra;
        let scalar = scalar_from_bignumber::<NistP256>(&secret);
        let shares = shamir::split_scalar::<NistP256, _>(&scalar, threshold, parties, &mut OsRng).unwrap();

        let start = skip.min(extra);
        let quorum = &shares[start..start + threshold + 1];
        let recovered = shamir::reconstruct_scalar::<NistP256>(quorum, threshold).unwrap();
        prop_assert_eq!(recovered, scalar);
    }

    #[test]
    fn scalar_bignumber_roundtrip_below_order(bytes in prop::collection::vec(any::<u8>(), 0..31)) {
        let value = BigNumber::from_bytes_be(&bytes);
        let scalar = scalar_from_bignumber::<NistP256>(&value);
        prop_assert_eq!(scalar_to_bignumber::<NistP256>(&scalar), value);
    }

    #[test]
    fn dl_proof_verifies_for_any_secret(secret in any::<u64>()) {
        let x = p256::Scalar::from(secret);
        let public = p256::ProjectivePoint::GENERATOR * x;
        let proof = DlProof::<NistP256>::prove(&x, &mut OsRng);
        prop_assert!(proof.verify(&public).is_ok());
    }
}

// ============================================
// Invariant Tests (non-proptest)
// ============================================

#[test]
fn empty_string_rejected() {
    assert_eq!(BigNumber::from_hex_string(""), Err(ParseError::Empty));
}

#[test]
fn zz_rejected() {
    assert!(matches!(
        BigNumber::from_hex_string("ZZ"),
        Err(ParseError::InvalidDigit { ch: 'Z', position: 0 })
    ));
}

#[test]
fn concrete_add_scenario() {
    let a = BigNumber::from_hex_string("1A").unwrap();
    assert_eq!(a.to_hex_string(), "1A");
    let sum = a + BigNumber::from_hex_string("01").unwrap();
    assert_eq!(sum.to_hex_string(), "1B");
}

#[test]
fn concrete_add_assign_scenario() {
    let mut value = BigNumber::from_integer(5);
    value += BigNumber::from_integer(3);
    assert_eq!(value, BigNumber::from_integer(8));
}

#[test]
fn curve_params_serialize_as_hex() {
    let params = CurveParams::for_curve(CurveId::ToyEc29).unwrap();
    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(json["curve"], "ec29");
    assert_eq!(json["p"], "1D");
    assert_eq!(json["order"], "25");

    let recovered: CurveParams = serde_json::from_value(json).unwrap();
    assert_eq!(recovered, params);
}
