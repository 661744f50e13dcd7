//! Scalar and point helpers shared by the sharing and proof modules
//!
//! Group arithmetic itself comes from RustCrypto (`p256`, `k256`); everything
//! here is generic over [`CurveArithmetic`] so the same code runs on both
//! curves.

use p256::elliptic_curve::group::{Curve, Group};
use p256::elliptic_curve::point::AffineCoordinates;
use p256::elliptic_curve::{ff::PrimeField, CurveArithmetic, Field};
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};

use crate::bignum::BigNumber;

/// Uniformly random scalar
pub fn random_scalar<C: CurveArithmetic, R: RngCore + CryptoRng>(rng: &mut R) -> C::Scalar {
    C::Scalar::random(rng)
}

/// Uniformly random point, as a random multiple of the generator
pub fn random_point<C: CurveArithmetic, R: RngCore + CryptoRng>(
    rng: &mut R,
) -> C::ProjectivePoint {
    C::ProjectivePoint::generator() * random_scalar::<C, R>(rng)
}

/// Compressed SEC1 encoding of a point
///
/// The identity encodes as the single byte `0x00`.
pub fn encode_point<C: CurveArithmetic>(point: &C::ProjectivePoint) -> Vec<u8> {
    if bool::from(point.is_identity()) {
        return vec![0x00];
    }

    let affine = point.to_affine();
    let x = affine.x();
    let mut out = Vec::with_capacity(1 + x.len());
    out.push(if bool::from(affine.y_is_odd()) { 0x03 } else { 0x02 });
    out.extend_from_slice(&x);
    out
}

/// Big-endian bytes as an integer reduced modulo the group order
pub fn scalar_from_bytes<C: CurveArithmetic>(bytes: &[u8]) -> C::Scalar {
    let radix = C::Scalar::from(256u64);
    bytes
        .iter()
        .fold(C::Scalar::ZERO, |acc, &b| acc * radix + C::Scalar::from(u64::from(b)))
}

/// Fiat-Shamir challenge: SHA-256 over the compressed points, reduced mod n
pub fn hash_points<C: CurveArithmetic>(points: &[C::ProjectivePoint]) -> C::Scalar {
    let mut hasher = Sha256::new();
    for point in points {
        hasher.update(encode_point::<C>(point));
    }
    scalar_from_bytes::<C>(&hasher.finalize())
}

/// Reduce a [`BigNumber`] into the scalar field
///
/// Negative values map to the additive inverse of their magnitude.
pub fn scalar_from_bignumber<C: CurveArithmetic>(value: &BigNumber) -> C::Scalar {
    let magnitude = scalar_from_bytes::<C>(&value.to_bytes_be());
    if value.is_negative() {
        -magnitude
    } else {
        magnitude
    }
}

/// Canonical integer in `[0, n)` for a scalar
pub fn scalar_to_bignumber<C: CurveArithmetic>(scalar: &C::Scalar) -> BigNumber {
    BigNumber::from_bytes_be(&scalar.to_repr())
}

#[cfg(test)]
mod tests {
    use super::*;
    use p256::elliptic_curve::sec1::ToEncodedPoint;
    use p256::{AffinePoint, NistP256, ProjectivePoint, Scalar};
    use rand::rngs::OsRng;

    #[test]
    fn test_encode_matches_sec1_compressed() {
        let point = ProjectivePoint::GENERATOR * Scalar::from(7u64);
        let expected = point.to_affine().to_encoded_point(true);
        assert_eq!(encode_point::<NistP256>(&point), expected.as_bytes());

        let generator = AffinePoint::GENERATOR.to_encoded_point(true);
        assert_eq!(
            encode_point::<NistP256>(&ProjectivePoint::GENERATOR),
            generator.as_bytes()
        );
    }

    #[test]
    fn test_identity_encoding() {
        assert_eq!(encode_point::<NistP256>(&ProjectivePoint::IDENTITY), vec![0x00]);
        assert_eq!(
            encode_point::<k256::Secp256k1>(&k256::ProjectivePoint::IDENTITY),
            vec![0x00]
        );
    }

    #[test]
    fn test_scalar_from_bytes_reduces() {
        let order = hex::decode("FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551")
            .unwrap();
        assert_eq!(scalar_from_bytes::<NistP256>(&order), Scalar::ZERO);

        // 2^256 - 1 - n
        let reduced = scalar_from_bytes::<NistP256>(&[0xFF; 32]);
        assert_eq!(
            scalar_to_bignumber::<NistP256>(&reduced).to_hex_string(),
            "FFFFFFFF00000000000000004319055258E8617B0C46353D039CDAAE"
        );

        assert_eq!(scalar_from_bytes::<NistP256>(&[]), Scalar::ZERO);
        assert_eq!(scalar_from_bytes::<NistP256>(&[0x01, 0x00]), Scalar::from(256u64));
    }

    #[test]
    fn test_bignumber_conversion() {
        let seven = BigNumber::from_integer(7);
        assert_eq!(scalar_from_bignumber::<NistP256>(&seven), Scalar::from(7u64));

        let minus_one = BigNumber::from_integer(-1);
        let scalar = scalar_from_bignumber::<NistP256>(&minus_one);
        assert_eq!(scalar, -Scalar::ONE);
        assert_eq!(
            scalar_to_bignumber::<NistP256>(&scalar).to_hex_string(),
            "FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632550"
        );
    }

    #[test]
    fn test_hash_points_is_order_sensitive() {
        let g = ProjectivePoint::GENERATOR;
        let h = random_point::<NistP256, _>(&mut OsRng);
        assert_eq!(hash_points::<NistP256>(&[g, h]), hash_points::<NistP256>(&[g, h]));
        assert_ne!(hash_points::<NistP256>(&[g, h]), hash_points::<NistP256>(&[h, g]));
    }
}
