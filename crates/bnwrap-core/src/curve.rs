//! Elliptic-curve domain parameters
//!
//! Short-Weierstrass curves `y^2 = x^3 + a*x + b (mod p)`. The constants are
//! hard-coded as hex text and loaded into [`BigNumber`]s on request. For the
//! curves that RustCrypto implements, [`CurveParams::library_check`] compares
//! the hard-coded order and generator against the library's own values.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bignum::BigNumber;
use crate::error::{Error, Result};

/// Built-in curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveId {
    /// NIST P-256 (prime256v1 / secp256r1)
    #[default]
    P256,
    /// SEC 2 secp256k1
    Secp256k1,
    /// 37-element toy curve over GF(29), for debugging
    #[serde(rename = "ec29")]
    ToyEc29,
}

impl CurveId {
    pub const ALL: [CurveId; 3] = [CurveId::P256, CurveId::Secp256k1, CurveId::ToyEc29];

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            CurveId::P256 => "p256",
            CurveId::Secp256k1 => "secp256k1",
            CurveId::ToyEc29 => "ec29",
        }
    }

    pub fn params(&self) -> Result<CurveParams> {
        CurveParams::for_curve(*self)
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CurveId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "p256" | "p-256" | "prime256v1" | "secp256r1" => Ok(CurveId::P256),
            "secp256k1" => Ok(CurveId::Secp256k1),
            "ec29" | "toy" => Ok(CurveId::ToyEc29),
            _ => Err(Error::UnknownCurve(s.to_string())),
        }
    }
}

struct RawParams {
    p: &'static str,
    a: &'static str,
    b: &'static str,
    gx: &'static str,
    gy: &'static str,
    order: &'static str,
    cofactor: &'static str,
}

const P256_RAW: RawParams = RawParams {
    p: "FFFFFFFF00000001000000000000000000000000FFFFFFFFFFFFFFFFFFFFFFFF",
    a: "FFFFFFFF00000001000000000000000000000000FFFFFFFFFFFFFFFFFFFFFFFC",
    b: "5AC635D8AA3A93E7B3EBBD55769886BC651D06B0CC53B0F63BCE3C3E27D2604B",
    gx: "6B17D1F2E12C4247F8BCE6E563A440F277037D812DEB33A0F4A13945D898C296",
    gy: "4FE342E2FE1A7F9B8EE7EB4A7C0F9E162BCE33576B315ECECBB6406837BF51F5",
    order: "FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551",
    cofactor: "1",
};

const SECP256K1_RAW: RawParams = RawParams {
    p: "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F",
    a: "0",
    b: "7",
    gx: "79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798",
    gy: "483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8",
    order: "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141",
    cofactor: "1",
};

// p = 29, a = 4, b = 20, G = (1, 5), n = 37
const TOY_EC29_RAW: RawParams = RawParams {
    p: "1D",
    a: "4",
    b: "14",
    gx: "1",
    gy: "5",
    order: "25",
    cofactor: "1",
};

/// Curve domain parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParams {
    pub curve: CurveId,
    /// Field prime
    pub p: BigNumber,
    pub a: BigNumber,
    pub b: BigNumber,
    /// Generator x coordinate
    pub gx: BigNumber,
    /// Generator y coordinate
    pub gy: BigNumber,
    /// Order of the generator
    pub order: BigNumber,
    pub cofactor: BigNumber,
}

impl CurveParams {
    /// Load the domain parameters of a built-in curve
    pub fn for_curve(curve: CurveId) -> Result<Self> {
        let raw = match curve {
            CurveId::P256 => &P256_RAW,
            CurveId::Secp256k1 => &SECP256K1_RAW,
            CurveId::ToyEc29 => &TOY_EC29_RAW,
        };

        let params = Self {
            curve,
            p: BigNumber::from_hex_string(raw.p)?,
            a: BigNumber::from_hex_string(raw.a)?,
            b: BigNumber::from_hex_string(raw.b)?,
            gx: BigNumber::from_hex_string(raw.gx)?,
            gy: BigNumber::from_hex_string(raw.gy)?,
            order: BigNumber::from_hex_string(raw.order)?,
            cofactor: BigNumber::from_hex_string(raw.cofactor)?,
        };

        debug!(
            "Loaded {} parameters ({}-bit order)",
            curve,
            params.order.num_bits()
        );
        Ok(params)
    }

    /// Group order
    pub fn order(&self) -> &BigNumber {
        &self.order
    }

    /// Generator as (x, y)
    pub fn generator(&self) -> (&BigNumber, &BigNumber) {
        (&self.gx, &self.gy)
    }

    /// Check that the affine point (x, y) satisfies the curve equation
    ///
    /// Coordinates must already be reduced, i.e. in `[0, p)`.
    pub fn is_on_curve(&self, x: &BigNumber, y: &BigNumber) -> bool {
        let p = self.p.as_inner();
        if p <= &BigInt::zero() {
            return false;
        }

        let in_field = |v: &BigInt| v >= &BigInt::zero() && v < p;
        let (x, y) = (x.as_inner(), y.as_inner());
        if !in_field(x) || !in_field(y) {
            return false;
        }

        let lhs = (y * y) % p;
        let rhs = (x * x * x + self.a.as_inner() * x + self.b.as_inner()) % p;
        lhs == rhs
    }

    /// Whether the generator lies on the curve
    pub fn generator_on_curve(&self) -> bool {
        self.is_on_curve(&self.gx, &self.gy)
    }

    /// Compare order and generator with an external implementation
    ///
    /// Returns `None` when no library implements the curve.
    pub fn library_check(&self) -> Option<Result<()>> {
        let reference = match self.curve {
            CurveId::P256 => p256_reference(),
            CurveId::Secp256k1 => k256_reference(),
            CurveId::ToyEc29 => return None,
        };
        Some(self.compare(&reference))
    }

    fn compare(&self, reference: &LibraryParams) -> Result<()> {
        let checks = [
            ("order", &self.order, &reference.order),
            ("generator x", &self.gx, &reference.gx),
            ("generator y", &self.gy, &reference.gy),
        ];
        for (what, ours, theirs) in checks {
            if ours != theirs {
                return Err(Error::ParameterMismatch(format!(
                    "{} {}: expected {}, library has {}",
                    self.curve,
                    what,
                    ours,
                    hex::encode_upper(theirs.to_bytes_be())
                )));
            }
        }
        Ok(())
    }
}

struct LibraryParams {
    order: BigNumber,
    gx: BigNumber,
    gy: BigNumber,
}

// n - 1 is -1 in the scalar field
fn p256_reference() -> LibraryParams {
    use p256::elliptic_curve::{ff::PrimeField, sec1::ToEncodedPoint, Field};
    use p256::{AffinePoint, Scalar};

    let order_minus_one = -<Scalar as Field>::ONE;
    let order = BigNumber::from_bytes_be(&order_minus_one.to_repr()) + BigNumber::from_integer(1);

    let encoded = AffinePoint::GENERATOR.to_encoded_point(false);
    let coordinate = |c: Option<&p256::FieldBytes>| {
        c.map(|bytes| BigNumber::from_bytes_be(bytes))
            .unwrap_or_default()
    };

    LibraryParams {
        order,
        gx: coordinate(encoded.x()),
        gy: coordinate(encoded.y()),
    }
}

fn k256_reference() -> LibraryParams {
    use k256::elliptic_curve::{ff::PrimeField, sec1::ToEncodedPoint, Field};
    use k256::{AffinePoint, Scalar};

    let order_minus_one = -<Scalar as Field>::ONE;
    let order = BigNumber::from_bytes_be(&order_minus_one.to_repr()) + BigNumber::from_integer(1);

    let encoded = AffinePoint::GENERATOR.to_encoded_point(false);
    let coordinate = |c: Option<&k256::FieldBytes>| {
        c.map(|bytes| BigNumber::from_bytes_be(bytes))
            .unwrap_or_default()
    };

    LibraryParams {
        order,
        gx: coordinate(encoded.x()),
        gy: coordinate(encoded.y()),
    }
}
