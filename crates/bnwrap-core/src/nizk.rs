//! Non-interactive zero-knowledge proofs about discrete logarithms
//!
//! Both proofs are sigma protocols made non-interactive with the Fiat-Shamir
//! transform, using [`hash_points`] over the statement and the prover's
//! commitments as the challenge.
//!
//! - [`DlProof`]: knowledge of `x` such that `X = x * G` (Schnorr).
//! - [`DleqProof`]: `A = e * a` and `B = e * b` share the same `e`
//!   (Chaum-Pedersen).

use p256::elliptic_curve::group::Group;
use p256::elliptic_curve::CurveArithmetic;
use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};
use crate::group::{hash_points, random_scalar};

/// Schnorr proof of knowledge of a discrete logarithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DlProof<C: CurveArithmetic> {
    /// Commitment `r * G`
    pub u: C::ProjectivePoint,
    /// Response `c * x + r`
    pub z: C::Scalar,
}

impl<C: CurveArithmetic> DlProof<C> {
    /// Prove knowledge of `x` for the public point `x * G`
    pub fn prove<R: RngCore + CryptoRng>(x: &C::Scalar, rng: &mut R) -> Self {
        let generator = C::ProjectivePoint::generator();
        let public = generator * x;

        let r = random_scalar::<C, R>(rng);
        let u = generator * r;
        let c = hash_points::<C>(&[generator, public, u]);

        Self { u, z: c * x + r }
    }

    /// Check the proof against the public point
    pub fn verify(&self, public: &C::ProjectivePoint) -> Result<()> {
        let generator = C::ProjectivePoint::generator();
        let c = hash_points::<C>(&[generator, *public, self.u]);

        if generator * self.z == *public * c + self.u {
            Ok(())
        } else {
            Err(Error::ProofRejected("discrete log"))
        }
    }
}

/// Chaum-Pedersen proof that two points have the same discrete log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DleqProof<C: CurveArithmetic> {
    /// Commitment `r * a`
    pub ra: C::ProjectivePoint,
    /// Commitment `r * b`
    pub rb: C::ProjectivePoint,
    /// Response `r - c * e`
    pub z: C::Scalar,
}

impl<C: CurveArithmetic> DleqProof<C> {
    /// Prove that `e * a` and `e * b` use the same `e`
    ///
    /// Returns the proof together with `(A, B) = (e * a, e * b)`.
    pub fn prove<R: RngCore + CryptoRng>(
        e: &C::Scalar,
        a: &C::ProjectivePoint,
        b: &C::ProjectivePoint,
        rng: &mut R,
    ) -> (Self, C::ProjectivePoint, C::ProjectivePoint) {
        let big_a = *a * e;
        let big_b = *b * e;

        let r = random_scalar::<C, R>(rng);
        let ra = *a * r;
        let rb = *b * r;
        let c = hash_points::<C>(&[*a, big_a, *b, big_b, ra, rb]);

        (Self { ra, rb, z: r - c * e }, big_a, big_b)
    }

    /// Check `ra == z * a + c * A` and `rb == z * b + c * B`
    pub fn verify(
        &self,
        a: &C::ProjectivePoint,
        big_a: &C::ProjectivePoint,
        b: &C::ProjectivePoint,
        big_b: &C::ProjectivePoint,
    ) -> Result<()> {
        let c = hash_points::<C>(&[*a, *big_a, *b, *big_b, self.ra, self.rb]);

        if *a * self.z + *big_a * c != self.ra {
            return Err(Error::ProofRejected("discrete log equality (first base)"));
        }
        if *b * self.z + *big_b * c != self.rb {
            return Err(Error::ProofRejected("discrete log equality (second base)"));
        }
        Ok(())
    }
}
