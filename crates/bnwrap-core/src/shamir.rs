//! Shamir secret sharing over a curve's scalar field
//!
//! A secret is hidden in the constant term of a random polynomial of degree
//! `threshold`; party `i` (counting from 1) receives the evaluation at `i`.
//! Any `threshold + 1` shares recover the secret by Lagrange interpolation at
//! zero, while `threshold` or fewer reveal nothing.
//!
//! Point secrets are shared in the exponent: the share of `S` for party `i`
//! is `S + p(i) * G` for a random `p` with `p(0) = 0`, and reconstruction
//! interpolates the points directly.

use std::collections::HashSet;

use p256::elliptic_curve::group::Group;
use p256::elliptic_curve::{CurveArithmetic, Field};
use rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::error::{Error, Result};
use crate::group::random_scalar;

/// One party's share
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Share<T> {
    /// Evaluation point, starting at 1
    pub index: u32,
    pub value: T,
}

/// Polynomial over the scalar field, lowest coefficient first
#[derive(Debug, Clone)]
pub struct Polynomial<C: CurveArithmetic> {
    coefficients: Vec<C::Scalar>,
}

impl<C: CurveArithmetic> Polynomial<C> {
    /// Random polynomial of the given degree with a fixed constant term
    pub fn random<R: RngCore + CryptoRng>(constant: C::Scalar, degree: usize, rng: &mut R) -> Self {
        let mut coefficients = Vec::with_capacity(degree + 1);
        coefficients.push(constant);
        for _ in 0..degree {
            coefficients.push(random_scalar::<C, R>(rng));
        }
        Self { coefficients }
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn evaluate(&self, x: &C::Scalar) -> C::Scalar {
        self.coefficients
            .iter()
            .rev()
            .fold(C::Scalar::ZERO, |acc, coefficient| acc * x + coefficient)
    }

    fn evaluate_at(&self, index: u32) -> C::Scalar {
        self.evaluate(&C::Scalar::from(u64::from(index)))
    }
}

fn check_parameters(threshold: usize, parties: usize) -> Result<u32> {
    match u32::try_from(parties) {
        Ok(n) if n > 0 && threshold < parties => Ok(n),
        _ => Err(Error::InvalidThreshold { threshold, parties }),
    }
}

/// Split a scalar into `parties` shares, any `threshold + 1` of which recover it
pub fn split_scalar<C: CurveArithmetic, R: RngCore + CryptoRng>(
    secret: &C::Scalar,
    threshold: usize,
    parties: usize,
    rng: &mut R,
) -> Result<Vec<Share<C::Scalar>>> {
    let n = check_parameters(threshold, parties)?;
    let polynomial = Polynomial::<C>::random(*secret, threshold, rng);

    debug!("Splitting scalar into {} shares, threshold {}", n, threshold);
    Ok((1..=n)
        .map(|index| Share {
            index,
            value: polynomial.evaluate_at(index),
        })
        .collect())
}

/// Split a point into `parties` shares, any `threshold + 1` of which recover it
pub fn split_point<C: CurveArithmetic, R: RngCore + CryptoRng>(
    secret: &C::ProjectivePoint,
    threshold: usize,
    parties: usize,
    rng: &mut R,
) -> Result<Vec<Share<C::ProjectivePoint>>> {
    let n = check_parameters(threshold, parties)?;
    let polynomial = Polynomial::<C>::random(C::Scalar::ZERO, threshold, rng);
    let generator = C::ProjectivePoint::generator();

    debug!("Splitting point into {} shares, threshold {}", n, threshold);
    Ok((1..=n)
        .map(|index| Share {
            index,
            value: *secret + generator * polynomial.evaluate_at(index),
        })
        .collect())
}

/// Lagrange basis coefficient at zero for `indices[i]`
///
/// `prod_{j != i} x_j / (x_j - x_i)`
pub fn lagrange_coefficient<C: CurveArithmetic>(indices: &[u32], i: usize) -> Result<C::Scalar> {
    let xi = indices
        .get(i)
        .map(|&x| C::Scalar::from(u64::from(x)))
        .ok_or(Error::NotEnoughShares {
            needed: i + 1,
            got: indices.len(),
        })?;

    let mut numerator = C::Scalar::ONE;
    let mut denominator = C::Scalar::ONE;
    for (j, &index) in indices.iter().enumerate() {
        if j == i {
            continue;
        }
        let xj = C::Scalar::from(u64::from(index));
        numerator *= xj;
        denominator *= xj - xi;
    }

    let inverse = Option::<C::Scalar>::from(denominator.invert())
        .ok_or(Error::DuplicateShareIndex(indices[i]))?;
    Ok(numerator * inverse)
}

fn check_shares<T>(shares: &[Share<T>], threshold: usize) -> Result<Vec<u32>> {
    let needed = threshold.saturating_add(1);
    if shares.len() < needed {
        return Err(Error::NotEnoughShares {
            needed,
            got: shares.len(),
        });
    }

    let mut seen = HashSet::new();
    for share in shares {
        if share.index == 0 {
            return Err(Error::InvalidShareIndex(0));
        }
        if !seen.insert(share.index) {
            return Err(Error::DuplicateShareIndex(share.index));
        }
    }
    Ok(shares.iter().map(|s| s.index).collect())
}

/// Recover a scalar from at least `threshold + 1` shares
pub fn reconstruct_scalar<C: CurveArithmetic>(
    shares: &[Share<C::Scalar>],
    threshold: usize,
) -> Result<C::Scalar> {
    let indices = check_shares(shares, threshold)?;
    let mut secret = C::Scalar::ZERO;
    for (i, share) in shares.iter().enumerate() {
        secret += share.value * lagrange_coefficient::<C>(&indices, i)?;
    }
    Ok(secret)
}

/// Recover a point from at least `threshold + 1` shares
pub fn reconstruct_point<C: CurveArithmetic>(
    shares: &[Share<C::ProjectivePoint>],
    threshold: usize,
) -> Result<C::ProjectivePoint> {
    let indices = check_shares(shares, threshold)?;
    let mut secret = C::ProjectivePoint::identity();
    for (i, share) in shares.iter().enumerate() {
        secret += share.value * lagrange_coefficient::<C>(&indices, i)?;
    }
    Ok(secret)
}
