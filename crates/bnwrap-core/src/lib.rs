//! bnwrap core - arbitrary-precision integers, curve parameters and self-test
//!
//! This crate provides the [`BigNumber`] value type, the domain parameters of
//! a few elliptic curves, Shamir secret sharing and discrete-log proofs on
//! the curves RustCrypto implements, and the self-test routine shown by the
//! `bnwrap` command-line demo.

pub mod bignum;
pub mod curve;
pub mod error;
pub mod group;
pub mod nizk;
pub mod selftest;
pub mod shamir;

pub use bignum::BigNumber;
pub use curve::{CurveId, CurveParams};
pub use error::{Error, ParseError, Result};
pub use nizk::{DlProof, DleqProof};
pub use selftest::{CheckResult, CheckStatus, SelfTestReport};
pub use shamir::Share;

pub use k256::Secp256k1;
pub use p256::NistP256;

/// Title shown by the demo front end
pub const APP_TITLE: &str = "bnwrap";
