//! Built-in self-test
//!
//! Exercises the [`BigNumber`] wrapper, the curve parameters of one curve and,
//! where RustCrypto implements the curve, secret sharing and the
//! discrete-log proofs. The outcome is collected as a [`SelfTestReport`],
//! whose `Display` output is the text the demo front end shows. Failed checks
//! are reported, never panicked on.

use std::fmt;

use p256::elliptic_curve::group::Group;
use p256::elliptic_curve::CurveArithmetic;
use rand::rngs::OsRng;
use tracing::{info, warn};

use crate::bignum::BigNumber;
use crate::curve::{CurveId, CurveParams};
use crate::error::{Error, ParseError};
use crate::group::{random_point, random_scalar};
use crate::nizk::{DlProof, DleqProof};
use crate::shamir;

type CheckOutcome = std::result::Result<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    Failed,
    Skipped,
}

impl CheckStatus {
    fn label(&self) -> &'static str {
        match self {
            CheckStatus::Passed => "ok",
            CheckStatus::Failed => "FAIL",
            CheckStatus::Skipped => "skip",
        }
    }
}

/// Outcome of a single named check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: &'static str,
    pub status: CheckStatus,
    pub detail: String,
}

#[derive(Debug, Clone)]
pub struct SelfTestReport {
    pub curve: CurveId,
    pub checks: Vec<CheckResult>,
}

impl SelfTestReport {
    /// True when no check failed (skipped checks do not count as failures)
    pub fn passed(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks
            .iter()
            .filter(|c| c.status == CheckStatus::Failed)
    }

    pub fn count(&self, status: CheckStatus) -> usize {
        self.checks.iter().filter(|c| c.status == status).count()
    }

    fn record(&mut self, name: &'static str, outcome: CheckOutcome) {
        let (status, detail) = match outcome {
            Ok(detail) => (CheckStatus::Passed, detail),
            Err(detail) => (CheckStatus::Failed, detail),
        };
        self.push(name, status, detail);
    }

    fn push(&mut self, name: &'static str, status: CheckStatus, detail: String) {
        match status {
            CheckStatus::Failed => warn!("Self-test check {} failed: {}", name, detail),
            _ => info!("Self-test check {} {}: {}", name, status.label(), detail),
        }
        self.checks.push(CheckResult {
            name,
            status,
            detail,
        });
    }
}

impl fmt::Display for SelfTestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Self-test ({})", self.curve)?;
        for check in &self.checks {
            writeln!(
                f,
                "  [{:<4}] {}: {}",
                check.status.label(),
                check.name,
                check.detail
            )?;
        }
        write!(
            f,
            "{} passed, {} failed, {} skipped",
            self.count(CheckStatus::Passed),
            self.count(CheckStatus::Failed),
            self.count(CheckStatus::Skipped)
        )
    }
}

/// Run every check against the given curve
pub fn run(curve: CurveId) -> SelfTestReport {
    info!("Running self-test for {}", curve);

    let mut report = SelfTestReport {
        curve,
        checks: Vec::new(),
    };

    report.record("zero_identity", check_zero_identity());
    report.record("hex_roundtrip_add", check_hex_roundtrip_add());
    report.record("add_assign", check_add_assign());
    report.record("negative_roundtrip", check_negative_roundtrip());
    report.record("rejects_malformed", check_rejects_malformed());
    report.record("addition_laws", check_addition_laws());

    match CurveParams::for_curve(curve) {
        Ok(params) => {
            report.record("curve_parameters", check_curve_parameters(&params));
            match params.library_check() {
                Some(Ok(())) => report.record(
                    "library_cross_check",
                    Ok("order and generator match".to_string()),
                ),
                Some(Err(e)) => report.record("library_cross_check", Err(e.to_string())),
                None => report.push(
                    "library_cross_check",
                    CheckStatus::Skipped,
                    format!("no library implements {}", curve),
                ),
            }
        }
        Err(e) => {
            report.record("curve_parameters", Err(e.to_string()));
            report.push(
                "library_cross_check",
                CheckStatus::Skipped,
                "parameters unavailable".to_string(),
            );
        }
    }

    match curve {
        CurveId::P256 => record_group_checks::<p256::NistP256>(&mut report),
        CurveId::Secp256k1 => record_group_checks::<k256::Secp256k1>(&mut report),
        CurveId::ToyEc29 => {
            for name in GROUP_CHECKS {
                report.push(
                    name,
                    CheckStatus::Skipped,
                    format!("no group arithmetic for {}", curve),
                );
            }
        }
    }

    info!(
        "Self-test for {} finished: {} failure(s)",
        curve,
        report.count(CheckStatus::Failed)
    );
    report
}

const GROUP_CHECKS: [&str; 3] = ["shamir_shares", "nizk_dl", "nizk_dl_eq"];

fn record_group_checks<C: CurveArithmetic>(report: &mut SelfTestReport) {
    let [shamir_shares, nizk_dl, nizk_dl_eq] = GROUP_CHECKS;
    report.record(shamir_shares, check_shamir_shares::<C>());
    report.record(nizk_dl, check_nizk_dl::<C>());
    report.record(nizk_dl_eq, check_nizk_dl_eq::<C>());
}

fn parse(text: &str) -> std::result::Result<BigNumber, String> {
    BigNumber::from_hex_string(text).map_err(|e| format!("{:?} rejected: {}", text, e))
}

fn check_zero_identity() -> CheckOutcome {
    let zero = BigNumber::create_zero();
    if zero != parse("0")? {
        return Err("zero differs from parsed \"0\"".to_string());
    }
    let x = parse("-DEADBEEF")?;
    if &x + &zero != x {
        return Err("x + 0 != x".to_string());
    }
    Ok("0 == \"0\", x + 0 == x".to_string())
}

fn check_hex_roundtrip_add() -> CheckOutcome {
    let a = parse("1A")?;
    if a.to_hex_string() != "1A" {
        return Err(format!("\"1A\" formatted as {}", a));
    }
    let sum = a + parse("01")?;
    if sum.to_hex_string() != "1B" {
        return Err(format!("1A + 01 = {}", sum));
    }
    Ok("1A + 01 = 1B".to_string())
}

fn check_add_assign() -> CheckOutcome {
    let mut value = BigNumber::from_integer(5);
    value += BigNumber::from_integer(3);
    if value != BigNumber::from_integer(8) {
        return Err(format!("5 += 3 gave {}", value.to_dec_string()));
    }
    Ok("5 += 3 == 8".to_string())
}

fn check_negative_roundtrip() -> CheckOutcome {
    for n in [-1, -255, i64::MIN] {
        let value = BigNumber::from_integer(n);
        let back = parse(&value.to_hex_string())?;
        if back != value || back.to_dec_string() != n.to_string() {
            return Err(format!("{} did not round-trip", n));
        }
    }
    Ok("-1, -255, i64::MIN round-trip".to_string())
}

fn check_rejects_malformed() -> CheckOutcome {
    let cases: [(&str, fn(&ParseError) -> bool); 4] = [
        ("", |e| matches!(e, ParseError::Empty)),
        ("ZZ", |e| matches!(e, ParseError::InvalidDigit { .. })),
        ("-", |e| matches!(e, ParseError::MissingDigits)),
        ("1-2", |e| matches!(e, ParseError::MisplacedSign { .. })),
    ];
    for (text, expected) in cases {
        match BigNumber::from_hex_string(text) {
            Ok(v) => return Err(format!("{:?} accepted as {}", text, v)),
            Err(e) if !expected(&e) => {
                return Err(format!("{:?} rejected with unexpected error: {}", text, e))
            }
            Err(_) => {}
        }
    }
    Ok("\"\", \"ZZ\", \"-\", \"1-2\" rejected".to_string())
}

fn check_addition_laws() -> CheckOutcome {
    let samples = [
        parse("0")?,
        parse("7F")?,
        parse("-FFFFFFFFFFFFFFFFFFFF")?,
        parse("123456789ABCDEF0123456789ABCDEF")?,
        BigNumber::from_integer(i64::MAX),
    ];
    for a in &samples {
        for b in &samples {
            if a + b != b + a {
                return Err(format!("{} + {} is not commutative", a, b));
            }
            for c in &samples {
                if (a + b) + c != a + (b + c) {
                    return Err(format!("({} + {}) + {} is not associative", a, b, c));
                }
            }
        }
    }
    Ok(format!("{} samples commutative and associative", samples.len()))
}

fn check_curve_parameters(params: &CurveParams) -> CheckOutcome {
    if params.order().is_zero() || params.order().is_negative() {
        return Err(format!("invalid order {}", params.order()));
    }
    if !params.generator_on_curve() {
        return Err("generator is not on the curve".to_string());
    }
    Ok(format!("order {}, generator on curve", params.order()))
}

fn seven<C: CurveArithmetic>() -> C::Scalar {
    C::Scalar::from(7u64)
}

fn check_shamir_shares<C: CurveArithmetic>() -> CheckOutcome {
    let secret = C::ProjectivePoint::generator() * seven::<C>();
    let shares =
        shamir::split_point::<C, _>(&secret, 1, 3, &mut OsRng).map_err(|e| e.to_string())?;

    // Parties 2 and 3
    let recovered =
        shamir::reconstruct_point::<C>(&shares[1..], 1).map_err(|e| e.to_string())?;
    if recovered != secret {
        return Err("shares 2, 3 did not recover 7*G".to_string());
    }
    match shamir::reconstruct_point::<C>(&shares[..1], 1) {
        Err(Error::NotEnoughShares { .. }) => {}
        other => return Err(format!("single share gave {:?}", other.map(|_| ()))),
    }
    Ok("7*G split 2-of-3, recovered from shares 2, 3".to_string())
}

fn check_nizk_dl<C: CurveArithmetic>() -> CheckOutcome {
    let x = seven::<C>();
    let public = C::ProjectivePoint::generator() * x;

    let proof = DlProof::<C>::prove(&x, &mut OsRng);
    proof
        .verify(&public)
        .map_err(|e| format!("correct proof rejected: {}", e))?;

    let mut wrong_response = proof;
    wrong_response.z = random_scalar::<C, _>(&mut OsRng);
    if wrong_response.verify(&public).is_ok() {
        return Err("proof with random response accepted".to_string());
    }

    let mut wrong_commitment = proof;
    wrong_commitment.u = random_point::<C, _>(&mut OsRng);
    if wrong_commitment.verify(&public).is_ok() {
        return Err("proof with random commitment accepted".to_string());
    }
    Ok("valid proof accepted, tampered proofs rejected".to_string())
}

fn check_nizk_dl_eq<C: CurveArithmetic>() -> CheckOutcome {
    let a = C::ProjectivePoint::generator();
    let b = random_point::<C, _>(&mut OsRng);

    let (proof, big_a, big_b) = DleqProof::<C>::prove(&seven::<C>(), &a, &b, &mut OsRng);
    proof
        .verify(&a, &big_a, &b, &big_b)
        .map_err(|e| format!("correct proof rejected: {}", e))?;

    let other = random_point::<C, _>(&mut OsRng);
    if proof.verify(&a, &big_a, &b, &other).is_ok() {
        return Err("proof accepted for unrelated point".to_string());
    }
    Ok("valid proof accepted, unrelated point rejected".to_string())
}
