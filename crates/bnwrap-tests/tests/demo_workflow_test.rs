//! End-to-end workflow tests for bnwrap
//!
//! These tests drive the CLI the way the demo is used and check its output
//! against the core library.

use bnwrap_cli::{run, Cli, CliConfig};
use bnwrap_core::{selftest, BigNumber, CheckStatus, CurveId, CurveParams};
use clap::Parser;

fn run_cli(args: &[&str]) -> (bool, String) {
    let cli = Cli::try_parse_from(std::iter::once("bnwrap").chain(args.iter().copied()))
        .expect("arguments should parse");
    let mut out = Vec::new();
    let ok = run(cli, &mut out).expect("command should succeed");
    (ok, String::from_utf8(out).expect("output should be UTF-8"))
}

/// The default screen: title, order and self-test report
#[test]
fn test_demo_screen_for_every_curve() {
    for curve in CurveId::ALL {
        let (ok, out) = run_cli(&["--curve", curve.name()]);
        assert!(ok, "{} demo failed:\n{}", curve, out);

        let params = CurveParams::for_curve(curve).unwrap();
        assert!(out.contains(&format!("Order: {}", params.order())));
        assert!(out.contains(&format!("Order (dec): {}", params.order().to_dec_string())));

        let report = selftest::run(curve);
        assert!(out.contains(&report.to_string()));
    }
}

#[test]
fn test_config_file_selects_curve() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bnwrap.json");
    CliConfig {
        curve: CurveId::ToyEc29,
        show_decimal: false,
    }
    .save(&path)
    .unwrap();

    let path_arg = path.to_str().unwrap();
    let (ok, out) = run_cli(&["--config", path_arg, "demo"]);
    assert!(ok);
    assert!(out.contains("Curve: ec29"));
    assert!(out.contains("Order: 25"));
    assert!(!out.contains("Order (dec)"));
    assert!(out.contains("[skip] library_cross_check"));

    // --curve overrides the file
    let (_, out) = run_cli(&["--config", path_arg, "--curve", "p256", "order"]);
    assert_eq!(
        out.trim(),
        "FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551"
    );
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let cli = Cli::try_parse_from(["bnwrap", "--config", path.to_str().unwrap(), "demo"]).unwrap();
    let mut out = Vec::new();
    let err = run(cli, &mut out).unwrap_err();
    assert!(err.to_string().contains("Failed to load config"));
    assert!(out.is_empty());
}

/// CLI arithmetic agrees with the library
#[test]
fn test_cli_add_matches_library() {
    let operands = ["-FFFFFFFFFFFFFFFF", "1", "123456789ABCDEF0123456789", "-0"];
    let (_, out) = run_cli(&[&["add"][..], &operands[..]].concat());

    let expected: BigNumber = operands
        .iter()
        .map(|s| BigNumber::from_hex_string(s).unwrap())
        .sum();
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some(expected.to_hex_string().as_str()));
    assert_eq!(lines.next(), Some(expected.to_dec_string().as_str()));
}

#[test]
fn test_curve_json_roundtrips_into_params() {
    let (_, out) = run_cli(&["--curve", "p256", "curve"]);
    let params: CurveParams = serde_json::from_str(&out).unwrap();
    assert_eq!(params, CurveParams::for_curve(CurveId::P256).unwrap());
    assert!(params.generator_on_curve());
}

#[test]
fn test_selftest_statuses() {
    let report = selftest::run(CurveId::Secp256k1);
    assert!(report.passed());
    assert_eq!(report.count(CheckStatus::Failed), 0);
    assert_eq!(report.count(CheckStatus::Skipped), 0);
    assert!(report
        .checks
        .iter()
        .any(|c| c.name == "library_cross_check" && c.status == CheckStatus::Passed));
}

#[test]
fn test_cli_shares_reconstruct_in_library() {
    use bnwrap_core::group::{scalar_from_bignumber, scalar_to_bignumber};
    use bnwrap_core::{shamir, NistP256, Share};

    let (_, out) = run_cli(&["share", "--threshold", "2", "--parties", "5", "-DEADBEEF"]);
    let shares: Vec<Share<p256::Scalar>> = out
        .lines()
        .map(|line| {
            let (index, value) = line.split_once(':').unwrap();
            Share {
                index: index.parse().unwrap(),
                value: scalar_from_bignumber::<NistP256>(&BigNumber::from_hex_string(value).unwrap()),
            }
        })
        .collect();
    assert_eq!(shares.len(), 5);

    let secret = shamir::reconstruct_scalar::<NistP256>(&shares[2..], 2).unwrap();
    let expected = scalar_from_bignumber::<NistP256>(&BigNumber::from_hex_string("-DEADBEEF").unwrap());
    assert_eq!(secret, expected);
    assert_eq!(
        scalar_to_bignumber::<NistP256>(&secret),
        BigNumber::from_hex_string("FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC21DB56662").unwrap()
    );
}
