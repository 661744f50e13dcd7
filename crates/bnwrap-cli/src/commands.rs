//! CLI command implementations

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use bnwrap_core::group::{scalar_from_bignumber, scalar_to_bignumber};
use bnwrap_core::shamir::{self, Share};
use bnwrap_core::{
    selftest, BigNumber, CurveId, CurveParams, Error as CoreError, NistP256, Secp256k1, APP_TITLE,
};
use clap::{Parser, Subcommand};
use p256::elliptic_curve::CurveArithmetic;
use rand::rngs::OsRng;
use tracing::info;

use crate::config::CliConfig;

/// bnwrap - arbitrary-precision integer and curve parameter demo
#[derive(Parser)]
#[command(name = "bnwrap")]
#[command(about = "Big-number wrapper demo: curve order, arithmetic and self-test")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to a JSON config file (the binary falls back to $BNWRAP_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Curve to use (p256, secp256k1, ec29)
    #[arg(long, global = true)]
    pub curve: Option<CurveId>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the curve order and run the self-test (default)
    Demo,

    /// Print the group order of the curve
    Order {
        /// Print the order in decimal instead of hex
        #[arg(long)]
        decimal: bool,
    },

    /// Print the curve domain parameters as JSON
    Curve,

    /// Add hexadecimal numbers
    Add {
        /// Operands (hex, optional leading '-')
        #[arg(required = true, allow_hyphen_values = true)]
        operands: Vec<String>,
    },

    /// Show a hexadecimal number in canonical hex, decimal and bytes
    Convert {
        /// Value (hex, optional leading '-')
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Convert a machine integer to canonical hex
    FromInt {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },

    /// Split a secret into Shamir shares over the curve's scalar field
    Share {
        /// Secret (hex, reduced modulo the group order)
        #[arg(allow_hyphen_values = true)]
        secret: String,

        /// Polynomial degree; threshold + 1 shares recover the secret
        #[arg(short, long)]
        threshold: usize,

        /// Number of shares to produce
        #[arg(short = 'n', long)]
        parties: usize,
    },

    /// Recover a secret from Shamir shares
    Reconstruct {
        /// Polynomial degree used when splitting
        #[arg(short, long)]
        threshold: usize,

        /// Shares as INDEX:HEX
        #[arg(required = true)]
        shares: Vec<String>,
    },

    /// Run the self-test
    Selftest,
}

/// Run the CLI, writing results to `out`
///
/// Returns `false` when a self-test check failed.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<bool> {
    let config = CliConfig::resolve(cli.config.as_deref()).context("Failed to load config")?;
    let curve = cli.curve.unwrap_or(config.curve);

    match cli.command.unwrap_or(Commands::Demo) {
        Commands::Demo => {
            let params = CurveParams::for_curve(curve)?;
            writeln!(out, "{}", APP_TITLE)?;
            writeln!(out, "Curve: {}", curve)?;
            writeln!(out, "Order: {}", params.order())?;
            if config.show_decimal {
                writeln!(out, "Order (dec): {}", params.order().to_dec_string())?;
            }
            writeln!(out)?;
            return report_selftest(curve, out);
        }

        Commands::Order { decimal } => {
            let params = CurveParams::for_curve(curve)?;
            if decimal {
                writeln!(out, "{}", params.order().to_dec_string())?;
            } else {
                writeln!(out, "{}", params.order())?;
            }
        }

        Commands::Curve => {
            let params = CurveParams::for_curve(curve)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&params)?)?;
        }

        Commands::Add { operands } => {
            let mut total = BigNumber::create_zero();
            for operand in &operands {
                let value = BigNumber::from_hex_string(operand)
                    .with_context(|| format!("Invalid operand {:?}", operand))?;
                total += value;
            }
            info!("Added {} operand(s)", operands.len());
            writeln!(out, "{}", total)?;
            if config.show_decimal {
                writeln!(out, "{}", total.to_dec_string())?;
            }
        }

        Commands::Convert { value } => {
            let number = BigNumber::from_hex_string(&value)
                .with_context(|| format!("Invalid value {:?}", value))?;
            writeln!(out, "Hex: {}", number)?;
            writeln!(out, "Decimal: {}", number.to_dec_string())?;
            writeln!(out, "Bytes (BE): {}", hex::encode(number.to_bytes_be()))?;
            writeln!(out, "Bits: {}", number.num_bits())?;
        }

        Commands::FromInt { value } => {
            writeln!(out, "{}", BigNumber::from_integer(value))?;
        }

        Commands::Share {
            secret,
            threshold,
            parties,
        } => {
            let secret = BigNumber::from_hex_string(&secret)
                .with_context(|| format!("Invalid secret {:?}", secret))?;
            let shares = match curve {
                CurveId::P256 => split::<NistP256>(&secret, threshold, parties)?,
                CurveId::Secp256k1 => split::<Secp256k1>(&secret, threshold, parties)?,
                CurveId::ToyEc29 => return Err(CoreError::Unsupported(curve).into()),
            };
            info!("Split secret into {} shares on {}", shares.len(), curve);
            for (index, value) in shares {
                writeln!(out, "{}:{}", index, value)?;
            }
        }

        Commands::Reconstruct { threshold, shares } => {
            let shares = shares
                .iter()
                .map(|text| parse_share(text))
                .collect::<Result<Vec<_>>>()?;
            let secret = match curve {
                CurveId::P256 => reconstruct::<NistP256>(&shares, threshold)?,
                CurveId::Secp256k1 => reconstruct::<Secp256k1>(&shares, threshold)?,
                CurveId::ToyEc29 => return Err(CoreError::Unsupported(curve).into()),
            };
            writeln!(out, "{}", secret)?;
        }

        Commands::Selftest => return report_selftest(curve, out),
    }

    Ok(true)
}

fn split<C: CurveArithmetic>(
    secret: &BigNumber,
    threshold: usize,
    parties: usize,
) -> Result<Vec<(u32, BigNumber)>> {
    let scalar = scalar_from_bignumber::<C>(secret);
    let shares = shamir::split_scalar::<C, _>(&scalar, threshold, parties, &mut OsRng)?;
    Ok(shares
        .iter()
        .map(|share| (share.index, scalar_to_bignumber::<C>(&share.value)))
        .collect())
}

fn reconstruct<C: CurveArithmetic>(
    shares: &[(u32, BigNumber)],
    threshold: usize,
) -> Result<BigNumber> {
    let shares: Vec<Share<C::Scalar>> = shares
        .iter()
        .map(|(index, value)| Share {
            index: *index,
            value: scalar_from_bignumber::<C>(value),
        })
        .collect();
    let secret = shamir::reconstruct_scalar::<C>(&shares, threshold)?;
    Ok(scalar_to_bignumber::<C>(&secret))
}

fn parse_share(text: &str) -> Result<(u32, BigNumber)> {
    let Some((index, value)) = text.split_once(':') else {
        bail!("Share {:?} is not INDEX:HEX", text);
    };
    let index = index
        .parse()
        .with_context(|| format!("Invalid share index in {:?}", text))?;
    let value = BigNumber::from_hex_string(value)
        .with_context(|| format!("Invalid share value in {:?}", text))?;
    Ok((index, value))
}

fn report_selftest<W: Write>(curve: CurveId, out: &mut W) -> Result<bool> {
    let report = selftest::run(curve);
    writeln!(out, "{}", report)?;
    Ok(report.passed())
}
