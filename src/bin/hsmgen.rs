use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::path::PathBuf;
use tracing::info;

use hsmgen::adapters::{OpenScResolver, PinPrompt, ProcessRunner};
use hsmgen::model::{Algorithm, Serial};
use hsmgen::{prepare_session, run_ceremony, SessionParams};

#[derive(Parser, Debug)]
#[command(name = "hsmgen")]
#[command(about = "Key-generation ceremony for PKCS#11 hardware security modules", version)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Serial number of the device being provisioned
    pub serial: String,

    /// Key algorithm for every generated keypair
    #[arg(long, value_enum, default_value_t = AlgorithmArg::P256)]
    pub algorithm: AlgorithmArg,

    /// Directory under which per-device ceremony products are written
    #[arg(long, env = "HSMGEN_PRODUCTS_DIR", default_value = "ceremony-products")]
    pub products_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AlgorithmArg {
    P256,
    P384,
    Rsa2048,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::P256 => Algorithm::EcP256,
            AlgorithmArg::P384 => Algorithm::EcP384,
            AlgorithmArg::Rsa2048 => Algorithm::Rsa2048,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();

    let serial = Serial::new(&cli.serial)?;
    let params = SessionParams {
        algorithm: cli.algorithm.into(),
        serial,
        products_root: cli.products_dir,
    };

    let session = prepare_session(params, &PinPrompt)?;
    run_ceremony(&OpenScResolver::new(), &ProcessRunner, &session)?;

    info!(out_dir = %session.out_dir.display(), "ceremony complete");
    Ok(())
}
