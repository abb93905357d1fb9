//! SPL deploy hook
//!
//! Run after `anchor deploy`: resolves the provider the same way the tests do
//! and checks that the program is live on the target cluster.
//!
//! # Usage
//!
//! ```bash
//! # Provider from the environment (ANCHOR_PROVIDER_URL, ANCHOR_WALLET)
//! spl-deploy
//!
//! # Provider from the workspace manifest, overriding the cluster
//! spl-deploy --anchor-toml Anchor.toml --url devnet
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use spl_common::{
    address::mint_address,
    cluster::{Cluster, ProviderConfig},
    commitment::CommitmentLevel,
    config::{PROVIDER_URL_ENV, SPL_PROGRAM_ID, VERSION, WALLET_ENV},
    crypto::Pubkey,
    rpc::LedgerRpc,
};
use spl_testing_framework::{
    provider::Provider, tier2_integration::rpc_helpers::assert_program_deployed,
};

/// SPL deploy hook
#[derive(Parser, Debug)]
#[command(name = "spl-deploy")]
#[command(about = "Verify the SPL token program deployment")]
#[command(version = VERSION)]
struct Cli {
    /// Cluster name or RPC URL
    #[arg(short, long, env = PROVIDER_URL_ENV)]
    url: Option<String>,

    /// Payer keypair file
    #[arg(short, long, env = WALLET_ENV)]
    wallet: Option<String>,

    /// Read cluster, wallet and program id from this Anchor.toml
    #[arg(long)]
    anchor_toml: Option<PathBuf>,

    /// Program id, overriding Anchor.toml and the built-in id
    #[arg(long)]
    program_id: Option<Pubkey>,

    /// Commitment used for queries
    #[arg(long, default_value = "confirmed")]
    commitment: CommitmentLevel,
}

impl Cli {
    /// Anchor.toml first, then command line/environment overrides.
    fn provider_config(&self) -> Result<ProviderConfig> {
        let mut config = match &self.anchor_toml {
            Some(path) => {
                let cluster = self.url.as_deref().map(str::parse::<Cluster>).transpose()?;
                let mut config = ProviderConfig::from_anchor_toml_on(path, cluster)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                if let Some(wallet) = &self.wallet {
                    config.wallet = PathBuf::from(wallet);
                }
                config
            }
            None => ProviderConfig::from_vars(|key| match key {
                PROVIDER_URL_ENV => self.url.clone(),
                WALLET_ENV => self.wallet.clone(),
                _ => env::var(key).ok(),
            })
            .context("Either --anchor-toml or both --url and --wallet are required")?,
        };

        if let Some(program_id) = self.program_id {
            config.program_id = Some(program_id);
        }
        Ok(config.with_commitment(self.commitment))
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.provider_config()?;
    let program_id = config.program_id.unwrap_or(SPL_PROGRAM_ID);
    let provider = Provider::from_config(&config)?;

    info!(
        "Checking program {} on {} as {}",
        program_id,
        provider.cluster(),
        provider.pubkey()
    );

    let ledger = provider.connection().as_ref();
    let program = assert_program_deployed(ledger, &program_id).await?;
    info!(
        "Program {} is deployed ({} lamports, owner {})",
        program_id, program.lamports, program.owner
    );

    let mint = mint_address(&program_id)?;
    match ledger.get_account_info(&mint).await? {
        Some(_) => info!("Mint {} is initialized", mint),
        None => warn!("Mint {} is not initialized yet", mint),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("spl-deploy").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_config_from_flags() {
        let cli = parse(&[
            "--url",
            "devnet",
            "--wallet",
            "/keys/id.json",
            "--commitment",
            "finalized",
        ]);
        let config = cli.provider_config().unwrap();

        assert_eq!(config.cluster, Cluster::Devnet);
        assert_eq!(config.wallet, PathBuf::from("/keys/id.json"));
        assert_eq!(config.commitment, CommitmentLevel::Finalized);
        assert_eq!(config.program_id, None);
    }

    #[test]
    fn test_anchor_toml_with_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[programs.localnet]\nspl = \"{}\"\n\n[provider]\ncluster = \"Localnet\"\nwallet = \"/keys/id.json\"\n",
            SPL_PROGRAM_ID
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let cli = parse(&["--anchor-toml", &path, "--url", "http://10.0.0.5:8899"]);
        let config = cli.provider_config().unwrap();

        assert_eq!(config.cluster, Cluster::Custom("http://10.0.0.5:8899".into()));
        assert_eq!(config.program_id, None);
        assert_eq!(config.wallet, PathBuf::from("/keys/id.json"));
    }

    #[test]
    fn test_url_override_reads_programs_of_that_cluster() {
        let devnet_id = Pubkey::new_unique();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[programs.localnet]\nspl = \"{}\"\n\n[programs.devnet]\nspl = \"{}\"\n\n[provider]\ncluster = \"localnet\"\nwallet = \"/keys/id.json\"\n",
            SPL_PROGRAM_ID, devnet_id
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let config = parse(&["--anchor-toml", &path]).provider_config().unwrap();
        assert_eq!(config.cluster, Cluster::Localnet);
        assert_eq!(config.program_id, Some(SPL_PROGRAM_ID));

        let config = parse(&["--anchor-toml", &path, "--url", "devnet"])
            .provider_config()
            .unwrap();
        assert_eq!(config.cluster, Cluster::Devnet);
        assert_eq!(config.program_id, Some(devnet_id));
    }

    #[test]
    fn test_program_id_flag_wins() {
        let program_id = Pubkey::new_unique();
        let cli = parse(&[
            "--url",
            "localnet",
            "--wallet",
            "id.json",
            "--program-id",
            &program_id.to_string(),
        ]);

        assert_eq!(cli.provider_config().unwrap().program_id, Some(program_id));
    }

    #[test]
    fn test_unknown_commitment_rejected() {
        let result = Cli::try_parse_from(["spl-deploy", "--commitment", "eventual"]);
        assert!(result.is_err());
    }
}
