//! Cluster selection and provider configuration.
//!
//! A provider is configured either from the environment (`ANCHOR_PROVIDER_URL`
//! and `ANCHOR_WALLET`, as set by the workspace test runner) or from the
//! workspace `Anchor.toml`.

use serde::Deserialize;
use std::{
    collections::HashMap,
    env, fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};
use thiserror::Error;

use crate::{
    commitment::CommitmentLevel,
    config::{EXPLORER_URL, PROGRAM_NAME, PROVIDER_URL_ENV, WALLET_ENV},
    crypto::{read_keypair_file, CryptoError, Keypair, KeypairFileError, Pubkey, Signature},
};

const LOCALNET_URL: &str = "http://127.0.0.1:8899";
const DEVNET_URL: &str = "https://api.devnet.solana.com";
const TESTNET_URL: &str = "https://api.testnet.solana.com";
const MAINNET_URL: &str = "https://api.mainnet-beta.solana.com";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("Failed to read config file: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid Anchor.toml: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown cluster '{0}'")]
    UnknownCluster(String),

    #[error("Invalid program id: {0}")]
    InvalidProgramId(CryptoError),

    #[error(transparent)]
    Keypair(#[from] KeypairFileError),
}

/// Ledger cluster the provider talks to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cluster {
    #[default]
    Localnet,
    Devnet,
    Testnet,
    Mainnet,
    Custom(String),
}

impl Cluster {
    pub fn url(&self) -> &str {
        match self {
            Self::Localnet => LOCALNET_URL,
            Self::Devnet => DEVNET_URL,
            Self::Testnet => TESTNET_URL,
            Self::Mainnet => MAINNET_URL,
            Self::Custom(url) => url,
        }
    }

    /// Key used for this cluster under `[programs.<name>]` in Anchor.toml.
    pub fn name(&self) -> &str {
        match self {
            Self::Localnet => "localnet",
            Self::Devnet => "devnet",
            Self::Testnet => "testnet",
            Self::Mainnet => "mainnet",
            Self::Custom(_) => "custom",
        }
    }

    fn explorer_query(&self) -> Option<String> {
        match self {
            Self::Mainnet => None,
            Self::Devnet | Self::Testnet => Some(self.name().to_string()),
            Self::Localnet => Some(format!("custom&customUrl={}", LOCALNET_URL)),
            Self::Custom(url) => Some(format!("custom&customUrl={}", url)),
        }
    }
}

impl FromStr for Cluster {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            let url = s.trim_end_matches('/');
            let known = [
                Self::Localnet,
                Self::Devnet,
                Self::Testnet,
                Self::Mainnet,
            ];
            return Ok(known
                .into_iter()
                .find(|c| c.url() == url)
                .unwrap_or_else(|| Self::Custom(url.to_string())));
        }

        match s.to_ascii_lowercase().as_str() {
            "localnet" | "localhost" => Ok(Self::Localnet),
            "devnet" => Ok(Self::Devnet),
            "testnet" => Ok(Self::Testnet),
            "mainnet" | "mainnet-beta" => Ok(Self::Mainnet),
            _ => Err(ConfigError::UnknownCluster(s.to_string())),
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(url) => write!(f, "{}", url),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Block explorer link for a submitted transaction.
pub fn explorer_url(signature: &Signature, cluster: &Cluster) -> String {
    match cluster.explorer_query() {
        Some(query) => format!("{}/tx/{}?cluster={}", EXPLORER_URL, signature, query),
        None => format!("{}/tx/{}", EXPLORER_URL, signature),
    }
}

/// Everything needed to build a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub cluster: Cluster,
    /// Path to the payer keypair file.
    pub wallet: PathBuf,
    /// Program id override; the compiled-in id is used when absent.
    pub program_id: Option<Pubkey>,
    pub commitment: CommitmentLevel,
}

#[derive(Deserialize)]
struct AnchorToml {
    provider: AnchorProvider,
    #[serde(default)]
    programs: HashMap<String, HashMap<String, String>>,
}

#[derive(Deserialize)]
struct AnchorProvider {
    cluster: String,
    wallet: String,
}

impl ProviderConfig {
    pub fn new(cluster: Cluster, wallet: impl Into<PathBuf>) -> Self {
        Self {
            cluster,
            wallet: wallet.into(),
            program_id: None,
            commitment: CommitmentLevel::default(),
        }
    }

    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    pub fn with_commitment(mut self, commitment: CommitmentLevel) -> Self {
        self.commitment = commitment;
        self
    }

    /// Read `ANCHOR_PROVIDER_URL` and `ANCHOR_WALLET`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`ProviderConfig::from_env`] with an explicit variable lookup.
    pub fn from_vars<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = get(PROVIDER_URL_ENV).ok_or(ConfigError::MissingVar(PROVIDER_URL_ENV))?;
        let wallet = get(WALLET_ENV).ok_or(ConfigError::MissingVar(WALLET_ENV))?;
        let home = get("HOME");

        Ok(Self::new(
            url.parse()?,
            expand_tilde(&wallet, home.as_deref()),
        ))
    }

    /// Parse the `[provider]` and `[programs.<cluster>]` sections of an Anchor.toml.
    pub fn from_anchor_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_anchor_toml_on(path, None)
    }

    /// Like [`ProviderConfig::from_anchor_toml`], but targets `cluster` when given
    /// instead of `[provider].cluster`. The program id then comes from
    /// `[programs.<cluster>]` of the overriding cluster.
    pub fn from_anchor_toml_on<P: AsRef<Path>>(
        path: P,
        cluster: Option<Cluster>,
    ) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse_anchor_toml(&content, cluster, env::var("HOME").ok().as_deref())
    }

    fn parse_anchor_toml(
        content: &str,
        cluster: Option<Cluster>,
        home: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let parsed: AnchorToml = toml::from_str(content)?;
        let cluster = match cluster {
            Some(cluster) => cluster,
            None => parsed.provider.cluster.parse()?,
        };

        let program_id = parsed
            .programs
            .get(cluster.name())
            .and_then(|programs| programs.get(PROGRAM_NAME))
            .map(|id| id.parse::<Pubkey>())
            .transpose()
            .map_err(ConfigError::InvalidProgramId)?;

        let mut config = Self::new(cluster, expand_tilde(&parsed.provider.wallet, home));
        config.program_id = program_id;
        Ok(config)
    }

    pub fn load_payer(&self) -> Result<Keypair, ConfigError> {
        Ok(read_keypair_file(&self.wallet)?)
    }
}

fn expand_tilde(path: &str, home: Option<&str>) -> PathBuf {
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => Path::new(home).join(rest),
        _ => PathBuf::from(path),
    }
}
