use std::collections::HashMap;
use std::{fs, path::Path};

use alloy::primitives::Address;
use anyhow::Context;
use dotenv::dotenv;
use envsubst::substitute;
use serde::Deserialize;

/// Only variables with these prefixes are substituted into the YAML.
const SUBSTITUTED_PREFIXES: [&str; 4] = ["SERVER_", "RPC_", "ROUTER_", "WALLET_"];

/// Values used when the environment leaves a placeholder unset.
const DEFAULT_VARS: [(&str, &str); 4] = [
    ("SERVER_HOST", "0.0.0.0"),
    ("SERVER_PORT", "8000"),
    ("RPC_URL", "https://eth.llamarpc.com"),
    ("WALLET_PRIVATE_KEY", ""),
];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub rpc: RpcConfig,
    pub router: RouterConfig,
    pub wallet: WalletConfig,
}

impl Config {
    pub async fn from_yaml(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        dotenv().ok();

        let path = path.as_ref();
        let file_content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file from path: {}", path.display()))?;

        let mut env_vars: HashMap<String, String> = DEFAULT_VARS
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        env_vars.extend(std::env::vars().filter(|(key, _)| {
            SUBSTITUTED_PREFIXES
                .iter()
                .any(|prefix| key.starts_with(prefix))
        }));

        let interpolated = substitute(&file_content, &env_vars)
            .context("failed to substitute environment variables in YAML")?;

        let config: Config =
            serde_yaml::from_str(&interpolated).context("failed to parse YAML configuration")?;

        Ok(config)
    }

    pub fn server_uri(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouterConfig {
    /// Universal Router the compiled calldata targets.
    pub universal_router: Address,
    /// Wrapped native token of the chain.
    pub weth: Address,
    /// Default validity window of an `execute` call, in seconds.
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
}

fn default_deadline_secs() -> u64 {
    1800
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalletConfig {
    /// Empty means read-only mode.
    #[serde(default)]
    pub private_key: String,
}
