use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use clankermon_execution::client::dune::{DEFAULT_BASE_URL, DEFAULT_QUERY_ID};
use clankermon_execution::poller::{DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL};
use clankermon_execution::{DuneClientConfig, PollPolicy};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 90_000;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub dune: DuneClientConfig,
    pub donation_address: Option<String>,
    pub poll_policy: PollPolicy,
    pub cors_allow: Vec<String>,
    /// Must exceed the poll budget, or slow evaluations are cut off as 408.
    pub request_timeout: Duration,
    pub static_dir: String,
    /// Origin used in continuation URLs; derived from the request when unset.
    pub public_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            dune: DuneClientConfig::default(),
            donation_address: None,
            poll_policy: PollPolicy::default(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            static_dir: "frames".to_string(),
            public_url: None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = match env_var("CM_LISTEN_ADDR") {
            Some(addr) => addr
                .parse()
                .with_context(|| format!("Invalid CM_LISTEN_ADDR: {}", addr))?,
            None => {
                let port = env_parse("PORT", DEFAULT_PORT);
                SocketAddr::from(([0, 0, 0, 0], port))
            }
        };

        let dune = DuneClientConfig {
            base_url: env_var("DUNE_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            query_id: env_parse("DUNE_QUERY_ID", DEFAULT_QUERY_ID),
            api_key: env_var("DUNE_API_KEY"),
        };

        let poll_policy = PollPolicy {
            max_attempts: env_parse("CM_POLL_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS),
            interval: Duration::from_millis(env_parse(
                "CM_POLL_INTERVAL_MS",
                DEFAULT_POLL_INTERVAL.as_millis() as u64,
            )),
        };

        let cors_allow = env_var("CM_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let timeout_ms = env_parse("CM_REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS);

        Ok(Self {
            listen_addr,
            dune,
            donation_address: env_var("DONATION_ADDRESS"),
            poll_policy,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            static_dir: env_var("CM_STATIC_DIR").unwrap_or_else(|| "frames".into()),
            public_url: env_var("CM_PUBLIC_URL").map(|u| u.trim_end_matches('/').to_string()),
        })
    }
}

/// Non-empty value of `key`.
fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_var(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
