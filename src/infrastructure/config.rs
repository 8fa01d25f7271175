use anyhow::{Context, Result, bail};
use std::env;

pub const DEFAULT_BASE_URL: &str = "https://stellarburgers.nomoreparties.site";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: u64 = 1200;
pub const MAX_ACCESS_TOKEN_TTL_SECS: u64 = 365 * 24 * 60 * 60;

const BASE_URL_VAR: &str = "STELLAR_BURGERS_BASE_URL";
const LIVE_VAR: &str = "STELLAR_BURGERS_LIVE";
const BIND_ADDR_VAR: &str = "STUB_BIND_ADDR";
const JWT_SECRET_VAR: &str = "STUB_JWT_SECRET";
const TOKEN_TTL_VAR: &str = "STUB_ACCESS_TOKEN_TTL_SECS";

fn load_dotenv() {
    dotenv::dotenv().ok();
}

/// Where the harness sends its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Reads `STELLAR_BURGERS_BASE_URL` (after loading `.env`), falling back
    /// to the public service.
    pub fn from_env() -> Self {
        load_dotenv();
        Self::new(env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Whether scenarios should target the configured service instead of the stub.
pub fn live_mode_enabled() -> bool {
    load_dotenv();
    env::var(LIVE_VAR)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Settings of the contract stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubConfig {
    pub bind_addr: String,
    pub jwt_secret: String,
    pub access_token_ttl_secs: u64,
}

impl StubConfig {
    pub fn from_env() -> Result<Self> {
        load_dotenv();
        let defaults = Self::default();

        let access_token_ttl_secs = match env::var(TOKEN_TTL_VAR) {
            Ok(raw) => parse_ttl(&raw)?,
            Err(_) => defaults.access_token_ttl_secs,
        };

        Ok(Self {
            bind_addr: env::var(BIND_ADDR_VAR).unwrap_or(defaults.bind_addr),
            jwt_secret: env::var(JWT_SECRET_VAR).unwrap_or(defaults.jwt_secret),
            access_token_ttl_secs,
        })
    }
}

fn parse_ttl(raw: &str) -> Result<u64> {
    let ttl: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{} must be a number of seconds, got {:?}", TOKEN_TTL_VAR, raw))?;
    if ttl > MAX_ACCESS_TOKEN_TTL_SECS {
        bail!(
            "{} must be at most {} seconds, got {}",
            TOKEN_TTL_VAR,
            MAX_ACCESS_TOKEN_TTL_SECS,
            ttl
        );
    }
    Ok(ttl)
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            jwt_secret: "stellar-burgers-stub-secret".to_string(),
            access_token_ttl_secs: DEFAULT_ACCESS_TOKEN_TTL_SECS,
        }
    }
}
