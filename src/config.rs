use std::env;

use anyhow::Result;

pub const DEFAULT_DB_PATH: &str = "./scamguard.db";
pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy, so every
/// value here can also be set there.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    /// Store each successful message check (SCAMGUARD_PERSIST, default on).
    pub persist_checks: bool,
    pub bind: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            persist_checks: true,
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default; only malformed values are errors.
    pub fn load() -> Result<Self> {
        let port = match env::var("SCAMGUARD_PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("SCAMGUARD_PORT must be a port number, got {raw:?}"))?,
            Err(_) => DEFAULT_PORT,
        };

        let persist_checks = match env::var("SCAMGUARD_PERSIST") {
            Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                anyhow::anyhow!("SCAMGUARD_PERSIST must be true/false, got {raw:?}")
            })?,
            Err(_) => true,
        };

        Ok(Self {
            db_path: env::var("SCAMGUARD_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string()),
            persist_checks,
            bind: env::var("SCAMGUARD_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string()),
            port,
        })
    }

    /// Check that this build can store checks.
    /// Call this before any command that reads or writes the record store.
    pub fn require_storage(&self) -> Result<()> {
        if !cfg!(feature = "sqlite") {
            anyhow::bail!(
                "This build has no record store. Rebuild with `--features sqlite`."
            );
        }
        Ok(())
    }
}

/// Parse a boolean-ish env value: true/false, 1/0, yes/no, on/off.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
