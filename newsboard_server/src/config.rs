use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use newsboard_core::{Error, Result, DEFAULT_FRESHNESS};

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_DATA_PATH: &str = "data/processed_data.json";
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Server configuration, read from environment variables (and `.env` if present).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `SERVER_ADDRESS`, with the port replaced by `PORT` if set.
    pub address: SocketAddr,
    /// `DATA_PATH`: JSON file produced by the processing step.
    pub data_path: PathBuf,
    /// `PUBLIC_DIR`: static dashboard files.
    pub public_dir: PathBuf,
    /// `CACHE_TTL_SECS`: freshness window of the cached dataset.
    pub cache_ttl: Duration,
    /// `REFRESH_INTERVAL_SECS`: period of the background reload, disabled if unset.
    pub refresh_interval: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let address = lookup("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string());
        let mut address = address
            .parse::<SocketAddr>()
            .map_err(|_| Error::InvalidConfig(format!("SERVER_ADDRESS `{}` is not a socket address", address)))?;
        if let Some(port) = lookup("PORT") {
            let port = port
                .parse::<u16>()
                .map_err(|_| Error::InvalidConfig(format!("PORT `{}` is not a port number", port)))?;
            address.set_port(port);
        }

        let data_path = lookup("DATA_PATH").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
        let public_dir = lookup("PUBLIC_DIR").unwrap_or_else(|| DEFAULT_PUBLIC_DIR.to_string());

        let cache_ttl = seconds(&lookup, "CACHE_TTL_SECS")?.unwrap_or(DEFAULT_FRESHNESS);
        let refresh_interval = seconds(&lookup, "REFRESH_INTERVAL_SECS")?;
        if refresh_interval.is_some_and(|d| d.is_zero()) {
            return Err(Error::InvalidConfig("REFRESH_INTERVAL_SECS must be positive".to_string()));
        }

        Ok(Self {
            address,
            data_path: PathBuf::from(data_path),
            public_dir: PathBuf::from(public_dir),
            cache_ttl,
            refresh_interval,
        })
    }
}

fn seconds(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<Duration>> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|_| Error::InvalidConfig(format!("{} `{}` is not a number of seconds", key, value))),
        None => Ok(None),
    }
}
