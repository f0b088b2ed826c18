// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables.

use std::path::PathBuf;
use std::str::FromStr;

/// Default upstream catalog endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://api.punkapi.com/v2/beers";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Backing file of the flat-file store.
    pub store_path: PathBuf,
    /// Upstream catalog endpoint.
    pub catalog_url: String,
    /// Timeout for a single upstream fetch in seconds.
    pub catalog_timeout_secs: u64,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Number of worker threads for the concurrent reader.
    pub worker_threads: usize,
    /// Emit JSON log lines instead of the pretty formatter.
    pub json_logs: bool,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env_or("PORT", 8080),
            store_path: std::env::var("STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./beersFromAPI.csv")),
            catalog_url: std::env::var("CATALOG_URL")
                .unwrap_or_else(|_| DEFAULT_CATALOG_URL.into()),
            catalog_timeout_secs: env_or("CATALOG_TIMEOUT_SECS", 30),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 60),
            worker_threads: env_or("WORKER_THREADS", num_cpus::get()).max(1),
            json_logs: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }

    /// Address string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
