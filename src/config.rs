//! Server Configuration
//!
//! Settings are read from the environment (a `.env` file is honoured by the
//! binary before this runs).

use anyhow::{Context, Result};
use std::env;

use crate::engine::BindingPolicy;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 63995;
pub const DEFAULT_LOG_FILTER: &str = "financial_formulas=info,tower_http=info";

/// Configuration for the formula server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// How parameters supplied after a gap are bound
    pub binding: BindingPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            binding: BindingPolicy::FirstGap,
        }
    }
}

impl ServerConfig {
    /// Read `FORMULAS_HOST`, `FORMULAS_PORT` and `FORMULAS_STRICT_BINDING`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("FORMULAS_HOST").filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }

        if let Some(port) = lookup("FORMULAS_PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("FORMULAS_PORT must be a port number, got '{}'", port))?;
        }

        if let Some(flag) = lookup("FORMULAS_STRICT_BINDING") {
            if parse_flag(&flag).with_context(|| format!("FORMULAS_STRICT_BINDING must be a boolean, got '{}'", flag))? {
                config.binding = BindingPolicy::Strict;
            }
        }

        Ok(config)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("unrecognised flag value '{}'", other),
    }
}
