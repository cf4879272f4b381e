//! Process configuration, read once at startup.
//!
//! | Variable | Required | Meaning |
//! |----------|----------|---------|
//! | `PORT`   | yes | listening port, bound on `0.0.0.0` |
//! | `DB_URI` | yes | `memory:`, `sled://<path>` or a bare path to the sled store; other `scheme://` values are rejected |
//! | `RUST_LOG` | no | tracing filter, defaults to `info` |
//!
//! A `.env` file in the working directory is loaded first when present.

use std::{env, fmt};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    Memory,
    Sled(String),
}

impl Storage {
    pub fn parse(uri: &str) -> Result<Self, AppError> {
        let uri = uri.trim();
        if uri == "memory:" || uri == "memory://" {
            return Ok(Self::Memory);
        }
        let path = match uri.split_once("://") {
            Some(("sled", path)) => path,
            Some((scheme, _)) => {
                return Err(AppError::ConfigFailure(format!(
                    "DB_URI scheme {scheme:?} is not supported, use sled:// or memory:"
                )));
            }
            None => uri,
        };
        if path.is_empty() {
            return Err(AppError::ConfigFailure(format!(
                "DB_URI {uri:?} does not name a store"
            )));
        }
        Ok(Self::Sled(path.to_string()))
    }
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Storage::Memory => f.write_str("memory:"),
            Storage::Sled(path) => write!(f, "sled://{path}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub storage: Storage,
}

impl Config {
    /// Loads `.env` (if any) and then reads the environment.
    pub fn load() -> Result<Self, AppError> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(err) if err.not_found() => {}
            Err(err) => {
                return Err(AppError::ConfigFailure(format!("error loading .env: {err}")));
            }
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| AppError::ConfigFailure(format!("{key} is not set")))
        };
        let port = required("PORT")?;
        let port = port.trim().parse().map_err(|_| {
            AppError::ConfigFailure(format!("PORT {port:?} is not a valid port number"))
        })?;
        let storage = Storage::parse(&required("DB_URI")?)?;
        Ok(Self { port, storage })
    }
}
