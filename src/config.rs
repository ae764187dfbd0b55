// config.rs
use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_MEDIA_ROOT: &str = "media";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub log_filter: String,
    pub media_root: PathBuf,
}

impl Config {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = var("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or_else(|| Error::Config("DATABASE_URL is not set".to_owned()))?;
        Ok(Self {
            database_url,
            log_filter: var("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned()),
            media_root: var("MEDIA_ROOT")
                .map_or_else(|| PathBuf::from(DEFAULT_MEDIA_ROOT), PathBuf::from),
        })
    }

    /// On-disk location of a stored post image path.
    pub fn media_path(&self, image: &str) -> PathBuf {
        self.media_root.join(image)
    }
}
