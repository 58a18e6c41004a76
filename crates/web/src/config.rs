use anyhow::{Context, Result};

const DEFAULT_CONTEST_PATH: &str = "config/contest.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub contest_path: String,
    pub api_keys: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            contest_path: std::env::var("CONTEST_PATH")
                .unwrap_or_else(|_| DEFAULT_CONTEST_PATH.to_string()),
            api_keys: std::env::var("ADMIN_API_KEYS").unwrap_or_default(),
        })
    }
}
