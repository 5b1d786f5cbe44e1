use crate::error::AppError;
use config::{Config as Cfg, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Config {
    /// Load from `configuration.*`, then `PORT`, then `APP__*` overrides.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(Environment::default().try_parsing(true))
            .add_source(Environment::with_prefix("APP").separator("__").try_parsing(true))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
