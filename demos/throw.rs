//! Example: raising thiserror-defined errors through a chain
//!
//! Domain errors stay typed: handlers can downcast them, and wrapped errors
//! still match the sentinel they were built from.

use std::collections::HashMap;

use thiserror::Error;
use try_catch_chain::{throw, try_catch, Error as Caught, ThrowExt};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: String },

    #[error("Invalid config format: {0}")]
    ParseError(String),
}

fn read_config(path: &str) -> std::result::Result<String, ConfigError> {
    if path == "missing.toml" {
        Err(ConfigError::NotFound { path: path.into() })
    } else if path == "invalid.toml" {
        Err(ConfigError::ParseError("unexpected token".into()))
    } else {
        Ok("config_data".into())
    }
}

fn main() {
    let maintenance = Caught::msg("maintenance window");

    for path in ["app.toml", "missing.toml", "invalid.toml", "maintenance"] {
        println!("=== {} ===", path);
        let mut loaded = HashMap::new();

        try_catch(|| {
            if path == "maintenance" {
                throw(maintenance.clone().context("loading config"));
            }
            let data = read_config(path).or_throw_context(format!("reading {}", path));
            loaded.insert(path, data);
        })
        .catch(&maintenance, |e| println!("skipped: {}", e))
        .default_catch(|e| match e.find::<ConfigError>() {
            Some(ConfigError::NotFound { path }) => println!("using defaults, {} is missing", path),
            Some(other) => println!("config error: {}", other),
            None => println!("unexpected: {}", e),
        })
        .otherwise(|| println!("loaded"))
        .finally(|| println!("done with {}\n", path))
        .run();

        println!("entries: {:?}\n", loaded);
    }
}
