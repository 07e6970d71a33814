//! Host configuration parsed from environment variables.
//!
//! `dotenvy` loads an optional `.env` before this runs; CLI flags override
//! whatever is read here.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use editor::consts::SAVE_DEBOUNCE_MS;

pub const DEFAULT_STATE_DIR: &str = ".coverpage";
pub const DEFAULT_ASSETS_DIR: &str = "public";
pub const DEFAULT_OUTPUT_DIR: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the key-value store files.
    pub state_dir: PathBuf,
    /// Root for site-relative image paths such as `/background1.jpg`.
    pub assets_dir: PathBuf,
    /// Where exported PDFs are written.
    pub output_dir: PathBuf,
    /// Quiet period before a dirty scene is saved.
    pub save_debounce_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            save_debounce_ms: SAVE_DEBOUNCE_MS,
        }
    }
}

impl AppConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `COVERPAGE_STATE_DIR`: default `.coverpage`
    /// - `COVERPAGE_ASSETS_DIR`: default `public`
    /// - `COVERPAGE_OUTPUT_DIR`: default `.`
    /// - `COVERPAGE_SAVE_DEBOUNCE_MS`: default 300; unparseable values fall back
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            state_dir: env_path("COVERPAGE_STATE_DIR", DEFAULT_STATE_DIR),
            assets_dir: env_path("COVERPAGE_ASSETS_DIR", DEFAULT_ASSETS_DIR),
            output_dir: env_path("COVERPAGE_OUTPUT_DIR", DEFAULT_OUTPUT_DIR),
            save_debounce_ms: env_parse("COVERPAGE_SAVE_DEBOUNCE_MS", SAVE_DEBOUNCE_MS),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(v) => v.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

fn env_path(key: &str, default: &str) -> PathBuf {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => PathBuf::from(default),
    }
}
