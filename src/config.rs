// src/config.rs

//! Configuration loading utilities.
//!
//! Convenience wrappers over [`Config`]: file loading with a default
//! fallback, plus environment-variable overrides for deployments that
//! pass the API location and credentials through the environment.

use std::path::Path;

use crate::error::Result;
use crate::models::Config;

/// Load configuration from a TOML file.
///
/// Falls back to defaults if loading fails.
pub fn load_config(path: &Path) -> Config {
    Config::load_or_default(path)
}

/// Load configuration, apply environment overrides, and validate.
pub fn load_with_env(path: &Path) -> Result<Config> {
    let mut config = Config::load_or_default(path);
    config.apply_env();
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_config_reads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[client]
timeout_secs = 7
page_size = 25

[api]
base_url = "https://api.example.com"
"#
        )
        .unwrap();

        let config = load_config(file.path());
        assert_eq!(config.client.timeout_secs, 7);
        assert_eq!(config.client.page_size, 25);
        assert_eq!(config.api.base_url, "https://api.example.com");
        // Unspecified sections keep their defaults.
        assert!(!config.categories.is_empty());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("does-not-exist.toml"));
        assert_eq!(config.api.base_url, "http://localhost:5000");
    }
}
