mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./imagedrop.toml",
        "~/.config/imagedrop/config.toml",
        "/etc/imagedrop/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    let storage = &config.storage;

    if storage.allowed_extensions.is_empty() {
        anyhow::bail!("At least one allowed extension is required");
    }

    for ext in &storage.allowed_extensions {
        if ext.is_empty() || ext.contains('.') || ext.contains('/') {
            anyhow::bail!("Invalid allowed extension: {:?}", ext);
        }
    }

    if storage.max_upload_bytes == 0 {
        anyhow::bail!("Maximum upload size cannot be 0");
    }

    if storage.field_name.is_empty() {
        anyhow::bail!("Upload field name cannot be empty");
    }

    if storage.id_attempts == 0 {
        anyhow::bail!("ID attempts cannot be 0");
    }

    if !storage.create_dir && !storage.image_dir.is_dir() {
        tracing::warn!("Image directory does not exist: {:?}", storage.image_dir);
    }

    Ok(())
}
