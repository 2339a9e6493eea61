use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Flat directory holding every stored image
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,

    /// Create the image directory on startup if it is missing
    #[serde(default = "default_create_dir")]
    pub create_dir: bool,

    /// Accepted upload extensions, matched exactly and case-sensitively
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,

    /// Maximum size of a whole multipart upload body, in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Multipart field carrying the uploaded file
    #[serde(default = "default_field_name")]
    pub field_name: String,

    /// How many random IDs to draw before giving up on an upload
    #[serde(default = "default_id_attempts")]
    pub id_attempts: u32,
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_create_dir() -> bool {
    true
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()]
}

fn default_max_upload_bytes() -> usize {
    10 << 20
}

fn default_field_name() -> String {
    "fileupload".to_string()
}

fn default_id_attempts() -> u32 {
    8
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            image_dir: default_image_dir(),
            create_dir: default_create_dir(),
            allowed_extensions: default_allowed_extensions(),
            max_upload_bytes: default_max_upload_bytes(),
            field_name: default_field_name(),
            id_attempts: default_id_attempts(),
        }
    }
}
