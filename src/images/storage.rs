//! Filesystem-level image storage.
//!
//! Writes uploads as `{image_dir}/{id}.{extension}` and resolves IDs back to
//! files by scanning the directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use axum::http::HeaderValue;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use super::ImageId;
use crate::config::StorageConfig;
use crate::error::{Error, Result};

/// A file in the image directory that matched a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Filename without its extension.
    pub id: String,
    /// Extension as found on disk, not normalized.
    pub extension: String,
    /// Full filename inside the image directory.
    pub file_name: String,
    content_type: HeaderValue,
}

impl StoredImage {
    /// Returns `None` when the extension cannot form a header value.
    fn from_file_name(file_name: String) -> Option<Self> {
        let (id, extension) = split_extension(&file_name);
        let content_type = HeaderValue::try_from(format!("image/{extension}")).ok()?;
        let (id, extension) = (id.to_string(), extension.to_string());
        Some(Self {
            id,
            extension,
            file_name,
            content_type,
        })
    }

    /// Content type served for this file, `image/<extension>`.
    pub fn content_type(&self) -> &HeaderValue {
        &self.content_type
    }
}

/// Split a filename at its last `.` into `(stem, extension)`.
///
/// A name without any `.` is both its own stem and its own extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rsplit_once('.') {
        Some((stem, extension)) => (stem, extension),
        None => (name, name),
    }
}

/// Flat-directory image store.
#[derive(Debug, Clone)]
pub struct ImageStorage {
    image_dir: PathBuf,
    allowed_extensions: Vec<String>,
    id_attempts: u32,
}

impl ImageStorage {
    /// Create a store over `image_dir` with the default allow-list.
    pub fn new(image_dir: PathBuf) -> Self {
        Self::from_config(&StorageConfig {
            image_dir,
            ..StorageConfig::default()
        })
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self {
            image_dir: config.image_dir.clone(),
            allowed_extensions: config.allowed_extensions.clone(),
            id_attempts: config.id_attempts.max(1),
        }
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    /// Derive the extension of an advisory upload filename and check it
    /// against the allow-list.
    pub fn check_extension<'a>(&self, file_name: &'a str) -> Result<&'a str> {
        let (_, extension) = split_extension(file_name);
        if self.allowed_extensions.iter().any(|allowed| allowed == extension) {
            Ok(extension)
        } else {
            Err(Error::ExtensionNotAllowed)
        }
    }

    /// Persist `data` under a fresh random ID.
    ///
    /// A drawn ID is discarded if any stored file already uses it, whatever
    /// its extension. The file is created exclusively so a concurrent upload
    /// that drew the same ID is never overwritten.
    pub async fn store(&self, extension: &str, data: &[u8]) -> Result<ImageId> {
        for attempt in 1..=self.id_attempts {
            let id = ImageId::generate();
            if self.write_new(id, extension, data).await? {
                tracing::info!(
                    id = %id,
                    extension,
                    bytes = data.len(),
                    "Stored image"
                );
                return Ok(id);
            }
            tracing::debug!(id = %id, attempt, "Image ID already taken, drawing another");
        }

        Err(Error::not_created(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("no free image ID after {} attempts", self.id_attempts),
        )))
    }

    /// Write `data` as `{id}.{extension}`. Returns `false` if the ID is taken.
    async fn write_new(&self, id: ImageId, extension: &str, data: &[u8]) -> Result<bool> {
        let id = id.to_string();

        let taken = self.find(&id).await.map_err(|e| match e {
            Error::DirectoryUnreadable { source } => Error::not_created(source),
            other => other,
        })?;
        if taken.is_some() {
            return Ok(false);
        }

        let path = self.image_dir.join(format!("{id}.{extension}"));

        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        options.mode(0o644);

        let mut file = match options.open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(Error::not_created(e)),
        };

        let written = async {
            file.write_all(data).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            if let Err(remove_err) = fs::remove_file(&path).await {
                tracing::warn!("Failed to remove partial upload {:?}: {}", path, remove_err);
            }
            return Err(Error::not_created(e));
        }

        Ok(true)
    }

    /// Resolve an ID to the file that stores it.
    pub async fn locate(&self, id: &str) -> Result<StoredImage> {
        self.find(id).await?.ok_or(Error::NotFound)
    }

    /// Scan the image directory for a file whose stem equals `id`.
    ///
    /// When several files match, the lexicographically smallest name wins.
    /// Files whose extension cannot be sent as a content type are ignored.
    async fn find(&self, id: &str) -> Result<Option<StoredImage>> {
        let mut entries = fs::read_dir(&self.image_dir)
            .await
            .map_err(|source| Error::DirectoryUnreadable { source })?;

        let mut best: Option<StoredImage> = None;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| Error::DirectoryUnreadable { source })?
        {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };

            let (stem, _) = split_extension(&name);
            if stem != id {
                continue;
            }

            match entry.file_type().await {
                Ok(file_type) if file_type.is_dir() => continue,
                Ok(_) => {}
                Err(source) => return Err(Error::DirectoryUnreadable { source }),
            }

            let Some(image) = StoredImage::from_file_name(name) else {
                tracing::debug!("Skipping image with unusable extension");
                continue;
            };

            if best
                .as_ref()
                .map_or(true, |current| image.file_name < current.file_name)
            {
                best = Some(image);
            }
        }

        Ok(best)
    }

    /// Read the full content of a located image.
    pub async fn load(&self, image: &StoredImage) -> Result<Vec<u8>> {
        let path = self.image_dir.join(&image.file_name);

        let mut file = fs::File::open(&path)
            .await
            .map_err(|source| Error::FileNotOpened { source })?;

        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .await
            .map_err(|source| Error::FileNotRead { source })?;

        Ok(data)
    }
}
