use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine};
use phyassist_core::ImageMime;

use crate::error::ClientError;

#[derive(Debug, Clone)]
enum Source {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// The one image chosen for a submission.
///
/// Nothing is read until `encode` is called.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    name: String,
    mime_type: ImageMime,
    source: Source,
}

impl SelectedFile {
    /// Select a file on disk; the mime type comes from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let mime_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ImageMime::from_extension)
            .ok_or_else(|| {
                ClientError::Encoding(format!(
                    "{} is not a PNG or JPEG image",
                    path.display()
                ))
            })?;
        Ok(Self {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            mime_type,
            source: Source::Path(path.to_path_buf()),
        })
    }

    pub fn from_bytes(name: impl Into<String>, mime_type: ImageMime, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type,
            source: Source::Bytes(bytes),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> ImageMime {
        self.mime_type
    }

    /// Read the image and base64-encode it off the async executor.
    pub async fn encode(&self) -> Result<String, ClientError> {
        let bytes = match &self.source {
            Source::Path(path) => tokio::fs::read(path)
                .await
                .map_err(|e| ClientError::Encoding(format!("{}: {e}", path.display())))?,
            Source::Bytes(bytes) => bytes.clone(),
        };
        if bytes.is_empty() {
            return Err(ClientError::Encoding(format!("{} is empty", self.name)));
        }
        tokio::task::spawn_blocking(move || STANDARD.encode(bytes))
            .await
            .map_err(|e| ClientError::Encoding(e.to_string()))
    }
}
