//! Image store: uploaded product images on the local filesystem.
//!
//! Files live flat in one directory (`<static_root>/img`) and are named
//! `<uuid>.<ext>`. Products only ever hold that file name, never a path.
//!
//! Writing is split in two phases so callers can keep the directory clean
//! when a later step fails:
//!
//! ```text
//! validate(file_name) -> ValidatedImage        (no IO)
//! stage(validated, bytes) -> StagedImage       (bytes written under a hidden name)
//! commit(staged) -> stored file name           (rename to the final name)
//! discard(staged)                              (remove the hidden file)
//! ```

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use storefront_products::ValidationError;

/// Extensions accepted for product images (lowercase, without the dot).
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

const STAGING_PREFIX: &str = ".staging-";

#[derive(Debug, Error)]
pub enum ImageStoreError {
    /// The upload failed validation.
    #[error(transparent)]
    Rejected(#[from] ValidationError),

    /// A stored name that is not a plain file name (separators, `..`).
    #[error("invalid stored image name: {0:?}")]
    InvalidName(String),

    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ImageStoreError {
    fn io(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> Self {
        let path = path.to_path_buf();
        move |source| Self::Io {
            action,
            path,
            source,
        }
    }
}

/// An uploaded file as received from the request, fully buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original client-side file name. Only its extension is used.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// A file input that was left blank (no name, no content).
    pub fn is_blank(&self) -> bool {
        self.file_name.is_empty() && self.bytes.is_empty()
    }
}

/// An upload whose extension passed validation, with its final name chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedImage {
    file_name: String,
}

impl ValidatedImage {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Bytes written to disk under a hidden staging name.
///
/// Must end in either [`ImageStore::commit`] or [`ImageStore::discard`].
#[derive(Debug)]
#[must_use = "a staged image must be committed or discarded"]
pub struct StagedImage {
    file_name: String,
    staging_path: PathBuf,
}

impl StagedImage {
    /// Name the image will have once committed.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the `img` subdirectory of a static-asset root.
    pub fn under_static_root(root: impl AsRef<Path>) -> Self {
        Self::new(root.as_ref().join("img"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Check the extension of `original_name` and pick a unique stored name.
    ///
    /// The extension is the text after the last `.` of the final path
    /// component, lowercased. No IO happens here.
    pub fn validate(&self, original_name: &str) -> Result<ValidatedImage, ValidationError> {
        let ext = extension_of(original_name).ok_or(ValidationError::InvalidImage)?;
        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ValidationError::InvalidImage);
        }
        Ok(ValidatedImage {
            file_name: format!("{}.{}", Uuid::new_v4(), ext),
        })
    }

    /// Write `bytes` under a hidden staging name, creating the directory if
    /// needed.
    pub async fn stage(
        &self,
        image: ValidatedImage,
        bytes: &[u8],
    ) -> Result<StagedImage, ImageStoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(ImageStoreError::io("create directory", &self.dir))?;

        let staging_path = self.dir.join(format!("{STAGING_PREFIX}{}", image.file_name));
        tokio::fs::write(&staging_path, bytes)
            .await
            .map_err(ImageStoreError::io("write", &staging_path))?;

        tracing::debug!(file = %image.file_name, size = bytes.len(), "image staged");
        Ok(StagedImage {
            file_name: image.file_name,
            staging_path,
        })
    }

    /// Move a staged image to its final name and return that name.
    ///
    /// If the rename fails the staging file is removed before the error is
    /// returned.
    pub async fn commit(&self, staged: StagedImage) -> Result<String, ImageStoreError> {
        let final_path = self.dir.join(&staged.file_name);
        if let Err(e) = tokio::fs::rename(&staged.staging_path, &final_path).await {
            let err = ImageStoreError::io("rename", &staged.staging_path)(e);
            self.discard(staged).await;
            return Err(err);
        }

        tracing::info!(file = %staged.file_name, "image stored");
        Ok(staged.file_name)
    }

    /// Remove a staged image that will not be committed.
    ///
    /// Runs on failure paths, so a removal error is logged and not returned.
    pub async fn discard(&self, staged: StagedImage) {
        match tokio::fs::remove_file(&staged.staging_path).await {
            Ok(()) => tracing::debug!(file = %staged.file_name, "staged image discarded"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                file = %staged.file_name,
                error = %e,
                "failed to discard staged image"
            ),
        }
    }

    /// Validate and store an upload in one go, returning the stored name.
    pub async fn accept_upload(
        &self,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, ImageStoreError> {
        let validated = self.validate(original_name)?;
        let staged = self.stage(validated, bytes).await?;
        self.commit(staged).await
    }

    /// Delete a stored image. Missing files and empty names are not errors.
    pub async fn delete_stored(&self, file_name: &str) -> Result<(), ImageStoreError> {
        if file_name.is_empty() {
            return Ok(());
        }
        let path = self.path_of(file_name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(file = %file_name, "image deleted");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ImageStoreError::io("delete", &path)(e)),
        }
    }

    /// Full path of a stored image.
    pub fn path_of(&self, file_name: &str) -> Result<PathBuf, ImageStoreError> {
        let is_plain = Path::new(file_name).file_name().and_then(|n| n.to_str()) == Some(file_name)
            && !file_name.contains('\\')
            && file_name != "..";
        if !is_plain {
            return Err(ImageStoreError::InvalidName(file_name.to_string()));
        }
        Ok(self.dir.join(file_name))
    }

    pub async fn exists(&self, file_name: &str) -> bool {
        match self.path_of(file_name) {
            Ok(path) => tokio::fs::try_exists(path).await.unwrap_or(false),
            Err(_) => false,
        }
    }
}

/// Lowercased extension (without the dot) of the last path component.
///
/// Both `/` and `\` count as separators since browsers on some platforms send
/// the full client path.
fn extension_of(original_name: &str) -> Option<String> {
    let base = original_name.rsplit(['/', '\\']).next().unwrap_or(original_name);
    let (_, ext) = base.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}
