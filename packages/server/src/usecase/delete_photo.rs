//! UseCase: 写真の削除
//!
//! 削除はアップロード許可リストに含まれる ID のみ実行できます。メタデータを
//! 先に削除・保存し、その後で画像ファイルの削除を試みます（失敗はログのみ）。

use std::{io::ErrorKind, path::PathBuf, sync::Arc};

use crate::domain::{AllowList, Identity, Photo};

use super::{document::GuardedDocument, error::PhotoError};

pub struct DeletePhotoUseCase {
    photos: Arc<GuardedDocument<Vec<Photo>>>,
    uploaders: Arc<AllowList>,
    /// 画像ファイルの保存先
    uploads_dir: PathBuf,
}

impl DeletePhotoUseCase {
    pub fn new(
        photos: Arc<GuardedDocument<Vec<Photo>>>,
        uploaders: Arc<AllowList>,
        uploads_dir: PathBuf,
    ) -> Self {
        Self {
            photos,
            uploaders,
            uploads_dir,
        }
    }

    pub async fn execute(&self, identity: &Identity, photo_id: &str) -> Result<(), PhotoError> {
        if !self.uploaders.contains(identity) {
            tracing::warn!("'{}' is not allowed to delete photos", identity);
            return Err(PhotoError::Forbidden);
        }

        let removed = self
            .photos
            .update(|photos| {
                let index = photos
                    .iter()
                    .position(|photo| photo.id == photo_id)
                    .ok_or(PhotoError::NotFound)?;
                Ok::<_, PhotoError>(photos.remove(index))
            })
            .await?;
        tracing::info!("'{}' deleted photo '{}'", identity, removed.id);

        if let Some(file_name) = removed.file_name() {
            let path = self.uploads_dir.join(file_name);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => tracing::debug!("Removed image file '{}'", path.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!("Failed to remove image file '{}': {}", path.display(), e)
                }
            }
        }

        Ok(())
    }
}
