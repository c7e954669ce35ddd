//! UseCase: 写真一覧の取得

use std::sync::Arc;

use crate::domain::Photo;

use super::document::GuardedDocument;

pub struct ListPhotosUseCase {
    photos: Arc<GuardedDocument<Vec<Photo>>>,
}

impl ListPhotosUseCase {
    pub fn new(photos: Arc<GuardedDocument<Vec<Photo>>>) -> Self {
        Self { photos }
    }

    /// 読み込みに失敗した場合は空の一覧を返す
    pub async fn execute(&self) -> Vec<Photo> {
        self.photos.read().await.unwrap_or_else(|e| {
            tracing::warn!("Failed to load photos, serving empty gallery: {}", e);
            Vec::new()
        })
    }
}
