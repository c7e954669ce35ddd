//! UseCase: 写真へのいいね

use std::sync::Arc;

use crate::domain::Photo;

use super::{document::GuardedDocument, error::PhotoError};

pub struct LikePhotoUseCase {
    photos: Arc<GuardedDocument<Vec<Photo>>>,
}

impl LikePhotoUseCase {
    pub fn new(photos: Arc<GuardedDocument<Vec<Photo>>>) -> Self {
        Self { photos }
    }

    /// いいね数を 1 増やし、更新後の写真を返す
    pub async fn execute(&self, photo_id: &str) -> Result<Photo, PhotoError> {
        self.photos
            .update(|photos| {
                let photo = photos
                    .iter_mut()
                    .find(|photo| photo.id == photo_id)
                    .ok_or(PhotoError::NotFound)?;
                photo.likes += 1;
                Ok(photo.clone())
            })
            .await
    }
}
