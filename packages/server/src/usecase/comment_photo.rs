//! UseCase: 写真へのコメント追加

use std::sync::Arc;

use recap_shared::time::{Clock, timestamp_to_rfc3339};
use uuid::Uuid;

use crate::domain::{Photo, PhotoComment};

use super::{document::GuardedDocument, error::PhotoError};

pub struct CommentPhotoUseCase {
    photos: Arc<GuardedDocument<Vec<Photo>>>,
    clock: Arc<dyn Clock>,
}

impl CommentPhotoUseCase {
    pub fn new(photos: Arc<GuardedDocument<Vec<Photo>>>, clock: Arc<dyn Clock>) -> Self {
        Self { photos, clock }
    }

    /// # Returns
    ///
    /// * `Ok(PhotoComment)` - 追加されたコメント
    /// * `Err(PhotoError::InvalidComment)` - 投稿者または本文が空
    /// * `Err(PhotoError::NotFound)` - 写真が存在しない
    pub async fn execute(
        &self,
        photo_id: &str,
        user: String,
        text: String,
    ) -> Result<PhotoComment, PhotoError> {
        if user.trim().is_empty() || text.trim().is_empty() {
            return Err(PhotoError::InvalidComment(
                "User and text are required".to_string(),
            ));
        }

        let comment = PhotoComment {
            id: Uuid::new_v4().simple().to_string(),
            user,
            text,
            timestamp: timestamp_to_rfc3339(self.clock.now_millis()),
        };

        self.photos
            .update(move |photos| {
                let photo = photos
                    .iter_mut()
                    .find(|photo| photo.id == photo_id)
                    .ok_or(PhotoError::NotFound)?;
                photo.comments.push(comment.clone());
                Ok(comment)
            })
            .await
    }
}
