//! UseCase: 配置の事前検証
//!
//! 状態を変更しない検証のみを行います。クライアントは外部のミント処理を
//! 実行する前にこの検証を呼び出します。

use std::sync::Arc;

use crate::domain::{AllowList, CanvasState, Identity};

use super::{document::GuardedDocument, error::PlaceError};

/// 配置検証のユースケース
pub struct ValidatePlacementUseCase {
    canvas: Arc<GuardedDocument<CanvasState>>,
    /// 配置の置き換えが許可された ID
    overrides: Arc<AllowList>,
}

impl ValidatePlacementUseCase {
    pub fn new(canvas: Arc<GuardedDocument<CanvasState>>, overrides: Arc<AllowList>) -> Self {
        Self { canvas, overrides }
    }

    /// # Returns
    ///
    /// * `Ok(())` - 配置可能
    /// * `Err(PlaceError::Rejected(_))` - 配置不可（理由付き）
    /// * `Err(PlaceError::Store(_))` - キャンバスの読み込みに失敗
    pub async fn execute(&self, identity: &Identity, x: i64, y: i64) -> Result<(), PlaceError> {
        let state = self.canvas.read().await?;
        state.validate_placement(identity, x, y, &self.overrides)?;
        Ok(())
    }
}
