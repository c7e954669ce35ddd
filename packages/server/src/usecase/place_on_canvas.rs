//! UseCase: キャンバスへの配置
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PlaceOnCanvasUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 検証と確定の間に状態が変わりうるため、確定時に再検証されることを保証
//! - 書き込みに失敗した配置がコミット扱いにならないことを保証
//! - 並行した配置で更新が失われないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：配置、置き換え許可 ID の移動
//! - 異常系：使用中・配置済み、書き込み失敗
//! - 並行性：同じ瞬間の複数の配置

use std::sync::Arc;

use recap_shared::time::Clock;

use crate::domain::{AllowList, CanvasState, PlacementDraft, Timestamp};

use super::{document::GuardedDocument, error::PlaceError};

/// キャンバス配置のユースケース
pub struct PlaceOnCanvasUseCase {
    canvas: Arc<GuardedDocument<CanvasState>>,
    overrides: Arc<AllowList>,
    clock: Arc<dyn Clock>,
}

impl PlaceOnCanvasUseCase {
    pub fn new(
        canvas: Arc<GuardedDocument<CanvasState>>,
        overrides: Arc<AllowList>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            canvas,
            overrides,
            clock,
        }
    }

    /// 配置を実行
    ///
    /// # Returns
    ///
    /// * `Ok(CanvasState)` - 配置後のキャンバス状態
    /// * `Err(PlaceError)` - 拒否、またはストレージの失敗（配置は保存されていない）
    pub async fn execute(
        &self,
        draft: PlacementDraft,
        x: i64,
        y: i64,
    ) -> Result<CanvasState, PlaceError> {
        let owner = draft.owner_id.clone();
        let placed_at = Timestamp::new(self.clock.now_millis());
        let overrides = self.overrides.clone();

        let state = self
            .canvas
            .update(move |state| {
                state.place(draft, x, y, &overrides, placed_at)?;
                Ok::<_, PlaceError>(state.clone())
            })
            .await?;

        tracing::info!("'{}' placed on canvas at ({}, {})", owner, x, y);
        Ok(state)
    }
}
