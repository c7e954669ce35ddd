//! UseCase: キャンバス状態の取得
//!
//! 読み込みに失敗した場合はログを出力し、設定サイズの空のキャンバスを返します。

use std::sync::Arc;

use crate::domain::CanvasState;

use super::document::GuardedDocument;

/// キャンバス状態取得のユースケース
pub struct GetCanvasStateUseCase {
    canvas: Arc<GuardedDocument<CanvasState>>,
    /// 読み込み失敗時に返す空キャンバスのサイズ
    fallback_size: (u32, u32),
}

impl GetCanvasStateUseCase {
    pub fn new(canvas: Arc<GuardedDocument<CanvasState>>, width: u32, height: u32) -> Self {
        Self {
            canvas,
            fallback_size: (width, height),
        }
    }

    pub async fn execute(&self) -> CanvasState {
        match self.canvas.read().await {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Failed to load canvas state, serving empty canvas: {}", e);
                CanvasState::new(self.fallback_size.0, self.fallback_size.1)
            }
        }
    }
}
