//! UseCase: キャンバスの画像とトークンメタデータ
//!
//! どちらも現在のキャンバス状態から決定的に生成されます。メタデータの
//! `image` はトークンの `tokenURI` から参照できるよう公開 URL で返します。

use std::sync::Arc;

use crate::domain::{CanvasState, canvas_image};

use super::get_canvas_state::GetCanvasStateUseCase;

/// Token metadata attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataAttribute {
    pub trait_type: &'static str,
    pub value: u64,
}

/// Token metadata describing the canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
    pub attributes: Vec<MetadataAttribute>,
}

/// キャンバス描画のユースケース
pub struct RenderCanvasUseCase {
    get_state: Arc<GetCanvasStateUseCase>,
    /// 外部から到達可能なサーバーのベース URL
    public_base_url: String,
}

impl RenderCanvasUseCase {
    pub fn new(get_state: Arc<GetCanvasStateUseCase>, public_base_url: String) -> Self {
        Self {
            get_state,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// 現在のキャンバスを SVG として描画
    pub async fn image(&self) -> String {
        let state = self.get_state.execute().await;
        canvas_image::render_svg(&state)
    }

    /// 現在のキャンバスのメタデータ
    pub async fn metadata(&self) -> CanvasMetadata {
        let state = self.get_state.execute().await;
        self.describe(&state)
    }

    fn describe(&self, state: &CanvasState) -> CanvasMetadata {
        CanvasMetadata {
            name: "Recap Canvas".to_string(),
            description: format!(
                "A shared {}x{} community canvas where every member claims one cell.",
                state.width, state.height
            ),
            image: format!("{}/canvas/image", self.public_base_url),
            attributes: vec![
                MetadataAttribute {
                    trait_type: "Width",
                    value: u64::from(state.width),
                },
                MetadataAttribute {
                    trait_type: "Height",
                    value: u64::from(state.height),
                },
                MetadataAttribute {
                    trait_type: "Placements",
                    value: state.placements.len() as u64,
                },
            ],
        }
    }
}
