//! UseCase: トークン ID の割り当て
//!
//! 認証済みであれば誰でも呼び出せます。割り当てた ID は配置の成否に関わらず
//! 再利用されないため、番号に欠番が生じることがあります。

use std::sync::Arc;

use crate::domain::{CanvasState, Identity};

use super::{document::GuardedDocument, error::AllocateTokenError};

/// 割り当て結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAllocation {
    pub contract_address: String,
    pub token_id: u64,
}

/// トークン ID 割り当てのユースケース
pub struct AllocateTokenUseCase {
    canvas: Arc<GuardedDocument<CanvasState>>,
    contract_address: String,
}

impl AllocateTokenUseCase {
    pub fn new(canvas: Arc<GuardedDocument<CanvasState>>, contract_address: String) -> Self {
        Self {
            canvas,
            contract_address,
        }
    }

    pub async fn execute(&self, identity: &Identity) -> Result<TokenAllocation, AllocateTokenError> {
        let token_id = self
            .canvas
            .update(|state| Ok::<_, AllocateTokenError>(state.allocate_token_id()))
            .await?;

        tracing::info!("Allocated token #{} to '{}'", token_id, identity);
        Ok(TokenAllocation {
            contract_address: self.contract_address.clone(),
            token_id,
        })
    }
}
