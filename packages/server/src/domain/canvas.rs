//! Canvas placement model.
//!
//! A fixed `width x height` grid where each identity claims at most one cell.
//! Identities on the override allow-list may move their claim; everyone else
//! keeps their first cell forever. Cells are never vacated except implicitly,
//! when an override identity moves away.

use serde::{Deserialize, Serialize};

use super::{
    error::{PlacementRejection, ValueObjectError},
    value_object::{AllowList, Identity, PlacementMessage, Timestamp},
};

/// First token id handed out by a freshly created canvas document
pub const FIRST_TOKEN_ID: u64 = 1;

/// Largest accepted width or height, in cells
pub const MAX_CANVAS_SIZE: u32 = 1024;

fn first_token_id() -> u64 {
    FIRST_TOKEN_ID
}

/// The canvas document as persisted and served by `GET /canvas/state`
///
/// Decoding rejects documents whose dimensions fall outside `1..=MAX_CANVAS_SIZE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CanvasDocument")]
pub struct CanvasState {
    pub width: u32,
    pub height: u32,
    pub placements: Vec<Placement>,
    pub next_token_id: u64,
}

/// Raw shape of the canvas document before the size check
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CanvasDocument {
    width: u32,
    height: u32,
    #[serde(default)]
    placements: Vec<Placement>,
    #[serde(default = "first_token_id")]
    next_token_id: u64,
}

impl TryFrom<CanvasDocument> for CanvasState {
    type Error = ValueObjectError;

    fn try_from(document: CanvasDocument) -> Result<Self, Self::Error> {
        CanvasState::check_size(document.width, document.height)?;
        Ok(Self {
            width: document.width,
            height: document.height,
            placements: document.placements,
            next_token_id: document.next_token_id,
        })
    }
}

/// A single claimed cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub owner_id: Identity,
    pub display_name: String,
    #[serde(default)]
    pub avatar_ref: Option<String>,
    #[serde(default)]
    pub message: String,
    pub placed_at: Timestamp,
}

/// Who is claiming a cell, and what they attach to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementDraft {
    pub owner_id: Identity,
    pub display_name: String,
    pub avatar_ref: Option<String>,
    pub message: PlacementMessage,
}

impl CanvasState {
    /// Create an empty canvas document
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            placements: Vec::new(),
            next_token_id: FIRST_TOKEN_ID,
        }
    }

    /// Both sides must be within `1..=MAX_CANVAS_SIZE`
    pub fn check_size(width: u32, height: u32) -> Result<(), ValueObjectError> {
        let valid = |side: u32| (1..=MAX_CANVAS_SIZE).contains(&side);
        if valid(width) && valid(height) {
            Ok(())
        } else {
            Err(ValueObjectError::InvalidCanvasSize {
                width,
                height,
                max: MAX_CANVAS_SIZE,
            })
        }
    }

    /// Convert signed request coordinates into a cell inside the grid
    pub fn cell(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        (x < self.width && y < self.height).then_some((x, y))
    }

    pub fn placement_at(&self, x: u32, y: u32) -> Option<&Placement> {
        self.placements.iter().find(|p| p.x == x && p.y == y)
    }

    pub fn placement_of(&self, owner_id: &Identity) -> Option<&Placement> {
        self.placements.iter().find(|p| &p.owner_id == owner_id)
    }

    pub fn is_occupied(&self, x: u32, y: u32) -> bool {
        self.placement_at(x, y).is_some()
    }

    /// Check whether `identity` may claim `(x, y)`. Does not mutate.
    ///
    /// Rejection order: out of bounds, occupied by someone else, identity already
    /// holds a cell (unless it is an override identity).
    pub fn validate_placement(
        &self,
        identity: &Identity,
        x: i64,
        y: i64,
        overrides: &AllowList,
    ) -> Result<(u32, u32), PlacementRejection> {
        let (x, y) = self.cell(x, y).ok_or(PlacementRejection::OutOfBounds)?;

        if let Some(occupant) = self.placement_at(x, y)
            && &occupant.owner_id != identity
        {
            return Err(PlacementRejection::CellOccupied);
        }

        if self.placement_of(identity).is_some() && !overrides.contains(identity) {
            return Err(PlacementRejection::AlreadyPlaced);
        }

        Ok((x, y))
    }

    /// Validate and commit a claim in memory.
    ///
    /// Override identities that already hold a cell have that placement moved and
    /// refreshed instead of receiving a second one.
    pub fn place(
        &mut self,
        draft: PlacementDraft,
        x: i64,
        y: i64,
        overrides: &AllowList,
        placed_at: Timestamp,
    ) -> Result<&Placement, PlacementRejection> {
        let (x, y) = self.validate_placement(&draft.owner_id, x, y, overrides)?;

        let index = match self
            .placements
            .iter()
            .position(|p| p.owner_id == draft.owner_id)
        {
            Some(index) => {
                let existing = &mut self.placements[index];
                existing.x = x;
                existing.y = y;
                existing.display_name = draft.display_name;
                existing.avatar_ref = draft.avatar_ref;
                existing.message = draft.message.into_string();
                existing.placed_at = placed_at;
                index
            }
            None => {
                self.placements.push(Placement {
                    x,
                    y,
                    owner_id: draft.owner_id,
                    display_name: draft.display_name,
                    avatar_ref: draft.avatar_ref,
                    message: draft.message.into_string(),
                    placed_at,
                });
                self.placements.len() - 1
            }
        };

        Ok(&self.placements[index])
    }

    /// Hand out the next token id. Ids are never reused, whether or not the caller
    /// ever places.
    pub fn allocate_token_id(&mut self) -> u64 {
        let token_id = self.next_token_id;
        self.next_token_id += 1;
        token_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> Identity {
        Identity::new(value.to_string()).unwrap()
    }

    fn draft(owner: &str, message: &str) -> PlacementDraft {
        PlacementDraft {
            owner_id: id(owner),
            display_name: owner.to_uppercase(),
            avatar_ref: None,
            message: PlacementMessage::new(message),
        }
    }

    #[test]
    fn test_new_canvas_is_empty() {
        // テスト項目: 新しいキャンバスは配置なし、nextTokenId = 1 で作成される
        // when (操作):
        let state = CanvasState::new(4, 3);

        // then (期待する結果):
        assert_eq!(state.width, 4);
        assert_eq!(state.height, 3);
        assert!(state.placements.is_empty());
        assert_eq!(state.next_token_id, FIRST_TOKEN_ID);
    }

    #[test]
    fn test_decode_rejects_invalid_dimensions() {
        // テスト項目: 幅・高さが 0 または上限超過のドキュメントはデコードで拒否される
        // given (前提条件):
        let zero = r#"{"width":0,"height":0}"#;
        let oversized = r#"{"width":200000000,"height":1}"#;
        let valid = r#"{"width":4,"height":3}"#;

        // when (操作):
        let zero = serde_json::from_str::<CanvasState>(zero);
        let oversized = serde_json::from_str::<CanvasState>(oversized);
        let valid = serde_json::from_str::<CanvasState>(valid);

        // then (期待する結果):
        assert!(zero.unwrap_err().to_string().contains("canvas size 0x0 is invalid"));
        assert!(oversized.is_err());
        assert_eq!(valid.unwrap(), CanvasState::new(4, 3));
    }

    #[test]
    fn test_check_size_bounds() {
        // テスト項目: サイズの下限と上限
        // when / then:
        assert!(CanvasState::check_size(1, 1).is_ok());
        assert!(CanvasState::check_size(MAX_CANVAS_SIZE, MAX_CANVAS_SIZE).is_ok());
        assert!(CanvasState::check_size(0, 3).is_err());
        assert!(CanvasState::check_size(4, MAX_CANVAS_SIZE + 1).is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_bounds() {
        // テスト項目: グリッド外の座標は拒否される
        // given (前提条件):
        let state = CanvasState::new(4, 3);
        let overrides = AllowList::default();
        let u1 = id("u1");

        // when / then:
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 3), (i64::MAX, 0)] {
            assert_eq!(
                state.validate_placement(&u1, x, y, &overrides),
                Err(PlacementRejection::OutOfBounds),
                "({x}, {y}) should be out of bounds"
            );
        }
    }

    #[test]
    fn test_validate_accepts_iff_cell_free_and_identity_has_no_cell() {
        // テスト項目: 空きセルかつ未配置のユーザーのみ受け付けられる
        // given (前提条件): u1 が (1,1) に配置済み
        let mut state = CanvasState::new(4, 3);
        let overrides = AllowList::default();
        state
            .place(draft("u1", "hi"), 1, 1, &overrides, Timestamp::new(1))
            .unwrap();

        // when / then: 全セルを走査
        for y in 0..3 {
            for x in 0..4 {
                let for_u2 = state.validate_placement(&id("u2"), x, y, &overrides);
                let for_u1 = state.validate_placement(&id("u1"), x, y, &overrides);
                if (x, y) == (1, 1) {
                    assert_eq!(for_u2, Err(PlacementRejection::CellOccupied));
                } else {
                    assert_eq!(for_u2, Ok((x as u32, y as u32)));
                }
                assert_eq!(for_u1, Err(PlacementRejection::AlreadyPlaced));
            }
        }
    }

    #[test]
    fn test_example_scenario() {
        // テスト項目: 4x3 グリッドでの基本シナリオ
        // given (前提条件):
        let mut state = CanvasState::new(4, 3);
        let overrides = AllowList::default();

        // when / then:
        assert!(state.validate_placement(&id("U1"), 1, 1, &overrides).is_ok());
        state
            .place(draft("U1", "hi"), 1, 1, &overrides, Timestamp::new(10))
            .unwrap();
        assert_eq!(state.placements.len(), 1);
        assert_eq!(state.placements[0].owner_id, id("U1"));
        assert_eq!(state.placements[0].message, "hi");

        assert_eq!(
            state.validate_placement(&id("U2"), 1, 1, &overrides),
            Err(PlacementRejection::CellOccupied)
        );
        state
            .place(draft("U2", ""), 2, 2, &overrides, Timestamp::new(11))
            .unwrap();
        assert_eq!(state.placements.len(), 2);

        let result = state.place(draft("U1", "again"), 0, 0, &overrides, Timestamp::new(12));
        assert_eq!(result.unwrap_err(), PlacementRejection::AlreadyPlaced);
        assert_eq!(state.placements.len(), 2);
    }

    #[test]
    fn test_non_override_rejected_even_on_own_cell() {
        // テスト項目: 非オーバーライドユーザーは自分のセルへの再配置も拒否される
        // given (前提条件):
        let mut state = CanvasState::new(4, 3);
        let overrides = AllowList::default();
        state
            .place(draft("u1", "first"), 1, 1, &overrides, Timestamp::new(1))
            .unwrap();

        // when (操作):
        let result = state.place(draft("u1", "second"), 1, 1, &overrides, Timestamp::new(2));

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), PlacementRejection::AlreadyPlaced);
        assert_eq!(state.placements.len(), 1);
        assert_eq!(state.placements[0].message, "first");
    }

    #[test]
    fn test_override_identity_moves_existing_placement() {
        // テスト項目: オーバーライドユーザーの再配置は既存の配置を置き換え、元のセルが空く
        // given (前提条件):
        let mut state = CanvasState::new(4, 3);
        let overrides = AllowList::from_raw(["admin"]);
        state
            .place(draft("admin", "old"), 0, 0, &overrides, Timestamp::new(1))
            .unwrap();
        assert!(state.is_occupied(0, 0));

        // when (操作):
        state
            .place(draft("admin", "new"), 3, 2, &overrides, Timestamp::new(2))
            .unwrap();

        // then (期待する結果):
        assert_eq!(state.placements.len(), 1);
        let placement = state.placement_of(&id("admin")).unwrap();
        assert_eq!((placement.x, placement.y), (3, 2));
        assert_eq!(placement.message, "new");
        assert_eq!(placement.placed_at, Timestamp::new(2));
        assert!(!state.is_occupied(0, 0));
        assert!(state.validate_placement(&id("u2"), 0, 0, &overrides).is_ok());
    }

    #[test]
    fn test_override_identity_cannot_take_occupied_cell() {
        // テスト項目: オーバーライドユーザーでも他人のセルは奪えない
        // given (前提条件):
        let mut state = CanvasState::new(4, 3);
        let overrides = AllowList::from_raw(["admin"]);
        state
            .place(draft("u1", ""), 2, 1, &overrides, Timestamp::new(1))
            .unwrap();

        // when (操作):
        let result = state.place(draft("admin", ""), 2, 1, &overrides, Timestamp::new(2));

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), PlacementRejection::CellOccupied);
    }

    #[test]
    fn test_allocate_token_id_is_strictly_increasing() {
        // テスト項目: トークン ID は 1 から単調増加し、再利用されない
        // given (前提条件):
        let mut state = CanvasState::new(4, 3);

        // when (操作):
        let ids: Vec<u64> = (0..5).map(|_| state.allocate_token_id()).collect();

        // then (期待する結果):
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(state.next_token_id, 6);
    }

    #[test]
    fn test_document_missing_optional_fields_uses_defaults() {
        // テスト項目: 旧形式のドキュメント（フィールド欠落）も読み込める
        // given (前提条件):
        let json = r#"{"width":4,"height":3}"#;

        // when (操作):
        let state: CanvasState = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert!(state.placements.is_empty());
        assert_eq!(state.next_token_id, FIRST_TOKEN_ID);
    }

    #[test]
    fn test_document_uses_camel_case_fields() {
        // テスト項目: ドキュメントは camelCase で保存される
        // given (前提条件):
        let mut state = CanvasState::new(2, 2);
        state
            .place(draft("u1", "hi"), 0, 1, &AllowList::default(), Timestamp::new(5))
            .unwrap();

        // when (操作):
        let json = serde_json::to_value(&state).unwrap();

        // then (期待する結果):
        assert_eq!(json["nextTokenId"], 1);
        assert_eq!(json["placements"][0]["ownerId"], "u1");
        assert_eq!(json["placements"][0]["displayName"], "U1");
        assert_eq!(json["placements"][0]["placedAt"], 5);
    }
}
