//! Shared application state and dependency wiring.

use std::{collections::HashMap, sync::Arc};

use recap_shared::time::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::{
    config::ServerConfig,
    domain::{CanvasState, ChatLog, ConnectionRegistry, MessagePusher, ParticipantRegistry, Photo},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryParticipantRegistry, JsonFileStore},
    },
    usecase::{
        AllocateTokenUseCase, CommentPhotoUseCase, ConnectParticipantUseCase,
        DeletePhotoUseCase, DisconnectParticipantUseCase, GetCanvasStateUseCase,
        GuardedDocument, JoinChatUseCase, LikePhotoUseCase, ListPhotosUseCase,
        PlaceOnCanvasUseCase, RelayTypingUseCase, RenderCanvasUseCase, SendMessageUseCase,
        ValidatePlacementUseCase,
    },
};

/// Shared application state
pub struct AppState {
    // canvas
    pub get_canvas_state_usecase: Arc<GetCanvasStateUseCase>,
    pub validate_placement_usecase: Arc<ValidatePlacementUseCase>,
    pub place_on_canvas_usecase: Arc<PlaceOnCanvasUseCase>,
    pub allocate_token_usecase: Arc<AllocateTokenUseCase>,
    pub render_canvas_usecase: Arc<RenderCanvasUseCase>,
    // chat
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    pub join_chat_usecase: Arc<JoinChatUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub relay_typing_usecase: Arc<RelayTypingUseCase>,
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    // gallery
    pub list_photos_usecase: Arc<ListPhotosUseCase>,
    pub like_photo_usecase: Arc<LikePhotoUseCase>,
    pub comment_photo_usecase: Arc<CommentPhotoUseCase>,
    pub delete_photo_usecase: Arc<DeletePhotoUseCase>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Wire every use case against JSON documents under `config.data_dir`
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Same as [`AppState::from_config`] with an explicit clock
    pub fn with_clock(config: &ServerConfig, clock: Arc<dyn Clock>) -> Self {
        // 1. Documents
        let canvas = Arc::new(GuardedDocument::<CanvasState>::new(Arc::new(JsonFileStore::new(
            config.canvas_path(),
            CanvasState::new(config.canvas_width, config.canvas_height),
        ))));
        let chat_log = Arc::new(GuardedDocument::<ChatLog>::new(Arc::new(JsonFileStore::new(
            config.chat_log_path(),
            ChatLog::default(),
        ))));
        let photos = Arc::new(GuardedDocument::<Vec<Photo>>::new(Arc::new(JsonFileStore::new(
            config.photos_path(),
            Vec::<Photo>::new(),
        ))));

        // 2. Live connections
        let registry: Arc<dyn ParticipantRegistry> = Arc::new(InMemoryParticipantRegistry::new(
            Arc::new(Mutex::new(ConnectionRegistry::new())),
        ));
        let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new(
            Arc::new(Mutex::new(HashMap::new())),
        ));

        let overrides = Arc::new(config.override_ids.clone());
        let uploaders = Arc::new(config.uploader_ids.clone());

        // 3. UseCases
        let get_canvas_state_usecase = Arc::new(GetCanvasStateUseCase::new(
            canvas.clone(),
            config.canvas_width,
            config.canvas_height,
        ));

        Self {
            validate_placement_usecase: Arc::new(ValidatePlacementUseCase::new(
                canvas.clone(),
                overrides.clone(),
            )),
            place_on_canvas_usecase: Arc::new(PlaceOnCanvasUseCase::new(
                canvas.clone(),
                overrides,
                clock.clone(),
            )),
            allocate_token_usecase: Arc::new(AllocateTokenUseCase::new(
                canvas,
                config.contract_address.clone(),
            )),
            render_canvas_usecase: Arc::new(RenderCanvasUseCase::new(
                get_canvas_state_usecase.clone(),
                config.public_base_url.clone(),
            )),
            get_canvas_state_usecase,
            connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
                registry.clone(),
                message_pusher.clone(),
                chat_log.clone(),
                config.snapshot_size,
            )),
            join_chat_usecase: Arc::new(JoinChatUseCase::new(
                registry.clone(),
                message_pusher.clone(),
                chat_log.clone(),
                clock.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                registry.clone(),
                message_pusher.clone(),
                chat_log,
                clock.clone(),
                config.transcript_cap,
            )),
            relay_typing_usecase: Arc::new(RelayTypingUseCase::new(
                registry.clone(),
                message_pusher.clone(),
            )),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
                registry,
                message_pusher,
                clock.clone(),
            )),
            list_photos_usecase: Arc::new(ListPhotosUseCase::new(photos.clone())),
            like_photo_usecase: Arc::new(LikePhotoUseCase::new(photos.clone())),
            comment_photo_usecase: Arc::new(CommentPhotoUseCase::new(
                photos.clone(),
                clock.clone(),
            )),
            delete_photo_usecase: Arc::new(DeletePhotoUseCase::new(
                photos,
                uploaders,
                config.uploads_dir(),
            )),
            clock,
        }
    }
}
