//! Integration tests for the WebSocket chat.

mod common;

use common::{TestServer, assert_silent, join, next_frame, send_frame, send_raw};
use recap_server::infrastructure::dto::websocket::{InboundFrame, OutboundFrame};

fn message(body: &str) -> InboundFrame {
    InboundFrame::Message {
        body: body.to_string(),
    }
}

#[tokio::test]
async fn test_chat_join_and_message_flow() {
    // テスト項目: 参加通知とメッセージが送信者を含む全参加者に届く
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut alice, snapshot) = server.connect().await;
    assert_eq!(
        snapshot,
        OutboundFrame::Snapshot {
            messages: vec![],
            known_users: vec![],
        }
    );
    join(&mut alice, "alice", "Alice").await;

    // when (操作): bob が接続して参加する
    let (mut bob, bob_snapshot) = server.connect().await;
    join(&mut bob, "bob", "Bob").await;

    // then (期待する結果): bob のスナップショットに alice が含まれ、alice に参加通知が届く
    let OutboundFrame::Snapshot { known_users, .. } = bob_snapshot else {
        panic!("expected snapshot, got {:?}", bob_snapshot);
    };
    assert_eq!(known_users.len(), 1);
    assert_eq!(known_users[0].identity, "alice");
    match next_frame(&mut alice).await {
        OutboundFrame::ParticipantJoined { participant, .. } => {
            assert_eq!(participant.identity, "bob");
            assert_eq!(participant.display_name, "Bob");
        }
        other => panic!("expected participant-joined, got {:?}", other),
    }

    // when (操作): bob がメッセージを送る
    send_frame(&mut bob, &message("hello")).await;

    // then (期待する結果): 送信者自身と alice の両方に同じメッセージが届く
    let mut received = Vec::new();
    for ws in [&mut bob, &mut alice] {
        match next_frame(ws).await {
            OutboundFrame::MessageReceived { message } => {
                assert_eq!(message.author_id, "bob");
                assert_eq!(message.author_display_name, "Bob");
                assert_eq!(message.body, "hello");
                received.push(message);
            }
            other => panic!("expected message-received, got {:?}", other),
        }
    }
    assert_eq!(received[0], received[1]);
    assert!(received[0].id > 0);
}

#[tokio::test]
async fn test_frames_before_join_are_rejected() {
    // テスト項目: 参加前のメッセージ・タイピング・不正なフレームはエラーフレームで拒否される
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut anonymous, _) = server.connect().await;

    // when (操作):
    send_frame(&mut anonymous, &message("hi")).await;
    let not_joined = next_frame(&mut anonymous).await;
    send_frame(
        &mut anonymous,
        &InboundFrame::TypingStart {
            identity: Some("spoofed".to_string()),
            display_name: None,
        },
    )
    .await;
    let typing = next_frame(&mut anonymous).await;
    send_raw(&mut anonymous, "{ not json").await;
    let malformed = next_frame(&mut anonymous).await;

    // then (期待する結果):
    assert_eq!(not_joined, OutboundFrame::error("join before sending messages"));
    assert_eq!(typing, OutboundFrame::error("join before sending typing events"));
    assert_eq!(malformed, OutboundFrame::error("malformed frame"));
}

#[tokio::test]
async fn test_invalid_join_and_message_are_rejected() {
    // テスト項目: 空の ID での参加・二重参加・空メッセージはエラーフレームで拒否される
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut ws, _) = server.connect().await;

    // when (操作):
    join(&mut ws, "  ", "Nobody").await;
    let blank_identity = next_frame(&mut ws).await;
    join(&mut ws, "alice", "Alice").await;
    join(&mut ws, "mallory", "Mallory").await;
    let second_join = next_frame(&mut ws).await;
    send_frame(&mut ws, &message("   ")).await;
    let empty_body = next_frame(&mut ws).await;

    // then (期待する結果):
    assert_eq!(blank_identity, OutboundFrame::error("identity must not be empty"));
    assert_eq!(second_join, OutboundFrame::error("connection has already joined"));
    assert_eq!(empty_body, OutboundFrame::error("message body must not be empty"));
}

#[tokio::test]
async fn test_typing_is_relayed_to_others_with_bound_identity() {
    // テスト項目: タイピング通知は接続に紐づく ID で他の参加者にのみ中継される
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut alice, _) = server.connect().await;
    join(&mut alice, "alice", "Alice").await;
    let (mut bob, _) = server.connect().await;
    join(&mut bob, "bob", "Bob").await;
    next_frame(&mut alice).await; // participant-joined

    // when (操作):
    send_frame(
        &mut bob,
        &InboundFrame::TypingStart {
            identity: Some("spoofed".to_string()),
            display_name: Some("Spoofed".to_string()),
        },
    )
    .await;
    send_frame(
        &mut bob,
        &InboundFrame::TypingStop {
            identity: None,
            display_name: None,
        },
    )
    .await;

    // then (期待する結果):
    assert_eq!(
        next_frame(&mut alice).await,
        OutboundFrame::TypingStart {
            identity: "bob".to_string(),
            display_name: "Bob".to_string(),
        }
    );
    assert_eq!(
        next_frame(&mut alice).await,
        OutboundFrame::TypingStop {
            identity: "bob".to_string(),
            display_name: "Bob".to_string(),
        }
    );
    assert_silent(&mut bob).await;
}

#[tokio::test]
async fn test_participant_left_only_for_identified_connections() {
    // テスト項目: 退出通知は参加済みの接続が閉じた場合のみ、残る参加者全員にちょうど 1 回送られる
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut alice, _) = server.connect().await;
    join(&mut alice, "alice", "Alice").await;
    let (mut carol, _) = server.connect().await;
    join(&mut carol, "carol", "Carol").await;
    next_frame(&mut alice).await; // participant-joined (carol)
    let (mut anonymous, _) = server.connect().await;
    let (mut bob, _) = server.connect().await;
    join(&mut bob, "bob", "Bob").await;
    next_frame(&mut alice).await; // participant-joined (bob)
    next_frame(&mut carol).await; // participant-joined (bob)

    // when (操作): 未参加の接続が閉じる
    anonymous.close(None).await.unwrap();

    // then (期待する結果): 通知されない
    assert_silent(&mut alice).await;
    assert_silent(&mut carol).await;

    // when (操作): bob が閉じる
    bob.close(None).await.unwrap();

    // then (期待する結果): alice と carol に退出通知が 1 回だけ届く
    for ws in [&mut alice, &mut carol] {
        match next_frame(ws).await {
            OutboundFrame::ParticipantLeft { participant, .. } => {
                assert_eq!(participant.identity, "bob");
            }
            other => panic!("expected participant-left, got {:?}", other),
        }
        assert_silent(ws).await;
    }
}

#[tokio::test]
async fn test_snapshot_contains_persisted_history() {
    // テスト項目: 新しい接続のスナップショットに過去のメッセージが含まれる
    // given (前提条件): スナップショット件数を 2 に絞る
    let server = TestServer::start_with(|config| config.snapshot_size = 2).await;
    let (mut alice, _) = server.connect().await;
    join(&mut alice, "alice", "Alice").await;
    for body in ["one", "two", "three"] {
        send_frame(&mut alice, &message(body)).await;
        next_frame(&mut alice).await;
    }

    // when (操作):
    let (_late, snapshot) = server.connect().await;

    // then (期待する結果): 直近 2 件が古い順で届く
    let OutboundFrame::Snapshot {
        messages,
        known_users,
    } = snapshot
    else {
        panic!("expected snapshot, got {:?}", snapshot);
    };
    let bodies: Vec<&str> = messages.iter().map(|m| m.body.as_str()).collect();
    assert_eq!(bodies, vec!["two", "three"]);
    assert!(messages[0].id < messages[1].id);
    assert!(messages[0].sent_at <= messages[1].sent_at);
    assert_eq!(known_users.len(), 1);
    assert!(server.data_dir.path().join("chat-log.json").exists());
}
