//! `HttpChatApi` integration tests
//!
//! Every endpoint is exercised against a `wiremock` server: method, path,
//! request body, and decoding of the response, plus the error mapping for
//! non-2xx statuses and unreachable hosts.

mod common;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use chatfront::api::ChatApi;
use chatfront::error::ChatfrontError;
use chatfront::models::{CancellationRequest, ChatMessage, ChatType, ReservationStatus};

use common::api_for;

#[tokio::test]
async fn test_send_chat_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({"message": "ping"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "pong", "isBot": true})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = api_for(&server.uri()).send_chat_message("ping").await.unwrap();
    assert_eq!(reply.message, "pong");
    assert!(reply.is_bot);
}

#[tokio::test]
async fn test_list_chats() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat-memory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a", "description": "Trip to Paris"},
            {"id": "b", "description": "Refund"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let chats = api_for(&server.uri()).list_chats().await.unwrap();
    assert_eq!(chats.len(), 2);
    assert_eq!(chats[1].id, "b");
}

#[tokio::test]
async fn test_create_chat_posts_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat-memory"))
        .and(body_json(json!({})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "n1", "description": ""})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let chat = api_for(&server.uri()).create_chat().await.unwrap();
    assert_eq!(chat.id, "n1");
}

#[tokio::test]
async fn test_start_chat() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat-memory/start"))
        .and(body_json(json!({"message": "Hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "chatId": "abc",
            "message": "Hi!",
            "description": "New"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let started = api_for(&server.uri()).start_chat("Hello").await.unwrap();
    assert_eq!(started.chat_id, "abc");
    assert_eq!(started.message, "Hi!");
    assert_eq!(started.description, "New");
}

#[tokio::test]
async fn test_chat_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat-memory/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"content": "Hello", "type": "USER"},
            {"content": "Hi!", "type": "ASSISTANT"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let history = api_for(&server.uri()).chat_history("abc").await.unwrap();
    assert_eq!(
        history,
        vec![ChatMessage::user("Hello"), ChatMessage::assistant("Hi!")]
    );
}

#[tokio::test]
async fn test_continue_chat() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat-memory/abc"))
        .and(body_json(json!({"message": "And tomorrow?"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"content": "Sunny.", "type": "ASSISTANT"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = api_for(&server.uri())
        .continue_chat("abc", "And tomorrow?")
        .await
        .unwrap();
    assert_eq!(reply.chat_type, ChatType::Assistant);
    assert_eq!(reply.content, "Sunny.");
}

#[tokio::test]
async fn test_empty_chat_id_issues_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = api_for(&server.uri());
    let err = api.continue_chat("", "hi").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ChatfrontError>(),
        Some(ChatfrontError::NoActiveChat)
    ));
    let err = api.chat_history("  ").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ChatfrontError>(),
        Some(ChatfrontError::NoActiveChat)
    ));
}

#[tokio::test]
async fn test_send_concierge_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/concierge"))
        .and(body_json(json!({"message": "Change my seat"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": "Which seat would you like?",
            "requiresAction": true,
            "actions": ["choose-seat"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = api_for(&server.uri())
        .send_concierge_message("Change my seat")
        .await
        .unwrap();
    assert_eq!(reply.requires_action, Some(true));
    assert_eq!(reply.actions, Some(vec!["choose-seat".to_string()]));
}

#[tokio::test]
async fn test_list_reservations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reservations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "number": "101",
            "name": "John Doe",
            "date": "2025-09-10",
            "status": "PENDING",
            "from": "LAX",
            "to": "SFO",
            "seat": "12A",
            "class": "BUSINESS"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let reservations = api_for(&server.uri()).list_reservations().await.unwrap();
    assert_eq!(reservations.len(), 1);
    assert_eq!(reservations[0].status, ReservationStatus::Pending);
    assert_eq!(reservations[0].flight_class, "BUSINESS");
}

#[tokio::test]
async fn test_cancel_reservation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/reservations/cancel"))
        .and(body_json(json!({
            "reservationNumber": "101",
            "firstName": "John",
            "lastName": "Doe",
            "reason": "Change of plans"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Reservation cancelled",
            "cancellationFee": 25.5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = api_for(&server.uri())
        .cancel_reservation(&CancellationRequest {
            reservation_number: "101".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            reason: Some("Change of plans".to_string()),
        })
        .await
        .unwrap();
    assert!(response.success);
    assert_eq!(response.cancellation_fee, Some(25.5));
}

#[tokio::test]
async fn test_server_error_maps_to_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat-memory/abc"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = api_for(&server.uri())
        .continue_chat("abc", "hi")
        .await
        .unwrap_err();
    match err.downcast_ref::<ChatfrontError>() {
        Some(ChatfrontError::Http {
            status,
            status_text,
        }) => {
            assert_eq!(*status, 500);
            assert_eq!(status_text, "Internal Server Error");
        }
        other => panic!("Expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_maps_to_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat-memory/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = api_for(&server.uri())
        .chat_history("missing")
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ChatfrontError>(),
        Some(ChatfrontError::Http { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_malformed_body_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat-memory"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = api_for(&server.uri()).list_chats().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ChatfrontError>(),
        Some(ChatfrontError::Transport(_))
    ));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    // Bind and drop a listener so the port is known to be closed.
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let err = api_for(&uri).list_chats().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ChatfrontError>(),
        Some(ChatfrontError::Transport(_))
    ));
}
