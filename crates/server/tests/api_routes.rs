use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chat_server::config::AppState;
use chat_server::store::{self, ChatService};
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    app: Router,
    path: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    async fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chat.json");
        let service = ChatService::open(&path).await;
        Self {
            app: chat_server::router(AppState::new(service)),
            path,
            _dir: dir,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn add_user(&self, name: &str, email: &str) -> StatusCode {
        self.post(
            "/chat/add-user",
            json!({ "userName": name, "email": email }),
        )
        .await
        .0
    }

    async fn add_message(&self, subject: &str, sender: &str, receiver: &str) -> StatusCode {
        self.post(
            "/chat/add-message",
            json!({
                "subject": subject,
                "body": "body",
                "senderEmail": sender,
                "receiverEmail": receiver
            }),
        )
        .await
        .0
    }
}

fn emails(users: &Value) -> Vec<String> {
    users
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap().to_string())
        .collect()
}

fn subjects(messages: &Value) -> Vec<String> {
    messages
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["subject"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_register_and_lookup_users() {
    let app = TestApp::new().await;

    assert_eq!(app.add_user("Bob", "b@x.com").await, StatusCode::CREATED);
    assert_eq!(app.add_user("Alice", "a@x.com").await, StatusCode::CREATED);
    assert_eq!(app.add_user("Impostor", "a@x.com").await, StatusCode::CONFLICT);
    assert_eq!(app.add_user("", "c@x.com").await, StatusCode::BAD_REQUEST);

    let (status, body) = app.get("/chat/get-user-by-email?email=a@x.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "userName": "Alice", "email": "a@x.com" }));

    let (status, body) = app.get("/chat/get-user-by-email?email=z@x.com").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"]["message"].is_string());

    let (status, _) = app.get("/chat/get-user-by-email").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.get("/chat/get-all-users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(emails(&body), vec!["a@x.com", "b@x.com"]);
}

#[tokio::test]
async fn test_paged_users() {
    let app = TestApp::new().await;
    for email in ["d@x.com", "a@x.com", "c@x.com", "b@x.com"] {
        app.add_user("User", email).await;
    }

    let (status, body) = app.get("/chat/get-users?limit=2&offset=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(emails(&body), vec!["b@x.com", "c@x.com"]);

    let (_, body) = app.get("/chat/get-users?limit=10&offset=3").await;
    assert_eq!(emails(&body), vec!["d@x.com"]);

    let (status, body) = app.get("/chat/get-users?limit=10&offset=9").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = app.get("/chat/get-users?limit=0&offset=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/chat/get-users?limit=1&offset=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_input_gets_json_bad_request() {
    let app = TestApp::new().await;

    let (status, body) = app.post("/chat/add-user", Value::Null).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].is_string());

    let (status, body) = app
        .post("/chat/add-user", json!({ "userName": "NoEmail" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].is_string());

    let (status, body) = app.get("/chat/get-users?offset=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].is_string());

    let (status, body) = app.get("/chat/get-users?limit=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].is_string());

    let (_, chat) = app.get("/chat").await;
    assert!(chat["users"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn test_message_body_is_optional() {
    let app = TestApp::new().await;
    app.add_user("Alice", "a@x.com").await;
    app.add_user("Bob", "b@x.com").await;

    let (status, _) = app
        .post(
            "/chat/add-message",
            json!({ "subject": "hi", "senderEmail": "a@x.com", "receiverEmail": "b@x.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = app
        .get("/chat/get-messages-sender-receiver?senderEmail=a@x.com&receiverEmail=b@x.com")
        .await;
    assert_eq!(body[0]["body"], "");
}

#[tokio::test]
async fn test_messages_require_known_users() {
    let app = TestApp::new().await;
    app.add_user("Alice", "a@x.com").await;
    app.add_user("Bob", "b@x.com").await;

    assert_eq!(
        app.add_message("hi", "a@x.com", "b@x.com").await,
        StatusCode::CREATED
    );
    assert_eq!(
        app.add_message("hi", "a@x.com", "c@x.com").await,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.add_message("", "a@x.com", "b@x.com").await,
        StatusCode::BAD_REQUEST
    );

    let (_, chat) = app.get("/chat").await;
    assert_eq!(chat["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_message_queries() {
    let app = TestApp::new().await;
    app.add_user("Alice", "a@x.com").await;
    app.add_user("Bob", "b@x.com").await;
    app.add_user("Carol", "c@x.com").await;

    app.add_message("1", "a@x.com", "b@x.com").await;
    app.add_message("2", "b@x.com", "a@x.com").await;
    app.add_message("3", "a@x.com", "c@x.com").await;
    app.add_message("4", "a@x.com", "b@x.com").await;

    let (status, body) = app
        .get("/chat/get-messages-by-sender?senderEmail=a@x.com")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(subjects(&body), vec!["1", "3", "4"]);

    let (_, body) = app
        .get("/chat/get-messages-by-receiver?receiverEmail=a@x.com")
        .await;
    assert_eq!(subjects(&body), vec!["2"]);

    let (_, body) = app
        .get("/chat/get-messages-sender-receiver?senderEmail=a@x.com&receiverEmail=b@x.com")
        .await;
    assert_eq!(subjects(&body), vec!["1", "4"]);

    let (status, _) = app
        .get("/chat/get-messages-by-sender?senderEmail=z@x.com")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .get("/chat/get-messages-sender-receiver?senderEmail=a@x.com&receiverEmail=z@x.com")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mutations_are_saved_to_disk() {
    let app = TestApp::new().await;
    app.add_user("Alice", "a@x.com").await;
    app.add_user("Bob", "b@x.com").await;
    app.add_message("hi", "a@x.com", "b@x.com").await;

    let saved = store::load(&app.path).await;
    assert_eq!(saved.user_count(), 2);
    assert_eq!(saved.messages_between("a@x.com", "b@x.com").len(), 1);
}

#[tokio::test]
async fn test_random_chat_replaces_state() {
    let app = TestApp::new().await;
    app.add_user("Alice", "a@x.com").await;

    let (status, random) = app.post("/chat/random-chat", json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let users = random["users"].as_object().unwrap();
    assert!(!users.is_empty() && users.len() < 20);
    assert!(!users.contains_key("a@x.com"));

    let (_, index) = app.get("/chat").await;
    assert_eq!(index, random);

    let saved = store::load(&app.path).await;
    assert_eq!(serde_json::to_value(&saved).unwrap(), random);
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;
    let response = app
        .app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
