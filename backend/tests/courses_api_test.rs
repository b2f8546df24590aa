//! Integration tests for the course directory HTTP API
//!
//! Each test serves the real router over a loopback socket, backed by a
//! temporary course file, and talks to it with an HTTP client.

use course_directory_backend::{server::build_app, state::AppState};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;

const SEED: &str = r#"[
  {
    "id": 1,
    "title": "Math101",
    "enrolledUsers": [
      "a@x.com"
    ]
  },
  {
    "id": 2,
    "title": "History201",
    "enrolledUsers": [],
    "instructor": "Dr. Jones",
    "zeta": true,
    "alpha": 1
  },
  {
    "id": 3,
    "title": "Physics150",
    "enrolledUsers": [
      "a@x.com",
      "c@x.com"
    ]
  }
]"#;

/// Running test server with its backing file
struct TestServer {
    base_url: String,
    _dir: TempDir,
    db_path: std::path::PathBuf,
}

impl TestServer {
    async fn start() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("db.json");
        std::fs::write(&db_path, SEED).expect("Failed to write seed file");

        let app = build_app(AppState::with_file(db_path.clone()).shared());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api/v1", addr),
            _dir: dir,
            db_path,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn stored(&self) -> Value {
        read_json(&self.db_path)
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_list_all_courses_returns_file_contents() {
    let server = TestServer::start().await;

    let response = reqwest::get(server.url("/courses")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::from_str::<Value>(SEED).unwrap());
}

#[tokio::test]
async fn test_list_courses_for_user() {
    let server = TestServer::start().await;

    let body: Value = reqwest::get(server.url("/courses/user/a@x.com"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3]);

    let response = reqwest::get(server.url("/courses/user/nobody@x.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_find_course_by_title() {
    let server = TestServer::start().await;

    let response = reqwest::get(server.url("/courses/title/math101"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["title"], json!("Math101"));

    let response = reqwest::get(server.url("/courses/title/Biology"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"message": "Course not found"}));
}

#[tokio::test]
async fn test_enroll_new_user_persists() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let response = client
        .put(server.url("/courses/1/enroll"))
        .json(&json!({"email": "b@x.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"id": 1, "title": "Math101", "enrolledUsers": ["a@x.com", "b@x.com"]})
    );
    assert_eq!(
        server.stored()[0]["enrolledUsers"],
        json!(["a@x.com", "b@x.com"])
    );
    // Untouched courses keep their extra members
    assert_eq!(server.stored()[1]["instructor"], json!("Dr. Jones"));
}

#[tokio::test]
async fn test_enroll_existing_user_leaves_file_untouched() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let response = client
        .put(server.url("/courses/1/enroll"))
        .json(&json!({"email": "a@x.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["enrolledUsers"], json!(["a@x.com"]));

    // Byte-identical: no rewrite happened
    assert_eq!(std::fs::read_to_string(&server.db_path).unwrap(), SEED);
}

#[tokio::test]
async fn test_enroll_without_email_is_rejected() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let response = client
        .put(server.url("/courses/1/enroll"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"message": "User email is required"}));

    let response = client
        .put(server.url("/courses/1/enroll"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(std::fs::read_to_string(&server.db_path).unwrap(), SEED);
}

#[tokio::test]
async fn test_enroll_unknown_course_is_not_found() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let response = client
        .put(server.url("/courses/999/enroll"))
        .json(&json!({"email": "b@x.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"message": "Course not found"}));

    assert_eq!(std::fs::read_to_string(&server.db_path).unwrap(), SEED);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let response = client
        .get(server.url("/courses"))
        .header("Origin", "http://example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_missing_file_is_server_error() {
    let server = TestServer::start().await;
    std::fs::remove_file(&server.db_path).unwrap();

    let response = reqwest::get(server.url("/courses")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_enroll_with_user_or_title_as_id() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    for path in ["/courses/user/enroll", "/courses/title/enroll"] {
        let response = client.put(server.url(path)).json(&json!({})).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"message": "User email is required"}));

        let response = client
            .put(server.url(path))
            .json(&json!({"email": "b@x.com"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"message": "Course not found"}));
    }

    assert_eq!(std::fs::read_to_string(&server.db_path).unwrap(), SEED);
}

#[tokio::test]
async fn test_trailing_slash_is_accepted() {
    let server = TestServer::start().await;

    let response = reqwest::get(server.url("/courses/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::from_str::<Value>(SEED).unwrap());

    let response = reqwest::get(server.url("/courses/title/math101/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_enroll_keeps_key_order_of_extra_members() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let response = client
        .put(server.url("/courses/2/enroll"))
        .json(&json!({"email": "b@x.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let written = std::fs::read_to_string(&server.db_path).unwrap();
    let zeta = written.find("\"zeta\"").unwrap();
    let instructor = written.find("\"instructor\"").unwrap();
    assert!(zeta > instructor);
    let alpha = written.find("\"alpha\"").unwrap();
    assert!(alpha > zeta);
}
