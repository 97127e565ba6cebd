use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use quillpad::config::Config;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    // Keep password hashing cheap in tests
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let state = quillpad::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    quillpad::api::router(state).await
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

/// Registers a user and returns their bearer token.
async fn register(app: &Router, username: &str, email: &str) -> String {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "email": email,
            "password": "password123",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

fn words(n: usize) -> String {
    vec!["word"; n].join(" ")
}

async fn create_blog(app: &Router, token: &str, title: &str, content: &str) -> Value {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/blogs",
        Some(token),
        Some(json!({
            "title": title,
            "content": content,
            "tags": ["rust", "testing"],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "create blog failed: {body}");
    body["data"].clone()
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;

    let (status, body) = send_json(&app, "GET", "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "alive");
    assert_eq!(body["data"]["database"], "ok");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = spawn_app().await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/blogs",
        None,
        Some(json!({"title": "Hello there", "content": words(20)})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send_json(&app, "GET", "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send_json(&app, "GET", "/api/auth/me", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_login_create_blog() {
    let app = spawn_app().await;
    let token = register(&app, "alice", "alice@example.com").await;

    let blog = create_blog(&app, &token, "Hello World!!", &words(120)).await;

    assert_eq!(blog["read_time"], 1);
    assert_eq!(blog["likes_count"], 0);
    assert_eq!(blog["is_published"], true);
    assert_eq!(blog["author"]["username"], "alice");
    assert!(blog["slug"].as_str().unwrap().starts_with("hello-world-"));

    // Summary derived from content when omitted
    assert!(blog["summary"].as_str().unwrap().ends_with("..."));

    // Login works with the same credentials
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "alice@example.com", "password": "password123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["token"].is_string());
    assert_eq!(body["data"]["user"]["blog_count"], 1);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = spawn_app().await;
    register(&app, "alice", "alice@example.com").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "alice@example.com", "password": "wrong-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "nobody@example.com", "password": "password123"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_register_conflicts() {
    let app = spawn_app().await;
    register(&app, "alice", "alice@example.com").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "alice2",
            "email": "alice@example.com",
            "password": "password123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already registered");

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "alice",
            "email": "other@example.com",
            "password": "password123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Username already taken");
}

#[tokio::test]
async fn test_short_title_rejected_without_side_effects() {
    let app = spawn_app().await;
    let token = register(&app, "alice", "alice@example.com").await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/blogs",
        Some(&token),
        Some(json!({"title": "Hi!!", "content": words(120)})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing persisted, author's count untouched
    let (_, me) = send_json(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(me["data"]["blog_count"], 0);

    let (_, listing) = send_json(&app, "GET", "/api/blogs", None, None).await;
    assert_eq!(listing["data"]["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_update_recomputes_read_time_but_not_slug() {
    let app = spawn_app().await;
    let token = register(&app, "alice", "alice@example.com").await;

    let blog = create_blog(&app, &token, "My First Post", &words(120)).await;
    let id = blog["id"].as_i64().unwrap();
    let original_slug = blog["slug"].as_str().unwrap().to_string();
    assert_eq!(blog["read_time"], 1);

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/blogs/{id}"),
        Some(&token),
        Some(json!({"content": words(450)})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["read_time"], 3);
    assert_eq!(body["data"]["slug"], original_slug);

    // A title change must not regenerate the slug either
    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/blogs/{id}"),
        Some(&token),
        Some(json!({"title": "A Completely New Title"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "A Completely New Title");
    assert_eq!(body["data"]["slug"], original_slug);
}

#[tokio::test]
async fn test_only_author_can_modify() {
    let app = spawn_app().await;
    let alice = register(&app, "alice", "alice@example.com").await;
    let bob = register(&app, "bob", "bob@example.com").await;

    let blog = create_blog(&app, &alice, "Alice writes", &words(50)).await;
    let id = blog["id"].as_i64().unwrap();

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/blogs/{id}"),
        Some(&bob),
        Some(json!({"title": "Bob was here"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send_json(&app, "DELETE", &format!("/api/blogs/{id}"), Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Untouched
    let (status, body) = send_json(&app, "GET", &format!("/api/blogs/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Alice writes");
}

#[tokio::test]
async fn test_toggle_like_flow() {
    let app = spawn_app().await;
    let alice = register(&app, "alice", "alice@example.com").await;
    let bob = register(&app, "bob", "bob@example.com").await;
    let carol = register(&app, "carol", "carol@example.com").await;

    let blog = create_blog(&app, &alice, "Like this post", &words(30)).await;
    let id = blog["id"].as_i64().unwrap();
    let uri = format!("/api/blogs/{id}/like");

    let (status, body) = send_json(&app, "POST", &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_liked"], true);
    assert_eq!(body["data"]["blog"]["likes_count"], 1);

    let (_, body) = send_json(&app, "POST", &uri, Some(&carol), None).await;
    assert_eq!(body["data"]["blog"]["likes_count"], 2);

    // Second toggle from bob removes his like
    let (_, body) = send_json(&app, "POST", &uri, Some(&bob), None).await;
    assert_eq!(body["data"]["is_liked"], false);
    assert_eq!(body["data"]["blog"]["likes_count"], 1);

    let likes = body["data"]["blog"]["likes"].as_array().unwrap();
    assert_eq!(likes.len(), 1);
    assert_eq!(likes[0]["username"], "carol");

    let (status, _) = send_json(&app, "POST", "/api/blogs/9999/like", Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_listing_pagination_and_filters() {
    let app = spawn_app().await;
    let token = register(&app, "alice", "alice@example.com").await;

    for i in 0..3 {
        create_blog(&app, &token, &format!("Post number {i}"), &words(30)).await;
    }

    let (status, body) = send_json(&app, "GET", "/api/blogs?page=1&limit=2", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["blogs"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["pagination"]["total"], 3);
    assert_eq!(body["data"]["pagination"]["pages"], 2);

    let (_, body) = send_json(&app, "GET", "/api/blogs?page=2&limit=2", None, None).await;
    assert_eq!(body["data"]["blogs"].as_array().unwrap().len(), 1);

    let (_, body) = send_json(&app, "GET", "/api/blogs?tag=rust", None, None).await;
    assert_eq!(body["data"]["pagination"]["total"], 3);

    let (_, body) = send_json(&app, "GET", "/api/blogs?tag=golang", None, None).await;
    assert_eq!(body["data"]["pagination"]["total"], 0);

    let (_, body) = send_json(&app, "GET", "/api/blogs?search=number+1", None, None).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);

    let (status, _) = send_json(&app, "GET", "/api/blogs?limit=51", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(&app, "GET", "/api/blogs?page=0", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unpublished_blogs_hidden_from_listing() {
    let app = spawn_app().await;
    let token = register(&app, "alice", "alice@example.com").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/blogs",
        Some(&token),
        Some(json!({
            "title": "Secret draft",
            "content": words(30),
            "is_published": false,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_i64().unwrap();

    let (_, listing) = send_json(&app, "GET", "/api/blogs", None, None).await;
    assert_eq!(listing["data"]["pagination"]["total"], 0);

    // Direct fetch still works
    let (status, _) = send_json(&app, "GET", &format!("/api/blogs/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_blog_decrements_count() {
    let app = spawn_app().await;
    let token = register(&app, "alice", "alice@example.com").await;

    let blog = create_blog(&app, &token, "Going away soon", &words(30)).await;
    let id = blog["id"].as_i64().unwrap();

    let (_, me) = send_json(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(me["data"]["blog_count"], 1);

    let (status, _) = send_json(&app, "DELETE", &format!("/api/blogs/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(&app, "GET", &format!("/api/blogs/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, me) = send_json(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(me["data"]["blog_count"], 0);
}

#[tokio::test]
async fn test_profile_update() {
    let app = spawn_app().await;
    let alice = register(&app, "alice", "alice@example.com").await;
    register(&app, "bob", "bob@example.com").await;

    let (status, body) = send_json(
        &app,
        "PUT",
        "/api/auth/profile",
        Some(&alice),
        Some(json!({"username": "alice_writes", "bio": "I write things"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "alice_writes");
    assert_eq!(body["data"]["bio"], "I write things");

    // Someone else's username is off limits
    let (status, body) = send_json(
        &app,
        "PUT",
        "/api/auth/profile",
        Some(&alice),
        Some(json!({"username": "bob"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Username already taken");
}

#[tokio::test]
async fn test_user_directory_and_profiles() {
    let app = spawn_app().await;
    let alice = register(&app, "alice", "alice@example.com").await;
    register(&app, "bob", "bob@example.com").await;

    create_blog(&app, &alice, "Alice post one", &words(30)).await;
    create_blog(&app, &alice, "Alice post two", &words(30)).await;

    let (status, body) = send_json(&app, "GET", "/api/users", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    // Most prolific first
    assert_eq!(users[0]["username"], "alice");
    assert_eq!(users[0]["blog_count"], 2);
    // Emails never leak from public views
    assert!(users[0]["email"].is_null());

    let alice_id = users[0]["id"].as_i64().unwrap();
    let (status, body) = send_json(&app, "GET", &format!("/api/users/{alice_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["username"], "alice");
    assert_eq!(body["data"]["recent_blogs"].as_array().unwrap().len(), 2);

    let (status, _) = send_json(&app, "GET", "/api/users/9999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Per-author blog listing
    let (status, body) = send_json(
        &app,
        "GET",
        &format!("/api/blogs/user/{alice_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}
