use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use base64::Engine;
use http_body_util::BodyExt;
use quiz_api::config::Config;
use serde_json::{Value, json};
use tower::ServiceExt;

const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";
const STRONG_PASSWORD: &str = "Str0ng!Pass";

async fn spawn_app() -> Router {
    let db_path =
        std::env::temp_dir().join(format!("quiz-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.security.jwt.secret = TEST_SECRET.to_string();

    let state = quiz_api::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state");
    quiz_api::api::router(state)
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        headers,
        body,
    }
}

async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, "GET", uri, None, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> TestResponse {
    send(app, "POST", uri, Some(body), None).await
}

async fn register(app: &Router, username: &str) -> TestResponse {
    post(
        app,
        "/api/auth/register",
        json!({
            "username": username,
            "password": STRONG_PASSWORD,
            "confirmPassword": STRONG_PASSWORD,
        }),
    )
    .await
}

async fn login(app: &Router, username: &str, password: &str) -> TestResponse {
    post(
        app,
        "/api/auth/login",
        json!({ "username": username, "password": password }),
    )
    .await
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;

    let response = get(&app, "/api/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(
        response.headers.get("x-content-type-options").unwrap(),
        "nosniff"
    );
}

// ============================================================================
// Accounts
// ============================================================================

#[tokio::test]
async fn test_register_login_and_me() {
    let app = spawn_app().await;

    let response = register(&app, "  Alice_01 ").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["message"].is_string());

    let response = login(&app, "ALICE_01", STRONG_PASSWORD).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "Alice_01");
    assert!(response.body["userId"].is_i64());
    assert!(response.body["expiresAtUtc"].is_string());
    let token = response.body["token"].as_str().unwrap().to_string();

    let response = send(&app, "GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "Alice_01");
    assert!(response.body["createdAtUtc"].is_string());
    assert!(response.body["lastLoginAtUtc"].is_string());
}

#[tokio::test]
async fn test_me_requires_valid_token() {
    let app = spawn_app().await;

    let response = get(&app, "/api/auth/me").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Unauthorized");

    let response = send(&app, "GET", "/api/auth/me", None, Some("not.a.token")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let app = spawn_app().await;

    let response = post(
        &app,
        "/api/auth/register",
        json!({ "username": "ab", "password": STRONG_PASSWORD, "confirmPassword": STRONG_PASSWORD }),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = post(
        &app,
        "/api/auth/register",
        json!({ "username": "bob_user", "password": STRONG_PASSWORD, "confirmPassword": "Other!Pass1" }),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = post(
        &app,
        "/api/auth/register",
        json!({ "username": "bob_user", "password": "weakpass", "confirmPassword": "weakpass" }),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    assert_eq!(register(&app, "bob_user").await.status, StatusCode::OK);

    let response = register(&app, "BOB_USER").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Username is already taken");
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    let app = spawn_app().await;
    register(&app, "carol").await;

    let unknown = login(&app, "nobody", STRONG_PASSWORD).await;
    let wrong = login(&app, "carol", "Wrong!Pass1").await;

    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body["message"], wrong.body["message"]);
}

#[tokio::test]
async fn test_lockout_after_repeated_failures() {
    let app = spawn_app().await;
    register(&app, "dave").await;

    for _ in 0..5 {
        let response = login(&app, "dave", "Wrong!Pass1").await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    let response = login(&app, "dave", STRONG_PASSWORD).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_ne!(
        response.body["message"],
        "Invalid username or password",
        "lockout must be distinguishable"
    );
}

#[tokio::test]
async fn test_successful_login_resets_failure_count() {
    let app = spawn_app().await;
    register(&app, "erin").await;

    for _ in 0..4 {
        login(&app, "erin", "Wrong!Pass1").await;
    }
    assert_eq!(login(&app, "erin", STRONG_PASSWORD).await.status, StatusCode::OK);

    for _ in 0..4 {
        login(&app, "erin", "Wrong!Pass1").await;
    }
    assert_eq!(login(&app, "erin", STRONG_PASSWORD).await.status, StatusCode::OK);
}

// ============================================================================
// Ticket counter
// ============================================================================

#[tokio::test]
async fn test_queue_issue_current_clear() {
    let app = spawn_app().await;

    let response = get(&app, "/api/it05/current").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["queueNumber"], "00");

    let first = post(&app, "/api/it05/issue", json!({})).await;
    assert_eq!(first.body["queueNumber"], "A0");
    assert!(first.body["issuedAtUtc"].is_string());
    assert_eq!(post(&app, "/api/it05/issue", json!({})).await.body["queueNumber"], "A1");

    let response = get(&app, "/api/it05/current").await;
    assert_eq!(response.body["queueNumber"], "A1");
    assert!(response.body["updatedAtUtc"].is_string());

    let response = post(&app, "/api/it05/clear", json!({})).await;
    assert_eq!(response.body["queueNumber"], "00");
    assert!(response.body["clearedAtUtc"].is_string());

    assert_eq!(get(&app, "/api/it05/current").await.body["queueNumber"], "00");
    assert_eq!(post(&app, "/api/it05/issue", json!({})).await.body["queueNumber"], "A0");
}

// ============================================================================
// People
// ============================================================================

#[tokio::test]
async fn test_people_crud() {
    let app = spawn_app().await;

    let response = post(
        &app,
        "/api/people",
        json!({ "firstName": " Somchai ", "lastName": "Jaidee", "birthDate": "1990-05-01", "remark": "  " }),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["id"].as_i64().unwrap();
    assert_eq!(
        response.headers.get(header::LOCATION).unwrap(),
        format!("/api/people/{id}").as_str()
    );
    assert_eq!(response.body["firstName"], "Somchai");
    assert_eq!(response.body["fullName"], "Somchai Jaidee");
    assert!(response.body["remark"].is_null());
    assert!(response.body["age"].as_i64().unwrap() >= 35);

    post(
        &app,
        "/api/people",
        json!({ "firstName": "Suda", "lastName": "Deejai", "birthDate": "2001-01-01" }),
    )
    .await;

    let response = get(&app, "/api/people").await;
    let people = response.body.as_array().unwrap();
    assert_eq!(people.len(), 2);
    assert_eq!(people[0]["firstName"], "Suda");

    let response = get(&app, &format!("/api/people/{id}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["lastName"], "Jaidee");

    let response = get(&app, "/api/people/9999").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Data not found");
}

#[tokio::test]
async fn test_people_validation() {
    let app = spawn_app().await;

    let response = post(
        &app,
        "/api/people",
        json!({ "firstName": "   ", "lastName": "Jaidee", "birthDate": "1990-05-01" }),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = post(
        &app,
        "/api/people",
        json!({ "firstName": "A", "lastName": "B", "birthDate": "2999-01-01" }),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = post(
        &app,
        "/api/people",
        json!({ "firstName": "A", "lastName": "B", "birthDate": "1850-01-01" }),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    assert_eq!(get(&app, "/api/people").await.body, json!([]));
}

// ============================================================================
// Documents
// ============================================================================

fn status_of(documents: &Value, id: i64) -> String {
    documents
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["id"].as_i64() == Some(id))
        .map(|d| d["status"].as_str().unwrap().to_string())
        .unwrap()
}

#[tokio::test]
async fn test_document_decisions() {
    let app = spawn_app().await;

    let documents = get(&app, "/api/it03/documents").await.body;
    assert_eq!(documents.as_array().unwrap().len(), 12);
    assert_eq!(documents[0]["id"], 1);
    assert_eq!(status_of(&documents, 1), "pending");
    assert_eq!(status_of(&documents, 2), "approved");

    let response = post(
        &app,
        "/api/it03/documents/decision",
        json!({ "ids": [1, 3, 3], "action": " Approved ", "reason": "looks good" }),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let documents = get(&app, "/api/it03/documents").await.body;
    assert_eq!(status_of(&documents, 1), "approved");
    assert_eq!(status_of(&documents, 3), "approved");
    assert_eq!(documents[0]["reason"], "looks good");

    let response = post(
        &app,
        "/api/it03/documents/decision",
        json!({ "ids": [1], "action": "rejected", "reason": "again" }),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = post(&app, "/api/it03/documents/reset", json!({})).await;
    assert_eq!(response.status, StatusCode::OK);

    let documents = get(&app, "/api/it03/documents").await.body;
    assert_eq!(status_of(&documents, 1), "pending");
    assert_eq!(status_of(&documents, 2), "approved");
    assert_eq!(documents[0]["reason"], "");
}

#[tokio::test]
async fn test_document_decision_is_all_or_nothing() {
    let app = spawn_app().await;

    // Document 2 starts approved, so the whole batch must be refused
    let response = post(
        &app,
        "/api/it03/documents/decision",
        json!({ "ids": [1, 2], "action": "approved", "reason": "batch" }),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = post(
        &app,
        "/api/it03/documents/decision",
        json!({ "ids": [1, 999], "action": "approved", "reason": "batch" }),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let documents = get(&app, "/api/it03/documents").await.body;
    assert_eq!(status_of(&documents, 1), "pending");

    for body in [
        json!({ "ids": [1], "action": "maybe", "reason": "x" }),
        json!({ "ids": [1], "action": "approved", "reason": "  " }),
        json!({ "ids": [], "action": "approved", "reason": "x" }),
    ] {
        let response = post(&app, "/api/it03/documents/decision", body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(response.body["message"].is_string());
    }
}

// ============================================================================
// Profiles
// ============================================================================

fn png_data_url() -> String {
    let bytes = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

fn profile_body() -> Value {
    json!({
        "firstName": "Mali",
        "lastName": "Srisuk",
        "email": "mali@example.com",
        "phone": "0812345678",
        "profileBase64": png_data_url(),
        "occupation": "Designer",
        "sex": "Female",
        "birthDay": "1995-02-14",
    })
}

#[tokio::test]
async fn test_profile_submission() {
    let app = spawn_app().await;

    let response = get(&app, "/api/it04/occupations").await;
    assert_eq!(response.body.as_array().unwrap().len(), 6);

    let response = post(&app, "/api/it04/profiles", profile_body()).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], 1);
    assert_eq!(response.body["message"], "save data success id : 00001");
}

#[tokio::test]
async fn test_profile_validation() {
    let app = spawn_app().await;

    let cases = [
        ("email", json!("not-an-email")),
        ("phone", json!("12345")),
        ("sex", json!("female")),
        ("occupation", json!("Astronaut")),
        ("profileBase64", json!("data:image/png;base64,AAAAAAAAAAAAAAAA")),
        ("birthDay", json!("2999-01-01")),
        ("firstName", json!("")),
    ];

    for (field, value) in cases {
        let mut body = profile_body();
        body[field] = value;
        let response = post(&app, "/api/it04/profiles", body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "field {field}");
    }
}

// ============================================================================
// Product codes
// ============================================================================

#[tokio::test]
async fn test_numeric_codes() {
    let app = spawn_app().await;

    let response = post(
        &app,
        "/api/it06/codes",
        json!({ "productCode": "1234-5678-9012-3456" }),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["productCode"], "1234-5678-9012-3456");
    let id = response.body["id"].as_i64().unwrap();

    let duplicate = post(
        &app,
        "/api/it06/codes",
        json!({ "productCode": "1234-5678-9012-3456" }),
    )
    .await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);

    let malformed = post(&app, "/api/it06/codes", json!({ "productCode": "1234-5678" })).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    assert_eq!(get(&app, "/api/it06/codes").await.body.as_array().unwrap().len(), 1);

    let uri = format!("/api/it06/codes/{id}");
    assert_eq!(send(&app, "DELETE", &uri, None, None).await.status, StatusCode::OK);
    assert_eq!(
        send(&app, "DELETE", &uri, None, None).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_alphanumeric_codes_are_separate() {
    let app = spawn_app().await;

    let code = "ABCDE-12345-FGHIJ-67890-KLMNO-PQRST";
    let response = post(&app, "/api/it07/codes", json!({ "productCode": code })).await;
    assert_eq!(response.status, StatusCode::OK);

    let lowercase = post(
        &app,
        "/api/it07/codes",
        json!({ "productCode": code.to_lowercase() }),
    )
    .await;
    assert_eq!(lowercase.status, StatusCode::BAD_REQUEST);

    assert_eq!(get(&app, "/api/it07/codes").await.body.as_array().unwrap().len(), 1);
    assert_eq!(get(&app, "/api/it06/codes").await.body, json!([]));
}

// ============================================================================
// Question bank
// ============================================================================

async fn add_question(app: &Router, text: &str) -> Value {
    let response = post(
        app,
        "/api/it08/questions",
        json!({ "questionText": text, "choice1": "a", "choice2": "b", "choice3": "c", "choice4": "d" }),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    response.body
}

#[tokio::test]
async fn test_questions_renumber_on_delete() {
    let app = spawn_app().await;

    let first = add_question(&app, "First?").await;
    let second = add_question(&app, "Second?").await;
    let third = add_question(&app, "Third?").await;
    assert_eq!(first["displayOrder"], 1);
    assert_eq!(third["displayOrder"], 3);
    assert_eq!(second["choices"], json!(["a", "b", "c", "d"]));

    let uri = format!("/api/it08/questions/{}", first["id"]);
    assert_eq!(send(&app, "DELETE", &uri, None, None).await.status, StatusCode::OK);
    assert_eq!(
        send(&app, "DELETE", &uri, None, None).await.status,
        StatusCode::NOT_FOUND
    );

    let questions = get(&app, "/api/it08/questions").await.body;
    assert_eq!(questions[0]["questionText"], "Second?");
    assert_eq!(questions[0]["displayOrder"], 1);
    assert_eq!(questions[1]["questionText"], "Third?");
    assert_eq!(questions[1]["displayOrder"], 2);

    let fourth = add_question(&app, "Fourth?").await;
    assert_eq!(fourth["displayOrder"], 3);
}

#[tokio::test]
async fn test_question_requires_all_fields() {
    let app = spawn_app().await;

    let response = post(
        &app,
        "/api/it08/questions",
        json!({ "questionText": "Q?", "choice1": "a", "choice2": "b", "choice3": " ", "choice4": "d" }),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(get(&app, "/api/it08/questions").await.body, json!([]));
}

// ============================================================================
// Comment thread
// ============================================================================

#[tokio::test]
async fn test_comment_thread() {
    let app = spawn_app().await;

    let thread = get(&app, "/api/it09/thread").await.body;
    assert_eq!(thread["post"]["author"], "Change can");
    assert_eq!(thread["comments"].as_array().unwrap().len(), 1);

    let response = post(&app, "/api/it09/comments", json!({ "message": "  hello  " })).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "hello");
    assert_eq!(response.body["commenter"], "Blend 285");

    let response = post(&app, "/api/it09/comments", json!({ "message": "   " })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let comments = get(&app, "/api/it09/thread").await.body["comments"].clone();
    assert_eq!(comments.as_array().unwrap().len(), 2);
    assert_eq!(comments[1]["message"], "hello");
}

// ============================================================================
// Exam
// ============================================================================

#[tokio::test]
async fn test_exam_submission() {
    let app = spawn_app().await;

    let questions = get(&app, "/api/it10/questions").await.body;
    let questions = questions["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert!(questions[0].get("correctIndex").is_none());
    assert_eq!(questions[0]["choices"].as_array().unwrap().len(), 4);

    let response = post(
        &app,
        "/api/it10/submit",
        json!({ "fullName": " Test Taker ", "answers": [0, 1] }),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["fullName"], "Test Taker");
    assert_eq!(response.body["score"], 2);
    assert_eq!(response.body["totalQuestions"], 2);

    let response = post(
        &app,
        "/api/it10/submit",
        json!({ "fullName": "Test Taker", "answers": [0] }),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = post(
        &app,
        "/api/it10/submit",
        json!({ "fullName": "Test Taker", "answers": [0, 4] }),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
