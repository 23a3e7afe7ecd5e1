use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use roster_client::{ApiConfig, ClientError, EndpointPaths, StudentApi};
use roster_types::{Credentials, NewStudent, Registration, SessionToken, StudentId};
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct Seen {
    requests: Arc<Mutex<Vec<(String, Option<String>, Option<Value>)>>>,
}

impl Seen {
    fn record(&self, what: &str, headers: &HeaderMap, body: Option<Value>) {
        let auth = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.requests.lock().unwrap().push((what.to_string(), auth, body));
    }

    fn all(&self) -> Vec<(String, Option<String>, Option<Value>)> {
        self.requests.lock().unwrap().clone()
    }
}

async fn spawn(router: Router) -> StudentApi {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    StudentApi::new(&ApiConfig {
        base_url: format!("http://{addr}"),
        paths: EndpointPaths::default(),
    })
    .unwrap()
}

fn fake_api(seen: Seen) -> Router {
    Router::new()
        .route(
            "/api/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "secret" {
                    (StatusCode::OK, Json(json!({"token": "tok-123"}))).into_response()
                } else if body["password"] == "tokenless" {
                    (StatusCode::OK, Json(json!({"ok": true}))).into_response()
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"message": "Invalid email or password"})),
                    )
                        .into_response()
                }
            }),
        )
        .route(
            "/api/register",
            post(
                |State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    seen.record("register", &headers, Some(body.clone()));
                    match body["email"].as_str() {
                        Some("taken@acpt.lk") => (
                            StatusCode::CONFLICT,
                            Json(json!({"message": "Email already registered"})),
                        )
                            .into_response(),
                        Some("bare@acpt.lk") => StatusCode::BAD_REQUEST.into_response(),
                        _ => (StatusCode::CREATED, Json(json!({"ok": true}))).into_response(),
                    }
                },
            ),
        )
        .route(
            "/api/student/getAll",
            get(|State(seen): State<Seen>, headers: HeaderMap| async move {
                seen.record("list", &headers, None);
                match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
                    Some("Bearer tok-123") => Json(json!([
                        {"id": 1, "student_name": "Nimal", "student_age": 19,
                         "student_address": "Kandy", "student_contact": "071"},
                        {"id": "2", "name": "Kamal"}
                    ]))
                    .into_response(),
                    Some("Bearer odd-shape") => Json(json!({"students": []})).into_response(),
                    Some("Bearer read-only") => StatusCode::FORBIDDEN.into_response(),
                    _ => StatusCode::UNAUTHORIZED.into_response(),
                }
            }),
        )
        .route(
            "/api/student/save",
            post(
                |State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    seen.record("create", &headers, Some(body.clone()));
                    if body["student_name"] == "Echo" {
                        Json(json!({"data": {"id": 77, "student_name": "Echo"}})).into_response()
                    } else {
                        StatusCode::CREATED.into_response()
                    }
                },
            ),
        )
        .route(
            "/api/student/:id",
            put(
                |State(seen): State<Seen>,
                 Path(id): Path<String>,
                 headers: HeaderMap,
                 Json(body): Json<Value>| async move {
                    seen.record(&format!("update {id}"), &headers, Some(body));
                    Json(json!({"message": "updated"}))
                },
            )
            .delete(
                |State(seen): State<Seen>, Path(id): Path<String>, headers: HeaderMap| async move {
                    seen.record(&format!("delete {id}"), &headers, None);
                    if id == "missing" {
                        (StatusCode::NOT_FOUND, Json(json!({"error": "Student not found"})))
                            .into_response()
                    } else {
                        StatusCode::NO_CONTENT.into_response()
                    }
                },
            ),
        )
        .with_state(seen)
}

fn token() -> SessionToken {
    SessionToken("tok-123".into())
}

fn new_student(name: &str) -> NewStudent {
    NewStudent {
        name: name.into(),
        age: 20,
        address: "Colombo".into(),
        contact: "0770000000".into(),
    }
}

#[tokio::test]
async fn login_returns_token() {
    let api = spawn(fake_api(Seen::default())).await;
    let token = api
        .login(&Credentials::new("admin@acpt.lk", "secret").unwrap())
        .await
        .unwrap();
    assert_eq!(token, SessionToken("tok-123".into()));
}

#[tokio::test]
async fn login_failure_carries_server_message() {
    let api = spawn(fake_api(Seen::default())).await;
    let err = api
        .login(&Credentials::new("admin@acpt.lk", "wrong").unwrap())
        .await
        .unwrap_err();
    match err {
        ClientError::Status { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid email or password");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = api
        .login(&Credentials::new("admin@acpt.lk", "tokenless").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MissingToken));
}

#[tokio::test]
async fn list_sends_bearer_and_normalises_records() {
    let seen = Seen::default();
    let api = spawn(fake_api(seen.clone())).await;

    let students = api.list_students(&token()).await.unwrap();
    assert_eq!(students.len(), 2);
    assert_eq!(students[0].id, StudentId::from("1"));
    assert_eq!(students[0].name, "Nimal");
    assert_eq!(students[0].age, Some(19));
    assert_eq!(students[1].id, StudentId::from("2"));
    assert_eq!(students[1].age_label(), "N/A");

    let requests = seen.all();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].1.as_deref(), Some("Bearer tok-123"));
}

#[tokio::test]
async fn list_rejects_non_array_and_bad_tokens() {
    let api = spawn(fake_api(Seen::default())).await;

    let err = api
        .list_students(&SessionToken("odd-shape".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::UnexpectedFormat));
    assert_eq!(err.user_message(), "Failed to load students");

    let err = api
        .list_students(&SessionToken("expired".into()))
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn create_issues_one_post_and_falls_back_to_draft() {
    let seen = Seen::default();
    let api = spawn(fake_api(seen.clone())).await;

    let created = api.create_student(&token(), &new_student("Nimal")).await.unwrap();
    assert_eq!(created.name, "Nimal");
    assert_eq!(created.age, Some(20));
    assert!(created.id.is_empty());

    let requests = seen.all();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "create");
    assert_eq!(
        requests[0].2,
        Some(json!({
            "student_name": "Nimal",
            "student_age": 20,
            "student_address": "Colombo",
            "student_contact": "0770000000"
        }))
    );
}

#[tokio::test]
async fn create_prefers_returned_record() {
    let api = spawn(fake_api(Seen::default())).await;
    let created = api.create_student(&token(), &new_student("Echo")).await.unwrap();
    assert_eq!(created.id, StudentId::from("77"));
    assert_eq!(created.contact, "0770000000");
}

#[tokio::test]
async fn update_and_delete_target_the_id() {
    let seen = Seen::default();
    let api = spawn(fake_api(seen.clone())).await;
    let id = StudentId::from("5");

    let updated = api
        .update_student(&token(), &id, &new_student("Renamed"))
        .await
        .unwrap();
    assert_eq!(updated.id, id);
    assert_eq!(updated.name, "Renamed");

    api.delete_student(&token(), &id).await.unwrap();

    let requests = seen.all();
    assert_eq!(requests[0].0, "update 5");
    assert_eq!(requests[1].0, "delete 5");
    assert_eq!(requests[1].1.as_deref(), Some("Bearer tok-123"));
}

#[tokio::test]
async fn delete_failure_reports_server_error() {
    let api = spawn(fake_api(Seen::default())).await;
    let err = api
        .delete_student(&token(), &StudentId::from("missing"))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Student not found");
}

#[tokio::test]
async fn forbidden_counts_as_unauthorized() {
    let api = spawn(fake_api(Seen::default())).await;
    let err = api
        .list_students(&SessionToken("read-only".into()))
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

fn registration(email: &str) -> Registration {
    Registration::new("Sam Perera", email, "pw-1234", "pw-1234").unwrap()
}

#[tokio::test]
async fn register_posts_name_email_password() {
    let seen = Seen::default();
    let api = spawn(fake_api(seen.clone())).await;

    api.register(&registration("sam@acpt.lk")).await.unwrap();

    let requests = seen.all();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "register");
    assert_eq!(requests[0].1, None);
    assert_eq!(
        requests[0].2,
        Some(json!({"name": "Sam Perera", "email": "sam@acpt.lk", "password": "pw-1234"}))
    );
}

#[tokio::test]
async fn register_rejection_uses_server_message_or_fallback() {
    let api = spawn(fake_api(Seen::default())).await;

    let err = api.register(&registration("taken@acpt.lk")).await.unwrap_err();
    match err {
        ClientError::Status { status, ref message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "Email already registered");
        }
        ref other => panic!("unexpected error: {other:?}"),
    }

    let err = api.register(&registration("bare@acpt.lk")).await.unwrap_err();
    assert_eq!(err.user_message(), "Registration failed");
}

#[tokio::test]
async fn records_without_ids_are_not_sent_to_item_paths() {
    let seen = Seen::default();
    let api = spawn(fake_api(seen.clone())).await;

    let first = api.create_student(&token(), &new_student("A")).await.unwrap();
    let second = api.create_student(&token(), &new_student("B")).await.unwrap();
    assert!(first.id.is_empty() && second.id.is_empty());

    let err = api
        .update_student(&token(), &first.id, &new_student("A2"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MissingId));
    let err = api.delete_student(&token(), &first.id).await.unwrap_err();
    assert!(matches!(err, ClientError::MissingId));

    let mut list = vec![first.clone(), second];
    roster_types::apply_deleted(&mut list, &first.id);
    assert_eq!(list.len(), 2);

    let requests: Vec<_> = seen.all().into_iter().map(|r| r.0).collect();
    assert_eq!(requests, ["create", "create"]);
}
