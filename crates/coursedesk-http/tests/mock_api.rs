//! Mock backend tests for the session manager.
//!
//! These tests use wiremock to simulate the storefront backend. The session
//! cookie is modelled with `Set-Cookie`: protected endpoints answer 200 only
//! when the request carries `session=fresh`, and 401 otherwise.

use std::sync::Arc;

use async_trait::async_trait;
use coursedesk_core::account::{ProfileUpdate, Registration};
use coursedesk_core::catalog::{CourseId, CourseSearchFilters, PageRequest};
use coursedesk_core::checkout::{CheckoutMode, CheckoutRequest};
use coursedesk_core::error::StorageError;
use coursedesk_core::{
    ApiUrl, CredentialStore, Credentials, Email, ErrorCategory, Navigation, RefreshToken,
    StoredCredentials, UserId,
};
use coursedesk_http::{ApiClient, ClientConfig, MemoryCredentialStore, SessionManager};
use futures_util::StreamExt;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SESSION_COOKIE: &str = "session=fresh";

fn mock_api_url(server: &MockServer) -> ApiUrl {
    ApiUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

fn stored_pair() -> StoredCredentials {
    StoredCredentials::new(UserId::new("user-1"), RefreshToken::new("refresh-1"))
}

fn manager(server: &MockServer, store: Arc<MemoryCredentialStore>) -> SessionManager {
    let client = ApiClient::new(&ClientConfig::new(mock_api_url(server))).unwrap();
    SessionManager::new(client, store)
}

fn profile_json() -> Value {
    json!({
        "name": "Anna",
        "lastName": "Svensson",
        "email": "anna@example.se",
        "phone": "0701234567",
        "role": "Customer"
    })
}

fn courses_json() -> Value {
    json!([
        {"courseId": 1, "title": "Rust från grunden", "description": "", "category": "Programmering", "level": "Nybörjare", "price": 0},
        {"courseId": 2, "title": "Async i praktiken", "description": "", "category": "Programmering", "level": "Avancerad", "price": 499}
    ])
}

/// 200 with `body` when the session cookie is present, 401 otherwise.
async fn mount_protected(server: &MockServer, verb: &str, route: &str, body: Value) {
    Mock::given(method(verb))
        .and(path(route))
        .and(header("cookie", SESSION_COOKIE))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Unauthorized"
        })))
        .mount(server)
        .await;
}

fn cookie_response(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("set-cookie", "session=fresh; Path=/; HttpOnly")
        .set_body_json(body)
}

async fn count_requests(server: &MockServer, route: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == route)
        .count()
}

// ============================================================================
// Refresh and retry
// ============================================================================

#[tokio::test]
async fn test_401_with_stored_credentials_retries_once() {
    let server = MockServer::start().await;
    mount_protected(&server, "GET", "/api/courses", courses_json()).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({"userId": "user-1", "refreshToken": "refresh-1"})))
        .respond_with(cookie_response(json!({
            "userId": "user-1",
            "refreshToken": "refresh-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credentials(stored_pair()));
    let session = manager(&server, Arc::clone(&store));

    let courses = session.courses().await.unwrap();
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0].course_id, CourseId(1));
    assert_eq!(count_requests(&server, "/api/courses").await, 2);

    let stored = store.load().await.unwrap().unwrap();
    assert_eq!(stored.refresh_token.as_str(), "refresh-2");
}

#[tokio::test]
async fn test_refreshed_response_has_same_shape_as_direct_response() {
    let server = MockServer::start().await;
    mount_protected(&server, "GET", "/api/courses", courses_json()).await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(cookie_response(Value::Null))
        .mount(&server)
        .await;

    let session = manager(
        &server,
        Arc::new(MemoryCredentialStore::with_credentials(stored_pair())),
    );

    let after_refresh = session.courses().await.unwrap();
    let direct = session.courses().await.unwrap();
    assert_eq!(after_refresh, direct);
    assert_eq!(count_requests(&server, "/api/auth/refresh").await, 1);
}

#[tokio::test]
async fn test_401_without_stored_credentials_does_not_refresh() {
    let server = MockServer::start().await;
    mount_protected(&server, "GET", "/api/user/purchases", json!([])).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(cookie_response(Value::Null))
        .expect(0)
        .mount(&server)
        .await;

    let session = manager(&server, Arc::new(MemoryCredentialStore::new()));
    let err = session.purchases().await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Unauthenticated);
    assert_eq!(err.navigation(), Some(Navigation::Login));
    assert_eq!(err.server_message(), Some("Unauthorized"));
    assert_eq!(count_requests(&server, "/api/user/purchases").await, 1);
}

#[tokio::test]
async fn test_second_401_does_not_refresh_again() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/purchases"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    // Refresh "succeeds" but hands out no usable session.
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let session = manager(
        &server,
        Arc::new(MemoryCredentialStore::with_credentials(stored_pair())),
    );
    let err = session.purchases().await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Unauthenticated);
}

#[tokio::test]
async fn test_403_never_refreshes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/purchases"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "Access denied"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(cookie_response(Value::Null))
        .expect(0)
        .mount(&server)
        .await;

    let session = manager(
        &server,
        Arc::new(MemoryCredentialStore::with_credentials(stored_pair())),
    );
    let err = session.purchases().await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Forbidden);
    assert_eq!(err.navigation(), Some(Navigation::AccessDenied));
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn test_concurrent_401s_each_retry_at_most_once() {
    let server = MockServer::start().await;
    mount_protected(&server, "GET", "/api/courses", courses_json()).await;
    mount_protected(&server, "GET", "/api/user/purchases", json!([])).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(cookie_response(Value::Null))
        .mount(&server)
        .await;

    let session = manager(
        &server,
        Arc::new(MemoryCredentialStore::with_credentials(stored_pair())),
    );

    let (courses, purchases) = tokio::join!(session.courses(), session.purchases());
    assert_eq!(courses.unwrap().len(), 2);
    assert!(purchases.unwrap().is_empty());

    // Each call sees at most one 401 followed by one retry.
    assert!(count_requests(&server, "/api/courses").await <= 2);
    assert!(count_requests(&server, "/api/user/purchases").await <= 2);
    assert_eq!(count_requests(&server, "/api/auth/refresh").await, 1);
}

#[tokio::test]
async fn test_concurrent_401s_share_a_rotated_refresh_token() {
    let server = MockServer::start().await;
    mount_protected(&server, "GET", "/api/courses", courses_json()).await;
    mount_protected(&server, "GET", "/api/user/purchases", json!([])).await;
    mount_protected(&server, "GET", "/api/user/profile", profile_json()).await;

    // Refresh tokens are single use: refresh-1 is accepted exactly once.
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({"userId": "user-1", "refreshToken": "refresh-1"})))
        .respond_with(cookie_response(json!({
            "userId": "user-1",
            "refreshToken": "refresh-2"
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Refresh token already used"
        })))
        .with_priority(10)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credentials(stored_pair()));
    let session = manager(&server, Arc::clone(&store));

    let (courses, purchases, profile) =
        tokio::join!(session.courses(), session.purchases(), session.profile());
    assert_eq!(courses.unwrap().len(), 2);
    assert!(purchases.unwrap().is_empty());
    assert_eq!(profile.unwrap().name, "Anna");

    assert!(session.is_authenticated().await);
    assert_eq!(count_requests(&server, "/api/auth/refresh").await, 1);
    let stored = store.load().await.unwrap().unwrap();
    assert_eq!(stored.refresh_token.as_str(), "refresh-2");
}

/// Loads a fixed pair but cannot persist anything.
struct ReadOnlyStore;

#[async_trait]
impl CredentialStore for ReadOnlyStore {
    async fn load(&self) -> coursedesk_core::Result<Option<StoredCredentials>> {
        Ok(Some(stored_pair()))
    }

    async fn save(&self, _credentials: &StoredCredentials) -> coursedesk_core::Result<()> {
        Err(StorageError::Io {
            message: "read-only file system".to_string(),
        }
        .into())
    }

    async fn clear(&self) -> coursedesk_core::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_store_failure_after_refresh_still_retries() {
    let server = MockServer::start().await;
    mount_protected(&server, "GET", "/api/courses", courses_json()).await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(cookie_response(json!({
            "userId": "user-1",
            "refreshToken": "refresh-2"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = ApiClient::new(&ClientConfig::new(mock_api_url(&server))).unwrap();
    let session = SessionManager::new(client, Arc::new(ReadOnlyStore));

    let courses = session.courses().await.unwrap();
    assert_eq!(courses.len(), 2);

    let err = session.refresh().await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Storage);
    assert_eq!(err.navigation(), None);
}

#[tokio::test]
async fn test_failed_refresh_keeps_stored_credentials() {
    let server = MockServer::start().await;
    mount_protected(&server, "GET", "/api/user/profile", profile_json()).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Invalid refresh token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credentials(stored_pair()));
    let session = manager(&server, Arc::clone(&store));

    let err = session.profile().await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Unauthenticated);
    assert!(!session.is_authenticated().await);
    assert_eq!(store.load().await.unwrap(), Some(stored_pair()));
}

#[tokio::test]
async fn test_explicit_refresh_without_credentials_is_unauthenticated() {
    let server = MockServer::start().await;
    let session = manager(&server, Arc::new(MemoryCredentialStore::new()));

    let err = session.refresh().await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Unauthenticated);
}

#[tokio::test]
async fn test_unreachable_backend() {
    // Reserve a port, then release it so nothing is listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let api = ApiUrl::new(format!("http://127.0.0.1:{}", port)).unwrap();

    let client = ApiClient::new(&ClientConfig::new(api)).unwrap();
    let session = SessionManager::new(client, Arc::new(MemoryCredentialStore::new()));

    let err = session.courses().await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NetworkUnreachable);
    assert_eq!(err.navigation(), None);
}

#[tokio::test]
async fn test_server_error_propagates_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses/9"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Course not found"))
        .mount(&server)
        .await;

    let session = manager(&server, Arc::new(MemoryCredentialStore::new()));
    let err = session.course(CourseId(9)).await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::ServerError);
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.server_message(), Some("Course not found"));
}

// ============================================================================
// Session lifecycle
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({
            "email": "anna@example.se",
            "password": "hemligt123"
        })))
        .respond_with(cookie_response(json!({
            "userId": "user-1",
            "refreshToken": "refresh-1"
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_protected(&server, "GET", "/api/user/profile", profile_json()).await;
    Mock::given(method("GET"))
        .and(path("/Auth"))
        .and(header("cookie", SESSION_COOKIE))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let session = manager(&server, Arc::clone(&store));
    assert!(!session.is_authenticated().await);

    let credentials = Credentials::parse("anna@example.se", "hemligt123").unwrap();
    let profile = session.login(&credentials).await.unwrap();

    assert_eq!(profile.display_name(), "Anna Svensson");
    assert!(session.is_authenticated().await);
    assert_eq!(store.load().await.unwrap(), Some(stored_pair()));

    // A fresh probe over the same cookie jar restores the same user.
    assert!(session.restore().await.unwrap());
    assert_eq!(session.user().await, Some(profile));
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid login attempt"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(cookie_response(Value::Null))
        .expect(0)
        .mount(&server)
        .await;

    let session = manager(
        &server,
        Arc::new(MemoryCredentialStore::with_credentials(stored_pair())),
    );
    let credentials = Credentials::parse("anna@example.se", "fel").unwrap();
    let err = session.login(&credentials).await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Unauthenticated);
    assert!(!session.is_authenticated().await);
    assert!(session.user().await.is_none());
}

#[tokio::test]
async fn test_start_without_session_is_anonymous() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Auth"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let config = ClientConfig::new(mock_api_url(&server));
    let session = SessionManager::start(&config, Arc::new(MemoryCredentialStore::new()))
        .await
        .unwrap();
    assert!(!session.is_authenticated().await);
}

#[tokio::test]
async fn test_start_propagates_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Auth"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = ClientConfig::new(mock_api_url(&server));
    let err = SessionManager::start(&config, Arc::new(MemoryCredentialStore::new()))
        .await
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ServerError);
}

#[tokio::test]
async fn test_start_recovers_session_with_stored_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Auth"))
        .and(header("cookie", SESSION_COOKIE))
        .respond_with(ResponseTemplate::new(200))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Auth"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    mount_protected(&server, "GET", "/api/user/profile", profile_json()).await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(cookie_response(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(mock_api_url(&server));
    let store = Arc::new(MemoryCredentialStore::with_credentials(stored_pair()));
    let session = SessionManager::start(&config, store).await.unwrap();

    assert!(session.is_authenticated().await);
    assert_eq!(session.user().await.unwrap().email, "anna@example.se");
}

#[tokio::test]
async fn test_logout_clears_session_and_store() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(cookie_response(json!({
            "userId": "user-1",
            "refreshToken": "refresh-1"
        })))
        .mount(&server)
        .await;
    mount_protected(&server, "GET", "/api/user/profile", profile_json()).await;
    Mock::given(method("POST"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let session = manager(&server, Arc::clone(&store));
    let credentials = Credentials::parse("anna@example.se", "hemligt123").unwrap();
    session.login(&credentials).await.unwrap();

    let navigation = session.logout().await.unwrap();
    assert_eq!(navigation, Navigation::Login);
    assert!(!session.is_authenticated().await);
    assert!(store.load().await.unwrap().is_none());
}

// ============================================================================
// Account
// ============================================================================

#[tokio::test]
async fn test_invalid_registration_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = manager(&server, Arc::new(MemoryCredentialStore::new()));
    let registration = Registration {
        user_name: "Anna".into(),
        user_last_name: "Svensson".into(),
        user_email: "anna@example.se".into(),
        user_phone: String::new(),
        password: "hemligt123".into(),
        confirm_password: "hemligt124".into(),
    };

    let err = session.register(&registration).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::InvalidInput);
}

#[tokio::test]
async fn test_register_sends_form_without_confirmation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .and(body_json(json!({
            "userName": "Anna",
            "userLastName": "Svensson",
            "userEmail": "anna@example.se",
            "userPhone": "",
            "password": "hemligt123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Registrering lyckades"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = manager(&server, Arc::new(MemoryCredentialStore::new()));
    let registration = Registration {
        user_name: "Anna".into(),
        user_last_name: "Svensson".into(),
        user_email: "anna@example.se".into(),
        user_phone: String::new(),
        password: "hemligt123".into(),
        confirm_password: "hemligt123".into(),
    };

    let message = session.register(&registration).await.unwrap();
    assert_eq!(message, "Registrering lyckades");
}

#[tokio::test]
async fn test_password_reset_request_returns_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/forgot-password"))
        .and(body_json(json!({"email": "anna@example.se"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Om e-postadressen finns har en länk skickats."
        })))
        .mount(&server)
        .await;

    let session = manager(&server, Arc::new(MemoryCredentialStore::new()));
    let email = Email::new("anna@example.se").unwrap();
    let message = session.request_password_reset(&email).await.unwrap();
    assert!(message.starts_with("Om e-postadressen"));
}

#[tokio::test]
async fn test_update_profile_keeps_role() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(cookie_response(Value::Null))
        .mount(&server)
        .await;
    mount_protected(&server, "GET", "/api/user/profile", profile_json()).await;
    Mock::given(method("PUT"))
        .and(path("/api/user/profile"))
        .and(body_json(json!({
            "name": "Anna",
            "lastName": "Berg",
            "email": "anna@example.se",
            "phone": "0701234567"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let session = manager(&server, Arc::new(MemoryCredentialStore::new()));
    let credentials = Credentials::parse("anna@example.se", "hemligt123").unwrap();
    let profile = session.login(&credentials).await.unwrap();

    let mut update = ProfileUpdate::from(&profile);
    update.last_name = "Berg".into();
    let updated = session.update_profile(&update).await.unwrap();

    assert_eq!(updated.last_name, "Berg");
    assert_eq!(updated.role.as_deref(), Some("Customer"));
    assert_eq!(session.user().await, Some(updated));
}

// ============================================================================
// Catalog
// ============================================================================

fn search_page(page: u32, total_pages: u32) -> Value {
    json!({
        "courses": [{"courseId": page, "title": format!("Kurs {}", page), "price": 100}],
        "totalCount": total_pages,
        "page": page,
        "pageSize": 1,
        "totalPages": total_pages,
        "hasNextPage": page < total_pages,
        "hasPreviousPage": page > 1
    })
}

#[tokio::test]
async fn test_search_omits_absent_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/courses"))
        .and(query_param("search", "rust"))
        .and(query_param("maxPrice", "99.99"))
        .and(query_param("page", "2"))
        .and(query_param("pageSize", "10"))
        .and(query_param_is_missing("category"))
        .and(query_param_is_missing("level"))
        .and(query_param_is_missing("minPrice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(2, 3)))
        .expect(1)
        .mount(&server)
        .await;

    let session = manager(&server, Arc::new(MemoryCredentialStore::new()));
    let filters = CourseSearchFilters {
        search: Some("rust".into()),
        category: Some("  ".into()),
        max_price: Some(99.99),
        ..Default::default()
    };

    let page = session
        .search_courses(&filters, PageRequest::new(2, 10))
        .await
        .unwrap();
    assert_eq!(page.page, 2);
    assert!(page.has_next_page);
}

#[tokio::test]
async fn test_search_pages_streams_until_last_page() {
    let server = MockServer::start().await;

    for page in 1..=3u32 {
        Mock::given(method("GET"))
            .and(path("/api/search/courses"))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_page(page, 3)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let session = manager(&server, Arc::new(MemoryCredentialStore::new()));
    let pages: Vec<_> = session
        .search_pages(CourseSearchFilters::default(), 1)
        .collect()
        .await;

    let numbers: Vec<u32> = pages.into_iter().map(|p| p.unwrap().page).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_search_pages_stops_at_total_pages() {
    let server = MockServer::start().await;

    for page in 1..=2u32 {
        let mut body = search_page(page, 2);
        body["hasNextPage"] = json!(true);
        Mock::given(method("GET"))
            .and(path("/api/search/courses"))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/api/search/courses"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(3, 2)))
        .expect(0)
        .mount(&server)
        .await;

    let session = manager(&server, Arc::new(MemoryCredentialStore::new()));
    let pages: Vec<_> = session
        .search_pages(CourseSearchFilters::default(), 1)
        .collect()
        .await;

    assert_eq!(pages.len(), 2);
    assert!(pages.iter().all(|p| p.is_ok()));
}

// ============================================================================
// Checkout
// ============================================================================

#[tokio::test]
async fn test_course_checkout_requires_login() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/purchase/course"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = manager(&server, Arc::new(MemoryCredentialStore::new()));
    let err = session
        .checkout(&CheckoutRequest::Course { id: CourseId(7) })
        .await
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Unauthenticated);
}

#[tokio::test]
async fn test_checkout_dispatch_per_product_kind() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(cookie_response(Value::Null))
        .mount(&server)
        .await;
    mount_protected(&server, "GET", "/api/user/profile", profile_json()).await;

    Mock::given(method("POST"))
        .and(path("/api/purchase/course"))
        .and(query_param("courseId", "7"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://pay.example/course"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/subscribe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "checkoutUrl": "https://pay.example/sub"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/payments/create-checkout-session"))
        .and(body_json(json!({"lookupKey": "template_3", "mode": "payment"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://pay.example/template"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/payments/create-checkout-session"))
        .and(body_json(json!({"lookupKey": "pro_yearly", "mode": "subscription"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let session = manager(&server, Arc::new(MemoryCredentialStore::new()));
    let credentials = Credentials::parse("anna@example.se", "hemligt123").unwrap();
    session.login(&credentials).await.unwrap();

    let course = session
        .checkout(&CheckoutRequest::Course { id: CourseId(7) })
        .await
        .unwrap();
    assert_eq!(course.redirect.as_str(), "https://pay.example/course");

    let subscription = session.checkout(&CheckoutRequest::Subscription).await.unwrap();
    assert_eq!(subscription.redirect.as_str(), "https://pay.example/sub");

    let template = CheckoutRequest::template(3, None, session.is_authenticated().await).unwrap();
    let template = session.checkout(&template).await.unwrap();
    assert_eq!(template.redirect.as_str(), "https://pay.example/template");

    let err = session
        .checkout(&CheckoutRequest::Generic {
            lookup_key: "pro_yearly".into(),
            mode: CheckoutMode::Subscription,
        })
        .await
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ServerError);
}

#[tokio::test]
async fn test_guest_template_checkout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/guestpurchase/payment"))
        .and(body_json(json!({
            "guestEmail": "gast@example.se",
            "templateId_Fk": 3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "CheckoutUrl": "https://pay.example/guest",
            "guestPurchaseId": 41
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = manager(&server, Arc::new(MemoryCredentialStore::new()));
    let email = Email::new("gast@example.se").unwrap();
    let request = CheckoutRequest::template(3, Some(email), false).unwrap();

    let redirect = session.checkout(&request).await.unwrap();
    assert_eq!(redirect.redirect.as_str(), "https://pay.example/guest");
    assert_eq!(redirect.guest_purchase_id, Some(41));
}

#[tokio::test]
async fn test_billing_portal_requires_login() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/payments/create-portal-session"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = manager(&server, Arc::new(MemoryCredentialStore::new()));
    let err = session.billing_portal("cs_test_1").await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Unauthenticated);
}
