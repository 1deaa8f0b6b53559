#![allow(clippy::unwrap_used)]
// Facade tests against a wiremock backend.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use campus_api::storage::{ADMIN_TOKEN_KEY, ADMIN_USER_KEY, TOKEN_KEY, USER_KEY};
use campus_api::{
    ApiClient, CandidateEndpoints, EndpointResolver, HttpProbe, MemoryStore, NoRedirect,
    Session, SessionStore,
};
use campus_core::model::{PaymentStatus, UserStatus};
use campus_core::{Campus, CoreError, Filters, ListQuery};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(store: MemoryStore) -> (MockServer, Campus, Arc<MemoryStore>) {
    let server = MockServer::start().await;
    let store = Arc::new(store);

    let resolver = EndpointResolver::new(
        CandidateEndpoints::from_urls([format!("{}/api", server.uri())]),
        Arc::new(HttpProbe::with_client(reqwest::Client::new(), Duration::from_secs(2))),
    );
    let session = Arc::new(Session::new(
        resolver,
        Arc::clone(&store) as Arc<dyn SessionStore>,
        Arc::new(NoRedirect),
    ));
    let client = ApiClient::with_client(reqwest::Client::new(), session, 10);

    (server, Campus::new(Arc::new(client)), store)
}

fn admin_store() -> MemoryStore {
    MemoryStore::with_entries([(ADMIN_TOKEN_KEY, "admin-tok")])
}

fn ok(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

// ── List normalization ──────────────────────────────────────────────

#[tokio::test]
async fn test_list_drops_empty_and_unset_filters() {
    let (server, campus, _) = setup(admin_store()).await;

    Mock::given(method("GET"))
        .and(path("/api/payments"))
        .and(|req: &Request| {
            let mut pairs: Vec<(String, String)> = req
                .url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            pairs.sort();
            pairs
                == vec![
                    ("course".to_owned(), "c1".to_owned()),
                    ("limit".to_owned(), "10".to_owned()),
                    ("page".to_owned(), "1".to_owned()),
                ]
        })
        .respond_with(ok(json!({
            "success": true,
            "data": [
                {"_id": "p1", "amount": 49.0, "status": "completed"},
                {"_id": "p2", "amount": 19.5, "status": "refunded"}
            ],
            "pagination": {"page": 1, "limit": 10, "total": 2, "totalPages": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = ListQuery::default().with_filters(
        Filters::new()
            .with("status", Some(""))
            .with("course", Some("c1"))
            .with("dateFrom", None::<String>),
    );
    let page = campus.list_payments(&query).await.unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[1].status, Some(PaymentStatus::Refunded));
    assert_eq!(page.pagination.unwrap().total, Some(2));
}

#[tokio::test]
async fn test_nested_list_payload() {
    let (server, campus, _) = setup(admin_store()).await;

    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .and(query_param("role", "instructor"))
        .respond_with(ok(json!({
            "success": true,
            "data": {
                "users": [{"_id": "u1", "name": "Ada", "status": "active"}],
                "pagination": {"totalItems": 31, "totalPages": 4}
            }
        })))
        .mount(&server)
        .await;

    let page = campus
        .list_users(&ListQuery::new(2, 10).filter("role", Some("instructor")))
        .await
        .unwrap();

    assert_eq!(page.items[0].display_name(), "Ada");
    let pagination = page.pagination.unwrap();
    assert_eq!((pagination.total, pagination.pages), (Some(31), Some(4)));
}

// ── Dual-route fallback ─────────────────────────────────────────────

#[tokio::test]
async fn test_stats_primary_success_skips_alternate() {
    let (server, campus, _) = setup(admin_store()).await;

    Mock::given(method("GET"))
        .and(path("/api/admin/payments/stats"))
        .respond_with(ok(json!({"success": true, "data": {"totalRevenue": 1000.0}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/payments/stats"))
        .respond_with(ok(json!({"success": true, "data": {"totalRevenue": 1.0}})))
        .expect(0)
        .mount(&server)
        .await;

    let stats = campus.payment_stats(None).await.unwrap();
    assert_eq!(stats.total_revenue, Some(1000.0));
}

#[tokio::test]
async fn test_stats_fall_back_once_to_alternate_route() {
    let (server, campus, _) = setup(admin_store()).await;

    Mock::given(method("GET"))
        .and(path("/api/admin/payments/stats"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not found"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/payments/stats"))
        .and(query_param("period", "month"))
        .respond_with(ok(json!({"success": true, "stats": {"totalAmount": 250.0, "count": 5}})))
        .expect(1)
        .mount(&server)
        .await;

    let stats = campus.payment_stats(Some("month")).await.unwrap();
    assert_eq!(stats.total_revenue, Some(250.0));
    assert_eq!(stats.total_payments, Some(5));
}

#[tokio::test]
async fn test_recent_payments_surface_alternate_error() {
    let (server, campus, _) = setup(admin_store()).await;

    Mock::given(method("GET"))
        .and(path("/api/admin/payments/recent"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "primary down"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/payments/recent"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"message": "alternate down"})))
        .expect(1)
        .mount(&server)
        .await;

    let err = campus.recent_payments(5).await.unwrap_err();
    match err {
        CoreError::Api { message, status } => {
            assert_eq!(message, "alternate down");
            assert_eq!(status, Some(503));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_dashboard_stats_fall_back_on_rejected_envelope() {
    let (server, campus, _) = setup(admin_store()).await;

    Mock::given(method("GET"))
        .and(path("/api/admin/dashboard/stats"))
        .respond_with(ok(json!({"success": false, "message": "disabled"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/stats"))
        .respond_with(ok(json!({"success": true, "data": {"totalUsers": 12, "totalCourses": 3}})))
        .expect(1)
        .mount(&server)
        .await;

    let stats = campus.dashboard_stats().await.unwrap();
    assert_eq!(stats.total_users, Some(12));
    assert_eq!(stats.total_courses, Some(3));
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_stores_user_session() {
    let (server, campus, store) = setup(MemoryStore::new()).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "ada@example.com", "password": "pw"})))
        .respond_with(ok(json!({
            "success": true,
            "token": "fresh-tok",
            "user": {"_id": "u1", "email": "ada@example.com"}
        })))
        .mount(&server)
        .await;

    let signed_in = campus.login("ada@example.com", "pw").await.unwrap();

    assert_eq!(signed_in.user.unwrap().id, "u1");
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("fresh-tok"));
    assert!(store.get(USER_KEY).unwrap().unwrap().contains("ada@example.com"));
    assert_eq!(campus.current_user().unwrap().unwrap().id, "u1");
    assert!(campus.current_admin().unwrap().is_none());
}

#[tokio::test]
async fn test_admin_login_stores_admin_session() {
    let (server, campus, store) = setup(MemoryStore::new()).await;

    Mock::given(method("POST"))
        .and(path("/api/admin/auth/login"))
        .respond_with(ok(json!({
            "success": true,
            "data": {"token": "adm", "admin": {"_id": "a1", "role": "admin"}}
        })))
        .mount(&server)
        .await;

    campus.admin_login("root@example.com", "pw").await.unwrap();

    assert_eq!(store.get(ADMIN_TOKEN_KEY).unwrap().as_deref(), Some("adm"));
    assert!(store.get(ADMIN_USER_KEY).unwrap().is_some());
    assert!(store.get(TOKEN_KEY).unwrap().is_none());
    assert_eq!(campus.current_admin().unwrap().unwrap().id, "a1");
}

#[tokio::test]
async fn test_logout_clears_session_even_when_server_fails() {
    let (server, campus, store) = setup(MemoryStore::with_entries([
        (TOKEN_KEY, "tok"),
        (USER_KEY, "{\"id\":\"u1\"}"),
    ]))
    .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    campus.logout().await.unwrap();

    assert!(store.get(TOKEN_KEY).unwrap().is_none());
    assert!(store.get(USER_KEY).unwrap().is_none());
}

#[tokio::test]
async fn test_refresh_token_overwrites_user_token() {
    let (server, campus, store) = setup(MemoryStore::with_entries([(TOKEN_KEY, "old")])).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh-token"))
        .and(header("authorization", "Bearer old"))
        .respond_with(ok(json!({"success": true, "data": {"token": "new"}})))
        .mount(&server)
        .await;

    campus.refresh_token().await.unwrap();
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("new"));
}

#[tokio::test]
async fn test_login_with_undecodable_identity_still_signs_in() {
    let (server, campus, store) = setup(MemoryStore::new()).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ok(json!({"success": true, "token": "tok", "user": "ada"})))
        .mount(&server)
        .await;

    let signed_in = campus.login("ada@example.com", "pw").await.unwrap();

    assert!(signed_in.user.is_none());
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("tok"));
    assert_eq!(store.get(USER_KEY).unwrap().as_deref(), Some("\"ada\""));
}

#[tokio::test]
async fn test_failed_login_keeps_admin_session() {
    let (server, campus, store) = setup(MemoryStore::with_entries([
        (ADMIN_TOKEN_KEY, "admin-tok"),
        (ADMIN_USER_KEY, "{\"id\":\"a1\"}"),
    ]))
    .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(|req: &Request| !req.headers.contains_key("authorization"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"success": false, "message": "Invalid credentials"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = campus.login("learner@example.com", "wrong").await.unwrap_err();

    assert!(matches!(err, CoreError::Rejected { .. }));
    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(store.get(ADMIN_TOKEN_KEY).unwrap().as_deref(), Some("admin-tok"));
    assert_eq!(store.get(ADMIN_USER_KEY).unwrap().as_deref(), Some("{\"id\":\"a1\"}"));
}

#[tokio::test]
async fn test_refresh_token_uses_user_token_alongside_admin() {
    let (server, campus, store) = setup(MemoryStore::with_entries([
        (TOKEN_KEY, "user-tok"),
        (ADMIN_TOKEN_KEY, "admin-tok"),
    ]))
    .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh-token"))
        .and(header("authorization", "Bearer user-tok"))
        .respond_with(ok(json!({"success": true, "token": "user-tok-2"})))
        .expect(1)
        .mount(&server)
        .await;

    campus.refresh_token().await.unwrap();

    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("user-tok-2"));
    assert_eq!(store.get(ADMIN_TOKEN_KEY).unwrap().as_deref(), Some("admin-tok"));
}

#[tokio::test]
async fn test_rejected_refresh_expires_only_user_session() {
    let (server, campus, store) = setup(MemoryStore::with_entries([
        (TOKEN_KEY, "user-tok"),
        (USER_KEY, "{}"),
        (ADMIN_TOKEN_KEY, "admin-tok"),
    ]))
    .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "jwt expired"})))
        .mount(&server)
        .await;

    let err = campus.refresh_token().await.unwrap_err();

    assert!(err.is_session_expired());
    assert!(store.get(TOKEN_KEY).unwrap().is_none());
    assert!(store.get(USER_KEY).unwrap().is_none());
    assert_eq!(store.get(ADMIN_TOKEN_KEY).unwrap().as_deref(), Some("admin-tok"));
}

#[tokio::test]
async fn test_expired_session_surfaces_as_session_expired() {
    let (server, campus, store) = setup(MemoryStore::with_entries([(TOKEN_KEY, "stale")])).await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "jwt expired"})))
        .mount(&server)
        .await;

    let err = campus.me().await.unwrap_err();
    assert!(err.is_session_expired());
    assert_eq!(err.to_string(), "jwt expired");
    assert!(store.get(TOKEN_KEY).unwrap().is_none());
}

// ── Resources ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_rejected_envelope_carries_server_message() {
    let (server, campus, _) = setup(admin_store()).await;

    Mock::given(method("DELETE"))
        .and(path("/api/courses/c1"))
        .respond_with(ok(json!({"success": false, "message": "Course has active enrollments"})))
        .mount(&server)
        .await;

    let err = campus.delete_course("c1").await.unwrap_err();
    match err {
        CoreError::Rejected { message } => assert_eq!(message, "Course has active enrollments"),
        other => panic!("expected Rejected, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_publish_toggle_sends_flag() {
    let (server, campus, _) = setup(admin_store()).await;

    Mock::given(method("PATCH"))
        .and(path("/api/courses/c1/publish"))
        .and(body_json(json!({"isPublished": true})))
        .respond_with(ok(json!({
            "success": true,
            "course": {"_id": "c1", "title": "Rust", "isPublished": true}
        })))
        .mount(&server)
        .await;

    let course = campus.set_course_published("c1", true).await.unwrap();
    assert_eq!(course.is_published, Some(true));
}

#[tokio::test]
async fn test_update_user_status_sends_lowercase_status() {
    let (server, campus, _) = setup(admin_store()).await;

    Mock::given(method("PATCH"))
        .and(path("/api/admin/users/u9/status"))
        .and(body_json(json!({"status": "suspended"})))
        .respond_with(ok(json!({"success": true, "user": {"_id": "u9", "status": "suspended"}})))
        .mount(&server)
        .await;

    let user = campus
        .update_user_status("u9", UserStatus::Suspended)
        .await
        .unwrap();
    assert_eq!(user.status, Some(UserStatus::Suspended));
}

#[tokio::test]
async fn test_records_carrying_both_id_keys_decode() {
    let (server, campus, _) = setup(admin_store()).await;

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(ok(json!({
            "success": true,
            "data": [
                {"_id": "c1", "id": "c1", "title": "Rust"},
                {"_id": "c2", "title": "Go"}
            ]
        })))
        .mount(&server)
        .await;

    let page = campus.list_courses(&ListQuery::default()).await.unwrap();
    let ids: Vec<&str> = page.items.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c2"]);
}

#[tokio::test]
async fn test_path_values_are_encoded_as_one_segment() {
    let (server, campus, _) = setup(admin_store()).await;

    Mock::given(method("GET"))
        .and(path("/api/certificates/verify/AB%2F12%3Fx=1"))
        .and(|req: &Request| req.url.query().is_none())
        .respond_with(ok(json!({"success": true, "valid": true})))
        .expect(1)
        .mount(&server)
        .await;

    let verification = campus.verify_certificate("AB/12?x=1").await.unwrap();
    assert!(verification.valid);
}

#[tokio::test]
async fn test_missing_resource_maps_to_not_found() {
    let (server, campus, _) = setup(admin_store()).await;

    Mock::given(method("GET"))
        .and(path("/api/certificates/verify/XYZ"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"success": false, "message": "Certificate not found"})),
        )
        .mount(&server)
        .await;

    let err = campus.verify_certificate("XYZ").await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
    assert_eq!(err.to_string(), "Certificate not found");
}

#[tokio::test]
async fn test_settings_round_trip_through_settings_key() {
    let (server, campus, _) = setup(admin_store()).await;

    Mock::given(method("GET"))
        .and(path("/api/admin/settings"))
        .respond_with(ok(json!({
            "success": true,
            "settings": {"siteName": "Campus", "maintenanceMode": false}
        })))
        .mount(&server)
        .await;

    let settings = campus.get_settings().await.unwrap();
    assert_eq!(settings.get("siteName"), Some(&json!("Campus")));
}
