use actix_web::{App, Scope, http::StatusCode, http::header, test, web};
use serde_json::{Value, json};
use tenant_crm::models::config::ServerConfig;
use tenant_crm::repository::DieselRepository;
use tenant_crm::routes;

mod common;

fn test_config() -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".to_string(),
        port: 0,
        database_url: String::new(),
        secret: "test-secret".to_string(),
        encryption_key: "test-encryption-key".to_string(),
        portals: Vec::new(),
    }
}

fn api() -> Scope {
    web::scope("/api")
        .service(
            web::scope("/auth")
                .service(routes::auth::register)
                .service(routes::auth::login)
                .service(routes::auth::me),
        )
        .service(
            web::scope("/leads")
                .service(routes::leads::list_leads)
                .service(routes::leads::create_lead)
                .service(routes::leads::get_lead),
        )
}

macro_rules! test_app {
    ($repo:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($repo.clone()))
                .app_data(web::Data::new(test_config()))
                .service(api()),
        )
        .await
    };
}

#[actix_web::test]
async fn register_login_and_me_flow() {
    let test_db = common::TestDb::new("test_routes_auth.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test_app!(repo);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "organization_name": "Acme Corp",
            "email": "owner@acme.example.com",
            "password": "correct-horse",
            "first_name": "Olive",
            "last_name": "Oyl",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["organization"]["slug"], "acme-corp");
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"].get("password_hash").is_none());

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({
            "slug": "acme-corp",
            "email": "owner@acme.example.com",
            "password": "correct-horse",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "owner@acme.example.com");
}

#[actix_web::test]
async fn login_failures_are_unauthorized() {
    let test_db = common::TestDb::new("test_routes_login.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test_app!(repo);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "organization_name": "Acme",
            "slug": "acme",
            "email": "owner@acme.example.com",
            "password": "correct-horse",
            "first_name": "Olive",
            "last_name": "Oyl",
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    // Wrong password, wrong tenant: same opaque rejection either way.
    for payload in [
        json!({"slug": "acme", "email": "owner@acme.example.com", "password": "wrong-password"}),
        json!({"slug": "other", "email": "owner@acme.example.com", "password": "correct-horse"}),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}

#[actix_web::test]
async fn register_rejects_short_passwords() {
    let test_db = common::TestDb::new("test_routes_validation.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test_app!(repo);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "organization_name": "Acme",
            "email": "owner@acme.example.com",
            "password": "short",
            "first_name": "Olive",
            "last_name": "Oyl",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn protected_routes_require_a_bearer_token() {
    let test_db = common::TestDb::new("test_routes_bearer.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test_app!(repo);

    let req = test::TestRequest::get().uri("/api/leads").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/leads")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn leads_are_scoped_to_the_callers_tenant() {
    let test_db = common::TestDb::new("test_routes_tenancy.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test_app!(repo);

    let mut tokens = Vec::new();
    for slug in ["alpha", "beta"] {
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "organization_name": slug,
                "slug": slug,
                "email": format!("owner@{slug}.example.com"),
                "password": "correct-horse",
                "first_name": "Owner",
                "last_name": "Person",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        tokens.push(body["token"].as_str().unwrap().to_string());
    }

    let req = test::TestRequest::post()
        .uri("/api/leads")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", tokens[0])))
        .set_json(json!({
            "first_name": "Carla",
            "last_name": "Reed",
            "company": "Reed LLC",
            "value": 500.0,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let lead_id = created["id"].as_i64().unwrap();

    // The other tenant sees an empty list and a 404 for the direct fetch.
    let req = test::TestRequest::get()
        .uri("/api/leads")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", tokens[1])))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 0);

    let req = test::TestRequest::get()
        .uri(&format!("/api/leads/{lead_id}"))
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", tokens[1])))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/leads")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", tokens[0])))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["last_name"], "Reed");
}
