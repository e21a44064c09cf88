//! End-to-end tests through the router against an in-memory database.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use khata_api::{AppState, create_router};
use khata_db::entities::sea_orm_active_enums::{BalanceType, ItemType, MemberRole, PartyType};
use khata_db::migration::{Migrator, MigratorTrait};
use khata_db::repositories::{
    CategoryInput, CompanyInput, CreateMemberInput, ItemInput, PartyInput,
};
use khata_db::{
    CategoryRepository, CompanyRepository, ItemRepository, MemberRepository, PartyRepository,
};
use khata_shared::config::JwtConfig;
use khata_shared::jwt::JwtService;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    router: Router,
    db: DatabaseConnection,
}

async fn spawn_app() -> TestApp {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.expect("Failed to open database");
    Migrator::up(&db, None).await.expect("Failed to migrate");

    let jwt_service = JwtService::new(&JwtConfig {
        secret: "router-test-secret".to_string(),
        access_token_expiry_secs: 3600,
    });
    let state = AppState {
        db: Arc::new(db.clone()),
        jwt_service: Arc::new(jwt_service),
        cookie_secure: false,
    };
    TestApp {
        router: create_router(state),
        db,
    }
}

async fn add_member(db: &DatabaseConnection, username: &str, phone: &str, role: MemberRole) -> Uuid {
    MemberRepository::new(db.clone())
        .create(CreateMemberInput {
            username: username.to_string(),
            name: username.to_string(),
            email: format!("{username}@example.com"),
            phone_number: phone.to_string(),
            emergency_number: None,
            password: "secret123".to_string(),
            role,
            address: None,
            image: None,
            opening_bal: None,
            company_opening_bal: None,
            joining_date: None,
            salary: None,
        })
        .await
        .expect("Failed to create member")
        .id
}

async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.router.clone().oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, token: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request")
}

async fn login(app: &TestApp, username: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "username": username, "password": "secret123" }).to_string(),
        ))
        .expect("request");
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["data"]["token"].as_str().expect("token").to_string()
}

fn decimal(value: &Value) -> Decimal {
    value.as_str().expect("decimal string").parse().expect("decimal")
}

/// Company with 1000 in cash, one party and one item.
async fn seed_trading(app: &TestApp) -> (Uuid, Uuid) {
    CompanyRepository::new(app.db.clone())
        .create(CompanyInput {
            company_name: "Khata Traders".to_string(),
            email: None,
            phone_number: None,
            address: None,
            gst_no: None,
            opening_bal: Some(dec!(1000)),
        })
        .await
        .expect("seed");
    let party = PartyRepository::new(app.db.clone())
        .create(PartyInput {
            party_name: "Hari Stores".to_string(),
            phone_number: "9811111111".to_string(),
            email: None,
            assigned_route_id: None,
            address: None,
            latitude: None,
            longitude: None,
            party_type: PartyType::Sale,
            route_priority: None,
            as_of_date: None,
            opening_bal: None,
            balance_type: BalanceType::Receive,
            status: None,
            group_id: None,
        })
        .await
        .expect("seed");
    let category = CategoryRepository::new(app.db.clone())
        .create(CategoryInput {
            category_name: "Snacks".to_string(),
        })
        .await
        .expect("seed");
    let item = ItemRepository::new(app.db.clone())
        .create(ItemInput {
            item_code: "SN-1".to_string(),
            item_name: "Chips".to_string(),
            item_type: ItemType::Product,
            category_id: category.id,
            purchase_rate: dec!(40),
            sale_rate: dec!(50),
            mrp: None,
            opening_stock: None,
            min_stock: None,
            tax_id: None,
            as_of_date: None,
        })
        .await
        .expect("seed");

    (party.id, item.id)
}

fn trade_body(invoice_no: &str, party: Uuid, item: Uuid, amount: &str) -> Value {
    json!({
        "invoiceNo": invoice_no,
        "date": "2026-03-01",
        "partyId": party,
        "totalAmount": amount,
        "grandTotal": amount,
        "received": amount,
        "paymentType": "cash",
        "items": [
            { "itemId": item, "quantity": 1, "rate": amount, "totalAmount": amount }
        ]
    })
}

#[tokio::test]
async fn test_health_is_public() {
    let app = spawn_app().await;
    let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = spawn_app().await;
    let request = Request::builder().uri("/api/tax").body(Body::empty()).unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["statusCode"], 401);
    assert_eq!(body["errorCode"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_login_sets_cookie_that_authenticates() {
    let app = spawn_app().await;
    add_member(&app.db, "admin", "9800000001", MemberRole::Admin).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "username": "admin@example.com", "password": "secret123" }).to_string(),
        ))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("Set-Cookie header")
        .to_string();
    assert!(cookie.starts_with("accessToken="));
    assert!(cookie.contains("HttpOnly"));

    let pair = cookie.split(';').next().unwrap().to_string();
    let request = Request::builder()
        .uri("/api/auth/me")
        .header(header::COOKIE, pair)
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "admin");
    assert!(body["data"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app = spawn_app().await;
    add_member(&app.db, "admin", "9800000001", MemberRole::Admin).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "username": "admin", "password": "nope" }).to_string()))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_roles_are_enforced() {
    let app = spawn_app().await;
    add_member(&app.db, "field_rep", "9800000002", MemberRole::Salesman).await;
    add_member(&app.db, "books", "9800000003", MemberRole::Accountant).await;

    let salesman = login(&app, "field_rep").await;
    let (status, body) = send(&app, get("/api/tax", &salesman)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["errorCode"], "FORBIDDEN");

    let accountant = login(&app, "books").await;
    let (status, _) = send(&app, get("/api/tax", &accountant)).await;
    assert_eq!(status, StatusCode::OK);

    let create = json!({ "taxName": "VAT", "taxPercentage": "13" });
    let (status, _) = send(&app, json_request("POST", "/api/tax/create", &accountant, &create)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_deactivated_member_token_is_refused() {
    let app = spawn_app().await;
    let id = add_member(&app.db, "leaver", "9800000004", MemberRole::Manager).await;
    let token = login(&app, "leaver").await;

    MemberRepository::new(app.db.clone())
        .deactivate(id)
        .await
        .expect("Failed to deactivate");

    let (status, body) = send(&app, get("/api/auth/me", &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found or blocked");
}

#[tokio::test]
async fn test_sale_moves_company_balance() {
    let app = spawn_app().await;
    add_member(&app.db, "admin", "9800000001", MemberRole::Admin).await;
    let token = login(&app, "admin").await;

    let (party, item) = seed_trading(&app).await;

    let sale = json!({
        "invoiceNo": "S-1",
        "date": "2026-03-01",
        "partyId": party,
        "totalAmount": "250.50",
        "grandTotal": "250.50",
        "received": "250.50",
        "paymentType": "cash",
        "saleItems": [
            { "itemId": item, "quantity": 5, "saleRate": "50.10", "totalAmount": "250.50" }
        ]
    });
    let (status, body) = send(&app, json_request("POST", "/api/sale/create", &token, &sale)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["data"]["invoiceNo"], "S-1");
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));

    let (status, body) = send(&app, get("/api/balances", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["data"]["company"]), dec!(1250.50));

    // Same invoice number again under the same kind.
    let (status, body) = send(&app, json_request("POST", "/api/sale/create", &token, &sale)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Invoice number already exists");

    // The number is free under purchases.
    let (status, _) = send(&app, json_request("POST", "/api/purchase/create", &token, &sale)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, get("/api/balances", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["data"]["company"]), dec!(1000));
}

#[tokio::test]
async fn test_invalid_body_is_a_validation_error() {
    let app = spawn_app().await;
    add_member(&app.db, "admin", "9800000001", MemberRole::Admin).await;
    let token = login(&app, "admin").await;

    let (status, body) = send(
        &app,
        json_request("POST", "/api/category/create", &token, &json!({ "categoryName": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "VALIDATION_ERROR");

    let (status, body) = send(
        &app,
        json_request("POST", "/api/receipt/create", &token, &json!({ "receiptNo": "R-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_return_routes_move_cash_the_other_way() {
    let app = spawn_app().await;
    add_member(&app.db, "admin", "9800000001", MemberRole::Admin).await;
    let token = login(&app, "admin").await;
    let (party, item) = seed_trading(&app).await;

    let body = trade_body("SR-1", party, item, "80.50");
    let (status, created) =
        send(&app, json_request("POST", "/api/sale-return/create", &token, &body)).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["data"]["kind"], "sale_return");
    assert_eq!(created["message"], "Sale return created successfully");

    let (_, balances) = send(&app, get("/api/balances", &token)).await;
    assert_eq!(decimal(&balances["data"]["company"]), dec!(919.50));

    // A sale return is not reachable under the sale prefix.
    let id = created["data"]["id"].as_str().expect("id").to_string();
    let (status, _) = send(&app, get(&format!("/api/sale/{id}"), &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, get(&format!("/api/sale-return/{id}"), &token)).await;
    assert_eq!(status, StatusCode::OK);

    let body = trade_body("PR-1", party, item, "80.50");
    let (status, _) =
        send(&app, json_request("POST", "/api/purchase-return/create", &token, &body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, balances) = send(&app, get("/api/balances", &token)).await;
    assert_eq!(decimal(&balances["data"]["company"]), dec!(1000));

    let (status, page) = send(&app, get("/api/purchase-return", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["data"]["meta"]["total"], 1);
}

#[tokio::test]
async fn test_members_add_alias_creates_member() {
    let app = spawn_app().await;
    add_member(&app.db, "admin", "9800000001", MemberRole::Admin).await;
    let token = login(&app, "admin").await;

    let body = json!({
        "username": "new_rep",
        "name": "New Rep",
        "email": "new_rep@example.com",
        "phoneNumber": "9800000011",
        "password": "secret123",
        "role": "salesman"
    });
    let (status, created) = send(&app, json_request("POST", "/api/members/add", &token, &body)).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["data"]["username"], "new_rep");
    assert_eq!(created["data"]["role"], "salesman");

    login(&app, "new_rep").await;
}

#[tokio::test]
async fn test_self_update_cannot_change_role_or_status() {
    let app = spawn_app().await;
    add_member(&app.db, "field_rep", "9800000002", MemberRole::Salesman).await;
    let token = login(&app, "field_rep").await;

    for body in [json!({ "role": "admin" }), json!({ "status": false })] {
        let (status, response) =
            send(&app, json_request("PUT", "/api/members/update", &token, &body)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{body}");
        assert_eq!(response["errorCode"], "FORBIDDEN");
    }

    let (status, response) = send(
        &app,
        json_request("PUT", "/api/members/update", &token, &json!({ "name": "Field Rep" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["data"]["name"], "Field Rep");
    assert_eq!(response["data"]["role"], "salesman");
}

#[tokio::test]
async fn test_admin_cannot_deactivate_own_account() {
    let app = spawn_app().await;
    let admin = add_member(&app.db, "admin", "9800000001", MemberRole::Admin).await;
    let token = login(&app, "admin").await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/members/{admin}"))
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request");
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errorCode"], "BUSINESS_RULE_VIOLATION");

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/members/update/{admin}"),
            &token,
            &json!({ "status": false }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Still able to act.
    let (status, _) = send(&app, get("/api/auth/me", &token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = spawn_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/logout")
        .header(header::COOKIE, "accessToken=stale")
        .body(Body::empty())
        .expect("request");
    let response = app.router.clone().oneshot(request).await.expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("Set-Cookie header")
        .to_string();
    assert!(cookie.starts_with("accessToken=;"), "{cookie}");
    assert!(cookie.contains("Max-Age=0"), "{cookie}");
    assert!(cookie.contains("Path=/"), "{cookie}");
}
