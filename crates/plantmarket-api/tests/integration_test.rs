// Integration tests for the Plantmarket API
// Run with: cargo test --test integration_test -- --ignored
// Requires a running server (DATABASE_URL + JWT_SECRET configured) on :9000

use serde_json::{json, Value};
use uuid::Uuid;

const API_BASE_URL: &str = "http://localhost:9000";

fn unique_email(prefix: &str) -> String {
    format!("{}+{}@example.com", prefix, Uuid::new_v4())
}

async fn envelope(response: reqwest::Response) -> Value {
    response.json().await.expect("Failed to parse envelope")
}

#[tokio::test]
#[ignore] // Run with: cargo test --test integration_test -- --ignored
async fn test_full_marketplace_workflow() {
    let client = reqwest::Client::new();

    // Step 1: Register and log in a nursery
    let nursery_email = unique_email("nursery");
    let response = client
        .post(format!("{}/v1/nurseries/register", API_BASE_URL))
        .json(&json!({
            "email": nursery_email,
            "password": "greenhouse-pw",
            "name": "Fern & Frond",
            "about": "Ferns mostly"
        }))
        .send()
        .await
        .expect("Failed to register nursery");
    assert_eq!(response.status(), 200);

    let response = client
        .post(format!("{}/v1/nurseries/login", API_BASE_URL))
        .json(&json!({"email": nursery_email, "password": "greenhouse-pw"}))
        .send()
        .await
        .expect("Failed to login nursery");
    assert_eq!(response.status(), 200);
    let body = envelope(response).await;
    assert_eq!(body["status"], json!(true));
    let nursery_token = body["data"]["jwt_token"].as_str().unwrap().to_string();

    // Step 2: Register and log in a buyer
    let buyer_email = unique_email("buyer");
    let response = client
        .post(format!("{}/v1/buyers/register", API_BASE_URL))
        .json(&json!({
            "email": buyer_email,
            "password": "p",
            "first_name": "Asha"
        }))
        .send()
        .await
        .expect("Failed to register buyer");
    assert_eq!(response.status(), 200);

    let response = client
        .post(format!("{}/v1/buyers/login", API_BASE_URL))
        .json(&json!({"email": buyer_email, "password": "p"}))
        .send()
        .await
        .expect("Failed to login buyer");
    assert_eq!(response.status(), 200);
    let body = envelope(response).await;
    let buyer_token = body["data"]["jwt_token"].as_str().unwrap().to_string();
    let buyer_id = body["data"]["user_id"].as_str().unwrap().to_string();

    // The buyer token resolves to the registered buyer's profile
    let response = client
        .get(format!("{}/v1/buyers/me", API_BASE_URL))
        .bearer_auth(&buyer_token)
        .send()
        .await
        .expect("Failed to fetch buyer profile");
    assert_eq!(response.status(), 200);
    let body = envelope(response).await;
    assert_eq!(body["data"]["id"].as_str().unwrap(), buyer_id);
    assert_eq!(body["data"]["email"].as_str().unwrap(), buyer_email);

    // Step 3: Nursery posts a plant
    let response = client
        .post(format!("{}/v1/plants", API_BASE_URL))
        .bearer_auth(&nursery_token)
        .json(&json!({
            "name": "Boston Fern",
            "description": "Hardy and forgiving",
            "price": "14.50"
        }))
        .send()
        .await
        .expect("Failed to post plant");
    assert_eq!(response.status(), 200);
    let body = envelope(response).await;
    assert_eq!(body["status"], json!(true));
    let plant_id = body["data"]["id"].as_str().unwrap().to_string();

    // Step 4: Buyer sees it in the catalog
    let response = client
        .get(format!("{}/v1/plants", API_BASE_URL))
        .bearer_auth(&buyer_token)
        .send()
        .await
        .expect("Failed to list plants");
    assert_eq!(response.status(), 200);
    let body = envelope(response).await;
    let listed = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|p| p["id"].as_str() == Some(plant_id.as_str()));
    assert!(listed, "posted plant should appear in the catalog");

    // Step 5: Buyer token on a nursery-only endpoint is rejected by the
    // role check (authentication succeeded, authorization did not)
    let response = client
        .get(format!("{}/v1/plants/own", API_BASE_URL))
        .bearer_auth(&buyer_token)
        .send()
        .await
        .expect("Failed to call nursery-only endpoint");
    assert_eq!(response.status(), 403);
    let body = envelope(response).await;
    assert_eq!(body["status"], json!(false));

    // Step 6: Cart upsert converges on one row per (buyer, plant)
    let response = client
        .post(format!("{}/v1/cart", API_BASE_URL))
        .bearer_auth(&buyer_token)
        .json(&json!({"plant_id": plant_id, "quantity": 1}))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(response.status(), 200);
    let first = envelope(response).await;

    let response = client
        .post(format!("{}/v1/cart", API_BASE_URL))
        .bearer_auth(&buyer_token)
        .json(&json!({"plant_id": plant_id, "quantity": 3}))
        .send()
        .await
        .expect("Failed to re-add to cart");
    assert_eq!(response.status(), 200);
    let second = envelope(response).await;

    assert_eq!(first["data"]["id"], second["data"]["id"]);
    assert_eq!(second["data"]["quantity"], json!(3));

    // Step 7: Placing the order clears the cart row
    let response = client
        .post(format!("{}/v1/orders", API_BASE_URL))
        .bearer_auth(&buyer_token)
        .json(&json!({"plant_id": plant_id, "quantity": 2}))
        .send()
        .await
        .expect("Failed to place order");
    assert_eq!(response.status(), 200);
    let body = envelope(response).await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["status"], json!("placed"));

    let response = client
        .get(format!("{}/v1/cart", API_BASE_URL))
        .bearer_auth(&buyer_token)
        .send()
        .await
        .expect("Failed to list cart");
    let body = envelope(response).await;
    let still_in_cart = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c["plant_id"].as_str() == Some(plant_id.as_str()));
    assert!(!still_in_cart, "ordering should clear the cart row");

    // Step 8: Nursery sees the order and walks the status forward
    let response = client
        .get(format!("{}/v1/orders/received", API_BASE_URL))
        .bearer_auth(&nursery_token)
        .send()
        .await
        .expect("Failed to list received orders");
    assert_eq!(response.status(), 200);
    let body = envelope(response).await;
    let received = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|o| o["id"].as_str() == Some(order_id.as_str()));
    assert!(received);

    for status in ["confirmed", "shipped", "delivered"] {
        let response = client
            .put(format!("{}/v1/orders/{}/status", API_BASE_URL, order_id))
            .bearer_auth(&nursery_token)
            .json(&json!({"status": status}))
            .send()
            .await
            .expect("Failed to update order status");
        assert_eq!(response.status(), 200);
        let body = envelope(response).await;
        assert_eq!(body["data"]["status"], json!(status));
    }

    // Delivered is terminal; the rejected update must not have touched it
    let response = client
        .put(format!("{}/v1/orders/{}/status", API_BASE_URL, order_id))
        .bearer_auth(&nursery_token)
        .json(&json!({"status": "cancelled"}))
        .send()
        .await
        .expect("Failed to send terminal-status update");
    assert_eq!(response.status(), 403);

    let response = client
        .get(format!("{}/v1/orders/received", API_BASE_URL))
        .bearer_auth(&nursery_token)
        .send()
        .await
        .expect("Failed to re-list received orders");
    let body = envelope(response).await;
    let order = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|o| o["id"].as_str() == Some(order_id.as_str()))
        .expect("delivered order should still be listed");
    assert_eq!(order["status"], json!("delivered"));
}

#[tokio::test]
#[ignore]
async fn test_login_failures_are_distinguishable() {
    let client = reqwest::Client::new();

    let email = unique_email("buyer");
    let response = client
        .post(format!("{}/v1/buyers/register", API_BASE_URL))
        .json(&json!({"email": email, "password": "right", "first_name": "Kim"}))
        .send()
        .await
        .expect("Failed to register buyer");
    assert_eq!(response.status(), 200);

    // Wrong password: 401, "Invalid Credentials."
    let response = client
        .post(format!("{}/v1/buyers/login", API_BASE_URL))
        .json(&json!({"email": email, "password": "wrong"}))
        .send()
        .await
        .expect("Failed login attempt");
    assert_eq!(response.status(), 401);
    let mismatch = envelope(response).await;

    // Unknown email: 403, "User does not exist."
    let response = client
        .post(format!("{}/v1/buyers/login", API_BASE_URL))
        .json(&json!({"email": unique_email("nobody"), "password": "wrong"}))
        .send()
        .await
        .expect("Failed login attempt");
    assert_eq!(response.status(), 403);
    let unknown = envelope(response).await;

    assert_ne!(mismatch["message"], unknown["message"]);
}

#[tokio::test]
#[ignore] // Needs JWT_SECRET in the environment to sign the forged token
async fn test_role_claim_never_resolves_across_tables() {
    let client = reqwest::Client::new();
    let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must match the running server");

    // Register a nursery so its id exists only in the nurseries table
    let email = unique_email("nursery");
    let response = client
        .post(format!("{}/v1/nurseries/register", API_BASE_URL))
        .json(&json!({"email": email, "password": "pw", "name": "Cross Check"}))
        .send()
        .await
        .expect("Failed to register nursery");
    assert_eq!(response.status(), 200);

    let response = client
        .post(format!("{}/v1/nurseries/login", API_BASE_URL))
        .json(&json!({"email": email, "password": "pw"}))
        .send()
        .await
        .expect("Failed to login nursery");
    let body = envelope(response).await;
    let nursery_id = body["data"]["user_id"].as_str().unwrap().to_string();

    // Sign a buyer-role token carrying the nursery's id
    let now = chrono::Utc::now();
    let claims = json!({
        "user_id": nursery_id,
        "user_type": "buyer",
        "exp": (now + chrono::Duration::days(1)).timestamp(),
        "iat": now.timestamp(),
    });
    let forged = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign forged token");

    // The signature is valid, but the buyers table has no such subject;
    // the lookup must not fall through to the nurseries table
    let response = client
        .get(format!("{}/v1/buyers/me", API_BASE_URL))
        .bearer_auth(&forged)
        .send()
        .await
        .expect("Failed request with forged token");
    assert_eq!(response.status(), 401);
    let body = envelope(response).await;
    assert_eq!(body["status"], json!(false));
    assert_eq!(body["message"], json!({"error": "invalid_User_Token"}));
}

#[tokio::test]
#[ignore]
async fn test_header_rejections() {
    let client = reqwest::Client::new();

    // No Authorization header at all
    let response = client
        .get(format!("{}/v1/plants", API_BASE_URL))
        .send()
        .await
        .expect("Failed request");
    assert_eq!(response.status(), 401);
    let body = envelope(response).await;
    assert_eq!(body["status"], json!(false));

    // Wrong scheme keyword
    let response = client
        .get(format!("{}/v1/plants", API_BASE_URL))
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await
        .expect("Failed request");
    assert_eq!(response.status(), 401);

    // Scheme word with no credential
    let response = client
        .get(format!("{}/v1/plants", API_BASE_URL))
        .header("Authorization", "Bearer")
        .send()
        .await
        .expect("Failed request");
    assert_eq!(response.status(), 401);
    let body = envelope(response).await;
    assert_eq!(
        body["message"],
        json!("Invalid token header. No credentials provided.")
    );

    // Garbage token decodes to the malformed kind
    let response = client
        .get(format!("{}/v1/plants", API_BASE_URL))
        .header("Authorization", "Bearer not-a-token")
        .send()
        .await
        .expect("Failed request");
    assert_eq!(response.status(), 401);
    let body = envelope(response).await;
    assert_eq!(body["message"], json!({"error": "Invalid_Token"}));
}
