//! API integration tests
//!
//! Run against a live server with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";
const USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// Create a user with a unique email and return its id
async fn create_user(client: &Client, name: &str) -> i32 {
    let email = format!(
        "{}-{}@example.com",
        name,
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    );
    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "name": name, "email": email }))
        .send()
        .await
        .expect("Failed to send create user request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse user");
    body["id"].as_i64().expect("No id in user response") as i32
}

/// Create an available item owned by the given user and return its id
async fn create_item(client: &Client, owner_id: i32, name: &str) -> i32 {
    let response = client
        .post(format!("{}/items", BASE_URL))
        .header(USER_ID_HEADER, owner_id)
        .json(&json!({
            "name": name,
            "description": format!("{} description", name),
            "available": true
        }))
        .send()
        .await
        .expect("Failed to send create item request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse item");
    body["id"].as_i64().expect("No id in item response") as i32
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_booking_lifecycle() {
    let client = Client::new();
    let owner = create_user(&client, "owner").await;
    let booker = create_user(&client, "booker").await;
    let item = create_item(&client, owner, "drill").await;

    let start = chrono::Utc::now() + chrono::Duration::days(1);
    let end = chrono::Utc::now() + chrono::Duration::days(2);

    // Booker creates a booking; it starts out WAITING
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header(USER_ID_HEADER, booker)
        .json(&json!({ "start": start, "end": end, "itemId": item }))
        .send()
        .await
        .expect("Failed to create booking");
    assert_eq!(response.status(), 201);

    let booking: Value = response.json().await.expect("Failed to parse booking");
    assert_eq!(booking["status"], "WAITING");
    assert_eq!(booking["item"]["id"].as_i64().unwrap() as i32, item);
    assert_eq!(booking["booker"]["id"].as_i64().unwrap() as i32, booker);
    let booking_id = booking["id"].as_i64().unwrap();

    // Owner approves
    let response = client
        .patch(format!("{}/bookings/{}?approved=true", BASE_URL, booking_id))
        .header(USER_ID_HEADER, owner)
        .send()
        .await
        .expect("Failed to approve booking");
    assert_eq!(response.status(), 200);
    let approved: Value = response.json().await.unwrap();
    assert_eq!(approved["status"], "APPROVED");

    // A second transition attempt is rejected, not idempotent
    let response = client
        .patch(format!("{}/bookings/{}?approved=true", BASE_URL, booking_id))
        .header(USER_ID_HEADER, owner)
        .send()
        .await
        .expect("Failed to send second approval");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_booking_own_item_is_not_found() {
    let client = Client::new();
    let owner = create_user(&client, "selfbooker").await;
    let item = create_item(&client, owner, "ladder").await;

    let start = chrono::Utc::now() + chrono::Duration::days(1);
    let end = chrono::Utc::now() + chrono::Duration::days(2);

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header(USER_ID_HEADER, owner)
        .json(&json!({ "start": start, "end": end, "itemId": item }))
        .send()
        .await
        .expect("Failed to send booking request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_booking_with_reversed_dates_is_rejected() {
    let client = Client::new();
    let owner = create_user(&client, "owner2").await;
    let booker = create_user(&client, "booker2").await;
    let item = create_item(&client, owner, "saw").await;

    let start = chrono::Utc::now() + chrono::Duration::days(2);
    let end = chrono::Utc::now() + chrono::Duration::days(1);

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header(USER_ID_HEADER, booker)
        .json(&json!({ "start": start, "end": end, "itemId": item }))
        .send()
        .await
        .expect("Failed to send booking request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_booking_unavailable_item_is_rejected() {
    let client = Client::new();
    let owner = create_user(&client, "owner3").await;
    let booker = create_user(&client, "booker3").await;
    let item = create_item(&client, owner, "tent").await;

    // Owner marks the item unavailable
    let response = client
        .patch(format!("{}/items/{}", BASE_URL, item))
        .header(USER_ID_HEADER, owner)
        .json(&json!({ "available": false }))
        .send()
        .await
        .expect("Failed to update item");
    assert_eq!(response.status(), 200);

    let start = chrono::Utc::now() + chrono::Duration::days(1);
    let end = chrono::Utc::now() + chrono::Duration::days(2);

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header(USER_ID_HEADER, booker)
        .json(&json!({ "start": start, "end": end, "itemId": item }))
        .send()
        .await
        .expect("Failed to send booking request");
    assert_eq!(response.status(), 400);

    // The ledger is unchanged
    let response = client
        .get(format!("{}/bookings?state=ALL", BASE_URL))
        .header(USER_ID_HEADER, booker)
        .send()
        .await
        .expect("Failed to list bookings");
    let bookings: Value = response.json().await.unwrap();
    assert_eq!(bookings.as_array().unwrap().len(), 0);
}

/// Create a booking of the given item and return its id
async fn create_booking(
    client: &Client,
    booker_id: i32,
    item_id: i32,
    start: chrono::DateTime<chrono::Utc>,
    end: chrono::DateTime<chrono::Utc>,
) -> i64 {
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header(USER_ID_HEADER, booker_id)
        .json(&json!({ "start": start, "end": end, "itemId": item_id }))
        .send()
        .await
        .expect("Failed to create booking");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse booking");
    body["id"].as_i64().expect("No id in booking response")
}

#[tokio::test]
#[ignore]
async fn test_current_filter_returns_in_progress_bookings_newest_first() {
    let client = Client::new();
    let owner = create_user(&client, "lender").await;
    let booker = create_user(&client, "renter").await;
    let now = chrono::Utc::now();
    let day = chrono::Duration::days(1);
    let hours = chrono::Duration::hours(2);

    let finished_item = create_item(&client, owner, "hammer").await;
    let ongoing_item = create_item(&client, owner, "wrench").await;
    let fresh_item = create_item(&client, owner, "pliers").await;
    let upcoming_item = create_item(&client, owner, "crowbar").await;

    create_booking(&client, booker, finished_item, now - day * 4, now - day * 2).await;
    let ongoing = create_booking(&client, booker, ongoing_item, now - day, now + day).await;
    let fresh = create_booking(&client, booker, fresh_item, now - hours, now + hours).await;
    create_booking(&client, booker, upcoming_item, now + day, now + day * 2).await;

    let response = client
        .get(format!("{}/bookings?state=CURRENT", BASE_URL))
        .header(USER_ID_HEADER, booker)
        .send()
        .await
        .expect("Failed to list bookings");
    assert_eq!(response.status(), 200);

    // Only the two in-progress bookings, the later start first
    let bookings: Value = response.json().await.unwrap();
    let ids: Vec<i64> = bookings
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![fresh, ongoing]);
}

#[tokio::test]
#[ignore]
async fn test_unknown_state_filter_is_unsupported_status() {
    let client = Client::new();
    let user = create_user(&client, "lister").await;

    let response = client
        .get(format!("{}/bookings?state=BOGUS", BASE_URL))
        .header(USER_ID_HEADER, user)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.expect("Failed to parse error");
    assert_eq!(body["error"], "Unknown state: UNSUPPORTED_STATUS");
}

#[tokio::test]
#[ignore]
async fn test_blank_search_returns_empty_list() {
    let client = Client::new();

    for text in ["", "   "] {
        let response = client
            .get(format!("{}/items/search", BASE_URL))
            .query(&[("text", text)])
            .send()
            .await
            .expect("Failed to send search request");

        assert!(response.status().is_success());
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body.as_array().unwrap().len(), 0);
    }
}

#[tokio::test]
#[ignore]
async fn test_removed_user_is_not_found() {
    let client = Client::new();
    let user = create_user(&client, "shortlived").await;

    let response = client
        .delete(format!("{}/users/{}", BASE_URL, user))
        .send()
        .await
        .expect("Failed to delete user");
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{}/users/{}", BASE_URL, user))
        .send()
        .await
        .expect("Failed to get user");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_email_is_conflict() {
    let client = Client::new();
    let email = format!(
        "dup-{}@example.com",
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    );

    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "name": "first", "email": email }))
        .send()
        .await
        .expect("Failed to create first user");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "name": "second", "email": email }))
        .send()
        .await
        .expect("Failed to create second user");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_request_board_excludes_own_requests() {
    let client = Client::new();
    let poster = create_user(&client, "poster").await;
    let reader = create_user(&client, "reader").await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .header(USER_ID_HEADER, poster)
        .json(&json!({ "description": "Looking for a ladder" }))
        .send()
        .await
        .expect("Failed to create request");
    // Request creation answers 200, unlike user/item/booking creates
    assert_eq!(response.status(), 200);
    let created: Value = response.json().await.unwrap();
    let request_id = created["id"].as_i64().unwrap();

    // The poster does not see their own request under /requests/all
    let response = client
        .get(format!("{}/requests/all", BASE_URL))
        .header(USER_ID_HEADER, poster)
        .send()
        .await
        .expect("Failed to list requests");
    let own_view: Value = response.json().await.unwrap();
    assert!(own_view
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["id"].as_i64() != Some(request_id)));

    // Another user does
    let response = client
        .get(format!("{}/requests/all", BASE_URL))
        .header(USER_ID_HEADER, reader)
        .send()
        .await
        .expect("Failed to list requests");
    let other_view: Value = response.json().await.unwrap();
    assert!(other_view
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["id"].as_i64() == Some(request_id)));
}

#[tokio::test]
#[ignore]
async fn test_update_item_by_non_owner_is_not_found() {
    let client = Client::new();
    let owner = create_user(&client, "owner4").await;
    let stranger = create_user(&client, "stranger").await;
    let item = create_item(&client, owner, "kayak").await;

    let response = client
        .patch(format!("{}/items/{}", BASE_URL, item))
        .header(USER_ID_HEADER, stranger)
        .json(&json!({ "name": "stolen kayak" }))
        .send()
        .await
        .expect("Failed to send update");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_missing_identity_header_is_rejected() {
    let client = Client::new();

    let response = client
        .get(format!("{}/bookings", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}
