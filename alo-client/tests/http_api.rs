// alo-client/tests/http_api.rs
// RestaurantApi over an in-process axum router

#![cfg(feature = "in-process")]

use alo_client::{
    BookingService, BranchService, ClientError, CustomerService, FloorService, OneshotHttpClient,
    RestaurantApi,
};
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{Value, json};
use shared::models::{BookingStatus, BookingStatusUpdate, FloorForm, FloorPayload};
use shared::query::{BookingQuery, CustomerQuery};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Recorder {
    queries: Mutex<Vec<String>>,
    bodies: Mutex<Vec<Value>>,
    auth: Mutex<Vec<Option<String>>>,
}

type Shared = Arc<Recorder>;

fn record_auth(rec: &Recorder, headers: &HeaderMap) {
    let value = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    rec.auth.lock().unwrap().push(value);
}

async fn list_branches(State(rec): State<Shared>, headers: HeaderMap) -> Json<Value> {
    record_auth(&rec, &headers);
    Json(json!({ "items": [{ "id": 1, "name": "Central" }, { "id": 2, "name": "Harbor" }] }))
}

async fn list_bookings(State(rec): State<Shared>, RawQuery(query): RawQuery) -> Json<Value> {
    rec.queries.lock().unwrap().push(query.unwrap_or_default());
    Json(json!({
        "items": [{
            "id": "b1",
            "bookingStatusId": "Confirm",
            "bookingDate": "2024-01-01T19:00:00",
            "modifiedDate": "2024-01-01T10:00:00",
            "tableName": "T4"
        }]
    }))
}

async fn get_booking(Path(id): Path<String>) -> Response {
    if id != "b1" {
        return (StatusCode::NOT_FOUND, "booking not found").into_response();
    }
    Json(json!({ "data": { "id": "b1", "bookingStatusId": "Confirm" } })).into_response()
}

async fn update_status(State(rec): State<Shared>, Json(body): Json<Value>) -> StatusCode {
    rec.bodies.lock().unwrap().push(body);
    StatusCode::NO_CONTENT
}

async fn search_customers(State(rec): State<Shared>, RawQuery(query): RawQuery) -> Json<Value> {
    rec.queries.lock().unwrap().push(query.unwrap_or_default());
    Json(json!({
        "items": [{ "id": "c-1", "name": "Linh Tran", "email": "", "phoneNumber": "0901" }]
    }))
}

async fn list_floors(State(rec): State<Shared>, RawQuery(query): RawQuery) -> Json<Value> {
    rec.queries.lock().unwrap().push(query.unwrap_or_default());
    Json(json!({ "items": null }))
}

async fn create_floor(State(rec): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    rec.bodies.lock().unwrap().push(body.clone());
    Json(json!({ "data": { "id": 9, "name": body["name"], "floorNumber": 1, "capacity": 20 } }))
}

async fn update_floor(State(rec): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    rec.bodies.lock().unwrap().push(body);
    Json(json!({ "data": null }))
}

async fn delete_floor(Path(id): Path<i64>) -> Response {
    if id == 9 {
        StatusCode::OK.into_response()
    } else {
        (
            StatusCode::CONFLICT,
            Json(json!({ "code": 4091, "message": "floor has tables" })),
        )
            .into_response()
    }
}

fn api() -> (RestaurantApi<OneshotHttpClient>, Shared) {
    let rec: Shared = Arc::new(Recorder::default());
    let router = Router::new()
        .route("/api/restaurants", get(list_branches))
        .route("/api/restaurant-bookings", get(list_bookings))
        .route("/api/restaurant-bookings/status", put(update_status))
        .route("/api/restaurant-bookings/{id}", get(get_booking))
        .route("/api/customers", get(search_customers))
        .route("/api/restaurant-floors", get(list_floors).post(create_floor))
        .route(
            "/api/restaurant-floors/{id}",
            put(update_floor).delete(delete_floor),
        )
        .with_state(rec.clone());

    let http = OneshotHttpClient::new(router).with_token("secret");
    (RestaurantApi::new(http), rec)
}

#[tokio::test]
async fn test_branches_sent_with_bearer_token() {
    let (api, rec) = api();
    let branches = api.list_store_branches().await.unwrap();
    assert_eq!(branches.len(), 2);
    assert_eq!(branches[1].name, "Harbor");
    assert_eq!(
        *rec.auth.lock().unwrap(),
        vec![Some("Bearer secret".to_string())]
    );
}

#[tokio::test]
async fn test_booking_query_string() {
    let (api, rec) = api();
    let query = BookingQuery::new(5, NaiveDate::from_ymd_opt(2024, 1, 1), 10)
        .with_statuses([BookingStatus::New, BookingStatus::Confirm]);

    let bookings = api.list_bookings(&query).await.unwrap();
    assert_eq!(bookings[0].booking_status_id, BookingStatus::Confirm);
    assert_eq!(bookings[0].extra["tableName"], "T4");

    assert_eq!(
        rec.queries.lock().unwrap()[0],
        "RestaurantId=5&BookingDate=2024-01-01&BookingStatus=New&BookingStatus=Confirm&TotalRows=10&SkipRows=0"
    );
}

#[tokio::test]
async fn test_booking_detail_and_missing_booking() {
    let (api, _rec) = api();
    let booking = api.get_booking("b1").await.unwrap().unwrap();
    assert_eq!(booking.id, "b1");

    let err = api.get_booking("nope").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn test_status_update_accepts_empty_response() {
    let (api, rec) = api();
    api.update_booking_status(&BookingStatusUpdate::single("b1", BookingStatus::Cancelled))
        .await
        .unwrap();
    assert_eq!(
        rec.bodies.lock().unwrap()[0],
        json!({ "bookingIds": ["b1"], "bookingStatus": "Cancelled" })
    );
}

#[tokio::test]
async fn test_customer_search_query() {
    let (api, rec) = api();
    let customers = api
        .search_customers(&CustomerQuery::new("Linh Tran"))
        .await
        .unwrap();
    assert_eq!(customers[0].label(), "Linh Tran - No email - 0901");
    assert_eq!(
        rec.queries.lock().unwrap()[0],
        "SearchText=Linh+Tran&TotalRows=50&SkipRows=0"
    );
}

#[tokio::test]
async fn test_floor_endpoints() {
    let (api, rec) = api();

    assert!(api.list_floors(5).await.unwrap().is_empty());
    assert_eq!(rec.queries.lock().unwrap()[0], "RestaurantId=5");

    let form = FloorForm {
        name: "Mezzanine".into(),
        floor_number: 1,
        capacity: 20,
    };
    let created = api
        .create_floor(&FloorPayload::create(form.clone(), 5))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created.id, 9);

    let updated = api
        .update_floor(9, &FloorPayload::update(form, 5))
        .await
        .unwrap();
    assert!(updated.is_none());
    assert!(rec.bodies.lock().unwrap()[1].get("layoutUrl").is_none());

    api.delete_floor(9).await.unwrap();
    match api.delete_floor(3).await.unwrap_err() {
        ClientError::Api { code, message, .. } => {
            assert_eq!(code, 4091);
            assert_eq!(message, "floor has tables");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
