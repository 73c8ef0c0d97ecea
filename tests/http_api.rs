//! End-to-end HTTP tests driving the router with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bandstand::adapters::clock::FixedClock;
use bandstand::adapters::http::{api_router, ApiServices};
use bandstand::adapters::identity::StaticIdentityProvider;
use bandstand::adapters::memory::InMemoryDocumentStore;
use bandstand::domain::foundation::Timestamp;
use bandstand::ports::{DocumentStore, IdentityProvider, QueryCapabilities};

const MUSICIAN: &str = "tok-musician";
const VENUE: &str = "tok-venue";
const OUTSIDER: &str = "tok-outsider";

struct TestApp {
    router: Router,
    clock: FixedClock,
}

impl TestApp {
    fn new() -> Self {
        let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::with_capabilities(
            QueryCapabilities::restricted(),
        ));
        let clock = FixedClock::new(Timestamp::parse_iso("2024-05-01T12:00:00Z").unwrap());
        let identity: Arc<dyn IdentityProvider> = Arc::new(
            StaticIdentityProvider::from_entries([
                "tok-musician:user-m:musician",
                "tok-venue:user-v:venue",
                "tok-outsider:user-x:musician",
            ])
            .unwrap(),
        );
        let services = ApiServices::over_store(store, Arc::new(clock.clone()), 3);
        Self {
            router: api_router(services, identity),
            clock,
        }
    }

    async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::POST, uri, Some(token), Some(body)).await
    }

    async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.call(Method::GET, uri, Some(token), None).await
    }

    /// Creates both profiles and returns `(musician_id, venue_id)`.
    async fn with_profiles(&self) -> (String, String) {
        let (status, musician) = self
            .post(
                "/api/musicians",
                MUSICIAN,
                json!({
                    "name": "June Holloway",
                    "genre": ["Americana"],
                    "bio": "Singer-songwriter with a pedal steel player and a very patient drummer.",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{musician}");

        let (status, venue) = self
            .post(
                "/api/venues",
                VENUE,
                json!({
                    "name": "The Saltbox",
                    "venueType": "Bar",
                    "description": "Old cannery turned bar, stage in the corner, fish on Fridays.",
                    "location": {
                        "address": "3 Wharf Rd",
                        "city": "Portland",
                        "state": "ME",
                        "zipCode": "04101"
                    },
                    "capacity": 150,
                    "amenities": ["Stage", "Sound System"],
                    "paymentTerms": { "guaranteedAmount": 300 }
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{venue}");

        (
            musician["id"].as_str().unwrap().to_string(),
            venue["id"].as_str().unwrap().to_string(),
        )
    }

    async fn propose(&self, musician_id: &str, venue_id: &str) -> String {
        let (status, booking) = self
            .post(
                "/api/bookings",
                MUSICIAN,
                json!({
                    "musicianId": musician_id,
                    "venueId": venue_id,
                    "proposedDates": ["2024-07-04T20:00:00Z", "2024-07-05T20:00:00Z"]
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{booking}");
        assert_eq!(booking["status"], "pending");
        assert_eq!(booking["initiatedBy"], "musician");
        booking["id"].as_str().unwrap().to_string()
    }
}

fn accept_body() -> Value {
    json!({
        "confirmedDate": "2024-07-05T20:00:00Z",
        "startTime": "21:00",
        "endTime": "23:30"
    })
}

#[tokio::test]
async fn health_needs_no_credentials() {
    let app = TestApp::new();
    let (status, _) = app.call(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn api_requires_a_valid_token() {
    let app = TestApp::new();

    let (status, body) = app.call(Method::GET, "/api/bookings", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = app.get("/api/bookings", "not-a-token").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_creation_and_lookup() {
    let app = TestApp::new();
    let (musician_id, venue_id) = app.with_profiles().await;

    let (status, me) = app.get("/api/musicians/me", MUSICIAN).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], musician_id.as_str());
    assert_eq!(me["eloRating"], 1000);

    let (status, venue) = app.get(&format!("/api/venues/{}", venue_id), MUSICIAN).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(venue["capacity"], 150);

    let (status, _) = app.get("/api/venues/me", MUSICIAN).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .post("/api/musicians", MUSICIAN, json!({ "name": "Again", "bio": "x".repeat(60) }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "PROFILE_ALREADY_EXISTS");

    let (status, body) = app
        .post("/api/musicians", OUTSIDER, json!({ "name": "No Bio" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn booking_lifecycle_over_http() {
    let app = TestApp::new();
    let (musician_id, venue_id) = app.with_profiles().await;
    let id = app.propose(&musician_id, &venue_id).await;

    let (status, _) = app.get(&format!("/api/bookings/{}", id), OUTSIDER).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .post(
            &format!("/api/bookings/{}/accept", id),
            VENUE,
            json!({ "confirmedDate": "2024-07-06T20:00:00Z", "startTime": "21:00", "endTime": "23:00" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_DATE");

    let (status, accepted) = app
        .post(&format!("/api/bookings/{}/accept", id), VENUE, accept_body())
        .await;
    assert_eq!(status, StatusCode::OK, "{accepted}");
    assert_eq!(accepted["status"], "accepted");
    assert_eq!(accepted["startTime"], "21:00");

    let (status, body) = app
        .post(&format!("/api/bookings/{}/accept", id), VENUE, accept_body())
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_STATE_TRANSITION");

    let (status, body) = app
        .post(&format!("/api/bookings/{}/complete", id), MUSICIAN, json!({}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "PREMATURE_COMPLETION");

    app.clock
        .set(Timestamp::parse_iso("2024-07-06T09:00:00Z").unwrap());
    let (status, done) = app
        .post(&format!("/api/bookings/{}/complete", id), MUSICIAN, json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(done["status"], "completed");

    let (status, thread) = app
        .post(
            &format!("/api/bookings/{}/messages", id),
            VENUE,
            json!({ "message": "Great night, come back in the fall." }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(thread["messageHistory"][0]["senderId"], "user-v");

    let (status, list) = app.get("/api/bookings?status=completed", VENUE).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);

    let (status, list) = app.get("/api/bookings?status=pending", VENUE).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn reject_without_body_and_unknown_booking() {
    let app = TestApp::new();
    let (musician_id, venue_id) = app.with_profiles().await;
    let id = app.propose(&musician_id, &venue_id).await;

    let (status, rejected) = app
        .call(
            Method::POST,
            &format!("/api/bookings/{}/reject", id),
            Some(VENUE),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{rejected}");
    assert_eq!(rejected["status"], "rejected");

    let (status, body) = app
        .get(
            "/api/bookings/6f9c1f5e-2d3b-4c39-9a59-0d3c1b2f7e11",
            VENUE,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "BOOKING_NOT_FOUND");
}

#[tokio::test]
async fn search_venues_over_http() {
    let app = TestApp::new();
    app.with_profiles().await;

    let (status, body) = app
        .post(
            "/api/venues/search",
            MUSICIAN,
            json!({
                "city": "Portland",
                "capacity": { "min": 100, "max": 200 },
                "amenities": ["stage", "bar"],
                "sortBy": "capacity",
                "sortDirection": "desc"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["total"], 1);
    assert_eq!(body["venues"][0]["name"], "The Saltbox");

    let (status, body) = app
        .post(
            "/api/venues/search",
            MUSICIAN,
            json!({ "capacity": { "min": 300, "max": 100 } }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}
