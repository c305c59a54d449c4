use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{json, Value};
use lending_desk::core::clock::FixedClock;
use lending_desk::core::domain::Configuration;
use lending_desk::core::library::LibraryError;
use lending_desk::desk::factory::create_lending_desk_with_clock;
use lending_desk::desk::LendingDesk;
use lending_desk::desk::search::SearchOutcome;

// the last borrow record posted to the fake backend
type Posted = Arc<Mutex<Option<Value>>>;

fn gatsby() -> Value {
    json!({"id": 10, "title": "The Great Gatsby", "category": "Fiction", "publishingYear": 1925,
           "isbn": "978-0-7432-7356-5", "totalCopies": 5, "availableCopies": 4,
           "author": {"id": 1, "name": "F. Scott Fitzgerald", "nationality": "American"}})
}

fn jack() -> Value {
    json!({"id": 20, "name": "Jack Smith", "email": "jack@email.com", "phone": "+1-555-0101",
           "address": "123 Main St, New York, NY 10001"})
}

fn lent_record() -> Value {
    json!({"id": 30, "book": gatsby(), "member": jack(), "borrowDate": "2024-05-31",
           "dueDate": "2024-06-14", "returnDate": null, "status": "BORROWED"})
}

async fn list_books() -> Json<Value> {
    Json(json!([gatsby()]))
}

async fn list_authors() -> Json<Value> {
    Json(json!([{"id": 1, "name": "F. Scott Fitzgerald", "biography": null, "nationality": "American"}]))
}

async fn list_members() -> Json<Value> {
    Json(json!([jack()]))
}

async fn list_records() -> Json<Value> {
    Json(json!([lent_record()]))
}

async fn create_record(State(posted): State<Posted>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut saved = body.clone();
    saved["id"] = json!(101);
    if let Ok(mut last) = posted.lock() {
        *last = Some(body);
    }
    (StatusCode::CREATED, Json(saved))
}

async fn return_record(State(posted): State<Posted>, Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    let last = posted.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?.clone();
    match (id.as_str(), last) {
        ("101", Some(mut record)) => {
            record["id"] = json!(101);
            record["returnDate"] = json!("2024-06-10");
            record["status"] = json!("RETURNED");
            Ok(Json(record))
        }
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn search_records(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let query = params.get("q").map(|q| q.to_lowercase()).unwrap_or_default();
    if "the great gatsby".contains(query.as_str()) {
        Json(json!([lent_record()]))
    } else {
        Json(json!([]))
    }
}

async fn fail_delete(Path(_id): Path<String>) -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}

fn start_backend() -> (SocketAddr, Posted) {
    let posted: Posted = Arc::new(Mutex::new(None));
    let app = Router::new()
        .route("/api/books", get(list_books))
        .route("/api/books/:id", delete(fail_delete))
        .route("/api/authors", get(list_authors))
        .route("/api/members", get(list_members))
        .route("/api/borrowed-books", get(list_records).post(create_record))
        .route("/api/borrowed-books/search", get(search_records))
        .route("/api/borrowed-books/:id/return", put(return_record))
        .with_state(posted.clone());
    let addr: SocketAddr = "127.0.0.1:0".parse().expect("valid address");
    let server = axum::Server::bind(&addr).serve(app.into_make_service());
    let local = server.local_addr();
    tokio::spawn(server);
    (local, posted)
}

async fn synced_desk(addr: SocketAddr) -> LendingDesk {
    let today = NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date");
    let config = Configuration::new(format!("http://{}/api", addr).as_str());
    let mut desk = create_lending_desk_with_clock(&config, Arc::new(FixedClock::new(today)))
        .expect("should create desk");
    assert!(desk.sync_all().await.expect("should sync"));
    desk
}

#[tokio::test]
async fn test_should_sync_backend_payloads() {
    let (addr, _) = start_backend();
    let desk = synced_desk(addr).await;
    let book = desk.store().book("10").expect("should load numeric book id");
    assert_eq!("1", book.author_id.as_str());
    assert_eq!(4, book.available_copies);
    let record = desk.store().borrow_record("30").expect("should load record");
    assert_eq!("20", record.member_id.as_str());
    assert_eq!(1, desk.summary().active_borrowings);
}

#[tokio::test]
async fn test_should_push_borrow_and_return() {
    let (addr, posted) = start_backend();
    let mut desk = synced_desk(addr).await;

    let saved = desk.borrow("10", "20", None, None).await.expect("should borrow");
    assert_eq!("101", saved.id.as_str());
    assert_eq!(NaiveDate::from_ymd_opt(2024, 6, 24), Some(saved.due_date));
    assert_eq!(Some(3), desk.store().book("10").map(|b| b.available_copies));
    assert_eq!(2, desk.store().borrow_records().len());

    let body = posted.lock().expect("lock").clone().expect("should have posted a record");
    assert!(body.get("id").is_none());
    assert_eq!("10", body["book"]["id"]);
    assert_eq!("2024-06-10", body["borrowDate"]);
    assert_eq!("BORROWED", body["status"]);

    let returned = desk.return_book("101").await.expect("should return");
    assert_eq!(NaiveDate::from_ymd_opt(2024, 6, 10), returned.return_date);
    assert_eq!(Some(4), desk.store().book("10").map(|b| b.available_copies));
}

#[tokio::test]
async fn test_should_post_status_derived_from_desk_clock() {
    let (addr, posted) = start_backend();
    let mut desk = synced_desk(addr).await;

    // by the wall clock both loans are long overdue
    let borrowed = NaiveDate::from_ymd_opt(2024, 6, 1);
    let due = NaiveDate::from_ymd_opt(2024, 6, 14);
    desk.borrow("10", "20", borrowed, due).await.expect("should borrow");
    let body = posted.lock().expect("lock").clone().expect("should have posted a record");
    assert_eq!("BORROWED", body["status"]);

    let due = NaiveDate::from_ymd_opt(2024, 6, 5);
    desk.borrow("10", "20", borrowed, due).await.expect("should borrow");
    let body = posted.lock().expect("lock").clone().expect("should have posted a record");
    assert_eq!("OVERDUE", body["status"]);
}

#[tokio::test]
async fn test_should_map_backend_failure_and_keep_store() {
    let (addr, _) = start_backend();
    let mut desk = synced_desk(addr).await;
    let res = desk.delete_book("10").await;
    assert!(matches!(res, Err(LibraryError::Remote { retryable: true, .. })));
    assert!(desk.store().book("10").is_some());
}

#[tokio::test]
async fn test_should_search_through_backend() {
    let (addr, _) = start_backend();
    let desk = synced_desk(addr).await;
    let search = desk.record_search();
    assert!(matches!(search.search("gatsby").await, Ok(SearchOutcome::Results(ref r)) if r.len() == 1));
    assert!(matches!(search.search("orwell").await, Ok(SearchOutcome::Results(ref r)) if r.is_empty()));
}
