//! In-process stand-in for the HR REST API.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use hrdesk::client::HrClient;

/// Canned responses plus a record of what the client sent.
#[derive(Default)]
pub struct MockState {
    pub payroll: Vec<Value>,
    pub users: Vec<Value>,
    /// When set, goal updates answer with this status and body.
    pub goal_failure: Option<(StatusCode, String)>,
    pub goal_updates: Mutex<Vec<(i64, Value)>>,
    pub payroll_requests: Mutex<usize>,
    pub user_requests: Mutex<usize>,
    pub auth_headers: Mutex<Vec<String>>,
}

impl MockState {
    pub fn goal_updates(&self) -> Vec<(i64, Value)> {
        self.goal_updates.lock().unwrap().clone()
    }

    pub fn payroll_requests(&self) -> usize {
        *self.payroll_requests.lock().unwrap()
    }

    pub fn user_requests(&self) -> usize {
        *self.user_requests.lock().unwrap()
    }
}

pub struct MockApi {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockApi {
    pub fn client(&self) -> HrClient {
        HrClient::new(self.base_url.clone(), None)
    }
}

fn record_auth(state: &MockState, headers: &HeaderMap) {
    if let Some(value) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        state.auth_headers.lock().unwrap().push(value.to_string());
    }
}

async fn update_goal(
    State(state): State<Arc<MockState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record_auth(&state, &headers);
    state.goal_updates.lock().unwrap().push((id, body.clone()));
    if let Some((status, failure)) = &state.goal_failure {
        return (*status, failure.clone()).into_response();
    }
    Json(json!({
        "id": id,
        "title": "Ship the onboarding revamp",
        "priority": "high",
        "progress": body["progress"],
        "status": body["status"],
        "notes": body["notes"],
    }))
    .into_response()
}

async fn list_payroll(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Json<Value> {
    record_auth(&state, &headers);
    *state.payroll_requests.lock().unwrap() += 1;
    Json(Value::Array(state.payroll.clone()))
}

async fn list_users(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Json<Value> {
    record_auth(&state, &headers);
    *state.user_requests.lock().unwrap() += 1;
    Json(json!({ "users": state.users }))
}

/// Serve the mock on an ephemeral localhost port.
pub async fn spawn(state: MockState) -> MockApi {
    let state = Arc::new(state);
    let app = Router::new()
        .route("/api/performance-goals/{id}", put(update_goal))
        .route("/api/payroll", get(list_payroll))
        .route("/api/users", get(list_users))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock API");
    let addr = listener.local_addr().expect("Mock API has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock API crashed");
    });

    MockApi {
        base_url: format!("http://{}", addr),
        state,
    }
}

pub fn payroll_json(id: i64, employee_id: i64, first: &str, month: u32, year: i32) -> Value {
    json!({
        "id": id,
        "employeeId": employee_id,
        "employee": { "firstName": first, "lastName": "Tester", "employeeId": format!("EMP{:03}", employee_id) },
        "month": month,
        "year": year,
        "netSalary": 42000.5,
        "generatedAt": "2026-03-31T09:00:00Z",
    })
}

pub fn user_json(id: i64, first: &str, role: &str) -> Value {
    json!({
        "id": id,
        "firstName": first,
        "lastName": "Tester",
        "employeeId": format!("EMP{:03}", id),
        "role": role,
    })
}
