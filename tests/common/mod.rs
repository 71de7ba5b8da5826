#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_sessions::MemoryStore;

use travelog::config::AppConfig;
use travelog::database::Storage;
use travelog::state::AppState;

/// Build the router on memory storage with auth switched on or off.
pub fn test_app(auth: bool) -> Router {
    let mut config = AppConfig::development();
    config.auth.enabled = auth;
    config.security.bcrypt_cost = 4;
    config.api.enable_request_logging = false;
    travelog::app(AppState::new(config, Storage::memory()), MemoryStore::default())
}

/// A cookie-carrying client, one per simulated browser.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub text: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }
}

impl TestClient {
    pub fn new(router: &Router) -> Self {
        Self {
            router: router.clone(),
            cookie: None,
        }
    }

    pub fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    pub async fn send(&mut self, method: Method, uri: &str, body: Option<Value>) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("router call failed")?;

        let status = response.status();
        let headers = response.headers().clone();
        self.remember_cookie(&headers);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        Ok(TestResponse { status, headers, body, text })
    }

    fn remember_cookie(&mut self, headers: &HeaderMap) {
        for value in headers.get_all(header::SET_COOKIE) {
            let Ok(raw) = value.to_str() else { continue };
            let pair = raw.split(';').next().unwrap_or_default().trim();
            match pair.split_once('=') {
                Some((_, "")) | None => self.cookie = None,
                Some(_) => self.cookie = Some(pair.to_string()),
            }
        }
    }

    pub async fn get(&mut self, uri: &str) -> Result<TestResponse> {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&mut self, uri: &str, body: Value) -> Result<TestResponse> {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&mut self, uri: &str, body: Value) -> Result<TestResponse> {
        self.send(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&mut self, uri: &str) -> Result<TestResponse> {
        self.send(Method::DELETE, uri, None).await
    }

    pub async fn signup(&mut self, username: &str) -> Result<TestResponse> {
        self.post(
            "/signup",
            json!({
                "email": format!("{}@example.com", username),
                "username": username,
                "password": "correct-horse"
            }),
        )
        .await
    }

    /// POST /addplace and return the stored place.
    pub async fn add_place(&mut self, body: Value) -> Result<Value> {
        let res = self.post("/addplace", body).await?;
        anyhow::ensure!(res.status == StatusCode::CREATED, "add failed: {} {}", res.status, res.text);
        Ok(res.body["place"].clone())
    }
}

pub fn place(name: &str, city: &str, country: &str, experience: i64, expense: i64) -> Value {
    json!({
        "placeName": name,
        "cityName": city,
        "countryName": country,
        "arrivalDate": "2024-05-01",
        "experienceRating": experience,
        "expenseRating": expense
    })
}

pub fn eiffel_tower() -> Value {
    json!({
        "placeName": "Eiffel Tower",
        "countryName": "France",
        "arrivalDate": "2024-05-01",
        "experienceRating": 5,
        "expenseRating": 3
    })
}
