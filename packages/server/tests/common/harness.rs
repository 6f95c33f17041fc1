//! Test harness driving the HTTP app in-process.
//!
//! Requests go through the full router (session layer, routes, error
//! mapping) with `tower::ServiceExt::oneshot`; no socket is opened. The harness
//! keeps the session cookie like a browser would.

use std::sync::Mutex;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use portal_core::kernel::test_dependencies::MockBenefitSubmitter;
use portal_core::kernel::{session_layer, TestDependencies};
use portal_core::server::build_app;
use serde_json::Value;
use test_context::AsyncTestContext;
use tower::ServiceExt;

use super::fixtures::now;

/// Response as seen by a test
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Value,
}

/// Test harness that owns an app built from mock dependencies.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &mut TestHarness) {
///     let response = ctx.get("/health").await;
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    pub deps: TestDependencies,
    app: Router,
    cookie: Mutex<Option<String>>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        Self::new(TestDependencies::new(now()))
    }

    async fn teardown(self) {}
}

impl TestHarness {
    pub fn new(deps: TestDependencies) -> Self {
        let sessions = session_layer(chrono::Duration::hours(24), false);
        let app = build_app(deps.server_deps(), sessions, &[]);
        Self {
            deps,
            app,
            cookie: Mutex::new(None),
        }
    }

    /// Harness whose submissions go to `submitter`
    pub fn with_submitter(submitter: MockBenefitSubmitter) -> Self {
        Self::new(TestDependencies::new(now()).with_submitter(submitter))
    }

    /// Forget the session cookie, as a new browser would
    pub fn drop_cookie(&self) {
        *self.cookie.lock().unwrap() = None;
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await.unwrap()
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await.unwrap()
    }

    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PATCH, uri, Some(body)).await.unwrap()
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await.unwrap()
    }

    /// Starts an application in `flow_root` seeded with `seed`; returns its id
    pub async fn start(&self, flow_root: &str, seed: Value) -> String {
        let response = self.post(&format!("/en/{}/start", flow_root), seed).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        let location = response.location.expect("start redirects");
        let prefix = format!("/en/{}/", flow_root);
        location
            .strip_prefix(&prefix)
            .and_then(|rest| rest.strip_suffix("/terms-and-conditions"))
            .expect("start redirects to the terms page")
            .to_string()
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = self.cookie.lock().unwrap().clone() {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .context("router failed")?;

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie
                .to_str()?
                .split(';')
                .next()
                .unwrap_or_default()
                .to_string();
            *self.cookie.lock().unwrap() = Some(pair);
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        Ok(TestResponse {
            status,
            location,
            body,
        })
    }
}
