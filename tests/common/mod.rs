use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use kalakruti_inventory::{
    build_app, dtos::product::ProductResponse, repository::MemoryProductRepository,
    uploads::FileStore, AppState,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "----kalakruti-test-boundary";

/// Builds a `multipart/form-data` request body by hand.
#[derive(Default)]
pub struct Form {
    body: Vec<u8>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

/// A complete create form for `code`.
pub fn product_form(code: &str) -> Form {
    Form::new()
        .text("name", "Warli Wall Hanging")
        .text("description", "Hand-painted on bamboo")
        .text("code", code)
        .text("selling_price", "749.5")
        .text("cost_price", "420")
        .text("quantity", "8")
}

/// Router over an in-memory store and a throwaway upload directory.
pub struct TestApp {
    router: Router,
    pub uploads: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let uploads = tempfile::tempdir().expect("create upload dir");
        let state = AppState::new(
            Arc::new(MemoryProductRepository::new()),
            FileStore::new(uploads.path(), "/uploads"),
        );
        Self {
            router: build_app(state),
            uploads,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, form: Option<Form>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match form {
            Some(form) => {
                builder = builder.header(
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                );
                Body::from(form.finish())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).expect("failed to build request"))
            .await
            .expect("router error during test request")
    }

    pub async fn request_json(&self, method: Method, uri: &str, body: Value) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("serialize json body")))
            .expect("failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Method::GET, uri, None).await
    }

    pub async fn create(&self, form: Form) -> Response {
        self.request(Method::POST, "/create_product", Some(form)).await
    }

    pub async fn create_ok(&self, form: Form) -> ProductResponse {
        let body = expect_json(self.create(form).await, StatusCode::CREATED).await;
        serde_json::from_value(body).expect("product json")
    }

    pub fn upload_count(&self) -> usize {
        std::fs::read_dir(self.uploads.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body")
        .to_vec()
}

pub async fn json_body(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("response is json")
}

pub async fn expect_json(response: Response, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    json_body(response).await
}
