//! HTTP 客户端配置
//!
//! `ApiClient` 是一个显式注入的客户端实例，自带 base URL 和 Bearer 凭据，
//! 不存在进程级的全局默认头。真正的网络收发通过 `HttpTransport` 抽象，
//! 浏览器端用 fetch，原生端用 reqwest，测试中用内存 Mock。

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use userdesk_shared::protocol::{ApiRequest, HttpMethod};
use userdesk_shared::{HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, bearer};

use crate::error::{HttpError, HttpResult};

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 检查响应是否成功 (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 解析 JSON 响应体；空响应体按 `null` 处理（204 No Content）
    pub fn json<T: DeserializeOwned>(&self) -> HttpResult<T> {
        let body = self.body.trim();
        let body = if body.is_empty() { "null" } else { body };
        serde_json::from_str(body).map_err(|e| HttpError::Decode(e.to_string()))
    }

    /// 从错误响应中提取可读信息
    ///
    /// 后端的错误体形如 `{"error": "..."}` 或 `{"message": "..."}`。
    pub fn error_message(&self) -> String {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&self.body) {
            for key in ["error", "message"] {
                if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                    return msg.to_string();
                }
            }
        }
        let body = self.body.trim();
        if body.is_empty() {
            format!("请求失败 ({})", self.status)
        } else {
            body.to_string()
        }
    }
}

/// HTTP 传输层特性 (Trait)
///
/// (?Send) 是因为浏览器环境下 fetch 的 Future 不是 Send 的。
#[async_trait::async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, req: HttpRequest) -> HttpResult<HttpResponse>;
}

// =========================================================
// API 客户端
// =========================================================

/// 携带自身配置的 API 客户端
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    bearer: Option<String>,
    transport: Rc<dyn HttpTransport>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.bearer.is_some())
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Rc<dyn HttpTransport>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            bearer: None,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 之后的请求都会附带 `Authorization: Bearer <token>`
    pub fn set_bearer(&mut self, token: impl Into<String>) {
        self.bearer = Some(token.into());
    }

    pub fn clear_bearer(&mut self) {
        self.bearer = None;
    }

    /// 当前的 `Authorization` 头值
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_deref().map(bearer)
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 根据协议元数据构建请求
    pub fn build<R: ApiRequest>(&self, req: &R) -> HttpResult<HttpRequest> {
        let mut request = HttpRequest::new(&self.url(&req.path()), R::METHOD);

        if let Some(auth) = self.authorization() {
            request = request.with_header(HEADER_AUTHORIZATION, &auth);
        }

        if req.has_body() {
            let body = serde_json::to_string(req).map_err(|e| HttpError::Encode(e.to_string()))?;
            request = request
                .with_header(HEADER_CONTENT_TYPE, "application/json")
                .with_body(body);
        }

        Ok(request)
    }

    /// 发送 API 请求，只检查状态码，不解析响应体
    pub async fn execute<R: ApiRequest>(&self, req: &R) -> HttpResult<HttpResponse> {
        let request = self.build(req)?;
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(HttpError::Status {
                status: response.status,
                message: response.error_message(),
            });
        }

        Ok(response)
    }

    /// 发送 API 请求并解析响应
    pub async fn call<R: ApiRequest>(&self, req: &R) -> HttpResult<R::Response> {
        self.execute(req).await?.json()
    }
}

// =========================================================
// 实现层: reqwest 客户端 (Native)
// =========================================================

#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait::async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, req: HttpRequest) -> HttpResult<HttpResponse> {
        let method = match req.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
        };

        let mut builder = self.client.request(method, &req.url);

        for (k, v) in req.headers {
            builder = builder.header(k, v);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| HttpError::Decode(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use userdesk_shared::protocol::{DeleteUserRequest, GetUserRequest, LoginRequest};

    /// 按顺序回放预设响应，并记录所有收到的请求
    #[derive(Default)]
    pub(crate) struct MockTransport {
        pub(crate) requests: RefCell<Vec<HttpRequest>>,
        replies: RefCell<VecDeque<HttpResult<HttpResponse>>>,
    }

    impl MockTransport {
        pub(crate) fn new() -> Rc<Self> {
            Rc::new(Self::default())
        }

        pub(crate) fn reply(&self, status: u16, body: &str) {
            self.replies
                .borrow_mut()
                .push_back(Ok(HttpResponse::new(status, body)));
        }

        pub(crate) fn fail(&self, message: &str) {
            self.replies
                .borrow_mut()
                .push_back(Err(HttpError::Network(message.to_string())));
        }

        pub(crate) fn last(&self) -> HttpRequest {
            self.requests.borrow().last().cloned().expect("no request sent")
        }
    }

    #[async_trait::async_trait(?Send)]
    impl HttpTransport for MockTransport {
        async fn send(&self, req: HttpRequest) -> HttpResult<HttpResponse> {
            self.requests.borrow_mut().push(req);
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(HttpError::Network("no reply queued".into())))
        }
    }

    fn login() -> LoginRequest {
        LoginRequest {
            username: "alice".into(),
            password: "pw".into(),
        }
    }

    #[test]
    fn base_url_is_trimmed_and_joined() {
        let client = ApiClient::new("http://localhost:8080/", MockTransport::new());
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/api/v1/login"), "http://localhost:8080/api/v1/login");
        assert_eq!(client.url("health"), "http://localhost:8080/health");
    }

    #[test]
    fn bearer_is_attached_only_when_set() {
        let mut client = ApiClient::new("http://api", MockTransport::new());
        let req = client.build(&GetUserRequest { id: 1 }).unwrap();
        assert_eq!(req.header(HEADER_AUTHORIZATION), None);
        assert_eq!(req.body, None);

        client.set_bearer("abc");
        assert_eq!(client.authorization().as_deref(), Some("Bearer abc"));
        let req = client.build(&GetUserRequest { id: 1 }).unwrap();
        assert_eq!(req.url, "http://api/api/v1/users/1");
        assert_eq!(req.header(HEADER_AUTHORIZATION), Some("Bearer abc"));

        client.clear_bearer();
        assert_eq!(client.authorization(), None);
    }

    #[test]
    fn post_carries_json_body() {
        let client = ApiClient::new("http://api", MockTransport::new());
        let req = client.build(&login()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.header(HEADER_CONTENT_TYPE), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"username": "alice", "password": "pw"}));
    }

    #[tokio::test]
    async fn call_decodes_success() {
        let transport = MockTransport::new();
        transport.reply(200, r#"{"token":"abc"}"#);
        let client = ApiClient::new("http://api", transport.clone());

        let resp = client.call(&login()).await.unwrap();
        assert_eq!(resp.token, "abc");
        assert_eq!(transport.last().url, "http://api/api/v1/login");
    }

    #[tokio::test]
    async fn call_maps_error_status_with_server_message() {
        let transport = MockTransport::new();
        transport.reply(401, r#"{"message":"invalid credentials"}"#);
        let client = ApiClient::new("http://api", transport);

        let err = client.call(&login()).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "HTTP 401: invalid credentials");
    }

    #[tokio::test]
    async fn call_accepts_empty_no_content_body() {
        let transport = MockTransport::new();
        transport.reply(204, "");
        let client = ApiClient::new("http://api", transport.clone());

        client.call(&DeleteUserRequest { id: 5 }).await.unwrap();
        assert_eq!(transport.last().method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn execute_ignores_body_shape() {
        let transport = MockTransport::new();
        transport.reply(200, "<html>oops</html>");
        transport.reply(403, r#"{"error":"forbidden"}"#);
        let client = ApiClient::new("http://api", transport);

        let resp = client.execute(&login()).await.unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(client.execute(&login()).await.unwrap_err().status(), Some(403));
    }

    #[tokio::test]
    async fn call_reports_undecodable_body() {
        let transport = MockTransport::new();
        transport.reply(200, "<html>oops</html>");
        let client = ApiClient::new("http://api", transport);

        assert!(matches!(
            client.call(&login()).await,
            Err(HttpError::Decode(_))
        ));
    }

    #[test]
    fn error_message_fallbacks() {
        assert_eq!(
            HttpResponse::new(400, r#"{"error":"Invalid request body"}"#).error_message(),
            "Invalid request body"
        );
        assert_eq!(HttpResponse::new(502, "Bad Gateway").error_message(), "Bad Gateway");
        assert_eq!(HttpResponse::new(500, "").error_message(), "请求失败 (500)");
    }
}
