use async_trait::async_trait;
use storerate_shared::HttpMethod;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
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

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure below HTTP: DNS, CORS, connection reset, aborted fetch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

/// HTTP 客户端特性 (Trait)
///
/// (?Send) because browser futures hold `JsValue`s, which are not `Send`.
#[async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// =========================================================
// 测试实现: scripted client
// =========================================================

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Responder = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError>>;

    /// Records every request and answers through a closure.
    #[derive(Clone)]
    pub struct MockHttpClient {
        log: Rc<RefCell<Vec<HttpRequest>>>,
        responder: Rc<Responder>,
    }

    impl MockHttpClient {
        pub fn new(
            responder: impl Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + 'static,
        ) -> Self {
            Self {
                log: Rc::new(RefCell::new(Vec::new())),
                responder: Rc::new(Box::new(responder)),
            }
        }

        /// Answers every request with the same status and body.
        pub fn fixed(status: u16, body: &'static str) -> Self {
            Self::new(move |_| Ok(HttpResponse::new(status, body)))
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.log.borrow().clone()
        }

        /// `"METHOD url"` for each request, in order.
        pub fn calls(&self) -> Vec<String> {
            self.log
                .borrow()
                .iter()
                .map(|r| format!("{} {}", r.method.as_str(), r.url))
                .collect()
        }
    }

    #[async_trait(?Send)]
    impl HttpClient for MockHttpClient {
        async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.log.borrow_mut().push(req.clone());
            (self.responder)(&req)
        }
    }
}
