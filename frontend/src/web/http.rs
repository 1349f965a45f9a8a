//! HTTP 请求封装模块
//!
//! `web_sys::fetch` behind the core [`HttpClient`] trait.

use async_trait::async_trait;
use storerate::request::{HttpClient, HttpRequest, HttpResponse, TransportError};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// Browser transport. Stateless, so every clone is the same client.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

fn js_error(context: &str, err: JsValue) -> TransportError {
    let detail = err
        .as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", err));
    TransportError(format!("{}: {}", context, detail))
}

impl FetchHttpClient {
    fn build(req: &HttpRequest) -> Result<Request, TransportError> {
        let headers = Headers::new().map_err(|e| js_error("create headers", e))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| js_error("set header", e))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        Request::new_with_str_and_init(&req.url, &opts).map_err(|e| js_error("build request", e))
    }

    async fn read_text(response: &Response) -> Result<String, TransportError> {
        let promise = response.text().map_err(|e| js_error("read body", e))?;
        let text = JsFuture::from(promise)
            .await
            .map_err(|e| js_error("read body", e))?;
        Ok(text.as_string().unwrap_or_default())
    }
}

#[async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let request = Self::build(&req)?;

        let window =
            web_sys::window().ok_or_else(|| TransportError("no window object".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_error("fetch", e))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| js_error("fetch returned a non-Response", e))?;

        let body = Self::read_text(&response).await?;
        Ok(HttpResponse::new(response.status(), body))
    }
}
