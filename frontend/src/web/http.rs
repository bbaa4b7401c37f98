//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现核心库的 `HttpTransport`。

use userdesk::{HttpError, HttpRequest, HttpResponse, HttpResult, HttpTransport};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// 基于 fetch 的传输层
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

/// 读取响应体文本
async fn read_text(response: &Response) -> HttpResult<String> {
    let promise = response
        .text()
        .map_err(|e| HttpError::Decode(format!("{:?}", e)))?;

    let text = JsFuture::from(promise)
        .await
        .map_err(|e| HttpError::Decode(format!("{:?}", e)))?;

    text.as_string()
        .ok_or_else(|| HttpError::Decode("无法转换为字符串".to_string()))
}

#[async_trait::async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> HttpResult<HttpResponse> {
        let headers = Headers::new()
            .map_err(|e| HttpError::Encode(format!("创建 Headers 失败: {:?}", e)))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::Encode(format!("设置 Header 失败: {:?}", e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| HttpError::Encode(format!("{:?}", e)))?;

        let window = web_sys::window()
            .ok_or_else(|| HttpError::Network("无法获取 window 对象".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| HttpError::Network(format!("{:?}", e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| HttpError::Decode(format!("Response 类型转换失败: {:?}", e)))?;

        let body = read_text(&response).await?;
        Ok(HttpResponse::new(response.status(), body))
    }
}
