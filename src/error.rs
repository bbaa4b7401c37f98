use thiserror::Error;

/// HTTP 层错误
///
/// 只有两类真正的错误来源：传输失败与非 2xx 响应。
/// 编解码错误单独列出，方便日志定位。
#[derive(Debug, Error)]
pub enum HttpError {
    /// 请求体序列化失败
    #[error("请求构建失败: {0}")]
    Encode(String),
    /// 网络请求失败（连接失败、DNS、fetch 被拒绝等）
    #[error("网络错误: {0}")]
    Network(String),
    /// 服务端返回非 2xx
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    /// 响应体解析失败
    #[error("响应解析失败: {0}")]
    Decode(String),
}

impl HttpError {
    /// 对应的 HTTP 状态码（仅 `Status` 有）
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

pub type HttpResult<T> = Result<T, HttpError>;
