//! 远程调用错误类型

use crate::web::http::HttpError;

/// 非 2xx 且服务端未给出消息时的兜底文案
pub const FALLBACK_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 没有收到响应 (离线、DNS、CORS)。只记录日志，不提示用户
    Network(String),
    /// 服务端拒绝了请求
    Rejected { status: u16, message: String },
    /// 2xx 响应体无法解码
    Decode(String),
    /// 管理端调用时当前标签页没有密钥
    MissingAdminKey,
    /// 管理端返回 403
    InvalidAdminKey,
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApiError::Network(_) => write!(f, "network unreachable"),
            ApiError::Rejected { message, .. } => write!(f, "{}", message),
            ApiError::Decode(msg) => write!(f, "unexpected response: {}", msg),
            ApiError::MissingAdminKey => write!(f, "No admin key"),
            ApiError::InvalidAdminKey => write!(f, "Invalid admin key"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::NetworkError(msg) => ApiError::Network(msg),
            HttpError::RequestBuildFailed(msg) => ApiError::Network(msg),
            HttpError::ResponseParseFailed(msg) => ApiError::Decode(msg),
        }
    }
}

impl ApiError {
    /// 是否应该弹出提示。网络不可达时静默
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, ApiError::Network(_))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_failures_are_silent() {
        let err: ApiError = HttpError::NetworkError("Failed to fetch".into()).into();
        assert_eq!(err.to_string(), "network unreachable");
        assert!(!err.is_user_visible());
        assert!(ApiError::InvalidAdminKey.is_user_visible());
    }
}
