use thiserror::Error;

/// 应用程序错误类型
///
/// 错误分类：
/// - 网络/传输层失败（reqwest）
/// - 服务端返回的业务错误（响应体中携带 detail 信息）
/// - 用户输入错误（命令或字段无法解析）
/// - 配置错误
#[derive(Debug, Error)]
pub enum AppError {
    /// 网络请求失败
    #[error("网络请求失败: {0}")]
    Transport(#[from] reqwest::Error),

    /// 服务端返回错误响应
    ///
    /// `detail` 为服务端在响应体中携带的错误信息（若有）
    #[error("服务端错误 (HTTP {status}): {}", .detail.as_deref().unwrap_or("无详细信息"))]
    Api { status: u16, detail: Option<String> },

    /// 用户输入错误
    #[error("{0}")]
    Input(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 正则表达式错误
    #[error("正则表达式错误: {0}")]
    Pattern(#[from] regex::Error),
}

impl AppError {
    /// 提取服务端返回的错误信息（仅 Api 错误且携带 detail 时返回）
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            AppError::Api {
                detail: Some(detail),
                ..
            } => Some(detail),
            _ => None,
        }
    }
}

/// 应用程序结果类型
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_shows_server_detail() {
        let err = AppError::Api {
            status: 400,
            detail: Some("Job title is required".to_string()),
        };
        assert_eq!(err.server_detail(), Some("Job title is required"));
        assert!(err.to_string().contains("Job title is required"));
        assert!(err.to_string().contains("400"));
    }

    #[test]
    fn api_error_without_detail_has_fallback_text() {
        let err = AppError::Api {
            status: 502,
            detail: None,
        };
        assert_eq!(err.server_detail(), None);
        assert!(err.to_string().contains("无详细信息"));
    }

    #[test]
    fn input_error_is_not_a_server_detail() {
        let err = AppError::Input("未知命令".to_string());
        assert_eq!(err.server_detail(), None);
    }
}
