//! 请求失败的分类
//!
//! - `Transport`：网络或解码错误
//! - `Backend`：后端返回非 200 且带有 `error`/`details`
//! - `TimeLimit`：超时（TLE），单独提示

use std::fmt;

use crate::models::judge::BackendErrorBody;

/// 表示超时的结构化错误码
const TIME_LIMIT_CODES: [&str; 2] = ["TLE", "TIME_LIMIT_EXCEEDED"];

/// 旧版后端在自由文本中携带的超时标记
const LEGACY_TLE_MARKER: &str = "TLE";

/// 运行/提交失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    Transport { message: String },
    Backend { error: String, details: Option<String> },
    TimeLimit,
}

impl Failure {
    pub fn transport(message: impl Into<String>) -> Self {
        Failure::Transport {
            message: message.into(),
        }
    }

    /// 根据非 200 响应体分类
    ///
    /// 优先使用结构化 `code`；否则退回旧版行为：`error` 文本包含 "TLE" 即视为超时
    pub fn classify(body: BackendErrorBody) -> Self {
        if let Some(code) = body.code.as_deref() {
            if TIME_LIMIT_CODES.iter().any(|c| c.eq_ignore_ascii_case(code)) {
                return Failure::TimeLimit;
            }
        }

        match body.error {
            Some(error) if error.contains(LEGACY_TLE_MARKER) => Failure::TimeLimit,
            Some(error) => Failure::Backend {
                error,
                details: body.details,
            },
            None => Failure::Backend {
                error: "Unknown error".to_string(),
                details: body.details,
            },
        }
    }

    /// 输出面板中显示的文本
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Transport { message } => write!(f, "Error: {}", message),
            Failure::Backend {
                error,
                details: Some(details),
            } => write!(f, "Error: {}\nDetails: {}", error, details),
            Failure::Backend { error, details: None } => write!(f, "Error: {}", error),
            Failure::TimeLimit => write!(f, "Error: Time Limit Exceeded"),
        }
    }
}

impl std::error::Error for Failure {}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(error: Option<&str>, details: Option<&str>, code: Option<&str>) -> BackendErrorBody {
        BackendErrorBody {
            error: error.map(str::to_string),
            details: details.map(str::to_string),
            code: code.map(str::to_string),
        }
    }

    #[test]
    fn test_legacy_tle_substring() {
        let failure = Failure::classify(body(Some("Something TLE happened"), None, None));
        assert_eq!(failure, Failure::TimeLimit);
        assert_eq!(failure.render(), "Error: Time Limit Exceeded");
    }

    #[test]
    fn test_structured_tle_code() {
        let failure = Failure::classify(body(Some("killed"), None, Some("time_limit_exceeded")));
        assert_eq!(failure, Failure::TimeLimit);
    }

    #[test]
    fn test_backend_failure_with_details() {
        let failure = Failure::classify(body(
            Some("Compilation failed"),
            Some("main.cpp:1: error"),
            Some("COMPILE_ERROR"),
        ));
        assert_eq!(
            failure.render(),
            "Error: Compilation failed\nDetails: main.cpp:1: error"
        );
    }

    #[test]
    fn test_backend_failure_without_error_text() {
        let failure = Failure::classify(BackendErrorBody::default());
        assert_eq!(failure.render(), "Error: Unknown error");
    }

    #[test]
    fn test_transport_failure() {
        assert_eq!(
            Failure::transport("network down").render(),
            "Error: network down"
        );
    }
}
