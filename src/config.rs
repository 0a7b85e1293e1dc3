use std::str::FromStr;

use tracing::warn;

use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 判题后端地址
    pub api_base_url: String,
    /// 本地代码存储文件
    pub store_path: String,
    /// 输出日志文件
    pub output_log_file: String,
    /// HTTP 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 视口宽度（像素），用于限制分栏宽度
    pub viewport_width: u32,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 预设用户名，跳过启动时的询问
    pub user_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://web-prograder-backend.onrender.com".to_string(),
            store_path: "practice_store.toml".to_string(),
            output_log_file: "output.txt".to_string(),
            request_timeout_secs: 30,
            viewport_width: 1280,
            verbose_logging: false,
            user_name: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("API_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(default.api_base_url),
            store_path: std::env::var("STORE_PATH").unwrap_or(default.store_path),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", default.request_timeout_secs),
            viewport_width: parse_env("VIEWPORT_WIDTH", default.viewport_width),
            verbose_logging: parse_env("VERBOSE_LOGGING", default.verbose_logging),
            user_name: std::env::var("USER_NAME").ok().filter(|v| !v.trim().is_empty()),
        }
    }
}

/// 读取并解析环境变量，缺失或无法解析时使用默认值
fn parse_env<T: FromStr>(var_name: &str, default: T) -> T {
    match std::env::var(var_name) {
        Ok(value) => parse_value(var_name, &value).unwrap_or_else(|e| {
            warn!("⚠️ {}，使用默认值", e);
            default
        }),
        Err(_) => default,
    }
}

fn parse_value<T: FromStr>(var_name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: std::any::type_name::<T>().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value::<u32>("VIEWPORT_WIDTH", " 1920 ").unwrap(), 1920);
        assert!(parse_value::<bool>("VERBOSE_LOGGING", "true").unwrap());
    }

    #[test]
    fn test_parse_value_error() {
        let err = parse_value::<u64>("REQUEST_TIMEOUT_SECS", "soon").unwrap_err();
        assert!(err.to_string().contains("REQUEST_TIMEOUT_SECS"));
        assert!(err.to_string().contains("soon"));
    }

    #[test]
    fn test_default_points_at_hosted_backend() {
        let config = Config::default();
        assert!(config.api_base_url.starts_with("https://"));
        assert_eq!(config.viewport_width, 1280);
    }
}
