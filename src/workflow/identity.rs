//! 用户身份
//!
//! 启动时显式初始化一次，然后注入到会话中

use std::fmt::Display;

use tracing::{debug, info};

use crate::services::{KeyValueStore, USER_NAME_KEY};

const ANONYMOUS: &str = "anonymous";

/// 当前用户
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserIdentity {
    name: Option<String>,
}

impl UserIdentity {
    pub fn anonymous() -> Self {
        Self { name: None }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// 读取已保存的用户名；不存在时调用 `prompt` 询问一次
    ///
    /// 非空回答会写回存储，空回答或取消则保持匿名，不写入
    pub fn bootstrap<S, F>(store: &mut S, prompt: F) -> Self
    where
        S: KeyValueStore,
        F: FnOnce() -> Option<String>,
    {
        if let Some(stored) = store.get(USER_NAME_KEY).filter(|n| !n.trim().is_empty()) {
            debug!("使用已保存的用户名: {}", stored);
            return Self::named(stored);
        }

        match prompt().map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) {
            Some(entered) => {
                store.set(USER_NAME_KEY, &entered);
                info!("👤 已保存用户名: {}", entered);
                Self::named(entered)
            }
            None => Self::anonymous(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(ANONYMOUS)
    }
}

impl Display for UserIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
