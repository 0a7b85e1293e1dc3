use std::sync::OnceLock;

use regex::Regex;

/// 应用路由：首页或 `/question/:questionId`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Question(String),
}

fn question_route() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^/question/([^/?#]+)/?$").ok())
        .as_ref()
}

impl Route {
    /// 解析路径，无法识别时返回 `None`
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim();
        if path.is_empty() || path == "/" {
            return Some(Route::Home);
        }
        question_route()?
            .captures(path)
            .and_then(|caps| caps.get(1))
            .map(|m| Route::Question(m.as_str().to_string()))
    }

    pub fn question_id(&self) -> Option<&str> {
        match self {
            Route::Home => None,
            Route::Question(id) => Some(id),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Question(id) => format!("/question/{}", id),
        }
    }
}
