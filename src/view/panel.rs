use crate::models::QuestionSummary;
use crate::view::route::Route;

/// 题目列表弹窗
#[derive(Debug, Clone, Default)]
pub struct QuestionsPanel {
    open: bool,
    questions: Vec<QuestionSummary>,
}

impl QuestionsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn questions(&self) -> &[QuestionSummary] {
        &self.questions
    }

    /// 替换题目列表；加载失败时传入空列表即可
    pub fn set_questions(&mut self, questions: Vec<QuestionSummary>) {
        self.questions = questions;
    }

    pub fn show(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// 按序号（从 1 开始）或题目ID选择题目
    ///
    /// 选中后关闭弹窗并返回目标路由
    pub fn select(&mut self, key: &str) -> Option<Route> {
        let key = key.trim();
        let by_index = key
            .parse::<usize>()
            .ok()
            .filter(|n| *n >= 1)
            .and_then(|n| self.questions.get(n - 1));
        let selected = self
            .questions
            .iter()
            .find(|q| q.id == key)
            .or(by_index)?;

        let route = Route::Question(selected.id.clone());
        self.open = false;
        Some(route)
    }
}
