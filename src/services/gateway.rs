//! 判题后端能力
//!
//! 会话只依赖这个 trait，不关心 HTTP 细节

use futures::future::BoxFuture;

use crate::models::{Failure, Question, QuestionSummary, RunOutput, SubmitReport};

/// 判题后端网关
///
/// - `list_questions` / `get_question` 不向调用方抛错：失败时记录日志并返回空
/// - `run_code` / `submit_code` 把所有失败归类为 [`Failure`]
pub trait Gateway: Clone + Send + Sync + 'static {
    fn list_questions(&self) -> BoxFuture<'_, Vec<QuestionSummary>>;

    fn get_question<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Option<Question>>;

    fn run_code<'a>(
        &'a self,
        code: &'a str,
        input: &'a str,
    ) -> BoxFuture<'a, Result<RunOutput, Failure>>;

    fn submit_code<'a>(
        &'a self,
        code: &'a str,
        question_id: &'a str,
    ) -> BoxFuture<'a, Result<SubmitReport, Failure>>;
}
