//! 判题后端的请求/响应数据结构

use serde::{Deserialize, Serialize};

/// `POST /run-cpp` 请求体
#[derive(Debug, Clone, Serialize)]
pub struct RunRequest<'a> {
    pub code: &'a str,
    pub input: &'a str,
}

/// `POST /validate-code` 请求体
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest<'a> {
    pub code: &'a str,
    pub question_id: &'a str,
}

/// 运行成功的返回
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunOutput {
    #[serde(default)]
    pub output: String,
}

/// 单个测试用例结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub test_case: u64,
    pub passed: bool,
    #[serde(default)]
    pub expected_output: Option<String>,
    #[serde(default)]
    pub user_output: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl TestResult {
    /// 渲染为输出面板中的文本
    pub fn render(&self) -> String {
        if self.passed {
            return format!("Test Case {}: Passed", self.test_case);
        }
        match &self.error {
            Some(error) => format!("Test Case {}: Error - {}", self.test_case, error),
            None => format!(
                "Test Case {}: Failed\nExpected: {}\nGot: {}",
                self.test_case,
                self.expected_output.as_deref().unwrap_or_default(),
                self.user_output.as_deref().unwrap_or_default()
            ),
        }
    }
}

/// 提交验证的返回
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReport {
    pub all_passed: bool,
    #[serde(default)]
    pub results: Vec<TestResult>,
}

impl SubmitReport {
    /// 渲染整个提交结果
    pub fn render(&self) -> String {
        if self.all_passed {
            return "All test cases passed!".to_string();
        }
        self.results
            .iter()
            .map(TestResult::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 通过的用例数量
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }
}

/// 非 200 响应体
///
/// `code` 是结构化错误码；旧版后端只返回自由文本 `error`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BackendErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}
