/// 判题后端 HTTP 客户端
///
/// 封装所有与判题后端的 HTTP+JSON 交互
use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{ApiError, AppResult};
use crate::models::{
    BackendErrorBody, Failure, Question, QuestionSummary, RunOutput, RunRequest, SubmitReport,
    SubmitRequest,
};
use crate::services::Gateway;
use crate::utils::truncate_text;

const QUESTIONS_ENDPOINT: &str = "api/questions";
const RUN_ENDPOINT: &str = "run-cpp";
const SUBMIT_ENDPOINT: &str = "validate-code";

/// 判题后端客户端
#[derive(Clone, Debug)]
pub struct JudgeClient {
    http: reqwest::Client,
    base_url: String,
}

impl JudgeClient {
    /// 根据配置创建客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        Self::with_base_url(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// 使用自定义地址创建客户端
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 拼接接口地址，路径段会被正确转义
    fn endpoint_url(&self, segments: &[&str]) -> Option<Url> {
        let mut url = Url::parse(&self.base_url).ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(segments.iter().flat_map(|s| s.split('/')).filter(|s| !s.is_empty()));
        Some(url)
    }

    fn question_url(&self, id: &str) -> Option<Url> {
        let mut url = self.endpoint_url(&[QUESTIONS_ENDPOINT])?;
        url.path_segments_mut().ok()?.push(id);
        Some(url)
    }

    /// 获取题目列表
    pub async fn fetch_questions(&self) -> Result<Vec<QuestionSummary>, ApiError> {
        let url = self
            .endpoint_url(&[QUESTIONS_ENDPOINT])
            .ok_or_else(|| bad_base_url(&self.base_url))?;
        self.get_json(url, QUESTIONS_ENDPOINT).await
    }

    /// 获取单个题目详情
    pub async fn fetch_question(&self, id: &str) -> Result<Question, ApiError> {
        let url = self
            .question_url(id)
            .ok_or_else(|| bad_base_url(&self.base_url))?;
        self.get_json(url, QUESTIONS_ENDPOINT).await
    }

    /// 编译并运行代码
    pub async fn run(&self, code: &str, input: &str) -> Result<RunOutput, Failure> {
        debug!("运行代码，代码长度: {} 字符，输入长度: {} 字符", code.len(), input.len());
        self.post_json(RUN_ENDPOINT, &RunRequest { code, input }).await
    }

    /// 提交代码进行验证
    pub async fn submit(&self, code: &str, question_id: &str) -> Result<SubmitReport, Failure> {
        debug!("提交代码，题目: {}", question_id);
        self.post_json(SUBMIT_ENDPOINT, &SubmitRequest { code, question_id })
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, endpoint: &str) -> Result<T, ApiError> {
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ApiError::RequestFailed {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| ApiError::RequestFailed {
                endpoint: endpoint.to_string(),
                source,
            })?;

        serde_json::from_slice(&bytes).map_err(|source| ApiError::JsonParseFailed {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T, Failure>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self
            .endpoint_url(&[endpoint])
            .ok_or_else(|| Failure::transport(bad_base_url(&self.base_url).user_message()))?;

        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|source| {
                let err = ApiError::RequestFailed {
                    endpoint: endpoint.to_string(),
                    source,
                };
                warn!("⚠️ {}", err);
                Failure::transport(err.user_message())
            })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|source| {
            let err = ApiError::RequestFailed {
                endpoint: endpoint.to_string(),
                source,
            };
            warn!("⚠️ {}", err);
            Failure::transport(err.user_message())
        })?;

        let result = interpret_response(status, &bytes, endpoint);
        if let Err(failure) = &result {
            info!("{} 返回失败 (status={}): {}", endpoint, status, truncate_text(&failure.render(), 120));
        }
        result
    }
}

/// 解释 POST 接口的响应
///
/// - 2xx：解码为成功载荷
/// - 其他：解码为 [`BackendErrorBody`] 并分类
/// - 解码失败：按传输错误处理，保留原始错误信息
pub fn interpret_response<T: DeserializeOwned>(
    status: StatusCode,
    bytes: &[u8],
    endpoint: &str,
) -> Result<T, Failure> {
    if status.is_success() {
        return serde_json::from_slice(bytes).map_err(|source| {
            let err = ApiError::JsonParseFailed {
                endpoint: endpoint.to_string(),
                source,
            };
            warn!("⚠️ {}", err);
            Failure::transport(err.user_message())
        });
    }

    match serde_json::from_slice::<BackendErrorBody>(bytes) {
        Ok(body) => Err(Failure::classify(body)),
        Err(source) => {
            let err = ApiError::JsonParseFailed {
                endpoint: endpoint.to_string(),
                source,
            };
            warn!("⚠️ {} (status={})", err, status);
            Err(Failure::transport(err.user_message()))
        }
    }
}

fn bad_base_url(base_url: &str) -> ApiError {
    ApiError::InvalidBaseUrl {
        base_url: base_url.to_string(),
    }
}

impl Gateway for JudgeClient {
    fn list_questions(&self) -> BoxFuture<'_, Vec<QuestionSummary>> {
        Box::pin(async move {
            match self.fetch_questions().await {
                Ok(questions) => {
                    info!("✓ 加载题目列表成功，共 {} 道题", questions.len());
                    questions
                }
                Err(e) => {
                    warn!("⚠️ 加载题目列表失败: {}", e);
                    Vec::new()
                }
            }
        })
    }

    fn get_question<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Option<Question>> {
        Box::pin(async move {
            match self.fetch_question(id).await {
                Ok(question) => Some(question),
                Err(e) => {
                    warn!("⚠️ 加载题目 {} 失败: {}", id, e);
                    None
                }
            }
        })
    }

    fn run_code<'a>(
        &'a self,
        code: &'a str,
        input: &'a str,
    ) -> BoxFuture<'a, Result<RunOutput, Failure>> {
        Box::pin(self.run(code, input))
    }

    fn submit_code<'a>(
        &'a self,
        code: &'a str,
        question_id: &'a str,
    ) -> BoxFuture<'a, Result<SubmitReport, Failure>> {
        Box::pin(self.submit(code, question_id))
    }
}
