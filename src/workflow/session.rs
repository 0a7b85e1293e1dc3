//! 编辑会话 - 流程层
//!
//! 会话是当前题目、代码、自定义输入、输出文本和两个忙碌标记的唯一持有者。
//!
//! 运行（Compile）和提交（Submit）各自是一个独立的状态机：
//!
//! ```text
//! Idle → InFlight → (成功 | 失败) → Idle
//! ```
//!
//! - `begin_*` 同步进入 InFlight：设置忙碌标记、占位文本，并切换到输出页
//! - InFlight 期间再次触发是无操作
//! - `finish_*` 清除忙碌标记并写入格式化后的结果
//!
//! 当前题目真正切换（加载成功）时递增 `epoch`。请求票据携带发起时的 epoch，
//! 完成时 epoch 不一致则丢弃结果，避免旧题目的响应覆盖新题目的输出。
//! 加载失败不会切换题目，进行中的请求仍然有效。
//!
//! 题目加载本身使用单独的导航计数 `nav`：只有最后一次导航的结果会被应用。

use tracing::{debug, info, warn};

use crate::models::{Failure, Question, RunOutput, SubmitReport};
use crate::services::{code_key, Gateway, KeyValueStore};
use crate::workflow::identity::UserIdentity;

pub const COMPILING_PLACEHOLDER: &str = "Compiling...";
pub const VALIDATING_PLACEHOLDER: &str = "Validating...";
pub const NO_QUESTION_SELECTED: &str = "Error: No question selected";

/// 底部面板的标签页
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Input,
    Output,
}

/// 会话中的异步动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Compile,
    Submit,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Compile => "Run",
            Action::Submit => "Submit",
        }
    }
}

/// 单个动作的生命周期状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActionState {
    #[default]
    Idle,
    InFlight { ticket: u64 },
}

impl ActionState {
    pub fn is_busy(self) -> bool {
        matches!(self, ActionState::InFlight { .. })
    }
}

/// 运行请求票据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTicket {
    id: u64,
    epoch: u64,
    pub code: String,
    pub input: String,
}

/// 提交请求票据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    id: u64,
    epoch: u64,
    pub code: String,
    pub question_id: String,
}

/// 题目加载票据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTicket {
    nav: u64,
    pub question_id: String,
}

/// `finish_*` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// 输出已更新
    Updated,
    /// 发起后已切换题目，结果被丢弃
    Stale,
    /// 没有发起请求（正在进行中或前置条件不满足）
    Ignored,
}

/// 题目加载结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Loaded,
    /// 题目加载失败，会话保持原状
    Failed,
    /// 之后又发起了新的导航
    Stale,
}

/// 编辑会话
pub struct Session<S: KeyValueStore> {
    store: S,
    identity: UserIdentity,
    active_question: Option<Question>,
    source_code: String,
    custom_input: String,
    output_text: String,
    active_tab: Tab,
    compile: ActionState,
    submit: ActionState,
    epoch: u64,
    nav: u64,
    next_ticket: u64,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S, identity: UserIdentity) -> Self {
        Self {
            store,
            identity,
            active_question: None,
            source_code: String::new(),
            custom_input: String::new(),
            output_text: String::new(),
            active_tab: Tab::default(),
            compile: ActionState::Idle,
            submit: ActionState::Idle,
            epoch: 0,
            nav: 0,
            next_ticket: 0,
        }
    }

    // ========== 读取 ==========

    pub fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    pub fn active_question(&self) -> Option<&Question> {
        self.active_question.as_ref()
    }

    pub fn active_question_id(&self) -> Option<&str> {
        self.active_question.as_ref().map(|q| q.id.as_str())
    }

    pub fn source_code(&self) -> &str {
        &self.source_code
    }

    pub fn custom_input(&self) -> &str {
        &self.custom_input
    }

    pub fn output_text(&self) -> &str {
        &self.output_text
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn is_compiling(&self) -> bool {
        self.compile.is_busy()
    }

    pub fn is_submitting(&self) -> bool {
        self.submit.is_busy()
    }

    pub fn action_state(&self, action: Action) -> ActionState {
        match action {
            Action::Compile => self.compile,
            Action::Submit => self.submit,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ========== 编辑 ==========

    /// 更新代码，并立即写入当前题目的存储键
    pub fn set_source_code(&mut self, code: impl Into<String>) {
        self.source_code = code.into();
        self.persist_code();
    }

    pub fn set_custom_input(&mut self, input: impl Into<String>) {
        self.custom_input = input.into();
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// 显式保存当前代码
    pub fn save(&mut self) -> bool {
        self.persist_code()
    }

    fn persist_code(&mut self) -> bool {
        match &self.active_question {
            Some(question) => {
                self.store.set(&code_key(&question.id), &self.source_code);
                true
            }
            None => false,
        }
    }

    // ========== 切换题目 ==========

    /// 开始导航到某道题目
    ///
    /// 之前发起但尚未完成的题目加载都会变成过期加载
    pub fn begin_open(&mut self, question_id: impl Into<String>) -> OpenTicket {
        self.nav += 1;
        let question_id = question_id.into();
        debug!("导航到题目 {} (nav {})", question_id, self.nav);
        OpenTicket {
            nav: self.nav,
            question_id,
        }
    }

    /// 应用题目加载结果
    ///
    /// 有保存的代码则恢复，否则使用题目的初始代码。
    /// 加载成功后，之前发起的运行和提交都变成过期请求
    pub fn finish_open(&mut self, ticket: OpenTicket, question: Option<Question>) -> OpenOutcome {
        if ticket.nav != self.nav {
            debug!("丢弃过期的题目加载结果: {}", ticket.question_id);
            return OpenOutcome::Stale;
        }

        let Some(question) = question else {
            warn!("⚠️ 题目 {} 加载失败", ticket.question_id);
            return OpenOutcome::Failed;
        };

        self.source_code = self
            .store
            .get(&code_key(&question.id))
            .unwrap_or_else(|| question.starter_code.clone());
        info!("📖 已打开题目: {} ({})", question.title, question.id);
        self.active_question = Some(question);
        self.epoch += 1;
        OpenOutcome::Loaded
    }

    // ========== 运行 ==========

    /// 进入运行状态；已经在运行时返回 `None`
    pub fn begin_compile(&mut self) -> Option<RunTicket> {
        if self.compile.is_busy() {
            debug!("运行请求进行中，忽略重复触发");
            return None;
        }

        let id = self.issue_ticket();
        self.compile = ActionState::InFlight { ticket: id };
        self.output_text = COMPILING_PLACEHOLDER.to_string();
        self.active_tab = Tab::Output;

        Some(RunTicket {
            id,
            epoch: self.epoch,
            code: self.source_code.clone(),
            input: self.custom_input.clone(),
        })
    }

    pub fn finish_compile(
        &mut self,
        ticket: RunTicket,
        result: Result<RunOutput, Failure>,
    ) -> Applied {
        if self.compile != (ActionState::InFlight { ticket: ticket.id }) {
            return Applied::Ignored;
        }
        self.compile = ActionState::Idle;

        if ticket.epoch != self.epoch {
            debug!("丢弃过期的运行结果 (ticket {})", ticket.id);
            self.clear_placeholder(COMPILING_PLACEHOLDER);
            return Applied::Stale;
        }

        self.output_text = match result {
            Ok(run) => run.output,
            Err(failure) => failure.render(),
        };
        Applied::Updated
    }

    // ========== 提交 ==========

    /// 进入提交状态；已经在提交或没有选中题目时返回 `None`
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if self.submit.is_busy() {
            debug!("提交请求进行中，忽略重复触发");
            return None;
        }

        let Some(question_id) = self.active_question_id().map(str::to_string) else {
            self.output_text = NO_QUESTION_SELECTED.to_string();
            self.active_tab = Tab::Output;
            return None;
        };

        let id = self.issue_ticket();
        self.submit = ActionState::InFlight { ticket: id };
        self.output_text = VALIDATING_PLACEHOLDER.to_string();
        self.active_tab = Tab::Output;

        Some(SubmitTicket {
            id,
            epoch: self.epoch,
            code: self.source_code.clone(),
            question_id,
        })
    }

    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<SubmitReport, Failure>,
    ) -> Applied {
        if self.submit != (ActionState::InFlight { ticket: ticket.id }) {
            return Applied::Ignored;
        }
        self.submit = ActionState::Idle;

        if ticket.epoch != self.epoch {
            debug!("丢弃过期的提交结果 (ticket {})", ticket.id);
            self.clear_placeholder(VALIDATING_PLACEHOLDER);
            return Applied::Stale;
        }

        self.output_text = match result {
            Ok(report) => {
                info!(
                    "✓ 提交完成: {}/{} 通过",
                    report.passed_count(),
                    report.results.len()
                );
                report.render()
            }
            Err(failure) => failure.render(),
        };
        Applied::Updated
    }

    /// 丢弃结果后不留下“进行中”的占位文本
    fn clear_placeholder(&mut self, placeholder: &str) {
        if self.output_text == placeholder {
            self.output_text.clear();
        }
    }

    fn issue_ticket(&mut self) -> u64 {
        self.next_ticket += 1;
        self.next_ticket
    }

    // ========== 顺序调用的便捷方法 ==========

    /// 加载题目并应用
    pub async fn open<G: Gateway>(&mut self, gateway: &G, question_id: &str) -> OpenOutcome {
        let ticket = self.begin_open(question_id);
        let question = gateway.get_question(&ticket.question_id).await;
        self.finish_open(ticket, question)
    }

    /// 运行当前代码
    pub async fn compile<G: Gateway>(&mut self, gateway: &G) -> Applied {
        let Some(ticket) = self.begin_compile() else {
            return Applied::Ignored;
        };
        let result = gateway.run_code(&ticket.code, &ticket.input).await;
        self.finish_compile(ticket, result)
    }

    /// 提交当前代码
    pub async fn submit<G: Gateway>(&mut self, gateway: &G) -> Applied {
        let Some(ticket) = self.begin_submit() else {
            return Applied::Ignored;
        };
        let result = gateway.submit_code(&ticket.code, &ticket.question_id).await;
        self.finish_submit(ticket, result)
    }
}
