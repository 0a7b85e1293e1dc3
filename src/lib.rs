//! # Code Practice
//!
//! C++ 练习平台的终端客户端：浏览题目、编辑代码、运行自定义输入、提交判题。
//! 编译和判题都由远程后端完成，这里只发请求并展示结果。
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - `JudgeClient`，判题后端的 HTTP+JSON 客户端
//!
//! ### ② 业务能力层（Services）
//! - `services/` - `Gateway` 能力描述、`KeyValueStore` 本地存储
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - `Session` 请求生命周期状态机、`UserIdentity` 启动初始化
//!
//! ### ④ 视图层（View）
//! - `view/` - 命令解析、路由、分栏拖拽、文本渲染
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/` - `App` 事件循环
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod view;
pub mod workflow;

// 重新导出常用类型
pub use clients::JudgeClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Failure, Question, QuestionSummary, SubmitReport, TestResult};
pub use orchestrator::App;
pub use services::{FileStore, Gateway, KeyValueStore, MemoryStore};
pub use view::Route;
pub use workflow::{Session, Tab, UserIdentity};
