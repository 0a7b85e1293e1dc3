//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (事件循环，持有会话，调度后台请求)
//!     ↓
//! view (命令解析、路由、分栏、渲染)
//!     ↓
//! workflow::Session (请求生命周期状态机)
//!     ↓
//! services (键值存储 / Gateway 能力)
//!     ↓
//! clients::JudgeClient (HTTP)
//! ```
//!
//! 编排层不做输出格式化，只负责把用户意图和后台结果交给会话。

pub mod app;

pub use app::{App, Completion, Flow};
