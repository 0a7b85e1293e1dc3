//! 视图层
//!
//! 只负责展示会话状态并把用户意图转发给会话，不持有业务状态

pub mod intent;
pub mod layout;
pub mod panel;
pub mod render;
pub mod route;

pub use intent::Intent;
pub use layout::SplitLayout;
pub use panel::QuestionsPanel;
pub use route::Route;
