use anyhow::Result;
/// 日志工具模块
///
/// 初始化 tracing，并维护会话输出日志文件
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 订阅者
///
/// `RUST_LOG` 优先；否则按 `verbose` 选择 debug 或 info。重复调用无副作用
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
/// - `user_name`: 当前用户
pub fn init_log_file(log_file_path: &str, user_name: &str) -> Result<()> {
    let log_header = format!(
        "{}\n练习会话日志 - {} - {}\n{}\n\n",
        "=".repeat(60),
        user_name,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 追加一次运行/提交的结果
///
/// # 参数
/// - `log_file_path`: 日志文件路径
/// - `action`: 动作名称（Run / Submit）
/// - `question_id`: 当前题目ID
/// - `output`: 输出面板文本
pub fn append_result(
    log_file_path: &str,
    action: &str,
    question_id: Option<&str>,
    output: &str,
) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    let entry = format!(
        "[{}] {} | 题目 {}\n{}\n{}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        action,
        question_id.unwrap_or("-"),
        output,
        "─".repeat(60)
    );

    file.write_all(entry.as_bytes())?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(api_base_url: &str, user_name: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - C++ 练习客户端");
    info!("🌐 判题后端: {}", api_base_url);
    info!("👤 用户: {}", user_name);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
