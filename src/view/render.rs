//! 文本渲染
//!
//! 把会话状态渲染成终端文本。所有函数都是纯函数

use std::fmt::Write;

use crate::models::Question;
use crate::services::KeyValueStore;
use crate::view::layout::SplitLayout;
use crate::view::panel::QuestionsPanel;
use crate::workflow::{Session, Tab};

pub const EMPTY_OUTPUT: &str = "No output yet. Run your code to see results.";
pub const NO_QUESTION: &str = "Select a question to begin";

/// 题目详情
pub fn render_details(question: &Question) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", question.title);
    if !question.description.is_empty() {
        let _ = writeln!(out, "{}", question.description);
    }
    for (index, example) in question.examples.iter().enumerate() {
        let _ = writeln!(out, "\nExample {}:", index + 1);
        let _ = writeln!(out, "  Input: {}", example.input);
        let _ = writeln!(out, "  Output: {}", example.output);
        let _ = writeln!(out, "  Explanation: {}", example.explanation);
    }
    out
}

/// 题目列表，当前题目带 `*` 标记
pub fn render_question_list(panel: &QuestionsPanel, active_id: Option<&str>) -> String {
    let mut out = String::from("Practice Questions\n");
    if panel.questions().is_empty() {
        out.push_str("  (no questions)\n");
        return out;
    }
    for (index, question) in panel.questions().iter().enumerate() {
        let marker = if Some(question.id.as_str()) == active_id {
            '*'
        } else {
            ' '
        };
        let _ = writeln!(out, "{} {:>3}. {}", marker, index + 1, question.title);
    }
    out
}

/// 输出面板
pub fn render_console(output: &str) -> String {
    let body = if output.is_empty() { EMPTY_OUTPUT } else { output };
    format!("Output:\n{}\n", body)
}

/// 自定义输入面板
pub fn render_input(input: &str) -> String {
    format!("Custom Input:\n{}\n", input)
}

/// 按钮状态栏；进行中的动作显示为禁用
pub fn render_status<S: KeyValueStore>(session: &Session<S>, layout: &SplitLayout) -> String {
    let run = if session.is_compiling() {
        "[Run ⟳ disabled]"
    } else {
        "[Run]"
    };
    let submit = if session.is_submitting() {
        "[Submit ⟳ disabled]"
    } else {
        "[Submit]"
    };
    let tab = match session.active_tab() {
        Tab::Input => "Custom Input",
        Tab::Output => "Output Console",
    };
    format!(
        "{} {}  | tab: {} | panel: {}px / {}px | user: {}",
        run,
        submit,
        tab,
        layout.left_width(),
        layout.viewport_width(),
        session.identity()
    )
}

/// 完整界面
pub fn render_screen<S: KeyValueStore>(
    session: &Session<S>,
    panel: &QuestionsPanel,
    layout: &SplitLayout,
) -> String {
    let mut out = String::new();

    if panel.is_open() {
        out.push_str(&render_question_list(panel, session.active_question_id()));
        out.push('\n');
    }

    match session.active_question() {
        Some(question) => {
            out.push_str(&render_details(question));
            let _ = writeln!(out, "\n--- code ---\n{}\n------------", session.source_code());
        }
        None => {
            let _ = writeln!(out, "{}", NO_QUESTION);
        }
    }

    let _ = writeln!(out, "{}", render_status(session, layout));
    match session.active_tab() {
        Tab::Input => out.push_str(&render_input(session.custom_input())),
        Tab::Output => out.push_str(&render_console(session.output_text())),
    }
    out
}
