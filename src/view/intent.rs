//! 终端命令 → 用户意图

use crate::view::route::Route;
use crate::workflow::Tab;

/// 用户意图
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// 打开题目列表弹窗
    ShowQuestions,
    /// 关闭题目列表弹窗
    CloseQuestions,
    /// 在题目列表中选择（序号或ID）
    SelectQuestion(String),
    /// 导航到路由
    Navigate(Route),
    /// 从文件读取代码替换编辑器内容
    LoadFile(String),
    /// 进入多行编辑模式，单独一行 `.` 结束
    BeginEdit,
    /// 在代码末尾追加一行
    AppendLine(String),
    /// 设置自定义输入（`\n` 表示换行）
    SetInput(String),
    Run,
    Submit,
    Save,
    SelectTab(Tab),
    /// 拖拽分隔条到指定 x 坐标
    Drag(i32),
    /// 松开分隔条
    Release,
    /// 调整视口宽度
    Viewport(u32),
    /// 重新显示当前界面
    Show,
    Help,
    Quit,
    /// 无法识别的命令
    Unknown(String),
}

impl Intent {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        let (command, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest),
            None => (trimmed, ""),
        };
        let arg = rest.trim();

        match command.to_ascii_lowercase().as_str() {
            "" | "show" => Intent::Show,
            "list" | "questions" => Intent::ShowQuestions,
            "close" => Intent::CloseQuestions,
            "pick" if !arg.is_empty() => Intent::SelectQuestion(arg.to_string()),
            "open" if !arg.is_empty() => {
                let route = if arg.starts_with('/') {
                    Route::parse(arg)
                } else {
                    Some(Route::Question(arg.to_string()))
                };
                route.map_or_else(|| Intent::Unknown(line.to_string()), Intent::Navigate)
            }
            "load" if !arg.is_empty() => Intent::LoadFile(arg.to_string()),
            "edit" => Intent::BeginEdit,
            // 追加的行保留原始缩进
            "append" => Intent::AppendLine(rest.to_string()),
            "input" => Intent::SetInput(unescape(arg)),
            "run" => Intent::Run,
            "submit" => Intent::Submit,
            "save" => Intent::Save,
            "tab" => match arg.to_ascii_lowercase().as_str() {
                "input" => Intent::SelectTab(Tab::Input),
                "output" => Intent::SelectTab(Tab::Output),
                _ => Intent::Unknown(line.to_string()),
            },
            "drag" => arg
                .parse()
                .map_or_else(|_| Intent::Unknown(line.to_string()), Intent::Drag),
            "release" => Intent::Release,
            "viewport" => arg
                .parse()
                .map_or_else(|_| Intent::Unknown(line.to_string()), Intent::Viewport),
            "help" | "?" => Intent::Help,
            "quit" | "exit" => Intent::Quit,
            _ => Intent::Unknown(line.to_string()),
        }
    }
}

fn unescape(text: &str) -> String {
    text.replace("\\n", "\n").replace("\\t", "\t")
}

pub const HELP: &str = "\
命令:
  list                 打开题目列表
  pick <序号|ID>       选择列表中的题目
  close                关闭题目列表
  open <ID|/question/ID>  打开题目
  load <文件>          从文件读取代码
  edit                 多行编辑代码，单独一行 . 结束
  append <行>          在代码末尾追加一行
  input <文本>         设置自定义输入 (\\n 换行)
  run                  运行代码
  submit               提交验证
  save                 保存代码
  tab input|output     切换标签页
  drag <x> / release   拖拽分隔条
  viewport <宽度>      调整视口宽度
  show                 显示当前界面
  quit                 退出";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Intent::parse("run"), Intent::Run);
        assert_eq!(Intent::parse("  SUBMIT "), Intent::Submit);
        assert_eq!(Intent::parse(""), Intent::Show);
        assert_eq!(Intent::parse("tab output"), Intent::SelectTab(Tab::Output));
        assert_eq!(Intent::parse("drag 640"), Intent::Drag(640));
        assert_eq!(Intent::parse("quit\r\n"), Intent::Quit);
    }

    #[test]
    fn test_parse_open() {
        assert_eq!(
            Intent::parse("open two-sum"),
            Intent::Navigate(Route::Question("two-sum".to_string()))
        );
        assert_eq!(
            Intent::parse("open /question/7"),
            Intent::Navigate(Route::Question("7".to_string()))
        );
        assert_eq!(Intent::parse("open /"), Intent::Navigate(Route::Home));
        assert!(matches!(Intent::parse("open /nowhere"), Intent::Unknown(_)));
    }

    #[test]
    fn test_parse_input_unescapes() {
        assert_eq!(
            Intent::parse("input 1 2\\n3 4"),
            Intent::SetInput("1 2\n3 4".to_string())
        );
    }

    #[test]
    fn test_append_keeps_indentation() {
        assert_eq!(
            Intent::parse("append     return 0;"),
            Intent::AppendLine("    return 0;".to_string())
        );
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(Intent::parse("drag left"), Intent::Unknown(_)));
        assert!(matches!(Intent::parse("tab sideways"), Intent::Unknown(_)));
        assert!(matches!(Intent::parse("pick"), Intent::Unknown(_)));
    }
}
