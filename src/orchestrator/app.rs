//! 终端应用 - 编排层
//!
//! 持有唯一的会话。用户命令在事件循环中同步修改会话；
//! 网络请求在后台任务中执行，完成后通过通道把结果送回事件循环，
//! 所以会话只在一个地方被修改，不需要加锁。

use std::io::Write as _;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::clients::JudgeClient;
use crate::config::Config;
use crate::models::{Failure, Question, QuestionSummary, RunOutput, SubmitReport};
use crate::services::{FileStore, Gateway, KeyValueStore, USER_NAME_KEY};
use crate::utils::logging;
use crate::view::intent::HELP;
use crate::view::{render, Intent, QuestionsPanel, Route, SplitLayout};
use crate::workflow::{
    Action, Applied, OpenOutcome, OpenTicket, RunTicket, Session, SubmitTicket, UserIdentity,
};

/// 后台请求完成事件
#[derive(Debug)]
pub enum Completion {
    QuestionsLoaded(Vec<QuestionSummary>),
    Opened(OpenTicket, Option<Question>),
    Ran(RunTicket, Result<RunOutput, Failure>),
    Submitted(SubmitTicket, Result<SubmitReport, Failure>),
}

/// 事件循环是否继续
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// 应用主结构
pub struct App<G: Gateway = JudgeClient, S: KeyValueStore = FileStore> {
    config: Config,
    gateway: G,
    session: Session<S>,
    panel: QuestionsPanel,
    layout: SplitLayout,
    events_tx: mpsc::UnboundedSender<Completion>,
    events_rx: Option<mpsc::UnboundedReceiver<Completion>>,
    stdin: Option<Lines<BufReader<Stdin>>>,
    /// 多行编辑缓冲区
    editing: Option<String>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        let mut store = FileStore::open(&config.store_path);
        let mut stdin = BufReader::new(tokio::io::stdin()).lines();

        // 启动时只询问一次用户名
        let answer = match (&config.user_name, store.get(USER_NAME_KEY)) {
            (Some(name), _) => Some(name.clone()),
            (None, Some(_)) => None,
            (None, None) => {
                print!("Please enter your name: ");
                std::io::stdout().flush()?;
                stdin.next_line().await.context("无法读取用户名")?
            }
        };
        let identity = UserIdentity::bootstrap(&mut store, || answer);

        logging::log_startup(&config.api_base_url, identity.display_name());
        if let Err(e) = logging::init_log_file(&config.output_log_file, identity.display_name()) {
            warn!("⚠️ 无法初始化日志文件 {}: {}", config.output_log_file, e);
        }

        let gateway = JudgeClient::new(&config)?;
        let session = Session::new(store, identity);

        let mut app = Self::with_parts(config, gateway, session);
        app.stdin = Some(stdin);
        Ok(app)
    }
}

impl<G: Gateway, S: KeyValueStore> App<G, S> {
    /// 使用现成的网关和会话创建应用
    pub fn with_parts(config: Config, gateway: G, session: Session<S>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            layout: SplitLayout::new(config.viewport_width),
            config,
            gateway,
            session,
            panel: QuestionsPanel::new(),
            events_tx,
            events_rx: Some(events_rx),
            stdin: None,
            editing: None,
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn panel(&self) -> &QuestionsPanel {
        &self.panel
    }

    pub fn layout(&self) -> &SplitLayout {
        &self.layout
    }

    /// 运行应用主逻辑
    pub async fn run(mut self) -> Result<()> {
        let mut events = self.events_rx.take().context("事件循环已经在运行")?;
        let mut stdin = self
            .stdin
            .take()
            .unwrap_or_else(|| BufReader::new(tokio::io::stdin()).lines());

        self.spawn_list();
        println!("{}", HELP);
        self.print_screen();

        loop {
            tokio::select! {
                line = stdin.next_line() => {
                    match line.context("读取输入失败")? {
                        Some(line) => {
                            if self.handle_line(&line).await == Flow::Quit {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                Some(event) = events.recv() => self.apply(event),
            }
        }

        info!("👋 会话结束");
        Ok(())
    }

    /// 处理一行输入
    pub async fn handle_line(&mut self, line: &str) -> Flow {
        if let Some(buffer) = self.editing.as_mut() {
            if line.trim_end() == "." {
                let code = std::mem::take(buffer);
                self.editing = None;
                self.session.set_source_code(code);
                println!("✓ 代码已更新 ({} 行)", self.session.source_code().lines().count());
            } else {
                buffer.push_str(line);
                buffer.push('\n');
            }
            return Flow::Continue;
        }

        self.dispatch(Intent::parse(line)).await
    }

    /// 执行用户意图
    pub async fn dispatch(&mut self, intent: Intent) -> Flow {
        debug!("意图: {:?}", intent);
        match intent {
            Intent::ShowQuestions => {
                self.panel.show();
                if self.panel.questions().is_empty() {
                    self.spawn_list();
                }
                println!(
                    "{}",
                    render::render_question_list(&self.panel, self.session.active_question_id())
                );
            }
            Intent::CloseQuestions => self.panel.close(),
            Intent::SelectQuestion(key) => match self.panel.select(&key) {
                Some(route) => self.navigate(route),
                None => println!("未找到题目: {}", key),
            },
            Intent::Navigate(route) => self.navigate(route),
            Intent::LoadFile(path) => match tokio::fs::read_to_string(&path).await {
                Ok(code) => {
                    self.session.set_source_code(code);
                    println!("✓ 已从 {} 读取代码", path);
                }
                Err(e) => println!("无法读取文件 {}: {}", path, e),
            },
            Intent::BeginEdit => {
                self.editing = Some(String::new());
                println!("输入代码，单独一行 . 结束");
            }
            Intent::AppendLine(line) => {
                let mut code = self.session.source_code().to_string();
                if !code.is_empty() && !code.ends_with('\n') {
                    code.push('\n');
                }
                code.push_str(&line);
                code.push('\n');
                self.session.set_source_code(code);
            }
            Intent::SetInput(input) => self.session.set_custom_input(input),
            Intent::Run => {
                match self.session.begin_compile() {
                    Some(ticket) => self.spawn_run(ticket),
                    None => println!("Run 正在进行中"),
                }
                println!("{}", render::render_console(self.session.output_text()));
            }
            Intent::Submit => {
                match self.session.begin_submit() {
                    Some(ticket) => self.spawn_submit(ticket),
                    None if self.session.is_submitting() => println!("Submit 正在进行中"),
                    None => {}
                }
                println!("{}", render::render_console(self.session.output_text()));
            }
            Intent::Save => {
                if self.session.save() {
                    println!("✓ 代码已保存");
                } else {
                    println!("没有选中题目，无法保存");
                }
            }
            Intent::SelectTab(tab) => {
                self.session.select_tab(tab);
                self.print_screen();
            }
            Intent::Drag(x) => {
                if !self.layout.is_dragging() {
                    self.layout.begin_drag();
                }
                let width = self.layout.drag_to(x, 0);
                println!("panel: {}px", width);
            }
            Intent::Release => self.layout.end_drag(),
            Intent::Viewport(width) => self.layout.resize_viewport(width),
            Intent::Show => self.print_screen(),
            Intent::Help => println!("{}", HELP),
            Intent::Quit => return Flow::Quit,
            Intent::Unknown(line) => println!("未知命令: {} (输入 help 查看帮助)", line),
        }
        Flow::Continue
    }

    /// 导航到路由；题目路由会在后台加载题目
    pub fn navigate(&mut self, route: Route) {
        match route {
            Route::Home => self.print_screen(),
            Route::Question(id) => {
                info!("📖 正在加载题目 {}", id);
                let ticket = self.session.begin_open(id);
                self.spawn_open(ticket);
            }
        }
    }

    /// 应用后台请求结果
    pub fn apply(&mut self, event: Completion) {
        match event {
            Completion::QuestionsLoaded(questions) => {
                if questions.is_empty() {
                    info!("题目列表为空");
                }
                self.panel.set_questions(questions);
            }
            Completion::Opened(ticket, question) => {
                let question_id = ticket.question_id.clone();
                match self.session.finish_open(ticket, question) {
                    OpenOutcome::Loaded => self.print_screen(),
                    OpenOutcome::Failed => println!("题目加载失败: {}", question_id),
                    OpenOutcome::Stale => {}
                }
            }
            Completion::Ran(ticket, result) => {
                let applied = self.session.finish_compile(ticket, result);
                self.report(Action::Compile, applied);
            }
            Completion::Submitted(ticket, result) => {
                let applied = self.session.finish_submit(ticket, result);
                self.report(Action::Submit, applied);
            }
        }
    }

    fn report(&self, action: Action, applied: Applied) {
        if applied != Applied::Updated {
            return;
        }
        println!("{}", render::render_console(self.session.output_text()));
        if let Err(e) = logging::append_result(
            &self.config.output_log_file,
            action.label(),
            self.session.active_question_id(),
            self.session.output_text(),
        ) {
            warn!("⚠️ 写入日志文件失败: {}", e);
        }
    }

    fn print_screen(&self) {
        println!(
            "{}",
            render::render_screen(&self.session, &self.panel, &self.layout)
        );
    }

    // ========== 后台任务 ==========

    fn spawn_list(&self) {
        let gateway = self.gateway.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let questions = gateway.list_questions().await;
            let _ = tx.send(Completion::QuestionsLoaded(questions));
        });
    }

    fn spawn_open(&self, ticket: OpenTicket) {
        let gateway = self.gateway.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let question = gateway.get_question(&ticket.question_id).await;
            let _ = tx.send(Completion::Opened(ticket, question));
        });
    }

    fn spawn_run(&self, ticket: RunTicket) {
        let gateway = self.gateway.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = gateway.run_code(&ticket.code, &ticket.input).await;
            let _ = tx.send(Completion::Ran(ticket, result));
        });
    }

    fn spawn_submit(&self, ticket: SubmitTicket) {
        let gateway = self.gateway.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = gateway.submit_code(&ticket.code, &ticket.question_id).await;
            let _ = tx.send(Completion::Submitted(ticket, result));
        });
    }

    /// 等待并应用下一个后台结果
    pub async fn settle(&mut self) -> bool {
        let event = match self.events_rx.as_mut() {
            Some(rx) => rx.recv().await,
            None => None,
        };
        match event {
            Some(event) => {
                self.apply(event);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryStore;
    use crate::workflow::session::tests::{question, ScriptedGateway};
    use crate::workflow::Tab;

    fn app() -> (App<ScriptedGateway, MemoryStore>, ScriptedGateway) {
        let gateway = ScriptedGateway::with_questions(vec![
            question("q1", "// q1"),
            question("q2", "// q2"),
        ]);
        let config = Config {
            output_log_file: std::env::temp_dir()
                .join(format!("code_practice_app_{}.txt", std::process::id()))
                .to_string_lossy()
                .to_string(),
            ..Config::default()
        };
        let session = Session::new(MemoryStore::new(), UserIdentity::named("tester"));
        (App::with_parts(config, gateway.clone(), session), gateway)
    }

    #[tokio::test]
    async fn test_open_question_via_command() {
        let (mut app, _) = app();

        app.handle_line("open q1").await;
        assert!(app.settle().await);

        assert_eq!(app.session().active_question_id(), Some("q1"));
        assert_eq!(app.session().source_code(), "// q1");
    }

    #[tokio::test]
    async fn test_pick_from_question_list() {
        let (mut app, _) = app();

        app.handle_line("list").await;
        assert!(app.panel().is_open());
        app.settle().await;
        assert_eq!(app.panel().questions().len(), 2);

        app.handle_line("pick 2").await;
        assert!(!app.panel().is_open());
        app.settle().await;
        assert_eq!(app.session().active_question_id(), Some("q2"));
    }

    #[tokio::test]
    async fn test_run_round_trip() {
        let (mut app, gateway) = app();
        gateway.respond_run(Ok(RunOutput {
            output: "3".to_string(),
        }));

        app.handle_line("input 1 2").await;
        app.handle_line("run").await;
        assert!(app.session().is_compiling());
        assert_eq!(app.session().active_tab(), Tab::Output);

        // 运行中再次触发不会发出第二个请求
        app.handle_line("run").await;
        app.settle().await;

        assert_eq!(app.session().output_text(), "3");
        assert!(!app.session().is_compiling());
        assert_eq!(gateway.run_calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_multiline_edit_is_persisted() {
        let (mut app, _) = app();
        app.handle_line("open q1").await;
        app.settle().await;

        app.handle_line("edit").await;
        app.handle_line("int main() {").await;
        app.handle_line("    return 0;").await;
        app.handle_line("}").await;
        app.handle_line(".").await;

        let expected = "int main() {\n    return 0;\n}\n";
        assert_eq!(app.session().source_code(), expected);
        assert_eq!(app.session().store().get("code_q1").as_deref(), Some(expected));
    }

    #[tokio::test]
    async fn test_drag_and_quit() {
        let (mut app, _) = app();

        app.handle_line("drag 20").await;
        assert_eq!(app.layout().left_width(), 300);
        app.handle_line("release").await;
        assert!(!app.layout().is_dragging());

        assert_eq!(app.handle_line("quit").await, Flow::Quit);
    }
}
