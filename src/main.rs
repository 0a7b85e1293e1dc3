use anyhow::Result;
use code_practice::utils::logging;
use code_practice::{App, Config, Route};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    // 可选的启动路由，例如 /question/two-sum
    let route = std::env::args().nth(1).and_then(|arg| Route::parse(&arg));

    // 初始化并运行应用
    let mut app = App::initialize(config).await?;
    if let Some(route) = route {
        app.navigate(route);
    }
    app.run().await?;

    Ok(())
}
