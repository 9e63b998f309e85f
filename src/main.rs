use hartron_bill_rust::{api, AppConfig};
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env();
    info!("Starting server with config: {:?}", config);

    let state = api::AppState::new(config.export.clone());
    let app = api::router(state).layer(ServiceBuilder::new());

    // 启动服务器
    let addr = config.bind_addr();
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /api/bill/calculate        - 单笔账单计算");
    info!("  POST /api/bill/calculate/batch  - 批量计算");
    info!("  POST /api/bill/already-paid     - 已付金额分摊");
    info!("  POST /api/bill/export/csv       - 导出 CSV");
    info!("  POST /api/bill/export/pdf       - 导出 PDF");
    info!("  POST /api/bill/export/xlsx      - 导出 Excel");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
