use anyhow::Context;
use product_api::app::product::{DefaultProductService, InMemoryProductRepository};
use product_api::infrastructure::{config::load_config, logger::Logger};
use product_api::{build_router, AppState};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 第一个命令行参数可指定配置文件
    let config_path = env::args().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;

    Logger::init(&config.logging.level);

    // 加载失败直接退出，不启动服务
    let repository = InMemoryProductRepository::load(&config.storage.products_path)
        .with_context(|| format!("加载产品文件失败: {}", config.storage.products_path.display()))?;
    let service = DefaultProductService::new(Arc::new(repository));
    let state = AppState::new(Arc::new(service), config.auth.token.as_str());

    let products = state.product_service.count_products().await?;
    info!(
        "已从 {} 加载 {} 个产品",
        config.storage.products_path.display(),
        products
    );

    let app = build_router(state);

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法绑定到 {addr}"))?;

    info!("🚀 产品 API 服务器运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /ping                     - 存活检查");
    info!("   GET    /health                   - 健康检查");
    info!("   GET    /products                 - 获取所有产品");
    info!("   GET    /products/:id             - 获取特定产品");
    info!("   GET    /products/search?priceGt= - 按价格搜索");
    info!("   POST   /products                 - 创建产品 (需要令牌)");
    info!("   PUT    /products/:id             - 替换产品 (需要令牌)");
    info!("   PATCH  /products/:id             - 部分更新 (需要令牌)");
    info!("   DELETE /products?id=             - 删除产品 (需要令牌)");

    axum::serve(listener, app).await?;
    Ok(())
}
