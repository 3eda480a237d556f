use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, Router},
    Extension,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod models;
mod routes;
mod services;
mod state;
mod stores;
mod utils;

use crate::{
    config::Config,
    services::{AuthService, CommentService, Database, NotificationService},
    state::AppState,
    stores::{SurrealCommentStore, SurrealNotificationSink, SurrealPostStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "rainbow_board=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Rainbow-Board service...");

    // 加载配置
    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    // 初始化数据库连接
    let db = Arc::new(match Database::new(&config).await {
        Ok(db) => match db.verify_connection().await {
            Ok(_) => {
                info!("Database connection established successfully");
                db
            }
            Err(e) => {
                warn!("Database connection failed: {}", e);
                info!("Attempting to auto-start database...");

                if let Err(start_err) = auto_start_database(&config).await {
                    error!(
                        "Failed to auto-start database: {}. Original error: {}",
                        start_err, e
                    );
                    return Err(anyhow::anyhow!("Database connection failed"));
                }

                let db = Database::new(&config).await?;
                db.verify_connection().await?;
                info!("Database auto-started and connected successfully");
                db
            }
        },
        Err(e) => {
            error!("Failed to create database connection: {}", e);
            return Err(anyhow::anyhow!("Database initialization failed"));
        }
    });

    // 初始化所有服务
    let auth_service = AuthService::new(&config).await?;
    let notification_service =
        NotificationService::new(Arc::new(SurrealNotificationSink::new(db.clone())));
    let comment_service = CommentService::new(
        Arc::new(SurrealPostStore::new(db.clone())),
        Arc::new(SurrealCommentStore::new(db.clone())),
        notification_service,
    );

    // 创建应用状态
    let app_state = Arc::new(AppState {
        config: config.clone(),
        db,
        auth_service: auth_service.clone(),
        comment_service,
    });

    // 配置 CORS
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .allow_origin(
            config
                .cors_allowed_origins
                .split(',')
                .map(|origin| origin.parse::<HeaderValue>().unwrap())
                .collect::<Vec<_>>(),
        );

    // 构建应用路由 - 使用/api/board/前缀避免网关路由冲突
    let app = Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .nest("/api/board/comments", routes::comments::router())
        .layer(Extension(auth_service))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(
            utils::middleware::request_logging_middleware,
        ))
        .with_state(app_state);

    // 启动主服务器
    let addr = format!("{}:{}", config.server_host, config.server_port);
    info!("Starting server on http://{}", addr);

    axum::Server::bind(&addr.parse()?)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "Rainbow-Board is running!"
}

async fn auto_start_database(config: &Config) -> anyhow::Result<()> {
    info!("Attempting to start SurrealDB...");

    let output = tokio::process::Command::new("surreal")
        .args([
            "start",
            "--user",
            &config.database_username,
            "--pass",
            &config.database_password,
            "memory",
        ])
        .spawn();

    match output {
        Ok(_) => {
            info!("SurrealDB started successfully");
            // 等待数据库启动
            tokio::time::sleep(std::time::Duration::from_secs(3)).await;
            Ok(())
        }
        Err(e) => {
            error!("Failed to start SurrealDB: {}", e);
            Err(anyhow::anyhow!("Failed to start database"))
        }
    }
}
