//! # Furikomi API サーバー
//!
//! 取引作成 API と通知ワーカーを実行するサーバー。
//!
//! ## 役割
//!
//! - **取引作成**: `POST /api/transactions/` で取引レコードを永続化
//! - **通知ジョブ**: 作成された取引ごとに顧客へ通知メールを非同期送信
//! - **ステータス更新**: 送信成功で `pending` → `notified`
//!
//! ```text
//! ┌────────┐  POST   ┌──────────┐  enqueue  ┌─────────┐  send   ┌──────┐
//! │ Client │────────→│ Handler  │──────────→│ Worker  │────────→│ SMTP │
//! └────────┘  200    └──────────┘           └─────────┘         └──────┘
//!                          │ insert (pending)     │ update (notified)
//!                          ↓                      ↓
//!                    ┌──────────────────────────────┐
//!                    │          PostgreSQL          │
//!                    └──────────────────────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `API_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `QUEUE_BACKEND` | No | `in_process`（デフォルト）/ `redis` |
//! | `REDIS_URL` | No | Redis 接続 URL（backend=redis の場合） |
//! | `NOTIFICATION_BACKEND` | No | `smtp` / `noop`（デフォルト） |
//! | `SMTP_HOST` / `SMTP_PORT` | No | SMTP サーバー（backend=smtp の場合） |
//! | `NOTIFICATION_FROM_ADDRESS` | No | 送信元メールアドレス |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（Mailpit + ローカル Postgres）
//! NOTIFICATION_BACKEND=smtp cargo run -p furikomi-api
//!
//! # 本番環境
//! API_PORT=3000 DATABASE_URL=postgres://... cargo run -p furikomi-api --release
//! ```

mod config;
mod error;
mod handler;
mod usecase;
mod worker;

use std::{net::SocketAddr, sync::Arc};

use config::ApiConfig;
use furikomi_domain::clock::SystemClock;
use furikomi_infra::{
    db,
    notification::{NoopNotificationSender, NotificationSender, SmtpNotificationSender},
    queue::{InProcessNotificationQueue, RedisNotificationQueue},
    redis,
    repository::{PostgresTransactionRepository, TransactionRepository},
};
use handler::{TransactionState, build_router};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use usecase::{NotificationService, TemplateRenderer};
use worker::{run_in_process_worker, run_redis_worker};

/// API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,furikomi=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 設定読み込み
    let config = ApiConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!(
        "API サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成し、マイグレーションを適用
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("データベース接続に失敗しました");
    db::run_migrations(&pool)
        .await
        .expect("マイグレーションの適用に失敗しました");
    tracing::info!("データベースに接続しました");

    // 通知送信バックエンド
    let sender: Arc<dyn NotificationSender> = match config.notification.backend.as_str() {
        "smtp" => {
            tracing::info!(
                "SMTP 送信バックエンドを使用します: {}:{}",
                config.notification.smtp_host,
                config.notification.smtp_port
            );
            Arc::new(SmtpNotificationSender::new(
                &config.notification.smtp_host,
                config.notification.smtp_port,
                config.notification.from_address.clone(),
            ))
        }
        _ => {
            tracing::info!("Noop 送信バックエンドを使用します（メールは送信されません）");
            Arc::new(NoopNotificationSender)
        }
    };

    // 通知サービス（ワーカー側の依存）
    let repository = PostgresTransactionRepository::new(pool.clone());
    let clock = Arc::new(SystemClock);
    let service = Arc::new(NotificationService::new(
        Arc::new(repository.clone()) as Arc<dyn TransactionRepository>,
        sender,
        TemplateRenderer::new().expect("テンプレートの初期化に失敗しました"),
        clock.clone(),
    ));

    // キューバックエンドごとにワーカーを起動し、ルーターを構築
    let app = match config.queue.backend.as_str() {
        "redis" => {
            let conn = redis::create_connection_manager(&config.queue.redis_url)
                .await
                .expect("Redis 接続に失敗しました");
            tracing::info!("Redis キューバックエンドを使用します");

            let queue = RedisNotificationQueue::new(conn);
            tokio::spawn(run_redis_worker(queue.clone(), service));

            let state = Arc::new(TransactionState {
                repository,
                queue,
                clock,
            });
            build_router(state)
        }
        _ => {
            tracing::info!("インプロセスキューバックエンドを使用します");

            let (queue, receiver) = InProcessNotificationQueue::channel();
            tokio::spawn(run_in_process_worker(receiver, service));

            let state = Arc::new(TransactionState {
                repository,
                queue,
                clock,
            });
            build_router(state)
        }
    };

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("API サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
