//! # API サーバー設定
//!
//! 環境変数から API サーバーの設定を読み込む。

use std::env;

/// API サーバーの設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// データベース接続 URL
    pub database_url: String,
    /// キュー設定
    pub queue: QueueConfig,
    /// 通知設定
    pub notification: NotificationConfig,
}

/// 通知ジョブキューの設定
///
/// `QUEUE_BACKEND` 環境変数でバックエンドを切り替える:
/// - `in_process`: tokio チャネル（単一プロセス構成、デフォルト）
/// - `redis`: Redis リスト経由（ワーカープロセス分離構成）
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// キューバックエンド（"in_process" | "redis"）
    pub backend:   String,
    /// Redis 接続 URL（backend=redis の場合に使用）
    pub redis_url: String,
}

/// 通知機能の設定
///
/// `NOTIFICATION_BACKEND` 環境変数で送信バックエンドを切り替える:
/// - `smtp`: Mailpit（開発）/ SMTP サーバー経由で送信
/// - `noop`: 送信しない（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// 送信バックエンド（"smtp" | "noop"）
    pub backend:      String,
    /// SMTP ホスト（backend=smtp の場合に使用）
    pub smtp_host:    String,
    /// SMTP ポート（backend=smtp の場合に使用）
    pub smtp_port:    u16,
    /// 送信元メールアドレス
    pub from_address: String,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("API_PORT は有効なポート番号である必要があります"),
            database_url: env::var("DATABASE_URL")
                .expect("DATABASE_URL が設定されていません（.env を確認してください）"),
            queue: QueueConfig::from_env(),
            notification: NotificationConfig::from_env(),
        })
    }
}

impl QueueConfig {
    /// 環境変数からキュー設定を読み込む
    fn from_env() -> Self {
        Self {
            backend:   env::var("QUEUE_BACKEND").unwrap_or_else(|_| "in_process".to_string()),
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        }
    }
}

impl NotificationConfig {
    /// 環境変数から通知設定を読み込む
    fn from_env() -> Self {
        Self {
            backend:      env::var("NOTIFICATION_BACKEND").unwrap_or_else(|_| "noop".to_string()),
            smtp_host:    env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port:    env::var("SMTP_PORT")
                .unwrap_or_else(|_| "1025".to_string())
                .parse()
                .expect("SMTP_PORT は有効なポート番号である必要があります"),
            from_address: env::var("NOTIFICATION_FROM_ADDRESS")
                .unwrap_or_else(|_| "noreply@furikomi.example.com".to_string()),
        }
    }
}
