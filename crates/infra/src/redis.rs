//! # Redis 接続管理
//!
//! Redis サーバーへの接続管理を行う。Furikomi では Redis を
//! 通知ジョブキューのバックエンド（[`crate::queue::RedisNotificationQueue`]）
//! として使用する。
//!
//! ## ConnectionManager vs Connection
//!
//! | 方式 | 特徴 | 用途 |
//! |------|------|------|
//! | `Connection` | 単一接続、手動管理 | 短期間の処理 |
//! | `ConnectionManager` | 自動再接続、スレッドセーフ | 長期稼働アプリ |
//!
//! `ConnectionManager` は接続が切断された場合に自動で再接続を試みる。
//! これにより、ネットワーク障害からの復旧が容易になる。

use redis::{Client, aio::ConnectionManager};

/// Redis 接続マネージャを作成する
///
/// アプリケーション起動時に一度だけ呼び出し、作成したマネージャを
/// アプリケーション全体で共有する。
///
/// # 引数
///
/// * `redis_url` - Redis 接続 URL
///   - 形式: `redis://[[username:]password@]host[:port][/database]`
///   - TLS: `rediss://` スキームで TLS 接続
///
/// # ConnectionManager の特徴
///
/// - **自動再接続**: 接続が切断されても自動的に再接続を試みる
/// - **Clone 可能**: 複数のタスクで安全に共有できる
pub async fn create_connection_manager(
    redis_url: &str,
) -> Result<ConnectionManager, redis::RedisError> {
    let client = Client::open(redis_url)?;
    ConnectionManager::new(client).await
}
