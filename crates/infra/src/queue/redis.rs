//! Redis キュー実装
//!
//! Redis のリストをジョブキューとして使用する。エンキューは `LPUSH`、
//! デキューは `BRPOP`（ブロッキング）で行い、ペイロードは JSON で運ぶ。
//!
//! ## Redis キー設計
//!
//! | キー | 値 | 用途 |
//! |-----|-----|------|
//! | `furikomi:notification:jobs` | `SendTransactionEmail` (JSON) のリスト | 通知ジョブキュー |

use async_trait::async_trait;
use furikomi_domain::notification::SendTransactionEmail;
use redis::{AsyncCommands, aio::ConnectionManager};

use super::NotificationQueue;
use crate::error::InfraError;

/// 通知ジョブキューの Redis キー
const QUEUE_KEY: &str = "furikomi:notification:jobs";

/// Redis 通知キュー
///
/// API プロセスとワーカープロセスを分離する構成向け。
/// `ConnectionManager` は Clone 可能なため、エンキュー側とデキュー側で
/// 同じマネージャを共有できる。
#[derive(Clone)]
pub struct RedisNotificationQueue {
    conn: ConnectionManager,
}

impl RedisNotificationQueue {
    /// 新しい Redis キューを作成する
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    /// ジョブを 1 件取り出す（ブロッキング）
    ///
    /// `timeout_secs` 秒待ってもジョブがなければ `Ok(None)` を返す。
    /// ワーカーループがこのメソッドをポーリングする。
    pub async fn pop(&self, timeout_secs: f64) -> Result<Option<SendTransactionEmail>, InfraError> {
        let mut conn = self.conn.clone();
        let value: Option<(String, String)> = conn.brpop(QUEUE_KEY, timeout_secs).await?;

        match value {
            Some((_key, payload)) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl NotificationQueue for RedisNotificationQueue {
    async fn enqueue(&self, job: &SendTransactionEmail) -> Result<(), InfraError> {
        let payload = serde_json::to_string(job)?;
        let mut conn = self.conn.clone();
        let _: () = conn.lpush(QUEUE_KEY, payload).await?;

        Ok(())
    }
}
