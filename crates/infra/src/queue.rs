//! # 通知ジョブキュー
//!
//! 作成エンドポイントと通知ワーカーを分離するメッセージパッシング境界。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationQueue` trait でエンキューを抽象化。
//!   直接呼び出しではなくキュー越しにジョブを渡す
//! - **2 つのバックエンド**: インプロセス（tokio mpsc、開発・テスト用）と
//!   Redis（プロセスをまたぐワーカー構成用）
//! - **環境変数切替**: `QUEUE_BACKEND` でランタイム選択
//! - **fire-and-forget**: エンキュー後の完了通知はない。一度投入した
//!   ジョブは取り消せない

mod in_process;
mod redis;

use async_trait::async_trait;
use furikomi_domain::notification::SendTransactionEmail;
pub use in_process::InProcessNotificationQueue;

pub use self::redis::RedisNotificationQueue;
use crate::error::InfraError;

/// 通知ジョブキュートレイト
///
/// 作成エンドポイントがジョブを投入するための抽象化。
/// デキュー側はバックエンドごとに異なる（ワーカーループが担当）。
#[async_trait]
pub trait NotificationQueue: Send + Sync {
    /// ジョブを投入する
    ///
    /// 投入の成否のみを返す。ジョブの実行完了は待たない。
    async fn enqueue(&self, job: &SendTransactionEmail) -> Result<(), InfraError>;
}
