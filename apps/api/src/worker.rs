//! # 通知ワーカー
//!
//! キューからジョブを取り出し、通知サービスに渡すループを定義する。
//!
//! ## 設計方針
//!
//! - **ジョブ失敗でループは止めない**: 1 件の失敗はログに記録して
//!   次のジョブへ進む。リトライ・デッドレターはなし
//! - **バックエンドごとに専用ループ**: インプロセスはチャネル受信、
//!   Redis はブロッキングポーリング

use std::{sync::Arc, time::Duration};

use furikomi_domain::notification::SendTransactionEmail;
use furikomi_infra::queue::RedisNotificationQueue;
use tokio::sync::mpsc;

use crate::usecase::NotificationService;

/// Redis ポーリングのブロックタイムアウト（秒）
const REDIS_POP_TIMEOUT_SECS: f64 = 5.0;

/// インプロセスキューのワーカーループ
///
/// チャネルの送信側がすべて drop されるとループを抜ける
/// （サーバー終了時のグレースフルシャットダウン）。
pub async fn run_in_process_worker(
    mut receiver: mpsc::UnboundedReceiver<SendTransactionEmail>,
    service: Arc<NotificationService>,
) {
    tracing::info!("インプロセス通知ワーカーを起動しました");

    while let Some(job) = receiver.recv().await {
        if let Err(e) = service.handle(&job).await {
            tracing::error!(
                error = %e,
                transaction_id = %job.transaction_id,
                "通知ジョブの実行に失敗しました"
            );
        }
    }

    tracing::info!("インプロセス通知ワーカーを終了します");
}

/// Redis キューのワーカーループ
///
/// `BRPOP` でジョブを取り出し続ける。接続エラー時は少し待ってから
/// 再試行する（Redis 再起動の間もワーカーは生存させる）。
pub async fn run_redis_worker(queue: RedisNotificationQueue, service: Arc<NotificationService>) {
    tracing::info!("Redis 通知ワーカーを起動しました");

    loop {
        match queue.pop(REDIS_POP_TIMEOUT_SECS).await {
            Ok(Some(job)) => {
                if let Err(e) = service.handle(&job).await {
                    tracing::error!(
                        error = %e,
                        transaction_id = %job.transaction_id,
                        "通知ジョブの実行に失敗しました"
                    );
                }
            }
            // タイムアウト（キューが空）は次のポーリングへ
            Ok(None) => {}
            Err(e) => {
                tracing::error!(error = %e, "ジョブの取り出しに失敗しました");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }
}
