//! # 通知サービス
//!
//! 通知ジョブ 1 件の実行フローを統合するサービス。
//!
//! ## 設計方針
//!
//! - **実行時再取得**: ジョブは取引 ID のみを運ぶため、実行時に DB から
//!   レコードを再取得する。見つからない場合は正常終了として無視する
//! - **送信失敗はエラーとして伝播**: リトライはしない。レコードは
//!   `pending` のまま残り、ワーカー側でログに記録される
//! - **依存性注入**: リポジトリ・送信・時刻はすべて trait で抽象化

use std::sync::Arc;

use furikomi_domain::{
    clock::Clock,
    notification::{NotificationError, SendTransactionEmail},
    transaction::TransactionStatus,
};
use furikomi_infra::{
    InfraError, notification::NotificationSender, repository::TransactionRepository,
};
use furikomi_shared::{event_log::event, log_business_event};
use thiserror::Error;

use super::TemplateRenderer;

/// 通知ジョブの実行エラー
#[derive(Debug, Error)]
pub enum NotificationJobError {
    /// DB アクセスに失敗
    #[error("インフラエラー: {0}")]
    Infra(#[from] InfraError),

    /// レンダリングまたは送信に失敗
    #[error("通知エラー: {0}")]
    Notification(#[from] NotificationError),
}

/// 通知サービス
///
/// 取引の再取得 → レンダリング → 送信 → ステータス更新を 1 ジョブとして
/// 実行する。同一ジョブが複数回実行された場合、メールはその回数だけ
/// 送信される（重複抑止はしない）。
pub struct NotificationService {
    repository: Arc<dyn TransactionRepository>,
    sender: Arc<dyn NotificationSender>,
    template_renderer: TemplateRenderer,
    clock: Arc<dyn Clock>,
}

impl NotificationService {
    pub fn new(
        repository: Arc<dyn TransactionRepository>,
        sender: Arc<dyn NotificationSender>,
        template_renderer: TemplateRenderer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            sender,
            template_renderer,
            clock,
        }
    }

    /// 通知ジョブを 1 件実行する
    ///
    /// 取引が見つからない場合は `Ok(())` を返す（エンキュー後に
    /// レコードが消えたケースは異常ではなくノーオペとして扱う）。
    /// 送信失敗時はエラーを返し、レコードは `pending` のまま残る。
    #[tracing::instrument(skip_all, fields(transaction_id = %job.transaction_id))]
    pub async fn handle(&self, job: &SendTransactionEmail) -> Result<(), NotificationJobError> {
        let Some(transaction) = self.repository.find_by_id(&job.transaction_id).await? else {
            return Ok(());
        };

        let email = self.template_renderer.render(&transaction)?;
        self.sender.send_email(&email).await?;

        let now = self.clock.now();
        self.repository
            .update_status(transaction.id(), TransactionStatus::Notified, now)
            .await?;

        log_business_event!(
            event.category = event::category::NOTIFICATION,
            event.action = event::action::NOTIFICATION_SENT,
            event.entity_type = event::entity_type::TRANSACTION,
            event.entity_id = %transaction.id(),
            event.result = event::result::SUCCESS,
            notification.recipient = %transaction.customer_email(),
            "通知メールを送信しました"
        );

        Ok(())
    }
}
