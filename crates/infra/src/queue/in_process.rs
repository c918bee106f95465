//! インプロセスキュー実装
//!
//! tokio の unbounded mpsc チャネルをキューとして使用する。
//! デキュー側（受信側）は起動時に spawn されるワーカータスクが保持する。

use async_trait::async_trait;
use furikomi_domain::notification::SendTransactionEmail;
use tokio::sync::mpsc;

use super::NotificationQueue;
use crate::error::InfraError;

/// インプロセス通知キュー
///
/// 単一プロセス構成向け。エンキューは同期的にチャネルへ送信するだけで、
/// ジョブはワーカータスク側で非同期に実行される。
#[derive(Debug, Clone)]
pub struct InProcessNotificationQueue {
    sender: mpsc::UnboundedSender<SendTransactionEmail>,
}

impl InProcessNotificationQueue {
    /// キューと受信側のペアを作成する
    ///
    /// 受信側はワーカーループ（`furikomi-api` の worker モジュール）に渡す。
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SendTransactionEmail>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl NotificationQueue for InProcessNotificationQueue {
    async fn enqueue(&self, job: &SendTransactionEmail) -> Result<(), InfraError> {
        // 受信側が drop 済み（ワーカー停止後）の場合のみ失敗する
        self.sender
            .send(job.clone())
            .map_err(|_| InfraError::queue("通知ワーカーが停止しています"))
    }
}

#[cfg(test)]
mod tests {
    use furikomi_domain::transaction::TransactionId;
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn エンキューしたジョブが受信側に届く() {
        let (queue, mut receiver) = InProcessNotificationQueue::channel();
        let job = SendTransactionEmail::new(TransactionId::new());

        queue.enqueue(&job).await.unwrap();

        let received = receiver.recv().await.unwrap();
        assert_eq!(received, job);
    }

    #[tokio::test]
    async fn 受信側がdrop済みの場合はエラーになる() {
        let (queue, receiver) = InProcessNotificationQueue::channel();
        drop(receiver);

        let job = SendTransactionEmail::new(TransactionId::new());
        assert!(queue.enqueue(&job).await.is_err());
    }

    #[tokio::test]
    async fn ジョブは投入順に取り出される() {
        let (queue, mut receiver) = InProcessNotificationQueue::channel();
        let first = SendTransactionEmail::new(TransactionId::new());
        let second = SendTransactionEmail::new(TransactionId::new());

        queue.enqueue(&first).await.unwrap();
        queue.enqueue(&second).await.unwrap();

        assert_eq!(receiver.recv().await.unwrap(), first);
        assert_eq!(receiver.recv().await.unwrap(), second);
    }
}
