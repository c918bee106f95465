//! # テスト用モックリポジトリ・モック送信
//!
//! ハンドラ・ユースケーステストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! furikomi-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use furikomi_domain::{
    notification::{EmailMessage, NotificationError, SendTransactionEmail},
    transaction::{Transaction, TransactionId, TransactionStatus},
};

use crate::{
    error::InfraError,
    notification::NotificationSender,
    queue::NotificationQueue,
    repository::TransactionRepository,
};

// ===== MockTransactionRepository =====

/// テスト用のインメモリ TransactionRepository
#[derive(Clone, Default)]
pub struct MockTransactionRepository {
    transactions: Arc<Mutex<Vec<Transaction>>>,
}

impl MockTransactionRepository {
    pub fn new() -> Self {
        Self {
            transactions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// レコードを直接投入する（テストの前提条件作成用）
    pub fn add_transaction(&self, transaction: Transaction) {
        self.transactions.lock().unwrap().push(transaction);
    }

    /// 全レコードのスナップショットを返す
    pub fn all(&self) -> Vec<Transaction> {
        self.transactions.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionRepository for MockTransactionRepository {
    async fn insert(&self, transaction: &Transaction) -> Result<(), InfraError> {
        let mut transactions = self.transactions.lock().unwrap();
        transactions.push(transaction.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TransactionId) -> Result<Option<Transaction>, InfraError> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id() == id)
            .cloned())
    }

    async fn update_status(
        &self,
        id: &TransactionId,
        status: TransactionStatus,
        now: DateTime<Utc>,
    ) -> Result<(), InfraError> {
        let mut transactions = self.transactions.lock().unwrap();
        if let Some(pos) = transactions.iter().position(|t| t.id() == id) {
            let current = &transactions[pos];
            transactions[pos] = Transaction::from_db(
                current.id().clone(),
                current.customer_email().to_string(),
                *current.amount(),
                status,
                current.created_at(),
                now,
            );
        }
        Ok(())
    }
}

// ===== MockNotificationSender =====

/// テスト用のモック NotificationSender
///
/// 送信されたメールを記録する。`fail_with` で送信失敗を再現できる。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent:      Arc<Mutex<Vec<EmailMessage>>>,
    fail_with: Arc<Mutex<Option<String>>>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以降の `send_email` を指定メッセージで失敗させる
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.fail_with.lock().unwrap() = Some(message.into());
    }

    /// 送信されたメールのスナップショットを返す
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            return Err(NotificationError::SendFailed(message));
        }

        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

// ===== MockNotificationQueue =====

/// テスト用のモック NotificationQueue
///
/// エンキューされたジョブを記録するのみで、ワーカーには渡さない。
/// ハンドラテストで「ちょうど 1 件エンキューされた」ことを検証する用途。
#[derive(Clone, Default)]
pub struct MockNotificationQueue {
    jobs: Arc<Mutex<Vec<SendTransactionEmail>>>,
}

impl MockNotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// エンキューされたジョブのスナップショットを返す
    pub fn jobs(&self) -> Vec<SendTransactionEmail> {
        self.jobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationQueue for MockNotificationQueue {
    async fn enqueue(&self, job: &SendTransactionEmail) -> Result<(), InfraError> {
        self.jobs.lock().unwrap().push(job.clone());
        Ok(())
    }
}
