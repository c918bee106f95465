//! # TransactionRepository
//!
//! 取引レコードの永続化と検索を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **typed not-found**: 存在しない ID は `Ok(None)` で表現する。
//!   エラーではない（通知ジョブが意図的に握りつぶす失敗モードのため）
//! - **楽観的ロックなし**: 1 レコードを変更するのは実質 1 ジョブのみ
//!   という利用パターンのため、バージョンチェックは行わない

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use furikomi_domain::transaction::{Amount, Transaction, TransactionId, TransactionStatus};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// 取引リポジトリトレイト
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// 取引を挿入する
    async fn insert(&self, transaction: &Transaction) -> Result<(), InfraError>;

    /// ID で取引を検索する
    ///
    /// 存在しない場合は `Ok(None)` を返す。
    async fn find_by_id(&self, id: &TransactionId) -> Result<Option<Transaction>, InfraError>;

    /// ステータスを更新し、`updated_at` を更新する
    ///
    /// 呼び出し側が同一処理内でレコードを取得済みであることを前提とする。
    /// バージョンチェックは行わない。
    async fn update_status(
        &self,
        id: &TransactionId,
        status: TransactionStatus,
        now: DateTime<Utc>,
    ) -> Result<(), InfraError>;
}

/// transactions テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id:             Uuid,
    customer_email: String,
    amount:         Decimal,
    status:         String,
    created_at:     DateTime<Utc>,
    updated_at:     DateTime<Utc>,
}

impl TransactionRow {
    /// 行をドメインエンティティに変換する
    fn into_transaction(self) -> Result<Transaction, InfraError> {
        let status = TransactionStatus::from_str(&self.status).map_err(|_| {
            InfraError::unexpected(format!("不正なステータス値: {}", self.status))
        })?;

        Ok(Transaction::from_db(
            TransactionId::from_uuid(self.id),
            self.customer_email,
            Amount::new(self.amount),
            status,
            self.created_at,
            self.updated_at,
        ))
    }
}

/// PostgreSQL 実装の TransactionRepository
#[derive(Debug, Clone)]
pub struct PostgresTransactionRepository {
    pool: PgPool,
}

impl PostgresTransactionRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for PostgresTransactionRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, transaction: &Transaction) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, customer_email, amount, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(transaction.id().as_uuid())
        .bind(transaction.customer_email())
        .bind(transaction.amount().as_decimal())
        .bind(<&'static str>::from(transaction.status()))
        .bind(transaction.created_at())
        .bind(transaction.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_by_id(&self, id: &TransactionId) -> Result<Option<Transaction>, InfraError> {
        let row: Option<TransactionRow> = sqlx::query_as(
            r#"
            SELECT id, customer_email, amount, status, created_at, updated_at
            FROM transactions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TransactionRow::into_transaction).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn update_status(
        &self,
        id: &TransactionId,
        status: TransactionStatus,
        now: DateTime<Utc>,
    ) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            UPDATE transactions
            SET status = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(<&'static str>::from(status))
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
