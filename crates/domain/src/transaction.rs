//! # 取引
//!
//! 顧客の支払いイベントを表す取引エンティティと、その値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 要件 |
//! |---|------------|------|
//! | [`Transaction`] | 取引レコード | 作成時 `pending`、通知成功で `notified` |
//! | [`TransactionStatus`] | 通知ステータス | 2 状態のみ。`failed` は存在しない |
//! | [`Amount`] | 取引金額 | 小数点以下 2 桁の固定小数点 |
//!
//! ## 設計方針
//!
//! - **2 状態のライフサイクル**: `pending` → `notified` の一方向遷移のみ。
//!   送信失敗時の遷移先はなく、レコードは `pending` に留まる
//! - **customer_email は素の String**: メールアドレスの形式検証はスコープ外
//!   （ストレージ層が暗黙に強制する以上の検証は行わない）
//! - **updated_at の更新はエンティティ側**: ミューテーションメソッドが
//!   必ず `updated_at` を更新する

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use strum::IntoStaticStr;

define_uuid_id! {
    /// 取引 ID（一意識別子）
    ///
    /// transactions テーブルの主キー。UUID v7 を使用。
    pub struct TransactionId;
}

/// 通知ステータス
///
/// transactions テーブルの `status` カラムに格納される値。
/// snake_case でシリアライズされる。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// 初期状態: 通知メール未送信
    Pending,
    /// 通知メール送信成功後
    Notified,
}

/// 取引金額
///
/// 小数点以下 2 桁の固定小数点値。構築時に必ずスケール 2 に正規化される
/// （`12.5` → `12.50`）。非負チェックは行わない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// 金額を作成する（スケール 2 に正規化）
    pub fn new(value: Decimal) -> Self {
        let mut value = value;
        value.rescale(2);
        Self(value)
    }

    /// 内部の Decimal 参照を取得する
    pub fn as_decimal(&self) -> &Decimal {
        &self.0
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

// Deserialize は手動実装: JSON の数値（`12.5`）を受け取った後に
// スケール 2 への正規化を通す必要がある。
impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Ok(Self::new(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 取引エンティティ
///
/// 1 件の顧客支払いイベントを表す永続化レコード。
/// 作成後のミューテーションは [`mark_notified`](Transaction::mark_notified)
/// による 1 回のみ（通知ジョブが送信成功時に呼び出す）。削除パスは存在しない。
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    id:             TransactionId,
    customer_email: String,
    amount:         Amount,
    status:         TransactionStatus,
    created_at:     DateTime<Utc>,
    updated_at:     DateTime<Utc>,
}

/// 取引作成の入力
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub id:             TransactionId,
    pub customer_email: String,
    pub amount:         Amount,
    pub now:            DateTime<Utc>,
}

impl Transaction {
    /// 新しい取引を作成する
    ///
    /// ステータスは `pending`、`created_at` と `updated_at` はともに `now`。
    pub fn new(input: NewTransaction) -> Self {
        Self {
            id:             input.id,
            customer_email: input.customer_email,
            amount:         input.amount,
            status:         TransactionStatus::Pending,
            created_at:     input.now,
            updated_at:     input.now,
        }
    }

    /// DB から読み出した値でエンティティを復元する
    pub fn from_db(
        id: TransactionId,
        customer_email: String,
        amount: Amount,
        status: TransactionStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer_email,
            amount,
            status,
            created_at,
            updated_at,
        }
    }

    /// 通知成功を記録する
    ///
    /// ステータスを `notified` にし、`updated_at` を更新する。
    /// 既に `notified` の場合も再度 `updated_at` が更新される
    /// （重複実行の抑止はこの層の責務ではない）。
    pub fn mark_notified(&mut self, now: DateTime<Utc>) {
        self.status = TransactionStatus::Notified;
        self.updated_at = now;
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn transaction_statusの文字列変換が正しい() {
        // Display (snake_case)
        assert_eq!(TransactionStatus::Pending.to_string(), "pending");
        assert_eq!(TransactionStatus::Notified.to_string(), "notified");

        // FromStr (snake_case)
        assert_eq!(
            TransactionStatus::from_str("pending").unwrap(),
            TransactionStatus::Pending
        );
        assert_eq!(
            TransactionStatus::from_str("notified").unwrap(),
            TransactionStatus::Notified
        );
        assert!(TransactionStatus::from_str("failed").is_err());
    }

    #[rstest]
    #[case(Decimal::new(125, 1), "12.50")]
    #[case(Decimal::new(100, 0), "100.00")]
    #[case(Decimal::new(1250, 2), "12.50")]
    // 非負チェックは行わない
    #[case(Decimal::new(-5, 0), "-5.00")]
    fn amountはスケール2に正規化される(#[case] input: Decimal, #[case] expected: &str) {
        assert_eq!(Amount::new(input).to_string(), expected);
    }

    #[test]
    fn amountのjsonデシリアライズで数値が正規化される() {
        let amount: Amount = serde_json::from_str("12.5").unwrap();
        assert_eq!(amount.to_string(), "12.50");

        let amount: Amount = serde_json::from_str("100").unwrap();
        assert_eq!(amount.to_string(), "100.00");
    }

    fn make_transaction(now: DateTime<Utc>) -> Transaction {
        Transaction::new(NewTransaction {
            id:             TransactionId::new(),
            customer_email: "tanaka@example.com".to_string(),
            amount:         Amount::new(Decimal::new(1250, 2)),
            now,
        })
    }

    #[test]
    fn newで初期状態がpendingになる() {
        let now = Utc::now();
        let tx = make_transaction(now);

        assert_eq!(tx.status(), TransactionStatus::Pending);
        assert_eq!(tx.customer_email(), "tanaka@example.com");
        assert_eq!(tx.created_at(), now);
        assert_eq!(tx.updated_at(), now);
    }

    #[test]
    fn mark_notifiedでstatusとupdated_atが更新される() {
        let created = Utc::now();
        let mut tx = make_transaction(created);

        let later = created + Duration::seconds(30);
        tx.mark_notified(later);

        assert_eq!(tx.status(), TransactionStatus::Notified);
        assert_eq!(tx.updated_at(), later);
        // created_at は不変
        assert_eq!(tx.created_at(), created);
    }

    #[test]
    fn from_dbで全フィールドが復元される() {
        let id = TransactionId::new();
        let created = Utc::now();
        let updated = created + Duration::seconds(10);
        let tx = Transaction::from_db(
            id.clone(),
            "suzuki@example.com".to_string(),
            Amount::new(Decimal::new(999, 2)),
            TransactionStatus::Notified,
            created,
            updated,
        );

        assert_eq!(tx.id(), &id);
        assert_eq!(tx.status(), TransactionStatus::Notified);
        assert_eq!(tx.amount().to_string(), "9.99");
        assert_eq!(tx.created_at(), created);
        assert_eq!(tx.updated_at(), updated);
    }
}
