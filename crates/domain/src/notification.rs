//! # 通知
//!
//! メール通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 要件 |
//! |---|------------|------|
//! | [`SendTransactionEmail`] | 通知ジョブペイロード | 取引 ID のみを運ぶ（ジョブ側で再取得） |
//! | [`EmailMessage`] | メールメッセージ | テンプレートレンダリングの出力 |
//!
//! ## 設計方針
//!
//! - **ペイロードは ID のみ**: ジョブは別の実行コンテキスト（ワーカー）で
//!   任意の遅延後に実行されるため、レコード全体ではなく ID を運び、
//!   実行時に再取得する
//! - **シリアライズ可能**: ペイロードはメッセージパッシング境界
//!   （Redis キュー等）を越えるため serde でシリアライズ可能にする

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transaction::TransactionId;

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
    /// プレーンテキスト本文
    pub text_body: String,
}

/// 取引通知ジョブのペイロード
///
/// 作成エンドポイントがエンキューし、通知ワーカーがデキューして処理する。
/// エンキューは fire-and-forget: リクエストはジョブの完了を待たない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendTransactionEmail {
    /// 通知対象の取引 ID
    pub transaction_id: TransactionId,
}

impl SendTransactionEmail {
    pub fn new(transaction_id: TransactionId) -> Self {
        Self { transaction_id }
    }
}
