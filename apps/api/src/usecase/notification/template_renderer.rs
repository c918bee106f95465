//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知メールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **件名は固定**: `Transaction Successful`
//! - **金額の表示**: `$` 記号 + スケール 2 の固定小数点（`$12.50`）

use furikomi_domain::{
    notification::{EmailMessage, NotificationError},
    transaction::Transaction,
};
use tera::{Context, Tera};

/// 通知メールの件名
const SUBJECT: &str = "Transaction Successful";

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、[`Transaction`] から
/// [`EmailMessage`] を生成する。
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "transaction_success.html",
                    include_str!("../../../templates/notifications/transaction_success.html"),
                ),
                (
                    "transaction_success.txt",
                    include_str!("../../../templates/notifications/transaction_success.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// 取引レコードから通知メールを生成する
    ///
    /// `Amount` の Display はスケール 2 を保証するため、
    /// 本文の金額は常に `12.50` 形式になる。
    pub fn render(&self, transaction: &Transaction) -> Result<EmailMessage, NotificationError> {
        let mut context = Context::new();
        context.insert("amount", &transaction.amount().to_string());

        let html_body = self
            .engine
            .render("transaction_success.html", &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let text_body = self
            .engine
            .render("transaction_success.txt", &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(EmailMessage {
            to: transaction.customer_email().to_string(),
            subject: SUBJECT.to_string(),
            html_body,
            text_body,
        })
    }
}
