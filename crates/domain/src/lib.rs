//! # Furikomi ドメイン層
//!
//! 取引通知サービスのドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! このクレートは以下を提供する:
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（[`transaction::Transaction`]）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（[`transaction::Amount`],
//!   [`transaction::TransactionStatus`]）
//! - **通知モデル**: メール通知のメッセージとジョブペイロード（[`notification`]）
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、Redis、SMTP）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`transaction`] - 取引エンティティと値オブジェクト
//! - [`notification`] - メール通知のドメインモデル
//! - [`clock`] - テスト可能な時刻プロバイダ

#[macro_use]
mod macros;

pub mod clock;
pub mod notification;
pub mod transaction;
