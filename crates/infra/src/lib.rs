//! # Furikomi インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理
//! - **リポジトリ実装**: 取引レコードの永続化と検索
//! - **メール送信**: SMTP 経由の通知メール送信
//! - **ジョブキュー**: 通知ジョブのエンキュー（インプロセス / Redis）
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! インフラ層は `domain` に依存する。
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`redis`] - Redis 接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//! - [`notification`] - メール送信（SMTP / Noop）
//! - [`queue`] - 通知ジョブキュー（インプロセス / Redis）

pub mod db;
pub mod error;
pub mod notification;
pub mod queue;
pub mod redis;
pub mod repository;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::InfraError;
