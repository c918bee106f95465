//! # API サーバーライブラリ
//!
//! 取引作成エンドポイントと通知ワーカーを公開する。
//! 統合テストからルーター・ユースケースにアクセスできるようにする。

pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
pub mod worker;
