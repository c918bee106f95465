//! # リポジトリ実装
//!
//! ドメインエンティティの永続化を担当するリポジトリを提供する。

pub mod transaction_repository;

pub use transaction_repository::{PostgresTransactionRepository, TransactionRepository};
