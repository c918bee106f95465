//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、取引のライフサイクルはドメイン層に委譲

pub mod health;
pub mod transaction;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use furikomi_infra::{queue::NotificationQueue, repository::TransactionRepository};
pub use health::health_check;
use tower_http::trace::TraceLayer;
pub use transaction::{TransactionState, create_transaction, invalid_request};

/// ルーターを構築する
///
/// `main` と統合テストの両方から呼び出す。キューバックエンドが
/// どちらでもルーター構成は同一になる。
pub fn build_router<R, Q>(state: Arc<TransactionState<R, Q>>) -> Router
where
    R: TransactionRepository + 'static,
    Q: NotificationQueue + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/transactions/",
            post(create_transaction::<R, Q>).fallback(invalid_request),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
