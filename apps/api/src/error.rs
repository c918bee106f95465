//! # API エラー定義
//!
//! API サーバーで発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## レスポンス契約
//!
//! | エラー | ステータス | ボディ |
//! |--------|-----------|--------|
//! | `InvalidRequest` | 400 | `{"error": "Invalid request"}` |
//! | `Infra` / `Internal` | 500 | `{"error": "Internal server error"}` |
//!
//! 400 のボディはメソッド不一致・ボディ不正のどちらでも同一。
//! クライアントには失敗理由の内訳を開示しない。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// エラーレスポンス
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// API サーバーで発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 不正なリクエスト（メソッド不一致・ボディのデコード失敗）
    #[error("不正なリクエスト")]
    InvalidRequest,

    /// インフラエラー（DB・キュー）
    #[error("インフラエラー: {0}")]
    Infra(#[from] furikomi_infra::InfraError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidRequest => (StatusCode::BAD_REQUEST, "Invalid request"),
            ApiError::Infra(e) => {
                tracing::error!("インフラエラー: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
