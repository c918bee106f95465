//! # 取引 API ハンドラ
//!
//! 取引作成エンドポイントを実装する。
//!
//! ## エンドポイント
//!
//! ```text
//! POST /api/transactions/
//! ```
//!
//! ## リクエスト / レスポンス
//!
//! ```json
//! // リクエスト
//! {"customer_email": "tanaka@example.com", "amount": 12.5}
//!
//! // 200 OK
//! {"message": "Transaction created and notification will be sent.",
//!  "transaction_id": "0192b1f0-..."}
//!
//! // 400 Bad Request（メソッド不一致・ボディ不正ともに同一）
//! {"error": "Invalid request"}
//! ```
//!
//! ## 設計方針
//!
//! - **fire-and-forget**: レスポンスはジョブの投入のみを保証する。
//!   メール送信の完了・成否はレスポンスに反映されない
//! - **重複抑止なし**: 同一取引に対して複数回ジョブが投入された場合、
//!   メールはその回数だけ送信される

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use furikomi_domain::{
    clock::Clock,
    notification::SendTransactionEmail,
    transaction::{Amount, NewTransaction, Transaction, TransactionId},
};
use furikomi_infra::{queue::NotificationQueue, repository::TransactionRepository};
use furikomi_shared::{event_log::event, log_business_event};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// 取引ハンドラーの State
pub struct TransactionState<R, Q> {
    pub repository: R,
    pub queue:      Q,
    pub clock:      Arc<dyn Clock>,
}

/// 取引作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub customer_email: String,
    pub amount:         Amount,
}

/// 取引作成レスポンス
#[derive(Debug, Serialize)]
pub struct CreateTransactionResponse {
    pub message:        String,
    pub transaction_id: TransactionId,
}

/// 取引を作成し、通知ジョブを投入する
///
/// レコードを `pending` で永続化した後、取引 ID のみを運ぶ通知ジョブを
/// キューに投入する。ジョブの完了は待たずに 200 を返す。
///
/// ## エンドポイント
/// POST /api/transactions/
#[tracing::instrument(skip_all)]
pub async fn create_transaction<R, Q>(
    State(state): State<Arc<TransactionState<R, Q>>>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    R: TransactionRepository,
    Q: NotificationQueue,
{
    // デコード失敗はすべて 400 に畳み込む（詳細は開示しない）
    let Ok(Json(request)) = payload else {
        return Err(ApiError::InvalidRequest);
    };

    let now = state.clock.now();
    let transaction = Transaction::new(NewTransaction {
        id: TransactionId::new(),
        customer_email: request.customer_email,
        amount: request.amount,
        now,
    });

    state.repository.insert(&transaction).await?;

    log_business_event!(
        event.category = event::category::TRANSACTION,
        event.action = event::action::TRANSACTION_CREATED,
        event.entity_type = event::entity_type::TRANSACTION,
        event.entity_id = %transaction.id(),
        event.result = event::result::SUCCESS,
        "取引を作成しました"
    );

    let job = SendTransactionEmail::new(transaction.id().clone());
    state.queue.enqueue(&job).await?;

    log_business_event!(
        event.category = event::category::NOTIFICATION,
        event.action = event::action::NOTIFICATION_ENQUEUED,
        event.entity_type = event::entity_type::TRANSACTION,
        event.entity_id = %transaction.id(),
        event.result = event::result::SUCCESS,
        "通知ジョブを投入しました"
    );

    let response = CreateTransactionResponse {
        message:        "Transaction created and notification will be sent.".to_string(),
        transaction_id: transaction.id().clone(),
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// メソッド不一致時のフォールバックハンドラ
///
/// `POST` 以外のメソッドでエンドポイントが叩かれた場合に 400 を返す。
/// axum デフォルトの 405 ではなく、ボディ不正時と同一の契約に揃える。
pub async fn invalid_request() -> ApiError {
    ApiError::InvalidRequest
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Method, Request, header},
        routing::post,
    };
    use furikomi_domain::{clock::FixedClock, transaction::TransactionStatus};
    use furikomi_infra::mock::{MockNotificationQueue, MockTransactionRepository};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    fn make_router(
        repository: MockTransactionRepository,
        queue: MockNotificationQueue,
    ) -> Router {
        let state = Arc::new(TransactionState {
            repository,
            queue,
            clock: Arc::new(FixedClock::new(chrono::Utc::now())) as Arc<dyn Clock>,
        });

        Router::new()
            .route(
                "/api/transactions/",
                post(create_transaction::<MockTransactionRepository, MockNotificationQueue>)
                    .fallback(invalid_request),
            )
            .with_state(state)
    }

    fn json_request(method: Method, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri("/api/transactions/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn 正常なpostで200とレコードとジョブが生成される() {
        let repository = MockTransactionRepository::new();
        let queue = MockNotificationQueue::new();
        let router = make_router(repository.clone(), queue.clone());

        let request = json_request(
            Method::POST,
            r#"{"customer_email": "tanaka@example.com", "amount": 12.5}"#,
        );
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json["message"],
            "Transaction created and notification will be sent."
        );

        // レコードは pending、金額はスケール 2 に正規化
        let transactions = repository.all();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].status(), TransactionStatus::Pending);
        assert_eq!(transactions[0].customer_email(), "tanaka@example.com");
        assert_eq!(transactions[0].amount().to_string(), "12.50");

        // ジョブはちょうど 1 件、レスポンスの transaction_id と一致
        let jobs = queue.jobs();
        assert_eq!(jobs.len(), 1);
        assert_eq!(
            jobs[0].transaction_id.to_string(),
            json["transaction_id"].as_str().unwrap()
        );
    }

    #[tokio::test]
    async fn getメソッドは400でレコードもジョブも生成されない() {
        let repository = MockTransactionRepository::new();
        let queue = MockNotificationQueue::new();
        let router = make_router(repository.clone(), queue.clone());

        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/transactions/")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Invalid request" }));

        assert!(repository.all().is_empty());
        assert!(queue.jobs().is_empty());
    }

    #[tokio::test]
    async fn 不正なjsonボディは400になる() {
        let repository = MockTransactionRepository::new();
        let queue = MockNotificationQueue::new();
        let router = make_router(repository.clone(), queue.clone());

        let request = json_request(Method::POST, r#"{"customer_email": 42}"#);
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Invalid request" }));

        assert!(repository.all().is_empty());
        assert!(queue.jobs().is_empty());
    }

    #[tokio::test]
    async fn content_typeなしのpostも400になる() {
        let repository = MockTransactionRepository::new();
        let queue = MockNotificationQueue::new();
        let router = make_router(repository, queue);

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/transactions/")
            .body(Body::from(
                r#"{"customer_email": "tanaka@example.com", "amount": 12.5}"#,
            ))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn 整数の金額もスケール2で保存される() {
        let repository = MockTransactionRepository::new();
        let queue = MockNotificationQueue::new();
        let router = make_router(repository.clone(), queue);

        let request = json_request(
            Method::POST,
            r#"{"customer_email": "suzuki@example.com", "amount": 100}"#,
        );
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(repository.all()[0].amount().to_string(), "100.00");
    }
}
