//! # Dispatch Service エラー定義
//!
//! Dispatch Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! レスポンスボディは `mailflow_shared::ErrorResponse`（RFC 9457 Problem
//! Details）で統一する。500 系は詳細を漏らさず、`tracing::error!` で
//! サーバーログにのみ原因を残す。

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use mailflow_shared::ErrorResponse;
use thiserror::Error;

/// Dispatch Service で発生するエラー
#[derive(Debug, Error)]
pub enum DispatchError {
   /// リソースが見つからない
   #[error("リソースが見つかりません: {0}")]
   NotFound(String),

   /// 不正なリクエスト
   #[error("不正なリクエスト: {0}")]
   BadRequest(String),

   /// データベースエラー
   #[error("データベースエラー: {0}")]
   Database(#[from] mailflow_infra::InfraError),

   /// 内部エラー
   #[error("内部エラー: {0}")]
   Internal(String),
}

impl IntoResponse for DispatchError {
   fn into_response(self) -> Response {
      let (status, body) = match &self {
         DispatchError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::not_found(msg.clone())),
         DispatchError::BadRequest(msg) => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::bad_request(msg.clone()),
         ),
         DispatchError::Database(e) => {
            tracing::error!("データベースエラー: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal_error())
         }
         DispatchError::Internal(msg) => {
            tracing::error!("内部エラー: {}", msg);
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal_error())
         }
      };

      (status, Json(body)).into_response()
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_not_foundは404に変換される() {
      let response = DispatchError::NotFound("メールが見つかりません".to_string()).into_response();
      assert_eq!(response.status(), StatusCode::NOT_FOUND);
   }

   #[test]
   fn test_bad_requestは400に変換される() {
      let response = DispatchError::BadRequest("件名は必須です".to_string()).into_response();
      assert_eq!(response.status(), StatusCode::BAD_REQUEST);
   }

   #[test]
   fn test_internalは500に変換される() {
      let response = DispatchError::Internal("予期しない状態".to_string()).into_response();
      assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
   }

   #[test]
   fn test_infra_errorからdatabaseエラーに変換される() {
      let infra_error = mailflow_infra::InfraError::unexpected("接続切断");
      let error = DispatchError::from(infra_error);

      assert!(matches!(error, DispatchError::Database(_)));
   }
}
