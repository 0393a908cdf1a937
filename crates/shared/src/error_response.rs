//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! 全エンドポイント共通のエラーボディ。
//!
//! ## 設計
//!
//! - 純粋なデータ構造として定義し、axum の `IntoResponse` 変換は
//!   サービス側に置く（shared は Web フレームワークに依存しない）
//! - `type` URI の組み立てはコンストラクタに集約し、呼び出し側での
//!   ハードコードを避ける

use serde::{Deserialize, Serialize};

/// error_type URI のベースパス
const ERROR_TYPE_BASE: &str = "https://mailflow.example.com/errors";

/// エラーレスポンスボディ
///
/// RFC 9457 Problem Details のサブセット。
/// `type` は問題種別を識別する URI、`detail` は人間可読な説明を持つ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   #[serde(rename = "type")]
   pub error_type: String,
   pub title:      String,
   pub status:     u16,
   pub detail:     String,
}

impl ErrorResponse {
   /// 汎用コンストラクタ
   ///
   /// `error_type_suffix` がベース URI の末尾に付く
   /// （例: `"bad-request"` → `.../errors/bad-request`）。
   pub fn new(
      error_type_suffix: &str,
      title: impl Into<String>,
      status: u16,
      detail: impl Into<String>,
   ) -> Self {
      Self {
         error_type: format!("{ERROR_TYPE_BASE}/{error_type_suffix}"),
         title: title.into(),
         status,
         detail: detail.into(),
      }
   }

   /// 400 Bad Request
   pub fn bad_request(detail: impl Into<String>) -> Self {
      Self::new("bad-request", "Bad Request", 400, detail)
   }

   /// 404 Not Found
   pub fn not_found(detail: impl Into<String>) -> Self {
      Self::new("not-found", "Not Found", 404, detail)
   }

   /// 500 Internal Server Error
   ///
   /// 原因の詳細はログにのみ残し、レスポンスの detail は固定文言にする。
   pub fn internal_error() -> Self {
      Self::new(
         "internal-error",
         "Internal Server Error",
         500,
         "内部エラーが発生しました",
      )
   }
}
