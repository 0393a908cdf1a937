//! # メール API ハンドラ
//!
//! Dispatch Service のメール送信・照会エンドポイントを実装する。
//!
//! リクエストボディとクエリパラメータのバリデーションはここで行い、
//! 不正な入力はユースケースに到達する前に 400 として弾く。

use std::sync::Arc;

use axum::{
   Json,
   extract::{Path, Query, State},
   http::StatusCode,
   response::{IntoResponse, Response},
};
use mailflow_domain::{
   DomainError,
   email::{DispatchRequest, EmailAddress, EmailId, EmailRecord, MailBody, OwnerRef, Subject},
   page::{DEFAULT_PAGE_SIZE, PageRequest, SortDirection, SortField},
};
use mailflow_shared::{ApiResponse, PageResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::DispatchError, usecase::EmailUseCaseImpl};

/// メール送信リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
   /// 記録の所有者を示す参照（呼び出し元サービス名など）
   pub owner_ref:  String,
   /// 送信元メールアドレス
   pub email_from: String,
   /// 宛先メールアドレス
   pub email_to:   String,
   /// 件名
   pub subject:    String,
   /// 本文
   pub text:       String,
}

/// 一覧取得クエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListEmailsQuery {
   /// ページ番号（0 始まり、デフォルト 0）
   pub page:      Option<u32>,
   /// 1 ページあたりの件数（デフォルト 5、最大 100）
   pub size:      Option<u32>,
   /// ソート項目（"id" | "sentAt"、デフォルト "id"）
   pub sort:      Option<String>,
   /// ソート方向（"asc" | "desc"、デフォルト "desc"）
   pub direction: Option<String>,
}

/// メール送信記録 DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRecordDto {
   pub id:         String,
   pub owner_ref:  String,
   pub email_from: String,
   pub email_to:   String,
   pub subject:    String,
   pub text:       String,
   pub sent_at:    String,
   pub status:     String,
}

impl From<&EmailRecord> for EmailRecordDto {
   fn from(record: &EmailRecord) -> Self {
      Self {
         id:         record.id().to_string(),
         owner_ref:  record.owner_ref().to_string(),
         email_from: record.email_from().to_string(),
         email_to:   record.email_to().to_string(),
         subject:    record.subject().to_string(),
         text:       record.body().as_str().to_string(),
         sent_at:    record.sent_at().to_rfc3339(),
         status:     record.status().to_string(),
      }
   }
}

/// メールハンドラーの State
pub struct EmailState {
   pub usecase: EmailUseCaseImpl,
}

/// ドメインのバリデーションエラーを 400 に変換する
///
/// レスポンスの detail には「バリデーションエラー:」の接頭辞を付けず、
/// 違反したルールの説明だけを返す。
fn validation_error(e: DomainError) -> DispatchError {
   let DomainError::Validation(msg) = e;
   DispatchError::BadRequest(msg)
}

/// メールを送信し、結果を記録する
///
/// ## エンドポイント
/// POST /sending-email
///
/// ## 処理フロー
/// 1. リクエストボディを値オブジェクトに変換（不正な入力は 400）
/// 2. ユースケースを呼び出し（送信試行 + 記録挿入）
/// 3. 作成された記録を 201 で返す
///
/// 送信自体の失敗はステータス `ERROR` の記録として返るため、
/// このエンドポイントが 500 を返すのは記録の挿入に失敗した場合のみ。
pub async fn send_email(
   State(state): State<Arc<EmailState>>,
   Json(req): Json<SendEmailRequest>,
) -> Result<Response, DispatchError> {
   // 入力を値オブジェクトに変換
   let owner_ref = OwnerRef::new(req.owner_ref).map_err(validation_error)?;
   let email_from = EmailAddress::new(req.email_from)
      .map_err(|_| DispatchError::BadRequest("送信元メールアドレスの形式が不正です".to_string()))?;
   let email_to = EmailAddress::new(req.email_to)
      .map_err(|_| DispatchError::BadRequest("宛先メールアドレスの形式が不正です".to_string()))?;
   let subject = Subject::new(req.subject).map_err(validation_error)?;
   let body = MailBody::new(req.text).map_err(validation_error)?;

   // ユースケースを呼び出し
   let request = DispatchRequest {
      owner_ref,
      email_from,
      email_to,
      subject,
      body,
   };

   let record = state.usecase.send_email(request).await?;

   // レスポンスを返す
   let response = ApiResponse::new(EmailRecordDto::from(&record));

   Ok((StatusCode::CREATED, Json(response)).into_response())
}

// ===== GET ハンドラ =====

/// メール送信記録の一覧をページ単位で取得する
///
/// ## エンドポイント
/// GET /emails?page={page}&size={size}&sort={sort}&direction={direction}
///
/// ## クエリパラメータ
/// - `page`: ページ番号（0 始まり、デフォルト 0）
/// - `size`: 1 ページあたりの件数（1〜100、デフォルト 5）
/// - `sort`: ソート項目（"id" | "sentAt"、デフォルト "id"）
/// - `direction`: ソート方向（"asc" | "desc"、デフォルト "desc"）
///
/// ## 処理フロー
/// 1. クエリパラメータをページングリクエストに変換（不正な値は 400）
/// 2. ユースケースを呼び出し
/// 3. ページメタデータ付きでレスポンスを返す
pub async fn list_emails(
   State(state): State<Arc<EmailState>>,
   Query(query): Query<ListEmailsQuery>,
) -> Result<Response, DispatchError> {
   // クエリパラメータをページングリクエストに変換
   let sort = match query.sort.as_deref() {
      Some(value) => value.parse::<SortField>().map_err(validation_error)?,
      None => SortField::Id,
   };
   let direction = match query.direction.as_deref() {
      Some(value) => value.parse::<SortDirection>().map_err(validation_error)?,
      None => SortDirection::Desc,
   };
   let request = PageRequest::new(
      query.page.unwrap_or(0),
      query.size.unwrap_or(DEFAULT_PAGE_SIZE),
      sort,
      direction,
   )
   .map_err(validation_error)?;

   // ユースケースを呼び出し
   let page = state.usecase.list_emails(&request).await?;

   // レスポンスを返す
   let response = PageResponse {
      data:           page.content.iter().map(EmailRecordDto::from).collect(),
      page:           page.page,
      size:           page.size,
      total_elements: page.total_elements,
      total_pages:    page.total_pages(),
   };

   Ok((StatusCode::OK, Json(response)).into_response())
}

/// すべてのメール送信記録を取得する
///
/// ## エンドポイント
/// GET /emails/all
///
/// ## 処理フロー
/// 1. ユースケースを呼び出し（ID 昇順 = 挿入順で全件取得）
/// 2. レスポンスを返す
pub async fn list_all_emails(
   State(state): State<Arc<EmailState>>,
) -> Result<Response, DispatchError> {
   let records = state.usecase.list_all_emails().await?;

   let response = ApiResponse::new(
      records
         .iter()
         .map(EmailRecordDto::from)
         .collect::<Vec<_>>(),
   );

   Ok((StatusCode::OK, Json(response)).into_response())
}

/// メール送信記録を ID で取得する
///
/// ## エンドポイント
/// GET /emails/{id}
///
/// ## 処理フロー
/// 1. パスパラメータから ID を取得
/// 2. ユースケースを呼び出し（存在しない場合は 404）
/// 3. レスポンスを返す
pub async fn get_email(
   State(state): State<Arc<EmailState>>,
   Path(id): Path<Uuid>,
) -> Result<Response, DispatchError> {
   let email_id = EmailId::from_uuid(id);

   let record = state.usecase.get_email(&email_id).await?;

   let response = ApiResponse::new(EmailRecordDto::from(&record));

   Ok((StatusCode::OK, Json(response)).into_response())
}
