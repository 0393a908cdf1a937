//! メール送信記録 API 統合テスト
//!
//! 送信 → 取得 → 一覧を横断して、Dispatch Service API の
//! レスポンスデータの整合性を検証する。
//!
//! ## テストケース
//!
//! - 送信成功で 201 と SENT 記録が返る
//! - トランスポート失敗でも 201 で ERROR 記録が残る
//! - 不正な入力は 400 で、記録もトランスポート試行も発生しない
//! - 記録の挿入失敗は 500
//! - 存在しない ID は 404
//! - ページング（デフォルト値・順序・範囲外・パラメータ検証）

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
    routing::{get, post},
};
use chrono::{DateTime, Duration, Utc};
use mailflow_dispatch_service::{
    handler::{EmailState, get_email, health_check, list_all_emails, list_emails, send_email},
    usecase::EmailUseCaseImpl,
};
use mailflow_domain::{
    clock::FixedClock,
    email::{DispatchRequest, EmailAddress, EmailId, EmailRecord, EmailStatus, MailBody, OwnerRef, Subject},
};
use mailflow_infra::mock::{MockEmailRepository, MockMailSender};
use serde_json::{Value as JsonValue, json};
use tower::ServiceExt;
use uuid::Uuid;

// --- テストヘルパー ---

fn fixed_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// テスト用 Dispatch Service アプリケーションを構築する
fn create_test_app() -> (Router, MockEmailRepository, MockMailSender) {
    let repo = MockEmailRepository::new();
    let sender = MockMailSender::new();
    let clock = Arc::new(FixedClock::new(fixed_now()));
    let usecase = EmailUseCaseImpl::new(Arc::new(repo.clone()), Arc::new(sender.clone()), clock);
    let state = Arc::new(EmailState { usecase });

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/sending-email", post(send_email))
        .route("/emails", get(list_emails))
        .route("/emails/all", get(list_all_emails))
        .route("/emails/{id}", get(get_email))
        .with_state(state);

    (app, repo, sender)
}

/// バリデーションが通る送信リクエスト JSON
fn valid_send_json() -> JsonValue {
    json!({
        "ownerRef": "billing-service",
        "emailFrom": "noreply@example.com",
        "emailTo": "tanaka@example.com",
        "subject": "ご請求のお知らせ",
        "text": "今月のご請求金額をお知らせします。"
    })
}

/// 決定的な ID と送信時刻を持つ記録を作成する（n は 1 始まり）
fn make_record(n: u64) -> EmailRecord {
    let request = DispatchRequest {
        owner_ref:  OwnerRef::new("billing-service").unwrap(),
        email_from: EmailAddress::new("noreply@example.com").unwrap(),
        email_to:   EmailAddress::new(format!("user{n}@example.com")).unwrap(),
        subject:    Subject::new(format!("件名 {n}")).unwrap(),
        body:       MailBody::new("本文").unwrap(),
    };
    EmailRecord::new(
        EmailId::from_uuid(Uuid::from_u128(u128::from(n))),
        request,
        fixed_now() + Duration::minutes(n as i64),
        EmailStatus::Sent,
    )
}

/// ID 昇順 = 挿入順になる記録を count 件シードする
fn seed_records(repo: &MockEmailRepository, count: u64) {
    for n in 1..=count {
        repo.add_record(make_record(n));
    }
}

/// レスポンスボディを JSON として解析する
async fn parse_body(response: axum::http::Response<Body>) -> JsonValue {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// メールを送信し、レスポンスの data を返すヘルパー
async fn send_email_via_api(app: &Router, body: JsonValue) -> JsonValue {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/sending-email")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = parse_body(response).await;
    json["data"].clone()
}

/// GET リクエストを送信するヘルパー
async fn get_via_api(app: &Router, uri: &str) -> axum::http::Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

// --- 送信テストケース ---

#[tokio::test]
async fn test_送信成功で201とsent記録が返る() {
    // Given
    let (app, repo, sender) = create_test_app();

    // When
    let data = send_email_via_api(&app, valid_send_json()).await;

    // Then: レスポンスに記録の全フィールドが含まれる
    assert!(!data["id"].as_str().unwrap().is_empty());
    assert_eq!(data["ownerRef"], "billing-service");
    assert_eq!(data["emailFrom"], "noreply@example.com");
    assert_eq!(data["emailTo"], "tanaka@example.com");
    assert_eq!(data["subject"], "ご請求のお知らせ");
    assert_eq!(data["text"], "今月のご請求金額をお知らせします。");
    assert_eq!(data["status"], "SENT");
    assert!(
        data["sentAt"]
            .as_str()
            .unwrap()
            .starts_with("2023-11-14T22:13:20")
    );

    // Then: トランスポートへの送信と記録の挿入が 1 回ずつ行われている
    assert_eq!(sender.sent().len(), 1);
    assert_eq!(repo.records().len(), 1);
}

#[tokio::test]
async fn test_トランスポート失敗でも201でerror記録が残る() {
    // Given
    let (app, repo, sender) = create_test_app();
    sender.set_fail(true);

    // When
    let data = send_email_via_api(&app, valid_send_json()).await;

    // Then: レスポンスはステータス ERROR の記録
    assert_eq!(data["status"], "ERROR");

    // Then: 失敗した試行も記録されている
    let records = repo.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status(), EmailStatus::Error);
    assert_eq!(sender.sent().len(), 1);
}

#[tokio::test]
async fn test_宛先が空の場合は400で副作用がない() {
    // Given
    let (app, repo, sender) = create_test_app();
    let mut body = valid_send_json();
    body["emailTo"] = json!("");

    // When
    let request = Request::builder()
        .method(Method::POST)
        .uri("/sending-email")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = parse_body(response).await;
    assert_eq!(json["title"], "Bad Request");
    assert_eq!(json["detail"], "宛先メールアドレスの形式が不正です");

    // Then: 記録もトランスポート試行も発生していない
    assert!(repo.records().is_empty());
    assert!(sender.sent().is_empty());
}

#[tokio::test]
async fn test_送信元の形式が不正な場合は400() {
    // Given
    let (app, _repo, _sender) = create_test_app();
    let mut body = valid_send_json();
    body["emailFrom"] = json!("not-an-address");

    // When
    let request = Request::builder()
        .method(Method::POST)
        .uri("/sending-email")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = parse_body(response).await;
    assert_eq!(json["detail"], "送信元メールアドレスの形式が不正です");
}

#[tokio::test]
async fn test_件名が空の場合は400() {
    // Given
    let (app, repo, _sender) = create_test_app();
    let mut body = valid_send_json();
    body["subject"] = json!("");

    // When
    let request = Request::builder()
        .method(Method::POST)
        .uri("/sending-email")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = parse_body(response).await;
    assert_eq!(json["detail"], "件名は必須です");
    assert!(repo.records().is_empty());
}

#[tokio::test]
async fn test_記録の挿入失敗は500を返す() {
    // Given
    let (app, repo, sender) = create_test_app();
    repo.set_fail_insert(true);

    // When
    let request = Request::builder()
        .method(Method::POST)
        .uri("/sending-email")
        .header("content-type", "application/json")
        .body(Body::from(valid_send_json().to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    // Then: 詳細は漏らさず固定メッセージ
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = parse_body(response).await;
    assert_eq!(json["title"], "Internal Server Error");
    assert_eq!(json["detail"], "内部エラーが発生しました");

    // Then: トランスポートへの送信自体は挿入より先に行われている
    assert_eq!(sender.sent().len(), 1);
}

// --- 取得テストケース ---

#[tokio::test]
async fn test_作成した記録を取得すると全フィールドが一致する() {
    // Given
    let (app, _repo, _sender) = create_test_app();
    let created = send_email_via_api(&app, valid_send_json()).await;
    let id = created["id"].as_str().unwrap();

    // When
    let response = get_via_api(&app, &format!("/emails/{id}")).await;

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    let got = parse_body(response).await;
    let got_data = &got["data"];
    assert_eq!(got_data["id"], created["id"]);
    assert_eq!(got_data["ownerRef"], created["ownerRef"]);
    assert_eq!(got_data["emailFrom"], created["emailFrom"]);
    assert_eq!(got_data["emailTo"], created["emailTo"]);
    assert_eq!(got_data["subject"], created["subject"]);
    assert_eq!(got_data["text"], created["text"]);
    assert_eq!(got_data["sentAt"], created["sentAt"]);
    assert_eq!(got_data["status"], created["status"]);
}

#[tokio::test]
async fn test_存在しないidは404を返す() {
    // Given
    let (app, _repo, _sender) = create_test_app();
    let id = Uuid::new_v4();

    // When
    let response = get_via_api(&app, &format!("/emails/{id}")).await;

    // Then
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = parse_body(response).await;
    assert_eq!(json["title"], "Not Found");
    assert_eq!(json["detail"], format!("メールが見つかりません: {id}"));
}

#[tokio::test]
async fn test_uuid形式でないidは400を返す() {
    // Given
    let (app, _repo, _sender) = create_test_app();

    // When
    let response = get_via_api(&app, "/emails/not-a-uuid").await;

    // Then: axum のパスパラメータ検証で弾かれる
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// --- 一覧テストケース ---

#[tokio::test]
async fn test_デフォルトのページングは最新5件をid降順で返す() {
    // Given
    let (app, repo, _sender) = create_test_app();
    seed_records(&repo, 12);

    // When
    let response = get_via_api(&app, "/emails").await;

    // Then: ページメタデータ
    assert_eq!(response.status(), StatusCode::OK);
    let json = parse_body(response).await;
    assert_eq!(json["page"], 0);
    assert_eq!(json["size"], 5);
    assert_eq!(json["totalElements"], 12);
    assert_eq!(json["totalPages"], 3);

    // Then: 新しい順（ID 降順）で 5 件
    let subjects: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["subject"].as_str().unwrap())
        .collect();
    assert_eq!(subjects, vec!["件名 12", "件名 11", "件名 10", "件名 9", "件名 8"]);
}

#[tokio::test]
async fn test_2ページ目以降も順序が継続する() {
    // Given
    let (app, repo, _sender) = create_test_app();
    seed_records(&repo, 12);

    // When: 2 ページ目
    let response = get_via_api(&app, "/emails?page=1").await;
    let json = parse_body(response).await;

    // Then
    let subjects: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["subject"].as_str().unwrap())
        .collect();
    assert_eq!(subjects, vec!["件名 7", "件名 6", "件名 5", "件名 4", "件名 3"]);

    // When: 最終ページは端数の 2 件
    let response = get_via_api(&app, "/emails?page=2").await;
    let json = parse_body(response).await;

    // Then
    let subjects: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["subject"].as_str().unwrap())
        .collect();
    assert_eq!(subjects, vec!["件名 2", "件名 1"]);
}

#[tokio::test]
async fn test_範囲外のページは空のdataと正しい件数を返す() {
    // Given
    let (app, repo, _sender) = create_test_app();
    seed_records(&repo, 3);

    // When
    let response = get_via_api(&app, "/emails?page=10").await;

    // Then: エラーにはならず、メタデータは維持される
    assert_eq!(response.status(), StatusCode::OK);
    let json = parse_body(response).await;
    assert_eq!(json["data"], json!([]));
    assert_eq!(json["page"], 10);
    assert_eq!(json["totalElements"], 3);
    assert_eq!(json["totalPages"], 1);
}

#[tokio::test]
async fn test_送信時刻昇順でソートできる() {
    // Given
    let (app, repo, _sender) = create_test_app();
    seed_records(&repo, 3);

    // When
    let response = get_via_api(&app, "/emails?sort=sentAt&direction=asc").await;

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    let json = parse_body(response).await;
    let subjects: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["subject"].as_str().unwrap())
        .collect();
    assert_eq!(subjects, vec!["件名 1", "件名 2", "件名 3"]);
}

#[tokio::test]
async fn test_不正なページングパラメータは400を返す() {
    // Given
    let (app, _repo, _sender) = create_test_app();

    // When / Then: サイズ 0
    let response = get_via_api(&app, "/emails?size=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // When / Then: サイズ上限超過
    let response = get_via_api(&app, "/emails?size=101").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = parse_body(response).await;
    assert_eq!(json["detail"], "ページサイズは 1 以上 100 以下である必要があります");

    // When / Then: 不正なソート項目
    let response = get_via_api(&app, "/emails?sort=subject").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = parse_body(response).await;
    assert_eq!(json["detail"], "不正なソート項目: subject");

    // When / Then: 不正なソート方向
    let response = get_via_api(&app, "/emails?direction=up").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_emails_allは全件をid昇順で返す() {
    // Given
    let (app, repo, _sender) = create_test_app();
    seed_records(&repo, 7);

    // When
    let response = get_via_api(&app, "/emails/all").await;

    // Then: 挿入順（ID 昇順）で全件
    assert_eq!(response.status(), StatusCode::OK);
    let json = parse_body(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 7);
    assert_eq!(data[0]["subject"], "件名 1");
    assert_eq!(data[6]["subject"], "件名 7");
}

#[tokio::test]
async fn test_healthエンドポイントが稼働状態を返す() {
    // Given
    let (app, _repo, _sender) = create_test_app();

    // When
    let response = get_via_api(&app, "/health").await;

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    let json = parse_body(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}
