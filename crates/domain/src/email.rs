//! # メール送信記録
//!
//! メール送信記録エンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`EmailRecord`] | メール送信記録 | 送信試行 1 回につき 1 レコード |
//! | [`DispatchRequest`] | 送信リクエスト | 検証済みの送信指示（値オブジェクトの集まり） |
//! | [`EmailStatus`] | 送信ステータス | SENT（成功）/ ERROR（失敗）の 2 値 |
//! | [`OwnerRef`] | オーナー参照 | 送信を依頼した呼び出し元の識別子 |
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: EmailId は UUID をラップし、型安全性を確保
//! - **不変性**: エンティティフィールドは不変、生成後に変更しない
//! - **バリデーション**: 値オブジェクトの生成時に検証ロジックを実行
//! - **ステータスは結果の記録**: 送信処理の結果が確定してからレコードを生成する
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use mailflow_domain::email::{
//!     DispatchRequest, EmailAddress, EmailId, EmailRecord, EmailStatus, MailBody, OwnerRef,
//!     Subject,
//! };
//!
//! // 送信リクエストの組み立て（各フィールドは生成時に検証される）
//! let request = DispatchRequest {
//!     owner_ref:  OwnerRef::new("billing-service")?,
//!     email_from: EmailAddress::new("noreply@example.com")?,
//!     email_to:   EmailAddress::new("user@example.com")?,
//!     subject:    Subject::new("ご請求のお知らせ")?,
//!     body:       MailBody::new("今月のご請求金額をお知らせします。")?,
//! };
//!
//! // 送信結果が確定してから記録を生成する
//! let record = EmailRecord::new(EmailId::new(), request, chrono::Utc::now(), EmailStatus::Sent);
//! assert!(record.is_sent());
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::DomainError;

define_uuid_id! {
    /// メール送信記録 ID（一意識別子）
    ///
    /// emails テーブルの主キー。UUID v7 を使用し、生成順にソート可能。
    pub struct EmailId;
}

/// メールアドレス（値オブジェクト）
///
/// RFC 5322 に準拠した形式を要求する。
/// 生成時にバリデーションを実行し、不正な値の作成を防ぐ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `@` を含む
    /// - 最大 255 文字
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        // 基本的な構造検証: local@domain の形式であること
        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        };

        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        if value.len() > 255 {
            return Err(DomainError::Validation(
                "メールアドレスは255文字以内である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

define_validated_string! {
    /// オーナー参照（値オブジェクト）
    ///
    /// 送信を依頼した呼び出し元システムの識別子を表現する。
    /// レコードの検索・集計のキーとして使用される。
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 255 文字
    pub struct OwnerRef {
        label: "オーナー参照",
        max_length: 255,
    }
}

define_validated_string! {
    /// 件名（値オブジェクト）
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 255 文字
    pub struct Subject {
        label: "件名",
        max_length: 255,
    }
}

define_validated_string! {
    /// メール本文（値オブジェクト）
    ///
    /// 本文には個人情報が含まれうるため、Debug 出力はマスクされる。
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 10,000 文字
    pub struct MailBody {
        label: "本文",
        max_length: 10_000,
        pii: true,
    }
}

/// 送信ステータス
///
/// 送信試行の結果を表現する列挙型。
/// データベースと API レスポンスの両方で大文字表記（"SENT" / "ERROR"）を使用する。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum EmailStatus {
    /// トランスポートがメールを受理した
    Sent,
    /// トランスポートがエラーを返した（レコードは記録される）
    Error,
}

impl std::str::FromStr for EmailStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SENT" => Ok(Self::Sent),
            "ERROR" => Ok(Self::Error),
            _ => Err(DomainError::Validation(format!("不正な送信ステータス: {s}"))),
        }
    }
}

/// 送信リクエスト（値オブジェクトの集まり）
///
/// 検証済みの送信指示を表現する。各フィールドは生成時にバリデーション済みの
/// 値オブジェクトであるため、この型が存在する時点で入力は正当である。
///
/// # 不変条件
///
/// - すべてのフィールドが検証済み
/// - 送信処理の結果（ステータス）はこの型には含まれない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    /// 送信を依頼した呼び出し元の識別子
    pub owner_ref:  OwnerRef,
    /// 送信元メールアドレス
    pub email_from: EmailAddress,
    /// 送信先メールアドレス
    pub email_to:   EmailAddress,
    /// 件名
    pub subject:    Subject,
    /// 本文（プレーンテキスト）
    pub body:       MailBody,
}

/// メール送信記録エンティティ
///
/// 送信試行 1 回につき 1 レコードを表現する。
/// 送信の成否にかかわらず必ず生成され、データベースに永続化される。
///
/// # 不変条件
///
/// - `sent_at` は送信試行を開始した時刻（結果の確定時刻ではない）
/// - `status` はトランスポートの結果が確定してから設定される
/// - 生成後の変更は不可（再送は新しいレコードとして記録する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRecord {
    id: EmailId,
    owner_ref: OwnerRef,
    email_from: EmailAddress,
    email_to: EmailAddress,
    subject: Subject,
    body: MailBody,
    sent_at: DateTime<Utc>,
    status: EmailStatus,
}

impl EmailRecord {
    /// 送信試行の結果から新しい記録を作成する
    ///
    /// # 引数
    ///
    /// - `id`: メール送信記録 ID
    /// - `request`: 検証済みの送信リクエスト
    /// - `sent_at`: 送信試行を開始した時刻（呼び出し元から注入）
    /// - `status`: トランスポートの結果から確定した送信ステータス
    pub fn new(
        id: EmailId,
        request: DispatchRequest,
        sent_at: DateTime<Utc>,
        status: EmailStatus,
    ) -> Self {
        Self {
            id,
            owner_ref: request.owner_ref,
            email_from: request.email_from,
            email_to: request.email_to,
            subject: request.subject,
            body: request.body,
            sent_at,
            status,
        }
    }

    /// 既存のデータから記録を復元する（データベースから取得時）
    #[allow(clippy::too_many_arguments)]
    pub fn from_db(
        id: EmailId,
        owner_ref: OwnerRef,
        email_from: EmailAddress,
        email_to: EmailAddress,
        subject: Subject,
        body: MailBody,
        sent_at: DateTime<Utc>,
        status: EmailStatus,
    ) -> Self {
        Self {
            id,
            owner_ref,
            email_from,
            email_to,
            subject,
            body,
            sent_at,
            status,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> &EmailId {
        &self.id
    }

    pub fn owner_ref(&self) -> &OwnerRef {
        &self.owner_ref
    }

    pub fn email_from(&self) -> &EmailAddress {
        &self.email_from
    }

    pub fn email_to(&self) -> &EmailAddress {
        &self.email_to
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn body(&self) -> &MailBody {
        &self.body
    }

    pub fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    pub fn status(&self) -> EmailStatus {
        self.status
    }

    // ビジネスロジックメソッド

    /// 送信が成功した記録か判定する
    pub fn is_sent(&self) -> bool {
        self.status == EmailStatus::Sent
    }
}
