//! メール送信記録ユースケース
//!
//! 送信試行と記録を 1 つの操作として扱う。送信の成否はステータスとして
//! 記録に残り、呼び出し元へは伝播しない。記録の挿入失敗だけがエラーになる。

use std::sync::Arc;

use mailflow_domain::{
    clock::Clock,
    email::{DispatchRequest, EmailId, EmailRecord, EmailStatus},
    mail::OutgoingMail,
    page::{Page, PageRequest},
};
use mailflow_infra::{mail::MailSender, repository::EmailRepository};

use crate::error::DispatchError;

/// メール送信記録ユースケース
pub struct EmailUseCaseImpl {
    email_repository: Arc<dyn EmailRepository>,
    mail_sender: Arc<dyn MailSender>,
    clock: Arc<dyn Clock>,
}

impl EmailUseCaseImpl {
    pub fn new(
        email_repository: Arc<dyn EmailRepository>,
        mail_sender: Arc<dyn MailSender>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            email_repository,
            mail_sender,
            clock,
        }
    }

    /// メールを送信し、結果を記録する
    ///
    /// 1. 送信 ID を採番し、送信試行時刻を時計から取得
    /// 2. トランスポートへ送信を試行
    /// 3. 送信結果からステータスを確定（送信失敗は ERROR として吸収）
    /// 4. emails テーブルに記録を 1 件挿入
    pub async fn send_email(&self, request: DispatchRequest) -> Result<EmailRecord, DispatchError> {
        // 送信 ID と送信試行時刻を採番
        let id = EmailId::new();
        let sent_at = self.clock.now();

        let mail = OutgoingMail {
            from:    request.email_from.as_str().to_string(),
            to:      request.email_to.as_str().to_string(),
            subject: request.subject.as_str().to_string(),
            body:    request.body.as_str().to_string(),
        };

        // トランスポートへ送信を試行
        // 送信失敗は記録のステータスに吸収し、呼び出し元へは伝播しない
        let status = match self.mail_sender.send(&mail).await {
            Ok(()) => EmailStatus::Sent,
            Err(e) => {
                tracing::error!(id = %id, "メール送信に失敗しました: {}", e);
                EmailStatus::Error
            }
        };

        // 記録を挿入（挿入失敗はエラーとして伝播する）
        let record = EmailRecord::new(id, request, sent_at, status);
        self.email_repository.insert(&record).await?;

        Ok(record)
    }

    /// ID で送信記録を 1 件取得する
    pub async fn get_email(&self, id: &EmailId) -> Result<EmailRecord, DispatchError> {
        self.email_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DispatchError::NotFound(format!("メールが見つかりません: {id}")))
    }

    /// すべての送信記録を ID 昇順（挿入順）で取得する
    pub async fn list_all_emails(&self) -> Result<Vec<EmailRecord>, DispatchError> {
        Ok(self.email_repository.find_all().await?)
    }

    /// 送信記録を 1 ページ分取得する
    ///
    /// 範囲外のページ番号はエラーにせず、空ページとして返す。
    pub async fn list_emails(
        &self,
        request: &PageRequest,
    ) -> Result<Page<EmailRecord>, DispatchError> {
        Ok(self.email_repository.find_page(request).await?)
    }
}
