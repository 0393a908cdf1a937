//! Noop トランスポート
//!
//! 何も送信せず、送信内容の要約をログに残して成功を返す。
//! トランスポートを用意できない環境での動作確認用。

use async_trait::async_trait;
use mailflow_domain::mail::{MailError, OutgoingMail};

use super::MailSender;

/// 送信を行わない MailSender
#[derive(Debug, Clone)]
pub struct NoopMailSender;

#[async_trait]
impl MailSender for NoopMailSender {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        tracing::info!(
            from = %mail.from,
            to = %mail.to,
            subject = %mail.subject,
            "Noop: メール送信をスキップ"
        );
        Ok(())
    }
}
