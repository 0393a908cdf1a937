//! SES トランスポート
//!
//! AWS SES v2 の `SendEmail` API で送信する。本番環境向け。
//! 送信元アドレスは SES 側で検証済みであること。

use async_trait::async_trait;
use aws_sdk_sesv2::{
    Client,
    types::{Body, Content, Destination, EmailContent, Message},
};
use mailflow_domain::mail::{MailError, OutgoingMail};

use super::MailSender;

/// SES 経由のメール送信
///
/// `aws_sdk_sesv2::Client` をラップする。
/// 認証情報とリージョンはクライアント構築時の AWS 設定に従う。
pub struct SesMailSender {
    client: Client,
}

impl SesMailSender {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MailSender for SesMailSender {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let subject = Content::builder()
            .data(&mail.subject)
            .build()
            .map_err(|e| MailError::SendFailed(format!("件名構築失敗: {e}")))?;
        let body_text = Content::builder()
            .data(&mail.body)
            .build()
            .map_err(|e| MailError::SendFailed(format!("本文構築失敗: {e}")))?;

        let content = EmailContent::builder()
            .simple(
                Message::builder()
                    .subject(subject)
                    .body(Body::builder().text(body_text).build())
                    .build(),
            )
            .build();

        self.client
            .send_email()
            .from_email_address(&mail.from)
            .destination(Destination::builder().to_addresses(&mail.to).build())
            .content(content)
            .send()
            .await
            .map_err(|e| MailError::SendFailed(format!("SES 送信失敗: {e}")))?;

        Ok(())
    }
}
