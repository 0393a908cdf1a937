//! SMTP トランスポート
//!
//! lettre の `AsyncSmtpTransport` で送信する。
//! ローカル開発では Mailpit（ポート 1025）に向ける想定。

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Message, SinglePart, header::ContentType},
};
use mailflow_domain::mail::{MailError, OutgoingMail};

use super::MailSender;

/// SMTP 経由のメール送信
///
/// 送信元アドレスは [`OutgoingMail`] 側が持つため、
/// トランスポート自体は接続先の情報しか保持しない。
pub struct SmtpMailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailSender {
    /// 接続先を指定して作成する
    ///
    /// この時点では接続しない。実際の接続は送信時に張られる。
    pub fn new(host: &str, port: u16) -> Self {
        // builder_dangerous: TLS なしで接続（Mailpit 等のローカル SMTP 向け）
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self { transport }
    }
}

#[async_trait]
impl MailSender for SmtpMailSender {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let from = mail
            .from
            .parse()
            .map_err(|e| MailError::SendFailed(format!("送信元アドレス不正: {e}")))?;
        let to = mail
            .to
            .parse()
            .map_err(|e| MailError::SendFailed(format!("宛先アドレス不正: {e}")))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(&mail.subject)
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_PLAIN)
                    .body(mail.body.clone()),
            )
            .map_err(|e| MailError::SendFailed(format!("メッセージ構築失敗: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        Ok(())
    }
}
