//! # メールトランスポート
//!
//! メール送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `MailSender` trait でメール送信を抽象化
//! - **3 つの実装**: SMTP（Mailpit 開発用）、SES（本番用）、Noop（ログのみ）
//! - **環境変数切替**: `MAIL_BACKEND` でランタイム選択
//! - **送信元はメッセージ側**: 送信元アドレスは記録ごとに異なるため、
//!   トランスポートは保持しない

mod noop;
mod ses;
mod smtp;

use async_trait::async_trait;
use mailflow_domain::mail::{MailError, OutgoingMail};
pub use noop::NoopMailSender;
pub use ses::SesMailSender;
pub use smtp::SmtpMailSender;

/// メール送信トレイト
///
/// メール送信の具体的な方法を抽象化する。
/// SMTP / SES / Noop の 3 実装を環境変数で切り替える。
#[async_trait]
pub trait MailSender: Send + Sync {
    /// メールを送信する
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}
