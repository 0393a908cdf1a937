//! # 送信メッセージ
//!
//! メールトランスポート境界へ渡す送信メッセージを定義する。
//!
//! ## 設計方針
//!
//! - **レンダリング済みの値のみ**: トランスポートに渡す時点で値オブジェクトから
//!   プレーンな文字列に変換し、インフラ層がドメインの検証規則に依存しないようにする
//! - **送信元はメッセージに含める**: 送信元アドレスは記録ごとに異なるため、
//!   トランスポートの設定ではなくメッセージ自身が保持する
//! - **失敗は値として返す**: 送信失敗は [`MailError`] として呼び出し元に返り、
//!   呼び出し元が記録のステータスに反映する

use thiserror::Error;

/// メール送信エラー
#[derive(Debug, Error)]
pub enum MailError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),
}

/// 送信メッセージ
///
/// トランスポート（SMTP / SES / Noop）へ渡す最終形。
/// 本文はプレーンテキストのみを扱う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    /// 送信元メールアドレス
    pub from:    String,
    /// 送信先メールアドレス
    pub to:      String,
    /// 件名
    pub subject: String,
    /// プレーンテキスト本文
    pub body:    String,
}
