//! # Dispatch Service 設定
//!
//! 起動時に環境変数を読み、サーバーとメール送信の設定を組み立てる。
//! `.env` の読み込み（dotenvy）は `main.rs` 側で済ませてあるため、
//! ここでは `std::env` だけを見る。
//!
//! 必須の変数が欠けている場合は起動時に panic して止める。
//! 起動してから最初のリクエストで気付くより早く失敗させたい。

use std::env;

/// Dispatch Service サーバーの設定
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// バインドアドレス（既定は全インターフェース）
    pub host: String,
    /// リッスンするポート番号
    pub port: u16,
    /// Postgres 接続 URL
    pub database_url: String,
    /// メール送信の設定
    pub mail: MailConfig,
}

/// メール送信の設定
///
/// `MAIL_BACKEND` でトランスポートを選ぶ:
/// - `smtp`: SMTP サーバー経由（開発時は Mailpit を想定）
/// - `ses`: Amazon SES v2（本番）
/// - `noop`: 実送信せずログに記録するだけ
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// 送信バックエンド（"smtp" | "ses" | "noop"）
    pub backend:   String,
    /// SMTP ホスト（backend=smtp のときのみ参照）
    pub smtp_host: String,
    /// SMTP ポート（backend=smtp のときのみ参照）
    pub smtp_port: u16,
}

impl DispatchConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host: env::var("DISPATCH_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("DISPATCH_PORT")
                .expect("DISPATCH_PORT が設定されていません")
                .parse()
                .expect("DISPATCH_PORT は有効なポート番号である必要があります"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL が設定されていません"),
            mail: MailConfig::from_env(),
        })
    }
}

impl MailConfig {
    /// 環境変数からメール送信設定を読み込む
    ///
    /// `MAIL_BACKEND` 未設定時は `smtp` に倒す。ローカル開発で
    /// Mailpit を立てていればそのまま動く既定値にしてある。
    fn from_env() -> Self {
        Self {
            backend:   env::var("MAIL_BACKEND").unwrap_or_else(|_| "smtp".to_string()),
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "1025".to_string())
                .parse()
                .expect("SMTP_PORT は有効なポート番号である必要があります"),
        }
    }
}
