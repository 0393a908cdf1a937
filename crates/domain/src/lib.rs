//! # MailFlow ドメイン層
//!
//! メール送信記録サービスの中核となる型を定義する。
//! 送信記録（[`email::EmailRecord`]）を唯一のエンティティとし、
//! その属性はすべて生成時に検証済みの値オブジェクトで構成される。
//!
//! ## 依存関係の方向
//!
//! ```text
//! dispatch-service → infra → domain
//! ```
//!
//! このクレートは DB・SMTP・SES を知らない。トランスポートや永続化の
//! 差し替えがドメインモデルに波及しないよう、境界はトレイトで切る。
//!
//! ## モジュール構成
//!
//! - [`email`] - 送信記録エンティティと値オブジェクト
//! - [`mail`] - トランスポート境界へ渡す送信メッセージ
//! - [`page`] - ページング条件と結果ページ
//! - [`clock`] - 現在時刻の抽象化
//! - [`error`] - ドメインエラー
//!
//! ## 使用例
//!
//! ```rust
//! use mailflow_domain::email::{EmailId, EmailStatus};
//!
//! let id = EmailId::new();
//! assert!(!id.to_string().is_empty());
//!
//! let status: &'static str = EmailStatus::Sent.into();
//! assert_eq!(status, "SENT");
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod email;
pub mod error;
pub mod mail;
pub mod page;

pub use error::DomainError;
