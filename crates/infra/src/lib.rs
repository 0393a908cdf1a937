//! # MailFlow インフラ層
//!
//! 外部システムとの境界を担当するクレート。
//! ドメイン層の型を PostgreSQL の行とメールトランスポートに橋渡しする。
//!
//! ## 責務
//!
//! - **データベース**: 接続プールとマイグレーション（[`db`]）
//! - **永続化**: emails テーブルへの記録と検索（[`repository`]）
//! - **メール送信**: SMTP / SES / Noop トランスポート（[`mail`]）
//!
//! ## 依存関係
//!
//! ```text
//! dispatch-service → infra → domain
//! ```
//!
//! ドメイン層はこのクレートを知らない。ユースケース層はトレイト
//! （[`repository::EmailRepository`] / [`mail::MailSender`]）越しに実装を受け取る。
//!
//! ## テスト支援
//!
//! `test-utils` feature を有効にすると、インメモリ実装の [`mock`] が
//! 他クレートから利用できる。

pub mod db;
pub mod error;
pub mod mail;
pub mod repository;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::InfraError;
