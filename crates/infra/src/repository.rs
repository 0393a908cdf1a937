//! # リポジトリ
//!
//! メール送信記録の永続化トレイトと PostgreSQL 実装。
//!
//! トレイトはユースケース層が依存する境界で、実装の差し替え
//! （本番 = PostgreSQL、テスト = インメモリモック）を可能にする。

pub mod email_repository;

pub use email_repository::{EmailRepository, PostgresEmailRepository};
