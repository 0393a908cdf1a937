//! # ユースケース層
//!
//! 送信と記録のビジネスロジックを持つ層。ハンドラからは trait 経由で
//! 呼び出され、リポジトリ・メールトランスポート・時計を
//! `Arc<dyn Trait>` として注入される。本番では Postgres と SES/SMTP、
//! テストではインメモリのモックに差し替えて使う。

pub mod email;

pub use email::EmailUseCaseImpl;
