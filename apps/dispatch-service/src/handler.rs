//! # HTTP リクエストハンドラ
//!
//! axum のルーティングに結び付けるハンドラ群。サブモジュールごとに
//! 関連するエンドポイントをまとめ、ここで re-export してルータ定義
//! （`main.rs`）からフラットに参照できるようにする。
//!
//! ハンドラの責務はリクエストの受け取りとレスポンスへの変換まで。
//! 送信や永続化の手順は `usecase` 層に委譲する。

pub mod email;
pub mod health;

pub use email::{EmailState, get_email, list_all_emails, list_emails, send_email};
pub use health::health_check;
