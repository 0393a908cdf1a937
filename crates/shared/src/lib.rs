//! # MailFlow 共有型
//!
//! API のワイヤ形式を定義する層をまたいだ共通型。
//! domain / infra / dispatch-service のすべてから参照される。
//!
//! ## 設計方針
//!
//! - レスポンスの形だけを持ち、ビジネスロジックは置かない
//! - Web フレームワークに依存しない（serde のみ）

pub mod api_response;
pub mod error_response;
pub mod health;
pub mod page_response;

pub use api_response::ApiResponse;
pub use error_response::ErrorResponse;
pub use health::HealthResponse;
pub use page_response::PageResponse;
