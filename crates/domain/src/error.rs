//! # ドメイン層エラー定義
//!
//! 値オブジェクト生成時のビジネスルール違反を表現するエラー型。
//!
//! ドメイン層の失敗はすべて入力値の検証失敗であり、API 層では
//! 400 Bad Request に変換される。記録が存在しない（404）などの
//! アプリケーション都合の失敗はサービス側のエラー型が扱う。
//!
//! ## 使用例
//!
//! ```rust
//! use mailflow_domain::DomainError;
//!
//! fn validate_subject(subject: &str) -> Result<(), DomainError> {
//!     if subject.is_empty() {
//!         return Err(DomainError::Validation("件名は必須です".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_subject("").is_err());
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// メッセージには違反したルールの説明が入り、そのまま
/// エラーレスポンスの detail として返せる文言にしておく。
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 必須フィールドの欠落、文字数超過、不正な形式など。
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
