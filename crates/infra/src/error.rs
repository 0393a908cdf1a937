//! # インフラ層エラー定義
//!
//! データベース操作と行復元の失敗を表現するエラー型。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum の二段構え:
//!
//! - [`InfraError`]: 種別（[`InfraErrorKind`]）に [`SpanTrace`] を添えたラッパー
//! - [`InfraErrorKind`]: 失敗の具体的な種別
//!
//! `From` 変換やコンストラクタを通った時点で呼び出し経路が自動記録されるため、
//! リポジトリの奥で起きたエラーでもログからどのスパンを通ったか追跡できる。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// 種別で分岐する場合は [`kind()`](InfraError::kind) を使う。
/// API 層はこのエラーを一律 500 に変換し、詳細はログにのみ残す。
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// データベースエラー
    ///
    /// クエリ実行の失敗、接続断、制約違反など。
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// 予期しないエラー
    ///
    /// DB 上の行がドメインの検証規則を通らなかった場合など、
    /// 本来起こらないはずの状態。
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// 生成時に捕捉した SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// 予期しないエラーを生成する
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Unexpected(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Database(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    /// SpanTrace の捕捉には ErrorLayer 付き subscriber が必要
    fn in_span<T>(name: &'static str, f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        let span = tracing::info_span!("repo_op", op = name);
        let _enter = span.enter();
        f()
    }

    #[test]
    fn test_sqlxエラーからの変換で経路が記録される() {
        let err = in_span("find_by_id", || InfraError::from(sqlx::Error::RowNotFound));

        assert!(matches!(err.kind(), InfraErrorKind::Database(_)));
        assert!(format!("{}", err.span_trace()).contains("repo_op"));
    }

    #[test]
    fn test_unexpectedはメッセージを保持する() {
        let err = in_span("restore", || InfraError::unexpected("不正なステータス値"));

        assert!(matches!(
            err.kind(),
            InfraErrorKind::Unexpected(msg) if msg == "不正なステータス値"
        ));
    }

    #[test]
    fn test_displayは種別のメッセージを出す() {
        let err = InfraError::unexpected("検証失敗");

        assert_eq!(format!("{err}"), "予期しないエラー: 検証失敗");
    }

    #[test]
    fn test_sourceは元のsqlxエラーを指す() {
        use std::error::Error as _;

        let err = InfraError::from(sqlx::Error::RowNotFound);

        assert!(err.source().is_some());
    }
}
