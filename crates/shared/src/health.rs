//! # ヘルスチェック型
//!
//! `/health` エンドポイントのレスポンスボディ。

use serde::{Deserialize, Serialize};

/// 稼働状態レスポンス
///
/// 監視側が死活確認とデプロイ中のバージョン特定に使う。
/// `version` にはビルド時の `CARGO_PKG_VERSION` を埋める。
///
/// ## 使用例
///
/// ```
/// use mailflow_shared::HealthResponse;
///
/// let response = HealthResponse {
///     status:  "healthy".to_string(),
///     version: env!("CARGO_PKG_VERSION").to_string(),
/// };
/// assert_eq!(response.status, "healthy");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態（`"healthy"` 固定。プロセスが応答できない場合はそもそも返らない）
    pub status:  String,
    /// アプリケーションバージョン
    pub version: String,
}
