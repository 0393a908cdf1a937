//! # ヘルスチェックハンドラ
//!
//! `GET /health` で Dispatch Service の死活を返す。
//!
//! DB や SMTP への疎通確認は行わず、プロセスが HTTP リクエストに
//! 応答できることだけを保証する。ALB のターゲットグループや
//! Kubernetes の liveness probe から定期的に叩かれる想定。
//!
//! レスポンスはトップレベルに `status` と `version` を並べる:
//!
//! ```json
//! { "status": "healthy", "version": "0.1.0" }
//! ```
//!
//! `version` はビルド時の `CARGO_PKG_VERSION` をそのまま埋め込むため、
//! デプロイされたバイナリの確認にも使える。

use axum::Json;
use mailflow_shared::HealthResponse;

/// ヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_healthyとパッケージバージョンを返す() {
        let Json(body) = health_check().await;

        assert_eq!(body.status, "healthy");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }
}
