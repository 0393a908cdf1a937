//! # API レスポンスエンベロープ
//!
//! 単一リソースと一覧を `{ "data": T }` に包むエンベロープ型。
//! ページングメタデータ付きの一覧は [`crate::PageResponse`] を使う。

use serde::{Deserialize, Serialize};

/// `{ "data": T }` 形式のレスポンスエンベロープ
///
/// 送信記録の作成・取得・全件一覧のレスポンスで使用する。
/// Serialize / Deserialize の両方を実装しているため、
/// API クライアント側でも同じ型で受け取れる。
///
/// ## 使用例
///
/// ```
/// use mailflow_shared::ApiResponse;
///
/// let response = ApiResponse::new(vec![1, 2, 3]);
/// assert_eq!(response.data.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// 新しい `ApiResponse` を作成する
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
