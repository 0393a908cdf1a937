//! # ページネーション付きレスポンス
//!
//! オフセットベースのページネーションに対応した API レスポンス型。

use serde::{Deserialize, Serialize};

/// ページネーション付きレスポンス
///
/// `ApiResponse<T>` が単一データ用であるのに対し、
/// `PageResponse<T>` はリスト + ページメタデータのページネーション形式。
/// ページ番号は 0 始まり。
///
/// ## JSON 形式
///
/// ```json
/// {
///   "data": [...],
///   "page": 0,
///   "size": 5,
///   "totalElements": 12,
///   "totalPages": 3
/// }
/// ```
///
/// `data` が空でページメタデータだけが返る場合は、ページ番号が
/// データ範囲を超えていることを意味する（エラーにはしない）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
   pub data:           Vec<T>,
   pub page:           u32,
   pub size:           u32,
   pub total_elements: u64,
   pub total_pages:    u32,
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_serializeでページメタデータがキャメルケースになる() {
      let response = PageResponse {
         data:           vec!["a", "b"],
         page:           0,
         size:           5,
         total_elements: 12,
         total_pages:    3,
      };
      let json = serde_json::to_value(&response).unwrap();

      assert_eq!(
         json,
         serde_json::json!({
            "data": ["a", "b"],
            "page": 0,
            "size": 5,
            "totalElements": 12,
            "totalPages": 3
         })
      );
   }

   #[test]
   fn test_空ページもそのままシリアライズされる() {
      let response: PageResponse<String> = PageResponse {
         data:           Vec::new(),
         page:           9,
         size:           5,
         total_elements: 12,
         total_pages:    3,
      };
      let json = serde_json::to_value(&response).unwrap();

      assert_eq!(json["data"], serde_json::json!([]));
      assert_eq!(json["page"], 9);
      assert_eq!(json["totalElements"], 12);
   }
}
