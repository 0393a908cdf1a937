//! # ページング
//!
//! 一覧取得のページング条件と結果ページを定義する。
//!
//! ## 含まれる型
//!
//! | 型 | 用途 |
//! |---|------|
//! | [`PageRequest`] | ページング条件（ページ番号、件数、ソート） |
//! | [`SortField`] | ソート対象の項目（閉じた列挙型） |
//! | [`SortDirection`] | ソート方向（昇順 / 降順） |
//! | [`Page`] | 1 ページ分の結果と全体件数 |
//!
//! ## 設計方針
//!
//! - **オフセットページング**: ページ番号は 0 始まり、`offset = page * size`
//! - **閉じた列挙型**: ソート項目を列挙型に限定し、任意のカラム名が
//!   クエリに混入しないようにする
//! - **範囲外は空ページ**: 存在しないページ番号の要求はエラーではなく
//!   空の結果として扱う（リポジトリ側の責務）
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use mailflow_domain::page::{PageRequest, SortDirection, SortField};
//!
//! // 省略時のデフォルト: 先頭ページ（0 始まり）、5 件、ID の降順
//! let request = PageRequest::default();
//! assert_eq!(request.page(), 0);
//! assert_eq!(request.size(), 5);
//!
//! // 明示的な指定（ページサイズは生成時に検証される）
//! let request = PageRequest::new(2, 20, SortField::SentAt, SortDirection::Asc)?;
//! assert_eq!(request.offset(), 40);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::DomainError;

/// ページサイズの省略時デフォルト
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// ページサイズの上限
pub const MAX_PAGE_SIZE: u32 = 100;

/// ソート対象の項目
///
/// クエリパラメータ `sort` の値に対応する。
/// 閉じた列挙型にすることで、SQL の ORDER BY 句に渡せる値を
/// コンパイル時に確定させる。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SortField {
    /// メール ID（UUID v7 のため生成順と一致する）
    Id,
    /// 送信試行日時
    SentAt,
}

impl std::str::FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "sentAt" => Ok(Self::SentAt),
            _ => Err(DomainError::Validation(format!("不正なソート項目: {s}"))),
        }
    }
}

/// ソート方向
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    /// 昇順
    Asc,
    /// 降順
    Desc,
}

impl std::str::FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(DomainError::Validation(format!("不正なソート方向: {s}"))),
        }
    }
}

/// ページング条件（値オブジェクト）
///
/// 一覧取得 1 回分のページング条件を表現する。
///
/// # 不変条件
///
/// - `size` は 1 以上 [`MAX_PAGE_SIZE`] 以下
/// - `page` は 0 始まり（上限なし。範囲外は空ページとして解決される）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: SortField,
    direction: SortDirection,
}

impl PageRequest {
    /// ページング条件を作成する
    ///
    /// # バリデーション
    ///
    /// - `size` は 1 以上 [`MAX_PAGE_SIZE`] 以下
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(
        page: u32,
        size: u32,
        sort: SortField,
        direction: SortDirection,
    ) -> Result<Self, DomainError> {
        if !(1..=MAX_PAGE_SIZE).contains(&size) {
            return Err(DomainError::Validation(format!(
                "ページサイズは 1 以上 {MAX_PAGE_SIZE} 以下である必要があります"
            )));
        }

        Ok(Self {
            page,
            size,
            sort,
            direction,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> SortField {
        self.sort
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// 読み飛ばす行数（`page * size`）を返す
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    /// 省略時のページング条件（先頭ページ、5 件、ID の降順）
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: SortField::Id,
            direction: SortDirection::Desc,
        }
    }
}

/// 1 ページ分の結果
///
/// ページの内容に加えて、ページングメタデータの計算に必要な
/// 全体件数を保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// このページに含まれる要素
    pub content:        Vec<T>,
    /// ページ番号（0 始まり）
    pub page:           u32,
    /// 要求されたページサイズ
    pub size:           u32,
    /// 条件に合致する全体の件数
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// 結果ページを作成する
    pub fn new(content: Vec<T>, page: u32, size: u32, total_elements: u64) -> Self {
        Self {
            content,
            page,
            size,
            total_elements,
        }
    }

    /// 総ページ数を計算する（切り上げ）
    ///
    /// 件数ゼロの場合は 0 を返す。
    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(self.size)) as u32
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    // PageRequest のテスト

    #[test]
    fn test_デフォルトはid降順の先頭5件() {
        let request = PageRequest::default();

        assert_eq!(request.page(), 0);
        assert_eq!(request.size(), DEFAULT_PAGE_SIZE);
        assert_eq!(request.sort(), SortField::Id);
        assert_eq!(request.direction(), SortDirection::Desc);
    }

    #[rstest]
    #[case(1)]
    #[case(5)]
    #[case(100)]
    fn test_ページサイズは1以上100以下を受け入れる(#[case] size: u32) {
        assert!(PageRequest::new(0, size, SortField::Id, SortDirection::Desc).is_ok());
    }

    #[rstest]
    #[case(0, "ゼロ")]
    #[case(101, "上限超過")]
    #[case(1000, "大幅な上限超過")]
    fn test_範囲外のページサイズは拒否する(
        #[case] size: u32,
        #[case] _reason: &str,
    ) {
        assert!(PageRequest::new(0, size, SortField::Id, SortDirection::Desc).is_err());
    }

    #[rstest]
    #[case(0, 5, 0)]
    #[case(1, 5, 5)]
    #[case(2, 20, 40)]
    fn test_オフセットはページとサイズから計算される(
        #[case] page: u32,
        #[case] size: u32,
        #[case] expected: u64,
    ) {
        let request = PageRequest::new(page, size, SortField::Id, SortDirection::Desc).unwrap();

        assert_eq!(request.offset(), expected);
    }

    // SortField / SortDirection のテスト

    #[rstest]
    #[case("id", SortField::Id)]
    #[case("sentAt", SortField::SentAt)]
    fn test_ソート項目は文字列から復元できる(
        #[case] input: &str,
        #[case] expected: SortField,
    ) {
        assert_eq!(SortField::from_str(input).unwrap(), expected);
    }

    #[rstest]
    #[case("emailId", "未定義の項目")]
    #[case("sentat", "大文字小文字の不一致")]
    #[case("", "空文字列")]
    fn test_不正なソート項目は拒否する(#[case] input: &str, #[case] _reason: &str) {
        assert!(SortField::from_str(input).is_err());
    }

    #[rstest]
    #[case("asc", SortDirection::Asc)]
    #[case("desc", SortDirection::Desc)]
    fn test_ソート方向は文字列から復元できる(
        #[case] input: &str,
        #[case] expected: SortDirection,
    ) {
        assert_eq!(SortDirection::from_str(input).unwrap(), expected);
    }

    #[rstest]
    #[case("DESC", "大文字")]
    #[case("descending", "未定義の値")]
    fn test_不正なソート方向は拒否する(#[case] input: &str, #[case] _reason: &str) {
        assert!(SortDirection::from_str(input).is_err());
    }

    // Page のテスト

    #[test]
    fn test_総ページ数は切り上げで計算される() {
        let page: Page<u32> = Page::new(vec![], 0, 5, 12);

        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_件数ゼロの総ページ数はゼロ() {
        let page: Page<u32> = Page::new(vec![], 0, 5, 0);

        assert_eq!(page.total_pages(), 0);
    }

    #[test]
    fn test_ちょうど割り切れる場合の総ページ数() {
        let page: Page<u32> = Page::new(vec![], 0, 5, 10);

        assert_eq!(page.total_pages(), 2);
    }
}
