/// UUID v7 を内包する ID 型を定義する宣言型マクロ
///
/// 各エンティティの ID は同じ形の Newtype になるため、定義を一箇所に集約する。
/// 生成されるもの:
///
/// - `Uuid` をラップする Newtype 構造体（`Debug`, `Clone`, `PartialEq`, `Eq`,
///   `Hash`, `Serialize`, `Deserialize`, `Display` 付き）
/// - `new()`: UUID v7 で採番（時刻順にソート可能）
/// - `from_uuid()` / `as_uuid()`: 既存 UUID との相互変換
/// - `Default`（`new()` と同じ）
///
/// # 使用例
///
/// ```rust
/// use mailflow_domain::email::EmailId;
///
/// let id = EmailId::new();
/// assert_eq!(EmailId::from_uuid(*id.as_uuid()), id);
/// ```
macro_rules! define_uuid_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[display("{_0}")]
        $vis struct $Name(uuid::Uuid);

        impl $Name {
            /// 新しい ID を採番する（UUID v7）
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            /// 既存の UUID から復元する
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// 内部の UUID への参照を返す
            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl Default for $Name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

/// バリデーション付き文字列型を定義する宣言型マクロ
///
/// `String` をラップする Newtype と、trim + 空チェック + 最大長チェックを行う
/// `new()` を生成する。最大長は `chars().count()` で数える（バイト長ではない）。
///
/// # PII フラグ
///
/// `pii: true` を付けた型は個人情報を含みうる値として扱う:
///
/// - `Debug` 出力が `[REDACTED]` にマスクされる
/// - `Display` を実装しない（ログへの平文流出を型レベルで防ぐ）
///
/// フラグなしの型は `derive(Debug)` と `Display` を持つ。
///
/// # 使用例
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use mailflow_domain::email::{MailBody, Subject};
///
/// let subject = Subject::new("ご請求のお知らせ")?;
/// assert_eq!(subject.to_string(), "ご請求のお知らせ");
///
/// // pii: true の型は Debug がマスクされる
/// let body = MailBody::new("今月のご請求金額をお知らせします。")?;
/// assert!(format!("{body:?}").contains("[REDACTED]"));
/// # Ok(())
/// # }
/// ```
macro_rules! define_validated_string {
    // 内部ルール: 両アーム共通の new() / as_str() / into_string()
    (@methods $Name:ident, $label:expr, $max_length:expr) => {
        impl $Name {
            pub fn new(value: impl Into<String>) -> Result<Self, $crate::DomainError> {
                let value = value.into().trim().to_string();

                if value.is_empty() {
                    return Err($crate::DomainError::Validation(format!(
                        "{}は必須です",
                        $label
                    )));
                }

                if value.chars().count() > $max_length {
                    return Err($crate::DomainError::Validation(format!(
                        "{}は {} 文字以内である必要があります",
                        $label, $max_length
                    )));
                }

                Ok(Self(value))
            }

            /// 文字列参照を取得する
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// 所有権を持つ文字列に変換する
            pub fn into_string(self) -> String {
                self.0
            }
        }
    };
    // PII 型: Debug マスク、Display なし
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident {
            label: $label:expr,
            max_length: $max_length:expr,
            pii: true $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, PartialEq, Eq,
            serde::Serialize, serde::Deserialize,
        )]
        $vis struct $Name(String);

        impl std::fmt::Debug for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($Name)).field(&"[REDACTED]").finish()
            }
        }

        define_validated_string!(@methods $Name, $label, $max_length);
    };
    // 通常の型: derive(Debug) + Display
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident {
            label: $label:expr,
            max_length: $max_length:expr $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq,
            serde::Serialize, serde::Deserialize,
        )]
        $vis struct $Name(String);

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        define_validated_string!(@methods $Name, $label, $max_length);
    };
}
