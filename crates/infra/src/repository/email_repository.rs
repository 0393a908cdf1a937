//! # EmailRepository
//!
//! メール送信記録の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **挿入のみ**: 記録は不変であり、UPDATE / DELETE は提供しない
//! - **閉じたソート句**: ORDER BY に渡す値は [`SortField`] /
//!   [`SortDirection`] の列挙型から導出し、任意の文字列を混入させない
//! - **範囲外は空ページ**: 存在しないページ番号の要求は空の結果として返す

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mailflow_domain::{
    email::{
        EmailAddress, EmailId, EmailRecord, EmailStatus, MailBody, OwnerRef, Subject,
    },
    page::{Page, PageRequest, SortDirection, SortField},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// メール送信記録リポジトリトレイト
///
/// メール送信記録の永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait EmailRepository: Send + Sync {
    /// 送信記録を挿入する
    ///
    /// 送信の成否にかかわらず、試行 1 回につき 1 レコードを挿入する。
    async fn insert(&self, record: &EmailRecord) -> Result<(), InfraError>;

    /// ID で送信記録を検索する
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(record))`: 記録が見つかった場合
    /// - `Ok(None)`: 記録が見つからない場合
    /// - `Err(_)`: データベースエラー
    async fn find_by_id(&self, id: &EmailId) -> Result<Option<EmailRecord>, InfraError>;

    /// すべての送信記録を取得する
    ///
    /// ID の昇順（= 挿入順）で返す。
    async fn find_all(&self) -> Result<Vec<EmailRecord>, InfraError>;

    /// 送信記録を 1 ページ分取得する
    ///
    /// 条件に合致する全体件数も同時に返す。
    /// 範囲外のページ番号は空ページとして解決される。
    async fn find_page(&self, request: &PageRequest) -> Result<Page<EmailRecord>, InfraError>;
}

/// emails テーブルの 1 行
#[derive(Debug, sqlx::FromRow)]
struct EmailRow {
    id: Uuid,
    owner_ref: String,
    email_from: String,
    email_to: String,
    subject: String,
    body: String,
    sent_at: DateTime<Utc>,
    status: String,
}

impl EmailRow {
    /// DB の行をドメインエンティティに復元する
    ///
    /// DB 上の値はドメインの検証規則を満たしている前提。
    /// 満たさない場合は `InfraError::Unexpected` を返す。
    fn into_record(self) -> Result<EmailRecord, InfraError> {
        Ok(EmailRecord::from_db(
            EmailId::from_uuid(self.id),
            OwnerRef::new(&self.owner_ref).map_err(|e| InfraError::unexpected(e.to_string()))?,
            EmailAddress::new(&self.email_from)
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            EmailAddress::new(&self.email_to).map_err(|e| InfraError::unexpected(e.to_string()))?,
            Subject::new(&self.subject).map_err(|e| InfraError::unexpected(e.to_string()))?,
            MailBody::new(&self.body).map_err(|e| InfraError::unexpected(e.to_string()))?,
            self.sent_at,
            self.status
                .parse::<EmailStatus>()
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
        ))
    }
}

const SELECT_COLUMNS: &str =
    "id, owner_ref, email_from, email_to, subject, body, sent_at, status";

/// PostgreSQL 実装の EmailRepository
#[derive(Debug, Clone)]
pub struct PostgresEmailRepository {
    pool: PgPool,
}

impl PostgresEmailRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmailRepository for PostgresEmailRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(id = %record.id()))]
    async fn insert(&self, record: &EmailRecord) -> Result<(), InfraError> {
        let status: &'static str = record.status().into();

        sqlx::query(
            r#"
            INSERT INTO emails (id, owner_ref, email_from, email_to, subject, body, sent_at, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(record.id().as_uuid())
        .bind(record.owner_ref().as_str())
        .bind(record.email_from().as_str())
        .bind(record.email_to().as_str())
        .bind(record.subject().as_str())
        .bind(record.body().as_str())
        .bind(record.sent_at())
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &EmailId) -> Result<Option<EmailRecord>, InfraError> {
        let row = sqlx::query_as::<_, EmailRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM emails WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(row.into_record()?))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<EmailRecord>, InfraError> {
        let rows = sqlx::query_as::<_, EmailRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM emails ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EmailRow::into_record).collect()
    }

    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(page = request.page(), size = request.size())
    )]
    async fn find_page(&self, request: &PageRequest) -> Result<Page<EmailRecord>, InfraError> {
        let direction = match request.direction() {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        };
        // 同一時刻の行でもページ境界が安定するよう、sent_at ソート時は
        // id を第 2 キーにする
        let order_by = match request.sort() {
            SortField::Id => format!("id {direction}"),
            SortField::SentAt => format!("sent_at {direction}, id {direction}"),
        };

        let rows = sqlx::query_as::<_, EmailRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM emails ORDER BY {order_by} LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(request.size()))
        .bind(request.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        let content = rows
            .into_iter()
            .map(EmailRow::into_record)
            .collect::<Result<Vec<_>, _>>()?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM emails")
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(
            content,
            request.page(),
            request.size(),
            total as u64,
        ))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_row() -> EmailRow {
        EmailRow {
            id: Uuid::now_v7(),
            owner_ref: "billing-service".to_string(),
            email_from: "noreply@example.com".to_string(),
            email_to: "user@example.com".to_string(),
            subject: "ご請求のお知らせ".to_string(),
            body: "今月のご請求金額をお知らせします。".to_string(),
            sent_at: Utc::now(),
            status: "SENT".to_string(),
        }
    }

    #[test]
    fn test_db行からエンティティを復元できる() {
        let row = sample_row();
        let id = row.id;

        let record = row.into_record().unwrap();

        assert_eq!(record.id().as_uuid(), &id);
        assert_eq!(record.owner_ref().as_str(), "billing-service");
        assert_eq!(record.status(), EmailStatus::Sent);
    }

    #[test]
    fn test_不正なステータス値の行は復元に失敗する() {
        let row = EmailRow {
            status: "UNKNOWN".to_string(),
            ..sample_row()
        };

        let result = row.into_record();

        assert!(result.is_err());
    }
}
