//! # テスト用モック
//!
//! ユースケーステストと API テストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! mailflow-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mailflow_domain::{
   email::{EmailId, EmailRecord},
   mail::{MailError, OutgoingMail},
   page::{Page, PageRequest, SortDirection, SortField},
};

use crate::{error::InfraError, mail::MailSender, repository::EmailRepository};

// ===== MockEmailRepository =====

/// インメモリ実装の EmailRepository
///
/// PostgreSQL 実装と同じページング・ソート規則を適用する。
/// `set_fail_insert(true)` で挿入失敗を注入できる。
#[derive(Clone, Default)]
pub struct MockEmailRepository {
   records:     Arc<Mutex<Vec<EmailRecord>>>,
   fail_insert: Arc<Mutex<bool>>,
}

impl MockEmailRepository {
   pub fn new() -> Self {
      Self {
         records:     Arc::new(Mutex::new(Vec::new())),
         fail_insert: Arc::new(Mutex::new(false)),
      }
   }

   /// テストデータとして記録を事前投入する
   pub fn add_record(&self, record: EmailRecord) {
      self.records.lock().unwrap().push(record);
   }

   /// 保持している記録のスナップショットを取得する
   pub fn records(&self) -> Vec<EmailRecord> {
      self.records.lock().unwrap().clone()
   }

   /// 以降の挿入を失敗させるかどうかを設定する
   pub fn set_fail_insert(&self, fail: bool) {
      *self.fail_insert.lock().unwrap() = fail;
   }

   fn sorted(&self, sort: SortField, direction: SortDirection) -> Vec<EmailRecord> {
      let mut records: Vec<EmailRecord> = self.records.lock().unwrap().clone();
      records.sort_by(|a, b| {
         // PostgreSQL 実装と同じく、sent_at ソート時は id を第 2 キーにする
         let ordering = match sort {
            SortField::Id => a.id().as_uuid().cmp(b.id().as_uuid()),
            SortField::SentAt => a
               .sent_at()
               .cmp(&b.sent_at())
               .then_with(|| a.id().as_uuid().cmp(b.id().as_uuid())),
         };
         match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
         }
      });
      records
   }
}

#[async_trait]
impl EmailRepository for MockEmailRepository {
   async fn insert(&self, record: &EmailRecord) -> Result<(), InfraError> {
      if *self.fail_insert.lock().unwrap() {
         return Err(InfraError::unexpected("モックの挿入失敗"));
      }
      self.records.lock().unwrap().push(record.clone());
      Ok(())
   }

   async fn find_by_id(&self, id: &EmailId) -> Result<Option<EmailRecord>, InfraError> {
      Ok(self
         .records
         .lock()
         .unwrap()
         .iter()
         .find(|r| r.id() == id)
         .cloned())
   }

   async fn find_all(&self) -> Result<Vec<EmailRecord>, InfraError> {
      Ok(self.sorted(SortField::Id, SortDirection::Asc))
   }

   async fn find_page(&self, request: &PageRequest) -> Result<Page<EmailRecord>, InfraError> {
      let records = self.sorted(request.sort(), request.direction());
      let total = records.len() as u64;

      let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
      let content: Vec<EmailRecord> = records
         .into_iter()
         .skip(offset)
         .take(request.size() as usize)
         .collect();

      Ok(Page::new(content, request.page(), request.size(), total))
   }
}

// ===== MockMailSender =====

/// 送信試行を記録するインメモリ MailSender
///
/// 実際の送信は行わず、受け取ったメッセージを記録する。
/// `set_fail(true)` で送信失敗を注入できる（試行自体は記録される）。
#[derive(Clone, Default)]
pub struct MockMailSender {
   sent: Arc<Mutex<Vec<OutgoingMail>>>,
   fail: Arc<Mutex<bool>>,
}

impl MockMailSender {
   pub fn new() -> Self {
      Self {
         sent: Arc::new(Mutex::new(Vec::new())),
         fail: Arc::new(Mutex::new(false)),
      }
   }

   /// 送信試行されたメッセージのスナップショットを取得する
   pub fn sent(&self) -> Vec<OutgoingMail> {
      self.sent.lock().unwrap().clone()
   }

   /// 以降の送信を失敗させるかどうかを設定する
   pub fn set_fail(&self, fail: bool) {
      *self.fail.lock().unwrap() = fail;
   }
}

#[async_trait]
impl MailSender for MockMailSender {
   async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
      self.sent.lock().unwrap().push(mail.clone());

      if *self.fail.lock().unwrap() {
         return Err(MailError::SendFailed("モックの送信失敗".to_string()));
      }
      Ok(())
   }
}
