//! # 時刻プロバイダ
//!
//! 送信試行日時（sent_at）の採番を抽象化する。
//! ユースケース層が `Utc::now()` を直接呼ぶとテストで時刻を固定できないため、
//! このトレイトを経由して現在時刻を取得する。

use chrono::{DateTime, Utc};

/// 現在時刻を提供するトレイト
///
/// 本番では [`SystemClock`]、テストでは [`FixedClock`] を注入する。
pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Utc>;
}

/// システム時刻をそのまま返す実装
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Utc> {
      Utc::now()
   }
}

/// 常に同じ時刻を返すテスト用実装
///
/// sent_at の検証を決定的にするために使用する。
pub struct FixedClock {
   now: DateTime<Utc>,
}

impl FixedClock {
   pub fn new(now: DateTime<Utc>) -> Self {
      Self { now }
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Utc> {
      self.now
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_system_clockは呼び出し時点の時刻を返す() {
      let clock = SystemClock;

      let before = Utc::now();
      let now = clock.now();
      let after = Utc::now();

      assert!(before <= now && now <= after);
   }

   #[test]
   fn test_fixed_clockは注入した時刻を何度でも返す() {
      let fixed = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
      let clock = FixedClock::new(fixed);

      assert_eq!(clock.now(), fixed);
      // 時間が経過しても変化しない
      assert_eq!(clock.now(), clock.now());
   }
}
