//! # Dispatch Service ライブラリ
//!
//! バイナリ（`main.rs`）と統合テスト（`tests/`）の両方から
//! ハンドラ・ユースケース・エラー型を参照できるよう公開する。
//! ルータの組み立てと設定読み込みはバイナリ側に置く。

pub mod error;
pub mod handler;
pub mod usecase;
