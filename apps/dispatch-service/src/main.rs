//! # Dispatch Service サーバー
//!
//! メールの送信と送信記録の照会を担当するマイクロサービス。
//!
//! ## 役割
//!
//! - **メール送信**: SMTP / Amazon SES v2 経由でメールを送信
//! - **送信記録**: 成功・失敗を問わず全試行を PostgreSQL に記録
//! - **照会 API**: 記録の単件取得・全件取得・ページング取得
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `DISPATCH_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `DISPATCH_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `MAIL_BACKEND` | No | 送信バックエンド `smtp` \| `ses` \| `noop`（デフォルト: `smtp`） |
//! | `SMTP_HOST` | No | SMTP ホスト（デフォルト: `localhost`） |
//! | `SMTP_PORT` | No | SMTP ポート（デフォルト: `1025`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（Mailpit に向けて送信）
//! cargo run -p mailflow-dispatch-service
//!
//! # 本番環境（SES 経由で送信）
//! DISPATCH_PORT=3002 DATABASE_URL=postgres://... MAIL_BACKEND=ses \
//!     cargo run -p mailflow-dispatch-service --release
//! ```

mod config;
mod error;
mod handler;
mod usecase;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use config::DispatchConfig;
use handler::{EmailState, get_email, health_check, list_all_emails, list_emails, send_email};
use mailflow_domain::clock::SystemClock;
use mailflow_infra::{
    db,
    mail::{MailSender, NoopMailSender, SesMailSender, SmtpMailSender},
    repository::{EmailRepository, PostgresEmailRepository},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use usecase::EmailUseCaseImpl;

/// Dispatch Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mailflow=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 設定読み込み
    let config = DispatchConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!(
        "Dispatch Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("データベース接続に失敗しました");
    tracing::info!("データベースに接続しました");

    // マイグレーション実行
    db::run_migrations(&pool)
        .await
        .expect("マイグレーションの実行に失敗しました");
    tracing::info!("マイグレーションを適用しました");

    // メール送信バックエンドを初期化
    let mail_sender: Arc<dyn MailSender> = match config.mail.backend.as_str() {
        "smtp" => {
            tracing::info!(
                "SMTP バックエンドを使用します: {}:{}",
                config.mail.smtp_host,
                config.mail.smtp_port
            );
            Arc::new(SmtpMailSender::new(
                &config.mail.smtp_host,
                config.mail.smtp_port,
            ))
        }
        "ses" => {
            tracing::info!("SES バックエンドを使用します");
            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .load()
                .await;
            Arc::new(SesMailSender::new(aws_sdk_sesv2::Client::new(&aws_config)))
        }
        "noop" => {
            tracing::info!("Noop バックエンドを使用します（メールは送信されません）");
            Arc::new(NoopMailSender)
        }
        other => anyhow::bail!("不正な MAIL_BACKEND です: {other}"),
    };

    // 依存コンポーネントを初期化
    let email_repository: Arc<dyn EmailRepository> =
        Arc::new(PostgresEmailRepository::new(pool));
    let email_usecase = EmailUseCaseImpl::new(email_repository, mail_sender, Arc::new(SystemClock));
    let email_state = Arc::new(EmailState {
        usecase: email_usecase,
    });

    // ルーター構築
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/sending-email", post(send_email))
        .route("/emails", get(list_emails))
        .route("/emails/all", get(list_all_emails))
        .route("/emails/{id}", get(get_email))
        .with_state(email_state)
        .layer(TraceLayer::new_for_http());

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Dispatch Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
