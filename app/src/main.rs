use anyhow::Context as _;

use infra::AppState;

use app::{create_pg_pool, get_subscriber, init_subscriber, load_app_settings, migrate};

/// アプリケーションエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // アプリケーション設定を読み込み
    let app_settings = load_app_settings("app_settings.toml")?;

    // ログを初期化
    let subscriber = get_subscriber(
        String::from("branch_service"),
        app_settings.log.level,
        std::io::stdout,
    );
    init_subscriber(subscriber)?;

    // データベース接続プールを作成して、マイグレーション
    let pg_pool = create_pg_pool(&app_settings.database).await?;
    migrate(&pg_pool).await?;

    let app_state = AppState {
        app_settings,
        pg_pool,
    };
    let branches = app_state
        .branch_use_case()
        .list()
        .await
        .context("Failed to list branches")?;
    tracing::info!(count = branches.len(), "branch service is ready");

    Ok(())
}
