// main.rs
use blogicum::{Config, Migrator};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    tracing_subscriber::fmt().with_env_filter(EnvFilter::new(&config.log_filter)).init();

    let db = Database::connect(config.database_url.as_str()).await?;

    // 대기 중인 마이그레이션 적용
    let pending = Migrator::get_pending_migrations(&db).await?.len();
    Migrator::up(&db, None).await?;
    tracing::info!(
        applied = pending,
        media_root = %config.media_root.display(),
        "schema is up to date"
    );
    Ok(())
}
