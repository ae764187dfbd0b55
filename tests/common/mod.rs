#![allow(dead_code)]

use blogicum::Migrator;
use chrono::{Duration, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

/// Fresh in-memory database with every migration applied.
pub async fn setup() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    Migrator::up(&db, None).await.expect("migrations apply");
    db
}

pub fn hours_ago(hours: i64) -> DateTimeWithTimeZone {
    (Utc::now() - Duration::hours(hours)).into()
}
