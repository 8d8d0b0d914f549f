use chrono::NaiveDate;
use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{airline, airport, db::connect_with_config};



/// Fresh, migrated in-memory database per test.
pub(crate) async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let db = connect_with_config(&DatabaseConfig::with_url("sqlite::memory:")).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub(crate) fn airline_model(name: &str) -> airline::Model {
    airline::Model {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: format!("{name} description"),
        founded_on: NaiveDate::from_ymd_opt(1924, 5, 30).unwrap(),
        website: "https://www.example.com".to_string(),
    }
}

pub(crate) fn airport_model(code: &str) -> airport::Model {
    airport::Model {
        id: Uuid::new_v4(),
        name: format!("{code} International"),
        code: code.to_string(),
        country: "USA".to_string(),
        city: "Atlanta".to_string(),
    }
}
